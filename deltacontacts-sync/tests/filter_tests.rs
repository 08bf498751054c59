use deltacontacts_sync::{filter, merge};
use deltacontacts_types::{Contact, RawFieldRow};
use pretty_assertions::assert_eq;

fn contact(id: &str, name: &str, phones: &[&str], emails: &[&str]) -> Contact {
    let mut c = Contact::new(id, name);
    for p in phones {
        c.phone_numbers.insert(*p);
    }
    for e in emails {
        c.emails.insert(*e);
    }
    c
}

#[test]
fn email_only_contact_is_dropped() {
    let out = filter(vec![contact("A", "", &[], &["b@x.com"])]);
    assert!(out.is_empty());
}

#[test]
fn phone_only_contact_is_kept() {
    let out = filter(vec![contact("A", "", &["123"], &[])]);
    assert_eq!(out.len(), 1);
}

#[test]
fn named_contact_without_fields_is_kept() {
    let out = filter(vec![contact("A", "Alice", &[], &[])]);
    assert_eq!(out.len(), 1);
}

#[test]
fn whitespace_name_is_not_enough() {
    let out = filter(vec![contact("A", " \t ", &[], &["a@x.com"])]);
    assert!(out.is_empty());
}

#[test]
fn relative_order_is_preserved() {
    let out = filter(vec![
        contact("A", "Alice", &[], &[]),
        contact("B", "", &[], &["b@x.com"]),
        contact("C", "", &["3"], &[]),
        contact("D", "", &[], &[]),
        contact("E", "Eve", &["5"], &[]),
    ]);
    let ids: Vec<&str> = out.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["A", "C", "E"]);
}

#[test]
fn merge_then_filter_drops_email_only_owner() {
    let out = filter(merge(vec![
        RawFieldRow::email("A", "", "a@x.com"),
        RawFieldRow::phone("B", "", "+44 20 7946 0018"),
    ]));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id, "B");
    assert_eq!(out[0].phone_numbers.as_slice(), ["+442079460018"]);
}

mod filter_properties {
    use super::contact;
    use deltacontacts_sync::filter;
    use proptest::prelude::*;

    fn contact_strategy() -> impl Strategy<Value = deltacontacts_types::Contact> {
        ("[A-Z]{1,3}", "( |[a-z]{0,4})", prop::bool::ANY, prop::bool::ANY).prop_map(
            |(id, name, phone, email)| {
                let phones: &[&str] = if phone { &["1"] } else { &[] };
                let emails: &[&str] = if email { &["e@x.com"] } else { &[] };
                contact(&id, &name, phones, emails)
            },
        )
    }

    proptest! {
        /// Every survivor has an identity signal and appears in input order.
        #[test]
        fn output_is_ordered_subsequence_with_identity(
            input in prop::collection::vec(contact_strategy(), 0..30)
        ) {
            let expected: Vec<_> = input
                .iter()
                .filter(|c| c.has_identity_signal())
                .cloned()
                .collect();
            prop_assert_eq!(filter(input), expected);
        }
    }
}
