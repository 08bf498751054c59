use deltacontacts_sync::picked_contact;

#[test]
fn picked_contact_normalizes_number() {
    let contact = picked_contact(Some("17"), Some("Ada"), Some("+1 (415) 555-0100")).unwrap();
    assert_eq!(contact.id, "17");
    assert_eq!(contact.name, "Ada");
    assert_eq!(contact.phone_numbers.as_slice(), ["+14155550100"]);
    assert!(contact.emails.is_empty());
}

#[test]
fn picked_contact_without_anything_is_none() {
    assert!(picked_contact(None, None, None).is_none());
    assert!(picked_contact(None, Some(""), Some("  ")).is_none());
}

#[test]
fn picked_contact_without_id_keeps_number() {
    let contact = picked_contact(None, None, Some("555-0100")).unwrap();
    assert_eq!(contact.id, "");
    assert_eq!(contact.phone_numbers.as_slice(), ["5550100"]);
}

#[test]
fn picked_contact_skips_identity_filter() {
    let contact = picked_contact(Some("9"), None, None).unwrap();
    assert_eq!(contact.id, "9");
    assert!(!contact.has_identity_signal());
}
