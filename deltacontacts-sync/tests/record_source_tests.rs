use async_trait::async_trait;
use deltacontacts_sync::{
    ChangeBatch, ContactSyncEngine, InMemoryHistoryStore, RecordProvider, RecordRowSource,
    RowQuery, RowSource, StaticPermissionGate, SyncConfig, SyncError, SyncResult,
};
use deltacontacts_types::{ContactRecord, FieldKind, RawFieldRow, SyncCheckpoint};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

struct FixedRecords(Vec<ContactRecord>);

#[async_trait]
impl RecordProvider for FixedRecords {
    async fn enumerate(&self) -> SyncResult<Vec<ContactRecord>> {
        Ok(self.0.clone())
    }
}

struct DeniedRecords;

#[async_trait]
impl RecordProvider for DeniedRecords {
    async fn enumerate(&self) -> SyncResult<Vec<ContactRecord>> {
        Err(SyncError::PermissionDenied)
    }
}

fn records() -> Vec<ContactRecord> {
    vec![
        ContactRecord::new("r1", "Ada", "Lovelace")
            .with_phone("+44 20 7946 0018")
            .with_email("ada@example.com"),
        ContactRecord::new("r2", "", "").with_email("anon@example.com"),
        ContactRecord::new("r3", "Grace", ""),
        ContactRecord::new("r4", "", "").with_phone("(555) 010-0000"),
    ]
}

fn all_kinds(since_watermark: Option<i64>) -> RowQuery {
    RowQuery {
        field_kinds: [FieldKind::Phone, FieldKind::Email].into_iter().collect(),
        since_watermark,
    }
}

// ── RecordRowSource ──────────────────────────────────────────────

#[tokio::test]
async fn records_flatten_to_rows() {
    let source = RecordRowSource::new(FixedRecords(records()));
    let rows = source.query(&all_kinds(None)).await.unwrap();

    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|r| !r.owner_id.is_empty()));
    assert_eq!(source.provider().0.len(), 4);
}

#[tokio::test]
async fn watermark_is_ignored_for_records() {
    init_tracing();
    let source = RecordRowSource::new(FixedRecords(records()));
    let all = source.query(&all_kinds(None)).await.unwrap();
    let since = source.query(&all_kinds(Some(i64::MAX))).await.unwrap();
    assert_eq!(all, since);
}

#[tokio::test]
async fn unrequested_kinds_lose_their_values() {
    let source = RecordRowSource::new(FixedRecords(records()));
    let query = RowQuery {
        field_kinds: [FieldKind::Phone].into_iter().collect(),
        since_watermark: None,
    };
    let rows = source.query(&query).await.unwrap();
    assert_eq!(rows.len(), 5);
    assert!(
        rows.iter()
            .filter(|r| r.field_kind == FieldKind::Email)
            .all(|r| r.value.is_none())
    );
}

#[test]
fn restrict_keeps_owner_and_name() {
    let query = RowQuery {
        field_kinds: [FieldKind::Phone].into_iter().collect(),
        since_watermark: None,
    };
    let rows = query.restrict(vec![
        RawFieldRow::email("A", "Ada", "ada@x.com"),
        RawFieldRow::phone("A", "Ada", "1"),
    ]);
    assert_eq!(
        rows,
        vec![
            RawFieldRow::new("A", Some("Ada"), FieldKind::Email, None),
            RawFieldRow::phone("A", "Ada", "1"),
        ]
    );
}

#[tokio::test]
async fn named_record_survives_when_no_field_is_requested() {
    let engine = ContactSyncEngine::new(
        SyncConfig {
            field_kinds: [FieldKind::Phone].into_iter().collect(),
            ..Default::default()
        },
        Arc::new(RecordRowSource::new(FixedRecords(vec![
            ContactRecord::new("r1", "Ada", "").with_email("ada@example.com"),
        ]))),
        Arc::new(StaticPermissionGate::granted()),
    );

    let outcome = engine.sync(None).await.unwrap();

    assert_eq!(outcome.contacts.len(), 1);
    assert_eq!(outcome.contacts[0].id, "r1");
    assert_eq!(outcome.contacts[0].name, "Ada");
    assert!(outcome.contacts[0].emails.is_empty());
}

#[tokio::test]
async fn provider_errors_propagate() {
    let source = RecordRowSource::new(DeniedRecords);
    let err = source.query(&all_kinds(None)).await.unwrap_err();
    assert!(matches!(err, SyncError::PermissionDenied));
}

// ── Through the engine ───────────────────────────────────────────

#[tokio::test]
async fn engine_syncs_record_source() {
    init_tracing();
    let engine = ContactSyncEngine::new(
        SyncConfig::default(),
        Arc::new(RecordRowSource::new(FixedRecords(records()))),
        Arc::new(StaticPermissionGate::granted()),
    );

    let outcome = engine.sync(None).await.unwrap();
    let summary: Vec<(&str, &str, Vec<&str>)> = outcome
        .contacts
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str(), c.phone_numbers.iter().collect()))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("r1", "Ada Lovelace", vec!["+442079460018"]),
            ("r3", "Grace", vec![]),
            ("r4", "", vec!["5550100000"]),
        ]
    );
}

#[tokio::test]
async fn record_changes_flow_through_differential_fetch() {
    let history = Arc::new(InMemoryHistoryStore::new());
    history
        .set_changes(
            b"t1".to_vec(),
            ChangeBatch::from_records(
                &[ContactRecord::new("n1", "New", "Person").with_phone("1")],
                &[ContactRecord::new("r1", "Ada", "King").with_phone("2")],
                Some(b"t2".to_vec()),
            ),
        )
        .await;
    let engine = ContactSyncEngine::new(
        SyncConfig::default(),
        Arc::new(RecordRowSource::new(FixedRecords(Vec::new()))),
        Arc::new(StaticPermissionGate::granted()),
    )
    .with_history(history);

    let outcome = engine
        .sync(Some(&SyncCheckpoint::history_token(b"t1".to_vec())))
        .await
        .unwrap();

    let names: Vec<&str> = outcome.contacts.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["New Person", "Ada King"]);
    assert_eq!(
        outcome.checkpoint,
        Some(SyncCheckpoint::history_token(b"t2".to_vec()))
    );
}
