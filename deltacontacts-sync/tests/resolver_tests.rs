use deltacontacts_sync::{classify, resolve, ChangeBatch, DeltaOutcome, Strategy};
use deltacontacts_types::{RawFieldRow, SyncCheckpoint};

// ── resolve ──────────────────────────────────────────────────────

#[test]
fn no_checkpoint_is_unfiltered_full_scan() {
    assert_eq!(
        resolve(None),
        Strategy::FullScan {
            since_watermark: None
        }
    );
}

#[test]
fn positive_watermark_narrows_full_scan() {
    assert_eq!(
        resolve(Some(&SyncCheckpoint::Watermark(1_000))),
        Strategy::FullScan {
            since_watermark: Some(1_000)
        }
    );
}

#[test]
fn zero_or_negative_watermark_is_unfiltered() {
    for ts in [0, -1] {
        assert_eq!(
            resolve(Some(&SyncCheckpoint::Watermark(ts))),
            Strategy::FullScan {
                since_watermark: None
            }
        );
    }
}

#[test]
fn history_token_is_differential() {
    assert_eq!(
        resolve(Some(&SyncCheckpoint::history_token(vec![7, 7]))),
        Strategy::Differential { token: vec![7, 7] }
    );
}

// ── classify ─────────────────────────────────────────────────────

#[test]
fn missing_answer_is_no_changes() {
    assert_eq!(classify(None), DeltaOutcome::NoChanges);
}

#[test]
fn reset_flag_wins_over_contents() {
    let batch = ChangeBatch {
        added: vec![RawFieldRow::phone("A", "Alice", "1")],
        should_reset: true,
        ..Default::default()
    };
    assert_eq!(classify(Some(batch)), DeltaOutcome::Reset);
    assert_eq!(classify(Some(ChangeBatch::reset())), DeltaOutcome::Reset);
}

#[test]
fn concrete_batch_is_changes() {
    let batch = ChangeBatch {
        updated: vec![RawFieldRow::phone("A", "Alice", "1")],
        next_token: Some(vec![2]),
        ..Default::default()
    };
    assert_eq!(classify(Some(batch.clone())), DeltaOutcome::Changes(batch));
}

#[test]
fn empty_non_reset_batch_is_still_changes() {
    let batch = ChangeBatch::default();
    assert_eq!(classify(Some(batch.clone())), DeltaOutcome::Changes(batch));
}
