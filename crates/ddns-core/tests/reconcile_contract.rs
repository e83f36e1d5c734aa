//! Contract Test: Create-or-Update Reconciliation
//!
//! Constraints verified:
//! - An absent record is created exactly once
//! - A stale record is updated in place (same id), never re-created
//! - A matching record causes no write
//! - Every write carries the fixed TTL
//! - Lookup and write failures surface unchanged

mod common;

use common::*;
use ddns_core::traits::{Address, AddressFamily, RecordType, RECORD_TTL};
use ddns_core::{Error, ReconcileOutcome, reconcile};

fn v4(literal: &str) -> Address {
    Address::new(AddressFamily::V4, literal)
}

fn v6(literal: &str) -> Address {
    Address::new(AddressFamily::V6, literal)
}

#[tokio::test]
async fn absent_record_is_created_once() {
    let provider = MockDnsProvider::new();

    let outcome = reconcile(&provider, RECORD_NAME, &v6("2001:db8::1"))
        .await
        .expect("reconcile succeeds");

    assert!(matches!(outcome, ReconcileOutcome::Created { .. }));
    assert_eq!(provider.updates().len(), 0, "no update for an absent record");

    let creates = provider.creates();
    assert_eq!(creates.len(), 1, "exactly one create");
    assert_eq!(creates[0].record_type, RecordType::Aaaa);
    assert_eq!(creates[0].name, RECORD_NAME);
    assert_eq!(creates[0].content, "2001:db8::1");
    assert_eq!(creates[0].ttl, RECORD_TTL);
}

#[tokio::test]
async fn stale_record_is_updated_in_place() {
    let provider = MockDnsProvider::new().with_record(RecordType::A, "xyz789", "1.2.3.4");

    let outcome = reconcile(&provider, RECORD_NAME, &v4("1.2.3.5"))
        .await
        .expect("reconcile succeeds");

    assert_eq!(
        outcome,
        ReconcileOutcome::Updated {
            record_id: "xyz789".to_string(),
            previous_content: "1.2.3.4".to_string(),
            address: v4("1.2.3.5"),
        }
    );
    assert_eq!(provider.creates().len(), 0, "no create for a present record");

    let updates = provider.updates();
    assert_eq!(updates.len(), 1, "exactly one update");
    assert_eq!(updates[0].0, "xyz789");
    assert_eq!(updates[0].1.content, "1.2.3.5");
    assert_eq!(updates[0].1.record_type, RecordType::A);
    assert_eq!(updates[0].1.ttl, 120);
}

#[tokio::test]
async fn matching_record_is_left_alone() {
    let provider =
        MockDnsProvider::new().with_record(RecordType::Aaaa, "abc123", "2001:db8::1");

    let outcome = reconcile(&provider, RECORD_NAME, &v6("2001:db8::1"))
        .await
        .expect("reconcile succeeds");

    assert!(matches!(outcome, ReconcileOutcome::Unchanged { .. }));
    assert!(!outcome.wrote());
    assert_eq!(provider.write_count(), 0, "no POST/PUT for a matching record");
}

#[tokio::test]
async fn second_reconciliation_performs_no_writes() {
    let provider = MockDnsProvider::new();
    let desired = v4("203.0.113.7");

    let first = reconcile(&provider, RECORD_NAME, &desired).await.unwrap();
    assert!(first.wrote());
    let writes_after_first = provider.write_count();

    let second = reconcile(&provider, RECORD_NAME, &desired).await.unwrap();
    assert!(matches!(second, ReconcileOutcome::Unchanged { .. }));
    assert_eq!(
        provider.write_count(),
        writes_after_first,
        "idempotent: the second run must not write"
    );
}

#[tokio::test]
async fn families_target_their_own_record_type() {
    let provider = MockDnsProvider::new().with_record(RecordType::A, "a-1", "1.2.3.4");

    // The A record matches; the AAAA record is absent
    reconcile(&provider, RECORD_NAME, &v4("1.2.3.4")).await.unwrap();
    reconcile(&provider, RECORD_NAME, &v6("2001:db8::1")).await.unwrap();

    assert_eq!(provider.updates().len(), 0);
    assert_eq!(provider.creates().len(), 1);
    assert_eq!(provider.creates()[0].record_type, RecordType::Aaaa);
}

#[tokio::test]
async fn unvalidated_literal_is_passed_through() {
    let provider = MockDnsProvider::new();

    reconcile(&provider, RECORD_NAME, &v6("<html>oops</html>"))
        .await
        .unwrap();

    assert_eq!(provider.creates()[0].content, "<html>oops</html>");
}

#[tokio::test]
async fn unknown_zone_stops_before_record_lookup() {
    let provider = MockDnsProvider::new();
    provider.unknown_zone(true);

    let err = reconcile(&provider, RECORD_NAME, &v4("1.2.3.4"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MalformedResponse(_)));
    assert_eq!(provider.record_lookups(), 0);
    assert_eq!(provider.write_count(), 0);
}

#[tokio::test]
async fn write_failure_is_propagated() {
    let provider = MockDnsProvider::new();
    provider.fail_writes(true);

    let err = reconcile(&provider, RECORD_NAME, &v4("1.2.3.4"))
        .await
        .unwrap_err();

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "internal error");
        }
        other => panic!("unexpected error: {other}"),
    }
}
