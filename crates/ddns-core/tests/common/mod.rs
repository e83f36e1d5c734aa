//! Test doubles and common utilities for engine contract tests
//!
//! The doubles keep their state behind an `Arc`, so a test can hand a clone
//! to the engine and keep another to inspect call counts afterwards.

#![allow(dead_code)]

use ddns_core::error::{Error, Result};
use ddns_core::traits::{
    Address, AddressFamily, AddressResolver, DnsProvider, LocatedRecord, RecordPayload,
    RecordType,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const RECORD_NAME: &str = "home.example.com";
pub const ZONE_ID: &str = "zone-123";

/// A resolver whose answers are set by the test
#[derive(Clone, Default)]
pub struct ScriptedResolver {
    answers: Arc<Mutex<HashMap<AddressFamily, String>>>,
    calls: Arc<Mutex<HashMap<AddressFamily, usize>>>,
}

impl ScriptedResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver answering `v4` and `v6`
    pub fn with(v4: &str, v6: &str) -> Self {
        let resolver = Self::new();
        resolver.set(AddressFamily::V4, v4);
        resolver.set(AddressFamily::V6, v6);
        resolver
    }

    /// Answer `literal` for `family` from now on
    pub fn set(&self, family: AddressFamily, literal: &str) {
        self.answers
            .lock()
            .unwrap()
            .insert(family, literal.to_string());
    }

    /// Fail every lookup for `family` from now on
    pub fn fail(&self, family: AddressFamily) {
        self.answers.lock().unwrap().remove(&family);
    }

    /// Number of resolve() calls for `family`
    pub fn calls(&self, family: AddressFamily) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(&family)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl AddressResolver for ScriptedResolver {
    async fn resolve(&self, family: AddressFamily) -> Result<Address> {
        *self.calls.lock().unwrap().entry(family).or_insert(0) += 1;

        match self.answers.lock().unwrap().get(&family) {
            Some(literal) => Ok(Address::new(family, literal.clone())),
            None => Err(Error::network(format!("{} echo service unreachable", family))),
        }
    }
}

/// Shared state of [`MockDnsProvider`]
#[derive(Default)]
struct ProviderState {
    records: Mutex<HashMap<RecordType, LocatedRecord>>,
    creates: Mutex<Vec<RecordPayload>>,
    updates: Mutex<Vec<(String, RecordPayload)>>,
    zone_lookups: AtomicUsize,
    record_lookups: AtomicUsize,
    next_id: AtomicUsize,
    fail_writes: AtomicBool,
    unknown_zone: AtomicBool,
}

/// An in-memory DnsProvider that tracks calls
#[derive(Clone, Default)]
pub struct MockDnsProvider {
    state: Arc<ProviderState>,
}

impl MockDnsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing record
    pub fn with_record(self, record_type: RecordType, id: &str, content: &str) -> Self {
        self.state.records.lock().unwrap().insert(
            record_type,
            LocatedRecord {
                id: id.to_string(),
                content: content.to_string(),
            },
        );
        self
    }

    /// Make create/update calls fail with a 500
    pub fn fail_writes(&self, fail: bool) {
        self.state.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make zone lookups come back empty
    pub fn unknown_zone(&self, unknown: bool) {
        self.state.unknown_zone.store(unknown, Ordering::SeqCst);
    }

    pub fn record(&self, record_type: RecordType) -> Option<LocatedRecord> {
        self.state.records.lock().unwrap().get(&record_type).cloned()
    }

    pub fn creates(&self) -> Vec<RecordPayload> {
        self.state.creates.lock().unwrap().clone()
    }

    pub fn updates(&self) -> Vec<(String, RecordPayload)> {
        self.state.updates.lock().unwrap().clone()
    }

    /// Number of create + update calls that were attempted
    pub fn write_count(&self) -> usize {
        self.creates().len() + self.updates().len()
    }

    pub fn zone_lookups(&self) -> usize {
        self.state.zone_lookups.load(Ordering::SeqCst)
    }

    pub fn record_lookups(&self) -> usize {
        self.state.record_lookups.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockDnsProvider {
    async fn zone_id(&self, zone_name: &str) -> Result<String> {
        self.state.zone_lookups.fetch_add(1, Ordering::SeqCst);
        if self.state.unknown_zone.load(Ordering::SeqCst) {
            return Err(Error::malformed(format!("Unable to get zone ID for domain {}", zone_name)));
        }
        assert_eq!(zone_name, "example.com", "zone derived from {}", RECORD_NAME);
        Ok(ZONE_ID.to_string())
    }

    async fn find_record(
        &self,
        zone_id: &str,
        record_type: RecordType,
        record_name: &str,
    ) -> Result<Option<LocatedRecord>> {
        self.state.record_lookups.fetch_add(1, Ordering::SeqCst);
        assert_eq!(zone_id, ZONE_ID);
        assert_eq!(record_name, RECORD_NAME);
        Ok(self.record(record_type))
    }

    async fn create_record(&self, zone_id: &str, payload: &RecordPayload) -> Result<()> {
        assert_eq!(zone_id, ZONE_ID);
        self.state.creates.lock().unwrap().push(payload.clone());
        if self.state.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::http_status(500, "internal error"));
        }

        let id = format!("rec-{}", self.state.next_id.fetch_add(1, Ordering::SeqCst));
        self.state.records.lock().unwrap().insert(
            payload.record_type,
            LocatedRecord {
                id,
                content: payload.content.clone(),
            },
        );
        Ok(())
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        payload: &RecordPayload,
    ) -> Result<()> {
        assert_eq!(zone_id, ZONE_ID);
        self.state
            .updates
            .lock()
            .unwrap()
            .push((record_id.to_string(), payload.clone()));
        if self.state.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::http_status(500, "internal error"));
        }

        if let Some(record) = self
            .state
            .records
            .lock()
            .unwrap()
            .get_mut(&payload.record_type)
        {
            record.content = payload.content.clone();
        }
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Helper to create a minimal UpdaterConfig for testing
pub fn minimal_config() -> ddns_core::UpdaterConfig {
    let mut config = ddns_core::UpdaterConfig::new("test-token", RECORD_NAME);
    config.log_file = None;
    config
}
