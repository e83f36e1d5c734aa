// # DNS Provider Trait
//
// Defines the lookups and mutations the reconciler needs from a DNS provider.
//
// ## Implementations
//
// - Cloudflare: `ddns-provider-cloudflare` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::traits::{DnsProvider, RecordPayload, RecordType};
//
// let zone_id = provider.zone_id("example.com").await?;
// match provider.find_record(&zone_id, RecordType::A, "home.example.com").await? {
//     Some(record) => provider.update_record(&zone_id, &record.id, &payload).await?,
//     None => provider.create_record(&zone_id, &payload).await?,
// }
// ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::traits::address_resolver::{Address, AddressFamily};

/// TTL written on every create and update, in seconds
pub const RECORD_TTL: u32 = 120;

/// DNS record type maintained by the updater
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    /// IPv4 address record
    A,
    /// IPv6 address record
    #[serde(rename = "AAAA")]
    Aaaa,
}

impl RecordType {
    /// Record type that holds addresses of `family`
    pub fn for_family(family: AddressFamily) -> Self {
        match family {
            AddressFamily::V4 => RecordType::A,
            AddressFamily::V6 => RecordType::Aaaa,
        }
    }

    /// Wire name ("A" / "AAAA")
    pub fn as_str(self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An existing record found by [`DnsProvider::find_record`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedRecord {
    /// Provider-assigned record id
    pub id: String,
    /// Current record content
    pub content: String,
}

/// Body of a create or update request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPayload {
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub name: String,
    pub content: String,
    pub ttl: u32,
}

impl RecordPayload {
    /// Payload pointing `name` at `address`, with the fixed TTL
    pub fn for_address(name: impl Into<String>, address: &Address) -> Self {
        Self {
            record_type: RecordType::for_family(address.family()),
            name: name.into(),
            content: address.as_str().to_string(),
            ttl: RECORD_TTL,
        }
    }
}

/// Trait for DNS provider implementations
///
/// Every method maps to exactly one API call. Providers do not retry, do not
/// cache zone or record ids between calls, and do not decide whether a write
/// is needed; that decision belongs to [`crate::engine::reconcile`].
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Resolve a zone name (e.g. "example.com") to the provider's zone id
    ///
    /// Fails with [`crate::Error::MalformedResponse`] when the provider knows no
    /// such zone.
    async fn zone_id(&self, zone_name: &str) -> Result<String, crate::Error>;

    /// Look up an existing record by type and name
    ///
    /// Returns `Ok(None)` when nothing matches. When several records match,
    /// the first one returned by the provider is used.
    async fn find_record(
        &self,
        zone_id: &str,
        record_type: RecordType,
        record_name: &str,
    ) -> Result<Option<LocatedRecord>, crate::Error>;

    /// Create a new record
    async fn create_record(
        &self,
        zone_id: &str,
        payload: &RecordPayload,
    ) -> Result<(), crate::Error>;

    /// Overwrite an existing record
    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        payload: &RecordPayload,
    ) -> Result<(), crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
