//! Core traits for the DDNS updater
//!
//! - [`AddressResolver`]: Discover the current public address
//! - [`DnsProvider`]: Look up and write DNS records via a provider API

pub mod address_resolver;
pub mod dns_provider;

pub use address_resolver::{Address, AddressFamily, AddressResolver};
pub use dns_provider::{DnsProvider, LocatedRecord, RecordPayload, RecordType, RECORD_TTL};
