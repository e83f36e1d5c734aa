// # ddns-core
//
// Core library for the Cloudflare dynamic-DNS updater.
//
// ## Architecture Overview
//
// - **AddressResolver**: Trait for discovering the current public address
// - **DnsProvider**: Trait for zone/record lookups and record writes
// - **reconcile**: The create-or-update decision for one address family
// - **DdnsEngine**: Runs reconciliation once, or as a polling loop with
//   last-seen change tracking
// - **Diagnostics**: Console + append-only log file sink
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Decision logic is separate from HTTP plumbing
// 2. **Sequential**: One logical worker, no parallel requests
// 3. **Idempotency**: Writes happen only when record content differs
// 4. **Library-First**: The daemon is a thin CLI around this crate

pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod state;
pub mod traits;
pub mod zone;

// Re-export core types for convenience
pub use config::{EndpointConfig, FamilySelection, UpdaterConfig};
pub use diagnostics::Diagnostics;
pub use engine::{DdnsEngine, ReconcileOutcome, reconcile};
pub use error::{Error, Result};
pub use state::LastSeen;
pub use traits::{Address, AddressFamily, AddressResolver, DnsProvider};
pub use zone::zone_name;
