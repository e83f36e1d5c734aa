//! Create-or-update decision for one address family
//!
//! ```text
//! zone_name(record) ─► zone_id ─► find_record(type, name)
//!                                      │
//!          ┌───────────────────────────┼───────────────────────────┐
//!          ▼                           ▼                           ▼
//!       absent                 content ≠ desired           content = desired
//!   create (ttl 120)           update same id (ttl 120)        no write
//! ```
//!
//! Content is compared as exact strings. There is no concurrency token, so a
//! record changed by someone else between lookup and write is overwritten.

use tracing::debug;

use crate::error::Result;
use crate::traits::{Address, DnsProvider, RecordPayload, RecordType};
use crate::zone::zone_name;

/// What a reconciliation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// No record existed; one was created
    Created {
        address: Address,
    },

    /// A stale record was overwritten
    Updated {
        record_id: String,
        previous_content: String,
        address: Address,
    },

    /// The record already held the address; nothing was written
    Unchanged {
        address: Address,
    },
}

impl ReconcileOutcome {
    /// The address the record now holds
    pub fn address(&self) -> &Address {
        match self {
            ReconcileOutcome::Created { address }
            | ReconcileOutcome::Updated { address, .. }
            | ReconcileOutcome::Unchanged { address } => address,
        }
    }

    /// Whether a create or update call was made
    pub fn wrote(&self) -> bool {
        !matches!(self, ReconcileOutcome::Unchanged { .. })
    }

    /// Status line for the diagnostics sink
    pub fn message(&self) -> String {
        let address = self.address();
        let family = address.family();
        match self {
            ReconcileOutcome::Created { .. } => {
                format!("{} DNS record created successfully, ip: {}", family, address)
            }
            ReconcileOutcome::Updated { .. } => {
                format!("{} DNS record updated successfully, ip: {}", family, address)
            }
            ReconcileOutcome::Unchanged { .. } => {
                format!("{} DNS record has not updated, ip: {}", family, address)
            }
        }
    }
}

/// Point `record_name` at `desired`, writing only when needed
///
/// # Returns
///
/// - `Ok(ReconcileOutcome)`: What was done
/// - `Err(Error)`: The first failing lookup or write
pub async fn reconcile(
    provider: &dyn DnsProvider,
    record_name: &str,
    desired: &Address,
) -> Result<ReconcileOutcome> {
    let zone = zone_name(record_name);
    let zone_id = provider.zone_id(&zone).await?;
    debug!("Zone {} has id {}", zone, zone_id);

    let record_type = RecordType::for_family(desired.family());
    let payload = RecordPayload::for_address(record_name, desired);

    match provider
        .find_record(&zone_id, record_type, record_name)
        .await?
    {
        None => {
            debug!("No {} record for {}, creating", record_type, record_name);
            provider.create_record(&zone_id, &payload).await?;
            Ok(ReconcileOutcome::Created {
                address: desired.clone(),
            })
        }
        Some(record) if record.content != desired.as_str() => {
            debug!(
                "{} record {} holds {}, updating to {}",
                record_type, record.id, record.content, desired
            );
            provider
                .update_record(&zone_id, &record.id, &payload)
                .await?;
            Ok(ReconcileOutcome::Updated {
                record_id: record.id,
                previous_content: record.content,
                address: desired.clone(),
            })
        }
        Some(record) => {
            debug!("{} record {} already holds {}", record_type, record.id, desired);
            Ok(ReconcileOutcome::Unchanged {
                address: desired.clone(),
            })
        }
    }
}
