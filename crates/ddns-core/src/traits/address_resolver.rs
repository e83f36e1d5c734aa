// # Address Resolver Trait
//
// Defines the interface for discovering the caller's current public address.
//
// ## Implementations
//
// - HTTP echo services: `ddns-ip-http` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::traits::{AddressFamily, AddressResolver};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let resolver = /* AddressResolver implementation */;
//
//     let address = resolver.resolve(AddressFamily::V6).await?;
//     println!("public IPv6: {}", address);
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Address family (IPv4 or IPv6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    /// Human-readable label used in diagnostics ("IPv4" / "IPv6")
    pub fn label(self) -> &'static str {
        match self {
            AddressFamily::V4 => "IPv4",
            AddressFamily::V6 => "IPv6",
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A public address as reported by an echo service
///
/// The literal is kept exactly as received (after trimming). It is not
/// parsed, so a malformed body travels on to the provider, which rejects it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    family: AddressFamily,
    literal: String,
}

impl Address {
    /// Create an address of the given family
    pub fn new(family: AddressFamily, literal: impl Into<String>) -> Self {
        Self {
            family,
            literal: literal.into(),
        }
    }

    /// Which family this address was resolved for
    pub fn family(&self) -> AddressFamily {
        self.family
    }

    /// The textual form, as written into record content
    pub fn as_str(&self) -> &str {
        &self.literal
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

/// Trait for address resolver implementations
///
/// A resolver performs one lookup per call. It does not cache, retry or
/// remember previous answers; change tracking belongs to the engine.
#[async_trait]
pub trait AddressResolver: Send + Sync {
    /// Resolve the current public address for `family`
    ///
    /// # Returns
    ///
    /// - `Ok(Address)`: The address literal reported by the service
    /// - `Err(Error)`: Transport failure or non-200 status
    async fn resolve(&self, family: AddressFamily) -> Result<Address, crate::Error>;
}
