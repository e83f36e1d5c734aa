//! Last-seen address tracking
//!
//! The polling loop remembers the last address it successfully applied per
//! family, so an unchanged address skips every provider call. The state lives
//! for one process run and starts empty; it is passed into each cycle and the
//! updated copy is returned, never shared.

use crate::traits::{Address, AddressFamily};

/// Last successfully applied address, per family
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LastSeen {
    v4: Option<Address>,
    v6: Option<Address>,
}

impl LastSeen {
    /// Empty state (nothing applied yet)
    pub fn new() -> Self {
        Self::default()
    }

    /// Last applied address for `family`
    pub fn get(&self, family: AddressFamily) -> Option<&Address> {
        match family {
            AddressFamily::V4 => self.v4.as_ref(),
            AddressFamily::V6 => self.v6.as_ref(),
        }
    }

    /// Whether `address` is what was last applied for its family
    pub fn is_current(&self, address: &Address) -> bool {
        self.get(address.family()) == Some(address)
    }

    /// Return the state with `address` recorded for its family
    #[must_use]
    pub fn with(mut self, address: Address) -> Self {
        match address.family() {
            AddressFamily::V4 => self.v4 = Some(address),
            AddressFamily::V6 => self.v6 = Some(address),
        }
        self
    }

    /// One-line summary in the log file's historical format
    pub fn summary(&self) -> String {
        format!(
            "Current: IPV4: {} Current: IPV6: {}",
            self.v4.as_ref().map(Address::as_str).unwrap_or_default(),
            self.v6.as_ref().map(Address::as_str).unwrap_or_default(),
        )
    }
}
