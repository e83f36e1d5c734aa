//! Configuration types for the DDNS updater
//!
//! [`UpdaterConfig`] is built by the `ddnsd` CLI but is plain serde data, so
//! embedders can load it from any format they like.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::traits::AddressFamily;

/// Cloudflare API v4 base URL
pub const DEFAULT_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Echo service returning the caller's IPv4 address
pub const DEFAULT_IPV4_ECHO_URL: &str = "https://api.ipify.org/";

/// Echo service returning the caller's IPv6 address
pub const DEFAULT_IPV6_ECHO_URL: &str = "https://ipv6.duiadns.net/";

/// Default log file, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "ddns-log.txt";

/// Main updater configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct UpdaterConfig {
    /// Provider bearer token
    pub api_token: String,

    /// Fully-qualified record name to maintain (e.g. "home.example.com")
    pub record_name: String,

    /// Which address families to maintain
    #[serde(default)]
    pub families: FamilySelection,

    /// Polling interval in minutes
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u64,

    /// Append-only log file; `None` disables the file sink
    #[serde(default = "default_log_file")]
    pub log_file: Option<PathBuf>,

    /// Remote endpoints
    #[serde(default)]
    pub endpoints: EndpointConfig,
}

// The token must never reach logs
impl std::fmt::Debug for UpdaterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdaterConfig")
            .field("api_token", &"<REDACTED>")
            .field("record_name", &self.record_name)
            .field("families", &self.families)
            .field("interval_minutes", &self.interval_minutes)
            .field("log_file", &self.log_file)
            .field("endpoints", &self.endpoints)
            .finish()
    }
}

impl UpdaterConfig {
    /// Create a configuration with defaults for everything but the credentials
    pub fn new(api_token: impl Into<String>, record_name: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            record_name: record_name.into(),
            families: FamilySelection::default(),
            interval_minutes: default_interval_minutes(),
            log_file: default_log_file(),
            endpoints: EndpointConfig::default(),
        }
    }

    /// Polling interval as a duration
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_minutes.saturating_mul(60))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.api_token.trim().is_empty() {
            return Err(crate::Error::config("API key not provided"));
        }

        if self.record_name.trim().is_empty() {
            return Err(crate::Error::config("DDNS record name not provided"));
        }

        validate_record_name(&self.record_name)?;

        if self.interval_minutes == 0 {
            return Err(crate::Error::config(
                "Monitoring interval must be at least 1 minute",
            ));
        }

        self.endpoints.validate()
    }
}

/// Remote endpoints used by the updater
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Provider API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// IPv4 echo service
    #[serde(default = "default_ipv4_echo_url")]
    pub ipv4_echo_url: String,

    /// IPv6 echo service
    #[serde(default = "default_ipv6_echo_url")]
    pub ipv6_echo_url: String,
}

impl EndpointConfig {
    /// Validate URL schemes
    pub fn validate(&self) -> Result<(), crate::Error> {
        for (what, url) in [
            ("API base", &self.api_base),
            ("IPv4 echo URL", &self.ipv4_echo_url),
            ("IPv6 echo URL", &self.ipv6_echo_url),
        ] {
            if !url.starts_with("https://") && !url.starts_with("http://") {
                return Err(crate::Error::config(format!(
                    "{} must use HTTP or HTTPS scheme. Got: {}",
                    what, url
                )));
            }
        }
        Ok(())
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            ipv4_echo_url: default_ipv4_echo_url(),
            ipv6_echo_url: default_ipv6_echo_url(),
        }
    }
}

/// Address families to maintain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilySelection {
    /// A and AAAA records
    #[default]
    Both,
    /// A record only
    V4,
    /// AAAA record only
    V6,
}

impl FamilySelection {
    /// Families in processing order
    pub fn families(self) -> &'static [AddressFamily] {
        match self {
            FamilySelection::Both => &[AddressFamily::V4, AddressFamily::V6],
            FamilySelection::V4 => &[AddressFamily::V4],
            FamilySelection::V6 => &[AddressFamily::V6],
        }
    }
}

/// Basic domain-name syntax check (RFC 1035 lengths, LDH labels)
fn validate_record_name(domain: &str) -> Result<(), crate::Error> {
    if domain.len() > 253 {
        return Err(crate::Error::config(format!(
            "Domain name too long: {} chars (max 253). Got: {}",
            domain.len(),
            domain
        )));
    }

    for label in domain.split('.') {
        if label.is_empty() {
            return Err(crate::Error::config(format!(
                "Domain name has empty label: '{}'",
                domain
            )));
        }

        if label.len() > 63 {
            return Err(crate::Error::config(format!(
                "Domain label too long: {} chars (max 63). Label: '{}'",
                label.len(),
                label
            )));
        }

        if !label.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_') {
            return Err(crate::Error::config(format!(
                "Domain label contains invalid characters. Label: '{}'",
                label
            )));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(crate::Error::config(format!(
                "Domain label cannot start or end with hyphen. Label: '{}'",
                label
            )));
        }
    }

    Ok(())
}

fn default_interval_minutes() -> u64 {
    60
}

fn default_log_file() -> Option<PathBuf> {
    Some(PathBuf::from(DEFAULT_LOG_FILE))
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_ipv4_echo_url() -> String {
    DEFAULT_IPV4_ECHO_URL.to_string()
}

fn default_ipv6_echo_url() -> String {
    DEFAULT_IPV6_ECHO_URL.to_string()
}
