// # HTTP Address Resolver
//
// This crate resolves the caller's public address through plain-text HTTP
// echo services (one per address family).
//
// ## Behaviour
//
// - One unauthenticated GET per `resolve()` call
// - The body, trimmed, is the address literal; it is not parsed
// - Non-200 status or transport failure is an error; nothing is retried
//
// Default services: `https://api.ipify.org/` (IPv4) and
// `https://ipv6.duiadns.net/` (IPv6).

use ddns_core::config::{DEFAULT_IPV4_ECHO_URL, DEFAULT_IPV6_ECHO_URL, EndpointConfig};
use ddns_core::traits::{Address, AddressFamily, AddressResolver};
use ddns_core::{Error, Result};

use reqwest::StatusCode;

/// HTTP echo-service address resolver
#[derive(Debug, Clone)]
pub struct HttpAddressResolver {
    /// Service returning the IPv4 address
    ipv4_url: String,

    /// Service returning the IPv6 address
    ipv6_url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpAddressResolver {
    /// Create a resolver using the default echo services
    pub fn new() -> Result<Self> {
        Self::with_urls(DEFAULT_IPV4_ECHO_URL, DEFAULT_IPV6_ECHO_URL)
    }

    /// Create a resolver using custom echo services
    ///
    /// # Parameters
    ///
    /// - `ipv4_url`: URL answering with the IPv4 address (e.g. "https://api.ipify.org")
    /// - `ipv6_url`: URL answering with the IPv6 address
    pub fn with_urls(ipv4_url: impl Into<String>, ipv6_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            ipv4_url: ipv4_url.into(),
            ipv6_url: ipv6_url.into(),
            client,
        })
    }

    /// Create a resolver from the configured endpoints
    pub fn from_endpoints(endpoints: &EndpointConfig) -> Result<Self> {
        Self::with_urls(&endpoints.ipv4_echo_url, &endpoints.ipv6_echo_url)
    }

    /// Echo service for `family`
    pub fn url_for(&self, family: AddressFamily) -> &str {
        match family {
            AddressFamily::V4 => &self.ipv4_url,
            AddressFamily::V6 => &self.ipv6_url,
        }
    }
}

#[async_trait::async_trait]
impl AddressResolver for HttpAddressResolver {
    async fn resolve(&self, family: AddressFamily) -> Result<Address> {
        let url = self.url_for(family);
        tracing::debug!("Resolving {} address via {}", family, url);

        let response = self.client.get(url).send().await.map_err(|e| {
            Error::network(format!("Unable to get {} address: {}", family, e))
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::network(format!("Unable to read response body: {}", e)))?;

        if status != StatusCode::OK {
            return Err(Error::http_status(status.as_u16(), body));
        }

        let address = Address::new(family, body.trim());
        tracing::debug!("Resolved {} address: {}", family, address);
        Ok(address)
    }
}
