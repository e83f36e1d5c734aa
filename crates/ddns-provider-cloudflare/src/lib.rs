// # Cloudflare DNS Provider
//
// This crate provides the Cloudflare API v4 implementation of `DnsProvider`.
//
// ## Behaviour
//
// - One HTTP request per trait call, all built by [`CloudflareProvider::send`]
// - Every request carries `Authorization: Bearer <token>` and
//   `Content-Type: application/json`
// - Any status other than 200 is an error carrying the status and body verbatim
// - Responses are decoded into typed envelopes; shape mismatches become
//   `Error::MalformedResponse`, except a record lookup whose `result` is not
//   an array, which means "no record"
// - No retries, no caching of zone or record ids
//
// ## Security Requirements
//
// - API token NEVER appears in logs or `Debug` output
//
// ## API Reference
//
// - List Zones: GET `/zones?name=...`
// - List DNS Records: GET `/zones/:zone_id/dns_records?type=...&name=...`
// - Create DNS Record: POST `/zones/:zone_id/dns_records`
// - Update DNS Record: PUT `/zones/:zone_id/dns_records/:record_id`

use async_trait::async_trait;
use ddns_core::config::DEFAULT_API_BASE;
use ddns_core::traits::{DnsProvider, LocatedRecord, RecordPayload, RecordType};
use ddns_core::{Error, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// `{"result": [...]}` envelope of list endpoints
///
/// `result` is kept raw so that a missing, null or non-array value can be
/// told apart from a list whose elements fail to decode.
#[derive(Debug, Deserialize)]
struct ListEnvelope {
    result: Option<Value>,
}

impl ListEnvelope {
    /// Decode the result array, `None` when there is no array
    fn items<T: DeserializeOwned>(self) -> Result<Option<Vec<T>>> {
        match self.result {
            Some(items @ Value::Array(_)) => Ok(Some(serde_json::from_value(items)?)),
            _ => Ok(None),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ZoneEntry {
    id: String,
}

#[derive(Debug, Deserialize)]
struct RecordEntry {
    id: String,
    #[serde(default)]
    content: String,
}

/// Cloudflare DNS provider
pub struct CloudflareProvider {
    /// Cloudflare API token
    /// ⚠️ NEVER log this value
    api_token: String,

    /// API base URL, without trailing slash
    api_base: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("api_token", &"<REDACTED>")
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl CloudflareProvider {
    /// Create a provider talking to the public Cloudflare API
    ///
    /// # Parameters
    ///
    /// - `api_token`: Cloudflare API token with Zone:DNS:Edit permissions
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_token, DEFAULT_API_BASE)
    }

    /// Create a provider talking to `api_base` (e.g. a mock server)
    pub fn with_base_url(api_token: impl Into<String>, api_base: impl Into<String>) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.is_empty() {
            return Err(Error::config("Cloudflare API token cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_token,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Build an API URL from path segments and query pairs
    fn url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let raw = format!("{}{}", self.api_base, path);
        let parsed = if query.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, query)
        };
        parsed.map_err(|e| Error::config(format!("Invalid API URL {}: {}", raw, e)))
    }

    /// Send one authenticated request and return the body of a 200 response
    ///
    /// # Errors
    ///
    /// - `Error::Network`: the request could not be sent or its body read
    /// - `Error::HttpStatus`: any status other than 200, with the body verbatim
    pub async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&RecordPayload>,
    ) -> Result<Vec<u8>> {
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method, url)
            .bearer_auth(&self.api_token)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::network(format!("Failed to make request: {}", e)))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::network(format!("Failed to read response body: {}", e)))?;

        if status != StatusCode::OK {
            return Err(Error::http_status(
                status.as_u16(),
                String::from_utf8_lossy(&bytes),
            ));
        }

        Ok(bytes.to_vec())
    }

    /// Send a GET and decode a list envelope
    async fn list<T: DeserializeOwned>(&self, url: Url) -> Result<Option<Vec<T>>> {
        let body = self.send(Method::GET, url, None).await?;
        let envelope: ListEnvelope = serde_json::from_slice(&body)?;
        envelope.items()
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    /// ```http
    /// GET /zones?name=example.com
    /// ```
    async fn zone_id(&self, zone_name: &str) -> Result<String> {
        tracing::debug!("Looking up zone ID for domain: {}", zone_name);

        let url = self.url("/zones", &[("name", zone_name)])?;
        let zones: Vec<ZoneEntry> = self.list(url).await?.unwrap_or_default();

        let zone = zones
            .into_iter()
            .next()
            .ok_or_else(|| Error::malformed(format!("Unable to get zone ID for domain {}", zone_name)))?;

        tracing::debug!("Found zone ID: {}", zone.id);
        Ok(zone.id)
    }

    /// ```http
    /// GET /zones/:zone_id/dns_records?type=A&name=home.example.com
    /// ```
    async fn find_record(
        &self,
        zone_id: &str,
        record_type: RecordType,
        record_name: &str,
    ) -> Result<Option<LocatedRecord>> {
        tracing::debug!(
            "Looking up record ID: {} (type: {})",
            record_name,
            record_type
        );

        let url = self.url(
            &format!("/zones/{}/dns_records", zone_id),
            &[("type", record_type.as_str()), ("name", record_name)],
        )?;

        // A missing, null or non-array result counts as "no record"
        let records: Vec<RecordEntry> = self.list(url).await?.unwrap_or_default();

        Ok(records.into_iter().next().map(|record| {
            tracing::debug!("Found record ID: {}", record.id);
            LocatedRecord {
                id: record.id,
                content: record.content,
            }
        }))
    }

    /// ```http
    /// POST /zones/:zone_id/dns_records
    /// {"type":"AAAA","name":"home.example.com","content":"2001:db8::1","ttl":120}
    /// ```
    async fn create_record(&self, zone_id: &str, payload: &RecordPayload) -> Result<()> {
        let url = self.url(&format!("/zones/{}/dns_records", zone_id), &[])?;
        self.send(Method::POST, url, Some(payload)).await?;

        tracing::info!(
            "Created {} record {} -> {}",
            payload.record_type,
            payload.name,
            payload.content
        );
        Ok(())
    }

    /// ```http
    /// PUT /zones/:zone_id/dns_records/:record_id
    /// {"type":"A","name":"home.example.com","content":"1.2.3.5","ttl":120}
    /// ```
    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        payload: &RecordPayload,
    ) -> Result<()> {
        let url = self.url(&format!("/zones/{}/dns_records/{}", zone_id, record_id), &[])?;
        self.send(Method::PUT, url, Some(payload)).await?;

        tracing::info!(
            "Updated {} record {} ({}) -> {}",
            payload.record_type,
            payload.name,
            record_id,
            payload.content
        );
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "cloudflare"
    }
}
