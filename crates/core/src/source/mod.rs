//! Ticket source abstraction and the upstream record format.
//!
//! The upstream service returns one JSON object per client: the key
//! `cnb_title` carries the client name, purely-numeric keys carry ticket
//! records, and any other key is metadata to be skipped. The whole body may
//! arrive wrapped in a `<pre>` tag.

mod http;

pub use http::HttpTicketSource;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while fetching client tickets.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Request timed out")]
    Timeout,

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

/// One raw ticket record as delivered by the upstream service.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTicketRecord {
    #[serde(rename = "cnb_support_ticket_number", default)]
    pub number: String,
    #[serde(rename = "cnb_support_ticket_title", default)]
    pub title: String,
    #[serde(rename = "cnb_support_ticket_priority", default)]
    pub priority: Option<String>,
    #[serde(rename = "cnb_created_datetime", default)]
    pub created: String,
    #[serde(rename = "cnb_support_ticket_content", default)]
    pub content: String,
    #[serde(rename = "responded_content_with_datetime", default)]
    pub response: String,
}

/// The keyed record set for one client, with tickets in ascending numeric
/// key order so downstream batch contents are reproducible.
#[derive(Debug, Clone)]
pub struct ClientRecords {
    pub client_name: String,
    pub tickets: Vec<RawTicketRecord>,
}

/// Trait for ticket data providers.
#[async_trait]
pub trait TicketSource: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Fetch the full record set for one client.
    async fn fetch(&self, client_id: &str) -> Result<ClientRecords, SourceError>;
}

/// Parse an upstream response body into a [`ClientRecords`].
///
/// Strips the optional `<pre>` wrapper, then walks the top-level object:
/// numeric keys become tickets (ascending key order), `cnb_title` becomes
/// the client name.
pub fn parse_payload(body: &str) -> Result<ClientRecords, SourceError> {
    let mut stripped = body.trim();
    stripped = stripped.strip_prefix("<pre>").unwrap_or(stripped);
    stripped = stripped.strip_suffix("</pre>").unwrap_or(stripped);

    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(stripped.trim())
        .map_err(|e| SourceError::MalformedPayload(e.to_string()))?;

    let client_name = map
        .get("cnb_title")
        .and_then(|v| v.as_str())
        .unwrap_or("Unknown Client")
        .to_string();

    let mut keyed: Vec<(u64, RawTicketRecord)> = Vec::new();
    for (key, value) in &map {
        let Ok(numeric_key) = key.parse::<u64>() else {
            continue;
        };
        let record: RawTicketRecord = serde_json::from_value(value.clone()).map_err(|e| {
            SourceError::MalformedPayload(format!("record {}: {}", numeric_key, e))
        })?;
        keyed.push((numeric_key, record));
    }
    keyed.sort_by_key(|(key, _)| *key);

    Ok(ClientRecords {
        client_name,
        tickets: keyed.into_iter().map(|(_, record)| record).collect(),
    })
}
