//! JSON output formatting

use chrono::Utc;
use serde::Serialize;

/// Envelope for JSON output
#[derive(Debug, Serialize)]
pub struct JsonOutput<'a, T: ?Sized> {
    pub data: &'a T,
    pub meta: Metadata,
}

/// Metadata attached to every JSON document
#[derive(Debug, Serialize)]
pub struct Metadata {
    /// RFC 3339 generation time
    pub timestamp: String,

    /// taskctl version
    pub version: String,
}

impl<'a, T: ?Sized> JsonOutput<'a, T> {
    pub fn new(data: &'a T) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

/// Pretty-printed JSON inside the `{data, meta}` envelope
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data))
}
