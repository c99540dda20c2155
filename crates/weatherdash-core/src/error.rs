//! Error types for weatherdash-core.
//!
//! Only one external failure exists in this crate: fetching the reading
//! history. It is split by cause so callers can tell the user something
//! actionable.
//!
//! | Error | Typical cause |
//! |-------|---------------|
//! | [`Error::InvalidUrl`] | Endpoint misconfigured (missing scheme) |
//! | [`Error::NotReachable`] | Station offline, wrong host/port, request timed out |
//! | [`Error::Api`] | Station answered with a non-2xx status |
//! | [`Error::Decode`] | Body is not a JSON array of readings |
//!
//! None of these are retried; the loader reports the failure once and the
//! caller decides whether to ask again.

use thiserror::Error;

/// Errors that can occur while loading telemetry.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The configured endpoint is not an http(s) URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The endpoint could not be reached (connect failure or timeout).
    #[error("Telemetry endpoint not reachable at {url}: {source}")]
    NotReachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint returned an error status.
    #[error("Endpoint returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded as readings.
    #[error("Failed to decode readings from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Other HTTP client failure (building the client, reading the body).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl Error {
    /// Whether the failure was a request timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::NotReachable { source, .. } | Error::Request(source) => source.is_timeout(),
            _ => false,
        }
    }
}

/// Result type alias using weatherdash-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;
