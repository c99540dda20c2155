//! HTTP loader for the weather station's reading history.
//!
//! The station exposes its full history as a JSON array at `{base}/data`.
//! [`TelemetryClient::fetch_readings`] performs exactly one request per call:
//! there is no polling, pagination or retry.
//!
//! # Example
//!
//! ```no_run
//! use weatherdash_core::client::TelemetryClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = TelemetryClient::new("http://192.168.1.50:3000")?;
//! let readings = client.fetch_readings().await?;
//! println!("Loaded {} readings", readings.len());
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, warn};

use weatherdash_types::Reading;

use crate::error::{Error, Result};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Path of the history endpoint, relative to the base URL.
pub const DATA_PATH: &str = "/data";

/// HTTP client for a weather station.
#[derive(Debug, Clone)]
pub struct TelemetryClient {
    client: Client,
    base_url: String,
}

impl TelemetryClient {
    /// Create a new client with the default timeout.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The station's base URL (e.g., "http://192.168.1.50:3000")
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a new client with a custom request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::Request)?;

        Ok(Self { client, base_url })
    }

    /// Create a client with a custom reqwest Client.
    pub fn with_client(base_url: &str, client: Client) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        Ok(Self { client, base_url })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the history endpoint.
    pub fn data_url(&self) -> String {
        format!("{}{}", self.base_url, DATA_PATH)
    }

    /// Fetch the full reading history.
    ///
    /// Readings are returned in the order the station sent them.
    pub async fn fetch_readings(&self) -> Result<Vec<Reading>> {
        let url = self.data_url();
        debug!(%url, "Fetching readings");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::NotReachable {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or_else(|| status.to_string());

            warn!(%url, status = status.as_u16(), %message, "Station returned error status");
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        let readings: Vec<Reading> =
            serde_json::from_slice(&body).map_err(|e| Error::Decode {
                url: url.clone(),
                source: e,
            })?;

        info!(%url, count = readings.len(), "Loaded readings");
        Ok(readings)
    }
}

fn normalize_base_url(base_url: &str) -> Result<String> {
    // Normalize URL (remove trailing slash)
    let base_url = base_url.trim().trim_end_matches('/').to_string();

    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(Error::InvalidUrl(format!(
            "URL must start with http:// or https://, got: {}",
            base_url
        )));
    }

    Ok(base_url)
}
