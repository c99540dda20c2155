//! Utility functions for CLI operations.

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use time::UtcOffset;
use weatherdash_core::{Reading, TelemetryClient};

use crate::style;

/// Build a client, mapping URL errors to user-facing messages.
pub fn build_client(url: &str, timeout: Duration) -> Result<TelemetryClient> {
    TelemetryClient::with_timeout(url, timeout)
        .with_context(|| format!("Cannot use station URL '{}'", url))
}

/// Fetch the reading history with optional progress display.
pub async fn fetch_with_progress(client: &TelemetryClient, show_progress: bool) -> Result<Vec<Reading>> {
    let spinner = if show_progress && io::stderr().is_terminal() {
        Some(style::fetching_spinner(&client.data_url()))
    } else {
        None
    };

    let result = client.fetch_readings().await;

    if let Some(sp) = spinner {
        match &result {
            Ok(readings) => sp.finish_with_message(format!("Loaded {} readings", readings.len())),
            Err(_) => sp.finish_and_clear(),
        }
    }

    result.map_err(|e| {
        let context = fetch_failure_context(&e, &client.data_url());
        anyhow::Error::new(e).context(context)
    })
}

/// Context line for a failed fetch; timeouts suggest a larger `--timeout`.
fn fetch_failure_context(err: &weatherdash_core::Error, url: &str) -> String {
    if err.is_timeout() {
        format!("Timed out loading readings from {} (try a larger --timeout)", url)
    } else {
        format!("Failed to load readings from {}", url)
    }
}

/// The local UTC offset, falling back to UTC.
///
/// `time` refuses to read the local offset in multi-threaded programs on
/// some platforms, so chrono is used here.
pub fn local_offset() -> UtcOffset {
    let seconds = chrono::Local::now().offset().local_minus_utc();
    UtcOffset::from_whole_seconds(seconds).unwrap_or(UtcOffset::UTC)
}

/// Write output to file or stdout.
pub fn write_output(output: Option<&PathBuf>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }
        None => {
            print!("{}", content);
            io::stdout().flush()?;
        }
    }
    Ok(())
}
