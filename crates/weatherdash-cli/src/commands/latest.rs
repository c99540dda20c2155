//! Latest command implementation.

use std::path::PathBuf;

use anyhow::{Result, bail};
use weatherdash_core::{TelemetryClient, latest};

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, format_latest_csv, format_latest_json, format_latest_text};
use crate::util::{fetch_with_progress, write_output};

pub async fn cmd_latest(
    client: &TelemetryClient,
    format: OutputFormat,
    output: Option<&PathBuf>,
    quiet: bool,
    opts: &FormatOptions,
) -> Result<()> {
    let show_progress = !quiet && matches!(format, OutputFormat::Text);
    let readings = fetch_with_progress(client, show_progress).await?;

    let Some(reading) = latest(&readings) else {
        bail!("The station at {} returned no readings.", client.base_url());
    };

    let content = match format {
        OutputFormat::Json => format_latest_json(reading, opts)?,
        OutputFormat::Text => format_latest_text(reading, opts),
        OutputFormat::Csv => format_latest_csv(reading, opts),
    };

    write_output(output, &content)?;
    Ok(())
}
