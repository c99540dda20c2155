//! Series command implementation.

use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;
use weatherdash_core::{
    Field, Selection, SeriesStats, TelemetryClient, TimeRange, ViewContext, derive_series,
};

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, format_series_csv, format_series_json, format_series_text};
use crate::util::{fetch_with_progress, write_output};

/// Arguments for the series command.
pub struct SeriesArgs<'a> {
    pub field: Field,
    pub range: TimeRange,
    pub format: OutputFormat,
    pub output: Option<&'a PathBuf>,
    pub quiet: bool,
    pub opts: &'a FormatOptions,
}

pub async fn cmd_series(client: &TelemetryClient, args: SeriesArgs<'_>) -> Result<()> {
    let SeriesArgs {
        field,
        range,
        format,
        output,
        quiet,
        opts,
    } = args;

    let show_progress = !quiet && matches!(format, OutputFormat::Text);
    let readings = fetch_with_progress(client, show_progress).await?;

    let ctx = ViewContext::now_with_offset(opts.offset);
    let selection = Selection {
        field: Some(field),
        range,
    };
    let series = derive_series(&readings, &selection, &ctx);
    let stats = SeriesStats::from_series(&series);
    debug!(
        field = field.name(),
        range = range.name(),
        total = readings.len(),
        selected = series.len(),
        "Derived series"
    );

    if !quiet && matches!(format, OutputFormat::Text) {
        eprintln!(
            "{} of {} readings fall in {}.",
            series.len(),
            readings.len(),
            range.label()
        );
    }

    let content = match format {
        OutputFormat::Json => format_series_json(&series, stats.as_ref(), range, opts)?,
        OutputFormat::Text => format_series_text(&series, stats.as_ref(), range, opts),
        OutputFormat::Csv => format_series_csv(&series, opts),
    };

    write_output(output, &content)?;
    Ok(())
}
