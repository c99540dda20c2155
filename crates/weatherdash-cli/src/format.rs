//! Output formatting utilities for text, JSON, and CSV output.

use anyhow::Result;
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};
use weatherdash_core::tiles::celsius_to_fahrenheit;
use weatherdash_core::{
    Field, RainState, Reading, Series, SeriesPoint, SeriesStats, Tile, TileOptions, TimeRange,
    WifiStrength, build_tiles,
};

use crate::cli::StyleMode;
use crate::style;

/// Rows shown in text tables before the rest is elided.
const MAX_TEXT_ROWS: usize = 50;

/// Formatting options for output.
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    /// Disable colored output.
    pub no_color: bool,
    /// Use Fahrenheit for temperatures.
    pub fahrenheit: bool,
    /// Omit header row in CSV output.
    pub no_header: bool,
    /// Use compact JSON output (no pretty-printing).
    pub compact: bool,
    /// Visual styling mode.
    pub style: StyleMode,
    /// Offset for human-readable times.
    pub offset: UtcOffset,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            no_color: false,
            fahrenheit: false,
            no_header: false,
            compact: false,
            style: StyleMode::Rich,
            offset: UtcOffset::UTC,
        }
    }
}

impl FormatOptions {
    pub fn new(no_color: bool, fahrenheit: bool, style: StyleMode) -> Self {
        // Plain mode automatically disables colors for pipe-friendliness
        Self {
            no_color: no_color || style == StyleMode::Plain,
            fahrenheit,
            style,
            ..Self::default()
        }
    }

    /// Create with no_header option for CSV output.
    pub fn with_no_header(mut self, no_header: bool) -> Self {
        self.no_header = no_header;
        self
    }

    /// Create with compact JSON option.
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Create with the offset used for local times.
    pub fn with_offset(mut self, offset: UtcOffset) -> Self {
        self.offset = offset;
        self
    }

    /// Serialize value to JSON string, respecting compact option.
    pub fn as_json<T: Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        Ok(json + "\n")
    }

    /// Tile formatting options matching these output options.
    pub fn tile_options(&self) -> TileOptions {
        TileOptions {
            fahrenheit: self.fahrenheit,
            offset: self.offset,
        }
    }

    /// Convert temperature value (for CSV/JSON output).
    #[must_use]
    pub fn convert_temp(&self, celsius: f64) -> f64 {
        if self.fahrenheit {
            celsius_to_fahrenheit(celsius)
        } else {
            celsius
        }
    }

    fn temp_unit(&self) -> &'static str {
        if self.fahrenheit { "F" } else { "C" }
    }
}

/// Escape a string for CSV output.
/// Wraps the value in quotes if it contains commas, quotes, or newlines.
/// Double quotes are escaped by doubling them.
#[must_use]
pub fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn rfc3339(time: OffsetDateTime) -> String {
    time.format(&Rfc3339).unwrap_or_default()
}

// ============================================================================
// Latest reading formatting
// ============================================================================

/// Color a tile value by the underlying reading.
fn colored_tile_value(tile: &Tile, reading: &Reading, opts: &FormatOptions) -> String {
    let no_color = opts.no_color;
    match tile.field {
        Field::Temperature => style::format_temp_colored(reading.temperature, &tile.value, no_color),
        Field::HeatIndex => style::format_temp_colored(reading.heat_index, &tile.value, no_color),
        Field::Humidity => style::format_humidity_colored(reading.humidity, &tile.value, no_color),
        Field::Aqi => style::format_aqi_colored(reading.aqi, &tile.value, no_color),
        Field::Raining => style::format_rain_colored(&reading.raining, no_color),
        Field::Time | Field::WifiStrength => tile.value.clone(),
    }
}

#[must_use]
pub fn format_latest_text(reading: &Reading, opts: &FormatOptions) -> String {
    use tabled::builder::Builder;

    let tiles = build_tiles(reading, None, &opts.tile_options());

    let mut output = style::format_title("Latest Reading", opts.no_color);
    output.push_str("\n\n");

    let mut builder = Builder::default();
    for tile in &tiles {
        builder.push_record([
            tile.title.to_string(),
            colored_tile_value(tile, reading, opts),
        ]);
    }

    let mut table = builder.build();
    style::apply_table_style(&mut table, opts.style);
    output.push_str(&table.to_string());
    output.push('\n');
    output
}

#[must_use]
pub fn format_latest_csv(reading: &Reading, opts: &FormatOptions) -> String {
    let unit = opts.temp_unit().to_lowercase();
    let mut output = if opts.no_header {
        String::new()
    } else {
        format!(
            "time,temperature_{unit},humidity,aqi,wifi_strength,heat_index_{unit},raining\n"
        )
    };
    output.push_str(&format!(
        "{},{:.3},{:.3},{},{},{:.3},{}\n",
        rfc3339(reading.time),
        opts.convert_temp(reading.temperature),
        reading.humidity,
        reading.aqi,
        csv_escape(&reading.wifi_strength.to_string()),
        opts.convert_temp(reading.heat_index),
        csv_escape(reading.raining.as_str()),
    ));
    output
}

/// Format the latest reading as JSON with temperature unit conversion applied.
pub fn format_latest_json(reading: &Reading, opts: &FormatOptions) -> Result<String> {
    #[derive(Serialize)]
    struct LatestJson<'a> {
        time: String,
        temperature: f64,
        temperature_unit: &'static str,
        humidity: f64,
        aqi: f64,
        wifi_strength: &'a WifiStrength,
        heat_index: f64,
        raining: &'a RainState,
        tiles: Vec<Tile>,
    }

    opts.as_json(&LatestJson {
        time: rfc3339(reading.time),
        temperature: opts.convert_temp(reading.temperature),
        temperature_unit: opts.temp_unit(),
        humidity: reading.humidity,
        aqi: reading.aqi,
        wifi_strength: &reading.wifi_strength,
        heat_index: opts.convert_temp(reading.heat_index),
        raining: &reading.raining,
        tiles: build_tiles(reading, None, &opts.tile_options()),
    })
}

// ============================================================================
// Series formatting
// ============================================================================

fn series_title(series: &Series, range: TimeRange) -> String {
    let name = series.field.map(Field::title).unwrap_or("Series");
    format!("{} - {} ({} points)", name, range.label(), series.len())
}

#[must_use]
pub fn format_series_text(
    series: &Series,
    stats: Option<&SeriesStats>,
    range: TimeRange,
    opts: &FormatOptions,
) -> String {
    use tabled::builder::Builder;

    if series.is_empty() {
        return format!("No readings in range: {}.\n", range.label());
    }

    let mut output = style::format_title(&series_title(series, range), opts.no_color);
    output.push_str("\n\n");

    // Most recent rows are the interesting ones.
    let skipped = series.len().saturating_sub(MAX_TEXT_ROWS);

    let mut builder = Builder::default();
    builder.push_record(["Time", series.label.as_str()]);
    for point in &series.points[skipped..] {
        builder.push_record([point.label.clone(), point.value.to_string()]);
    }

    let mut table = builder.build();
    style::apply_table_style(&mut table, opts.style);
    output.push_str(&table.to_string());
    output.push('\n');

    if skipped > 0 {
        output.push_str(&format!("... and {} earlier points\n", skipped));
        output.push_str("(Use --format csv or --format json for full data)\n");
    }

    if let Some(stats) = stats {
        output.push_str(&format!(
            "\nmin {:.3}  max {:.3}  mean {:.3}  ({} numeric)\n",
            stats.min, stats.max, stats.mean, stats.count
        ));
    }

    output
}

#[must_use]
pub fn format_series_csv(series: &Series, opts: &FormatOptions) -> String {
    let column = series.field.map(Field::name).unwrap_or("value");
    let mut output = if opts.no_header {
        String::new()
    } else {
        format!("time,label,{}\n", column)
    };
    for point in &series.points {
        output.push_str(&format!(
            "{},{},{}\n",
            rfc3339(point.time),
            csv_escape(&point.label),
            csv_escape(&point.value.to_string())
        ));
    }
    output
}

pub fn format_series_json(
    series: &Series,
    stats: Option<&SeriesStats>,
    range: TimeRange,
    opts: &FormatOptions,
) -> Result<String> {
    #[derive(Serialize)]
    struct SeriesJson<'a> {
        field: Option<Field>,
        range: TimeRange,
        label: &'a str,
        count: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        stats: Option<&'a SeriesStats>,
        points: &'a [SeriesPoint],
    }

    opts.as_json(&SeriesJson {
        field: series.field,
        range,
        label: &series.label,
        count: series.len(),
        stats,
        points: &series.points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{datetime, offset};
    use weatherdash_core::{FieldValue, project};

    fn reading() -> Reading {
        Reading {
            time: datetime!(2024-05-01 10:00:00 UTC),
            temperature: 20.0,
            humidity: 45.5,
            aqi: 12.0,
            wifi_strength: WifiStrength::Text("Good, stable".to_string()),
            heat_index: 21.0,
            raining: RainState::No,
        }
    }

    fn plain() -> FormatOptions {
        FormatOptions::new(true, false, StyleMode::Plain)
    }

    // ========================================================================
    // csv_escape tests
    // ========================================================================

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    // ========================================================================
    // Latest formatting tests
    // ========================================================================

    #[test]
    fn test_latest_text_lists_every_tile() {
        let text = format_latest_text(&reading(), &plain());

        assert!(text.starts_with("Latest Reading"));
        for title in [
            "Temperature",
            "Humidity",
            "AQI",
            "Time (Last Updated)",
            "Wifi Strength",
            "Heat Index (Feels Like)",
            "Raining",
        ] {
            assert!(text.contains(title), "missing {title}");
        }
        assert!(text.contains("20.000°C"));
        assert!(text.contains("45.500 %"));
    }

    #[test]
    fn test_latest_csv() {
        let csv = format_latest_csv(&reading(), &plain());
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "time,temperature_c,humidity,aqi,wifi_strength,heat_index_c,raining"
        );
        assert_eq!(
            lines[1],
            "2024-05-01T10:00:00Z,20.000,45.500,12,\"Good, stable\",21.000,No"
        );
    }

    #[test]
    fn test_latest_csv_fahrenheit_no_header() {
        let opts = FormatOptions::new(true, true, StyleMode::Plain).with_no_header(true);
        let csv = format_latest_csv(&reading(), &opts);

        assert_eq!(csv.lines().count(), 1);
        assert!(csv.contains(",68.000,"));
    }

    #[test]
    fn test_latest_json_shape() {
        let json = format_latest_json(&reading(), &plain().with_compact(true)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["time"], "2024-05-01T10:00:00Z");
        assert_eq!(value["temperature_unit"], "C");
        assert_eq!(value["raining"], "No");
        assert_eq!(value["tiles"].as_array().unwrap().len(), 7);
        assert_eq!(value["tiles"][0]["title"], "Temperature");
    }

    // ========================================================================
    // Series formatting tests
    // ========================================================================

    fn series() -> Series {
        let first = reading();
        let mut second = reading();
        second.time = datetime!(2024-05-01 10:05:00 UTC);
        second.temperature = 21.5;
        let readings = [&first, &second];
        project(&readings, Field::Temperature, offset!(+1))
    }

    #[test]
    fn test_series_csv() {
        let csv = format_series_csv(&series(), &plain());
        assert_eq!(
            csv,
            "time,label,temperature\n\
             2024-05-01T10:00:00Z,11:00:00,20\n\
             2024-05-01T10:05:00Z,11:05:00,21.5\n"
        );
    }

    #[test]
    fn test_series_text_with_stats() {
        let series = series();
        let stats = SeriesStats::from_series(&series);
        let text = format_series_text(&series, stats.as_ref(), TimeRange::LastHour, &plain());

        assert!(text.starts_with("Temperature - Last Hour (2 points)"));
        assert!(text.contains("11:05:00"));
        assert!(text.contains("min 20.000  max 21.500"));
    }

    #[test]
    fn test_series_text_empty() {
        let text = format_series_text(&Series::empty(), None, TimeRange::LastWeek, &plain());
        assert_eq!(text, "No readings in range: Last Week.\n");
    }

    #[test]
    fn test_series_json_shape() {
        let series = series();
        let json = format_series_json(&series, None, TimeRange::AllTime, &plain()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["field"], "temperature");
        assert_eq!(value["range"], "allTime");
        assert_eq!(value["count"], 2);
        assert!(value.get("stats").is_none());
        assert_eq!(value["points"][1]["value"], 21.5);
        assert_eq!(value["points"][1]["time"], "2024-05-01T10:05:00Z");
    }

    #[test]
    fn test_series_csv_text_values() {
        let mut series = series();
        series.points[0].value = FieldValue::Text("n/a".to_string());
        let csv = format_series_csv(&series, &plain().with_no_header(true));
        assert!(csv.starts_with("2024-05-01T10:00:00Z,11:00:00,n/a\n"));
    }
}
