//! Summary tiles for the most recent reading.

use serde::Serialize;
use time::UtcOffset;
use time::macros::format_description;

use weatherdash_types::{Field, Reading};

/// Display options for tile values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileOptions {
    /// Show temperature and heat index in °F.
    pub fahrenheit: bool,
    /// Offset used for the "last updated" time.
    pub offset: UtcOffset,
}

impl Default for TileOptions {
    fn default() -> Self {
        Self {
            fahrenheit: false,
            offset: UtcOffset::UTC,
        }
    }
}

/// One summary tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tile {
    /// Field this tile shows; selecting the tile charts this field.
    pub field: Field,
    /// Tile caption.
    pub title: &'static str,
    /// Formatted value.
    pub value: String,
    /// Whether this tile's field is currently charted.
    pub selected: bool,
}

/// Convert Celsius to Fahrenheit.
#[must_use]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

fn format_degrees(celsius: f64, fahrenheit: bool) -> String {
    if fahrenheit {
        format!("{:.3}°F", celsius_to_fahrenheit(celsius))
    } else {
        format!("{:.3}°C", celsius)
    }
}

/// Format one field of a reading for tile display.
///
/// Temperatures and humidity get three decimals and a unit; AQI, wifi and
/// rain are shown as sent.
#[must_use]
pub fn format_tile_value(field: Field, reading: &Reading, opts: &TileOptions) -> String {
    match field {
        Field::Temperature => format_degrees(reading.temperature, opts.fahrenheit),
        Field::Humidity => format!("{:.3} %", reading.humidity),
        Field::Aqi => reading.aqi.to_string(),
        Field::Time => reading
            .time
            .to_offset(opts.offset)
            .format(format_description!(
                "[year]-[month]-[day] [hour]:[minute]:[second]"
            ))
            .unwrap_or_else(|_| reading.time.to_string()),
        Field::WifiStrength => reading.wifi_strength.to_string(),
        Field::HeatIndex => format_degrees(reading.heat_index, opts.fahrenheit),
        Field::Raining => reading.raining.to_string(),
    }
}

/// Build the tile row for a reading, in [`Field::ALL`] order.
#[must_use]
pub fn build_tiles(reading: &Reading, selected: Option<Field>, opts: &TileOptions) -> Vec<Tile> {
    Field::ALL
        .into_iter()
        .map(|field| Tile {
            field,
            title: field.title(),
            value: format_tile_value(field, reading, opts),
            selected: selected == Some(field),
        })
        .collect()
}
