//! Visual styling utilities for the CLI.
//!
//! - Spinner shown while the station is being fetched
//! - Color thresholds for AQI, humidity and temperature
//! - Table formatting

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use weatherdash_core::RainState;

use crate::cli::StyleMode;

// ============================================================================
// Progress Indicators
// ============================================================================

/// Standard spinner tick characters (Braille dots animation)
const SPINNER_TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Standard spinner tick interval
const SPINNER_TICK_MS: u64 = 80;

/// Get the standard spinner style.
fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars(SPINNER_TICK_CHARS)
}

/// Create a spinner for fetching readings.
pub fn fetching_spinner(url: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(spinner_style());
    pb.set_message(format!("Fetching {}...", url));
    pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
    pb
}

// ============================================================================
// Color Thresholds
// ============================================================================

/// AQI thresholds based on the US EPA index bands.
pub mod aqi {
    pub const GOOD: f64 = 50.0; // Green: <= 50
    pub const MODERATE: f64 = 100.0; // Yellow: 51-100
    pub const SENSITIVE: f64 = 150.0; // Orange: 101-150
    // Red: > 150
}

/// Humidity thresholds (percentage) for comfort.
pub mod humidity {
    pub const LOW: f64 = 30.0; // Yellow: < 30% (too dry)
    pub const HIGH: f64 = 70.0; // Yellow: > 70% (too humid)
    // Green: 30-70%
}

/// Temperature thresholds (Celsius) for comfort.
pub mod temperature {
    pub const COLD: f64 = 10.0; // Blue: < 10°C
    pub const HOT: f64 = 30.0; // Orange: > 30°C
}

// ============================================================================
// Colored Value Formatting
// ============================================================================

/// Color an already formatted AQI value.
pub fn format_aqi_colored(value: f64, text: &str, no_color: bool) -> String {
    if no_color {
        return text.to_string();
    }

    if value <= aqi::GOOD {
        format!("{}", text.green())
    } else if value <= aqi::MODERATE {
        format!("{}", text.yellow())
    } else if value <= aqi::SENSITIVE {
        // Orange color (RGB: 255, 165, 0)
        format!("{}", text.truecolor(255, 165, 0))
    } else {
        format!("{}", text.red())
    }
}

/// Color an already formatted humidity value.
pub fn format_humidity_colored(percent: f64, text: &str, no_color: bool) -> String {
    if no_color {
        return text.to_string();
    }

    if (humidity::LOW..=humidity::HIGH).contains(&percent) {
        format!("{}", text.green())
    } else {
        format!("{}", text.yellow())
    }
}

/// Color an already formatted temperature, thresholds in °C.
pub fn format_temp_colored(celsius: f64, text: &str, no_color: bool) -> String {
    if no_color {
        return text.to_string();
    }

    if celsius < temperature::COLD {
        format!("{}", text.cyan())
    } else if celsius > temperature::HOT {
        format!("{}", text.truecolor(255, 165, 0))
    } else {
        format!("{}", text.green())
    }
}

/// Rain state, highlighted when it is raining.
pub fn format_rain_colored(raining: &RainState, no_color: bool) -> String {
    if no_color {
        return raining.to_string();
    }

    match raining {
        RainState::Yes => format!("{}", raining.as_str().truecolor(255, 206, 86).bold()),
        RainState::No => format!("{}", raining.as_str().dimmed()),
        RainState::Other(value) => value.clone(),
    }
}

/// Format a title header.
pub fn format_title(title: &str, no_color: bool) -> String {
    let rule = "━".repeat(title.chars().count());
    if no_color {
        format!("{}\n{}", title, rule)
    } else {
        format!("{}\n{}", title.bold(), rule.dimmed())
    }
}

/// Apply table style based on StyleMode
pub fn apply_table_style(table: &mut tabled::Table, style: StyleMode) {
    use tabled::settings::Style;
    match style {
        StyleMode::Rich => {
            table.with(Style::rounded());
        }
        StyleMode::Minimal => {
            table.with(Style::sharp());
        }
        StyleMode::Plain => {
            table.with(Style::blank());
        }
    }
}
