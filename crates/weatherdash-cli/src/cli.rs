//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use weatherdash_core::{Field, TimeRange};

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// Visual styling mode for output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StyleMode {
    /// Standard styling with colors
    Minimal,
    /// Rich styling with tables and full formatting (default)
    #[default]
    Rich,
    /// Plain text with no decorations (for scripting)
    Plain,
}

/// Dashboard color theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ThemeChoice {
    #[default]
    Dark,
    Light,
}

impl ThemeChoice {
    /// Parse a theme name from the config file.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }
}

/// Reusable output format arguments
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Use Fahrenheit for temperature display (overrides --celsius and config)
    #[arg(long, conflicts_with = "celsius")]
    pub fahrenheit: bool,

    /// Use Celsius for temperature display (default, overrides config)
    #[arg(long, conflicts_with = "fahrenheit")]
    pub celsius: bool,

    /// Omit header row in CSV output (useful for appending)
    #[arg(long)]
    pub no_header: bool,

    /// Output compact JSON (no pretty-printing)
    #[arg(long)]
    pub compact: bool,
}

impl OutputArgs {
    /// Resolve fahrenheit setting: explicit flags override config
    pub fn resolve_fahrenheit(&self, config_fahrenheit: bool) -> bool {
        resolve_unit_flags(self.fahrenheit, self.celsius, config_fahrenheit)
    }
}

fn resolve_unit_flags(fahrenheit: bool, celsius: bool, config_fahrenheit: bool) -> bool {
    if fahrenheit {
        true
    } else if celsius {
        false
    } else {
        config_fahrenheit
    }
}

#[derive(Parser)]
#[command(name = "weatherdash")]
#[command(author, version, about = "Terminal dashboard for weather station telemetry", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Station base URL (e.g. http://192.168.1.50:3000)
    #[arg(short, long, global = true, env = "WEATHERDASH_URL")]
    pub url: Option<String>,

    /// Request timeout in seconds (at least 1)
    #[arg(short = 'T', long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Visual styling mode (minimal, rich, plain)
    #[arg(
        long,
        global = true,
        value_enum,
        default_value = "rich",
        env = "WEATHERDASH_STYLE"
    )]
    pub style: StyleMode,

    /// Write output to file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Use this configuration file instead of the default location
    #[arg(long, global = true, env = "WEATHERDASH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand; the dashboard runs when none is given
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive dashboard (default)
    #[cfg(feature = "tui")]
    Dashboard(DashboardArgs),

    /// Show the most recent reading
    Latest {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show one field over a time range
    Series {
        /// Field to chart: time, temperature, humidity, aqi, wifiStrength, hi, raining
        #[arg(long)]
        field: Field,

        /// Time range: lastHour, last6Hours, last24Hours, lastWeek, lastMonth, lastYear, allTime
        #[arg(short, long)]
        range: Option<TimeRange>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Manage CLI configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments for the interactive dashboard
#[derive(Debug, Clone, Default, Args)]
pub struct DashboardArgs {
    /// Initial time range
    #[arg(short, long)]
    pub range: Option<TimeRange>,

    /// Use Fahrenheit for temperature tiles
    #[arg(long, conflicts_with = "celsius")]
    pub fahrenheit: bool,

    /// Use Celsius for temperature tiles (default, overrides config)
    #[arg(long, conflicts_with = "fahrenheit")]
    pub celsius: bool,

    /// Color theme
    #[arg(long, value_enum)]
    pub theme: Option<ThemeChoice>,

    /// Write logs to this file (logs are discarded otherwise)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl DashboardArgs {
    /// Resolve fahrenheit setting: explicit flags override config
    pub fn resolve_fahrenheit(&self, config_fahrenheit: bool) -> bool {
        resolve_unit_flags(self.fahrenheit, self.celsius, config_fahrenheit)
    }
}

/// Configuration keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigKey {
    /// Station base URL
    Url,
    /// Request timeout in seconds
    Timeout,
    /// Default time range
    Range,
    /// Use Fahrenheit for temperature
    Fahrenheit,
    /// Disable colored output
    NoColor,
    /// Dashboard theme (dark, light)
    Theme,
}

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get {
        /// Configuration key
        #[arg(value_enum)]
        key: ConfigKey,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        #[arg(value_enum)]
        key: ConfigKey,
        /// Configuration value
        value: String,
    },

    /// Unset (remove) a configuration value
    Unset {
        /// Configuration key to remove
        #[arg(value_enum)]
        key: ConfigKey,
    },

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Parse boolean argument with flexible input
pub fn parse_bool_arg(s: &str) -> Result<bool, String> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" | "enable" | "enabled" => Ok(true),
        "false" | "no" | "off" | "0" | "disable" | "disabled" => Ok(false),
        _ => Err(format!(
            "Invalid boolean value '{}'. Use: true/false, yes/no, on/off, 1/0",
            s
        )),
    }
}
