//! Terminal dashboard and command-line client for weather station telemetry.
//!
//! The `weatherdash` binary fetches the full reading history from a station's
//! `GET /data` endpoint and either shows it in an interactive dashboard or
//! prints one slice of it.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `dashboard` | Interactive dashboard (default when no command is given) |
//! | `latest` | Most recent reading as tiles |
//! | `series` | One field over a time range |
//! | `config` | Manage CLI configuration |
//!
//! # Output Formats
//!
//! - **Text** (default): Human-readable colored output
//! - **JSON**: Machine-readable JSON format
//! - **CSV**: Comma-separated values for spreadsheets
//!
//! # Configuration
//!
//! Settings live in `<config dir>/weatherdash/config.toml`:
//!
//! - `url`: Station base URL
//! - `timeout`: Request timeout in seconds
//! - `range`: Default time range
//! - `fahrenheit`: Use Fahrenheit for temperature display
//! - `no_color`: Disable colored output
//! - `theme`: Dashboard theme (`dark` or `light`)
//!
//! # Environment Variables
//!
//! - `WEATHERDASH_URL`: Station base URL (overridden by `--url`)
//! - `WEATHERDASH_CONFIG`: Alternate config file
//! - `WEATHERDASH_STYLE`: Output style (`minimal`, `rich`, `plain`)
//! - `NO_COLOR`: Disable colored output when set
//!
//! # Examples
//!
//! ```bash
//! weatherdash config set url http://192.168.1.50:3000
//! weatherdash
//! weatherdash latest --format json
//! weatherdash series --field temperature --range last24Hours --format csv -o temp.csv
//! ```

pub use weatherdash_core;

#[cfg(feature = "tui")]
pub mod tui;
