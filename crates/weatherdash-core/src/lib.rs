//! Loader and range selection for weather station telemetry.
//!
//! This crate fetches a station's reading history over HTTP and derives the
//! views a dashboard renders from it.
//!
//! # Features
//!
//! - **Data loading**: one `GET {base}/data` per request, bounded by a timeout
//! - **Range filtering**: recency buckets from the last hour to all time
//! - **Field projection**: any reading attribute as a chartable series
//! - **Dashboard state**: an immutable state record driven by a single
//!   [`update`](dashboard::update) function
//! - **Tiles and chart hints**: formatted summary values and line styling
//!
//! # Quick Start
//!
//! ```no_run
//! use weatherdash_core::{DashboardState, Msg, TelemetryClient, TileOptions, ViewContext, update};
//! use weatherdash_types::Field;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TelemetryClient::new("http://192.168.1.50:3000")?;
//!     let readings = client.fetch_readings().await?;
//!
//!     let state = update(DashboardState::default(), Msg::Loaded(readings));
//!     let state = update(state, Msg::SelectField(Field::Temperature));
//!
//!     let view = state.view(&ViewContext::now_utc(), &TileOptions::default());
//!     for tile in &view.tiles {
//!         println!("{}: {}", tile.title, tile.value);
//!     }
//!     println!("{} points in the last hour", view.series.len());
//!     Ok(())
//! }
//! ```

pub mod chart;
pub mod client;
pub mod dashboard;
pub mod error;
pub mod messages;
pub mod select;
pub mod tiles;

pub use chart::{ChartStyle, Rgb, SeriesStats};
pub use client::{DEFAULT_TIMEOUT, TelemetryClient};
pub use dashboard::{DashboardState, DashboardView, LoadState, Msg, update};
pub use error::{Error, Result};
pub use messages::{Command, LoaderEvent};
pub use select::{
    Selection, Series, SeriesPoint, ViewContext, derive_series, filter_by_range,
    filter_by_range_name, latest, project,
};
pub use tiles::{Tile, TileOptions, build_tiles, format_tile_value};

// Re-export the data model so front-ends need only one dependency.
pub use weatherdash_types::{
    Field, FieldValue, ParseError, RainState, Reading, TimeRange, WifiStrength,
};
