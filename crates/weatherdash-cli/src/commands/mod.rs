//! Command implementations for the CLI.

mod config;
mod latest;
mod series;

pub use config::cmd_config;
pub use latest::cmd_latest;
pub use series::{SeriesArgs, cmd_series};
