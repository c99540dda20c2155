mod cli;
mod commands;
mod config;
mod format;
mod style;
mod util;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use time::UtcOffset;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, OutputArgs};
use commands::{SeriesArgs, cmd_config, cmd_latest, cmd_series};
use config::{Config, require_url, resolve_range, resolve_timeout};
use format::FormatOptions;

#[cfg(feature = "tui")]
use cli::{DashboardArgs, ThemeChoice};

#[tokio::main]
async fn main() -> Result<()> {
    let Cli {
        verbose,
        quiet,
        url,
        timeout,
        no_color,
        style,
        output,
        config: config_path,
        command,
    } = Cli::parse();

    let filter = if quiet {
        EnvFilter::new("warn")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    // The dashboard owns the terminal, so its logs go to a file or nowhere.
    match dashboard_log_target(command.as_ref()) {
        Some(Some(path)) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        Some(None) => {}
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    let config_path = config_path.unwrap_or_else(Config::path);
    let config = Config::load_from(&config_path);
    tracing::debug!("Using config at {}", config_path.display());

    let timeout = resolve_timeout(timeout, &config);
    let no_color = no_color || config.no_color;
    let offset = util::local_offset();

    match command {
        Some(Commands::Config { action }) => cmd_config(action, &config_path),
        #[cfg(feature = "tui")]
        None => {
            let url = require_url(url, &config)?;
            run_dashboard(&url, timeout, DashboardArgs::default(), &config, offset).await
        }
        #[cfg(not(feature = "tui"))]
        None => anyhow::bail!(
            "This build has no interactive dashboard. Try 'weatherdash latest' or 'weatherdash series'."
        ),
        #[cfg(feature = "tui")]
        Some(Commands::Dashboard(args)) => {
            let url = require_url(url, &config)?;
            run_dashboard(&url, timeout, args, &config, offset).await
        }
        Some(Commands::Latest { output: out }) => {
            let url = require_url(url, &config)?;
            let client = util::build_client(&url, timeout)?;
            let opts = format_options(&out, &config, no_color, style, offset);
            cmd_latest(&client, out.format, output.as_ref(), quiet, &opts).await
        }
        Some(Commands::Series {
            field,
            range,
            output: out,
        }) => {
            let url = require_url(url, &config)?;
            let client = util::build_client(&url, timeout)?;
            let opts = format_options(&out, &config, no_color, style, offset);
            cmd_series(
                &client,
                SeriesArgs {
                    field,
                    range: resolve_range(range, &config),
                    format: out.format,
                    output: output.as_ref(),
                    quiet,
                    opts: &opts,
                },
            )
            .await
        }
    }
}

/// Where logs go when the dashboard runs: `Some(Some(path))` for a file,
/// `Some(None)` to discard them, `None` when no dashboard runs.
fn dashboard_log_target(command: Option<&Commands>) -> Option<Option<PathBuf>> {
    match command {
        #[cfg(feature = "tui")]
        None => Some(None),
        #[cfg(feature = "tui")]
        Some(Commands::Dashboard(args)) => Some(args.log_file.clone()),
        _ => None,
    }
}

fn format_options(
    out: &OutputArgs,
    config: &Config,
    no_color: bool,
    style: cli::StyleMode,
    offset: UtcOffset,
) -> FormatOptions {
    FormatOptions::new(no_color, out.resolve_fahrenheit(config.fahrenheit), style)
        .with_no_header(out.no_header)
        .with_compact(out.compact)
        .with_offset(offset)
}

#[cfg(feature = "tui")]
async fn run_dashboard(
    url: &str,
    timeout: std::time::Duration,
    args: DashboardArgs,
    config: &Config,
    offset: UtcOffset,
) -> Result<()> {
    use weatherdash_cli::tui::{self, Theme, TuiOptions};

    let client = util::build_client(url, timeout)?;
    let theme = args
        .theme
        .or_else(|| config.theme.as_deref().and_then(ThemeChoice::from_name))
        .unwrap_or_default();

    let options = TuiOptions {
        range: resolve_range(args.range, config),
        fahrenheit: args.resolve_fahrenheit(config.fahrenheit),
        theme: match theme {
            ThemeChoice::Dark => Theme::Dark,
            ThemeChoice::Light => Theme::Light,
        },
        offset,
    };

    tui::run(client, options).await
}
