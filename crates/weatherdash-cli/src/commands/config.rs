//! Config command implementation.

use std::path::Path;

use anyhow::{Context, Result, bail};
use weatherdash_core::{TelemetryClient, TimeRange};

use crate::cli::{ConfigAction, ConfigKey, ThemeChoice, parse_bool_arg};
use crate::config::Config;

pub fn cmd_config(action: ConfigAction, path: &Path) -> Result<()> {
    match action {
        ConfigAction::Path => {
            println!("{}", path.display());
        }
        ConfigAction::Show => {
            let config = Config::load_from(path);
            let content = toml::to_string_pretty(&config).context("Failed to serialize config")?;
            println!("# {}", path.display());
            print!("{}", content);
        }
        ConfigAction::Get { key } => {
            let config = Config::load_from(path);
            println!("{}", get_value(&config, key).unwrap_or_else(|| "(not set)".to_string()));
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_from(path);
            set_value(&mut config, key, &value)?;
            config.save_to(path)?;
            eprintln!("Saved {:?} to {}", key, path.display());
        }
        ConfigAction::Unset { key } => {
            let mut config = Config::load_from(path);
            unset_value(&mut config, key);
            config.save_to(path)?;
            eprintln!("Removed {:?} from {}", key, path.display());
        }
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                bail!(
                    "Config already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            let config = Config {
                timeout: Some(10),
                range: Some(TimeRange::default()),
                theme: Some("dark".to_string()),
                ..Config::default()
            };
            config.save_to(path)?;
            eprintln!("Created {}", path.display());
        }
    }
    Ok(())
}

fn get_value(config: &Config, key: ConfigKey) -> Option<String> {
    match key {
        ConfigKey::Url => config.url.clone(),
        ConfigKey::Timeout => config.timeout.map(|t| t.to_string()),
        ConfigKey::Range => config.range.map(|r| r.name().to_string()),
        ConfigKey::Fahrenheit => Some(config.fahrenheit.to_string()),
        ConfigKey::NoColor => Some(config.no_color.to_string()),
        ConfigKey::Theme => config.theme.clone(),
    }
}

fn set_value(config: &mut Config, key: ConfigKey, value: &str) -> Result<()> {
    match key {
        ConfigKey::Url => {
            let client = TelemetryClient::new(value)?;
            config.url = Some(client.base_url().to_string());
        }
        ConfigKey::Timeout => {
            let secs: u64 = value
                .parse()
                .with_context(|| format!("'{}' is not a valid number of seconds", value))?;
            if secs == 0 {
                bail!("Timeout must be at least 1 second");
            }
            config.timeout = Some(secs);
        }
        ConfigKey::Range => {
            config.range = Some(value.parse::<TimeRange>()?);
        }
        ConfigKey::Fahrenheit => {
            config.fahrenheit = parse_bool_arg(value).map_err(anyhow::Error::msg)?;
        }
        ConfigKey::NoColor => {
            config.no_color = parse_bool_arg(value).map_err(anyhow::Error::msg)?;
        }
        ConfigKey::Theme => {
            if ThemeChoice::from_name(value).is_none() {
                bail!("Invalid theme '{}'. Use: dark, light", value);
            }
            config.theme = Some(value.trim().to_lowercase());
        }
    }
    Ok(())
}

fn unset_value(config: &mut Config, key: ConfigKey) {
    match key {
        ConfigKey::Url => config.url = None,
        ConfigKey::Timeout => config.timeout = None,
        ConfigKey::Range => config.range = None,
        ConfigKey::Fahrenheit => config.fahrenheit = false,
        ConfigKey::NoColor => config.no_color = false,
        ConfigKey::Theme => config.theme = None,
    }
}
