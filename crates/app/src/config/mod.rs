use std::path::PathBuf;

use chrono::NaiveDate;
use chrono_tz::Tz;
use clap::Args;
use serde::Deserialize;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/expensa.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub session_path: PathBuf,
    pub timezone: String,
    pub page_size: usize,
    pub months_back: usize,
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            session_path: client::default_state_path(),
            timezone: "UTC".to_string(),
            page_size: engine::views::DEFAULT_PAGE_SIZE,
            months_back: engine::views::DEFAULT_MONTHS_BACK,
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|err| AppError::Timezone(format!("{}: {err}", self.timezone)))
    }

    /// Current calendar date in the configured timezone.
    pub fn today(&self) -> Result<NaiveDate> {
        Ok(chrono::Utc::now().with_timezone(&self.tz()?).date_naive())
    }
}

/// Global flags shared by every subcommand.
#[derive(Debug, Default, Args)]
pub struct ConfigArgs {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:3000/api).
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    /// Override the session file location.
    #[arg(long, global = true)]
    pub session_path: Option<PathBuf>,
    /// Override timezone (IANA name).
    #[arg(long, global = true)]
    pub timezone: Option<String>,
    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub level: Option<String>,
}

/// File, then `EXPENSA_*` environment, then command-line flags.
pub fn load(args: &ConfigArgs) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let settings: AppConfig = config::Config::builder()
        .add_source(config::File::with_name(config_path).required(args.config.is_some()))
        .add_source(config::Environment::with_prefix("EXPENSA").try_parsing(true))
        .build()?
        .try_deserialize()?;

    Ok(apply_overrides(settings, args))
}

fn apply_overrides(mut settings: AppConfig, args: &ConfigArgs) -> AppConfig {
    if let Some(base_url) = &args.base_url {
        settings.base_url = base_url.clone();
    }
    if let Some(session_path) = &args.session_path {
        settings.session_path = session_path.clone();
    }
    if let Some(timezone) = &args.timezone {
        settings.timezone = timezone.clone();
    }
    if let Some(level) = &args.level {
        settings.level = level.clone();
    }
    settings
}
