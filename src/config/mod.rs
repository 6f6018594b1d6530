use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{
    format::{Item, StrftimeItems},
    DateTime, Utc,
};
use serde::{Deserialize, Serialize};

use crate::errors::{ExpenseError, Result};

const HOME_ENV: &str = "EXPENSE_CORE_HOME";
const DEFAULT_DIR_NAME: &str = ".expense_core";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f UTC";

/// Presentation preferences applied when rendering expenses as text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "Config::default_timestamp_format")]
    pub timestamp_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: Self::default_currency_symbol(),
            timestamp_format: Self::default_timestamp_format(),
        }
    }
}

impl Config {
    pub fn default_currency_symbol() -> String {
        DEFAULT_CURRENCY_SYMBOL.into()
    }

    pub fn default_timestamp_format() -> String {
        DEFAULT_TIMESTAMP_FORMAT.into()
    }

    /// Rejects strftime patterns chrono cannot render.
    pub fn validate(&self) -> Result<()> {
        if is_valid_format(&self.timestamp_format) {
            Ok(())
        } else {
            Err(ExpenseError::Config(format!(
                "invalid timestamp format `{}`",
                self.timestamp_format
            )))
        }
    }

    /// Formats a timestamp with the configured pattern, falling back to the default
    /// pattern when the configured one is not renderable.
    pub fn format_timestamp(&self, timestamp: DateTime<Utc>) -> String {
        let pattern = if is_valid_format(&self.timestamp_format) {
            self.timestamp_format.as_str()
        } else {
            DEFAULT_TIMESTAMP_FORMAT
        };
        timestamp.format(pattern).to_string()
    }

    pub fn format_amount(&self, amount: f64) -> String {
        format!("{}{:.2}", self.currency_symbol, amount)
    }
}

fn is_valid_format(pattern: &str) -> bool {
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

/// Loads and saves [`Config`] as pretty JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolves `$EXPENSE_CORE_HOME/config.json`, defaulting to `~/.expense_core/config.json`.
    pub fn from_env() -> Self {
        Self::new(app_data_dir().join(CONFIG_FILE))
    }

    pub fn config_path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "config file missing; using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::info!(path = %self.path.display(), "config saved");
        Ok(())
    }
}

fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
