//! TOML configuration
//!
//! Settings are optional: a host that never loads them gets the defaults
//! (test mode off, logging left to the host). The config file layout is:
//!
//! ```toml
//! test_mode = false
//!
//! [logging]
//! level = "info"
//! format = "text"   # text | ext | json
//! file = "/var/log/hookbus.log"
//! color = false
//! ```

use crate::core::error_handling::ContextualError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable that switches test mode on regardless of the file
pub const TEST_MODE_ENV: &str = "HOOKBUS_TEST_MODE";

/// Errors raised while loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Configuration file does not exist: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read configuration file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration in {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Failed to initialise logging: {message}")]
    Logging { message: String },
}

pub type SettingsResult<T> = Result<T, SettingsError>;

impl ContextualError for SettingsError {
    fn is_user_actionable(&self) -> bool {
        matches!(
            self,
            SettingsError::NotFound { .. } | SettingsError::Parse { .. }
        )
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            SettingsError::NotFound { .. } => Some("The configuration file does not exist"),
            SettingsError::Parse { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Logging section of the config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    pub level: Option<String>,
    pub format: Option<String>,
    pub file: Option<String>,
    pub color: bool,
}

/// Top-level settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Enables `post_test_event` on the process-wide dispatcher
    pub test_mode: bool,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Parse settings from TOML text; `origin` is only used in error messages
    pub fn from_toml_str(contents: &str, origin: &Path) -> SettingsResult<Self> {
        toml::from_str::<Settings>(contents).map_err(|e| SettingsError::Parse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load settings from `config_file`, or from the default location.
    ///
    /// An explicitly given file must exist. The default file is optional and
    /// its absence yields `Settings::default()`.
    pub fn load(config_file: Option<&Path>) -> SettingsResult<Self> {
        let path = match config_file {
            Some(path) if !path.exists() => {
                return Err(SettingsError::NotFound {
                    path: path.to_path_buf(),
                })
            }
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => {
                    log::debug!("No configuration file found, using defaults");
                    return Ok(Settings::default());
                }
            },
        };

        log::debug!("Loading configuration from {}", path.display());
        let contents = std::fs::read_to_string(&path).map_err(|source| SettingsError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_toml_str(&contents, &path)
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) {
        if let Some(enabled) = std::env::var(TEST_MODE_ENV)
            .ok()
            .and_then(|value| parse_flag(&value))
        {
            log::trace!("{} overrides test_mode to {}", TEST_MODE_ENV, enabled);
            self.test_mode = enabled;
        }
    }

    /// Defaults with environment overrides applied
    pub fn from_env() -> Self {
        let mut settings = Settings::default();
        settings.apply_env_overrides();
        settings
    }

    /// Start flexi_logger with the `[logging]` section
    pub fn init_logging(&self) -> SettingsResult<()> {
        crate::core::logging::init_logging(
            self.logging.level.as_deref(),
            self.logging.format.as_deref(),
            self.logging.file.as_deref(),
            self.logging.color,
        )
        .map_err(|e| SettingsError::Logging {
            message: e.to_string(),
        })
    }
}

/// `<config_dir>/Hookbus/hookbus.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("Hookbus").join("hookbus.toml"))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
