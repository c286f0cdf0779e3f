//! Runtime configuration for adapters embedding the catalog core.
//!
//! # Responsibility
//! - Collect logging and service settings from the environment.
//! - Fall back to defaults instead of failing on bad values.
//!
//! # Invariants
//! - `popular_default_limit` is always at least 1.
//! - Every rejected value is reported in `ConfigLoad::warnings`.

use crate::logging::default_log_level;
use crate::service::film_service::POPULAR_DEFAULT_LIMIT;
use std::path::PathBuf;

pub const ENV_LOG_LEVEL: &str = "FILMORATE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "FILMORATE_LOG_DIR";
pub const ENV_POPULAR_DEFAULT: &str = "FILMORATE_POPULAR_DEFAULT";

/// Settings shared by adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// One of trace|debug|info|warn|error.
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` means stderr.
    pub log_dir: Option<PathBuf>,
    pub popular_default_limit: usize,
}

/// Loaded configuration plus human-readable notes on ignored values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLoad {
    pub config: CoreConfig,
    pub warnings: Vec<String>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            popular_default_limit: POPULAR_DEFAULT_LIMIT,
        }
    }
}

impl CoreConfig {
    /// Reads settings from process environment variables.
    pub fn from_env() -> ConfigLoad {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through an arbitrary key lookup.
    pub fn from_lookup<L>(lookup: L) -> ConfigLoad
    where
        L: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let mut warnings = Vec::new();

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            let trimmed = level.trim();
            if !trimmed.is_empty() {
                config.log_level = trimmed.to_ascii_lowercase();
            }
        }

        if let Some(dir) = lookup(ENV_LOG_DIR) {
            let trimmed = dir.trim();
            if !trimmed.is_empty() {
                config.log_dir = Some(PathBuf::from(trimmed));
            }
        }

        if let Some(raw) = lookup(ENV_POPULAR_DEFAULT) {
            match raw.trim().parse::<usize>() {
                Ok(limit) if limit > 0 => config.popular_default_limit = limit,
                _ => warnings.push(format!(
                    "{ENV_POPULAR_DEFAULT}=`{raw}` is not a positive integer; using {POPULAR_DEFAULT_LIMIT}"
                )),
            }
        }

        ConfigLoad { config, warnings }
    }
}
