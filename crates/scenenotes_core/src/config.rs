//! Panel configuration.
//!
//! # Responsibility
//! - Collect the few knobs the notes panel exposes (author, logging, retries).
//! - Resolve them from the process environment for host integrations.
//!
//! # Invariants
//! - Resolution never fails; missing or blank values fall back to defaults.

use crate::logging::{default_log_level, init_logging};
use crate::store::DEFAULT_PERSIST_RETRIES;

pub const AUTHOR_ENV: &str = "SCENENOTES_AUTHOR";
pub const LOG_LEVEL_ENV: &str = "SCENENOTES_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "SCENENOTES_LOG_DIR";

/// Runtime settings for one notes panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelConfig {
    /// Author stamped on notes created from the panel.
    pub default_author: String,
    /// Level passed to [`crate::init_logging`].
    pub log_level: String,
    /// Directory for rotating log files; logging stays off when unset.
    pub log_dir: Option<String>,
    /// Extra attempts after a rejected save.
    pub persist_retries: u8,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            default_author: String::new(),
            log_level: default_log_level().to_string(),
            log_dir: None,
            persist_retries: DEFAULT_PERSIST_RETRIES,
        }
    }
}

impl PanelConfig {
    /// Reads settings from the process environment.
    ///
    /// Author comes from `SCENENOTES_AUTHOR`, then `USER`, then `USERNAME`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`PanelConfig::from_env`] with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        Self {
            default_author: [AUTHOR_ENV, "USER", "USERNAME"]
                .into_iter()
                .find_map(|key| non_blank(key))
                .unwrap_or(defaults.default_author),
            log_level: non_blank(LOG_LEVEL_ENV).unwrap_or(defaults.log_level),
            log_dir: non_blank(LOG_DIR_ENV),
            persist_retries: defaults.persist_retries,
        }
    }

    /// Starts the file logger when a log directory is configured.
    ///
    /// Returns `Ok(false)` without touching logging state if `log_dir` is unset.
    pub fn start_logging(&self) -> Result<bool, String> {
        let Some(log_dir) = self.log_dir.as_deref() else {
            return Ok(false);
        };
        init_logging(&self.log_level, log_dir)?;
        Ok(true)
    }
}
