//! Environment-driven runtime configuration.
//!
//! # Invariants
//! - Blank variables are treated as unset.
//! - Logging stays disabled unless `SILENTH_LOG_DIR` is set.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "SILENTH_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "SILENTH_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "SILENTH_LOG_DIR";

/// Settings shared by binaries embedding the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// SQLite database file. `None` means the caller must supply one.
    pub db_path: Option<PathBuf>,
    pub log_level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: Option<String>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Reads settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        Self {
            db_path: read(ENV_DB_PATH).map(PathBuf::from),
            log_level: read(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: read(ENV_LOG_DIR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, ENV_DB_PATH, ENV_LOG_DIR, ENV_LOG_LEVEL};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn missing_variables_fall_back_to_defaults() {
        let config = CoreConfig::from_lookup(|_| None);
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.log_level, default_log_level());
    }

    #[test]
    fn variables_are_trimmed_and_blank_ones_ignored() {
        let vars = HashMap::from([
            (ENV_DB_PATH, " /var/lib/silenth/entries.db "),
            (ENV_LOG_LEVEL, "warn"),
            (ENV_LOG_DIR, "   "),
        ]);
        let config = CoreConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(
            config.db_path,
            Some(PathBuf::from("/var/lib/silenth/entries.db"))
        );
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, None);
    }
}
