//! Configuration management.
//!
//! Centralized configuration populated from environment variables or
//! defaults. Environment variables are prefixed with `TOOLCHEST_`.

use serde::{Deserialize, Serialize};
use tracing::info;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site identification and metadata.
    pub site: SiteConfig,

    /// Session behavior.
    pub session: SessionConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Site identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site name shown in the shell banner and page titles.
    pub name: String,

    /// Crate version.
    pub version: String,

    /// Base URL used when rendering absolute routes.
    pub base_url: String,
}

/// Session behavior configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Keep the hand-off context after a view consumes it, overriding the
    /// per-view clear policy. Debugging aid; off by default.
    pub keep_context_after_consume: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig {
                name: "toolchest".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                base_url: "https://toolchest.example".to_string(),
            },
            session: SessionConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Recognized variables: `TOOLCHEST_SITE_NAME`, `TOOLCHEST_BASE_URL`,
    /// `TOOLCHEST_LOG_LEVEL`, `TOOLCHEST_KEEP_CONTEXT`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("TOOLCHEST_SITE_NAME") {
            config.site.name = name;
        }

        if let Ok(base_url) = std::env::var("TOOLCHEST_BASE_URL") {
            config.site.base_url = base_url;
        }

        if let Ok(level) = std::env::var("TOOLCHEST_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(keep) = std::env::var("TOOLCHEST_KEEP_CONTEXT") {
            config.session.keep_context_after_consume =
                keep.to_lowercase() == "true" || keep == "1";
            info!(
                "Hand-off context retention after consume: {}",
                config.session.keep_context_after_consume
            );
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.site.name, "toolchest");
        assert_eq!(config.logging.level, "info");
        assert!(!config.session.keep_context_after_consume);
    }

    #[test]
    fn test_site_name_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("TOOLCHEST_SITE_NAME", "my-tools");
        }
        let config = Config::from_env();
        assert_eq!(config.site.name, "my-tools");
        unsafe {
            std::env::remove_var("TOOLCHEST_SITE_NAME");
        }
    }

    #[test]
    fn test_keep_context_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("TOOLCHEST_KEEP_CONTEXT", "1");
        }
        let config = Config::from_env();
        assert!(config.session.keep_context_after_consume);
        unsafe {
            std::env::remove_var("TOOLCHEST_KEEP_CONTEXT");
        }
    }
}
