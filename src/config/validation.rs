//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{RosterError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_database_config(&settings.database)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(RosterError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(RosterError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(RosterError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    if config.acquire_timeout_seconds == 0 {
        return Err(RosterError::Config(
            "Acquire timeout must be greater than 0".to_string()
        ));
    }

    if config.idle_timeout_seconds > 0
        && config.max_lifetime_seconds > 0
        && config.idle_timeout_seconds > config.max_lifetime_seconds
    {
        return Err(RosterError::Config(
            "Idle timeout cannot exceed max connection lifetime".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(RosterError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(RosterError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    let valid_formats = ["text", "json"];
    if !valid_formats.contains(&config.format.as_str()) {
        return Err(RosterError::Config(
            format!("Invalid log format: {}. Valid formats: {:?}", config.format, valid_formats)
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_rejects_empty_database_url() {
        let mut settings = Settings::default();
        settings.database.url.clear();
        assert_matches!(validate_settings(&settings), Err(RosterError::Config(msg)) if msg.contains("Database URL"));
    }

    #[test]
    fn test_rejects_inverted_pool_bounds() {
        let mut settings = Settings::default();
        settings.database.min_connections = 20;
        assert_matches!(validate_settings(&settings), Err(RosterError::Config(msg)) if msg.contains("Min connections"));
    }

    #[test]
    fn test_rejects_idle_timeout_beyond_lifetime() {
        let mut settings = Settings::default();
        settings.database.idle_timeout_seconds = 3600;
        assert_matches!(validate_settings(&settings), Err(RosterError::Config(msg)) if msg.contains("Idle timeout"));

        settings.database.max_lifetime_seconds = 0;
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_rejects_unknown_log_level_and_format() {
        let mut settings = Settings::default();
        settings.logging.level = "verbose".to_string();
        assert_matches!(validate_settings(&settings), Err(RosterError::Config(_)));

        let mut settings = Settings::default();
        settings.logging.format = "xml".to_string();
        assert_matches!(validate_settings(&settings), Err(RosterError::Config(msg)) if msg.contains("log format"));
    }
}
