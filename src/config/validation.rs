use crate::config::types::{ApiConfig, Config, MultiPartEntry, OutputConfig, PacingConfig};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_api_config(&config.api)?;
    validate_pacing_config(&config.pacing)?;
    validate_output_config(&config.output)?;
    validate_multi_part_entries(&config.multi_part)?;
    Ok(())
}

/// Validates API configuration
fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base_url must use HTTPS scheme, got '{}'",
            url.scheme()
        )));
    }

    if config.library_id.is_empty() {
        return Err(ConfigError::Validation(
            "library_id cannot be empty".to_string(),
        ));
    }

    if config.auth_token.is_empty() {
        return Err(ConfigError::Validation(
            "auth_token cannot be empty".to_string(),
        ));
    }

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates pacing configuration
fn validate_pacing_config(config: &PacingConfig) -> Result<(), ConfigError> {
    if config.max_delay_ms < config.min_delay_ms {
        return Err(ConfigError::Validation(format!(
            "max_delay_ms ({}) must be >= min_delay_ms ({})",
            config.max_delay_ms, config.min_delay_ms
        )));
    }

    if config.max_delay_ms == 0 {
        return Err(ConfigError::Validation(
            "max_delay_ms must be > 0".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates multi-part question entries
fn validate_multi_part_entries(entries: &[MultiPartEntry]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for entry in entries {
        if entry.children < 1 {
            return Err(ConfigError::Validation(format!(
                "multi-part entry {} must have children >= 1, got {}",
                entry.main_index, entry.children
            )));
        }

        if !seen.insert(entry.main_index) {
            return Err(ConfigError::Validation(format!(
                "duplicate multi-part entry for main index {}",
                entry.main_index
            )));
        }
    }

    Ok(())
}
