use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - OMDb API key is set
/// - Catalog query, media type and slot key are not empty
/// - Detail concurrency cap, when set, is at least 1
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.omdb.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "omdb.api_key cannot be empty".to_string(),
        ));
    }

    for (name, value) in [
        ("catalog.query", &config.catalog.query),
        ("catalog.media_type", &config.catalog.media_type),
        ("catalog.slot_key", &config.catalog.slot_key),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} cannot be empty",
                name
            )));
        }
    }

    if config.catalog.max_concurrent_details == Some(0) {
        return Err(ConfigError::ValidationError(
            "catalog.max_concurrent_details must be at least 1".to_string(),
        ));
    }

    Ok(())
}
