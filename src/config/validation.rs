use crate::config::types::{Config, RenderConfig, ScraperConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scraper_config(&config.scraper)?;
    validate_render_config(&config.render)?;
    Ok(())
}

/// Validates fetch and extraction settings
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
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

    if config.max_retries < 1 {
        return Err(ConfigError::Validation(format!(
            "max_retries must be >= 1, got {}",
            config.max_retries
        )));
    }

    if config.max_concurrent < 1 || config.max_concurrent > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent must be between 1 and 100, got {}",
            config.max_concurrent
        )));
    }

    Ok(())
}

/// Validates the renderer endpoint, if one is configured
fn validate_render_config(config: &RenderConfig) -> Result<(), ConfigError> {
    let Some(endpoint) = &config.endpoint else {
        return Ok(());
    };

    let url = Url::parse(endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid render endpoint: {}", e)))?;

    if url.scheme() != "ws" && url.scheme() != "wss" {
        return Err(ConfigError::InvalidUrl(format!(
            "Render endpoint '{}' must use the ws or wss scheme",
            endpoint
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_scraper_config() {
        let mut config = ScraperConfig::default();
        assert!(validate_scraper_config(&config).is_ok());

        config.user_agent = "  ".to_string();
        assert!(validate_scraper_config(&config).is_err());

        let config = ScraperConfig {
            timeout_secs: 0,
            ..ScraperConfig::default()
        };
        assert!(validate_scraper_config(&config).is_err());

        let config = ScraperConfig {
            max_concurrent: 0,
            ..ScraperConfig::default()
        };
        assert!(validate_scraper_config(&config).is_err());

        let config = ScraperConfig {
            max_concurrent: 101,
            ..ScraperConfig::default()
        };
        assert!(validate_scraper_config(&config).is_err());
    }

    #[test]
    fn test_zero_interval_is_allowed() {
        let config = ScraperConfig {
            min_request_interval_ms: 0,
            ..ScraperConfig::default()
        };
        assert!(validate_scraper_config(&config).is_ok());
    }

    #[test]
    fn test_validate_render_endpoint() {
        let mut config = RenderConfig {
            enabled: true,
            endpoint: Some("ws://127.0.0.1:9222/devtools/browser/x".to_string()),
        };
        assert!(validate_render_config(&config).is_ok());

        config.endpoint = Some("http://127.0.0.1:9222".to_string());
        assert!(matches!(
            validate_render_config(&config),
            Err(ConfigError::InvalidUrl(_))
        ));

        config.endpoint = Some("not a url".to_string());
        assert!(validate_render_config(&config).is_err());

        config.endpoint = None;
        assert!(validate_render_config(&config).is_ok());
    }
}
