use crate::config::types::{Config, CrawlerConfig, OutputConfig, SiteConfig, UserAgentConfig};
use crate::extract::SiteSelectors;
use crate::url::normalize_base_url;
use crate::ConfigError;
use url::Url;

/// Largest accepted `talk-concurrency`
const MAX_TALK_CONCURRENCY: usize = 32;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    SiteSelectors::compile(&config.selectors)?;
    Ok(())
}

/// Validates the site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let base_url = config
        .base_url
        .as_deref()
        .ok_or(ConfigError::MissingBaseUrl)?;

    normalize_base_url(base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", base_url, e)))?;

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_iterations < 1 {
        return Err(ConfigError::Validation(format!(
            "max_iterations must be >= 1, got {}",
            config.max_iterations
        )));
    }

    if config.talk_concurrency < 1 || config.talk_concurrency > MAX_TALK_CONCURRENCY {
        return Err(ConfigError::Validation(format!(
            "talk_concurrency must be between 1 and {}, got {}",
            MAX_TALK_CONCURRENCY, config.talk_concurrency
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "connect_timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    // Must contain exactly one @ with text on both sides
    let (local, domain) = match email.split_once('@') {
        Some(parts) if !parts.1.contains('@') => parts,
        _ => {
            return Err(ConfigError::Validation(format!(
                "Invalid email format: '{}'",
                email
            )))
        }
    };

    if local.is_empty() || domain.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
