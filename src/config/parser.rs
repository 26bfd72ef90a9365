use crate::config::types::Config;
use crate::config::validation::validate;
use crate::config::SITE_URL_ENV;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Parses configuration from TOML text without validating it
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Loads and parses a configuration file from the given path
///
/// Environment overrides are applied before validation, so a file without a
/// `site.base-url` is valid as long as the environment supplies one.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use speaker_harvest::config::load_config;
///
/// let config = load_config(Path::new("harvest.toml")).unwrap();
/// println!("Max iterations: {}", config.crawler.max_iterations);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut config = parse_config(&content)?;

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate(&config)?;

    Ok(config)
}

/// Builds the default configuration, taking the site URL from the environment
pub fn load_default_config() -> Result<Config, ConfigError> {
    let mut config = Config::default();

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate(&config)?;

    Ok(config)
}

/// Applies environment overrides using the given variable lookup
///
/// A non-empty `CRAWLER_SITE_URL` replaces `site.base-url`.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(SITE_URL_ENV) {
        let url = url.trim();
        if !url.is_empty() {
            config.site.base_url = Some(url.to_string());
        }
    }
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so runs can be matched to the config that drove them.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}
