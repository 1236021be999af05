use crate::config::types::{CatalogConfig, Config, HttpConfig, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_catalog_config(&config.catalog)?;
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates catalog configuration
fn validate_catalog_config(config: &CatalogConfig) -> Result<(), ConfigError> {
    let base = validate_http_url("base-url", &config.base_url)?;

    if !config.base_url.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "base-url must end with '/', got '{}'",
            config.base_url
        )));
    }

    let catalog = validate_http_url("catalog-url", &config.catalog_url)?;

    if !config.catalog_url.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "catalog-url must end with '/', got '{}'",
            config.catalog_url
        )));
    }

    // Next-URL resolution keys off the catalog's path segment, so the
    // catalog URL cannot sit at the site root.
    if catalog.path() == "/" {
        return Err(ConfigError::Validation(format!(
            "catalog-url must have a path segment below the site root, got '{}'",
            config.catalog_url
        )));
    }

    if config.start_page.is_empty() {
        return Err(ConfigError::Validation(
            "start-page cannot be empty".to_string(),
        ));
    }

    if config.start_page.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "start-page is appended to base-url and must not start with '/', got '{}'",
            config.start_page
        )));
    }

    // The start page must resolve to a URL on the same host as the base
    let start = validate_http_url("start page", &config.start_url())?;
    if start.host_str() != base.host_str() {
        return Err(ConfigError::Validation(format!(
            "start page '{}' does not resolve within base-url '{}'",
            config.start_page, config.base_url
        )));
    }

    if let Some(max_pages) = config.max_pages {
        if max_pages < 1 {
            return Err(ConfigError::Validation(format!(
                "max-pages must be >= 1, got {}",
                max_pages
            )));
        }
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Parses a URL and checks it uses an HTTP(S) scheme
fn validate_http_url(field: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: {}", field, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} must use HTTP or HTTPS, got '{}'",
            field, value
        )));
    }

    Ok(url)
}
