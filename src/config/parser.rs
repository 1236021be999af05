use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// Missing sections and fields fall back to the built-in defaults, so a
/// config file only needs to name the values it overrides.
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
/// use bookcrawl::config::load_config;
///
/// let config = load_config(Path::new("bookcrawl.toml")).unwrap();
/// println!("Output file: {}", config.output.csv_path);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let config: Config = toml::from_str(&content)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

/// Returns the validated built-in default configuration
///
/// Used when no config file is given on the command line.
pub fn default_config() -> Result<Config, ConfigError> {
    let config = Config::default();
    validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[catalog]
base-url = "https://shop.example.com/"
catalog-url = "https://shop.example.com/items/"
start-page = "items/page-1.html"
max-pages = 5

[http]
user-agent = "TestScraper/1.0"
timeout-secs = 5

[throttle]
item-delay-ms = 0
page-delay-ms = 0

[output]
csv-path = "out/items.csv"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.catalog.base_url, "https://shop.example.com/");
        assert_eq!(config.catalog.max_pages, Some(5));
        assert_eq!(config.http.user_agent, "TestScraper/1.0");
        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.output.csv_path, "out/items.csv");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config_content = r#"
[output]
csv-path = "elsewhere/books.csv"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        // Overridden field sticks, everything else is stock
        assert_eq!(config.output.csv_path, "elsewhere/books.csv");
        assert_eq!(config.catalog.base_url, "https://books.toscrape.com/");
        assert_eq!(config.http.timeout_secs, 15);
        assert_eq!(config.throttle.item_delay_ms, 100);
        assert_eq!(config.throttle.page_delay_ms, 200);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/bookcrawl.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let config_content = "this is not valid TOML {{{";
        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[catalog]
base-url = "not a url"
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::InvalidUrl(_)));
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = default_config().unwrap();
        assert_eq!(
            config.catalog.start_url(),
            "https://books.toscrape.com/catalogue/page-1.html"
        );
        assert_eq!(config.catalog.catalog_segment(), "catalogue");
    }
}
