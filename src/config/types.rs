use serde::Deserialize;

/// Main configuration structure for bookcrawl
///
/// Every section and field has a default reproducing the stock catalog
/// crawl, so an absent or partial TOML file still yields a runnable config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub http: HttpConfig,
    pub throttle: ThrottleConfig,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            http: HttpConfig::default(),
            throttle: ThrottleConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Catalog location configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Site root URL, trailing slash included
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Catalog URL prefixed to rewritten detail links, trailing slash included
    #[serde(rename = "catalog-url")]
    pub catalog_url: String,

    /// First listing page, relative to the site root
    #[serde(rename = "start-page")]
    pub start_page: String,

    /// Optional upper bound on listing pages walked per crawl
    #[serde(rename = "max-pages")]
    pub max_pages: Option<u32>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://books.toscrape.com/".to_string(),
            catalog_url: "https://books.toscrape.com/catalogue/".to_string(),
            start_page: "catalogue/page-1.html".to_string(),
            max_pages: None,
        }
    }
}

impl CatalogConfig {
    /// Absolute URL of the first listing page
    pub fn start_url(&self) -> String {
        format!("{}{}", self.base_url, self.start_page)
    }

    /// Last path segment of the catalog URL (e.g. "catalogue")
    ///
    /// Next-page hrefs resolve against the current page's parent path only
    /// when the current URL contains this segment.
    pub fn catalog_segment(&self) -> &str {
        self.catalog_url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Overall per-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (compatible; LearningScraper/1.0)".to_string(),
            timeout_secs: 15,
        }
    }
}

/// Fixed request-rate delays
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    /// Delay after each detail-page fetch (milliseconds)
    #[serde(rename = "item-delay-ms")]
    pub item_delay_ms: u64,

    /// Delay after each successfully processed listing page (milliseconds)
    #[serde(rename = "page-delay-ms")]
    pub page_delay_ms: u64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            item_delay_ms: 100,
            page_delay_ms: 200,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the CSV file to write
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "data/books.csv".to_string(),
        }
    }
}
