//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that walks the paginated
//! catalog, including:
//! - Fetching each listing page exactly once
//! - Fetching the detail page for every listing item
//! - Assembling records and skipping items that cannot be assembled
//! - Following the "next page" link until the catalog runs out
//! - Pacing every step through the configured throttle
//!
//! The walk is strictly sequential: one listing page at a time, one item at
//! a time, in page order. A listing page that cannot be fetched ends the
//! walk; everything collected up to that point is still returned.

use crate::config::{CatalogConfig, Config};
use crate::crawler::extract::{
    extract_detail_fields, extract_listing_items, next_page_href, normalize_price, DetailFields,
    ExtractError, ListingItem,
};
use crate::crawler::fetcher::{build_http_client, fetch_document};
use crate::crawler::throttle::Throttle;
use crate::record::Record;
use crate::CrawlError;
use reqwest::Client;

/// Main crawler structure
pub struct Crawler {
    config: Config,
    client: Client,
    throttle: Throttle,
}

impl Crawler {
    /// Creates a new crawler with the throttle the configuration describes
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Successfully created crawler
    /// * `Err(CrawlError)` - Failed to build the HTTP client
    pub fn new(config: Config) -> Result<Self, CrawlError> {
        let throttle = Throttle::from_config(&config.throttle);
        Self::with_throttle(config, throttle)
    }

    /// Creates a new crawler with an explicit throttle
    ///
    /// Used by tests to run crawls against local mock servers without the
    /// politeness pauses.
    pub fn with_throttle(config: Config, throttle: Throttle) -> Result<Self, CrawlError> {
        let client = build_http_client(&config.http)?;

        Ok(Self {
            config,
            client,
            throttle,
        })
    }

    /// Runs the crawl and returns every record it could assemble
    ///
    /// This is the core crawling logic that:
    /// 1. Fetches the current listing page
    /// 2. Extracts its items and its "next page" link
    /// 3. Assembles a record per item, fetching each item's detail page
    /// 4. Advances to the next page until there is none
    ///
    /// Failures degrade rather than abort: a failed item is skipped, a
    /// failed detail page leaves its fields absent, and a failed listing
    /// page ends the walk with the records collected so far.
    pub async fn run(&self) -> Vec<Record> {
        let mut records = Vec::new();
        let mut pages_visited: u32 = 0;
        let mut cursor = Some(self.config.catalog.start_url());
        let start_time = std::time::Instant::now();

        while let Some(url) = cursor {
            if let Some(max_pages) = self.config.catalog.max_pages {
                if pages_visited >= max_pages {
                    tracing::info!("Reached the {}-page limit, stopping", max_pages);
                    break;
                }
            }

            tracing::info!("Listing page {}: {}", pages_visited + 1, url);

            // The parsed document is consumed before the next await; Html is
            // not Send.
            let (items, next_href) = match fetch_document(&self.client, &url).await {
                Some(document) => (
                    extract_listing_items(&document, &self.config.catalog.catalog_url),
                    next_page_href(&document),
                ),
                None => {
                    tracing::warn!(
                        "Listing page unavailable, stopping with {} records",
                        records.len()
                    );
                    break;
                }
            };
            pages_visited += 1;

            tracing::debug!("Found {} items on listing page", items.len());

            for item in items {
                let title = item.title.clone();
                match self.assemble_record(item).await {
                    Ok(record) => records.push(record),
                    Err(e) => {
                        tracing::warn!("Skipping {:?}: {}", title, e);
                    }
                }
                self.throttle.after_item().await;
            }

            cursor = next_href.map(|href| resolve_next_url(&url, &href, &self.config.catalog));
            self.throttle.after_page().await;
        }

        tracing::info!(
            "Crawl completed: {} records from {} listing pages in {:?}",
            records.len(),
            pages_visited,
            start_time.elapsed()
        );

        records
    }

    /// Assembles one record from a listing item and its detail page
    ///
    /// The detail page is best-effort: if it cannot be fetched, the record
    /// keeps its listing fields and leaves the detail fields absent. A
    /// price that fails to normalize fails the whole item.
    async fn assemble_record(&self, item: ListingItem) -> Result<Record, ExtractError> {
        let detail = match fetch_document(&self.client, &item.detail_url).await {
            Some(document) => extract_detail_fields(&document),
            None => {
                tracing::debug!("Detail page unavailable for {:?}", item.title);
                DetailFields::default()
            }
        };

        let price_gbp = normalize_price(&item.price_text)?;

        Ok(Record {
            title: item.title,
            price_gbp,
            stock: item.stock,
            rating: detail.rating,
            category: detail.category,
            description: detail.description,
            product_url: item.detail_url,
        })
    }
}

/// Resolves a "next page" href against the page it appeared on
///
/// Hrefs on pages inside the catalog are relative to the current page's
/// directory, while hrefs on the site root are relative to the base URL.
/// The current URL is checked for the catalog path segment to tell the two
/// apart.
fn resolve_next_url(current_url: &str, href: &str, catalog: &CatalogConfig) -> String {
    if current_url.contains(catalog.catalog_segment()) {
        match current_url.rsplit_once('/') {
            Some((parent, _)) => format!("{}/{}", parent, href),
            None => format!("{}/{}", current_url, href),
        }
    } else {
        format!("{}{}", catalog.base_url, href)
    }
}

/// Runs a complete catalog crawl
///
/// This function walks every listing page from the configured start page:
///
/// 1. Build the HTTP client and throttle from the configuration
/// 2. Fetch the current listing page (once per page)
/// 3. Extract each item and fetch its detail page
/// 4. Assemble records, skipping items that fail
/// 5. Follow the "next page" link until the catalog ends
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(Vec<Record>)` - Every record assembled, in catalog order
/// * `Err(CrawlError)` - The crawler could not be constructed
///
/// # Example
///
/// ```no_run
/// use bookcrawl::config::default_config;
/// use bookcrawl::crawler::crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = default_config()?;
/// let records = crawl(config).await?;
/// println!("{} records", records.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: Config) -> crate::Result<Vec<Record>> {
    let crawler = Crawler::new(config)?;
    Ok(crawler.run().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_config;

    fn test_catalog() -> CatalogConfig {
        CatalogConfig {
            base_url: "https://books.toscrape.com/".to_string(),
            catalog_url: "https://books.toscrape.com/catalogue/".to_string(),
            start_page: "catalogue/page-1.html".to_string(),
            max_pages: None,
        }
    }

    #[test]
    fn test_resolve_next_url_inside_catalog() {
        let next = resolve_next_url(
            "https://books.toscrape.com/catalogue/page-1.html",
            "page-2.html",
            &test_catalog(),
        );
        assert_eq!(next, "https://books.toscrape.com/catalogue/page-2.html");
    }

    #[test]
    fn test_resolve_next_url_keeps_deeper_directories() {
        let next = resolve_next_url(
            "https://books.toscrape.com/catalogue/category/books/travel_2/page-1.html",
            "page-2.html",
            &test_catalog(),
        );
        assert_eq!(
            next,
            "https://books.toscrape.com/catalogue/category/books/travel_2/page-2.html"
        );
    }

    #[test]
    fn test_resolve_next_url_from_site_root() {
        let next = resolve_next_url(
            "https://books.toscrape.com/index.html",
            "catalogue/page-2.html",
            &test_catalog(),
        );
        assert_eq!(next, "https://books.toscrape.com/catalogue/page-2.html");
    }

    #[test]
    fn test_crawler_construction() {
        let config = default_config().unwrap();
        assert!(Crawler::new(config).is_ok());
    }

    #[tokio::test]
    async fn test_with_throttle_accepts_disabled() {
        let config = default_config().unwrap();
        let crawler = Crawler::with_throttle(config, Throttle::Disabled).unwrap();
        assert_eq!(crawler.throttle, Throttle::Disabled);
    }
}
