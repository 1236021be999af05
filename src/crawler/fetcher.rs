//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the configured user agent and timeout
//! - GET requests that return a parsed HTML document
//! - Absorbing network and status errors into an absent document
//!
//! A failed fetch never aborts the crawl on its own: the caller receives
//! `None` and decides whether that truncates pagination (listing page) or
//! degrades a single record (detail page).

use crate::config::HttpConfig;
use reqwest::Client;
use scraper::Html;
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP client configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use bookcrawl::config::HttpConfig;
/// use bookcrawl::crawler::build_http_client;
///
/// let config = HttpConfig {
///     user_agent: "Mozilla/5.0 (compatible; LearningScraper/1.0)".to_string(),
///     timeout_secs: 15,
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and parses the body as an HTML document
///
/// Sends a single GET request. On a timeout, connection failure, non-2xx
/// status, or body-read failure the error is logged at `warn` level and the
/// function returns `None`; no error reaches the caller. There is no retry.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
///
/// # Returns
///
/// * `Some(Html)` - The parsed document
/// * `None` - The page could not be fetched
pub async fn fetch_document(client: &Client, url: &str) -> Option<Html> {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            if e.is_timeout() {
                tracing::warn!("Request timeout for {}", url);
            } else if e.is_connect() {
                tracing::warn!("Connection failed for {}: {}", url, e);
            } else {
                tracing::warn!("Request failed for {}: {}", url, e);
            }
            return None;
        }
    };

    let status = response.status();
    if !status.is_success() {
        tracing::warn!("HTTP {} for {}", status.as_u16(), url);
        return None;
    }

    match response.text().await {
        Ok(body) => Some(Html::parse_document(&body)),
        Err(e) => {
            tracing::warn!("Failed to read body of {}: {}", url, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_config() -> HttpConfig {
        HttpConfig {
            user_agent: "TestScraper/1.0".to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_build_http_client() {
        let config = create_test_config();
        let client = build_http_client(&config);
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_document_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/page.html"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<html><head><title>Hello</title></head><body></body></html>",
            ))
            .mount(&mock_server)
            .await;

        let client = build_http_client(&create_test_config()).unwrap();
        let url = format!("{}/page.html", mock_server.uri());
        let document = fetch_document(&client, &url).await.expect("should fetch");

        let title_selector = Selector::parse("title").unwrap();
        let title = document
            .select(&title_selector)
            .next()
            .map(|e| e.text().collect::<String>());
        assert_eq!(title.as_deref(), Some("Hello"));
    }

    #[tokio::test]
    async fn test_fetch_document_error_status_is_absent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/missing.html"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = build_http_client(&create_test_config()).unwrap();
        let url = format!("{}/missing.html", mock_server.uri());
        assert!(fetch_document(&client, &url).await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_document_connection_error_is_absent() {
        let client = build_http_client(&create_test_config()).unwrap();
        // Port 1 is never listening
        assert!(fetch_document(&client, "http://127.0.0.1:1/").await.is_none());
    }
}
