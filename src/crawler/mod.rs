//! Crawler module for catalog fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching of listing and detail pages
//! - Field extraction and price normalization
//! - Fixed-delay pacing between requests
//! - Overall crawl coordination

mod coordinator;
mod extract;
mod fetcher;
mod throttle;

pub use coordinator::{crawl, Crawler};
pub use extract::{
    extract_detail_fields, extract_listing_items, next_page_href, normalize_price,
    rewrite_detail_url, DetailFields, ExtractError, ListingItem,
};
pub use fetcher::{build_http_client, fetch_document};
pub use throttle::Throttle;
