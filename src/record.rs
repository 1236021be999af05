//! The product record produced by the crawl
//!
//! One `Record` is assembled per listing item from the listing-page fields
//! plus whatever the product's detail page yielded. Records are appended to
//! an in-memory sequence in discovery order and consumed once by the CSV
//! sink; they are never mutated after assembly.

/// A single scraped product
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Product title (from the listing anchor's `title` attribute)
    pub title: String,

    /// Price in GBP, parsed from the decorated listing price text
    pub price_gbp: f64,

    /// Free-text availability label, e.g. "In stock (22 available)"
    pub stock: String,

    /// Star rating word ("One".."Five"), if the detail page exposed one
    pub rating: Option<String>,

    /// Category from the detail page's breadcrumb trail, if present
    pub category: Option<String>,

    /// Product description from the detail page, if present
    pub description: Option<String>,

    /// Absolute URL of the product's detail page
    pub product_url: String,
}
