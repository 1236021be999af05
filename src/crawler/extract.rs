//! Field extraction from listing and detail pages
//!
//! This module turns parsed HTML into owned field data:
//! - Listing pages: per-item title, decorated price text, stock label, and
//!   the rewritten absolute detail URL
//! - Detail pages: rating, category, and description, each best-effort
//! - The "next page" href used to advance pagination
//!
//! The page structure is known but fragile, so every optional field resolves
//! to an absent value rather than an error when its element is missing. Only
//! the four required listing fields (title, link, price, stock) and a price
//! that fails to parse produce an `ExtractError`, which callers handle per
//! item.

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// The relative prefix listing-page hrefs carry in front of detail links.
/// It is stripped literally, not path-resolved, before the catalog URL is
/// prepended; that exact behavior is load-bearing for downstream consumers.
const RELATIVE_PREFIX: &str = "../../../";

/// The marker class shared by every rating element
const RATING_MARKER_CLASS: &str = "star-rating";

/// Errors produced while extracting one listing item
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The price text held nothing parseable as a decimal number
    #[error("no numeric price in {text:?}")]
    Price { text: String },

    /// A required listing field was missing from the item's markup
    #[error("listing item is missing its {field}")]
    MissingField { field: &'static str },
}

/// Required fields of one listing-page item, in owned form
///
/// Extracting into owned data up front means the listing document can be
/// dropped before any detail page is fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingItem {
    /// Product title from the anchor's `title` attribute, trimmed
    pub title: String,

    /// Price text as displayed, currency symbol and all
    pub price_text: String,

    /// Availability label, whitespace-cleaned
    pub stock: String,

    /// Absolute detail-page URL
    pub detail_url: String,
}

/// Best-effort fields from a product's detail page
///
/// `Default` (all absent) stands in whenever the detail page could not be
/// fetched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailFields {
    pub rating: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

/// Extracts every listing item from a listing page, in page order
///
/// Items missing a required field are logged and skipped; they never fail
/// the page.
///
/// # Arguments
///
/// * `document` - The parsed listing page
/// * `catalog_url` - Catalog URL prepended to rewritten detail links
pub fn extract_listing_items(document: &Html, catalog_url: &str) -> Vec<ListingItem> {
    let selectors = match ListingSelectors::compile() {
        Some(s) => s,
        None => return Vec::new(),
    };

    let mut items = Vec::new();
    for (index, pod) in document.select(&selectors.pod).enumerate() {
        match listing_item(&pod, &selectors, catalog_url) {
            Ok(item) => items.push(item),
            Err(e) => {
                tracing::warn!("Skipping listing item {}: {}", index, e);
            }
        }
    }

    items
}

/// Compiled selectors for the listing-page structure
struct ListingSelectors {
    pod: Selector,
    anchor: Selector,
    price: Selector,
    stock: Selector,
}

impl ListingSelectors {
    fn compile() -> Option<Self> {
        Some(Self {
            pod: Selector::parse("article.product_pod").ok()?,
            anchor: Selector::parse("h3 a").ok()?,
            price: Selector::parse(".price_color").ok()?,
            stock: Selector::parse(".availability").ok()?,
        })
    }
}

/// Extracts the four required fields of a single listing item
fn listing_item(
    pod: &ElementRef,
    selectors: &ListingSelectors,
    catalog_url: &str,
) -> Result<ListingItem, ExtractError> {
    let anchor = pod
        .select(&selectors.anchor)
        .next()
        .ok_or(ExtractError::MissingField {
            field: "link anchor",
        })?;

    let title = anchor
        .value()
        .attr("title")
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .ok_or(ExtractError::MissingField { field: "title" })?
        .to_string();

    let href = anchor
        .value()
        .attr("href")
        .ok_or(ExtractError::MissingField {
            field: "detail link",
        })?;

    let price_text = pod
        .select(&selectors.price)
        .next()
        .map(clean_text)
        .ok_or(ExtractError::MissingField { field: "price" })?;

    let stock = pod
        .select(&selectors.stock)
        .next()
        .map(clean_text)
        .ok_or(ExtractError::MissingField {
            field: "stock label",
        })?;

    Ok(ListingItem {
        title,
        price_text,
        stock,
        detail_url: rewrite_detail_url(href, catalog_url),
    })
}

/// Rewrites a listing-page href into an absolute detail URL
///
/// Strips every occurrence of `../../../` from the href and prepends the
/// catalog URL. The strip is a literal string operation on purpose: an href
/// that is already catalog-relative comes out with a doubled catalog
/// segment, exactly as the catalog's consumers expect.
///
/// # Examples
///
/// ```
/// use bookcrawl::crawler::rewrite_detail_url;
///
/// let url = rewrite_detail_url(
///     "../../../catalogue/foo_123/index.html",
///     "https://example/catalogue/",
/// );
/// assert_eq!(url, "https://example/catalogue/catalogue/foo_123/index.html");
/// ```
pub fn rewrite_detail_url(href: &str, catalog_url: &str) -> String {
    format!("{}{}", catalog_url, href.replace(RELATIVE_PREFIX, ""))
}

/// Extracts the best-effort fields from a product detail page
pub fn extract_detail_fields(document: &Html) -> DetailFields {
    DetailFields {
        rating: extract_rating(document),
        category: extract_category(document),
        description: extract_description(document),
    }
}

/// Reads the rating word off the rating element's class list
///
/// The rating is encoded as the one class that is not the shared
/// `star-rating` marker, drawn from the fixed vocabulary "One".."Five".
fn extract_rating(document: &Html) -> Option<String> {
    let selector = Selector::parse(".product_main .star-rating").ok()?;
    let element = document.select(&selector).next()?;

    element
        .value()
        .classes()
        .find(|class| *class != RATING_MARKER_CLASS)
        .map(str::to_string)
}

/// Reads the category from the breadcrumb trail
///
/// The category is the third linked entry (after the home and section
/// links); fewer than three entries means the trail is not in the expected
/// shape and the category is absent.
fn extract_category(document: &Html) -> Option<String> {
    let selector = Selector::parse("ul.breadcrumb li a").ok()?;
    let entries: Vec<ElementRef> = document.select(&selector).collect();

    if entries.len() < 3 {
        return None;
    }

    Some(clean_text(entries[2]))
}

/// Reads the product description
///
/// The description lives in the first `<p>` element among the siblings that
/// follow the `#product_description` header element.
fn extract_description(document: &Html) -> Option<String> {
    let selector = Selector::parse("#product_description").ok()?;
    let header = document.select(&selector).next()?;

    header
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| sibling.value().name() == "p")
        .map(clean_text)
}

/// Normalizes decorated price text into a decimal number
///
/// Strips every character that is not an ASCII digit or a decimal point,
/// then parses the remainder. Text with nothing parseable left is an error:
/// a price the catalog cannot represent numerically fails that item.
///
/// # Examples
///
/// ```
/// use bookcrawl::crawler::normalize_price;
///
/// assert_eq!(normalize_price("£51.77").unwrap(), 51.77);
/// assert_eq!(normalize_price("  £5.00 ").unwrap(), 5.0);
/// assert!(normalize_price("price on request").is_err());
/// ```
pub fn normalize_price(text: &str) -> Result<f64, ExtractError> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    cleaned.parse::<f64>().map_err(|_| ExtractError::Price {
        text: text.to_string(),
    })
}

/// Returns the href of the "next page" link, if the page has one
pub fn next_page_href(document: &Html) -> Option<String> {
    let selector = Selector::parse("li.next a").ok()?;
    let element = document.select(&selector).next()?;
    element.value().attr("href").map(str::to_string)
}

/// Concatenates an element's text nodes, each trimmed of surrounding
/// whitespace
///
/// The listing markup pads its text nodes with indentation, so plain text
/// collection would keep stray newlines and spaces.
fn clean_text(element: ElementRef) -> String {
    element.text().map(str::trim).collect()
}
