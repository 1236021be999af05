//! Fixed-delay pacing between requests
//!
//! The crawl is strictly sequential, so politeness is just a pause after
//! each unit of work: a short one after every item and a longer one after
//! every listing page. Tests swap in `Throttle::Disabled` to run a crawl at
//! full speed.

use std::time::Duration;

use crate::config::ThrottleConfig;

/// Pacing policy applied by the crawl loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Throttle {
    /// Fixed pauses after each item and after each listing page
    Fixed {
        item_delay: Duration,
        page_delay: Duration,
    },
    /// No pauses at all
    Disabled,
}

impl Throttle {
    /// Builds the fixed-delay policy from configured millisecond values
    pub fn from_config(config: &ThrottleConfig) -> Self {
        Throttle::Fixed {
            item_delay: Duration::from_millis(config.item_delay_ms),
            page_delay: Duration::from_millis(config.page_delay_ms),
        }
    }

    /// Pause applied after each item's fetch-and-extract cycle
    pub async fn after_item(&self) {
        if let Throttle::Fixed { item_delay, .. } = self {
            tokio::time::sleep(*item_delay).await;
        }
    }

    /// Pause applied after each listing page is fully processed
    pub async fn after_page(&self) {
        if let Throttle::Fixed { page_delay, .. } = self {
            tokio::time::sleep(*page_delay).await;
        }
    }
}
