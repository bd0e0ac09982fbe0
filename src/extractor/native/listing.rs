//! Paginated uploader listings
//!
//! The site serves a member's uploads through an asynchronous block endpoint.
//! Each returned fragment holds one page of video links and, when another
//! page exists, a `data-parameters` attribute naming the next page index.

use crate::extractor::traits::{ListingPage, ListingSource, PageFetcher};
use crate::utils::config::ExtractorSettings;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, warn};

static VIDEO_LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<a\s+class="th[^"]*"\s+href="(?P<href>https?://rule34video\.com/video/\d+/[^"]+)""#)
        .expect("valid video link regex")
});
static DATA_PARAMETERS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"data-parameters="([^"]*)""#).expect("valid data-parameters regex"));
static FROM_VIDEOS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"from_videos:(\d+)").expect("valid from_videos regex"));

/// Parse one listing fragment returned for `page`
pub fn parse_listing_fragment(html: &str, page: u32) -> ListingPage {
    let entries = VIDEO_LINK_RE
        .captures_iter(html)
        .map(|caps| caps["href"].to_string())
        .collect();

    ListingPage {
        entries,
        has_more: has_continuation(html, page + 1),
    }
}

/// Whether any `data-parameters` attribute points at `next_page`.
///
/// Compared numerically so both `02` and `2` qualify.
fn has_continuation(html: &str, next_page: u32) -> bool {
    DATA_PARAMETERS_RE.captures_iter(html).any(|params| {
        FROM_VIDEOS_RE
            .captures_iter(&params[1])
            .any(|caps| caps[1].parse::<u32>().ok() == Some(next_page))
    })
}

/// Listing source backed by the site's asynchronous block endpoint
pub struct MarkupListingSource {
    fetcher: Arc<dyn PageFetcher>,
    settings: ExtractorSettings,
}

impl MarkupListingSource {
    pub fn new(fetcher: Arc<dyn PageFetcher>, settings: ExtractorSettings) -> Self {
        Self { fetcher, settings }
    }
}

#[async_trait]
impl ListingSource for MarkupListingSource {
    async fn fetch_listing_page(&self, user_id: &str, page: u32) -> ListingPage {
        let url = self.settings.listing_url(user_id, page);
        debug!("Downloading user videos page {}: {}", page, url);

        match self.fetcher.fetch_page(&url).await {
            Ok(html) => parse_listing_fragment(&html, page),
            Err(e) => {
                warn!(
                    "Listing page {} for user {} failed, treating as empty: {}",
                    page, user_id, e
                );
                ListingPage::default()
            }
        }
    }
}

/// Why a listing walk stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    NoContinuation,
    EmptyPage,
    PageLimit,
}

/// Outcome of walking every page of a member's uploads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingWalk {
    pub entries: Vec<String>,
    pub pages_fetched: u32,
    pub stop_reason: StopReason,
}

/// Walk pages 1, 2, 3 ... until a page has no continuation marker, yields
/// no entries, or `max_pages` is reached.
///
/// Entries are kept in page order; repeats across pages are preserved.
pub async fn walk_listing(
    source: &dyn ListingSource,
    user_id: &str,
    max_pages: Option<u32>,
) -> ListingWalk {
    let mut entries = Vec::new();
    let mut page = 1;

    loop {
        let listing = source.fetch_listing_page(user_id, page).await;
        let found = listing.entries.len();
        entries.extend(listing.entries);
        debug!(
            "User {} page {}: {} videos, has_more={}",
            user_id, page, found, listing.has_more
        );

        let stop_reason = if found == 0 {
            Some(StopReason::EmptyPage)
        } else if !listing.has_more {
            Some(StopReason::NoContinuation)
        } else if max_pages.is_some_and(|limit| page >= limit) {
            warn!("User {} listing stopped at page limit {}", user_id, page);
            Some(StopReason::PageLimit)
        } else {
            None
        };

        if let Some(stop_reason) = stop_reason {
            return ListingWalk {
                entries,
                pages_fetched: page,
                stop_reason,
            };
        }
        page += 1;
    }
}
