use crate::extractor::models::{FormatVariant, MediaRecord, UserProfile};
use crate::utils::error::ExtractorError;
use anyhow::Result;
use async_trait::async_trait;

/// Core trait for all site extractors
///
/// The registry routes a URL to the first extractor whose `supports` accepts it.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Returns the key other components use to refer to this extractor (e.g. "Rule34Video")
    fn id(&self) -> &'static str;

    /// Checks if this extractor can handle the given URL
    fn supports(&self, url: &str) -> bool;

    /// Extracts the metadata record of a single video page
    async fn extract_info(&self, _url: &str) -> Result<MediaRecord> {
        Err(ExtractorError::NotSupported {
            extractor: self.id(),
            operation: "Video extraction",
        }
        .into())
    }

    /// Extracts an uploader profile together with its video listing
    async fn extract_playlist(&self, _url: &str) -> Result<UserProfile> {
        Err(ExtractorError::NotSupported {
            extractor: self.id(),
            operation: "Playlist extraction",
        }
        .into())
    }

    /// Gets available formats (calls extract_info internally)
    async fn get_formats(&self, url: &str) -> Result<Vec<FormatVariant>> {
        let info = self.extract_info(url).await?;
        Ok(info.formats)
    }

    /// Resolves the direct download URL for the format with the given quality label
    async fn get_direct_url(&self, url: &str, quality: &str) -> Result<String> {
        let formats = self.get_formats(url).await?;
        formats
            .into_iter()
            .find(|format| format.quality == quality)
            .map(|format| format.url)
            .ok_or_else(|| {
                ExtractorError::FormatNotFound {
                    url: url.to_string(),
                    quality: quality.to_string(),
                }
                .into()
            })
    }
}

/// Capability to download a page as text
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<String>;
}

/// One page of an uploader's video listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    /// Video page URLs in markup order
    pub entries: Vec<String>,
    /// Whether the page announced a following page
    pub has_more: bool,
}

/// Source of paginated uploader listings (pages are numbered from 1)
///
/// Implementations must not fail: an unreachable page is reported as an
/// empty page without continuation.
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch_listing_page(&self, user_id: &str, page: u32) -> ListingPage;
}
