use crate::extractor::fetch::HttpFetcher;
use crate::extractor::models::{FormatVariant, MediaRecord, PlaylistEntry, UserProfile};
use crate::extractor::native::{Rule34VideoExtractor, Rule34VideoUserExtractor};
use crate::extractor::traits::{Extractor, PageFetcher};
use crate::utils::config::ExtractorSettings;
use crate::utils::error::ExtractorError;
use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

/// The Hybrid Extractor Registry
///
/// This struct holds a list of available extractors and routes requests
/// to the first one whose `supports(url)` accepts the URL.
pub struct HybridExtractor {
    extractors: Vec<Arc<dyn Extractor>>,
}

impl HybridExtractor {
    /// Create a new HybridExtractor with the given registry
    pub fn new(extractors: Vec<Arc<dyn Extractor>>) -> Self {
        Self { extractors }
    }

    /// Registry with the video and member extractors sharing one HTTP client
    pub fn with_settings(settings: &ExtractorSettings) -> Result<Self> {
        let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpFetcher::new(settings)?);
        Ok(Self::with_fetcher(fetcher, settings))
    }

    /// Registry with the video and member extractors using `fetcher`
    pub fn with_fetcher(fetcher: Arc<dyn PageFetcher>, settings: &ExtractorSettings) -> Self {
        let video: Arc<dyn Extractor> = Arc::new(Rule34VideoExtractor::with_fetcher(fetcher.clone()));
        let user: Arc<dyn Extractor> =
            Arc::new(Rule34VideoUserExtractor::with_fetcher(fetcher, settings));
        Self::new(vec![video, user])
    }

    /// Find the extractor for a given URL
    fn find_extractor(&self, url: &str) -> Result<&Arc<dyn Extractor>> {
        for extractor in &self.extractors {
            if extractor.supports(url) {
                debug!("Routing to extractor: {}", extractor.id());
                return Ok(extractor);
            }
        }
        Err(ExtractorError::UnsupportedUrl(url.to_string()).into())
    }

    /// Look up a registered extractor by its key
    pub fn extractor_for_key(&self, key: &str) -> Option<&Arc<dyn Extractor>> {
        self.extractors.iter().find(|extractor| extractor.id() == key)
    }

    pub fn supports(&self, url: &str) -> bool {
        self.extractors.iter().any(|extractor| extractor.supports(url))
    }

    /// Extract video info using the matching extractor
    pub async fn extract_info(&self, url: &str) -> Result<MediaRecord> {
        let extractor = self.find_extractor(url)?;
        extractor.extract_info(url).await
    }

    pub async fn extract_playlist(&self, url: &str) -> Result<UserProfile> {
        let extractor = self.find_extractor(url)?;
        extractor.extract_playlist(url).await
    }

    /// Resolve a listing entry with the extractor it refers to
    pub async fn resolve_entry(&self, entry: &PlaylistEntry) -> Result<MediaRecord> {
        let extractor = self
            .extractor_for_key(&entry.ie_key)
            .ok_or_else(|| ExtractorError::UnsupportedUrl(entry.url.clone()))?;
        extractor.extract_info(&entry.url).await
    }

    pub async fn get_formats(&self, url: &str) -> Result<Vec<FormatVariant>> {
        let extractor = self.find_extractor(url)?;
        extractor.get_formats(url).await
    }

    pub async fn get_direct_url(&self, url: &str, quality: &str) -> Result<String> {
        let extractor = self.find_extractor(url)?;
        extractor.get_direct_url(url, quality).await
    }
}
