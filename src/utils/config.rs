//! Extractor configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://rule34video.com";

/// Settings shared by the HTTP fetcher and both extractors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorSettings {
    /// Site root used to build profile and listing URLs
    pub base_url: String,

    /// User agent sent with every page request
    pub user_agent: String,

    /// Per-request timeout (seconds)
    pub request_timeout_secs: u64,

    /// Optional hard cap on listing pages walked per profile
    pub max_pages: Option<u32>,
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36".to_string(),
            request_timeout_secs: 30,
            max_pages: None,
        }
    }
}

impl ExtractorSettings {
    /// Parse settings from a JSON document; missing keys take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: ExtractorSettings = serde_json::from_str(json)?;
        Ok(settings.normalized())
    }

    /// Enforce sane minimums
    pub fn normalized(mut self) -> Self {
        if self.request_timeout_secs == 0 {
            self.request_timeout_secs = 1;
        }
        let trimmed = self.base_url.trim_end_matches('/');
        if trimmed.is_empty() {
            self.base_url = DEFAULT_BASE_URL.to_string();
        } else if trimmed.len() != self.base_url.len() {
            self.base_url = trimmed.to_string();
        }
        if self.max_pages == Some(0) {
            self.max_pages = Some(1);
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Static profile page for a member
    pub fn profile_url(&self, user_id: &str) -> String {
        format!("{}/members/{}/", self.base_url, user_id)
    }

    /// Asynchronous listing block for one page of a member's uploads
    pub fn listing_url(&self, user_id: &str, page: u32) -> String {
        format!(
            "{}/members/{}/videos/?mode=async&function=get_block&block_id=list_videos_uploaded_videos&sort_by=&from_videos={:02}",
            self.base_url, user_id, page
        )
    }
}
