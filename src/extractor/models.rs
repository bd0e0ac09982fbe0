//! Data structures for extracted media and uploader listings

use serde::{Deserialize, Serialize};

/// Content rating applied to every video on the site
pub const AGE_LIMIT: u8 = 18;

/// Metadata record for a single video page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRecord {
    /// Numeric video id taken from the page URL
    pub id: String,
    pub title: Option<String>,
    pub webpage_url: String,
    #[serde(default)]
    pub formats: Vec<FormatVariant>,
    pub thumbnail: Option<String>,
    /// Duration in seconds
    pub duration: Option<f64>,
    /// Upload time as a unix timestamp
    pub timestamp: Option<i64>,
    /// Upload day as `YYYYMMDD` (UTC)
    pub upload_date: Option<String>,
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
    pub description: Option<String>,
    pub uploader: Option<String>,
    pub uploader_id: Option<String>,
    pub uploader_url: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub creators: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub age_limit: u8,
    pub extractor: String,
}

/// One downloadable variant linked from the video page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatVariant {
    pub url: String,
    /// Lower-cased container extension (e.g. `mp4`)
    pub ext: String,
    /// Quality label as shown on the page (e.g. `720`)
    pub quality: String,
}

/// A video discovered while walking an uploader listing.
///
/// The entry only references the video; resolving it is left to the
/// extractor registered under `ie_key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub url: String,
    pub ie_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

/// Uploader profile plus every video the uploader published
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    /// Display name; `None` when the profile page does not expose one
    pub title: Option<String>,
    pub uploader: Option<String>,
    pub uploader_id: String,
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnails: Vec<Thumbnail>,
    #[serde(default)]
    pub entries: Vec<PlaylistEntry>,
}

impl UserProfile {
    /// Avatar URL, if the profile page had one
    pub fn avatar(&self) -> Option<&str> {
        self.thumbnails.first().map(|thumb| thumb.url.as_str())
    }

    /// Video URLs in discovery order
    pub fn video_urls(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.url.as_str())
    }
}
