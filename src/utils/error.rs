//! Error handling for the rule34video extractors

use thiserror::Error;

/// Fatal extraction errors.
///
/// Field-level misses are never reported through this type; they surface as
/// `None` or empty lists on the extracted records.
#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("Failed to download webpage {url}: {reason}")]
    PageFetch { url: String, reason: String },

    #[error("HTTP {status} while downloading {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Invalid URL (no numeric id found): {0}")]
    InvalidUrl(String),

    #[error("No extractor registered for URL: {0}")]
    UnsupportedUrl(String),

    #[error("{operation} is not supported by {extractor}")]
    NotSupported {
        extractor: &'static str,
        operation: &'static str,
    },

    #[error("No format with quality {quality} for {url}")]
    FormatNotFound { url: String, quality: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
