//! rule34video.com extractors
//!
//! Turns video pages into [`MediaRecord`]s and member profiles into
//! [`UserProfile`]s listing every uploaded video. Downloading the media
//! itself is left to the caller.

pub mod extractor;
pub mod utils;

// Re-export main types for easier use
pub use extractor::{
    Extractor, FormatVariant, HybridExtractor, MediaRecord, PlaylistEntry, Rule34VideoExtractor,
    Rule34VideoUserExtractor, UserProfile,
};
pub use utils::{ExtractorError, ExtractorSettings};
