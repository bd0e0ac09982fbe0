pub mod fetch;
pub mod hybrid;
pub mod json_ld;
pub mod models;
pub mod native;
pub mod traits;
pub mod url;

pub use fetch::HttpFetcher;
pub use hybrid::HybridExtractor;
pub use models::{FormatVariant, MediaRecord, PlaylistEntry, Thumbnail, UserProfile, AGE_LIMIT};
pub use native::{Rule34VideoExtractor, Rule34VideoUserExtractor};
pub use traits::{Extractor, ListingPage, ListingSource, PageFetcher};
