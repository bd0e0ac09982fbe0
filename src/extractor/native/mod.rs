pub mod listing;
pub mod rule34video;
pub mod rule34video_user;

pub use rule34video::{Rule34VideoExtractor, VIDEO_IE_KEY};
pub use rule34video_user::{Rule34VideoUserExtractor, USER_IE_KEY};
