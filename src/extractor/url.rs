//! URL shapes handled by the rule34video extractors

use crate::utils::error::ExtractorError;
use once_cell::sync::Lazy;
use regex::Regex;

static VIDEO_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(?:www\.)?rule34video\.com/videos?/(?P<id>\d+)")
        .expect("valid video url regex")
});

static USER_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^https?://(?:www\.)?rule34video\.com/members/(?P<id>\d+)(?:/(?:videos|favourites/videos|playlists)/?)?",
    )
    .expect("valid user url regex")
});

pub fn is_video_url(url: &str) -> bool {
    VIDEO_URL_RE.is_match(url)
}

pub fn is_user_url(url: &str) -> bool {
    USER_URL_RE.is_match(url)
}

/// Numeric video id of a video page URL
pub fn match_video_id(url: &str) -> Result<String, ExtractorError> {
    match_id(&VIDEO_URL_RE, url)
}

/// Numeric member id of a profile URL
pub fn match_user_id(url: &str) -> Result<String, ExtractorError> {
    match_id(&USER_URL_RE, url)
}

fn match_id(re: &Regex, url: &str) -> Result<String, ExtractorError> {
    re.captures(url)
        .and_then(|caps| caps.name("id"))
        .map(|id| id.as_str().to_string())
        .ok_or_else(|| ExtractorError::InvalidUrl(url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_video_id() {
        assert_eq!(
            match_video_id("https://rule34video.com/video/3065157/shot-it-mmd-hmv/").unwrap(),
            "3065157"
        );
        assert_eq!(
            match_video_id("https://www.rule34video.com/videos/3065296/lara-in-trouble/").unwrap(),
            "3065296"
        );
        assert!(matches!(
            match_video_id("https://rule34video.com/video/abc/"),
            Err(ExtractorError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_match_user_id() {
        assert_eq!(
            match_user_id("https://rule34video.com/members/1613548/").unwrap(),
            "1613548"
        );
        assert_eq!(
            match_user_id("https://rule34video.com/members/1613548/favourites/videos/").unwrap(),
            "1613548"
        );
        assert!(match_user_id("https://rule34video.com/video/1/").is_err());
    }

    #[test]
    fn test_url_shapes_do_not_overlap() {
        let video = "https://rule34video.com/video/3065157/shot-it/";
        let user = "https://rule34video.com/members/22119/";
        assert!(is_video_url(video) && !is_user_url(video));
        assert!(is_user_url(user) && !is_video_url(user));
        assert!(!is_video_url("https://example.com/video/1/"));
    }
}
