//! Member profiles and their uploaded videos

use crate::extractor::fetch::HttpFetcher;
use crate::extractor::models::{PlaylistEntry, Thumbnail, UserProfile};
use crate::extractor::native::listing::{walk_listing, MarkupListingSource};
use crate::extractor::native::rule34video::VIDEO_IE_KEY;
use crate::extractor::traits::{Extractor, ListingSource, PageFetcher};
use crate::extractor::url::{is_user_url, match_user_id};
use crate::utils::config::ExtractorSettings;
use crate::utils::html::{clean_html, html_search_regex, search_regex};
use anyhow::Result;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::info;

pub const USER_IE_KEY: &str = "Rule34VideoUser";

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<h2 class="title">\s*(.*?)\s*</h2>"#).expect("valid name regex"));
static PAGE_TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<title>([^<]+?)'s Page</title>").expect("valid page title regex"));
static AVATAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<div class="avatar">\s*<img[^>]+src="([^"]+)""#).expect("valid avatar regex")
});
static ABOUT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<div class="bottom_description">[\s\S]*?<div class="row">([\s\S]*?)</div>"#)
        .expect("valid about regex")
});

/// Identity fields read from the static profile page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDetails {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub about: Option<String>,
}

/// Extractor for `rule34video.com/members/{id}` profiles
pub struct Rule34VideoUserExtractor {
    fetcher: Arc<dyn PageFetcher>,
    listing: Arc<dyn ListingSource>,
    settings: ExtractorSettings,
}

impl Rule34VideoUserExtractor {
    pub fn new(settings: &ExtractorSettings) -> Result<Self> {
        Ok(Self::with_fetcher(Arc::new(HttpFetcher::new(settings)?), settings))
    }

    /// Profile pages and listing pages both go through `fetcher`
    pub fn with_fetcher(fetcher: Arc<dyn PageFetcher>, settings: &ExtractorSettings) -> Self {
        let settings = settings.clone().normalized();
        let listing = Arc::new(MarkupListingSource::new(fetcher.clone(), settings.clone()));
        Self::with_sources(fetcher, listing, &settings)
    }

    /// Use a separate listing source, e.g. one that does not parse markup
    pub fn with_sources(
        fetcher: Arc<dyn PageFetcher>,
        listing: Arc<dyn ListingSource>,
        settings: &ExtractorSettings,
    ) -> Self {
        Self {
            fetcher,
            listing,
            settings: settings.clone().normalized(),
        }
    }
}

#[async_trait]
impl Extractor for Rule34VideoUserExtractor {
    fn id(&self) -> &'static str {
        USER_IE_KEY
    }

    fn supports(&self, url: &str) -> bool {
        is_user_url(url)
    }

    async fn extract_playlist(&self, url: &str) -> Result<UserProfile> {
        let user_id = match_user_id(url)?;

        let profile_url = self.settings.profile_url(&user_id);
        info!("Extracting profile of user {} from {}", user_id, profile_url);
        let profile_page = self.fetcher.fetch_page(&profile_url).await?;
        let details = parse_profile_page(&profile_page);

        let walk = walk_listing(self.listing.as_ref(), &user_id, self.settings.max_pages).await;
        info!(
            "User {}: {} videos over {} pages ({:?})",
            user_id,
            walk.entries.len(),
            walk.pages_fetched,
            walk.stop_reason
        );

        Ok(build_profile(&user_id, details, walk.entries))
    }
}

/// Read name, avatar and biography from a profile page
pub fn parse_profile_page(page: &str) -> ProfileDetails {
    let name = html_search_regex(&NAME_RE, page).or_else(|| html_search_regex(&PAGE_TITLE_RE, page));
    let about = search_regex(&ABOUT_RE, page)
        .map(|about| clean_html(&about))
        .filter(|about| !about.is_empty());

    ProfileDetails {
        name,
        avatar: search_regex(&AVATAR_RE, page),
        about,
    }
}

fn build_profile(user_id: &str, details: ProfileDetails, videos: Vec<String>) -> UserProfile {
    UserProfile {
        id: user_id.to_string(),
        title: details.name.clone(),
        uploader: details.name,
        uploader_id: user_id.to_string(),
        description: details.about,
        thumbnails: details
            .avatar
            .into_iter()
            .map(|url| Thumbnail { url })
            .collect(),
        entries: videos
            .into_iter()
            .map(|url| PlaylistEntry {
                url,
                ie_key: VIDEO_IE_KEY.to_string(),
            })
            .collect(),
    }
}
