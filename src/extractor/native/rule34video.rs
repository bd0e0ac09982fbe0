//! Single video pages on rule34video.com

use crate::extractor::fetch::HttpFetcher;
use crate::extractor::json_ld::search_json_ld;
use crate::extractor::models::{FormatVariant, MediaRecord, AGE_LIMIT};
use crate::extractor::traits::{Extractor, PageFetcher};
use crate::extractor::url::{is_video_url, match_video_id};
use crate::utils::config::ExtractorSettings;
use crate::utils::html::{
    child_by_class, children_by_class, element_by_attribute, element_text,
    elements_by_class, html_search_regex, parse_count, parse_duration, search_regex,
    unescape_html,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use std::sync::Arc;
use tracing::{debug, info};

pub const VIDEO_IE_KEY: &str = "Rule34Video";

static FORMAT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"<a[^>]+href="(?P<video_url>[^"]+download=true[^"]+)".*>(?P<ext>[^\s]+) (?P<quality>[^<]+)p</a>"#,
    )
    .expect("valid format regex")
});
static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid title regex"));
static THUMBNAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"preview_url:\s+'([^']+)'").expect("valid thumbnail regex"));
static DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""icon-clock"></i>\s+<span>((?:\d+:?)+)"#).expect("valid duration regex")
});
static VIEWS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""icon-eye"></i>\s+<span>([ \d]+)"#).expect("valid views regex")
});
static COMMENTS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^(]+\((\d+)\)").expect("valid comment count regex"));
static TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"<a class="tag_item"[^>]+\bhref="https://rule34video\.com/tags/\d+/"[^>]*>(?P<tag>[^>]*)</a>"#,
    )
    .expect("valid tag regex")
});
static MEMBER_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/members/(\d+)").expect("valid member id regex"));

/// Labels of the side-panel blocks that carry metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PanelLabel {
    Categories,
    Artist,
    UploadedBy,
}

impl PanelLabel {
    /// Exact, case-sensitive match; unknown labels are ignored
    fn from_label(label: &str) -> Option<Self> {
        match label {
            "Categories" => Some(Self::Categories),
            "Artist" => Some(Self::Artist),
            "Uploaded by" => Some(Self::UploadedBy),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct SidePanel {
    categories: Vec<String>,
    creators: Vec<String>,
    uploader: Option<String>,
    uploader_url: Option<String>,
}

/// Extractor for `rule34video.com/video(s)/{id}` pages
pub struct Rule34VideoExtractor {
    fetcher: Arc<dyn PageFetcher>,
}

impl Rule34VideoExtractor {
    pub fn new(settings: &ExtractorSettings) -> Result<Self> {
        Ok(Self::with_fetcher(Arc::new(HttpFetcher::new(settings)?)))
    }

    pub fn with_fetcher(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl Extractor for Rule34VideoExtractor {
    fn id(&self) -> &'static str {
        VIDEO_IE_KEY
    }

    fn supports(&self, url: &str) -> bool {
        is_video_url(url)
    }

    async fn extract_info(&self, url: &str) -> Result<MediaRecord> {
        let video_id = match_video_id(url)?;
        info!("Extracting video {} from {}", video_id, url);

        let webpage = self.fetcher.fetch_page(url).await?;
        let record = parse_video_page(&webpage, &video_id, url);

        debug!(
            "Video {}: {} formats, {} tags",
            video_id,
            record.formats.len(),
            record.tags.len()
        );
        Ok(record)
    }
}

/// Build the metadata record for an already downloaded video page.
///
/// Never fails: fields the page does not expose are left empty.
pub fn parse_video_page(webpage: &str, video_id: &str, url: &str) -> MediaRecord {
    let document = Html::parse_document(webpage);
    let linked = search_json_ld(&document);
    let panel = parse_side_panel(&document);

    let timestamp = linked.timestamp;
    let uploader_id = panel
        .uploader_url
        .as_deref()
        .and_then(|href| search_regex(&MEMBER_ID_RE, href));

    MediaRecord {
        id: video_id.to_string(),
        title: html_search_regex(&TITLE_RE, webpage).or(linked.title),
        webpage_url: url.to_string(),
        formats: parse_formats(webpage),
        thumbnail: search_regex(&THUMBNAIL_RE, webpage).or(linked.thumbnail),
        // Display text only
        duration: search_regex(&DURATION_RE, webpage).and_then(|d| parse_duration(&d)),
        timestamp,
        upload_date: timestamp.and_then(upload_date),
        view_count: search_regex(&VIEWS_RE, webpage)
            .and_then(|views| views.replace(' ', "").parse().ok()),
        like_count: elements_by_class(&document, "voters count")
            .first()
            .and_then(|el| parse_count(&element_text(el)))
            .or(linked.like_count),
        comment_count: element_by_attribute(&document, "href", "#tab_comments")
            .and_then(|el| search_regex(&COMMENTS_RE, &el.inner_html()))
            .and_then(|count| count.parse().ok())
            .or(linked.comment_count),
        description: linked.description,
        uploader: panel.uploader,
        uploader_id,
        uploader_url: panel.uploader_url,
        categories: panel.categories,
        creators: panel.creators,
        tags: parse_tags(webpage),
        age_limit: AGE_LIMIT,
        extractor: VIDEO_IE_KEY.to_string(),
    }
}

/// Download anchors in markup order, duplicates included
pub fn parse_formats(webpage: &str) -> Vec<FormatVariant> {
    FORMAT_RE
        .captures_iter(webpage)
        .map(|caps| FormatVariant {
            url: unescape_html(&caps["video_url"]),
            ext: caps["ext"].to_lowercase(),
            quality: caps["quality"].to_string(),
        })
        .collect()
}

/// Tag link texts in markup order, entities decoded, duplicates included
pub fn parse_tags(webpage: &str) -> Vec<String> {
    TAG_RE
        .captures_iter(webpage)
        .map(|caps| unescape_html(&caps["tag"]))
        .collect()
}

fn parse_side_panel(document: &Html) -> SidePanel {
    let mut panel = SidePanel::default();

    for col in elements_by_class(document, "col") {
        let label = child_by_class(&col, "label")
            .map(|el| element_text(&el))
            .unwrap_or_default();

        // Later blocks with the same label replace earlier ones
        match PanelLabel::from_label(&label) {
            Some(PanelLabel::Categories) => {
                panel.categories = item_texts(&col);
            }
            Some(PanelLabel::Artist) => {
                panel.creators = item_texts(&col);
            }
            Some(PanelLabel::UploadedBy) => {
                let anchor = child_by_class(&col, "item btn_link");
                panel.uploader = anchor
                    .map(|el| element_text(&el))
                    .filter(|name| !name.is_empty());
                panel.uploader_url = anchor
                    .and_then(|el| el.value().attr("href"))
                    .map(str::to_string);
            }
            None => {}
        }
    }

    panel
}

fn item_texts(col: &scraper::ElementRef<'_>) -> Vec<String> {
    children_by_class(col, "item")
        .iter()
        .map(element_text)
        .collect()
}

fn upload_date(timestamp: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp(timestamp, 0).map(|dt| dt.format("%Y%m%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIDEO_PAGE: &str = r##"<!DOCTYPE html>
<html>
<head>
<title>Shot It-(mmd hmv)</title>
<script type="application/ld+json">
{"@context": "https://schema.org", "@type": "VideoObject", "name": "Ignored title",
 "description": "https://discord.gg/aBqPrHSHvv", "uploadDate": "2021-12-19", "duration": "PT9M",
 "interactionStatistic": [{"interactionType": "http://schema.org/WatchAction", "userInteractionCount": 1}]}
</script>
</head>
<body>
<script>var flashvars = { preview_url: 'https://rule34video.com/contents/videos_screenshots/3065000/3065157/preview.jpg' };</script>
<div class="item_info"><i class="icon-clock"></i> <span>5:47</span></div>
<div class="item_info"><i class="icon-eye"></i> <span>12 345</span></div>
<span class="voters count">1.2K</span>
<a href="#tab_comments">Comments (7)</a>
<div class="cols">
  <div class="col"><div class="label">Categories</div><a class="item" href="/c/3d">3D</a><a class="item" href="/c/mmd">MMD</a><a class="item" href="/c/iwara">iwara</a></div>
  <div class="col"><div class="label">Artist</div><a class="item" href="/a/w">WildeerStudio</a></div>
  <div class="col"><div class="label">Uploaded by</div><a class="item btn_link" href="https://rule34video.com/members/22119/"><img src="a.jpg"> Sweet HMV</a></div>
  <div class="col"><div class="label">categories</div><a class="item" href="/c/x">Lowercase label</a></div>
</div>
<div class="wrap"><a href="https://rule34video.com/get_file/1/abc/3065157_480p.mp4/?download=true&amp;download_filename=shot.mp4" class="tag_item">MP4 480p</a></div>
<div class="wrap"><a href="https://rule34video.com/get_file/1/abc/3065157_1080p.mp4/?download=true&amp;download_filename=shot.mp4" class="tag_item">MP4 1080p</a></div>
<a class="tag_item" href="https://rule34video.com/tags/1/">mmd</a>
<a class="tag_item" href="https://rule34video.com/tags/2/">Tom &amp; Jerry</a>
<a class="tag_item" href="https://rule34video.com/tags/1/">mmd</a>
<a class="tag_item" href="https://example.com/tags/3/">offsite</a>
</body>
</html>"##;

    const URL: &str = "https://rule34video.com/video/3065157/shot-it-mmd-hmv/";

    #[test]
    fn test_parse_video_page_fields() {
        let record = parse_video_page(VIDEO_PAGE, "3065157", URL);

        assert_eq!(record.id, "3065157");
        assert_eq!(record.title.as_deref(), Some("Shot It-(mmd hmv)"));
        assert_eq!(record.duration, Some(347.0));
        assert_eq!(record.view_count, Some(12_345));
        assert_eq!(record.like_count, Some(1_200));
        assert_eq!(record.comment_count, Some(7));
        assert_eq!(record.timestamp, Some(1639872000));
        assert_eq!(record.upload_date.as_deref(), Some("20211219"));
        assert_eq!(record.description.as_deref(), Some("https://discord.gg/aBqPrHSHvv"));
        assert_eq!(
            record.thumbnail.as_deref(),
            Some("https://rule34video.com/contents/videos_screenshots/3065000/3065157/preview.jpg")
        );
        assert_eq!(record.age_limit, 18);
        assert_eq!(record.extractor, VIDEO_IE_KEY);
    }

    #[test]
    fn test_side_panel_blocks() {
        let record = parse_video_page(VIDEO_PAGE, "3065157", URL);

        assert_eq!(record.categories, vec!["3D", "MMD", "iwara"]);
        assert_eq!(record.creators, vec!["WildeerStudio"]);
        assert_eq!(record.uploader.as_deref(), Some("Sweet HMV"));
        assert_eq!(
            record.uploader_url.as_deref(),
            Some("https://rule34video.com/members/22119/")
        );
        assert_eq!(record.uploader_id.as_deref(), Some("22119"));
    }

    #[test]
    fn test_last_block_with_same_label_wins() {
        let page = r#"<div class="col"><div class="label">Categories</div><a class="item">First</a></div>
<div class="col"><div class="label">Categories</div><a class="item">Second</a><a class="item">Third</a></div>"#;
        let record = parse_video_page(page, "1", URL);
        assert_eq!(record.categories, vec!["Second", "Third"]);
    }

    #[test]
    fn test_formats() {
        let formats = parse_formats(VIDEO_PAGE);
        assert_eq!(formats.len(), 2);
        assert_eq!(formats[0].ext, "mp4");
        assert_eq!(formats[0].quality, "480");
        assert_eq!(formats[1].quality, "1080");
        assert!(formats[1].url.contains("?download=true&download_filename=shot.mp4"));
    }

    #[test]
    fn test_format_url_keeps_bare_ampersands() {
        let page = r#"<a href="https://rule34video.com/get_file/1/abc/1_720p.mp4/?download=true&timestamp=1&para=2&amp;br=900">MP4 720p</a>"#;
        let formats = parse_formats(page);
        assert_eq!(formats.len(), 1);
        assert_eq!(
            formats[0].url,
            "https://rule34video.com/get_file/1/abc/1_720p.mp4/?download=true&timestamp=1&para=2&br=900"
        );
        assert_eq!(formats[0].quality, "720");
    }

    #[test]
    fn test_tags_keep_order_and_duplicates() {
        assert_eq!(parse_tags(VIDEO_PAGE), vec!["mmd", "Tom & Jerry", "mmd"]);
    }

    #[test]
    fn test_bare_page_degrades_to_empty_fields() {
        let record = parse_video_page("<html><body></body></html>", "42", URL);

        assert_eq!(record.id, "42");
        assert!(record.formats.is_empty());
        assert!(record.title.is_none());
        assert!(record.duration.is_none());
        assert!(record.view_count.is_none());
        assert!(record.uploader.is_none());
        assert!(record.categories.is_empty());
        assert!(record.tags.is_empty());
        assert_eq!(record.age_limit, AGE_LIMIT);
    }

    #[test]
    fn test_duration_ignores_linked_data() {
        let page = r#"<script type="application/ld+json">{"@type": "VideoObject", "duration": "PT9M", "name": "LD"}</script>"#;
        let record = parse_video_page(page, "1", URL);
        assert_eq!(record.duration, None);
        assert_eq!(record.view_count, None);
        assert_eq!(record.title.as_deref(), Some("LD"));
    }

    #[test]
    fn test_like_count_rejects_percentages() {
        let page = r#"<span class="voters count">95%</span>"#;
        assert_eq!(parse_video_page(page, "1", URL).like_count, None);

        let page = r#"<span class="voters count">1,234 members</span>"#;
        assert_eq!(parse_video_page(page, "1", URL).like_count, Some(1234));
    }

    #[test]
    fn test_panel_label_matching_is_exact() {
        assert_eq!(PanelLabel::from_label("Categories"), Some(PanelLabel::Categories));
        assert_eq!(PanelLabel::from_label("Uploaded by"), Some(PanelLabel::UploadedBy));
        assert_eq!(PanelLabel::from_label("categories"), None);
        assert_eq!(PanelLabel::from_label("Uploaded By"), None);
    }
}
