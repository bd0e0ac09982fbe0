//! Linked-data (JSON-LD `VideoObject`) fallback values

use crate::utils::html::unescape_html;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

/// Linked-data values the record falls back on; every field is optional
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkedVideoData {
    pub title: Option<String>,
    pub description: Option<String>,
    pub timestamp: Option<i64>,
    pub thumbnail: Option<String>,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
}

/// Find the first `VideoObject` in the document's ld+json blocks.
///
/// Malformed blocks are skipped; a page without usable linked data yields
/// the empty default.
pub fn search_json_ld(document: &Html) -> LinkedVideoData {
    let Ok(selector) = Selector::parse(r#"script[type="application/ld+json"]"#) else {
        return LinkedVideoData::default();
    };

    for script in document.select(&selector) {
        let raw: String = script.text().collect();
        let value: Value = match serde_json::from_str(raw.trim()) {
            Ok(value) => value,
            Err(e) => {
                debug!("Skipping malformed ld+json block: {}", e);
                continue;
            }
        };
        if let Some(video) = find_video_object(&value) {
            return linked_video_data(video);
        }
    }

    LinkedVideoData::default()
}

fn find_video_object(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(items) => items.iter().find_map(find_video_object),
        Value::Object(map) => {
            if is_type(value, "VideoObject") {
                return Some(value);
            }
            map.get("@graph").and_then(find_video_object)
        }
        _ => None,
    }
}

fn is_type(value: &Value, expected: &str) -> bool {
    match value.get("@type") {
        Some(Value::String(kind)) => kind == expected,
        Some(Value::Array(kinds)) => kinds.iter().any(|k| k.as_str() == Some(expected)),
        _ => false,
    }
}

fn linked_video_data(video: &Value) -> LinkedVideoData {
    let mut data = LinkedVideoData {
        title: string_field(video, "name").map(|s| unescape_html(&s)),
        description: string_field(video, "description").map(|s| unescape_html(&s)),
        timestamp: string_field(video, "uploadDate").and_then(|d| parse_timestamp(&d)),
        thumbnail: thumbnail_url(video),
        ..Default::default()
    };

    let stats: Vec<&Value> = match video.get("interactionStatistic") {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(item @ Value::Object(_)) => vec![item],
        _ => Vec::new(),
    };
    for stat in stats {
        let Some(count) = stat.get("userInteractionCount").and_then(count_value) else {
            continue;
        };
        match interaction_kind(stat).as_deref() {
            Some("LikeAction") => data.like_count = Some(count),
            Some("CommentAction") => data.comment_count = Some(count),
            _ => {}
        }
    }

    data
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn thumbnail_url(video: &Value) -> Option<String> {
    match video.get("thumbnailUrl")? {
        Value::String(url) => Some(url.clone()),
        Value::Array(urls) => urls.iter().find_map(|u| u.as_str().map(str::to_string)),
        _ => None,
    }
}

fn count_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// `interactionType` may be a bare name, a schema.org URL or an object with `@type`
fn interaction_kind(stat: &Value) -> Option<String> {
    let raw = match stat.get("interactionType")? {
        Value::String(kind) => kind.clone(),
        kind @ Value::Object(_) => kind.get("@type")?.as_str()?.to_string(),
        _ => return None,
    };
    Some(raw.rsplit('/').next().unwrap_or_default().to_string())
}

/// Unix timestamp for RFC 3339 datetimes, naive datetimes (as UTC) and plain dates
pub fn parse_timestamp(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp());
    }
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(dt.timestamp());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc().timestamp());
    }
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp())
}
