//! Story and article models for the `/api/stories` contract.
//!
//! Contains the wire structures, the comparable-story filter and the
//! display helpers used by the story cards.

use chrono::{DateTime, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Minimum number of contributing articles for a story to be shown.
///
/// Single-source stories carry nothing to compare against.
pub const MIN_ARTICLES_PER_STORY: usize = 2;

static MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("markup pattern is a valid regex"));

/// A single article as published by one outlet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Article {
    /// Unique article ID (selection key only)
    pub id: String,
    /// Short source code, e.g. "bbc"
    pub source: String,
    /// Article headline
    pub headline: String,
    /// Article summary, may contain inline markup
    pub summary: String,
    /// Link to the full article
    pub url: String,
    /// Publication timestamp as sent by the backend
    pub published_at: String,
    /// Editorial bias in [-1, 1], negative is left
    pub bias_score: f64,
}

impl Article {
    /// Summary with inline markup removed.
    ///
    /// # Returns
    /// * `Option<String>` - Stripped summary, or None when there is nothing to show
    pub fn display_summary(&self) -> Option<String> {
        if self.summary.is_empty() {
            return None;
        }
        let stripped = strip_markup(&self.summary);
        if stripped.trim().is_empty() {
            None
        } else {
            Some(stripped)
        }
    }

    /// Format the publication date as a readable string.
    ///
    /// # Returns
    /// * `String` - Formatted date (e.g., "Mon 15 Jan 2024 09:30"), or the raw value if unparseable
    ///
    /// # Details
    /// Accepts RFC 3339 as well as the naive `YYYY-MM-DDTHH:MM:SS` and
    /// `YYYY-MM-DD HH:MM:SS` forms the backend emits.
    pub fn format_published(&self) -> String {
        let raw = self.published_at.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return dt.format("%a %d %b %Y %H:%M").to_string();
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|dt| dt.format("%a %d %b %Y %H:%M").to_string())
            .unwrap_or_else(|| raw.to_string())
    }
}

/// A topic with the articles covering it across outlets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Story {
    /// Story ID
    pub story_id: String,
    /// Topic line shown as the card title
    pub topic: String,
    /// Contributing articles
    pub articles: Vec<Article>,
}

/// Response body of `GET /api/stories`.
#[derive(Debug, Default, Deserialize)]
pub struct StoriesResponse {
    /// Story groups; absent or null means none
    #[serde(default)]
    pub stories: Option<Vec<Story>>,
}

/// Parse a stories document.
///
/// # Arguments
/// * `body` - Raw JSON response body
///
/// # Returns
/// * `Result<Vec<Story>, serde_json::Error>` - Parsed stories or a parse error
///
/// # Details
/// Accepts both `{ "stories": [...] }` and a bare array of stories.
/// A missing or null `stories` field is an empty list.
pub fn parse_stories(body: &str) -> Result<Vec<Story>, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    if value.is_array() {
        return serde_json::from_value(value);
    }
    let response: StoriesResponse = serde_json::from_value(value)?;
    Ok(response.stories.unwrap_or_default())
}

/// Keep only stories that can be compared across sources.
///
/// # Arguments
/// * `stories` - All fetched stories
///
/// # Returns
/// * `Vec<Story>` - Stories with at least [`MIN_ARTICLES_PER_STORY`] articles, order preserved
pub fn filter_comparable(stories: Vec<Story>) -> Vec<Story> {
    stories
        .into_iter()
        .filter(|story| story.articles.len() >= MIN_ARTICLES_PER_STORY)
        .collect()
}

/// Remove every `<...>` run from text.
pub fn strip_markup(text: &str) -> String {
    MARKUP.replace_all(text, "").into_owned()
}

#[cfg(test)]
pub(crate) fn test_article(id: &str, source: &str, bias_score: f64) -> Article {
    Article {
        id: id.to_string(),
        source: source.to_string(),
        headline: format!("Headline {}", id),
        summary: format!("Summary {}", id),
        url: format!("https://example.com/{}", id),
        published_at: "2024-01-15T09:30:00".to_string(),
        bias_score,
    }
}

#[cfg(test)]
pub(crate) fn test_story(id: &str, article_count: usize) -> Story {
    Story {
        story_id: id.to_string(),
        topic: format!("Topic {}", id),
        articles: (0..article_count)
            .map(|i| test_article(&format!("{}-{}", id, i), "bbc", 0.0))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markup() {
        assert_eq!(strip_markup("<b>Breaking</b> news"), "Breaking news");
        assert_eq!(strip_markup("<p>a <a href=\"x\">link</a></p>"), "a link");
        assert_eq!(strip_markup("no markup"), "no markup");
        assert_eq!(strip_markup("1 < 2 and 3 > 2"), "1  2");
    }

    #[test]
    fn test_display_summary() {
        let mut article = test_article("a", "bbc", 0.0);
        article.summary = "<b>Breaking</b> news".to_string();
        assert_eq!(article.display_summary().as_deref(), Some("Breaking news"));

        article.summary = String::new();
        assert_eq!(article.display_summary(), None);

        article.summary = "<img src=\"x.jpg\">".to_string();
        assert_eq!(article.display_summary(), None);
    }

    #[test]
    fn test_filter_boundary() {
        let stories = vec![test_story("one", 1), test_story("two", 2), test_story("three", 3)];
        let filtered = filter_comparable(stories);
        let ids: Vec<&str> = filtered.iter().map(|s| s.story_id.as_str()).collect();
        assert_eq!(ids, vec!["two", "three"]);
    }

    #[test]
    fn test_parse_wrapped_and_bare() {
        let body = r#"{"stories": [{"story_id": "s1", "topic": "t", "articles": [
            {"id": "a", "source": "bbc", "headline": "h", "summary": "", "url": "u",
             "published_at": "2024-01-15T09:30:00", "bias_score": -0.2}
        ]}]}"#;
        let stories = parse_stories(body).unwrap();
        assert_eq!(stories.len(), 1);
        assert_eq!(stories[0].articles[0].bias_score, -0.2);

        let bare = r#"[{"story_id": "s1", "topic": "t", "articles": []}]"#;
        assert_eq!(parse_stories(bare).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_missing_stories_is_empty() {
        assert!(parse_stories("{}").unwrap().is_empty());
        assert!(parse_stories(r#"{"other": 1}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_null_stories_is_empty() {
        assert!(parse_stories(r#"{"stories": null}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_missing_bias_score_fails() {
        let body = r#"{"stories": [{"story_id": "s1", "topic": "t", "articles": [
            {"id": "a", "source": "bbc", "headline": "h", "summary": "", "url": "u",
             "published_at": "2024-01-15T09:30:00"}
        ]}]}"#;
        assert!(parse_stories(body).is_err());
        assert!(parse_stories("not json").is_err());
    }

    #[test]
    fn test_format_published() {
        let mut article = test_article("a", "bbc", 0.0);
        assert_eq!(article.format_published(), "Mon 15 Jan 2024 09:30");

        article.published_at = "2024-01-15 09:30:00".to_string();
        assert_eq!(article.format_published(), "Mon 15 Jan 2024 09:30");

        article.published_at = "2024-01-15T09:30:00+00:00".to_string();
        assert_eq!(article.format_published(), "Mon 15 Jan 2024 09:30");

        article.published_at = "yesterday".to_string();
        assert_eq!(article.format_published(), "yesterday");
    }
}
