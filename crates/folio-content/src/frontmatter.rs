//! Frontmatter extraction and parsing.

use chrono::NaiveDate;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};

/// Date formats accepted for `pubDate`, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%b %d %Y", "%b %d, %Y", "%B %d %Y", "%B %d, %Y"];

/// Frontmatter of a blog post.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostFrontmatter {
    /// Post title (required)
    pub title: String,

    /// Short summary shown on gallery cards
    pub description: String,

    /// Publication date
    #[serde(deserialize_with = "deserialize_date")]
    pub pub_date: NaiveDate,

    /// Cover image source
    pub img_src: String,

    /// Cover image alt text
    pub img_alt: String,

    /// Drafts are excluded from the build
    #[serde(default)]
    pub draft: bool,
}

impl PostFrontmatter {
    /// Date as shown to readers, e.g. `Sep 10, 2022`.
    pub fn display_date(&self) -> String {
        self.pub_date.format("%b %-d, %Y").to_string()
    }

    /// Date in `YYYY-MM-DD` form, used for `<time datetime>` and sitemap `lastmod`.
    pub fn iso_date(&self) -> String {
        self.pub_date.format("%Y-%m-%d").to_string()
    }
}

/// Frontmatter of a standalone page (about, contact, ...).
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PageFrontmatter {
    /// Page title (required)
    pub title: String,

    /// Page description for SEO
    #[serde(default)]
    pub description: Option<String>,
}

/// Parse a date in any of the accepted formats.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| de::Error::custom(format!("unrecognized date: {raw}")))
}

/// Extract frontmatter from markdown content.
///
/// Returns the parsed frontmatter and the remaining content after the frontmatter block.
pub fn extract_frontmatter<T: DeserializeOwned>(
    source: &str,
) -> Result<(Option<T>, &str), FrontmatterError> {
    let trimmed = source.trim_start();

    if !trimmed.starts_with("---") {
        return Ok((None, source));
    }

    // Find the closing ---
    let after_open = &trimmed[3..];
    let Some(close_pos) = after_open.find("\n---") else {
        return Err(FrontmatterError::Unclosed);
    };

    let yaml_content = after_open[..close_pos].trim();
    let remaining = &after_open[close_pos + 4..];

    let frontmatter: T = serde_yaml::from_str(yaml_content)
        .map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?;

    Ok((Some(frontmatter), remaining.trim_start()))
}

/// Errors that can occur when parsing frontmatter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed frontmatter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in frontmatter: {0}")]
    InvalidYaml(String),
}
