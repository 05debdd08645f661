//! Markdown post parsing.
//!
//! Turns one `content/posts/<slug>.md` file into a [`Post`]: front matter is
//! split off and normalized, the body is converted to HTML.
//!
//! ## Normalization Rules
//!
//! | Field | Source | Fallback |
//! |-------|--------|----------|
//! | `slug` | filename without `.md` / `.markdown` | — |
//! | `title` | `title` | slug |
//! | `date_iso` | `date`, reformatted as `YYYY-MM-DD` | raw string, or empty |
//! | `excerpt` | `excerpt` | empty |
//! | `tags` | `tags` as a list or a comma-separated string | empty |
//!
//! Dates that cannot be parsed are not an error: the raw string is kept so
//! the post still builds and sorts somewhere predictable.

use crate::config::MarkdownConfig;
use crate::frontmatter::{self, FrontMatter, FrontmatterError};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use pulldown_cmark::{Parser, html as md_html};
use serde_yaml::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostError {
    #[error("Front matter error: {0}")]
    Frontmatter(#[from] FrontmatterError),
}

/// A blog post, built fresh from its source file on every build.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub slug: String,
    pub title: String,
    /// `YYYY-MM-DD` when the source date parsed, otherwise the raw string.
    pub date_iso: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    /// Rendered body. Trusted and inserted into the page without escaping.
    pub content_html: String,
}

const MARKDOWN_EXTENSIONS: &[&str] = &[".md", ".markdown"];

/// Length of the Markdown extension `name` ends with, compared ASCII
/// case-insensitively.
fn markdown_extension_len(name: &str) -> Option<usize> {
    let bytes = name.as_bytes();
    MARKDOWN_EXTENSIONS
        .iter()
        .find(|ext| {
            bytes.len() > ext.len()
                && bytes[bytes.len() - ext.len()..].eq_ignore_ascii_case(ext.as_bytes())
        })
        .map(|ext| ext.len())
}

/// Whether a file name has a Markdown extension (case-insensitive).
pub fn is_markdown_file(name: &str) -> bool {
    markdown_extension_len(name).is_some()
}

/// Derive the slug from a post file name, keeping its casing.
pub fn slug_from_filename(name: &str) -> String {
    match markdown_extension_len(name) {
        Some(len) => name[..name.len() - len].to_string(),
        None => name.to_string(),
    }
}

/// Parse one post from its file name and raw contents.
pub fn parse_post(
    filename: &str,
    raw: &str,
    markdown: &MarkdownConfig,
) -> Result<Post, PostError> {
    let slug = slug_from_filename(filename);
    let (meta, body) = frontmatter::split_frontmatter(raw)?;

    let title = meta.text("title").unwrap_or_else(|| slug.clone());
    let date_iso = to_iso_date(&meta.text("date").unwrap_or_default());
    let excerpt = meta.text("excerpt").unwrap_or_default();
    let tags = tags_from(&meta);
    let content_html = markdown_to_html(body, markdown);

    Ok(Post {
        slug,
        title,
        date_iso,
        excerpt,
        tags,
        content_html,
    })
}

fn tags_from(meta: &FrontMatter) -> Vec<String> {
    meta.get("tags").map(normalize_tags).unwrap_or_default()
}

/// Normalize a `tags` value into an ordered list.
///
/// - Sequence: each scalar element stringified; empty entries dropped.
/// - String: split on commas, trimmed; empty entries dropped.
pub fn normalize_tags(value: &Value) -> Vec<String> {
    match value {
        Value::Sequence(items) => items
            .iter()
            .filter_map(frontmatter::scalar_text)
            .filter(|t| !t.is_empty())
            .collect(),
        other => frontmatter::scalar_text(other)
            .map(|s| split_tags(&s))
            .unwrap_or_default(),
    }
}

/// Split a comma-separated tag string.
pub fn split_tags(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Dates
// ============================================================================

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Normalize a date string to `YYYY-MM-DD`.
///
/// Already-normalized input passes through. Anything else is tried against a
/// handful of common shapes; if none parse, the trimmed input comes back
/// unchanged.
pub fn to_iso_date(input: &str) -> String {
    let s = input.trim();
    if s.is_empty() || is_iso_date(s) {
        return s.to_string();
    }
    parse_loose_date(s)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| s.to_string())
}

/// `\d{4}-\d{2}-\d{2}` exactly.
fn is_iso_date(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter()
            .enumerate()
            .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit())
}

fn parse_loose_date(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        })
}

// ============================================================================
// Markdown
// ============================================================================

/// Convert a Markdown body to HTML. Raw HTML in the body is passed through.
pub fn markdown_to_html(body: &str, markdown: &MarkdownConfig) -> String {
    let parser = Parser::new_ext(body, markdown.options());
    let mut html = String::with_capacity(body.len() * 3 / 2);
    md_html::push_html(&mut html, parser);
    html
}
