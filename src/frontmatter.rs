//! Front-matter splitting for Markdown posts.
//!
//! A post may start with a YAML block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Hi
//! date: 2024-1-5
//! tags: [a, b]
//! ---
//! # Hello
//! ```
//!
//! Files without the fence are all body and get empty metadata.

use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("Invalid YAML front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

static FRONTMATTER_REGEX: OnceLock<Regex> = OnceLock::new();

fn frontmatter_regex() -> &'static Regex {
    FRONTMATTER_REGEX.get_or_init(|| {
        Regex::new(r"(?s)\A---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n(.*))?\z")
            .expect("front matter pattern is valid")
    })
}

/// Metadata block of a post. Keys are kept as written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    fields: Mapping,
}

impl FrontMatter {
    /// Raw value for `key`, if present and not null.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    /// Scalar value for `key` rendered as text.
    ///
    /// Strings, numbers and booleans are stringified. Empty strings and
    /// `false` count as absent so callers can fall back to a default.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(true) => Some("true".to_string()),
            Value::Tagged(tagged) => scalar_text(&tagged.value),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Stringify a YAML scalar; sequences and mappings yield `None`.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        _ => None,
    }
}

/// Split `content` into front matter and body.
///
/// Returns empty metadata and the whole input when no fence is present. A
/// fenced block that is not a YAML mapping also yields empty metadata.
pub fn split_frontmatter(content: &str) -> Result<(FrontMatter, &str), FrontmatterError> {
    let Some(captures) = frontmatter_regex().captures(content) else {
        return Ok((FrontMatter::default(), content));
    };

    let yaml = captures.get(1).map_or("", |m| m.as_str());
    let body = captures.get(2).map_or("", |m| m.as_str());

    let fields = match serde_yaml::from_str::<Value>(yaml)? {
        Value::Mapping(map) => map,
        _ => Mapping::new(),
    };

    Ok((FrontMatter { fields }, body))
}
