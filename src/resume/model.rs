//! Resume document model.
//!
//! `content/resume.json` is hand-edited, so parsing is forgiving: a missing
//! or wrongly-typed subtree becomes its empty default, list elements of the
//! wrong shape become default elements, and text fields accept numbers and
//! booleans. Only malformed JSON is an error.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResumeDocument {
    #[serde(deserialize_with = "lenient::object")]
    pub hero: Hero,
    #[serde(deserialize_with = "lenient::list")]
    pub summary: Vec<SummaryItem>,
    #[serde(deserialize_with = "lenient::list")]
    pub values: Vec<ValueCard>,
    #[serde(deserialize_with = "lenient::list")]
    pub skills: Vec<SkillGroup>,
    #[serde(deserialize_with = "lenient::list")]
    pub career: Vec<CareerEntry>,
    #[serde(deserialize_with = "lenient::list")]
    pub projects: Vec<Project>,
    #[serde(deserialize_with = "lenient::object")]
    pub education: Education,
}

impl ResumeDocument {
    /// Parse resume JSON. A top-level value that is not an object yields an
    /// empty document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        match serde_json::from_str::<Value>(json)? {
            value @ Value::Object(_) => serde_json::from_value(value),
            _ => Ok(Self::default()),
        }
    }

    /// Project ids that appear more than once, in first-seen order.
    pub fn duplicate_project_ids(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut duplicates = Vec::new();
        for id in self.projects.iter().map(|p| &p.id).filter(|id| !id.is_empty()) {
            if !seen.insert(id.as_str()) && !duplicates.contains(id) {
                duplicates.push(id.clone());
            }
        }
        duplicates
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Hero {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub subtitle: String,
    #[serde(deserialize_with = "lenient::text")]
    pub badge: String,
    #[serde(deserialize_with = "lenient::text")]
    pub github: String,
    #[serde(deserialize_with = "lenient::text")]
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SummaryItem {
    #[serde(deserialize_with = "lenient::text")]
    pub text: String,
    #[serde(deserialize_with = "lenient::text")]
    pub highlight: String,
    /// Trailing clause after the highlight.
    #[serde(deserialize_with = "lenient::text")]
    pub after: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ValueCard {
    #[serde(deserialize_with = "lenient::text")]
    pub emoji: String,
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SkillGroup {
    #[serde(deserialize_with = "lenient::text")]
    pub group: String,
    #[serde(deserialize_with = "lenient::texts")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CareerEntry {
    #[serde(deserialize_with = "lenient::text")]
    pub company: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::text")]
    pub period: String,
    #[serde(deserialize_with = "lenient::text")]
    pub duration: String,
    #[serde(deserialize_with = "lenient::flag")]
    pub current: bool,
    #[serde(deserialize_with = "lenient::list")]
    pub keywords: Vec<Keyword>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Keyword {
    #[serde(deserialize_with = "lenient::text")]
    pub text: String,
    /// `purple`, `orange`, anything else renders blue.
    #[serde(deserialize_with = "lenient::text")]
    pub color: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Project {
    /// Key into the project details table; also `data-detail` on the card.
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub subtitle: String,
    #[serde(deserialize_with = "lenient::text")]
    pub period: String,
    #[serde(deserialize_with = "lenient::texts")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "lenient::texts")]
    pub highlights: Vec<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::text")]
    pub detail_title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub detail_content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Education {
    #[serde(deserialize_with = "lenient::text")]
    pub school: String,
    #[serde(deserialize_with = "lenient::text")]
    pub period: String,
    #[serde(deserialize_with = "lenient::text")]
    pub major: String,
}

/// Deserializers that degrade instead of failing.
mod lenient {
    use super::*;

    fn value_text(value: Value) -> String {
        match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => String::new(),
        }
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(value_text(Value::deserialize(d)?))
    }

    /// List of text; a non-array becomes empty.
    pub fn texts<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => items.into_iter().map(value_text).collect(),
            _ => Vec::new(),
        })
    }

    /// Truthiness: `false`, `null`, `0` and `""` are false.
    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Null => false,
            Value::Bool(b) => b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        })
    }

    /// List of records; a non-array becomes empty, a bad element its default.
    pub fn list<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => items.into_iter().map(record).collect(),
            _ => Vec::new(),
        })
    }

    /// Single record; anything but an object becomes the default.
    pub fn object<'de, D, T>(d: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        Ok(record(Value::deserialize(d)?))
    }

    fn record<T: DeserializeOwned + Default>(value: Value) -> T {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => T::default(),
        }
    }
}
