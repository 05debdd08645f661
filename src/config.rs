//! Project configuration module.
//!
//! Handles loading, validating, and merging `folio.toml`. Stock defaults are
//! overridden by an optional `folio.toml` at the project root, and the
//! resulting [`PathsConfig`] is resolved once into absolute [`BuildPaths`]
//! that every stage receives explicitly.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [paths]
//! content_dir = "content"          # Root of authored content
//! # posts_dir = "content/posts"    # Markdown posts; default <content_dir>/posts
//! # resume = "content/resume.json" # Resume document; default <content_dir>/resume.json
//! index = "index.html"             # Host page rewritten in place
//! blog_dir = "blog"                # Receives posts/<slug>.html and posts.json
//!
//! [site]
//! author = "Portfolio"             # Shown in page titles, header and footer
//! lang = "ko"                      # <html lang="..."> of post pages
//! footer = ""                      # Footer text; empty means "© <author>"
//!
//! [markdown]
//! tables = true
//! strikethrough = true
//! tasklists = true
//! footnotes = false
//! smart_punctuation = false
//!
//! [processing]
//! max_processes = 4                # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the project config, looked up in the project root.
pub const CONFIG_FILENAME: &str = "folio.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Project configuration loaded from `folio.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Input and output locations, relative to the project root.
    pub paths: PathsConfig,
    /// Page chrome shared by every generated post page.
    pub site: SiteMeta,
    /// Markdown extensions enabled for post bodies.
    pub markdown: MarkdownConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let paths = [
            ("paths.content_dir", Some(&self.paths.content_dir)),
            ("paths.posts_dir", self.paths.posts_dir.as_ref()),
            ("paths.resume", self.paths.resume.as_ref()),
            ("paths.index", Some(&self.paths.index)),
            ("paths.blog_dir", Some(&self.paths.blog_dir)),
        ];
        for (key, value) in paths {
            if value.is_some_and(|v| v.trim().is_empty()) {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Input and output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Root of authored content. Anchors `posts_dir` and `resume` when
    /// those are not set.
    pub content_dir: String,
    /// Markdown posts. Defaults to `<content_dir>/posts`.
    pub posts_dir: Option<String>,
    /// Resume document. Defaults to `<content_dir>/resume.json`.
    pub resume: Option<String>,
    pub index: String,
    pub blog_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            content_dir: "content".to_string(),
            posts_dir: None,
            resume: None,
            index: "index.html".to_string(),
            blog_dir: "blog".to_string(),
        }
    }
}

/// Page chrome for generated post pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMeta {
    /// Site owner, shown in `<title>`, the header logo and the footer.
    pub author: String,
    /// Value of the `lang` attribute on `<html>`.
    pub lang: String,
    /// Footer text. Empty means `© <author>`.
    pub footer: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            author: "Portfolio".to_string(),
            lang: "ko".to_string(),
            footer: String::new(),
        }
    }
}

impl SiteMeta {
    /// Footer line as rendered on post pages.
    pub fn footer_text(&self) -> String {
        if self.footer.is_empty() {
            format!("© {}", self.author)
        } else {
            self.footer.clone()
        }
    }
}

/// Markdown extensions beyond plain CommonMark.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkdownConfig {
    pub tables: bool,
    pub strikethrough: bool,
    pub tasklists: bool,
    pub footnotes: bool,
    pub smart_punctuation: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            tasklists: true,
            footnotes: false,
            smart_punctuation: false,
        }
    }
}

impl MarkdownConfig {
    /// Translate into parser options.
    pub fn options(&self) -> pulldown_cmark::Options {
        use pulldown_cmark::Options;
        let mut options = Options::empty();
        options.set(Options::ENABLE_TABLES, self.tables);
        options.set(Options::ENABLE_STRIKETHROUGH, self.strikethrough);
        options.set(Options::ENABLE_TASKLISTS, self.tasklists);
        options.set(Options::ENABLE_FOOTNOTES, self.footnotes);
        options.set(Options::ENABLE_SMART_PUNCTUATION, self.smart_punctuation);
        options
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel workers for reading and writing posts.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Resolved paths
// =============================================================================

/// Absolute locations of every input and output of a build.
///
/// Built once from the project root and [`PathsConfig`]; stages never look at
/// the process working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPaths {
    pub root: PathBuf,
    pub content_dir: PathBuf,
    pub posts_dir: PathBuf,
    pub resume: PathBuf,
    pub index: PathBuf,
    pub blog_dir: PathBuf,
}

impl BuildPaths {
    /// Resolve configured paths against `root`.
    ///
    /// Relative entries are joined onto the root; absolute entries are kept.
    /// Unset `posts_dir` and `resume` live under the content directory.
    pub fn resolve(root: &Path, paths: &PathsConfig) -> Result<Self, ConfigError> {
        let root = std::path::absolute(root)?;
        let content_dir = root.join(&paths.content_dir);
        Ok(Self {
            posts_dir: match &paths.posts_dir {
                Some(dir) => root.join(dir),
                None => content_dir.join("posts"),
            },
            resume: match &paths.resume {
                Some(file) => root.join(file),
                None => content_dir.join("resume.json"),
            },
            index: root.join(&paths.index),
            blog_dir: root.join(&paths.blog_dir),
            content_dir,
            root,
        })
    }

    /// Directory holding one generated page per post.
    pub fn pages_dir(&self) -> PathBuf {
        self.blog_dir.join("posts")
    }

    /// Location of the post manifest.
    pub fn manifest(&self) -> PathBuf {
        self.blog_dir.join("posts.json")
    }

    /// Show `path` relative to the project root when possible.
    pub fn display(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `folio.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from `folio.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let merged = match load_raw_config(root)? {
        Some(overlay) => merge_toml(stock_defaults_value(), overlay),
        None => stock_defaults_value(),
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `folio.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Folio Configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.
#
# Place this file at the project root as folio.toml.

# ---------------------------------------------------------------------------
# Paths (relative to the project root)
# ---------------------------------------------------------------------------
[paths]
# Root of authored content.
content_dir = "content"

# Markdown posts. Only *.md and *.markdown files are read.
# Defaults to <content_dir>/posts.
# posts_dir = "content/posts"

# Resume document rendered into the host page.
# Defaults to <content_dir>/resume.json.
# resume = "content/resume.json"

# Host page. Must contain the HERO, SUMMARY, VALUES, SKILLS, CAREER,
# PROJECTS, EDUCATION and PROJECTDETAILS marker pairs.
index = "index.html"

# Blog output: posts/<slug>.html and posts.json are written here.
blog_dir = "blog"

# ---------------------------------------------------------------------------
# Site chrome for post pages
# ---------------------------------------------------------------------------
[site]
author = "Portfolio"
lang = "ko"
# Empty means "© <author>".
footer = ""

# ---------------------------------------------------------------------------
# Markdown extensions
# ---------------------------------------------------------------------------
[markdown]
tables = true
strikethrough = true
tasklists = true
footnotes = false
smart_punctuation = false

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers for reading and writing posts.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
