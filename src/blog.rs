//! Blog compilation.
//!
//! Reads every Markdown post, renders one HTML page per post and writes the
//! `posts.json` manifest that the client-side search script loads.
//!
//! ## Output Structure
//!
//! ```text
//! blog/
//! ├── posts.json            # Manifest, newest first
//! └── posts/
//!     ├── hello.html        # One page per post, named by slug
//!     └── ...
//! ```
//!
//! ## Ordering
//!
//! 1. All posts are read and parsed (in parallel).
//! 2. Posts are sorted: `date_iso` descending, then slug descending.
//! 3. Stale pages are removed ([`crate::reconcile`]).
//! 4. Pages are written (in parallel), then the manifest.

use crate::config::{BuildPaths, MarkdownConfig, SiteConfig, SiteMeta};
use crate::post::{self, Post, PostError};
use crate::reconcile;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum BlogError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{path}: {source}")]
    Post {
        path: PathBuf,
        #[source]
        source: PostError,
    },
    #[error("Duplicate post slug '{slug}': {first} and {second}")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// One row of `posts.json`. Field order is the serialized order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestEntry {
    pub title: String,
    pub slug: String,
    pub date: String,
    pub excerpt: String,
    pub tags: Vec<String>,
}

impl From<&Post> for ManifestEntry {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            slug: post.slug.clone(),
            date: post.date_iso.clone(),
            excerpt: post.excerpt.clone(),
            tags: post.tags.clone(),
        }
    }
}

/// Result of a blog build, for reporting.
#[derive(Debug, Default)]
pub struct BlogReport {
    /// Manifest entries in manifest order.
    pub posts: Vec<ManifestEntry>,
    /// Page files deleted because their post no longer exists.
    pub removed: Vec<String>,
}

// ============================================================================
// Stage
// ============================================================================

/// Build the blog: pages under `<blog_dir>/posts/`, manifest at
/// `<blog_dir>/posts.json`.
pub fn build(paths: &BuildPaths, config: &SiteConfig) -> Result<BlogReport, BlogError> {
    let pages_dir = paths.pages_dir();
    fs::create_dir_all(&pages_dir)?;

    let posts = collect_posts(&paths.posts_dir, &config.markdown)?;

    let current: HashSet<String> = posts.iter().map(|p| p.slug.clone()).collect();
    let removed = reconcile::reconcile(&pages_dir, &current)?;

    posts.par_iter().try_for_each(|post| {
        let page = render_post_page(post, &config.site);
        fs::write(page_path(&pages_dir, &post.slug), page.into_string())
    })?;

    let entries = manifest_entries(&posts);
    fs::write(paths.manifest(), manifest_json(&entries)?)?;

    Ok(BlogReport {
        posts: entries,
        removed,
    })
}

/// Read, parse and sort every post in `posts_dir`.
///
/// A missing directory yields no posts. Two files mapping to the same slug
/// (`a.md` and `a.markdown`) are rejected.
pub fn collect_posts(posts_dir: &Path, markdown: &MarkdownConfig) -> Result<Vec<Post>, BlogError> {
    let files = list_markdown_files(posts_dir)?;

    let mut posts = files
        .par_iter()
        .map(|path| read_post(path, markdown))
        .collect::<Result<Vec<_>, _>>()?;

    check_unique_slugs(&files, &posts)?;
    sort_posts(&mut posts);
    Ok(posts)
}

/// Markdown files directly inside `dir`, sorted by name.
pub fn list_markdown_files(dir: &Path) -> Result<Vec<PathBuf>, BlogError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_file() && post::is_markdown_file(&entry.file_name().to_string_lossy()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn read_post(path: &Path, markdown: &MarkdownConfig) -> Result<Post, BlogError> {
    let raw = fs::read_to_string(path)?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    post::parse_post(&filename, &raw, markdown).map_err(|source| BlogError::Post {
        path: path.to_path_buf(),
        source,
    })
}

fn check_unique_slugs(files: &[PathBuf], posts: &[Post]) -> Result<(), BlogError> {
    let mut seen: HashMap<&str, &PathBuf> = HashMap::new();
    for (path, post) in files.iter().zip(posts) {
        if let Some(first) = seen.insert(post.slug.as_str(), path) {
            return Err(BlogError::DuplicateSlug {
                slug: post.slug.clone(),
                first: first.clone(),
                second: path.clone(),
            });
        }
    }
    Ok(())
}

/// Manifest order: date descending, then slug descending.
///
/// Dates compare as plain strings, which is chronological for `YYYY-MM-DD`.
/// Undated posts have an empty date and therefore come last.
pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(manifest_order);
}

fn manifest_order(a: &Post, b: &Post) -> Ordering {
    b.date_iso
        .cmp(&a.date_iso)
        .then_with(|| b.slug.cmp(&a.slug))
}

pub fn manifest_entries(posts: &[Post]) -> Vec<ManifestEntry> {
    posts.iter().map(ManifestEntry::from).collect()
}

/// Serialize the manifest: two-space indented, newline-terminated.
///
/// `<`, `>`, `&` and `'` inside strings are written as `\uXXXX` escapes, so
/// the file never carries raw markup. Decoded values are unchanged.
pub fn manifest_json(entries: &[ManifestEntry]) -> Result<String, serde_json::Error> {
    let mut buf = Vec::with_capacity(256 * entries.len().max(1));
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, HtmlSafeFormatter::default());
    entries.serialize(&mut ser)?;
    let mut json = String::from_utf8(buf)
        .map_err(|e| serde_json::Error::io(io::Error::new(io::ErrorKind::InvalidData, e)))?;
    json.push('\n');
    Ok(json)
}

/// `PrettyFormatter` that also escapes HTML-significant characters in strings.
#[derive(Default)]
struct HtmlSafeFormatter {
    pretty: PrettyFormatter<'static>,
}

impl Formatter for HtmlSafeFormatter {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let bytes = fragment.as_bytes();
        let mut start = 0;
        for (i, &byte) in bytes.iter().enumerate() {
            let escape: &[u8] = match byte {
                b'<' => b"\\u003c",
                b'>' => b"\\u003e",
                b'&' => b"\\u0026",
                b'\'' => b"\\u0027",
                _ => continue,
            };
            writer.write_all(&bytes[start..i])?;
            writer.write_all(escape)?;
            start = i + 1;
        }
        writer.write_all(&bytes[start..])
    }
}

/// Location of the generated page for `slug`.
pub fn page_path(pages_dir: &Path, slug: &str) -> PathBuf {
    pages_dir.join(format!("{slug}.html"))
}

// ============================================================================
// Page rendering
// ============================================================================

const FONTS_HREF: &str = "https://fonts.googleapis.com/css2?family=Inter:wght@300;400;500;600;700&family=Noto+Sans+KR:wght@300;400;500;600;700&family=JetBrains+Mono:wght@400;500&display=swap";

/// `YYYY-MM-DD` → `YYYY.MM.DD`; any other shape is returned unchanged.
pub fn display_date(iso: &str) -> String {
    let parts: Vec<&str> = iso.split('-').collect();
    match parts.as_slice() {
        [y, m, d] if !y.is_empty() && !m.is_empty() && !d.is_empty() => format!("{y}.{m}.{d}"),
        _ => iso.to_string(),
    }
}

/// Render the full HTML document for one post.
///
/// Metadata is escaped; `content_html` is inserted as-is.
pub fn render_post_page(post: &Post, site: &SiteMeta) -> Markup {
    let page_title = format!("{} | {}", post.title, site.author);

    html! {
        (DOCTYPE)
        html lang=(site.lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (page_title) }
                @if !post.excerpt.is_empty() {
                    meta name="description" content=(post.excerpt);
                }
                link rel="preconnect" href="https://fonts.googleapis.com";
                link href=(FONTS_HREF) rel="stylesheet";
                link rel="stylesheet" href="../assets/blog.css";
                meta name="color-scheme" content="dark";
            }
            body {
                (site_header(site))
                main.container.post {
                    div.badge style="display:inline-flex; margin-top: 18px;" {
                        a href="../index.html" style="color: var(--text-secondary); text-decoration: none;" {
                            "← 글 목록"
                        }
                    }
                    h1 style="margin-top: 14px;" { (post.title) }
                    (post_meta(post))
                    article.content {
                        (PreEscaped(&post.content_html))
                    }
                    footer.footer {
                        p { (site.footer_text()) }
                    }
                }
            }
        }
    }
}

fn site_header(site: &SiteMeta) -> Markup {
    html! {
        header.header {
            div.header-inner {
                a.header-logo href="../../index.html" { (site.author) span { "." } }
                nav.nav {
                    a href="../index.html" { "블로그" }
                    a href="../../index.html#projects" { "프로젝트" }
                    a href="../../index.html#career" { "경력" }
                }
            }
        }
    }
}

fn post_meta(post: &Post) -> Markup {
    html! {
        div.post-meta {
            span { (display_date(&post.date_iso)) }
            @if !post.tags.is_empty() {
                span { "·" }
                @for tag in &post.tags {
                    span { "#" (tag) }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn post(slug: &str, date: &str) -> Post {
        Post {
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            date_iso: date.to_string(),
            excerpt: String::new(),
            tags: vec![],
            content_html: String::new(),
        }
    }

    fn slugs(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.slug.as_str()).collect()
    }

    #[test]
    fn sort_by_date_then_slug_descending() {
        let mut posts = vec![
            post("a", "2024-01-01"),
            post("b", "2024-03-01"),
            post("c", "2024-01-01"),
            post("undated", ""),
            post("d", "2023-12-31"),
        ];
        sort_posts(&mut posts);
        assert_eq!(slugs(&posts), vec!["b", "c", "a", "d", "undated"]);
    }

    #[test]
    fn display_date_reformats_iso() {
        assert_eq!(display_date("2024-01-05"), "2024.01.05");
        assert_eq!(display_date("someday"), "someday");
        assert_eq!(display_date(""), "");
        assert_eq!(display_date("2024--05"), "2024--05");
        assert_eq!(display_date("2024-01-05-extra"), "2024-01-05-extra");
    }

    #[test]
    fn page_escapes_metadata_but_not_content() {
        let mut p = post("xss", "2024-01-05");
        p.title = "<script>alert(\"x\")</script>".to_string();
        p.tags = vec!["<b>".to_string()];
        p.content_html = "<div class=\"raw\">kept</div>".to_string();

        let html = render_post_page(&p, &SiteMeta::default()).into_string();

        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"));
        assert!(html.contains("#&lt;b&gt;"));
        assert!(html.contains("<div class=\"raw\">kept</div>"));
    }

    #[test]
    fn page_shows_date_tags_and_description() {
        let mut p = post("hello", "2024-01-05");
        p.title = "Hi".to_string();
        p.excerpt = "Short".to_string();
        p.tags = vec!["a".to_string(), "b".to_string()];

        let html = render_post_page(&p, &SiteMeta::default()).into_string();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Hi | Portfolio</title>"));
        assert!(html.contains(r#"<meta name="description" content="Short">"#));
        assert!(html.contains("<span>2024.01.05</span>"));
        assert!(html.contains("<span>#a</span><span>#b</span>"));
        assert!(html.contains(r#"<html lang="ko">"#));
    }

    #[test]
    fn page_without_tags_or_excerpt() {
        let html = render_post_page(&post("bare", ""), &SiteMeta::default()).into_string();
        assert!(!html.contains("name=\"description\""));
        assert!(!html.contains("<span>·</span>"));
    }

    #[test]
    fn manifest_json_shape() {
        let mut p = post("hello", "2024-01-05");
        p.title = "Hi".to_string();
        p.tags = vec!["a".to_string()];
        let json = manifest_json(&manifest_entries(&[p])).unwrap();

        assert!(json.ends_with("]\n"));
        assert!(json.starts_with("[\n  {\n    \"title\": \"Hi\",\n    \"slug\": \"hello\","));
    }

    #[test]
    fn manifest_matches_expected_bytes() {
        let raw = "---\ntitle: Hi\ndate: 2024-1-5\ntags: [a, b]\n---\n# Hello\n";
        let p = post::parse_post("hello.md", raw, &MarkdownConfig::default()).unwrap();
        let json = manifest_json(&manifest_entries(&[p])).unwrap();

        assert_eq!(
            json,
            "[\n  {\n    \"title\": \"Hi\",\n    \"slug\": \"hello\",\n    \"date\": \"2024-01-05\",\n    \"excerpt\": \"\",\n    \"tags\": [\n      \"a\",\n      \"b\"\n    ]\n  }\n]\n"
        );
    }

    #[test]
    fn manifest_escapes_markup_in_strings() {
        let mut p = post("xss", "2024-01-05");
        p.title = "<script>alert('x')</script>".to_string();
        p.excerpt = "Tom & Jerry".to_string();
        let json = manifest_json(&manifest_entries(&[p])).unwrap();

        assert!(!json.contains('<'));
        assert!(!json.contains('>'));
        assert!(!json.contains('\''));
        assert!(json.contains(r"\u003cscript\u003ealert(\u0027x\u0027)\u003c/script\u003e"));
        assert!(json.contains(r"Tom \u0026 Jerry"));

        let decoded: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded[0]["title"], "<script>alert('x')</script>");
        assert_eq!(decoded[0]["excerpt"], "Tom & Jerry");
    }

    #[test]
    fn collect_posts_ignores_non_markdown() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("one.md"), "---\ndate: 2024-01-01\n---\nOne").unwrap();
        fs::write(tmp.path().join("two.MARKDOWN"), "---\ndate: 2024-02-01\n---\nTwo").unwrap();
        fs::write(tmp.path().join("notes.txt"), "ignored").unwrap();

        let posts = collect_posts(tmp.path(), &MarkdownConfig::default()).unwrap();
        assert_eq!(slugs(&posts), vec!["two", "one"]);
    }

    #[test]
    fn collect_posts_missing_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        let posts = collect_posts(&tmp.path().join("nope"), &MarkdownConfig::default()).unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn duplicate_slug_is_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("same.md"), "a").unwrap();
        fs::write(tmp.path().join("same.markdown"), "b").unwrap();

        let result = collect_posts(tmp.path(), &MarkdownConfig::default());
        assert!(matches!(result, Err(BlogError::DuplicateSlug { slug, .. }) if slug == "same"));
    }

    #[test]
    fn build_writes_pages_and_manifest() {
        let (_tmp, paths) = setup_site();
        let report = build(&paths, &SiteConfig::default()).unwrap();

        assert_eq!(post_slugs(&report.posts), vec!["hello", "second", "notes"]);
        assert!(report.removed.is_empty());
        assert_eq!(page_names(&paths), vec!["hello.html", "notes.html", "second.html"]);

        let manifest = read_manifest(&paths);
        assert_eq!(manifest[0]["title"], "Hello, world");
        assert_eq!(manifest[0]["tags"], serde_json::json!(["rust", "blog"]));
        assert_eq!(manifest[1]["date"], "2024-01-05");
        assert_eq!(manifest[2]["date"], "");
    }

    #[test]
    fn build_removes_pages_of_deleted_posts() {
        let (tmp, paths) = setup_site();
        build(&paths, &SiteConfig::default()).unwrap();

        fs::remove_file(tmp.path().join("content/posts/notes.md")).unwrap();
        fs::write(paths.pages_dir().join("keep.css"), "x").unwrap();
        let report = build(&paths, &SiteConfig::default()).unwrap();

        assert_eq!(report.removed, vec!["notes.html"]);
        assert!(paths.pages_dir().join("keep.css").exists());
        assert_eq!(post_slugs(&report.posts), vec!["hello", "second"]);
    }

    #[test]
    fn build_uses_configured_author() {
        let (_tmp, paths) = setup_site();
        let mut config = SiteConfig::default();
        config.site.author = "Jiwoo".to_string();
        build(&paths, &config).unwrap();

        let page = fs::read_to_string(page_path(&paths.pages_dir(), "hello")).unwrap();
        assert!(page.contains("<title>Hello, world | Jiwoo</title>"));
        assert!(page.contains("© Jiwoo"));
    }

    #[test]
    fn bad_front_matter_reports_path() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("bad.md"), "---\ntags: [oops\n---\n").unwrap();

        let err = collect_posts(tmp.path(), &MarkdownConfig::default()).unwrap_err();
        assert!(matches!(err, BlogError::Post { .. }));
        assert!(err.to_string().contains("bad.md"));
    }
}
