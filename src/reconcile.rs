//! Stale-page cleanup for the blog output directory.
//!
//! The pages directory is owned by the build: every `*.html` file in it is a
//! generated post page. Before new pages are written, pages whose slug has no
//! source post any more (deleted or renamed posts) are removed, so the set of
//! page files always matches the manifest.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

const PAGE_SUFFIX: &str = ".html";

/// Slug of a generated page file, or `None` if the name is not `*.html`.
pub fn page_slug(file_name: &str) -> Option<&str> {
    let split = file_name.len().checked_sub(PAGE_SUFFIX.len())?;
    let suffix = file_name.get(split..)?;
    suffix
        .eq_ignore_ascii_case(PAGE_SUFFIX)
        .then(|| &file_name[..split])
}

/// Delete generated pages in `pages_dir` whose slug is not in `current`.
///
/// Returns the removed file names, sorted. A missing directory means there
/// is nothing to reconcile. Files that are not `*.html` are left alone.
pub fn reconcile(pages_dir: &Path, current: &HashSet<String>) -> io::Result<Vec<String>> {
    if !pages_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut removed = Vec::new();
    for entry in WalkDir::new(pages_dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        let Some(slug) = page_slug(&name) else {
            continue;
        };
        if !current.contains(slug) {
            fs::remove_file(entry.path())?;
            removed.push(name.into_owned());
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn slugs(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn page_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn page_slug_strips_html_suffix() {
        assert_eq!(page_slug("hello.html"), Some("hello"));
        assert_eq!(page_slug("Hello.HTML"), Some("Hello"));
        assert_eq!(page_slug("notes.txt"), None);
        assert_eq!(page_slug("html"), None);
    }

    #[test]
    fn removes_pages_without_source() {
        let tmp = TempDir::new().unwrap();
        for slug in ["a", "b", "c"] {
            fs::write(tmp.path().join(format!("{slug}.html")), slug).unwrap();
        }

        let removed = reconcile(tmp.path(), &slugs(&["b", "c", "d"])).unwrap();

        assert_eq!(removed, vec!["a.html"]);
        assert_eq!(page_names(tmp.path()), vec!["b.html", "c.html"]);
    }

    #[test]
    fn keeps_non_html_files() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("old.html"), "").unwrap();
        fs::write(tmp.path().join("notes.txt"), "").unwrap();
        fs::create_dir(tmp.path().join("drafts.html")).unwrap();

        let removed = reconcile(tmp.path(), &slugs(&[])).unwrap();

        assert_eq!(removed, vec!["old.html"]);
        assert_eq!(page_names(tmp.path()), vec!["drafts.html", "notes.txt"]);
    }

    #[test]
    fn missing_directory_is_nothing_to_do() {
        let tmp = TempDir::new().unwrap();
        let removed = reconcile(&tmp.path().join("absent"), &slugs(&["a"])).unwrap();
        assert!(removed.is_empty());
    }
}
