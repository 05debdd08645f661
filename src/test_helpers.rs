//! Shared test utilities for the folio test suite.
//!
//! Provides an isolated copy of the fixture site plus small extractors for
//! the things tests assert on: manifest rows, generated page names.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let (_tmp, paths) = setup_site();
//! let report = blog::build(&paths, &SiteConfig::default()).unwrap();
//! assert_eq!(post_slugs(&report.posts), vec!["hello", "second", "notes"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::blog::ManifestEntry;
use crate::config::{BuildPaths, PathsConfig};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and resolve default paths in it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures. Keep the `TempDir` alive for the test's duration.
pub fn setup_site() -> (TempDir, BuildPaths) {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    let paths = BuildPaths::resolve(tmp.path(), &PathsConfig::default()).unwrap();
    (tmp, paths)
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Extractors
// =========================================================================

/// Slugs in manifest order.
pub fn post_slugs(entries: &[ManifestEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.slug.as_str()).collect()
}

/// File names in the generated pages directory, sorted.
pub fn page_names(paths: &BuildPaths) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(paths.pages_dir())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".html"))
        .collect();
    names.sort();
    names
}

/// Parsed `posts.json`. Panics if it is missing or malformed.
pub fn read_manifest(paths: &BuildPaths) -> serde_json::Value {
    let content = std::fs::read_to_string(paths.manifest()).unwrap_or_else(|e| {
        panic!("manifest not readable at {}: {e}", paths.manifest().display())
    });
    serde_json::from_str(&content).unwrap()
}
