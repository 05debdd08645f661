//! CLI output formatting for the build stages.
//!
//! # Information-First Display
//!
//! Output leads with what was built (post titles, resume regions) and shows
//! file paths as secondary context, relative to the project root. Posts are
//! listed with a positional index in manifest order, so the listing reads as
//! the blog's table of contents.
//!
//! # Output Format
//!
//! ## Resume
//!
//! ```text
//! Resume → index.html
//!     Regions: HERO, SUMMARY, VALUES, SKILLS, CAREER, PROJECTS, EDUCATION, PROJECTDETAILS
//!     Project details: 2
//!     Warning: duplicate project id 'pipeline'
//! ```
//!
//! ## Blog
//!
//! ```text
//! Posts
//! 001 Hello, world (2024-03-01) → blog/posts/hello.html
//! 002 notes → blog/posts/notes.html
//!
//! Removed
//!     old-post.html
//!
//! Manifest → blog/posts.json
//! Generated 2 posts
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions do no I/O.

use crate::blog::{self, BlogReport, ManifestEntry};
use crate::config::BuildPaths;
use crate::resume::ResumeReport;
use crate::site::CheckReport;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `001 Title (2024-03-01)`; undated posts omit the parenthesis.
fn post_line(index: usize, entry: &ManifestEntry) -> String {
    if entry.date.is_empty() {
        format!("{} {}", format_index(index), entry.title)
    } else {
        format!("{} {} ({})", format_index(index), entry.title, entry.date)
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

fn resume_detail_lines(report: &ResumeReport) -> Vec<String> {
    let mut lines = vec![
        format!("{}Regions: {}", indent(1), report.regions.join(", ")),
        format!("{}Project details: {}", indent(1), report.project_details),
    ];
    for id in &report.duplicate_ids {
        lines.push(format!("{}Warning: duplicate project id '{id}'", indent(1)));
    }
    lines
}

// ============================================================================
// Resume
// ============================================================================

pub fn format_resume_output(report: &ResumeReport, paths: &BuildPaths) -> Vec<String> {
    let mut lines = vec![format!("Resume → {}", paths.display(&paths.index))];
    lines.extend(resume_detail_lines(report));
    if !report.changed {
        lines.push(format!("{}Unchanged", indent(1)));
    }
    lines
}

pub fn print_resume_output(report: &ResumeReport, paths: &BuildPaths) {
    for line in format_resume_output(report, paths) {
        println!("{}", line);
    }
}

// ============================================================================
// Blog
// ============================================================================

pub fn format_blog_output(report: &BlogReport, paths: &BuildPaths) -> Vec<String> {
    let pages_dir = paths.pages_dir();
    let mut lines = vec!["Posts".to_string()];

    for (i, entry) in report.posts.iter().enumerate() {
        let page = blog::page_path(&pages_dir, &entry.slug);
        lines.push(format!("{} → {}", post_line(i + 1, entry), paths.display(&page)));
    }

    if !report.removed.is_empty() {
        lines.push(String::new());
        lines.push("Removed".to_string());
        for name in &report.removed {
            lines.push(format!("{}{}", indent(1), name));
        }
    }

    lines.push(String::new());
    lines.push(format!("Manifest → {}", paths.display(&paths.manifest())));
    lines.push(format!("Generated {}", plural(report.posts.len(), "post")));
    lines
}

pub fn print_blog_output(report: &BlogReport, paths: &BuildPaths) {
    for line in format_blog_output(report, paths) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// What a build would do, without output paths.
pub fn format_check_output(report: &CheckReport, paths: &BuildPaths) -> Vec<String> {
    let mut lines = vec![format!("Resume: {}", paths.display(&paths.resume))];
    lines.extend(resume_detail_lines(&report.resume));
    if report.resume.changed {
        lines.push(format!(
            "{}{} is out of date",
            indent(1),
            paths.display(&paths.index)
        ));
    }

    lines.push(String::new());
    lines.push(format!("Posts: {}", paths.display(&paths.posts_dir)));
    for (i, entry) in report.posts.iter().enumerate() {
        lines.push(post_line(i + 1, entry));
    }
    if report.posts.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    lines
}

pub fn print_check_output(report: &CheckReport, paths: &BuildPaths) {
    for line in format_check_output(report, paths) {
        println!("{}", line);
    }
}
