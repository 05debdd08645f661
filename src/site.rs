//! Whole-site build: the resume stage, then the blog stage.
//!
//! The two stages share no state. Each reads its own inputs from
//! [`BuildPaths`] and any error stops the build before the next stage runs.

use crate::blog::{self, BlogError, BlogReport, ManifestEntry};
use crate::config::{BuildPaths, ConfigError, SiteConfig};
use crate::resume::{self, ResumeError, ResumeReport};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Resume error: {0}")]
    Resume(#[from] ResumeError),
    #[error("Blog error: {0}")]
    Blog(#[from] BlogError),
}

#[derive(Debug, Default)]
pub struct SiteReport {
    pub resume: ResumeReport,
    pub blog: BlogReport,
}

/// What a build would produce, computed without writing anything.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub resume: ResumeReport,
    pub posts: Vec<ManifestEntry>,
}

pub fn build(paths: &BuildPaths, config: &SiteConfig) -> Result<SiteReport, BuildError> {
    let resume = resume::build(paths)?;
    let blog = blog::build(paths, config)?;
    Ok(SiteReport { resume, blog })
}

/// Validate every input: resume JSON, host page markers and all posts.
pub fn check(paths: &BuildPaths, config: &SiteConfig) -> Result<CheckReport, BuildError> {
    let (_, resume) = resume::render(paths)?;
    let posts = blog::collect_posts(&paths.posts_dir, &config.markdown)?;
    Ok(CheckReport {
        resume,
        posts: blog::manifest_entries(&posts),
    })
}
