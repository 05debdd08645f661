//! Resume compilation.
//!
//! Renders `content/resume.json` into the marked regions of the host page
//! and writes the page back in place. Everything outside the markers is
//! left byte-for-byte untouched.
//!
//! Regions are filled in the order of [`RESUME_REGIONS`]:
//!
//! | Region | Source | Renderer |
//! |--------|--------|----------|
//! | `HERO` | `hero` | [`sections::render_hero`] |
//! | `SUMMARY` | `summary` | [`sections::render_summary`] |
//! | `VALUES` | `values` | [`sections::render_values`] |
//! | `SKILLS` | `skills` | [`sections::render_skills`] |
//! | `CAREER` | `career` | [`sections::render_career`] |
//! | `PROJECTS` | `projects` | [`sections::render_projects`] |
//! | `EDUCATION` | `education` | [`sections::render_education`] |
//! | `PROJECTDETAILS` | `projects` | [`sections::render_project_details_script`] |

pub mod model;
pub mod sections;

use crate::config::BuildPaths;
use crate::splice::{HostDocument, RESUME_REGIONS, SpliceError};
use model::ResumeDocument;
use std::fs;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Resume JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Host page error: {0}")]
    Splice(#[from] SpliceError),
}

/// Result of a resume build, for reporting.
#[derive(Debug, Default)]
pub struct ResumeReport {
    /// Region names in the order they were filled.
    pub regions: Vec<&'static str>,
    pub project_details: usize,
    /// Project ids used by more than one project.
    pub duplicate_ids: Vec<String>,
    /// Whether the host page content changed.
    pub changed: bool,
}

/// Render every region of `host` from `resume`.
///
/// Pure: takes the page and the resume, returns the new page.
pub fn compile(resume: &ResumeDocument, host: &str) -> Result<(String, ResumeReport), ResumeError> {
    let mut doc = HostDocument::parse(host, &RESUME_REGIONS)?;

    let details = sections::project_details(&resume.projects);
    for region in &RESUME_REGIONS {
        let fragment = match region.name {
            "HERO" => sections::render_hero(&resume.hero).into_string(),
            "SUMMARY" => sections::render_summary(&resume.summary).into_string(),
            "VALUES" => sections::render_values(&resume.values).into_string(),
            "SKILLS" => sections::render_skills(&resume.skills).into_string(),
            "CAREER" => sections::render_career(&resume.career).into_string(),
            "PROJECTS" => sections::render_projects(&resume.projects).into_string(),
            "EDUCATION" => sections::render_education(&resume.education).into_string(),
            "PROJECTDETAILS" => sections::render_project_details_script(&details),
            other => return Err(SpliceError::UnknownRegion(other.to_string()).into()),
        };
        doc.set(region.name, &fragment)?;
    }

    let page = doc.render();
    let report = ResumeReport {
        regions: RESUME_REGIONS.iter().map(|r| r.name).collect(),
        project_details: details.len(),
        duplicate_ids: resume.duplicate_project_ids(),
        changed: page != host,
    };
    Ok((page, report))
}

/// Read the resume and host page, render, and return the new page without
/// writing it.
pub fn render(paths: &BuildPaths) -> Result<(String, ResumeReport), ResumeError> {
    let resume = ResumeDocument::from_json(&fs::read_to_string(&paths.resume)?)?;
    let host = fs::read_to_string(&paths.index)?;
    compile(&resume, &host)
}

/// Rebuild the host page in place.
pub fn build(paths: &BuildPaths) -> Result<ResumeReport, ResumeError> {
    let (page, report) = render(paths)?;
    fs::write(&paths.index, page)?;
    Ok(report)
}
