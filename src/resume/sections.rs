//! Resume section renderers.
//!
//! One pure function per resume subtree, each returning the fragment that
//! goes between that section's markers in the host page. All text is
//! escaped by Maud; empty lists render a visible "add content" placeholder
//! so a half-filled resume still shows where content is missing.

use super::model::{
    CareerEntry, Education, Hero, Keyword, Project, SkillGroup, SummaryItem, ValueCard,
};
use crate::splice::js_template_literal;
use maud::{Markup, PreEscaped, html};

const GITHUB_ICON: &str = r#"<svg viewBox="0 0 16 16" fill="currentColor"><path d="M8 0C3.58 0 0 3.58 0 8c0 3.54 2.29 6.53 5.47 7.59.4.07.55-.17.55-.38 0-.19-.01-.82-.01-1.49-2.01.37-2.53-.49-2.69-.94-.09-.23-.48-.94-.82-1.13-.28-.15-.68-.52-.01-.53.63-.01 1.08.58 1.23.82.72 1.21 1.87.87 2.33.66.07-.52.28-.87.51-1.07-1.78-.2-3.64-.89-3.64-3.95 0-.87.31-1.59.82-2.15-.08-.2-.36-1.02.08-2.12 0 0 .67-.21 2.2.82.64-.18 1.32-.27 2-.27.68 0 1.36.09 2 .27 1.53-1.04 2.2-.82 2.2-.82.44 1.1.16 1.92.08 2.12.51.56.82 1.27.82 2.15 0 3.07-1.87 3.75-3.65 3.95.29.25.54.73.54 1.48 0 1.07-.01 1.93-.01 2.2 0 .21.15.46.55.38A8.013 8.013 0 0016 8c0-4.42-3.58-8-8-8z"/></svg>"#;

const EMAIL_ICON: &str = r#"<svg viewBox="0 0 16 16" fill="currentColor"><path d="M1.75 2h12.5c.966 0 1.75.784 1.75 1.75v8.5A1.75 1.75 0 0114.25 14H1.75A1.75 1.75 0 010 12.25v-8.5C0 2.784.784 2 1.75 2zM1.5 12.251c0 .138.112.25.25.25h12.5a.25.25 0 00.25-.25V5.809L8.38 9.397a.75.75 0 01-.76 0L1.5 5.809v6.442zm13-8.181v-.32a.25.25 0 00-.25-.25H1.75a.25.25 0 00-.25.25v.32L8 7.88l6.5-3.81z"/></svg>"#;

/// Shared `h2` + rule heading used by every section.
fn section_header(title: &str) -> Markup {
    html! {
        div.section-header {
            h2 { (title) }
            div.section-line {}
        }
    }
}

// ============================================================================
// Hero
// ============================================================================

/// Hero block. The host page opens the hero `<section>` before the
/// marker, so this fragment closes it.
pub fn render_hero(hero: &Hero) -> Markup {
    let github = hero.github.trim();
    let email = hero.email.trim();
    let github_href = if github.is_empty() { "#".to_string() } else { github.to_string() };
    let email_href = if email.is_empty() { "#".to_string() } else { format!("mailto:{email}") };

    html! {
        div.hero-badge { (hero.badge) }
        h1 { "안녕하세요," br; span.gradient { (hero.name) } "입니다." }
        p.hero-subtitle { (hero.subtitle) }
        div.hero-links {
            a.hero-link href=(github_href) target="_blank" {
                (PreEscaped(GITHUB_ICON))
                "GitHub"
            }
            a.hero-link href=(email_href) {
                (PreEscaped(EMAIL_ICON))
                "Email"
            }
        }
        (PreEscaped("</section>"))
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Trailing clauses for the three-line summary, by position.
///
/// The resume content was written as exactly three `text` + `highlight`
/// lines whose endings live here rather than in the JSON. Only applies when
/// there are exactly three items; drop this once every item carries `after`.
const THREE_LINE_SUMMARY_CLAUSES: [&str; 3] = ["입니다.", "라고 생각합니다.", "를 추구합니다."];

fn summary_trailing_clause<'a>(item: &'a SummaryItem, index: usize, count: usize) -> &'a str {
    if !item.after.is_empty() {
        return &item.after;
    }
    if count == THREE_LINE_SUMMARY_CLAUSES.len() {
        THREE_LINE_SUMMARY_CLAUSES.get(index).copied().unwrap_or("")
    } else {
        ""
    }
}

pub fn render_summary(items: &[SummaryItem]) -> Markup {
    html! {
        section id="summary" {
            (section_header("세 줄로 요약하자면, 저는"))
            ul.summary-list {
                @for (idx, item) in items.iter().enumerate() {
                    li.summary-item {
                        (item.text)
                        @if !item.highlight.is_empty() {
                            " " strong { (item.highlight) }
                            (summary_trailing_clause(item, idx, items.len()))
                        }
                    }
                }
                @if items.is_empty() {
                    li.summary-item { "(내용을 추가해 주세요)" }
                }
            }
        }
    }
}

// ============================================================================
// Values
// ============================================================================

pub fn render_values(values: &[ValueCard]) -> Markup {
    html! {
        section id="values" {
            (section_header("추구하는 것과 관심사는"))
            div.values-grid {
                @for value in values {
                    div.value-card {
                        h3 { (value.emoji) " " (value.title) }
                        p { (value.description) }
                    }
                }
                @if values.is_empty() {
                    div.value-card {
                        h3 { "추가 필요" }
                        p { "내용을 추가해 주세요." }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Skills
// ============================================================================

pub fn render_skills(groups: &[SkillGroup]) -> Markup {
    html! {
        section id="skills" {
            (section_header("기술 스택"))
            div.skills-grid {
                @for group in groups {
                    div.skill-group {
                        div.skill-group-title { (group.group) }
                        div.skill-tags {
                            @for tag in &group.tags {
                                span.skill-tag { (tag) }
                            }
                            @if group.tags.is_empty() {
                                span.skill-tag { "(태그)" }
                            }
                        }
                    }
                }
                @if groups.is_empty() {
                    div.skill-group {
                        div.skill-group-title { "(그룹)" }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Career
// ============================================================================

/// CSS classes for a career keyword chip.
pub fn keyword_class(color: &str) -> &'static str {
    match color.to_lowercase().as_str() {
        "purple" => "keyword keyword-purple",
        "orange" => "keyword keyword-orange",
        _ => "keyword keyword-blue",
    }
}

fn render_keyword(keyword: &Keyword) -> Markup {
    html! {
        span class=(keyword_class(&keyword.color)) { (keyword.text) }
    }
}

fn render_career_entry(entry: &CareerEntry) -> Markup {
    html! {
        div.career-item {
            div.career-header {
                div {
                    div.career-company { (entry.company) }
                    div.career-desc { (entry.description) }
                }
                div style="text-align: right;" {
                    @if entry.current {
                        span.career-current { "재직중" }
                    }
                    div.career-period { (entry.period) }
                    @if !entry.current && !entry.duration.is_empty() {
                        div style="font-size:12px; color:var(--text-muted);" { (entry.duration) }
                    }
                }
            }
            div.career-keywords {
                @for keyword in &entry.keywords {
                    (render_keyword(keyword))
                }
            }
        }
    }
}

pub fn render_career(entries: &[CareerEntry]) -> Markup {
    html! {
        section id="career" {
            (section_header("경력 사항"))
            @for entry in entries {
                (render_career_entry(entry))
            }
            @if entries.is_empty() {
                div.career-item { "내용을 추가해 주세요." }
            }
        }
    }
}

// ============================================================================
// Projects
// ============================================================================

/// Bullet points for a project card: `highlights`, else the description.
fn project_points(project: &Project) -> Vec<&str> {
    if !project.highlights.is_empty() {
        project.highlights.iter().map(String::as_str).collect()
    } else if !project.description.is_empty() {
        vec![project.description.as_str()]
    } else {
        Vec::new()
    }
}

fn render_project(project: &Project) -> Markup {
    let points = project_points(project);
    html! {
        div.project-item data-detail=(project.id) {
            div.project-header {
                div.project-title { (project.title) }
                div.career-period { (project.period) }
            }
            div.project-sub { (project.subtitle) }
            ul.project-list {
                @for point in &points {
                    li { (point) }
                }
                @if points.is_empty() {
                    li { "(내용을 추가해 주세요)" }
                }
            }
            div.project-tags {
                @for tag in &project.tags {
                    span.project-tag { (tag) }
                }
            }
        }
    }
}

pub fn render_projects(projects: &[Project]) -> Markup {
    html! {
        section id="projects" {
            (section_header("참여 프로젝트"))
            @for project in projects {
                (render_project(project))
            }
            @if projects.is_empty() {
                div.project-item { "내용을 추가해 주세요." }
            }
        }
    }
}

/// Popup content for one project, keyed by project id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDetail {
    pub id: String,
    pub title: String,
    pub content: String,
}

const DEFAULT_DETAIL_TITLE: &str = "상세 설명";

/// Side table of project details, in project order.
///
/// Only projects with an id and some detail text get an entry. Duplicate ids
/// are kept as-is; in the emitted script object the last one wins.
pub fn project_details(projects: &[Project]) -> Vec<ProjectDetail> {
    projects
        .iter()
        .filter(|p| {
            !p.id.is_empty() && (!p.detail_content.is_empty() || !p.detail_title.is_empty())
        })
        .map(|p| ProjectDetail {
            id: p.id.clone(),
            title: if p.detail_title.is_empty() {
                DEFAULT_DETAIL_TITLE.to_string()
            } else {
                p.detail_title.clone()
            },
            content: p.detail_content.clone(),
        })
        .collect()
}

/// JavaScript source for the `projectDetails` lookup object.
pub fn render_project_details_script(details: &[ProjectDetail]) -> String {
    let entries: Vec<String> = details
        .iter()
        .map(|d| {
            // A JSON string is a valid JS string literal.
            let key = serde_json::Value::String(d.id.clone()).to_string();
            format!(
                "    {key}: {{\n        title: {},\n        content: {}\n    }}",
                js_template_literal(&d.title),
                js_template_literal(&d.content),
            )
        })
        .collect();
    format!("    const projectDetails = {{\n{}\n}};", entries.join(",\n"))
}

// ============================================================================
// Education
// ============================================================================

pub fn render_education(education: &Education) -> Markup {
    html! {
        section id="education" {
            (section_header("학력"))
            div.edu-card {
                div.career-header {
                    h3 { (education.school) }
                    div.career-period { (education.period) }
                }
                p { (education.major) }
            }
        }
    }
}
