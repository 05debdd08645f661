//! Marker-delimited splicing of generated fragments into a host document.
//!
//! The host page (`index.html`) is hand-maintained except for regions
//! bounded by marker comments:
//!
//! ```text
//! <!-- SUMMARY_START -->
//! ...replaced on every build...
//! <!-- SUMMARY_END -->
//! ```
//!
//! Markers are preserved verbatim, so splicing is idempotent and can be
//! re-run against its own output. [`splice`] replaces one region in a string;
//! [`HostDocument`] parses the page once into static and region segments so
//! each region can be set independently and the page rendered back.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SpliceError {
    #[error("start marker not found: {0}")]
    MissingStart(String),
    #[error("end marker not found: {0}")]
    MissingEnd(String),
    #[error("regions {0} and {1} overlap")]
    Overlap(String, String),
    #[error("unknown region: {0}")]
    UnknownRegion(String),
    #[error("content for region {region} contains the marker {marker}")]
    MarkerInContent { region: String, marker: String },
}

/// A named pair of marker strings bounding a replaceable region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub name: &'static str,
    pub start: &'static str,
    pub end: &'static str,
}

/// Resume regions of the host page, in the order they are filled.
pub const RESUME_REGIONS: [Region; 8] = [
    Region {
        name: "HERO",
        start: "<!-- HERO_START -->",
        end: "<!-- HERO_END -->",
    },
    Region {
        name: "SUMMARY",
        start: "<!-- SUMMARY_START -->",
        end: "<!-- SUMMARY_END -->",
    },
    Region {
        name: "VALUES",
        start: "<!-- VALUES_START -->",
        end: "<!-- VALUES_END -->",
    },
    Region {
        name: "SKILLS",
        start: "<!-- SKILLS_START -->",
        end: "<!-- SKILLS_END -->",
    },
    Region {
        name: "CAREER",
        start: "<!-- CAREER_START -->",
        end: "<!-- CAREER_END -->",
    },
    Region {
        name: "PROJECTS",
        start: "<!-- PROJECTS_START -->",
        end: "<!-- PROJECTS_END -->",
    },
    Region {
        name: "EDUCATION",
        start: "<!-- EDUCATION_START -->",
        end: "<!-- EDUCATION_END -->",
    },
    // Lives inside a <script>, hence line comments.
    Region {
        name: "PROJECTDETAILS",
        start: "// PROJECTDETAILS_START",
        end: "// PROJECTDETAILS_END",
    },
];

/// Byte offsets of one located region.
#[derive(Debug, Clone, Copy)]
struct Span {
    /// Start of the start marker.
    outer_start: usize,
    /// End of the start marker.
    inner_start: usize,
    /// Start of the end marker.
    inner_end: usize,
    /// End of the end marker.
    outer_end: usize,
}

fn locate(src: &str, region: &Region) -> Result<Span, SpliceError> {
    let outer_start = src
        .find(region.start)
        .ok_or_else(|| SpliceError::MissingStart(region.start.to_string()))?;
    let inner_start = outer_start + region.start.len();
    let inner_end = src[inner_start..]
        .find(region.end)
        .map(|i| inner_start + i)
        .ok_or_else(|| SpliceError::MissingEnd(region.end.to_string()))?;
    Ok(Span {
        outer_start,
        inner_start,
        inner_end,
        outer_end: inner_end + region.end.len(),
    })
}

/// Reject `content` that contains any of `markers`; it would be found as a
/// marker on the next build.
fn ensure_no_markers<'a>(
    region: &str,
    content: &str,
    markers: impl IntoIterator<Item = &'a str>,
) -> Result<(), SpliceError> {
    match markers.into_iter().find(|marker| content.contains(*marker)) {
        Some(marker) => Err(SpliceError::MarkerInContent {
            region: region.to_string(),
            marker: marker.to_string(),
        }),
        None => Ok(()),
    }
}

/// Region interior as stored: the fragment on its own lines.
fn interior(content: &str) -> String {
    format!("\n{content}\n")
}

/// Replace the interior of `region` in `src` with `content`.
///
/// Uses the first start marker and the first end marker after it. The
/// content is surrounded by single newlines; the markers are kept. Content
/// containing the region's own markers is rejected.
pub fn splice(src: &str, region: &Region, content: &str) -> Result<String, SpliceError> {
    ensure_no_markers(region.name, content, [region.start, region.end])?;
    let span = locate(src, region)?;
    let mut out = String::with_capacity(src.len() + content.len());
    out.push_str(&src[..span.inner_start]);
    out.push_str(&interior(content));
    out.push_str(&src[span.inner_end..]);
    Ok(out)
}

#[derive(Debug, Clone)]
enum Segment {
    Static(String),
    Region { name: &'static str, body: String },
}

/// A host page split into static text and named, replaceable regions.
#[derive(Debug, Clone)]
pub struct HostDocument {
    segments: Vec<Segment>,
    /// Every start and end marker of the parsed regions.
    markers: Vec<&'static str>,
}

impl HostDocument {
    /// Locate every region in `src`.
    ///
    /// Every region must be present; regions may appear in any order but
    /// must not overlap.
    pub fn parse(src: &str, regions: &[Region]) -> Result<Self, SpliceError> {
        let mut spans = regions
            .iter()
            .map(|region| locate(src, region).map(|span| (span, region.name)))
            .collect::<Result<Vec<_>, _>>()?;
        spans.sort_by_key(|(span, _)| span.outer_start);

        for pair in spans.windows(2) {
            let (prev, prev_name) = pair[0];
            let (next, next_name) = pair[1];
            if next.outer_start < prev.outer_end {
                return Err(SpliceError::Overlap(
                    prev_name.to_string(),
                    next_name.to_string(),
                ));
            }
        }

        let mut segments = Vec::with_capacity(spans.len() * 2 + 1);
        let mut cursor = 0;
        for (span, name) in spans {
            segments.push(Segment::Static(src[cursor..span.inner_start].to_string()));
            segments.push(Segment::Region {
                name,
                body: src[span.inner_start..span.inner_end].to_string(),
            });
            cursor = span.inner_end;
        }
        segments.push(Segment::Static(src[cursor..].to_string()));

        let markers = regions.iter().flat_map(|r| [r.start, r.end]).collect();
        Ok(Self { segments, markers })
    }

    /// Replace the interior of the region called `name`.
    ///
    /// Content containing any region marker is rejected, so a rendered page
    /// always parses again.
    pub fn set(&mut self, name: &str, content: &str) -> Result<(), SpliceError> {
        ensure_no_markers(name, content, self.markers.iter().copied())?;
        let body = self
            .segments
            .iter_mut()
            .find_map(|segment| match segment {
                Segment::Region { name: n, body } if *n == name => Some(body),
                _ => None,
            })
            .ok_or_else(|| SpliceError::UnknownRegion(name.to_string()))?;
        *body = interior(content);
        Ok(())
    }

    /// Current interior of the region called `name`.
    pub fn region(&self, name: &str) -> Option<&str> {
        self.segments.iter().find_map(|segment| match segment {
            Segment::Region { name: n, body } if *n == name => Some(body.as_str()),
            _ => None,
        })
    }

    pub fn render(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Static(text) => text.as_str(),
                Segment::Region { body, .. } => body.as_str(),
            })
            .collect()
    }
}

/// Quote `s` as a JavaScript template literal.
///
/// Escapes backslashes, backticks and `${` so the text is inert.
pub fn js_template_literal(s: &str) -> String {
    let escaped = s
        .replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${");
    format!("`{escaped}`")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUMMARY: Region = RESUME_REGIONS[1];

    fn host() -> String {
        "<body>\n<!-- HERO_START -->old hero<!-- HERO_END -->\n\
         <!-- SUMMARY_START -->\nold summary\n<!-- SUMMARY_END -->\n</body>\n"
            .to_string()
    }

    #[test]
    fn splice_replaces_interior_and_keeps_markers() {
        let out = splice(&host(), &SUMMARY, "<p>new</p>").unwrap();
        assert!(out.contains("<!-- SUMMARY_START -->\n<p>new</p>\n<!-- SUMMARY_END -->"));
        assert!(!out.contains("old summary"));
        assert!(out.contains("old hero"));
    }

    #[test]
    fn splice_twice_only_changes_interior() {
        let once = splice(&host(), &SUMMARY, "first").unwrap();
        let twice = splice(&once, &SUMMARY, "second").unwrap();
        assert_eq!(twice, splice(&host(), &SUMMARY, "second").unwrap());

        let again = splice(&twice, &SUMMARY, "second").unwrap();
        assert_eq!(again, twice);
    }

    #[test]
    fn missing_start_marker() {
        let err = splice("<p>nothing</p>", &SUMMARY, "x").unwrap_err();
        assert_eq!(err, SpliceError::MissingStart("<!-- SUMMARY_START -->".into()));
    }

    #[test]
    fn end_marker_must_follow_start() {
        let src = "<!-- SUMMARY_END --> <!-- SUMMARY_START -->";
        let err = splice(src, &SUMMARY, "x").unwrap_err();
        assert_eq!(err, SpliceError::MissingEnd("<!-- SUMMARY_END -->".into()));
    }

    #[test]
    fn host_document_matches_sequential_splices() {
        let src = host();
        let regions = &RESUME_REGIONS[..2];

        let mut doc = HostDocument::parse(&src, regions).unwrap();
        doc.set("SUMMARY", "S").unwrap();
        doc.set("HERO", "H").unwrap();

        let sequential = splice(&src, &RESUME_REGIONS[0], "H")
            .and_then(|s| splice(&s, &SUMMARY, "S"))
            .unwrap();
        assert_eq!(doc.render(), sequential);
        assert_eq!(doc.region("HERO"), Some("\nH\n"));
    }

    #[test]
    fn host_document_untouched_round_trips() {
        let src = host();
        let doc = HostDocument::parse(&src, &RESUME_REGIONS[..2]).unwrap();
        assert_eq!(doc.render(), src);
    }

    #[test]
    fn host_document_requires_every_region() {
        let err = HostDocument::parse(&host(), &RESUME_REGIONS).unwrap_err();
        assert_eq!(err, SpliceError::MissingStart("<!-- VALUES_START -->".into()));
    }

    #[test]
    fn host_document_rejects_overlap() {
        let src = "<!-- HERO_START --><!-- SUMMARY_START --><!-- HERO_END --><!-- SUMMARY_END -->";
        let err = HostDocument::parse(src, &RESUME_REGIONS[..2]).unwrap_err();
        assert_eq!(err, SpliceError::Overlap("HERO".into(), "SUMMARY".into()));
    }

    #[test]
    fn set_unknown_region() {
        let mut doc = HostDocument::parse(&host(), &RESUME_REGIONS[..1]).unwrap();
        assert_eq!(
            doc.set("SUMMARY", "x"),
            Err(SpliceError::UnknownRegion("SUMMARY".into()))
        );
    }

    #[test]
    fn splice_rejects_own_marker_in_content() {
        let err = splice(&host(), &SUMMARY, "see <!-- SUMMARY_END --> here").unwrap_err();
        assert_eq!(
            err,
            SpliceError::MarkerInContent {
                region: "SUMMARY".into(),
                marker: "<!-- SUMMARY_END -->".into(),
            }
        );
    }

    #[test]
    fn set_rejects_any_region_marker() {
        let mut doc = HostDocument::parse(&host(), &RESUME_REGIONS[..2]).unwrap();
        let err = doc.set("SUMMARY", "<li>x <!-- HERO_START --></li>").unwrap_err();
        assert!(matches!(
            err,
            SpliceError::MarkerInContent { region, marker }
                if region == "SUMMARY" && marker == "<!-- HERO_START -->"
        ));
        assert_eq!(doc.render(), host());
    }

    #[test]
    fn template_literal_escaping() {
        assert_eq!(js_template_literal("plain"), "`plain`");
        assert_eq!(js_template_literal("a`b"), "`a\\`b`");
        assert_eq!(js_template_literal("${x}"), "`\\${x}`");
        assert_eq!(js_template_literal("c:\\dir"), "`c:\\\\dir`");
    }
}
