//! # Folio
//!
//! A minimal static site generator for a personal resume page with an
//! attached blog. The resume lives in a JSON file, posts are Markdown files
//! with YAML front matter, and the resume page itself is a hand-written
//! `index.html` whose marked regions are regenerated on every build.
//!
//! # Architecture: Two Independent Stages
//!
//! ```text
//! 1. Resume   content/resume.json + index.html  →  index.html (regions rewritten)
//! 2. Blog     content/posts/*.md                →  blog/posts/<slug>.html + blog/posts.json
//! ```
//!
//! The stages share nothing but configuration. Each can be run on its own
//! (`folio resume`, `folio blog`) or together (`folio build`), and `folio check`
//! runs both without writing.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`resume`] | Stage 1: renders resume sections into the host page |
//! | [`blog`] | Stage 2: one page per post plus the `posts.json` manifest |
//! | [`site`] | Runs both stages; `check` validates without writing |
//! | [`splice`] | Marker-delimited region replacement in the host page |
//! | [`post`] | Markdown post parsing: slug, dates, tags, HTML body |
//! | [`frontmatter`] | `---` fenced YAML front matter splitting |
//! | [`reconcile`] | Deletes pages whose post no longer exists |
//! | [`config`] | `folio.toml` loading, validation, merging, resolved paths |
//! | [`output`] | CLI output formatting for every stage |
//!
//! # Design Decisions
//!
//! ## The Host Page Is Hand-Written
//!
//! Only the regions between marker comments are generated. Layout, styles
//! and scripts around them stay under the author's control, and rebuilding
//! an already-built page produces the same bytes.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). All interpolated
//! text is escaped; the only raw insertions are rendered Markdown and the
//! fixed icon SVGs.
//!
//! ## The Manifest Is Data
//!
//! `posts.json` decodes to raw strings. The client-side search script escapes
//! what it displays, so the manifest is not HTML-encoded twice. On disk the
//! markup characters are `\uXXXX` escapes, so the file itself is inert.

pub mod blog;
pub mod config;
pub mod frontmatter;
pub mod output;
pub mod post;
pub mod reconcile;
pub mod resume;
pub mod site;
pub mod splice;

#[cfg(test)]
pub(crate) mod test_helpers;
