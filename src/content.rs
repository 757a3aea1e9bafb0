//! Content scanning: docs and blog posts.
//!
//! Walks the docs and blog directories named by the site config and turns
//! every markdown file into a [`Doc`] or [`BlogPost`] with its id, title
//! and route worked out. Bodies are kept as opaque text; nothing here
//! renders markdown.
//!
//! ## Directory Structure
//!
//! ```text
//! site/
//! ├── docs/
//! │   ├── index.md                      # → /docs/
//! │   ├── 01-installation.md            # id "installation", position 1
//! │   ├── 02-tutorials/
//! │   │   ├── 01-first-model.md         # id "tutorials/first-model"
//! │   │   └── _partial.md               # `_` prefix: skipped
//! │   └── faq.md                        # front matter `id: questions`
//! └── blog/
//!     ├── 2018-02-05-david-grains.md    # → /blog/2018/02/05/david-grains
//!     └── 2020-06-01-release/
//!         └── index.md                  # → /blog/2020/06/01/release
//! ```
//!
//! ## Front Matter
//!
//! A YAML block between `---` lines at the top of the file:
//!
//! ```text
//! ---
//! id: questions
//! title: Frequently Asked Questions
//! sidebar_position: 4
//! ---
//! ```
//!
//! Keys this module does not interpret are kept in [`FrontMatter::extra`].
//! Files with `draft: true` are skipped.

use crate::naming::{self, DatedName};
use crate::nav::LinkResolutionError;
use pulldown_cmark::{Event, Parser, Tag};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

/// Marker separating a blog post's excerpt from the rest of the post.
pub const TRUNCATE_MARKER: &str = "<!--truncate-->";

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
    #[error("invalid front matter in {}: {message}", .path.display())]
    FrontMatter { path: PathBuf, message: String },
    #[error("duplicate doc id `{id}` ({} and {})", .first.display(), .second.display())]
    DuplicateDocId {
        id: String,
        first: PathBuf,
        second: PathBuf,
    },
    #[error("blog post {} has no date (name it YYYY-MM-DD-slug or set `date`)", .0.display())]
    UndatedPost(PathBuf),
}

/// Metadata header of a content file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar_position: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// `YYYY-MM-DD`; dates a blog post whose file name has no date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub draft: bool,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// A documentation page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Doc {
    /// Path-like id, e.g. `tutorials/first-model`.
    pub id: String,
    pub title: String,
    /// Route including `baseUrl`, e.g. `/docs/tutorials/first-model`.
    pub permalink: String,
    /// Path relative to the docs directory.
    pub source: PathBuf,
    pub sidebar_position: Option<f64>,
    pub sidebar_label: Option<String>,
    pub front_matter: FrontMatter,
    #[serde(skip)]
    pub body: String,
}

/// A dated blog post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogPost {
    pub slug: String,
    pub title: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub permalink: String,
    /// Path relative to the blog directory.
    pub source: PathBuf,
    pub author: Option<String>,
    pub tags: Vec<String>,
    /// Text before [`TRUNCATE_MARKER`], when the post has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    pub front_matter: FrontMatter,
    #[serde(skip)]
    pub body: String,
}

// =============================================================================
// Front matter
// =============================================================================

/// Split a file into its front matter block and body.
///
/// Returns `(None, content)` when the file does not open with a `---` line
/// or the block is never closed.
pub fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let Some(rest) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return (Some(&rest[..offset]), &rest[offset + line.len()..]);
        }
        offset += line.len();
    }
    (None, content)
}

/// Parse the front matter of `content`, returning it with the body.
pub fn parse_front_matter<'a>(
    path: &Path,
    content: &'a str,
) -> Result<(FrontMatter, &'a str), ContentError> {
    let (block, body) = split_front_matter(content);
    let front_matter = match block.map(str::trim) {
        None | Some("") => FrontMatter::default(),
        Some(yaml) => serde_yaml::from_str(yaml).map_err(|e| ContentError::FrontMatter {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?,
    };
    Ok((front_matter, body))
}

/// Text of the first `# ` heading.
pub fn first_heading(body: &str) -> Option<String> {
    body.lines()
        .find(|line| line.starts_with("# "))
        .map(|line| line.trim_start_matches("# ").trim().to_string())
        .filter(|title| !title.is_empty())
}

// =============================================================================
// Scanning
// =============================================================================

/// Scan a docs directory. A missing directory yields no docs.
///
/// Docs are returned ordered by source path.
pub fn scan_docs(dir: &Path, base_url: &str, route_base: &str) -> Result<Vec<Doc>, ContentError> {
    let files = collect_markdown(dir)?;
    let docs: Vec<Doc> = files
        .par_iter()
        .map(|rel| load_doc(dir, rel, base_url, route_base))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .flatten()
        .collect();

    let mut seen: HashMap<&str, &Path> = HashMap::new();
    for doc in &docs {
        if let Some(first) = seen.insert(&doc.id, &doc.source) {
            return Err(ContentError::DuplicateDocId {
                id: doc.id.clone(),
                first: first.to_path_buf(),
                second: doc.source.clone(),
            });
        }
    }
    debug!(dir = %dir.display(), docs = docs.len(), "docs scanned");
    Ok(docs)
}

/// Scan a blog directory. A missing directory yields no posts.
///
/// Posts are returned newest first.
pub fn scan_blog(
    dir: &Path,
    base_url: &str,
    route_base: &str,
) -> Result<Vec<BlogPost>, ContentError> {
    let files = collect_markdown(dir)?;
    let mut posts: Vec<BlogPost> = files
        .par_iter()
        .map(|rel| load_post(dir, rel, base_url, route_base))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .flatten()
        .collect();
    posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.permalink.cmp(&b.permalink)));
    debug!(dir = %dir.display(), posts = posts.len(), "blog scanned");
    Ok(posts)
}

/// Markdown files under `dir`, relative to it, in path order.
///
/// Files and directories whose name starts with `_` or `.` are skipped.
fn collect_markdown(dir: &Path) -> Result<Vec<PathBuf>, ContentError> {
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "content directory missing");
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name().to_str().unwrap_or_default()));
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && is_markdown(entry.path()) {
            let rel = entry.path().strip_prefix(dir).unwrap_or(entry.path());
            files.push(rel.to_path_buf());
        }
    }
    Ok(files)
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('_') || name.starts_with('.')
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("md") || e.eq_ignore_ascii_case("mdx"))
        .unwrap_or(false)
}

fn read(dir: &Path, rel: &Path) -> Result<String, ContentError> {
    let path = dir.join(rel);
    fs::read_to_string(&path).map_err(|source| ContentError::Io { path, source })
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn is_index_name(stem: &str) -> bool {
    stem.eq_ignore_ascii_case("index") || stem.eq_ignore_ascii_case("readme")
}

/// Join route segments under `base_url`, which ends with `/`.
fn join_route(base_url: &str, segments: &[&str], trailing_slash: bool) -> String {
    let mut route = base_url.to_string();
    let parts: Vec<&str> = segments
        .iter()
        .map(|s| s.trim_matches('/'))
        .filter(|s| !s.is_empty())
        .collect();
    route.push_str(&parts.join("/"));
    if trailing_slash && !route.ends_with('/') {
        route.push('/');
    }
    route
}

fn load_doc(
    dir: &Path,
    rel: &Path,
    base_url: &str,
    route_base: &str,
) -> Result<Option<Doc>, ContentError> {
    let content = read(dir, rel)?;
    let (front_matter, body) = parse_front_matter(&dir.join(rel), &content)?;
    if front_matter.draft {
        debug!(doc = %rel.display(), "draft skipped");
        return Ok(None);
    }

    let dirs: Vec<String> = rel
        .parent()
        .map(|p| {
            p.components()
                .map(|c| naming::parse_entry_name(&c.as_os_str().to_string_lossy()).name)
                .collect()
        })
        .unwrap_or_default();
    let stem = file_stem(rel);
    let parsed = naming::parse_entry_name(&stem);
    let last = front_matter.id.clone().unwrap_or_else(|| parsed.name.clone());

    let mut id_parts: Vec<&str> = dirs.iter().map(String::as_str).collect();
    id_parts.push(&last);
    let id = id_parts.join("/");

    let permalink = match front_matter.slug.as_deref() {
        Some(slug) if slug.starts_with('/') => join_route(base_url, &[route_base, slug], false),
        Some(slug) => {
            let mut segments = vec![route_base];
            segments.extend(dirs.iter().map(String::as_str));
            segments.push(slug);
            join_route(base_url, &segments, false)
        }
        None if front_matter.id.is_none() && is_index_name(&parsed.name) => {
            let mut segments = vec![route_base];
            segments.extend(dirs.iter().map(String::as_str));
            join_route(base_url, &segments, true)
        }
        None => {
            let mut segments = vec![route_base];
            segments.extend(id_parts.iter().copied());
            join_route(base_url, &segments, false)
        }
    };

    let title = front_matter
        .title
        .clone()
        .or_else(|| first_heading(body))
        .unwrap_or_else(|| parsed.display_title.clone());

    Ok(Some(Doc {
        id,
        title,
        permalink,
        source: rel.to_path_buf(),
        sidebar_position: front_matter
            .sidebar_position
            .or(parsed.number.map(f64::from)),
        sidebar_label: front_matter.sidebar_label.clone(),
        body: body.to_string(),
        front_matter,
    }))
}

fn load_post(
    dir: &Path,
    rel: &Path,
    base_url: &str,
    route_base: &str,
) -> Result<Option<BlogPost>, ContentError> {
    let content = read(dir, rel)?;
    let (front_matter, body) = parse_front_matter(&dir.join(rel), &content)?;
    if front_matter.draft {
        debug!(post = %rel.display(), "draft skipped");
        return Ok(None);
    }

    // `2020-06-01-release/index.md` is named by its directory.
    let stem = file_stem(rel);
    let name = match rel.parent().and_then(Path::file_name) {
        Some(parent) if is_index_name(&stem) => parent.to_string_lossy().to_string(),
        _ => stem,
    };

    let dated = post_date(&name, &front_matter)
        .ok_or_else(|| ContentError::UndatedPost(rel.to_path_buf()))?;
    let slug = front_matter.slug.clone().unwrap_or_else(|| dated.slug.clone());
    let permalink = join_route(
        base_url,
        &[route_base, dated.route_segment().as_str(), slug.as_str()],
        false,
    );

    let title = front_matter
        .title
        .clone()
        .or_else(|| first_heading(body))
        .unwrap_or_else(|| naming::parse_entry_name(&dated.slug).display_title);
    let excerpt = body
        .split_once(TRUNCATE_MARKER)
        .map(|(before, _)| before.trim().to_string());

    Ok(Some(BlogPost {
        slug,
        title,
        date: dated.date(),
        permalink,
        source: rel.to_path_buf(),
        author: front_matter.author.clone(),
        tags: front_matter.tags.clone(),
        excerpt,
        body: body.to_string(),
        front_matter,
    }))
}

/// Date of a post: front matter `date` wins over the file name.
///
/// A front matter date may carry a time (`2021-03-04T10:00:00Z`,
/// `2021-03-04 10:00`); only the day is kept.
fn post_date(name: &str, front_matter: &FrontMatter) -> Option<DatedName> {
    let from_name = naming::parse_dated_name(name);
    match &front_matter.date {
        Some(date) => {
            let slug = from_name.as_ref().map(|d| d.slug.as_str()).unwrap_or(name);
            naming::parse_dated_name(&format!("{}-{slug}", day_of(date.trim())))
        }
        None => from_name,
    }
}

/// The `YYYY-MM-DD` part of a date or datetime.
fn day_of(date: &str) -> &str {
    match (date.get(..10), date.as_bytes().get(10)) {
        (Some(day), None | Some(b'T' | b' ')) => day,
        _ => date,
    }
}

// =============================================================================
// Markdown links between docs
// =============================================================================

/// Destinations of the markdown links in `body` that point at another
/// markdown file (`../guides/install.md`, `faq.md#top`).
pub fn doc_link_targets(body: &str) -> Vec<String> {
    Parser::new(body)
        .filter_map(|event| match event {
            Event::Start(Tag::Link { dest_url, .. }) => Some(dest_url.to_string()),
            _ => None,
        })
        .filter(|dest| {
            let path = dest.split(['#', '?']).next().unwrap_or_default();
            !dest.contains("://")
                && !dest.starts_with('/')
                && is_markdown(Path::new(path))
        })
        .collect()
}

/// Markdown links between docs whose target file is not a scanned doc.
pub fn broken_doc_links(docs: &[Doc]) -> Vec<LinkResolutionError> {
    let known: HashSet<PathBuf> = docs.iter().map(|d| d.source.clone()).collect();
    let mut broken = Vec::new();
    for doc in docs {
        let dir = doc.source.parent().unwrap_or(Path::new(""));
        for dest in doc_link_targets(&doc.body) {
            let file = dest.split(['#', '?']).next().unwrap_or_default();
            let resolved = normalize(&dir.join(file));
            if !resolved.is_some_and(|path| known.contains(&path)) {
                broken.push(LinkResolutionError {
                    label: Some(doc.id.clone()),
                    link: dest,
                    reason: "does not point to a doc".to_string(),
                });
            }
        }
    }
    broken
}

/// Fold `.` and `..` out of a relative path; `None` if it climbs above the root.
fn normalize(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    return None;
                }
            }
            Component::Normal(part) => out.push(part),
            _ => return None,
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    // =========================================================================
    // Front matter
    // =========================================================================

    #[test]
    fn front_matter_split() {
        let (block, body) = split_front_matter("---\nid: intro\n---\n# Intro\n");
        assert_eq!(block, Some("id: intro\n"));
        assert_eq!(body, "# Intro\n");
    }

    #[test]
    fn no_front_matter() {
        let (block, body) = split_front_matter("# Intro\n");
        assert_eq!(block, None);
        assert_eq!(body, "# Intro\n");
    }

    #[test]
    fn unclosed_front_matter_is_body() {
        let content = "---\nid: intro\n# Intro\n";
        assert_eq!(split_front_matter(content), (None, content));
    }

    #[test]
    fn crlf_front_matter() {
        let (block, body) = split_front_matter("---\r\ntitle: x\r\n---\r\nbody");
        assert_eq!(block, Some("title: x\r\n"));
        assert_eq!(body, "body");
    }

    #[test]
    fn front_matter_fields_and_extra() {
        let (fm, _) = parse_front_matter(
            Path::new("x.md"),
            "---\nid: faq\ntitle: \"FAQ\"\nsidebar_position: 2.5\ntags: [a, b]\nhide_title: true\n---\nbody",
        )
        .unwrap();
        assert_eq!(fm.id.as_deref(), Some("faq"));
        assert_eq!(fm.title.as_deref(), Some("FAQ"));
        assert_eq!(fm.sidebar_position, Some(2.5));
        assert_eq!(fm.tags, vec!["a", "b"]);
        assert_eq!(fm.extra["hide_title"], serde_yaml::Value::Bool(true));
    }

    #[test]
    fn empty_front_matter_is_default() {
        let (fm, body) = parse_front_matter(Path::new("x.md"), "---\n---\nbody").unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, "body");
    }

    #[test]
    fn malformed_front_matter_is_error() {
        let result = parse_front_matter(Path::new("x.md"), "---\ntitle: [unclosed\n---\n");
        assert!(matches!(result, Err(ContentError::FrontMatter { .. })));
    }

    #[test]
    fn heading_title() {
        assert_eq!(first_heading("intro\n# Network Files\n## Sub"), Some("Network Files".to_string()));
        assert_eq!(first_heading("## Only sub"), None);
    }

    // =========================================================================
    // Docs
    // =========================================================================

    #[test]
    fn docs_ids_and_routes() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "index.md", "# Welcome");
        write(tmp.path(), "01-installation.md", "# Installation");
        write(tmp.path(), "02-tutorials/01-first-model.md", "# First Model");
        write(tmp.path(), "02-tutorials/_partial.md", "# Partial");
        write(tmp.path(), "faq.md", "---\nid: questions\n---\n# FAQ");
        write(tmp.path(), "notes.txt", "not markdown");

        let docs = scan_docs(tmp.path(), "/", "docs").unwrap();
        let pairs: Vec<(&str, &str)> = docs
            .iter()
            .map(|d| (d.id.as_str(), d.permalink.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("installation", "/docs/installation"),
                ("tutorials/first-model", "/docs/tutorials/first-model"),
                ("questions", "/docs/questions"),
                ("index", "/docs/"),
            ]
        );
        assert_eq!(docs[0].sidebar_position, Some(1.0));
        assert_eq!(docs[1].title, "First Model");
    }

    #[test]
    fn docs_slug_overrides_route() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "guides/a.md", "---\nslug: custom\n---\n");
        write(tmp.path(), "guides/b.md", "---\nslug: /top\n---\n");
        let docs = scan_docs(tmp.path(), "/site/", "docs").unwrap();
        assert_eq!(docs[0].permalink, "/site/docs/guides/custom");
        assert_eq!(docs[1].permalink, "/site/docs/top");
        assert_eq!(docs[0].title, "a");
    }

    #[test]
    fn docs_drafts_skipped() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.md", "---\ndraft: true\n---\n");
        write(tmp.path(), "b.md", "# B");
        let docs = scan_docs(tmp.path(), "/", "docs").unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "b");
    }

    #[test]
    fn duplicate_doc_id_is_error() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "01-intro.md", "");
        write(tmp.path(), "intro.md", "");
        let result = scan_docs(tmp.path(), "/", "docs");
        assert!(matches!(result, Err(ContentError::DuplicateDocId { id, .. }) if id == "intro"));
    }

    #[test]
    fn missing_docs_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(scan_docs(&tmp.path().join("nope"), "/", "docs").unwrap().is_empty());
    }

    // =========================================================================
    // Blog
    // =========================================================================

    #[test]
    fn blog_routes_and_order() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "2018-02-05-david-grains.md", "---\nauthor: Jon\n---\n# Grains\nintro\n<!--truncate-->\nrest");
        write(tmp.path(), "2020-06-01-release/index.md", "---\ntitle: Release\n---\n");
        write(tmp.path(), "2019-01-01-old.md", "---\ndraft: true\n---\n");

        let posts = scan_blog(tmp.path(), "/", "blog").unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].permalink, "/blog/2020/06/01/release");
        assert_eq!(posts[0].title, "Release");
        assert_eq!(posts[1].permalink, "/blog/2018/02/05/david-grains");
        assert_eq!(posts[1].title, "Grains");
        assert_eq!(posts[1].author.as_deref(), Some("Jon"));
        assert_eq!(posts[1].excerpt.as_deref(), Some("# Grains\nintro"));
    }

    #[test]
    fn undated_post_uses_front_matter_date() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "welcome.md", "---\ndate: 2021-03-04\n---\n");
        let posts = scan_blog(tmp.path(), "/", "blog").unwrap();
        assert_eq!(posts[0].date, "2021-03-04");
        assert_eq!(posts[0].permalink, "/blog/2021/03/04/welcome");
    }

    #[test]
    fn front_matter_date_with_time() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "welcome.md", "---\ndate: 2021-03-04T10:00:00Z\n---\n");
        write(tmp.path(), "notes.md", "---\ndate: 2021-03-05 10:00\n---\n");
        let posts = scan_blog(tmp.path(), "/", "blog").unwrap();
        assert_eq!(posts[0].permalink, "/blog/2021/03/05/notes");
        assert_eq!(posts[1].date, "2021-03-04");
        assert_eq!(posts[1].permalink, "/blog/2021/03/04/welcome");
    }

    #[test]
    fn front_matter_date_with_trailing_text_is_rejected() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "welcome.md", "---\ndate: 2021-03-04x\n---\n");
        let result = scan_blog(tmp.path(), "/", "blog");
        assert!(matches!(result, Err(ContentError::UndatedPost(_))));
    }

    #[test]
    fn undated_post_is_error() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "welcome.md", "# Hi");
        let result = scan_blog(tmp.path(), "/", "blog");
        assert!(matches!(result, Err(ContentError::UndatedPost(_))));
    }

    #[test]
    fn doc_link_targets_keep_relative_markdown_only() {
        let body = "See [install](../install.md), [faq](faq.md#top), \
                    [site](https://x.io/a.md), [abs](/docs/a.md) and [img](a.png).";
        assert_eq!(doc_link_targets(body), vec!["../install.md", "faq.md#top"]);
    }

    #[test]
    fn broken_doc_links_found() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "install.md", "# Install\n[next](guides/run.md)");
        write(tmp.path(), "guides/run.md", "[back](../install.md) [gone](../missing.md) [up](../../x.md)");
        let docs = scan_docs(tmp.path(), "/", "docs").unwrap();
        let broken = broken_doc_links(&docs);
        let links: Vec<(&str, &str)> = broken
            .iter()
            .map(|e| (e.label.as_deref().unwrap_or_default(), e.link.as_str()))
            .collect();
        assert_eq!(links, vec![("guides/run", "../missing.md"), ("guides/run", "../../x.md")]);
    }

    #[test]
    fn join_route_rules() {
        assert_eq!(join_route("/", &["docs", "a"], false), "/docs/a");
        assert_eq!(join_route("/x/", &["docs", ""], true), "/x/docs/");
        assert_eq!(join_route("/", &["docs", "/top"], false), "/docs/top");
    }
}
