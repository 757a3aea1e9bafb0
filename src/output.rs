//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Each entity (nav
//! item, doc, post, landing page) leads with its positional index and title,
//! with routes after an arrow and source files as indented `Source:` lines.
//!
//! # Output Format
//!
//! ## Nav
//!
//! ```text
//! Navbar
//! 001 Docs → /docs/
//! 002 Projects
//!     001 3D-PDR → /3dpdr
//! 003 GitHub → https://github.com/uclchem (external, right)
//!
//! Footer
//! Docs
//!     001 Getting Started → /docs/
//! ```
//!
//! ## Check
//!
//! ```text
//! Config
//!     docusaurus.config.json
//!
//! Docs
//! 001 Installation → /docs/install
//!     Source: 01-install.md
//!
//! Blog
//! 2018-02-05 David Grains → /blog/2018/02/05/david-grains
//!     Source: 2018-02-05-david-grains.md
//!
//! Landing pages
//! 001 3D-PDR → /3dpdr
//!
//! 4 docs, 2 posts, 3 landing pages, 1 sidebar
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::content::{BlogPost, Doc};
use crate::index::DocIndex;
use crate::nav::{NavTarget, ResolvedNavItem, SiteNav};
use crate::site::Site;
use crate::versions::{MatrixEntry, VersionsManifest};
use std::path::{Path, PathBuf};

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + title, with an optional route.
///
/// ```text
/// 001 Docs → /docs/
/// 002 Projects
/// ```
fn entity_header(index: usize, title: &str, route: Option<&str>) -> String {
    match route {
        Some(r) => format!("{} {} → {}", format_index(index), title, r),
        None => format!("{} {}", format_index(index), title),
    }
}

/// Route text for a nav target, with a note for anything not internal.
fn target_text(target: &NavTarget) -> Option<String> {
    match target {
        NavTarget::Internal(link) => Some(link.clone()),
        NavTarget::External(link) => Some(format!("{link} (external)")),
        NavTarget::Unresolved(link) => Some(format!("{link} (unresolved)")),
        NavTarget::Dropdown => None,
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Nav output
// ============================================================================

fn nav_lines(items: &[ResolvedNavItem], depth: usize, lines: &mut Vec<String>) {
    for (i, item) in items.iter().enumerate() {
        let mut route = target_text(&item.target);
        if depth == 0 && item.position == crate::config::Position::Right {
            route = route.map(|r| match r.strip_suffix(')') {
                Some(open) => format!("{open}, right)"),
                None => format!("{r} (right)"),
            });
        }
        lines.push(format!(
            "{}{}",
            indent(depth),
            entity_header(i + 1, &item.label, route.as_deref())
        ));
        nav_lines(&item.items, depth + 1, lines);
    }
}

/// Format resolved navbar and footer.
pub fn format_nav(nav: &SiteNav) -> Vec<String> {
    let mut lines = vec!["Navbar".to_string()];
    nav_lines(&nav.navbar, 0, &mut lines);

    if !nav.footer.is_empty() {
        lines.push(String::new());
        lines.push("Footer".to_string());
        for group in &nav.footer {
            lines.push(group.title.clone().unwrap_or_else(|| "(untitled)".to_string()));
            for (i, link) in group.items.iter().enumerate() {
                lines.push(format!(
                    "{}{}",
                    indent(1),
                    entity_header(i + 1, &link.label, target_text(&link.target).as_deref())
                ));
            }
        }
    }
    lines
}

pub fn print_nav(nav: &SiteNav) {
    for line in format_nav(nav) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format the docs list.
pub fn format_docs(docs: &[Doc]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, doc) in docs.iter().enumerate() {
        lines.push(entity_header(i + 1, &doc.title, Some(doc.permalink.as_str())));
        lines.push(format!("{}Source: {}", indent(1), doc.source.display()));
    }
    lines
}

/// Format the blog list, newest first.
pub fn format_blog(posts: &[BlogPost]) -> Vec<String> {
    let mut lines = Vec::new();
    for post in posts {
        lines.push(format!("{} {} → {}", post.date, post.title, post.permalink));
        lines.push(format!("{}Source: {}", indent(1), post.source.display()));
    }
    lines
}

/// Format everything `check` found in a site.
pub fn format_check_output(site: &Site) -> Vec<String> {
    let mut lines = vec!["Config".to_string()];
    let config_name = site
        .config_path
        .strip_prefix(&site.root)
        .unwrap_or(site.config_path.as_path());
    lines.push(format!("{}{}", indent(1), config_name.display()));

    if !site.docs.is_empty() {
        lines.push(String::new());
        lines.push("Docs".to_string());
        lines.extend(format_docs(&site.docs));
    }
    if !site.blog.is_empty() {
        lines.push(String::new());
        lines.push("Blog".to_string());
        lines.extend(format_blog(&site.blog));
    }
    if !site.landing_pages.is_empty() {
        lines.push(String::new());
        lines.push("Landing pages".to_string());
        for (i, page) in site.landing_pages.iter().enumerate() {
            let title = page.title.as_deref().unwrap_or(&site.config.title);
            lines.push(entity_header(
                i + 1,
                title,
                Some(page.route(&site.config.base_url).as_str()),
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "{}, {}, {}, {}",
        plural(site.docs.len(), "doc"),
        plural(site.blog.len(), "post"),
        plural(site.landing_pages.len(), "landing page"),
        plural(site.sidebars.0.len(), "sidebar"),
    ));
    lines
}

pub fn print_check_output(site: &Site) {
    for line in format_check_output(site) {
        println!("{}", line);
    }
}

// ============================================================================
// Index, landing and versions output
// ============================================================================

pub fn format_index_output(index: &DocIndex, path: &Path) -> Vec<String> {
    vec![format!(
        "Wrote {} ({}, {})",
        path.display(),
        plural(index.docs.len(), "doc"),
        plural(index.versions.len(), "version"),
    )]
}

pub fn print_index_output(index: &DocIndex, path: &Path) {
    for line in format_index_output(index, path) {
        println!("{}", line);
    }
}

/// Format written landing pages as paths relative to `out_dir`.
pub fn format_landing_output(written: &[PathBuf], out_dir: &Path) -> Vec<String> {
    let mut lines: Vec<String> = written
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let rel = path.strip_prefix(out_dir).unwrap_or(path.as_path());
            format!("{} {}", format_index(i + 1), rel.display())
        })
        .collect();
    lines.push(format!("Generated {}", plural(written.len(), "landing page")));
    lines
}

pub fn print_landing_output(written: &[PathBuf], out_dir: &Path) {
    for line in format_landing_output(written, out_dir) {
        println!("{}", line);
    }
}

pub fn format_versions(manifest: &VersionsManifest) -> Vec<String> {
    manifest
        .versions
        .iter()
        .enumerate()
        .map(|(i, v)| entity_header(i + 1, &v.name, Some(v.url.as_str())))
        .collect()
}

pub fn print_versions(manifest: &VersionsManifest) {
    for line in format_versions(manifest) {
        println!("{}", line);
    }
}

pub fn format_matrix(entries: &[MatrixEntry]) -> Vec<String> {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| format!("{} {} ({})", format_index(i + 1), e.name, e.git_ref))
        .collect()
}

pub fn print_matrix(entries: &[MatrixEntry]) {
    for line in format_matrix(entries) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Position;
    use crate::nav::{ResolvedFooterGroup, ResolvedFooterLink};
    use crate::versions::BuiltVersion;
    use pretty_assertions::assert_eq;

    fn item(label: &str, position: Position, target: NavTarget) -> ResolvedNavItem {
        ResolvedNavItem {
            label: label.to_string(),
            position,
            target,
            items: Vec::new(),
        }
    }

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn format_index_single_digit() {
        assert_eq!(format_index(1), "001");
    }

    #[test]
    fn format_index_large() {
        assert_eq!(format_index(1234), "1234");
    }

    #[test]
    fn entity_header_with_route() {
        assert_eq!(entity_header(2, "Docs", Some("/docs/")), "002 Docs → /docs/");
        assert_eq!(entity_header(1, "Projects", None), "001 Projects");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "doc"), "1 doc");
        assert_eq!(plural(0, "doc"), "0 docs");
    }

    // =========================================================================
    // Nav
    // =========================================================================

    #[test]
    fn nav_output_shape() {
        let mut projects = item("Projects", Position::Left, NavTarget::Dropdown);
        projects.items.push(item(
            "3D-PDR",
            Position::Left,
            NavTarget::Internal("/3dpdr".to_string()),
        ));
        let nav = SiteNav {
            navbar: vec![
                item("Docs", Position::Left, NavTarget::Internal("/docs/".to_string())),
                projects,
                item(
                    "GitHub",
                    Position::Right,
                    NavTarget::External("https://github.com/uclchem".to_string()),
                ),
                item("Old", Position::Right, NavTarget::Internal("/old".to_string())),
            ],
            footer: vec![ResolvedFooterGroup {
                title: Some("Docs".to_string()),
                items: vec![ResolvedFooterLink {
                    label: "Start".to_string(),
                    target: NavTarget::Unresolved("../x".to_string()),
                }],
            }],
        };
        assert_eq!(
            format_nav(&nav),
            vec![
                "Navbar",
                "001 Docs → /docs/",
                "002 Projects",
                "    001 3D-PDR → /3dpdr",
                "003 GitHub → https://github.com/uclchem (external, right)",
                "004 Old → /old (right)",
                "",
                "Footer",
                "Docs",
                "    001 Start → ../x (unresolved)",
            ]
        );
    }

    #[test]
    fn nav_output_without_footer() {
        let nav = SiteNav::default();
        assert_eq!(format_nav(&nav), vec!["Navbar"]);
    }

    // =========================================================================
    // Versions and landing
    // =========================================================================

    #[test]
    fn versions_output() {
        let manifest = VersionsManifest {
            versions: vec![BuiltVersion {
                name: "develop".to_string(),
                url: "/develop/".to_string(),
            }],
        };
        assert_eq!(format_versions(&manifest), vec!["001 develop → /develop/"]);
    }

    #[test]
    fn matrix_output() {
        let entries = vec![MatrixEntry {
            git_ref: "v3.1.0".to_string(),
            name: "3.1.0".to_string(),
        }];
        assert_eq!(format_matrix(&entries), vec!["001 3.1.0 (v3.1.0)"]);
    }

    #[test]
    fn landing_output_relative_paths() {
        let out = PathBuf::from("/out");
        let written = vec![out.join("index.html"), out.join("3dpdr/index.html")];
        assert_eq!(
            format_landing_output(&written, &out),
            vec!["001 index.html", "002 3dpdr/index.html", "Generated 2 landing pages"]
        );
    }

    #[test]
    fn index_output_counts() {
        let index = DocIndex::default();
        assert_eq!(
            format_index_output(&index, Path::new("out/doc-index.0123abcd.json")),
            vec!["Wrote out/doc-index.0123abcd.json (0 docs, 0 versions)"]
        );
    }
}
