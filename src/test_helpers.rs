//! Shared test utilities for the docsite test suite.
//!
//! Provides fixture setup and lookup helpers that work with a loaded
//! [`Site`](crate::site::Site).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let site = Site::load(tmp.path(), None).unwrap();
//!
//! let doc = find_doc(&site, "tutorials/first-model");
//! assert_eq!(doc.permalink, "/docs/tutorials/first-model");
//!
//! let item = find_nav_item(&site.nav.navbar, "Docs");
//! assert_eq!(item.target.href(), Some("/docs/"));
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::content::{BlogPost, Doc};
use crate::landing::ProjectLandingPage;
use crate::nav::ResolvedNavItem;
use crate::site::Site;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
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
// Site lookups: panic with the available candidates on miss
// =========================================================================

/// Find a doc by id. Panics if not found.
pub fn find_doc<'a>(site: &'a Site, id: &str) -> &'a Doc {
    site.docs.iter().find(|d| d.id == id).unwrap_or_else(|| {
        let ids: Vec<&str> = site.docs.iter().map(|d| d.id.as_str()).collect();
        panic!("doc '{id}' not found. Available: {ids:?}")
    })
}

/// Find a blog post by slug. Panics if not found.
pub fn find_post<'a>(site: &'a Site, slug: &str) -> &'a BlogPost {
    site.blog.iter().find(|p| p.slug == slug).unwrap_or_else(|| {
        let slugs: Vec<&str> = site.blog.iter().map(|p| p.slug.as_str()).collect();
        panic!("post '{slug}' not found. Available: {slugs:?}")
    })
}

/// Find a landing page by slug. Panics if not found.
pub fn find_landing_page<'a>(site: &'a Site, slug: &str) -> &'a ProjectLandingPage {
    site.landing_pages
        .iter()
        .find(|p| p.slug == slug)
        .unwrap_or_else(|| {
            let slugs: Vec<&str> = site.landing_pages.iter().map(|p| p.slug.as_str()).collect();
            panic!("landing page '{slug}' not found. Available: {slugs:?}")
        })
}

/// Find a navbar item by label, searching dropdowns too. Panics if not found.
pub fn find_nav_item<'a>(items: &'a [ResolvedNavItem], label: &str) -> &'a ResolvedNavItem {
    fn search<'a>(items: &'a [ResolvedNavItem], label: &str) -> Option<&'a ResolvedNavItem> {
        items.iter().find_map(|item| {
            if item.label == label {
                Some(item)
            } else {
                search(&item.items, label)
            }
        })
    }
    search(items, label).unwrap_or_else(|| {
        let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
        panic!("nav item '{label}' not found. Top level: {labels:?}")
    })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All doc ids in scan order.
pub fn doc_ids(site: &Site) -> Vec<&str> {
    site.docs.iter().map(|d| d.id.as_str()).collect()
}

/// All navbar labels at the top level, in order.
pub fn nav_labels(items: &[ResolvedNavItem]) -> Vec<&str> {
    items.iter().map(|i| i.label.as_str()).collect()
}
