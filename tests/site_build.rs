//! End-to-end tests over the fixture site: load it, then emit the doc index
//! and the landing pages into a temp directory.
//!
//! Run with: cargo test --test site_build

use docsite::index::{self, DocIndex};
use docsite::landing;
use docsite::output;
use docsite::site::Site;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture_site() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site")
}

fn load() -> Site {
    Site::load(&fixture_site(), None).unwrap()
}

#[test]
fn doc_index_follows_sidebar() {
    let site = load();
    let doc_index = index::build_doc_index(&site.config, &site.docs, &site.sidebars);

    let ids: Vec<&str> = doc_index.docs.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "index",
            "install",
            "questions",
            "tutorials/first-model",
            "tutorials/running-a-grid",
        ]
    );

    let intro = &doc_index.docs[0];
    assert_eq!(intro.title, "Intro");
    assert_eq!(intro.permalink, "/docs/");

    let questions = &doc_index.docs[2];
    assert_eq!(questions.sidebar.as_deref(), Some("docs"));
    assert_eq!(questions.categories, vec!["Getting Started"]);

    let labels: Vec<&str> = doc_index.versions.iter().map(|v| v.label.as_str()).collect();
    assert_eq!(labels, vec!["Develop", "3.1.0"]);
}

#[test]
fn doc_index_file_reads_back() {
    let site = load();
    let tmp = TempDir::new().unwrap();
    let doc_index = index::build_doc_index(&site.config, &site.docs, &site.sidebars);
    let path = index::write_doc_index(&doc_index, tmp.path()).unwrap();

    let reread: DocIndex = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(reread, doc_index);
}

#[test]
fn landing_pages_are_written_with_site_chrome() {
    let site = load();
    let tmp = TempDir::new().unwrap();
    let written =
        landing::write_landing_pages(&site.config, &site.nav, &site.landing_pages, tmp.path())
            .unwrap();

    assert_eq!(
        written,
        vec![tmp.path().join("3dpdr/index.html"), tmp.path().join("index.html")]
    );

    let home = fs::read_to_string(tmp.path().join("index.html")).unwrap();
    assert!(home.contains("<title>UCLCHEM</title>"));
    assert!(home.contains("<strong>gas-grain chemical code</strong>"));
    assert!(home.contains("University College London"));
    assert!(!home.contains("Leiden Observatory"));
    assert!(home.contains("Copyright © UCLCHEM."));

    let pdr = fs::read_to_string(tmp.path().join("3dpdr/index.html")).unwrap();
    assert!(pdr.contains("<title>3D-PDR - UCLCHEM</title>"));
    assert!(pdr.contains(r#"href="/3DPDR_manual.pdf""#));
    assert!(pdr.contains("Bisbas et al. (2012)"));
}

#[test]
fn check_output_summarizes_the_site() {
    let site = load();
    let lines = output::format_check_output(&site);

    assert_eq!(lines[0], "Config");
    assert_eq!(lines[1], "    docusaurus.config.json");
    assert!(lines.contains(&"001 Installation → /docs/install".to_string()));
    assert!(lines.contains(&"2020-06-01 UCLCHEM v2.0 → /blog/2020/06/01/release".to_string()));
    assert_eq!(
        lines.last().map(String::as_str),
        Some("5 docs, 2 posts, 2 landing pages, 1 sidebar")
    );
}

#[test]
fn nav_output_lists_dropdown_children() {
    let site = load();
    let lines = output::format_nav(&site.nav);
    assert_eq!(
        &lines[..6],
        &[
            "Navbar",
            "001 Docs → /docs/",
            "002 Blog → /blog",
            "003 Projects",
            "    001 3D-PDR → /3dpdr",
            "    002 UCLCHEM → /",
        ]
    );
}
