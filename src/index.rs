//! Client-side navigation index.
//!
//! A JSON blob the browser loads to map doc ids to titles, routes and
//! sidebar placement, plus the list of docs versions for the version
//! switcher:
//!
//! ```json
//! {
//!   "versions": [{ "name": "current", "label": "Develop", "path": "/docs/" }],
//!   "docs": [
//!     { "id": "install", "title": "Installation", "permalink": "/docs/install",
//!       "sidebar": "docs", "categories": ["Getting Started"], "position": 1 }
//!   ]
//! }
//! ```
//!
//! The file is written as `doc-index.<hash>.json`, where the hash is the
//! first 8 hex digits of the SHA-256 of its contents, so a changed index
//! gets a new name.

use crate::config::SiteConfig;
use crate::content::Doc;
use crate::sidebar::Sidebars;
use crate::versions::{CURRENT_VERSION, VersionMap, VersionMeta};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("cannot write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot serialize doc index: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocIndex {
    pub versions: Vec<IndexedVersion>,
    pub docs: Vec<DocIndexEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedVersion {
    pub name: String,
    pub label: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocIndexEntry {
    pub id: String,
    pub title: String,
    pub permalink: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

/// Build the index for `docs` as placed by `sidebars`.
///
/// Docs appear in sidebar order, sidebars in file order; docs no sidebar
/// mentions follow, ordered by permalink.
pub fn build_doc_index(config: &SiteConfig, docs: &[Doc], sidebars: &Sidebars) -> DocIndex {
    let placements = sidebars.placements();
    let sidebar_order: Vec<&str> = sidebars.names().collect();

    let mut entries: Vec<DocIndexEntry> = docs
        .iter()
        .map(|doc| {
            let placement = placements.get(&doc.id);
            DocIndexEntry {
                id: doc.id.clone(),
                title: doc.sidebar_label.clone().unwrap_or_else(|| doc.title.clone()),
                permalink: doc.permalink.clone(),
                sidebar: placement.map(|p| p.sidebar.clone()),
                categories: placement.map(|p| p.categories.clone()).unwrap_or_default(),
                position: placement.map(|p| p.position),
            }
        })
        .collect();

    entries.sort_by_key(|entry| {
        let sidebar_rank = entry
            .sidebar
            .as_deref()
            .and_then(|name| sidebar_order.iter().position(|s| *s == name))
            .unwrap_or(usize::MAX);
        (
            sidebar_rank,
            entry.position.unwrap_or(usize::MAX),
            entry.permalink.clone(),
        )
    });

    DocIndex {
        versions: indexed_versions(config),
        docs: entries,
    }
}

/// `segment` as a directory under `parent` (which ends in `/`). An empty
/// segment is `parent` itself.
fn sub_path(parent: &str, segment: &str) -> String {
    match segment.trim_matches('/') {
        "" => parent.to_string(),
        segment => format!("{parent}{segment}/"),
    }
}

/// Versions for the switcher, `current` first when it is not configured.
fn indexed_versions(config: &SiteConfig) -> Vec<IndexedVersion> {
    let (versions, route_base, last_version) = match config.docs_options() {
        Some(docs) => (
            docs.versions.clone(),
            docs.route_base(),
            docs.last_version.as_deref().unwrap_or(CURRENT_VERSION),
        ),
        None => (VersionMap::default(), "docs", CURRENT_VERSION),
    };

    let implicit_current = versions.current().is_none().then(|| {
        (
            CURRENT_VERSION,
            VersionMeta {
                label: Some("Next".to_string()),
                ..Default::default()
            },
        )
    });

    let root = sub_path(&config.base_url, route_base);
    implicit_current
        .iter()
        .map(|(name, meta)| (*name, meta))
        .chain(versions.iter())
        .map(|(name, meta)| {
            let path = match &meta.path {
                Some(path) => sub_path(&root, path),
                None if name == last_version => root.clone(),
                None if name == CURRENT_VERSION => format!("{root}next/"),
                None => format!("{root}{name}/"),
            };
            let label = meta.label.clone().unwrap_or_else(|| {
                if name == CURRENT_VERSION {
                    "Next".to_string()
                } else {
                    name.to_string()
                }
            });
            IndexedVersion {
                name: name.to_string(),
                label,
                path,
            }
        })
        .collect()
}

/// Write `index` into `out_dir` as `doc-index.<hash>.json`, returning the path.
pub fn write_doc_index(index: &DocIndex, out_dir: &Path) -> Result<PathBuf, IndexError> {
    let json = serde_json::to_string(index)?;
    let digest = format!("{:x}", Sha256::digest(json.as_bytes()));
    let path = out_dir.join(format!("doc-index.{}.json", &digest[..8]));

    fs::create_dir_all(out_dir).map_err(|source| IndexError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;
    fs::write(&path, json).map_err(|source| IndexError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigFormat, load_str};
    use crate::sidebar::parse_sidebars;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    fn doc(id: &str, title: &str) -> Doc {
        Doc {
            id: id.to_string(),
            title: title.to_string(),
            permalink: format!("/docs/{id}"),
            source: PathBuf::from(format!("{id}.md")),
            sidebar_position: None,
            sidebar_label: None,
            front_matter: Default::default(),
            body: String::new(),
        }
    }

    fn config(versions: &str) -> SiteConfig {
        load_str(
            &format!(
                r#"{{"title": "Demo", "baseUrl": "/", "presets": [["classic", {{"docs": {{"versions": {versions}}}}}]]}}"#
            ),
            ConfigFormat::Json,
        )
        .unwrap()
    }

    #[test]
    fn docs_follow_sidebar_order() {
        let sidebars = parse_sidebars(&json!({
            "docs": ["install", {"Guides": ["network"]}]
        }))
        .unwrap();
        let docs = vec![doc("network", "Network"), doc("extra", "Extra"), doc("install", "Install")];
        let index = build_doc_index(&config("{}"), &docs, &sidebars);

        let ids: Vec<&str> = index.docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["install", "network", "extra"]);
        assert_eq!(index.docs[1].categories, vec!["Guides"]);
        assert_eq!(index.docs[1].sidebar.as_deref(), Some("docs"));
        assert_eq!(index.docs[2].sidebar, None);
    }

    #[test]
    fn sidebar_label_is_preferred() {
        let mut d = doc("install", "Installing UCLCHEM");
        d.sidebar_label = Some("Install".to_string());
        let index = build_doc_index(&config("{}"), &[d], &Sidebars::default());
        assert_eq!(index.docs[0].title, "Install");
    }

    #[test]
    fn implicit_current_version_comes_first() {
        let index = build_doc_index(
            &config(r#"{"v3.1.0": {"label": "3.1.0"}}"#),
            &[],
            &Sidebars::default(),
        );
        assert_eq!(
            index.versions,
            vec![
                IndexedVersion {
                    name: "current".to_string(),
                    label: "Next".to_string(),
                    path: "/docs/".to_string(),
                },
                IndexedVersion {
                    name: "v3.1.0".to_string(),
                    label: "3.1.0".to_string(),
                    path: "/docs/v3.1.0/".to_string(),
                },
            ]
        );
    }

    #[test]
    fn configured_current_label_is_kept() {
        let index = build_doc_index(
            &config(r#"{"current": {"label": "Develop"}}"#),
            &[],
            &Sidebars::default(),
        );
        assert_eq!(index.versions.len(), 1);
        assert_eq!(index.versions[0].label, "Develop");
    }

    #[test]
    fn last_version_takes_the_root() {
        let config = load_str(
            r#"{"title": "Demo", "baseUrl": "/uclchem/", "presets": [["classic", {"docs": {
                "lastVersion": "v3", "versions": {"current": {}, "v3": {}}
            }}]]}"#,
            ConfigFormat::Json,
        )
        .unwrap();
        let index = build_doc_index(&config, &[], &Sidebars::default());
        let paths: Vec<&str> = index.versions.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, vec!["/uclchem/docs/next/", "/uclchem/docs/"]);
    }

    #[test]
    fn root_route_base_has_single_slash() {
        let config = load_str(
            r#"{"title": "Demo", "baseUrl": "/", "presets": [["classic", {"docs": {
                "routeBasePath": "/", "versions": {"current": {}, "v1": {}}
            }}]]}"#,
            ConfigFormat::Json,
        )
        .unwrap();
        let index = build_doc_index(&config, &[], &Sidebars::default());
        let paths: Vec<&str> = index.versions.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, vec!["/", "/v1/"]);
    }

    #[test]
    fn written_name_carries_content_hash() {
        let tmp = TempDir::new().unwrap();
        let index = DocIndex::default();
        let path = write_doc_index(&index, &tmp.path().join("out")).unwrap();

        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("doc-index."));
        assert!(name.ends_with(".json"));
        assert_eq!(name.len(), "doc-index.".len() + 8 + ".json".len());

        let reread: DocIndex = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(reread, index);

        // Same content, same name.
        assert_eq!(write_doc_index(&index, &tmp.path().join("out")).unwrap(), path);
    }
}
