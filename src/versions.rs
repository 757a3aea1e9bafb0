//! Documentation versions.
//!
//! Two related concerns live here:
//!
//! - **Configured versions**: the `docs.versions` mapping of a docs preset,
//!   modeled as [`VersionMap`]. The key literally named `current` is the
//!   version built from the working docs directory.
//! - **Published versions**: the `versions.json` manifest describing which
//!   version directories a multi-version deployment actually contains, and
//!   the build matrix of git refs that produces them.
//!
//! ## Duplicate Keys
//!
//! JSON allows the same key twice in one object and most parsers silently
//! keep the last value. [`VersionMap`] keeps every entry in source order so
//! validation can report duplicates instead of losing one of them:
//!
//! ```json
//! { "current": { "label": "Next" }, "current": { "label": "Develop" } }
//! ```
//!
//! ## versions.json
//!
//! ```json
//! {
//!   "versions": [
//!     { "name": "latest", "url": "/latest/" },
//!     { "name": "v4.1.3", "url": "/v4.1.3/" }
//!   ]
//! }
//! ```

use regex::Regex;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;
use thiserror::Error;

/// Version key that denotes the working (unreleased) docs.
pub const CURRENT_VERSION: &str = "current";

/// Version segment of a deployed docs URL, e.g. `/develop/` or `/v4.1.3/`.
static VERSION_SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(develop|v[\d.]+)/").unwrap());

#[derive(Error, Debug)]
pub enum VersionsError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("git failed in {repo}: {message}")]
    Git { repo: PathBuf, message: String },
}

/// Banner shown on top of a docs version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionBanner {
    None,
    Unreleased,
    Unmaintained,
}

/// Display metadata for one configured docs version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VersionMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// URL segment of the version, relative to the docs route.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<VersionBanner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

/// Ordered version-label → metadata mapping that preserves duplicate keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VersionMap(Vec<(String, VersionMeta)>);

impl VersionMap {
    pub fn new(entries: Vec<(String, VersionMeta)>) -> Self {
        Self(entries)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VersionMeta)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// First entry with the given key.
    pub fn get(&self, key: &str) -> Option<&VersionMeta> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn current(&self) -> Option<&VersionMeta> {
        self.get(CURRENT_VERSION)
    }

    /// Keys that appear more than once, each reported once, in the order
    /// their first repetition is seen.
    pub fn duplicate_keys(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();
        for (key, _) in &self.0 {
            if !seen.insert(key.as_str()) && reported.insert(key.as_str()) {
                duplicates.push(key.as_str());
            }
        }
        duplicates
    }
}

impl Serialize for VersionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, meta) in &self.0 {
            map.serialize_entry(key, meta)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for VersionMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct VersionMapVisitor;

        impl<'de> Visitor<'de> for VersionMapVisitor {
            type Value = VersionMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping from version label to version metadata")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<VersionMap, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, meta)) = access.next_entry::<String, VersionMeta>()? {
                    entries.push((key, meta));
                }
                Ok(VersionMap(entries))
            }
        }

        deserializer.deserialize_map(VersionMapVisitor)
    }
}

// =============================================================================
// Published versions (versions.json)
// =============================================================================

/// One deployed docs version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuiltVersion {
    pub name: String,
    pub url: String,
}

/// Contents of `versions.json`, read by the client-side version switcher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionsManifest {
    pub versions: Vec<BuiltVersion>,
}

/// List the version directories under `root`, sorted by name.
///
/// A missing `root` is not an error: nothing has been built yet, so the
/// manifest is empty.
pub fn collect_built_versions(root: &Path) -> Result<VersionsManifest, VersionsError> {
    if !root.is_dir() {
        return Ok(VersionsManifest::default());
    }
    let io_err = |source| VersionsError::Io {
        path: root.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(root).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        if entry.file_type().map_err(io_err)?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();

    Ok(VersionsManifest {
        versions: names
            .into_iter()
            .map(|name| BuiltVersion {
                url: format!("/{name}/"),
                name,
            })
            .collect(),
    })
}

// =============================================================================
// Build matrix
// =============================================================================

/// One git ref to build docs from, and the directory name it publishes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixEntry {
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub name: String,
}

/// Build the version matrix: the latest branch first, then the `count`
/// newest `v*` release tags.
///
/// ```text
/// tags = [v4.0.0, v4.1.3, v4.1.10, nightly], count = 2
/// → [{main, latest}, {v4.1.10, 4.1.10}, {v4.1.3, 4.1.3}]
/// ```
pub fn version_matrix(tags: &[String], latest_branch: &str, count: usize) -> Vec<MatrixEntry> {
    let mut releases: Vec<&str> = tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| t.starts_with('v'))
        .collect();
    releases.sort_by(|a, b| compare_versions(b, a));
    releases.dedup();

    let mut matrix = vec![MatrixEntry {
        git_ref: latest_branch.to_string(),
        name: "latest".to_string(),
    }];
    matrix.extend(releases.into_iter().take(count).map(|tag| MatrixEntry {
        git_ref: tag.to_string(),
        name: tag.trim_start_matches('v').to_string(),
    }));
    matrix
}

/// Compare two `v`-prefixed tags by their numeric components, falling back
/// to plain string order when the numbers tie (`v4.0.0-rc1` vs `v4.0.0`).
fn compare_versions(a: &str, b: &str) -> Ordering {
    version_key(a)
        .cmp(&version_key(b))
        .then_with(|| a.cmp(b))
}

fn version_key(tag: &str) -> Vec<u64> {
    tag.trim_start_matches('v')
        .split('.')
        .map(|part| {
            let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
            digits.parse().unwrap_or(0)
        })
        .collect()
}

/// List the `v*` tags of a local git checkout.
pub fn list_repo_tags(repo: &Path) -> Result<Vec<String>, VersionsError> {
    let output = Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(["tag", "--list", "v*"])
        .output()
        .map_err(|source| VersionsError::Io {
            path: repo.to_path_buf(),
            source,
        })?;
    if !output.status.success() {
        return Err(VersionsError::Git {
            repo: repo.to_path_buf(),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

/// Detect which deployed version a page path belongs to.
///
/// - `"/develop/install.html"` → `Some("develop")`
/// - `"/v4.1.3/api/index.html"` → `Some("v4.1.3")`
/// - `"/blog/"` → `None`
pub fn detect_version(path: &str) -> Option<&str> {
    VERSION_SEGMENT_RE
        .captures(path)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}
