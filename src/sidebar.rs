//! Sidebar definitions.
//!
//! The sidebars file (named by the docs preset's `sidebarPath`) maps sidebar
//! names to ordered item trees:
//!
//! ```json
//! {
//!   "docs": [
//!     "install",
//!     { "type": "category", "label": "Tutorials",
//!       "link": { "type": "generated-index", "title": "Tutorials" },
//!       "items": ["first_model", "running_a_grid"] },
//!     { "Troubleshooting": ["trouble-compile", "trouble-integration"] },
//!     { "type": "category", "label": "Physics",
//!       "link": { "type": "doc", "id": "physics-core" },
//!       "items": ["physics-core", "physics-cloud"] },
//!     { "type": "link", "label": "GitHub", "href": "https://github.com/uclchem" }
//!   ]
//! }
//! ```
//!
//! A single-key object without `type` is shorthand for a category. A sidebar
//! may also be given as such an object directly (`"docs": {"Intro": [...]}`).
//!
//! Sidebars are checked against the scanned docs: every referenced id must
//! exist. Placement (sidebar, category trail, order) feeds the doc index.

use crate::content::Doc;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SidebarError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{location}: {message}")]
    Invalid { location: String, message: String },
}

fn invalid(location: &str, message: impl Into<String>) -> SidebarError {
    SidebarError::Invalid {
        location: location.to_string(),
        message: message.into(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SidebarItem {
    Doc {
        id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    Category {
        label: String,
        items: Vec<SidebarItem>,
        #[serde(skip_serializing_if = "Option::is_none")]
        link: Option<CategoryLink>,
        collapsed: bool,
    },
    Link {
        label: String,
        href: String,
    },
}

/// What clicking a category label opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CategoryLink {
    Doc {
        id: String,
    },
    GeneratedIndex {
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

/// Named sidebars in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Sidebars(pub Vec<(String, Vec<SidebarItem>)>);

/// Where a doc sits in the sidebars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub sidebar: String,
    /// Enclosing category labels, outermost first.
    pub categories: Vec<String>,
    /// Order within the sidebar, counting every doc entry from 0.
    pub position: usize,
}

// =============================================================================
// Parsing
// =============================================================================

pub fn load_sidebars(path: &Path) -> Result<Sidebars, SidebarError> {
    let content = fs::read_to_string(path).map_err(|source| SidebarError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&content).map_err(|source| SidebarError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    parse_sidebars(&value)
}

pub fn parse_sidebars(value: &Value) -> Result<Sidebars, SidebarError> {
    let Value::Object(sidebars) = value else {
        return Err(invalid("sidebars", "expected an object of named sidebars"));
    };
    let mut parsed = Vec::with_capacity(sidebars.len());
    for (name, items) in sidebars {
        let items = match items {
            Value::Array(list) => parse_items(list, name)?,
            Value::Object(map) => shorthand_categories(map, name)?,
            _ => return Err(invalid(name, "expected a list of items")),
        };
        parsed.push((name.clone(), items));
    }
    Ok(Sidebars(parsed))
}

fn parse_items(list: &[Value], at: &str) -> Result<Vec<SidebarItem>, SidebarError> {
    list.iter()
        .enumerate()
        .map(|(i, item)| parse_item(item, &format!("{at}[{i}]")))
        .collect()
}

fn shorthand_categories(map: &Map<String, Value>, at: &str) -> Result<Vec<SidebarItem>, SidebarError> {
    map.iter()
        .map(|(label, items)| shorthand_category(label, items, &format!("{at}.{label}")))
        .collect()
}

fn shorthand_category(label: &str, items: &Value, at: &str) -> Result<SidebarItem, SidebarError> {
    let Value::Array(list) = items else {
        return Err(invalid(at, "category shorthand needs a list of items"));
    };
    Ok(SidebarItem::Category {
        label: label.to_string(),
        items: parse_items(list, at)?,
        link: None,
        collapsed: true,
    })
}

fn parse_item(value: &Value, at: &str) -> Result<SidebarItem, SidebarError> {
    let obj = match value {
        Value::String(id) if !id.is_empty() => {
            return Ok(SidebarItem::Doc {
                id: id.clone(),
                label: None,
            });
        }
        Value::Object(obj) => obj,
        _ => return Err(invalid(at, "expected a doc id or an item object")),
    };

    let Some(kind) = obj.get("type") else {
        return match obj.iter().next() {
            Some((label, items)) if obj.len() == 1 => shorthand_category(label, items, at),
            _ => Err(invalid(at, "item has no `type`")),
        };
    };

    match kind.as_str() {
        Some("doc") => Ok(SidebarItem::Doc {
            id: required_str(obj, "id", at)?,
            label: optional_str(obj, "label"),
        }),
        Some("link") => Ok(SidebarItem::Link {
            label: required_str(obj, "label", at)?,
            href: required_str(obj, "href", at)?,
        }),
        Some("category") => {
            let label = required_str(obj, "label", at)?;
            let items = match obj.get("items") {
                Some(Value::Array(list)) => parse_items(list, &format!("{at}.items"))?,
                _ => return Err(invalid(at, format!("category \"{label}\" needs `items`"))),
            };
            let link = obj
                .get("link")
                .map(|link| parse_category_link(link, &format!("{at}.link")))
                .transpose()?;
            let collapsed = obj.get("collapsed").and_then(Value::as_bool).unwrap_or(true);
            Ok(SidebarItem::Category {
                label,
                items,
                link,
                collapsed,
            })
        }
        Some(other) => Err(invalid(at, format!("unsupported item type `{other}`"))),
        None => Err(invalid(at, "`type` must be a string")),
    }
}

fn parse_category_link(value: &Value, at: &str) -> Result<CategoryLink, SidebarError> {
    let Value::Object(obj) = value else {
        return Err(invalid(at, "expected an object"));
    };
    match obj.get("type").and_then(Value::as_str) {
        Some("doc") => Ok(CategoryLink::Doc {
            id: required_str(obj, "id", at)?,
        }),
        Some("generated-index") => Ok(CategoryLink::GeneratedIndex {
            title: optional_str(obj, "title"),
            description: optional_str(obj, "description"),
        }),
        _ => Err(invalid(at, "link type must be `doc` or `generated-index`")),
    }
}

fn required_str(obj: &Map<String, Value>, key: &str, at: &str) -> Result<String, SidebarError> {
    match obj.get(key).and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => Ok(s.to_string()),
        _ => Err(invalid(at, format!("`{key}` is required"))),
    }
}

fn optional_str(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

// =============================================================================
// Queries
// =============================================================================

impl Sidebars {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    /// Every doc id referenced by an item or a category link, in file order.
    pub fn doc_ids(&self) -> Vec<&str> {
        fn walk<'a>(items: &'a [SidebarItem], out: &mut Vec<&'a str>) {
            for item in items {
                match item {
                    SidebarItem::Doc { id, .. } => out.push(id),
                    SidebarItem::Category { items, link, .. } => {
                        if let Some(CategoryLink::Doc { id }) = link {
                            out.push(id);
                        }
                        walk(items, out);
                    }
                    SidebarItem::Link { .. } => {}
                }
            }
        }
        let mut ids = Vec::new();
        for (_, items) in &self.0 {
            walk(items, &mut ids);
        }
        ids
    }

    /// Referenced doc ids that no scanned doc has, each listed once.
    pub fn unknown_doc_ids(&self, docs: &[Doc]) -> Vec<String> {
        let known: HashSet<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        let mut reported = HashSet::new();
        self.doc_ids()
            .into_iter()
            .filter(|id| !known.contains(id) && reported.insert(*id))
            .map(str::to_string)
            .collect()
    }

    /// Placement of every referenced doc, keyed by id.
    ///
    /// A doc listed twice keeps its first placement. A doc that is only a
    /// category link is placed inside that category.
    pub fn placements(&self) -> BTreeMap<String, Placement> {
        let mut placed = BTreeMap::new();
        for (sidebar, items) in &self.0 {
            let mut walker = PlacementWalker {
                sidebar,
                trail: Vec::new(),
                position: 0,
                links: Vec::new(),
                placed: &mut placed,
            };
            walker.walk(items);
            for (id, placement) in walker.links {
                placed.entry(id).or_insert(placement);
            }
        }
        placed
    }
}

struct PlacementWalker<'a> {
    sidebar: &'a str,
    trail: Vec<String>,
    position: usize,
    links: Vec<(String, Placement)>,
    placed: &'a mut BTreeMap<String, Placement>,
}

impl PlacementWalker<'_> {
    fn placement(&self) -> Placement {
        Placement {
            sidebar: self.sidebar.to_string(),
            categories: self.trail.clone(),
            position: self.position,
        }
    }

    fn walk(&mut self, items: &[SidebarItem]) {
        for item in items {
            match item {
                SidebarItem::Doc { id, .. } => {
                    if !self.placed.contains_key(id) {
                        let placement = self.placement();
                        self.placed.insert(id.clone(), placement);
                    }
                    self.position += 1;
                }
                SidebarItem::Category { label, items, link, .. } => {
                    self.trail.push(label.clone());
                    if let Some(CategoryLink::Doc { id }) = link {
                        let placement = self.placement();
                        self.links.push((id.clone(), placement));
                    }
                    self.walk(items);
                    self.trail.pop();
                }
                SidebarItem::Link { .. } => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn doc(id: &str) -> Doc {
        Doc {
            id: id.to_string(),
            title: id.to_string(),
            permalink: format!("/docs/{id}"),
            source: PathBuf::from(format!("{id}.md")),
            sidebar_position: None,
            sidebar_label: None,
            front_matter: Default::default(),
            body: String::new(),
        }
    }

    fn uclchem_like() -> Sidebars {
        parse_sidebars(&json!({
            "docs": [
                "start",
                {"type": "category", "label": "Getting Started",
                 "link": {"type": "generated-index", "title": "Getting Started"},
                 "items": ["install", "network"]},
                {"Troubleshooting": ["trouble-compile"]},
                {"type": "category", "label": "Physics",
                 "link": {"type": "doc", "id": "physics-core"},
                 "items": ["physics-cloud", {"type": "doc", "id": "physics-core", "label": "Core"}]},
                {"type": "link", "label": "GitHub", "href": "https://github.com/uclchem"}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn parses_all_item_shapes() {
        let sidebars = uclchem_like();
        let (name, items) = &sidebars.0[0];
        assert_eq!(name, "docs");
        assert_eq!(items.len(), 5);
        assert!(matches!(&items[0], SidebarItem::Doc { id, .. } if id == "start"));
        assert!(matches!(
            &items[1],
            SidebarItem::Category { link: Some(CategoryLink::GeneratedIndex { .. }), .. }
        ));
        assert!(matches!(&items[2], SidebarItem::Category { label, .. } if label == "Troubleshooting"));
        assert!(matches!(&items[4], SidebarItem::Link { .. }));
    }

    #[test]
    fn object_sidebar_is_category_shorthand() {
        let sidebars = parse_sidebars(&json!({
            "docs": {"Introduction": ["a", "b"], "Guides": ["c"]}
        }))
        .unwrap();
        assert_eq!(sidebars.doc_ids(), vec!["a", "b", "c"]);
    }

    #[test]
    fn doc_ids_include_category_links() {
        assert_eq!(
            uclchem_like().doc_ids(),
            vec!["start", "install", "network", "trouble-compile", "physics-core", "physics-cloud", "physics-core"]
        );
    }

    #[test]
    fn unknown_ids_reported_once() {
        let docs: Vec<Doc> = ["start", "install", "network", "physics-cloud"]
            .iter()
            .map(|id| doc(id))
            .collect();
        assert_eq!(
            uclchem_like().unknown_doc_ids(&docs),
            vec!["trouble-compile", "physics-core"]
        );
    }

    #[test]
    fn placements_follow_order_and_trail() {
        let placed = uclchem_like().placements();
        assert_eq!(placed["start"].position, 0);
        assert!(placed["start"].categories.is_empty());
        assert_eq!(placed["network"].categories, vec!["Getting Started"]);
        assert_eq!(placed["network"].position, 2);
        assert_eq!(placed["physics-cloud"].position, 4);
        // listed as an item after being a link: the item placement wins
        assert_eq!(placed["physics-core"].position, 5);
        assert_eq!(placed["physics-core"].categories, vec!["Physics"]);
    }

    #[test]
    fn link_only_doc_is_placed_in_its_category() {
        let sidebars = parse_sidebars(&json!({
            "docs": [{"type": "category", "label": "Physics",
                      "link": {"type": "doc", "id": "overview"}, "items": ["a"]}]
        }))
        .unwrap();
        let placed = sidebars.placements();
        assert_eq!(placed["overview"].categories, vec!["Physics"]);
        assert_eq!(placed["overview"].position, 0);
    }

    #[test]
    fn invalid_items_name_their_location() {
        let err = parse_sidebars(&json!({"docs": ["a", {"type": "category", "label": "X"}]})).unwrap_err();
        assert_eq!(err.to_string(), "docs[1]: category \"X\" needs `items`");

        let err = parse_sidebars(&json!({"docs": [{"type": "autogenerated"}]})).unwrap_err();
        assert!(err.to_string().contains("unsupported item type `autogenerated`"));

        let err = parse_sidebars(&json!({"docs": [42]})).unwrap_err();
        assert!(matches!(err, SidebarError::Invalid { location, .. } if location == "docs[0]"));
    }

    #[test]
    fn collapsed_defaults_to_true() {
        let sidebars = parse_sidebars(&json!({
            "docs": [{"type": "category", "label": "A", "collapsed": false, "items": []}, {"B": []}]
        }))
        .unwrap();
        let items = &sidebars.0[0].1;
        assert!(matches!(items[0], SidebarItem::Category { collapsed: false, .. }));
        assert!(matches!(items[1], SidebarItem::Category { collapsed: true, .. }));
    }
}
