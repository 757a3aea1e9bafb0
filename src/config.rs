//! Site configuration module.
//!
//! Loads and validates the site configuration file that drives page
//! generation, navigation, and docs versioning. The configuration is built
//! once per build, read-only thereafter, and handed wholesale to whatever
//! consumes it.
//!
//! ## Config File Location
//!
//! The loader looks for the first of these in the site directory:
//!
//! ```text
//! site/
//! ├── docusaurus.config.json   # canonical
//! ├── docusaurus.config.toml
//! ├── docusaurus.config.yaml
//! └── docusaurus.config.yml
//! ```
//!
//! Field names are camelCase in every format.
//!
//! ## Example
//!
//! ```json
//! {
//!   "title": "UCLCHEM",
//!   "tagline": "A Gas-Grain Chemical Code for astrochemical modelling",
//!   "url": "https://uclchem.github.io",
//!   "baseUrl": "/",
//!   "onBrokenLinks": "log",
//!   "presets": [
//!     ["@docusaurus/preset-classic", {
//!       "docs": {
//!         "path": "docs",
//!         "sidebarPath": "sidebars.json",
//!         "versions": { "current": { "label": "Develop" } }
//!       },
//!       "blog": { "path": "blog" }
//!     }]
//!   ],
//!   "themeConfig": {
//!     "navbar": {
//!       "title": "UCLCHEM",
//!       "items": [
//!         { "to": "docs/", "label": "Docs", "position": "left" },
//!         { "href": "https://github.com/uclchem", "label": "GitHub", "position": "right" }
//!       ]
//!     }
//!   }
//! }
//! ```
//!
//! ## Errors
//!
//! - Malformed source data fails with [`ConfigError::Parse`].
//! - Invariant violations fail with [`ConfigError::Validation`], which lists
//!   every violation found rather than stopping at the first, so a config
//!   author can fix everything in one pass.
//! - Unknown keys are not fatal. They are logged as warnings with their full
//!   path (`themeConfig.navbar.itmes`) and otherwise ignored.

use crate::nav::LinkResolutionError;
use crate::versions::VersionMap;
use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// Config file names probed by [`find_config_file`], in priority order.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    "docusaurus.config.json",
    "docusaurus.config.toml",
    "docusaurus.config.yaml",
    "docusaurus.config.yml",
];

/// Location prefix used in violation messages for navbar items.
pub(crate) const NAVBAR_ITEMS: &str = "themeConfig.navbar.items";
/// Location prefix used in violation messages for footer links.
pub(crate) const FOOTER_LINKS: &str = "themeConfig.footer.links";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid site config:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),
    #[error("unresolvable links:\n  - {}", join_errors(.0))]
    LinkResolution(Vec<LinkResolutionError>),
    #[error("no site config in {} (looked for {})", .0.display(), CONFIG_FILE_NAMES.join(", "))]
    NotFound(PathBuf),
}

fn join_errors(errors: &[LinkResolutionError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n  - ")
}

/// Source format of a config file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// Format for a path; anything that is not `.toml`/`.yaml`/`.yml` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .as_deref()
        {
            Some("toml") => Self::Toml,
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

// =============================================================================
// Model
// =============================================================================

/// Root site configuration.
///
/// `title` and `baseUrl` are required; everything else is optional. Missing
/// required fields are reported by [`SiteConfig::validate`] together with
/// every other violation rather than failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    /// Site origin, e.g. `https://uclchem.github.io`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Path prefix all routes are served under. Starts and ends with `/`.
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stylesheets: Vec<Stylesheet>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scripts: Vec<Script>,
    /// Open key/value data for page templates (e.g. showcased `users`).
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub custom_fields: Map<String, Value>,
    pub on_broken_links: BrokenLinkPolicy,
    pub on_broken_markdown_links: BrokenLinkPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_slash: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub presets: Vec<Preset>,
    pub theme_config: ThemeConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub i18n: Option<I18nConfig>,
}

/// What to do with a link that cannot be resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrokenLinkPolicy {
    Ignore,
    Log,
    #[default]
    Warn,
    Throw,
}

/// A stylesheet reference: a bare URL or a `<link>` description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Stylesheet {
    Url(String),
    Link {
        href: String,
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        mime_type: Option<String>,
    },
}

impl Stylesheet {
    pub fn href(&self) -> &str {
        match self {
            Self::Url(href) | Self::Link { href, .. } => href,
        }
    }

    pub fn mime_type(&self) -> Option<&str> {
        match self {
            Self::Url(_) => None,
            Self::Link { mime_type, .. } => mime_type.as_deref(),
        }
    }
}

/// A script reference: a bare URL or a `<script>` description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Script {
    Url(String),
    Tag {
        src: String,
        #[serde(rename = "async", default, skip_serializing_if = "Option::is_none")]
        is_async: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        defer: Option<bool>,
    },
}

impl Script {
    pub fn src(&self) -> &str {
        match self {
            Self::Url(src) | Self::Tag { src, .. } => src,
        }
    }

    pub fn is_async(&self) -> bool {
        matches!(self, Self::Tag { is_async: Some(true), .. })
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Tag { defer: Some(true), .. })
    }
}

/// A named bundle of build-tool options.
///
/// Written either as a bare name (`"@docusaurus/preset-classic"`) or as a
/// `[name, options]` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub name: String,
    pub options: Option<PresetOptions>,
}

impl Serialize for Preset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.options {
            None => serializer.serialize_str(&self.name),
            Some(options) => {
                let mut pair = serializer.serialize_tuple(2)?;
                pair.serialize_element(&self.name)?;
                pair.serialize_element(options)?;
                pair.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Preset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PresetVisitor;

        impl<'de> Visitor<'de> for PresetVisitor {
            type Value = Preset;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a preset name or a [name, options] pair")
            }

            fn visit_str<E: de::Error>(self, name: &str) -> Result<Preset, E> {
                Ok(Preset {
                    name: name.to_string(),
                    options: None,
                })
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Preset, A::Error> {
                let name: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let options: Option<PresetOptions> = seq.next_element()?;
                if seq.next_element::<IgnoredAny>()?.is_some() {
                    return Err(de::Error::invalid_length(3, &self));
                }
                Ok(Preset { name, options })
            }
        }

        deserializer.deserialize_any(PresetVisitor)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PresetOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs: Option<DocsOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog: Option<BlogOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_analytics: Option<GoogleAnalytics>,
}

/// Options of the docs plugin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocsOptions {
    /// Docs content directory, relative to the site directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_base_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_last_update_author: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_last_update_time: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_version: Option<String>,
    #[serde(skip_serializing_if = "VersionMap::is_empty")]
    pub versions: VersionMap,
}

impl DocsOptions {
    pub fn content_path(&self) -> &str {
        self.path.as_deref().unwrap_or("docs")
    }

    pub fn route_base(&self) -> &str {
        self.route_base_path.as_deref().unwrap_or("docs")
    }
}

/// Options of the blog plugin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlogOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_base_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog_sidebar_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog_sidebar_count: Option<PostCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts_per_page: Option<PostCount>,
}

impl BlogOptions {
    pub fn content_path(&self) -> &str {
        self.path.as_deref().unwrap_or("blog")
    }

    pub fn route_base(&self) -> &str {
        self.route_base_path.as_deref().unwrap_or("blog")
    }
}

/// A post count: a number, or the keyword `"ALL"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostCount {
    Count(u32),
    Keyword(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<OneOrMany>,
}

/// A single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn to_vec(&self) -> Vec<&str> {
        match self {
            Self::One(s) => vec![s.as_str()],
            Self::Many(list) => list.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoogleAnalytics {
    #[serde(rename = "trackingID")]
    pub tracking_id: String,
    #[serde(rename = "anonymizeIP", default, skip_serializing_if = "Option::is_none")]
    pub anonymize_ip: Option<bool>,
}

/// Theme options: navbar, footer, color mode, syntax highlighting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navbar: Option<Navbar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<Footer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_mode: Option<ColorMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prism: Option<PrismConfig>,
    /// Social card image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_analytics: Option<GoogleAnalytics>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Navbar {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<Logo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<NavItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_on_scroll: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<NavbarStyle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavbarStyle {
    Primary,
    Dark,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Logo {
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src_dark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// One navbar entry.
///
/// Exactly one of `to` (internal route), `href` (external URL or raw path)
/// and `items` (dropdown) must be set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavItem {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<NavItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

impl NavItem {
    /// Names of the navigation targets that are set.
    pub fn targets(&self) -> Vec<&'static str> {
        let mut set = Vec::new();
        if self.to.is_some() {
            set.push("to");
        }
        if self.href.is_some() {
            set.push("href");
        }
        if self.items.is_some() {
            set.push("items");
        }
        set
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Footer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<FooterStyle>,
    pub links: Vec<FooterLinkGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<Logo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FooterStyle {
    Light,
    Dark,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterLinkGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub items: Vec<FooterLink>,
}

/// A footer link: exactly one of `to` or `href`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterLink {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColorMode {
    pub default_mode: ColorModeName,
    pub disable_switch: bool,
    pub respect_prefers_color_scheme: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorModeName {
    #[default]
    Light,
    Dark,
}

/// Syntax highlighting settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrismConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<PrismTheme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_theme: Option<PrismTheme>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_languages: Vec<String>,
}

/// Token → style mapping: a base `plain` style plus per-token overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrismTheme {
    pub plain: Map<String, Value>,
    pub styles: Vec<PrismStyle>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrismStyle {
    pub types: Vec<String>,
    pub style: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct I18nConfig {
    pub default_locale: String,
    pub locales: Vec<String>,
}

/// A user showcased on the home page, from `customFields.users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowcaseUser {
    pub caption: String,
    pub image: String,
    pub info_link: String,
    #[serde(default)]
    pub pinned: bool,
}

// =============================================================================
// Accessors
// =============================================================================

impl SiteConfig {
    /// Docs options of the first preset that configures docs.
    pub fn docs_options(&self) -> Option<&DocsOptions> {
        self.preset_options().find_map(|o| o.docs.as_ref())
    }

    /// Blog options of the first preset that configures a blog.
    pub fn blog_options(&self) -> Option<&BlogOptions> {
        self.preset_options().find_map(|o| o.blog.as_ref())
    }

    fn preset_options(&self) -> impl Iterator<Item = &PresetOptions> {
        self.presets.iter().filter_map(|p| p.options.as_ref())
    }

    pub fn navbar_items(&self) -> &[NavItem] {
        self.theme_config
            .navbar
            .as_ref()
            .map(|n| n.items.as_slice())
            .unwrap_or_default()
    }

    pub fn footer_links(&self) -> &[FooterLinkGroup] {
        self.theme_config
            .footer
            .as_ref()
            .map(|f| f.links.as_slice())
            .unwrap_or_default()
    }

    /// Showcased users from `customFields.users`.
    ///
    /// Empty when the field is absent. A malformed list is rejected by
    /// [`SiteConfig::validate`], so a validated config never loses entries here.
    pub fn showcase_users(&self) -> Vec<ShowcaseUser> {
        self.custom_fields
            .get("users")
            .and_then(|users| serde_json::from_value(users.clone()).ok())
            .unwrap_or_default()
    }

    /// Serialize back to pretty JSON with the same field names it was read with.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

// =============================================================================
// Validation
// =============================================================================

impl SiteConfig {
    /// Check every modeled invariant, reporting all violations at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(violations))
        }
    }

    /// Every invariant violation, in document order.
    pub fn violations(&self) -> Vec<String> {
        let mut v = Vec::new();

        if self.title.trim().is_empty() {
            v.push("title is required".to_string());
        }
        if self.base_url.is_empty() {
            v.push("baseUrl is required".to_string());
        } else if !self.base_url.starts_with('/') || !self.base_url.ends_with('/') {
            v.push(format!(
                "baseUrl `{}` must start and end with `/`",
                self.base_url
            ));
        }
        if let Some(url) = &self.url {
            check_site_url(url, &mut v);
        }
        if let Some(users) = self.custom_fields.get("users")
            && let Err(err) = serde_json::from_value::<Vec<ShowcaseUser>>(users.clone())
        {
            v.push(format!("customFields.users: {err}"));
        }

        for (i, preset) in self.presets.iter().enumerate() {
            if preset.name.trim().is_empty() {
                v.push(format!("presets[{i}]: preset name is required"));
            }
            if let Some(options) = &preset.options {
                check_preset_options(options, &format!("presets[{i}]"), &mut v);
            }
        }

        check_nav_items(self.navbar_items(), NAVBAR_ITEMS, 0, &mut v);
        check_footer_links(self.footer_links(), FOOTER_LINKS, &mut v);

        if let Some(i18n) = &self.i18n {
            check_i18n(i18n, &mut v);
        }

        v
    }
}

fn check_site_url(url: &str, v: &mut Vec<String>) {
    match Url::parse(url) {
        Err(err) => v.push(format!("url `{url}` is not a valid URL: {err}")),
        Ok(parsed) => {
            if !matches!(parsed.scheme(), "http" | "https") {
                v.push(format!("url `{url}` must use http or https"));
            }
            if parsed.path() != "/" {
                v.push(format!(
                    "url `{url}` must not contain a path (put it in baseUrl)"
                ));
            }
        }
    }
}

fn check_preset_options(options: &PresetOptions, at: &str, v: &mut Vec<String>) {
    if let Some(docs) = &options.docs {
        for key in docs.versions.duplicate_keys() {
            v.push(format!("{at}.docs.versions: duplicate version key `{key}`"));
        }
        if docs.versions.iter().any(|(key, _)| key.trim().is_empty()) {
            v.push(format!("{at}.docs.versions: version keys must not be empty"));
        }
    }
    if let Some(blog) = &options.blog {
        for (field, count) in [
            ("blogSidebarCount", &blog.blog_sidebar_count),
            ("postsPerPage", &blog.posts_per_page),
        ] {
            if let Some(PostCount::Keyword(word)) = count
                && word != "ALL"
            {
                v.push(format!(
                    "{at}.blog.{field}: expected a number or \"ALL\", got \"{word}\""
                ));
            }
        }
    }
    if let Some(ga) = &options.google_analytics
        && ga.tracking_id.trim().is_empty()
    {
        v.push(format!("{at}.googleAnalytics.trackingID is required"));
    }
}

/// Human name of a nav entry for violation messages: its label when set.
fn describe(at: &str, index: usize, label: &str) -> String {
    if label.trim().is_empty() {
        format!("{at}[{index}]")
    } else {
        format!("{at}[{index}] (\"{label}\")")
    }
}

/// Check navbar item invariants recursively.
///
/// `depth` is 0 for top-level items; dropdown children sit at depth 1 and
/// may not open another dropdown.
pub(crate) fn check_nav_items(items: &[NavItem], at: &str, depth: usize, v: &mut Vec<String>) {
    for (i, item) in items.iter().enumerate() {
        let name = describe(at, i, &item.label);
        if item.label.trim().is_empty() {
            v.push(format!("{name}: label is required"));
        }
        let targets = item.targets();
        match targets.len() {
            0 => v.push(format!(
                "{name}: no navigation target (set exactly one of `to`, `href`, `items`)"
            )),
            1 => {}
            _ => v.push(format!(
                "{name}: sets {} (exactly one of `to`, `href`, `items` is allowed)",
                targets
                    .iter()
                    .map(|t| format!("`{t}`"))
                    .collect::<Vec<_>>()
                    .join(" and ")
            )),
        }
        if let Some(children) = &item.items {
            if depth > 0 {
                v.push(format!("{name}: dropdown items cannot contain another dropdown"));
            } else if children.is_empty() {
                v.push(format!("{name}: dropdown has no items"));
            } else {
                check_nav_items(children, &format!("{at}[{i}].items"), depth + 1, v);
            }
        }
    }
}

pub(crate) fn check_footer_links(groups: &[FooterLinkGroup], at: &str, v: &mut Vec<String>) {
    for (g, group) in groups.iter().enumerate() {
        let group_at = format!("{at}[{g}].items");
        for (i, link) in group.items.iter().enumerate() {
            let name = describe(&group_at, i, &link.label);
            if link.label.trim().is_empty() {
                v.push(format!("{name}: label is required"));
            }
            match (&link.to, &link.href) {
                (Some(_), Some(_)) => v.push(format!(
                    "{name}: sets `to` and `href` (exactly one is allowed)"
                )),
                (None, None) => v.push(format!(
                    "{name}: no link target (set exactly one of `to`, `href`)"
                )),
                _ => {}
            }
        }
    }
}

fn check_i18n(i18n: &I18nConfig, v: &mut Vec<String>) {
    if i18n.default_locale.trim().is_empty() {
        v.push("i18n.defaultLocale is required".to_string());
    } else if !i18n.locales.is_empty() && !i18n.locales.contains(&i18n.default_locale) {
        v.push(format!(
            "i18n.defaultLocale `{}` is not listed in i18n.locales",
            i18n.default_locale
        ));
    }
    let mut seen = HashSet::new();
    for locale in &i18n.locales {
        if !seen.insert(locale.as_str()) {
            v.push(format!("i18n.locales: duplicate locale `{locale}`"));
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Find the site config file in `site_dir` (see [`CONFIG_FILE_NAMES`]).
pub fn find_config_file(site_dir: &Path) -> Result<PathBuf, ConfigError> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| site_dir.join(name))
        .find(|path| path.is_file())
        .ok_or_else(|| ConfigError::NotFound(site_dir.to_path_buf()))
}

/// Load, parse, and validate a site config file.
///
/// Reads the file and nothing else: no network access, no global state.
/// Unknown keys are logged as warnings; on any error no partial config is
/// returned.
pub fn load(path: &Path) -> Result<SiteConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = load_source(&content, ConfigFormat::from_path(path), path)?;
    debug!(
        config = %path.display(),
        nav_items = config.navbar_items().len(),
        presets = config.presets.len(),
        "site config loaded"
    );
    Ok(config)
}

/// Parse and validate config text that did not come from a file.
pub fn load_str(content: &str, format: ConfigFormat) -> Result<SiteConfig, ConfigError> {
    load_source(content, format, Path::new("<memory>"))
}

fn load_source(content: &str, format: ConfigFormat, origin: &Path) -> Result<SiteConfig, ConfigError> {
    let (config, ignored) = parse_with_ignored(content, format).map_err(|message| {
        ConfigError::Parse {
            path: origin.to_path_buf(),
            message,
        }
    })?;
    for field in &ignored {
        warn!(config = %origin.display(), field = %field, "unknown config field ignored");
    }
    config.validate()?;
    Ok(config)
}

/// Deserialize config text, collecting the paths of any unknown fields.
fn parse_with_ignored(
    content: &str,
    format: ConfigFormat,
) -> Result<(SiteConfig, Vec<String>), String> {
    let mut ignored = Vec::new();
    // Optional fields show up as `?` segments; drop them so the path reads
    // like the source document.
    let mut record = |path: serde_ignored::Path| {
        let dotted = path.to_string();
        ignored.push(
            dotted
                .split('.')
                .map(|segment| segment.trim_end_matches('?'))
                .filter(|segment| !segment.is_empty())
                .collect::<Vec<_>>()
                .join("."),
        );
    };

    let config = match format {
        ConfigFormat::Json => {
            let mut de = serde_json::Deserializer::from_str(content);
            let config: SiteConfig =
                serde_ignored::deserialize(&mut de, &mut record).map_err(|e| e.to_string())?;
            de.end().map_err(|e| e.to_string())?;
            config
        }
        ConfigFormat::Toml => {
            serde_ignored::deserialize(toml::Deserializer::new(content), &mut record)
                .map_err(|e| e.to_string())?
        }
        ConfigFormat::Yaml => {
            serde_ignored::deserialize(serde_yaml::Deserializer::from_str(content), &mut record)
                .map_err(|e| e.to_string())?
        }
    };
    Ok((config, ignored))
}

/// A complete, valid starter config, printed by `gen-config`.
pub fn stock_config() -> SiteConfig {
    SiteConfig {
        title: "My Project".to_string(),
        tagline: Some("Documentation for My Project".to_string()),
        url: Some("https://example.github.io".to_string()),
        base_url: "/".to_string(),
        organization_name: Some("example".to_string()),
        project_name: Some("example.github.io".to_string()),
        favicon: Some("img/favicon.ico".to_string()),
        presets: vec![Preset {
            name: "@docusaurus/preset-classic".to_string(),
            options: Some(PresetOptions {
                docs: Some(DocsOptions {
                    path: Some("docs".to_string()),
                    sidebar_path: Some("sidebars.json".to_string()),
                    versions: VersionMap::new(vec![(
                        crate::versions::CURRENT_VERSION.to_string(),
                        crate::versions::VersionMeta {
                            label: Some("Next".to_string()),
                            ..Default::default()
                        },
                    )]),
                    ..Default::default()
                }),
                blog: Some(BlogOptions {
                    path: Some("blog".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
        }],
        theme_config: ThemeConfig {
            navbar: Some(Navbar {
                title: Some("My Project".to_string()),
                items: vec![
                    NavItem {
                        label: "Docs".to_string(),
                        to: Some("docs/".to_string()),
                        position: Some(Position::Left),
                        ..Default::default()
                    },
                    NavItem {
                        label: "Blog".to_string(),
                        to: Some("/blog".to_string()),
                        position: Some(Position::Left),
                        ..Default::default()
                    },
                    NavItem {
                        label: "GitHub".to_string(),
                        href: Some("https://github.com/example/example".to_string()),
                        position: Some(Position::Right),
                        ..Default::default()
                    },
                ],
                ..Default::default()
            }),
            footer: Some(Footer {
                style: Some(FooterStyle::Dark),
                copyright: Some("Copyright © My Project".to_string()),
                ..Default::default()
            }),
            color_mode: Some(ColorMode::default()),
            ..Default::default()
        },
        i18n: Some(I18nConfig {
            default_locale: "en".to_string(),
            locales: vec!["en".to_string()],
        }),
        ..Default::default()
    }
}
