//! Navigation resolution.
//!
//! Turns the navbar and footer entries of a validated [`SiteConfig`] into
//! links a page can emit as-is. Relative targets are resolved against
//! `baseUrl`; absolute URLs pass through untouched.
//!
//! | Raw link                 | baseUrl      | Resolved                 |
//! |--------------------------|--------------|--------------------------|
//! | `docs/`                  | `/`          | `/docs/`                 |
//! | `/blog`                  | `/uclchem/`  | `/uclchem/blog`          |
//! | `/uclchem/docs/intro`    | `/uclchem/`  | `/uclchem/docs/intro`    |
//! | `https://github.com/x`   | any          | `https://github.com/x`   |
//! | `../elsewhere`           | `/uclchem/`  | error: escapes baseUrl   |
//!
//! Resolution is pure: the same config always yields the same items. A link
//! that cannot be resolved is handled according to `onBrokenLinks`: ignored,
//! logged, warned about, or turned into [`ConfigError::LinkResolution`].

use crate::config::{
    self, BrokenLinkPolicy, ConfigError, FOOTER_LINKS, NAVBAR_ITEMS, NavItem, Position, SiteConfig,
};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;
use tracing::{info, warn};
use url::Url;

static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").unwrap());

/// Placeholder origin used to resolve paths; never appears in output.
const RESOLVE_ORIGIN: &str = "http://docsite.invalid";

/// A navigation or asset reference that cannot be resolved against `baseUrl`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkResolutionError {
    pub label: Option<String>,
    pub link: String,
    pub reason: String,
}

impl fmt::Display for LinkResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "\"{label}\": `{}` {}", self.link, self.reason),
            None => write!(f, "`{}` {}", self.link, self.reason),
        }
    }
}

impl std::error::Error for LinkResolutionError {}

impl LinkResolutionError {
    fn new(link: &str, reason: impl Into<String>) -> Self {
        Self {
            label: None,
            link: link.to_string(),
            reason: reason.into(),
        }
    }

    fn labelled(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }
}

/// Where a resolved entry points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "link", rename_all = "lowercase")]
pub enum NavTarget {
    /// A path on this site, already prefixed with `baseUrl`.
    Internal(String),
    /// An absolute URL, passed through unchanged.
    External(String),
    /// A dropdown; see `items`.
    Dropdown,
    /// The raw link, kept when resolution failed under a non-fatal policy.
    Unresolved(String),
}

impl NavTarget {
    /// The href to emit, if any.
    pub fn href(&self) -> Option<&str> {
        match self {
            Self::Internal(link) | Self::External(link) | Self::Unresolved(link) => Some(link),
            Self::Dropdown => None,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedNavItem {
    pub label: String,
    pub position: Position,
    pub target: NavTarget,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ResolvedNavItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFooterGroup {
    pub title: Option<String>,
    pub items: Vec<ResolvedFooterLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFooterLink {
    pub label: String,
    pub target: NavTarget,
}

/// Everything a page needs to draw site navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SiteNav {
    pub navbar: Vec<ResolvedNavItem>,
    pub footer: Vec<ResolvedFooterGroup>,
}

// =============================================================================
// Link resolution
// =============================================================================

/// Resolve one raw link against `base_url`.
///
/// Links with a scheme (`https:`, `mailto:`) or protocol-relative links
/// (`//cdn.example.com/x`) are external and returned as written once they
/// parse as URLs. Everything else is a site path: a leading `baseUrl` or `/`
/// is dropped, the rest is joined onto `baseUrl`, and the result must stay
/// under `baseUrl`.
pub fn resolve_link(base_url: &str, raw: &str) -> Result<NavTarget, LinkResolutionError> {
    if raw.is_empty() {
        return Err(LinkResolutionError::new(raw, "is empty"));
    }
    if raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(LinkResolutionError::new(
            raw,
            "contains whitespace or control characters",
        ));
    }

    if raw.starts_with("//") || SCHEME_RE.is_match(raw) {
        let absolute = if raw.starts_with("//") {
            format!("https:{raw}")
        } else {
            raw.to_string()
        };
        return match Url::parse(&absolute) {
            Ok(_) => Ok(NavTarget::External(raw.to_string())),
            Err(err) => Err(LinkResolutionError::new(raw, format!("is not a valid URL: {err}"))),
        };
    }

    let relative = raw
        .strip_prefix(base_url)
        .or_else(|| raw.strip_prefix('/'))
        .unwrap_or(raw);
    if climbs_above_base(relative) {
        return Err(LinkResolutionError::new(
            raw,
            format!("escapes baseUrl `{base_url}`"),
        ));
    }

    let base = Url::parse(&format!("{RESOLVE_ORIGIN}{base_url}"))
        .map_err(|err| LinkResolutionError::new(raw, format!("baseUrl `{base_url}` is invalid: {err}")))?;
    let joined = base
        .join(relative)
        .map_err(|err| LinkResolutionError::new(raw, format!("cannot be resolved: {err}")))?;

    if !joined.path().starts_with(base_url) {
        return Err(LinkResolutionError::new(
            raw,
            format!("escapes baseUrl `{base_url}`"),
        ));
    }

    let mut resolved = joined.path().to_string();
    if let Some(query) = joined.query() {
        resolved.push('?');
        resolved.push_str(query);
    }
    if let Some(fragment) = joined.fragment() {
        resolved.push('#');
        resolved.push_str(fragment);
    }
    Ok(NavTarget::Internal(resolved))
}

/// Whether the `..` segments of a base-relative path climb out of the base.
///
/// Runs before joining: `Url::join` clamps `..` at `/`.
fn climbs_above_base(relative: &str) -> bool {
    let path = relative.split(['?', '#']).next().unwrap_or_default();
    let mut depth: i32 = 0;
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                depth -= 1;
                if depth < 0 {
                    return true;
                }
            }
            _ => depth += 1,
        }
    }
    false
}

/// Resolve an asset reference (favicon, logo, stylesheet) to the URL a page
/// should emit.
pub fn resolve_asset(base_url: &str, raw: &str) -> Result<String, LinkResolutionError> {
    resolve_link(base_url, raw).map(|target| match target {
        NavTarget::Internal(link) | NavTarget::External(link) | NavTarget::Unresolved(link) => link,
        NavTarget::Dropdown => String::new(),
    })
}

/// Asset references of `config` that cannot be resolved against `baseUrl`:
/// favicon, stylesheets, scripts, logos, the social card image and showcase
/// user images.
pub fn check_assets(config: &SiteConfig) -> Vec<LinkResolutionError> {
    let theme = &config.theme_config;
    let users = config.showcase_users();
    let mut assets: Vec<(String, &str)> = Vec::new();
    if let Some(favicon) = &config.favicon {
        assets.push(("favicon".to_string(), favicon.as_str()));
    }
    for sheet in &config.stylesheets {
        assets.push(("stylesheet".to_string(), sheet.href()));
    }
    for script in &config.scripts {
        assets.push(("script".to_string(), script.src()));
    }
    if let Some(logo) = theme.navbar.as_ref().and_then(|n| n.logo.as_ref()) {
        assets.push(("navbar logo".to_string(), logo.src.as_str()));
    }
    if let Some(logo) = theme.footer.as_ref().and_then(|f| f.logo.as_ref()) {
        assets.push(("footer logo".to_string(), logo.src.as_str()));
    }
    if let Some(image) = &theme.image {
        assets.push(("social card image".to_string(), image.as_str()));
    }
    for user in &users {
        assets.push((user.caption.clone(), user.image.as_str()));
    }

    assets
        .into_iter()
        .filter_map(|(label, raw)| {
            resolve_asset(&config.base_url, raw)
                .err()
                .map(|err| err.labelled(&label))
        })
        .collect()
}

/// Apply a broken-link policy to the errors collected during resolution.
pub(crate) fn report_broken(
    policy: BrokenLinkPolicy,
    errors: Vec<LinkResolutionError>,
) -> Result<(), ConfigError> {
    if errors.is_empty() {
        return Ok(());
    }
    match policy {
        BrokenLinkPolicy::Throw => return Err(ConfigError::LinkResolution(errors)),
        BrokenLinkPolicy::Warn => {
            for err in &errors {
                warn!(link = %err.link, "broken link: {err}");
            }
        }
        BrokenLinkPolicy::Log => {
            for err in &errors {
                info!(link = %err.link, "broken link: {err}");
            }
        }
        BrokenLinkPolicy::Ignore => {}
    }
    Ok(())
}

// =============================================================================
// Navbar and footer
// =============================================================================

/// Resolve the navbar items of `config`, in configuration order.
///
/// Item shape is checked again first, so a config that skipped
/// [`SiteConfig::validate`] still cannot produce an item with two targets.
pub fn resolve_nav_items(config: &SiteConfig) -> Result<Vec<ResolvedNavItem>, ConfigError> {
    let items = config.navbar_items();
    let mut violations = Vec::new();
    config::check_nav_items(items, NAVBAR_ITEMS, 0, &mut violations);
    if !violations.is_empty() {
        return Err(ConfigError::Validation(violations));
    }

    let mut broken = Vec::new();
    let resolved = items
        .iter()
        .map(|item| resolve_item(&config.base_url, item, &mut broken))
        .collect();
    report_broken(config.on_broken_links, broken)?;
    Ok(resolved)
}

fn resolve_item(
    base_url: &str,
    item: &NavItem,
    broken: &mut Vec<LinkResolutionError>,
) -> ResolvedNavItem {
    let position = item.position.unwrap_or_default();
    if let Some(children) = &item.items {
        return ResolvedNavItem {
            label: item.label.clone(),
            position,
            target: NavTarget::Dropdown,
            items: children
                .iter()
                .map(|child| resolve_item(base_url, child, broken))
                .collect(),
        };
    }

    // Shape was checked, so exactly one of `to`/`href` is set here.
    let raw = item.to.as_deref().or(item.href.as_deref()).unwrap_or_default();
    ResolvedNavItem {
        label: item.label.clone(),
        position,
        target: resolve_or_keep(base_url, &item.label, raw, broken),
        items: Vec::new(),
    }
}

fn resolve_or_keep(
    base_url: &str,
    label: &str,
    raw: &str,
    broken: &mut Vec<LinkResolutionError>,
) -> NavTarget {
    match resolve_link(base_url, raw) {
        Ok(target) => target,
        Err(err) => {
            broken.push(err.labelled(label));
            NavTarget::Unresolved(raw.to_string())
        }
    }
}

/// Resolve the footer link groups of `config`.
pub fn resolve_footer_links(config: &SiteConfig) -> Result<Vec<ResolvedFooterGroup>, ConfigError> {
    let groups = config.footer_links();
    let mut violations = Vec::new();
    config::check_footer_links(groups, FOOTER_LINKS, &mut violations);
    if !violations.is_empty() {
        return Err(ConfigError::Validation(violations));
    }

    let mut broken = Vec::new();
    let resolved = groups
        .iter()
        .map(|group| ResolvedFooterGroup {
            title: group.title.clone(),
            items: group
                .items
                .iter()
                .map(|link| {
                    let raw = link.to.as_deref().or(link.href.as_deref()).unwrap_or_default();
                    ResolvedFooterLink {
                        label: link.label.clone(),
                        target: resolve_or_keep(&config.base_url, &link.label, raw, &mut broken),
                    }
                })
                .collect(),
        })
        .collect();
    report_broken(config.on_broken_links, broken)?;
    Ok(resolved)
}

/// Resolve navbar and footer together.
pub fn resolve_site_nav(config: &SiteConfig) -> Result<SiteNav, ConfigError> {
    Ok(SiteNav {
        navbar: resolve_nav_items(config)?,
        footer: resolve_footer_links(config)?,
    })
}
