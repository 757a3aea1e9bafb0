//! Project landing pages.
//!
//! One generic page, filled from a data record per project. Records live in
//! `landing/*.json` next to the site config:
//!
//! ```json
//! {
//!   "slug": "3dpdr",
//!   "title": "3D-PDR",
//!   "buttons": [
//!     { "label": "View on GitHub", "to": "https://github.com/uclchem/3D-PDR" },
//!     { "label": "Get a Zip", "to": "https://github.com/uclchem/3D-PDR/zipball/master" }
//!   ],
//!   "description": "3D-PDR is a three-dimensional photodissociation region code...",
//!   "authors": {
//!     "main": ["Thomas G. Bisbas (@tbisbas)"],
//!     "contributors": ["Serena Viti", "Michael J. Barlow"],
//!     "citation": "Please cite [Bisbas et al., 2012](http://adsabs.harvard.edu/abs/2012MNRAS.427.2100B)."
//!   },
//!   "publications": [
//!     { "label": "Bisbas T.G., Tan J.C., Tanaka K.E.I (2021)",
//!       "url": "https://ui.adsabs.harvard.edu/abs/2021MNRAS.502.2701B/abstract" }
//!   ]
//! }
//! ```
//!
//! `description`, `citation` and `publicationsIntro` are markdown. The slug
//! `index` is the site home page.
//!
//! Rendering is a pure function of the site config, the resolved navigation
//! and the record: [`render_landing_page`]. [`write_landing_pages`] writes
//! each page to `<out>/<slug>/index.html` (the home page to `<out>/index.html`).

use crate::config::{ShowcaseUser, SiteConfig};
use crate::nav::{self, LinkResolutionError, NavTarget, ResolvedNavItem, SiteNav};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_\-]*$").unwrap());

/// Slug of the site home page.
pub const HOME_SLUG: &str = "index";

#[derive(Error, Debug)]
pub enum LandingError {
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{}: {message}", .path.display())]
    Invalid { path: PathBuf, message: String },
}

/// Data for one project landing page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ProjectLandingPage {
    pub slug: String,
    /// Hero heading; the site title when absent.
    pub title: Option<String>,
    pub tagline: Option<String>,
    /// Meta description for the `<head>`.
    pub meta_description: Option<String>,
    pub buttons: Vec<LandingButton>,
    pub description: String,
    pub authors: Option<AuthorCredits>,
    pub publications_intro: Option<String>,
    pub publications: Vec<Publication>,
    /// Show the pinned users from `customFields.users`.
    pub show_users: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LandingButton {
    pub label: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthorCredits {
    #[serde(default = "default_authors_heading")]
    pub heading: String,
    #[serde(default)]
    pub main: Vec<String>,
    #[serde(default)]
    pub contributors: Vec<String>,
    #[serde(default)]
    pub citation: Option<String>,
}

fn default_authors_heading() -> String {
    "Authors, Contributors and Users".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Publication {
    pub label: String,
    pub url: String,
}

impl ProjectLandingPage {
    pub fn is_home(&self) -> bool {
        self.slug == HOME_SLUG
    }

    /// Route of the page under `base_url`.
    pub fn route(&self, base_url: &str) -> String {
        if self.is_home() {
            base_url.to_string()
        } else {
            format!("{base_url}{}", self.slug)
        }
    }

    /// Text of the `<title>` element.
    pub fn document_title(&self, site_title: &str) -> String {
        match self.title.as_deref() {
            Some(title) if title != site_title => format!("{title} - {site_title}"),
            _ => site_title.to_string(),
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Load every `*.json` record in `dir`, ordered by file name.
///
/// A missing directory yields no pages. Slugs must be unique and made of
/// letters, digits, `-` and `_`.
pub fn load_landing_pages(dir: &Path) -> Result<Vec<ProjectLandingPage>, LandingError> {
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "no landing page directory");
        return Ok(Vec::new());
    }
    let io_err = |path: &Path, source| LandingError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| io_err(dir, e))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .map(|e| e.eq_ignore_ascii_case("json"))
                    .unwrap_or(false)
        })
        .collect();
    files.sort();

    let mut pages = Vec::with_capacity(files.len());
    let mut slugs = HashSet::new();
    for path in files {
        let content = fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        let page: ProjectLandingPage =
            serde_json::from_str(&content).map_err(|source| LandingError::Parse {
                path: path.clone(),
                source,
            })?;
        if !SLUG_RE.is_match(&page.slug) {
            return Err(LandingError::Invalid {
                path,
                message: format!("invalid slug `{}`", page.slug),
            });
        }
        if !slugs.insert(page.slug.clone()) {
            return Err(LandingError::Invalid {
                path,
                message: format!("duplicate slug `{}`", page.slug),
            });
        }
        pages.push(page);
    }
    Ok(pages)
}

/// Links of `page` that cannot be resolved against `baseUrl`.
pub fn check_links(config: &SiteConfig, page: &ProjectLandingPage) -> Vec<LinkResolutionError> {
    let buttons = page.buttons.iter().map(|b| (b.label.as_str(), b.to.as_str()));
    let publications = page
        .publications
        .iter()
        .map(|p| (p.label.as_str(), p.url.as_str()));
    buttons
        .chain(publications)
        .filter_map(|(label, link)| {
            nav::resolve_link(&config.base_url, link).err().map(|mut err| {
                err.label = Some(label.to_string());
                err
            })
        })
        .collect()
}

// =============================================================================
// HTML Components
// =============================================================================

/// Href for a raw link; unresolvable links are emitted as written.
fn href(base_url: &str, raw: &str) -> (String, bool) {
    match nav::resolve_link(base_url, raw) {
        Ok(target) => (
            target.href().unwrap_or(raw).to_string(),
            target.is_external(),
        ),
        Err(_) => (raw.to_string(), false),
    }
}

fn markdown(source: &str) -> Markup {
    let parser = Parser::new(source);
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);
    PreEscaped(body_html)
}

fn base_document(config: &SiteConfig, title: &str, description: Option<&str>, content: Markup) -> Markup {
    let base = &config.base_url;
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                @if let Some(description) = description.or(config.tagline.as_deref()) {
                    meta name="description" content=(description);
                }
                @if let Some(favicon) = &config.favicon {
                    link rel="icon" href=(href(base, favicon).0);
                }
                @for sheet in &config.stylesheets {
                    link rel="stylesheet" href=(href(base, sheet.href()).0) type=[sheet.mime_type()];
                }
                @for script in &config.scripts {
                    script src=(href(base, script.src()).0) async[script.is_async()] defer[script.is_deferred()] {}
                }
            }
            body {
                (content)
            }
        }
    }
}

/// Navbar: site title/logo, then left and right item groups.
fn navbar(config: &SiteConfig, items: &[ResolvedNavItem], current_route: &str) -> Markup {
    let navbar = config.theme_config.navbar.as_ref();
    let title = navbar.and_then(|n| n.title.as_deref());
    let logo = navbar.and_then(|n| n.logo.as_ref());
    let base = &config.base_url;
    let (left, right): (Vec<&ResolvedNavItem>, Vec<&ResolvedNavItem>) = items
        .iter()
        .partition(|item| item.position == crate::config::Position::Left);

    html! {
        nav.navbar {
            a.navbar__brand href=(base) {
                @if let Some(logo) = logo {
                    img.navbar__logo src=(href(base, &logo.src).0) alt=[logo.alt.as_deref()];
                }
                @if let Some(title) = title {
                    b.navbar__title { (title) }
                }
            }
            ul.navbar__items {
                @for item in left { (nav_item(item, current_route)) }
            }
            ul.navbar__items."navbar__items--right" {
                @for item in right { (nav_item(item, current_route)) }
            }
        }
    }
}

fn is_current(target: &NavTarget, current_route: &str) -> bool {
    matches!(target, NavTarget::Internal(link)
        if link.trim_end_matches('/') == current_route.trim_end_matches('/'))
}

fn nav_item(item: &ResolvedNavItem, current_route: &str) -> Markup {
    html! {
        li class=[is_current(&item.target, current_route).then_some("current")] {
            @if item.items.is_empty() {
                (link(&item.label, &item.target))
            } @else {
                span.navbar__dropdown { (item.label) }
                ul {
                    @for child in &item.items {
                        (nav_item(child, current_route))
                    }
                }
            }
        }
    }
}

fn link(label: &str, target: &NavTarget) -> Markup {
    let external = target.is_external();
    html! {
        a href=[target.href()]
            target=[external.then_some("_blank")]
            rel=[external.then_some("noopener noreferrer")] { (label) }
    }
}

fn hero(config: &SiteConfig, page: &ProjectLandingPage) -> Markup {
    let title = page.title.as_deref().unwrap_or(&config.title);
    html! {
        header.hero."hero--primary" {
            div.container {
                h1.hero__title { (title) }
                @if let Some(tagline) = &page.tagline {
                    p.hero__subtitle { (tagline) }
                }
                @if !page.buttons.is_empty() {
                    div.buttons {
                        @for button in &page.buttons {
                            @let (url, external) = href(&config.base_url, &button.to);
                            a.button."button--secondary"."button--lg" href=(url)
                                target=[external.then_some("_blank")] { (button.label) }
                        }
                    }
                }
            }
        }
    }
}

fn authors_section(authors: &AuthorCredits) -> Markup {
    html! {
        h2 { (authors.heading) }
        @if !authors.main.is_empty() {
            p { "Main author: " (authors.main.join(", ")) }
        }
        @if !authors.contributors.is_empty() {
            p { "Contributors: " (authors.contributors.join(", ")) }
        }
        @if let Some(citation) = &authors.citation {
            (markdown(citation))
        }
    }
}

fn users_section(config: &SiteConfig, users: &[ShowcaseUser]) -> Markup {
    html! {
        section.showcase {
            h2 { "Who is using this?" }
            div.logos {
                @for user in users {
                    a href=(href(&config.base_url, &user.info_link).0) target="_blank" rel="noopener noreferrer" {
                        img src=(href(&config.base_url, &user.image).0) alt=(user.caption) title=(user.caption);
                    }
                }
            }
        }
    }
}

fn publication_link(config: &SiteConfig, publication: &Publication) -> Markup {
    let (url, external) = href(&config.base_url, &publication.url);
    html! {
        a href=(url) target=[external.then_some("_blank")] rel=[external.then_some("noopener noreferrer")] {
            (publication.label)
        }
    }
}

fn footer(config: &SiteConfig, nav: &SiteNav) -> Markup {
    let copyright = config
        .theme_config
        .footer
        .as_ref()
        .and_then(|f| f.copyright.as_deref());
    let dark = config
        .theme_config
        .footer
        .as_ref()
        .and_then(|f| f.style)
        .is_some_and(|s| s == crate::config::FooterStyle::Dark);
    html! {
        footer class=(if dark { "footer footer--dark" } else { "footer" }) {
            @for group in &nav.footer {
                div.footer__col {
                    @if let Some(title) = &group.title {
                        div.footer__title { (title) }
                    }
                    ul.footer__items {
                        @for item in &group.items {
                            li { (link(&item.label, &item.target)) }
                        }
                    }
                }
            }
            @if let Some(copyright) = copyright {
                div.footer__copyright { (copyright) }
            }
        }
    }
}

// =============================================================================
// Page Renderer
// =============================================================================

/// Render one landing page.
///
/// `nav` is the navigation resolved once per build (see
/// [`nav::resolve_site_nav`]); the same inputs always render the same page.
pub fn render_landing_page(config: &SiteConfig, nav: &SiteNav, page: &ProjectLandingPage) -> Markup {
    let route = page.route(&config.base_url);
    let users: Vec<ShowcaseUser> = if page.show_users {
        config.showcase_users().into_iter().filter(|u| u.pinned).collect()
    } else {
        Vec::new()
    };

    let content = html! {
        (navbar(config, &nav.navbar, &route))
        (hero(config, page))
        main.landing {
            @if !page.description.trim().is_empty() {
                div.container.description { (markdown(&page.description)) }
            }
            @if page.authors.is_some() || !page.publications.is_empty() {
                div.container.publications {
                    @if let Some(authors) = &page.authors {
                        (authors_section(authors))
                    }
                    @if let Some(intro) = &page.publications_intro {
                        (markdown(intro))
                    }
                    @if !page.publications.is_empty() {
                        ul {
                            @for publication in &page.publications {
                                li { (publication_link(config, publication)) }
                            }
                        }
                    }
                }
            }
            @if !users.is_empty() {
                (users_section(config, &users))
            }
        }
        (footer(config, nav))
    };

    base_document(
        config,
        &page.document_title(&config.title),
        page.meta_description.as_deref(),
        content,
    )
}

/// Render and write every page, returning the written paths.
///
/// Links are not checked here; [`crate::site::Site::load`] reports broken
/// button and publication links under `onBrokenLinks` once per build.
pub fn write_landing_pages(
    config: &SiteConfig,
    nav: &SiteNav,
    pages: &[ProjectLandingPage],
    out_dir: &Path,
) -> Result<Vec<PathBuf>, LandingError> {
    let mut written = Vec::with_capacity(pages.len());
    for page in pages {
        let dir = if page.is_home() {
            out_dir.to_path_buf()
        } else {
            out_dir.join(&page.slug)
        };
        let path = dir.join("index.html");
        fs::create_dir_all(&dir).map_err(|source| LandingError::Io {
            path: dir.clone(),
            source,
        })?;
        let html = render_landing_page(config, nav, page);
        fs::write(&path, html.into_string()).map_err(|source| LandingError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(page = %page.slug, path = %path.display(), "landing page written");
        written.push(path);
    }
    Ok(written)
}
