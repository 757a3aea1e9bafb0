//! Whole-site loading.
//!
//! Ties the pieces together for one site directory: load the config, resolve
//! navigation, scan docs and blog, load sidebars and landing pages, then
//! check cross references. Every CLI command starts here.
//!
//! ```text
//! site/
//! ├── docusaurus.config.json
//! ├── sidebars.json          # docs preset `sidebarPath`
//! ├── docs/                  # docs preset `path`
//! ├── blog/                  # blog preset `path`
//! └── landing/               # one JSON record per landing page
//! ```
//!
//! Broken links are reported under the config's policies: navbar, footer
//! and landing page links and asset references under `onBrokenLinks`, links between docs under
//! `onBrokenMarkdownLinks`. Sidebar entries naming a doc that does not
//! exist are always an error.

use crate::config::{self, ConfigError, SiteConfig};
use crate::content::{self, BlogPost, ContentError, Doc};
use crate::landing::{self, LandingError, ProjectLandingPage};
use crate::nav::{self, SiteNav};
use crate::sidebar::{self, SidebarError, Sidebars};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Directory of landing page records, relative to the site directory.
pub const LANDING_DIR: &str = "landing";

#[derive(Error, Debug)]
pub enum SiteError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Sidebar(#[from] SidebarError),
    #[error(transparent)]
    Landing(#[from] LandingError),
    #[error("sidebars reference unknown doc ids: {}", .0.join(", "))]
    UnknownDocIds(Vec<String>),
}

/// A loaded and checked site.
#[derive(Debug, Clone)]
pub struct Site {
    pub root: PathBuf,
    pub config_path: PathBuf,
    pub config: SiteConfig,
    pub nav: SiteNav,
    pub docs: Vec<Doc>,
    pub blog: Vec<BlogPost>,
    pub sidebars: Sidebars,
    pub landing_pages: Vec<ProjectLandingPage>,
}

impl Site {
    /// Load the site in `root`, using `config_path` or the first config file
    /// found there.
    pub fn load(root: &Path, config_path: Option<&Path>) -> Result<Self, SiteError> {
        let config_path = match config_path {
            Some(path) => path.to_path_buf(),
            None => config::find_config_file(root)?,
        };
        let config = config::load(&config_path)?;
        let nav = nav::resolve_site_nav(&config)?;

        let (docs, sidebars) = match config.docs_options() {
            Some(options) => {
                let docs = content::scan_docs(
                    &root.join(options.content_path()),
                    &config.base_url,
                    options.route_base(),
                )?;
                let sidebars = match &options.sidebar_path {
                    Some(path) => sidebar::load_sidebars(&root.join(path))?,
                    None => Sidebars::default(),
                };
                (docs, sidebars)
            }
            None => (Vec::new(), Sidebars::default()),
        };

        let blog = match config.blog_options() {
            Some(options) => content::scan_blog(
                &root.join(options.content_path()),
                &config.base_url,
                options.route_base(),
            )?,
            None => Vec::new(),
        };

        let landing_pages = landing::load_landing_pages(&root.join(LANDING_DIR))?;

        let site = Self {
            root: root.to_path_buf(),
            config_path,
            config,
            nav,
            docs,
            blog,
            sidebars,
            landing_pages,
        };
        site.check()?;
        info!(
            docs = site.docs.len(),
            posts = site.blog.len(),
            landing_pages = site.landing_pages.len(),
            "site loaded"
        );
        Ok(site)
    }

    /// Check references between the loaded parts.
    fn check(&self) -> Result<(), SiteError> {
        let unknown = self.sidebars.unknown_doc_ids(&self.docs);
        if !unknown.is_empty() {
            return Err(SiteError::UnknownDocIds(unknown));
        }

        let mut links = nav::check_assets(&self.config);
        links.extend(
            self.landing_pages
                .iter()
                .flat_map(|page| landing::check_links(&self.config, page)),
        );
        nav::report_broken(self.config.on_broken_links, links)?;

        let doc_links = content::broken_doc_links(&self.docs);
        debug!(broken = doc_links.len(), "doc links checked");
        nav::report_broken(self.config.on_broken_markdown_links, doc_links)?;
        Ok(())
    }
}
