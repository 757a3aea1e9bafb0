//! # Docsite
//!
//! Configuration loader and checker for project documentation sites built
//! with a Docusaurus-style static site tool. The site's configuration file is
//! the data source: it is parsed into a strongly typed model, every invariant
//! is checked at once, and navigation links are resolved against the site's
//! base URL before anything is rendered.
//!
//! # Architecture: Load, Check, Emit
//!
//! ```text
//! 1. Load    docusaurus.config.json  →  SiteConfig       (typed, all violations collected)
//! 2. Check   config + docs + blog    →  Site             (links resolved, sidebars matched)
//! 3. Emit    Site                    →  index / landing  (doc-index.<hash>.json, HTML pages)
//! ```
//!
//! Each stage is usable on its own. Tests parse configs from memory with
//! [`config::load_str`], and the render functions take all their inputs as
//! arguments, so nothing below the CLI needs a filesystem to be exercised.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Site configuration model, multi-format loading, validation |
//! | [`nav`] | Link resolution for navbar and footer, broken-link policies |
//! | [`versions`] | Configured docs versions, built-version manifest, release matrix |
//! | [`naming`] | `NN-name` and `YYYY-MM-DD-slug` filename conventions |
//! | [`content`] | Docs and blog scanning: front matter, ids, permalinks, doc links |
//! | [`sidebar`] | Sidebar file parsing and doc placement |
//! | [`index`] | Client-side doc/version index with a content-hashed file name |
//! | [`landing`] | Project landing page records and their Maud rendering |
//! | [`site`] | Whole-site loading and cross-reference checks |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Collect Every Violation
//!
//! Validation never stops at the first problem. [`config::SiteConfig::violations`]
//! walks the whole model and [`config::ConfigError::Validation`] carries the
//! full list, one violation per line, each naming the offending path
//! (`themeConfig.navbar.items[2] ("GitHub")`).
//!
//! ## Unknown Keys Warn, Wrong Types Fail
//!
//! The configuration format grows faster than any model of it. Unknown keys
//! are logged with their full path and otherwise ignored; a known key with a
//! value of the wrong shape is a parse error. `customFields` is open by
//! definition and never warns.
//!
//! ## One Landing Page Record
//!
//! Per-project landing pages differ only in their content, so they are one
//! data record ([`landing::ProjectLandingPage`]) rendered by one pure
//! function rather than one hand-written page per project.

pub mod config;
pub mod content;
pub mod index;
pub mod landing;
pub mod naming;
pub mod nav;
pub mod output;
pub mod sidebar;
pub mod site;
pub mod versions;

#[cfg(test)]
pub(crate) mod test_helpers;
