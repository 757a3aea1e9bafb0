use clap::{Parser, Subcommand};
use docsite::site::Site;
use docsite::{config, index, landing, output, versions};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "docsite")]
#[command(about = "Configuration loader and checker for project documentation sites")]
#[command(long_about = "\
Configuration loader and checker for project documentation sites

A site directory holds one configuration file, the docs and blog content,
their sidebars, and the landing page records:

  site/
  ├── docusaurus.config.json       # Site config (JSON, or .toml / .yaml)
  ├── sidebars.json                # Docs sidebars (docs preset `sidebarPath`)
  ├── docs/                        # Docs (front matter + Markdown)
  │   ├── index.md                 # → /docs/
  │   ├── 01-install.md            # → /docs/install (number prefix orders)
  │   └── 02-tutorials/
  │       └── 01-first-model.md    # → /docs/tutorials/first-model
  ├── blog/
  │   ├── 2018-02-05-grains.md     # → /blog/2018/02/05/grains
  │   └── 2020-06-01-release/
  │       └── index.md             # → /blog/2020/06/01/release
  └── landing/
      ├── index.json               # Home page
      └── 3dpdr.json               # → /3dpdr

Every problem the configuration has is reported at once. Broken links are
handled per the `onBrokenLinks` and `onBrokenMarkdownLinks` policies.

Run 'docsite gen-config' to print a stock configuration.")]
#[command(version)]
struct Cli {
    /// Site directory
    #[arg(long, default_value = ".", global = true)]
    site: PathBuf,

    /// Config file (default: first docusaurus.config.{json,toml,yaml,yml} in the site)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log progress at info level (otherwise RUST_LOG, default warn)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load and check the whole site, then summarize it
    Check,
    /// Print the resolved navbar and footer
    Nav {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the client-side doc index
    Index {
        /// Output directory
        #[arg(long, default_value = "dist")]
        out: PathBuf,
    },
    /// Render the landing pages to HTML
    Landing {
        /// Output directory
        #[arg(long, default_value = "dist")]
        out: PathBuf,
    },
    /// List the built version directories as a versions.json manifest
    Versions {
        /// Directory holding one sub-directory per built version
        root: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the git refs to build docs versions from
    VersionMatrix {
        /// Number of release tags to include
        #[arg(long, default_value_t = 5)]
        count: usize,
        /// Branch published as `latest`
        #[arg(long, default_value = "main")]
        latest_branch: String,
        /// Read tags from this git checkout instead of the arguments
        #[arg(long)]
        repo: Option<PathBuf>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
        /// Release tags (`v*`)
        tags: Vec<String>,
    },
    /// Print a stock site config
    GenConfig,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Check => {
            let site = Site::load(&cli.site, cli.config.as_deref())?;
            output::print_check_output(&site);
        }
        Command::Nav { json } => {
            let site = Site::load(&cli.site, cli.config.as_deref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&site.nav)?);
            } else {
                output::print_nav(&site.nav);
            }
        }
        Command::Index { out } => {
            let site = Site::load(&cli.site, cli.config.as_deref())?;
            let doc_index = index::build_doc_index(&site.config, &site.docs, &site.sidebars);
            let path = index::write_doc_index(&doc_index, &out)?;
            output::print_index_output(&doc_index, &path);
        }
        Command::Landing { out } => {
            let site = Site::load(&cli.site, cli.config.as_deref())?;
            let written =
                landing::write_landing_pages(&site.config, &site.nav, &site.landing_pages, &out)?;
            output::print_landing_output(&written, &out);
        }
        Command::Versions { root, json } => {
            let manifest = versions::collect_built_versions(&root)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&manifest)?);
            } else {
                output::print_versions(&manifest);
            }
        }
        Command::VersionMatrix {
            count,
            latest_branch,
            repo,
            json,
            tags,
        } => {
            let tags = match repo {
                Some(repo) => versions::list_repo_tags(&repo)?,
                None => tags,
            };
            let matrix = versions::version_matrix(&tags, &latest_branch, count);
            if json {
                println!("{}", serde_json::to_string(&matrix)?);
            } else {
                output::print_matrix(&matrix);
            }
        }
        Command::GenConfig => {
            println!("{}", config::stock_config().to_json()?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_matrix_defaults() {
        let cli = Cli::try_parse_from(["docsite", "version-matrix", "v3.1.0", "v3.0.0"]).unwrap();
        match cli.command {
            Command::VersionMatrix {
                count,
                latest_branch,
                tags,
                ..
            } => {
                assert_eq!(count, 5);
                assert_eq!(latest_branch, "main");
                assert_eq!(tags, vec!["v3.1.0", "v3.0.0"]);
            }
            _ => panic!("expected version-matrix"),
        }
    }
}
