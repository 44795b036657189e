//! cardioguard-site: the CardioGuard landing site
//!
//! Serves markdown content pages (blog posts, comparisons, FAQ) with SEO
//! metadata, a sitemap, and a waitlist signup API backed by a hosted
//! key-value store.

pub mod commands;
pub mod config;
pub mod content;
pub mod seo;
pub mod server;
pub mod signup;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Name of the optional site configuration file in the base directory
pub const CONFIG_FILE: &str = "site.yml";

/// The site being served
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown content root
    pub content_dir: PathBuf,
    /// Static assets served under /static
    pub static_dir: PathBuf,
}

impl Site {
    /// Create a new site from a directory, reading `site.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            tracing::debug!("Loading site config from {:?}", config_path);
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a site with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Self {
            config,
            base_dir,
            content_dir,
            static_dir,
        }
    }

    /// Content loader over this site's content directory
    pub fn loader(&self) -> content::ContentLoader {
        content::ContentLoader::new(&self.content_dir)
    }

    /// Sitemap XML stamped with the current time
    pub fn sitemap(&self) -> String {
        seo::sitemap::generate(&self.config)
    }
}
