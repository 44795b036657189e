//! Configuration module

mod env;
mod site;

pub use env::{ConfigError, StoreConfig};
pub use env::{SITE_ID_VAR, STORE_TIMEOUT_VAR, STORE_TOKEN_VAR, STORE_URL_VAR};
pub use site::{FaqEntry, SiteConfig, SitemapEntryConfig};
