//! Run the web server against the hosted signup store

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::StoreConfig;
use crate::server;
use crate::signup::{SignupService, UpstashStore};
use crate::Site;

/// Read store settings from the environment and serve until Ctrl+C
pub async fn run(site: Site, ip: &str, port: u16) -> Result<()> {
    let store_config = StoreConfig::from_env().context("Signup store is not configured")?;
    let store = UpstashStore::new(&store_config).context("Failed to create store client")?;

    tracing::info!(
        "Using signup store at {} for site {}",
        store_config.url,
        store_config.site_id
    );

    let signups = SignupService::new(Arc::new(store), store_config.site_id);
    server::start(site, signups, ip, port).await
}
