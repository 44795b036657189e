//! Print or write the sitemap

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::Site;

/// Write the sitemap to `output`, or to stdout when no path is given
pub fn run(site: &Site, output: Option<&Path>) -> Result<()> {
    let xml = site.sitemap();

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, &xml).with_context(|| format!("Failed to write {:?}", path))?;
            println!("Wrote sitemap to {:?}", path);
        }
        None => print!("{}", xml),
    }

    Ok(())
}
