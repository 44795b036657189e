//! List site content

use anyhow::Result;
use std::fmt::Write;

use crate::content::{ContentItem, ContentType};
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let content_type: ContentType = content_type.parse().map_err(anyhow::Error::msg)?;
    let items = site.loader().list_all(content_type);
    print!("{}", format_listing(content_type, &items));
    Ok(())
}

fn format_listing(content_type: ContentType, items: &[ContentItem]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({}):", content_type.label(), items.len());
    for item in items {
        let _ = writeln!(
            out,
            "  {} - {} [{}]",
            item.date.as_deref().unwrap_or("undated"),
            item.title,
            item.path()
        );
    }
    out
}
