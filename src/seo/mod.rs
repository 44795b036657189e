//! Search-engine metadata: page meta tags, JSON-LD and the sitemap

pub mod sitemap;
pub mod structured_data;

use serde::Serialize;

use crate::config::SiteConfig;

pub use sitemap::{render_sitemap, SitemapEntry};
pub use structured_data::{extract_qa_pairs, json_ld_script, QaPair};

/// Metadata rendered into the `<head>` of every page
#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub canonical: String,
    /// Open Graph type: `website` or `article`
    pub og_type: String,
    pub keywords: String,
    pub site_name: String,
    pub locale: String,
}

impl PageMeta {
    /// Metadata for a site-level page
    pub fn website(config: &SiteConfig, title: &str, description: &str, path: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            canonical: config.full_url(path),
            og_type: "website".to_string(),
            keywords: config.keywords.join(", "),
            site_name: config.title.clone(),
            locale: config.locale.clone(),
        }
    }

    /// Metadata for a content item page
    pub fn article(
        config: &SiteConfig,
        title: &str,
        description: &str,
        path: &str,
        keywords: &[String],
    ) -> Self {
        let keywords = if keywords.is_empty() {
            config.keywords.join(", ")
        } else {
            keywords.join(", ")
        };
        Self {
            title: format!("{} | {}", title, config.title),
            description: description.to_string(),
            canonical: config.full_url(path),
            og_type: "article".to_string(),
            keywords,
            site_name: config.title.clone(),
            locale: config.locale.clone(),
        }
    }
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape XML special characters
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Strip HTML tags from a string
pub fn strip_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;

    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
}
