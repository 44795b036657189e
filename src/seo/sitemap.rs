//! XML sitemap

use chrono::{DateTime, SecondsFormat, Utc};

use super::escape_xml;
use crate::config::SiteConfig;

/// One `<url>` element
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: DateTime<Utc>,
    pub changefreq: String,
    pub priority: f32,
}

/// Resolve the configured sitemap paths against the site URL
pub fn entries(config: &SiteConfig, lastmod: DateTime<Utc>) -> Vec<SitemapEntry> {
    config
        .sitemap
        .iter()
        .map(|e| SitemapEntry {
            loc: config.full_url(&e.path),
            lastmod,
            changefreq: e.changefreq.clone(),
            priority: e.priority,
        })
        .collect()
}

/// Render the sitemap document
pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
    xml.push('\n');

    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            entry.lastmod.to_rfc3339_opts(SecondsFormat::Millis, true)
        ));
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            escape_xml(&entry.changefreq)
        ));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Sitemap for the site, stamped with the current time
pub fn generate(config: &SiteConfig) -> String {
    render_sitemap(&entries(config, Utc::now()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_entries() {
        let config = SiteConfig::default();
        let lastmod = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let entries = entries(&config, lastmod);

        let locs: Vec<_> = entries.iter().map(|e| e.loc.as_str()).collect();
        assert_eq!(
            locs,
            vec![
                "https://cardioguard.com",
                "https://cardioguard.com/blog",
                "https://cardioguard.com/compare",
                "https://cardioguard.com/faq",
            ]
        );
        assert_eq!(entries[1].changefreq, "weekly");
        assert_eq!(entries[0].priority, 1.0);
    }

    #[test]
    fn test_render_sitemap() {
        let lastmod = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let xml = render_sitemap(&[SitemapEntry {
            loc: "https://cardioguard.com/blog".to_string(),
            lastmod,
            changefreq: "weekly".to_string(),
            priority: 0.8,
        }]);
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<loc>https://cardioguard.com/blog</loc>"));
        assert!(xml.contains("<lastmod>2024-01-01T00:00:00.000Z</lastmod>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>0.8</priority>"));
        assert_eq!(xml.matches("<url>").count(), 1);
    }
}
