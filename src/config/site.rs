//! Site configuration (site.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub language: String,
    pub locale: String,

    // URL
    pub url: String,

    // Directory
    pub content_dir: String,
    pub static_dir: String,

    // Home page
    pub faq: Vec<FaqEntry>,

    // SEO
    pub sitemap: Vec<SitemapEntryConfig>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "CardioGuard".to_string(),
            tagline: "Advanced Cardiovascular Biomarkers Testing".to_string(),
            description: "Get advanced cardiovascular biomarkers including ApoB and Lp(a) testing \
                          without doctor orders. Professional heart disease prevention for \
                          health-conscious individuals."
                .to_string(),
            keywords: [
                "cardiovascular biomarkers",
                "ApoB test",
                "lipoprotein a test",
                "heart disease prevention",
                "advanced lipid panel",
                "cardiac risk assessment",
            ]
            .iter()
            .map(|k| k.to_string())
            .collect(),
            language: "en".to_string(),
            locale: "en_US".to_string(),

            url: "https://cardioguard.com".to_string(),

            content_dir: "content".to_string(),
            static_dir: "public".to_string(),

            faq: default_faq(),
            sitemap: default_sitemap(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Absolute URL for a site path
    pub fn full_url(&self, path: &str) -> String {
        let base = self.url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, path)
        }
    }
}

/// A question/answer pair shown on the home page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// One `<url>` of the sitemap
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SitemapEntryConfig {
    /// Site path, e.g. `/blog`
    pub path: String,
    pub changefreq: String,
    pub priority: f32,
}

fn default_faq() -> Vec<FaqEntry> {
    let pairs = [
        (
            "What are the best markers for cardiovascular health?",
            "Beyond basic cholesterol, ApoB and Lp(a) are the most predictive biomarkers for \
             heart disease risk. ApoB measures the actual number of atherogenic particles, while \
             Lp(a) identifies genetic cardiovascular risk that affects 20% of the population but \
             is rarely tested.",
        ),
        (
            "Does insurance cover LP(a) and ApoB testing?",
            "Most insurance plans don't cover advanced biomarkers like Lp(a) and ApoB unless you \
             already have cardiovascular disease. This leaves prevention-focused individuals \
             paying out-of-pocket or going without these crucial tests that cardiologists \
             increasingly recommend.",
        ),
        (
            "What is the best indicator of cardiovascular risk?",
            "Traditional cholesterol tests miss 70% of the cardiovascular risk picture. ApoB \
             levels correlate much better with actual heart attack risk than LDL cholesterol, \
             while Lp(a) reveals inherited risk factors that can't be managed through lifestyle \
             alone.",
        ),
        (
            "Are advanced cardiac biomarkers worth the cost?",
            "For health-conscious individuals aged 30-55, advanced biomarkers provide critical \
             risk information that can guide prevention strategies for decades. Early detection \
             of elevated ApoB or Lp(a) can prevent heart attacks through targeted interventions \
             that basic cholesterol panels miss.",
        ),
    ];

    pairs
        .iter()
        .map(|(q, a)| FaqEntry {
            question: q.to_string(),
            answer: a.to_string(),
        })
        .collect()
}

fn default_sitemap() -> Vec<SitemapEntryConfig> {
    [
        ("/", "monthly", 1.0),
        ("/blog", "weekly", 0.8),
        ("/compare", "monthly", 0.7),
        ("/faq", "monthly", 0.6),
    ]
    .iter()
    .map(|(path, changefreq, priority)| SitemapEntryConfig {
        path: path.to_string(),
        changefreq: changefreq.to_string(),
        priority: *priority,
    })
    .collect()
}
