//! JSON-LD structured data (schema.org)

use chrono::{SecondsFormat, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::SiteConfig;
use crate::content::ContentItem;

lazy_static! {
    /// A level 2/3 heading immediately followed by a paragraph. The answer may
    /// contain simple inline elements such as links or emphasis.
    static ref QA_PATTERN: Regex = Regex::new(
        r"(?i)<h[23][^>]*>([^<]+)</h[23]>\s*<p[^>]*>([^<]+(?:<[^>]+>[^<]*</[^>]+>[^<]*)*)</p>"
    )
    .expect("valid Q&A pattern");
}

/// A question and its answer, in plain text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

/// Pull question/answer pairs out of rendered FAQ HTML
pub fn extract_qa_pairs(html: &str) -> Vec<QaPair> {
    QA_PATTERN
        .captures_iter(html)
        .map(|caps| QaPair {
            question: caps[1].trim().to_string(),
            answer: super::strip_html(&caps[2]).trim().to_string(),
        })
        .collect()
}

pub fn organization(config: &SiteConfig) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "Organization",
        "name": config.title,
        "url": config.url,
        "description": config.description,
    })
}

pub fn website(config: &SiteConfig) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "WebSite",
        "name": config.title,
        "url": config.url,
    })
}

pub fn faq_page(pairs: &[QaPair]) -> Value {
    let entities: Vec<Value> = pairs
        .iter()
        .map(|qa| {
            json!({
                "@type": "Question",
                "name": qa.question,
                "acceptedAnswer": {
                    "@type": "Answer",
                    "text": qa.answer,
                },
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "FAQPage",
        "mainEntity": entities,
    })
}

/// Article schema; undated items are stamped with the render time
pub fn article(config: &SiteConfig, item: &ContentItem) -> Value {
    let published = item
        .date
        .clone()
        .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));

    json!({
        "@context": "https://schema.org",
        "@type": "Article",
        "headline": item.title,
        "description": item.description,
        "author": {
            "@type": "Organization",
            "name": config.title,
        },
        "publisher": {
            "@type": "Organization",
            "name": config.title,
        },
        "datePublished": published,
    })
}

/// Serialize for a `<script type="application/ld+json">` body.
///
/// `</` is escaped so string values cannot close the script element.
pub fn json_ld_script(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}
