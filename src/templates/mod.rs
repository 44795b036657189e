//! Built-in site templates using the Tera template engine
//!
//! Templates are embedded in the binary. Autoescaping is on; rendered
//! markdown and JSON-LD blocks are marked `safe` in the templates.
//! Pages are rendered per request from freshly loaded content.

use anyhow::Result;
use chrono::Datelike;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{parse_date_string, ContentItem, ContentType};
use crate::seo::{self, structured_data, PageMeta};

#[derive(Debug, Serialize)]
struct SiteData<'a> {
    title: &'a str,
    tagline: &'a str,
    url: &'a str,
    language: &'a str,
}

#[derive(Debug, Serialize)]
struct NavLink {
    name: &'static str,
    path: &'static str,
}

/// Item fields shown on listing pages
#[derive(Debug, Serialize)]
struct ItemSummary<'a> {
    title: &'a str,
    description: &'a str,
    date: Option<&'a str>,
    path: String,
}

/// Site stylesheet, served from [`STYLESHEET_PATH`]
pub const STYLESHEET: &str = include_str!("site/site.css");

pub const STYLESHEET_PATH: &str = "/site.css";

/// Template renderer with the embedded site theme
pub struct PageRenderer {
    tera: Tera,
}

impl PageRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Leave `/` alone so URLs in attributes stay readable
        tera.set_escape_fn(seo::html_escape);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("listing.html", include_str!("site/listing.html")),
            ("item.html", include_str!("site/item.html")),
            ("not_found.html", include_str!("site/not_found.html")),
        ])?;

        tera.register_filter("long_date", long_date_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Home page with the signup form and site-level structured data
    pub fn home(&self, config: &SiteConfig) -> Result<String> {
        let meta = PageMeta::website(
            config,
            &format!("{} — {}", config.tagline, config.title),
            &config.description,
            "/",
        );

        let faq_pairs: Vec<seo::QaPair> = config
            .faq
            .iter()
            .map(|f| seo::QaPair {
                question: f.question.clone(),
                answer: f.answer.clone(),
            })
            .collect();

        let blocks = [
            structured_data::organization(config),
            structured_data::website(config),
            structured_data::faq_page(&faq_pairs),
        ];

        let mut context = self.base_context(config, &meta, &blocks);
        context.insert("faq", &config.faq);
        Ok(self.tera.render("home.html", &context)?)
    }

    /// Listing page for one content type
    pub fn listing(
        &self,
        config: &SiteConfig,
        content_type: ContentType,
        items: &[ContentItem],
    ) -> Result<String> {
        let heading = content_type.label();
        let intro = listing_intro(content_type);
        let meta = PageMeta::website(
            config,
            &format!("{} | {}", heading, config.title),
            intro,
            content_type.url_prefix(),
        );

        let summaries: Vec<ItemSummary> = items
            .iter()
            .map(|item| ItemSummary {
                title: &item.title,
                description: &item.description,
                date: item.date.as_deref(),
                path: item.path(),
            })
            .collect();

        let mut context = self.base_context(config, &meta, &[]);
        context.insert("heading", heading);
        context.insert("intro", intro);
        context.insert("items", &summaries);
        Ok(self.tera.render("listing.html", &context)?)
    }

    /// Page for a single content item
    pub fn item(&self, config: &SiteConfig, item: &ContentItem) -> Result<String> {
        let meta = PageMeta::article(
            config,
            &item.title,
            &item.description,
            &item.path(),
            &item.target_keywords,
        );

        let block = match item.content_type {
            ContentType::Faq => {
                structured_data::faq_page(&seo::extract_qa_pairs(&item.content))
            }
            ContentType::Article | ContentType::Comparison => {
                structured_data::article(config, item)
            }
        };

        let mut context = self.base_context(config, &meta, &[block]);
        context.insert("item", item);
        context.insert("cta", item_call_to_action(item.content_type));
        Ok(self.tera.render("item.html", &context)?)
    }

    /// Page shown for unknown paths and missing items
    pub fn not_found(&self, config: &SiteConfig) -> Result<String> {
        let meta = PageMeta::website(
            config,
            &format!("Not Found | {}", config.title),
            &config.description,
            "/",
        );
        let context = self.base_context(config, &meta, &[]);
        Ok(self.tera.render("not_found.html", &context)?)
    }

    fn base_context(&self, config: &SiteConfig, meta: &PageMeta, blocks: &[Value]) -> Context {
        let mut context = Context::new();
        context.insert(
            "site",
            &SiteData {
                title: &config.title,
                tagline: &config.tagline,
                url: &config.url,
                language: &config.language,
            },
        );
        context.insert("meta", meta);
        context.insert("stylesheet", STYLESHEET_PATH);

        let scripts: Vec<String> = blocks.iter().map(seo::json_ld_script).collect();
        context.insert("structured_data", &scripts);

        let nav: Vec<NavLink> = ContentType::ALL
            .iter()
            .map(|t| NavLink {
                name: t.nav_name(),
                path: t.url_prefix(),
            })
            .collect();
        context.insert("nav", &nav);
        context.insert("year", &chrono::Utc::now().year());
        context
    }
}

fn listing_intro(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::Article => {
            "Expert insights on advanced cardiovascular biomarkers, heart disease prevention \
             strategies, and navigating insurance barriers to get the cardiac testing you need."
        }
        ContentType::Comparison => {
            "Side-by-side comparisons of cardiovascular tests, biomarkers, and testing options."
        }
        ContentType::Faq => {
            "Answers to common questions about ApoB, Lp(a), and advanced cardiac risk testing."
        }
    }
}

fn item_call_to_action(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::Article => "Want the tests this article talks about?",
        ContentType::Comparison => {
            "Ready to access advanced cardiovascular testing without insurance barriers?"
        }
        ContentType::Faq => "Have more questions about advanced cardiovascular testing?",
    }
}

/// Tera filter: format a front-matter date like "January 5, 2024"
fn long_date_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = tera::try_get_value!("long_date", "value", String, value);
    let formatted = parse_date_string(&s)
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or(s);
    Ok(Value::String(formatted))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "...".to_string(),
    };

    if s.chars().count() <= length {
        Ok(Value::String(s))
    } else {
        let truncated: String = s.chars().take(length).collect();
        Ok(Value::String(format!("{}{}", truncated.trim_end(), omission)))
    }
}
