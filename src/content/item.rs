//! Content item model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kinds of published content, one directory each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Article,
    Comparison,
    Faq,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [
        ContentType::Article,
        ContentType::Comparison,
        ContentType::Faq,
    ];

    /// Directory under the content root
    pub fn directory(&self) -> &'static str {
        match self {
            ContentType::Article => "blog",
            ContentType::Comparison => "comparison",
            ContentType::Faq => "faq",
        }
    }

    /// URL prefix of the listing and item pages
    pub fn url_prefix(&self) -> &'static str {
        match self {
            ContentType::Article => "/blog",
            ContentType::Comparison => "/compare",
            ContentType::Faq => "/faq",
        }
    }

    /// Heading used on listing pages
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Article => "Cardiovascular Health Blog",
            ContentType::Comparison => "Test Comparisons",
            ContentType::Faq => "Frequently Asked Questions",
        }
    }

    /// Short navigation name
    pub fn nav_name(&self) -> &'static str {
        match self {
            ContentType::Article => "Blog",
            ContentType::Comparison => "Comparisons",
            ContentType::Faq => "FAQ",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Article => "article",
            ContentType::Comparison => "comparison",
            ContentType::Faq => "faq",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "article" | "articles" | "blog" | "blog-post" | "post" | "posts" => {
                Ok(ContentType::Article)
            }
            "comparison" | "comparisons" | "compare" => Ok(ContentType::Comparison),
            "faq" | "faqs" => Ok(ContentType::Faq),
            other => Err(format!(
                "Unknown content type: {}. Available: article, comparison, faq",
                other
            )),
        }
    }
}

/// A published piece of content, rebuilt from its source file on every load
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// File name without extension
    pub slug: String,

    pub title: String,

    pub description: String,

    #[serde(rename = "type")]
    pub content_type: ContentType,

    /// Publication date as written in the front-matter
    pub date: Option<String>,

    /// Rendered HTML
    pub content: String,

    pub target_keywords: Vec<String>,

    pub idea_name: Option<String>,

    pub status: Option<String>,
}

impl ContentItem {
    /// Site path of this item, e.g. `/compare/apob-vs-ldl`
    pub fn path(&self) -> String {
        format!("{}/{}", self.content_type.url_prefix(), self.slug)
    }
}
