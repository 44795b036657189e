//! Content module - markdown items, front-matter and rendering

mod frontmatter;
mod item;
pub mod loader;
mod markdown;

pub use frontmatter::{parse_date_string, FrontMatter, FrontMatterError};
pub use item::{ContentItem, ContentType};
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
