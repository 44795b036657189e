//! Content loader - loads content items from the content directory
//!
//! Nothing is cached: every call reads and renders the source files again.
//! I/O and parse failures never reach the caller; a listing skips the broken
//! file and a lookup reports it as not found.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{ContentItem, ContentType, FrontMatter, MarkdownRenderer};

/// Loads content items from `<content_dir>/<type directory>/<slug>.md`
#[derive(Debug, Clone)]
pub struct ContentLoader {
    content_dir: PathBuf,
    renderer: MarkdownRenderer,
}

impl ContentLoader {
    /// Create a new content loader
    pub fn new<P: Into<PathBuf>>(content_dir: P) -> Self {
        Self {
            content_dir: content_dir.into(),
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Directory holding items of the given type
    pub fn type_dir(&self, content_type: ContentType) -> PathBuf {
        self.content_dir.join(content_type.directory())
    }

    /// Load all items of a type, newest first
    pub fn list_all(&self, content_type: ContentType) -> Vec<ContentItem> {
        let dir = self.type_dir(content_type);
        if !dir.is_dir() {
            tracing::debug!("Content directory {:?} does not exist", dir);
            return Vec::new();
        }

        let mut items = Vec::new();

        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }
            let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match self.load_item(content_type, slug, path) {
                Ok(item) => items.push(item),
                Err(e) => {
                    tracing::warn!("Failed to load {} {:?}: {:#}", content_type, path, e);
                }
            }
        }

        sort_by_date_desc(&mut items);
        items
    }

    /// Load a single item by slug
    pub fn get_by_slug(&self, content_type: ContentType, slug: &str) -> Option<ContentItem> {
        if !is_valid_slug(slug) {
            tracing::debug!("Rejected slug {:?}", slug);
            return None;
        }

        let path = self.type_dir(content_type).join(format!("{}.md", slug));
        if !path.is_file() {
            return None;
        }

        match self.load_item(content_type, slug, &path) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!("Failed to load {} {:?}: {:#}", content_type, path, e);
                None
            }
        }
    }

    fn load_item(&self, content_type: ContentType, slug: &str, path: &Path) -> Result<ContentItem> {
        let source =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let (fm, body) = FrontMatter::parse(&source)?;

        let content = self.renderer.render(body);

        Ok(ContentItem {
            slug: slug.to_string(),
            title: fm.title.unwrap_or_default(),
            description: fm.description.unwrap_or_default(),
            content_type,
            date: fm.date,
            content,
            target_keywords: fm.target_keywords,
            idea_name: fm.idea_name,
            status: fm.status,
        })
    }
}

/// Sort newest first. Items without a parseable date follow the dated ones
/// in the order they were read.
pub fn sort_by_date_desc(items: &mut [ContentItem]) {
    items.sort_by_cached_key(|item| {
        std::cmp::Reverse(
            item.date
                .as_deref()
                .and_then(super::frontmatter::parse_date_string),
        )
    });
}

/// Slugs map 1:1 to file names inside the type directory
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('.')
        && !slug.contains(['/', '\\', '\0'])
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, content_type: ContentType, name: &str, body: &str) {
        let type_dir = dir.join(content_type.directory());
        fs::create_dir_all(&type_dir).unwrap();
        fs::write(type_dir.join(name), body).unwrap();
    }

    fn dated(title: &str, date: &str) -> String {
        format!("---\ntitle: {}\ndate: {}\n---\n\nBody of {}\n", title, date, title)
    }

    #[test]
    fn test_round_trip_item() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            ContentType::Article,
            "hello.md",
            "---\ntitle: \"T\"\ndescription: \"D\"\ndate: \"2024-01-01\"\n---\n# H\n\nText",
        );

        let loader = ContentLoader::new(tmp.path());
        let item = loader.get_by_slug(ContentType::Article, "hello").unwrap();
        assert_eq!(item.slug, "hello");
        assert_eq!(item.title, "T");
        assert_eq!(item.description, "D");
        assert_eq!(item.date.as_deref(), Some("2024-01-01"));
        assert_eq!(item.content_type, ContentType::Article);

        let h1 = item.content.find("<h1>H</h1>").unwrap();
        let p = item.content.find("<p>Text</p>").unwrap();
        assert!(h1 < p);
    }

    #[test]
    fn test_empty_frontmatter_block_is_not_rendered() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), ContentType::Article, "e.md", "---\n---\n# H\n\nText");

        let loader = ContentLoader::new(tmp.path());
        let item = loader.get_by_slug(ContentType::Article, "e").unwrap();
        assert_eq!(item.content, "<h1>H</h1>\n<p>Text</p>\n");
        assert_eq!(item.date, None);
    }

    #[test]
    fn test_list_all_sorted_by_date_desc() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), ContentType::Comparison, "a.md", &dated("March", "2024-03-01"));
        write(tmp.path(), ContentType::Comparison, "b.md", &dated("January", "2024-01-01"));
        write(tmp.path(), ContentType::Comparison, "c.md", &dated("February", "2024-02-01"));

        let loader = ContentLoader::new(tmp.path());
        let dates: Vec<_> = loader
            .list_all(ContentType::Comparison)
            .into_iter()
            .map(|i| i.date.unwrap())
            .collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-02-01", "2024-01-01"]);
    }

    #[test]
    fn test_undated_items_follow_dated_ones() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), ContentType::Faq, "undated.md", "---\ntitle: Undated\n---\nx");
        write(tmp.path(), ContentType::Faq, "old.md", &dated("Old", "2023-05-01"));
        write(tmp.path(), ContentType::Faq, "new.md", &dated("New", "2024-05-01"));

        let loader = ContentLoader::new(tmp.path());
        let titles: Vec<_> = loader
            .list_all(ContentType::Faq)
            .into_iter()
            .map(|i| i.title)
            .collect();
        assert_eq!(titles, vec!["New", "Old", "Undated"]);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let tmp = TempDir::new().unwrap();
        let loader = ContentLoader::new(tmp.path().join("nowhere"));
        assert!(loader.list_all(ContentType::Article).is_empty());
    }

    #[test]
    fn test_non_markdown_files_are_ignored() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), ContentType::Article, "notes.txt", "not content");
        write(tmp.path(), ContentType::Article, "post.md", &dated("Post", "2024-01-01"));

        let loader = ContentLoader::new(tmp.path());
        let items = loader.list_all(ContentType::Article);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].slug, "post");
    }

    #[test]
    fn test_missing_slug_is_not_found() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), ContentType::Faq, "exists.md", &dated("Exists", "2024-01-01"));

        let loader = ContentLoader::new(tmp.path());
        assert!(loader.get_by_slug(ContentType::Faq, "missing").is_none());
        // Same slug, different type
        assert!(loader.get_by_slug(ContentType::Article, "exists").is_none());
    }

    #[test]
    fn test_path_traversal_is_not_found() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), ContentType::Article, "post.md", &dated("Post", "2024-01-01"));
        fs::write(tmp.path().join("secret.md"), "---\ntitle: Secret\n---\n").unwrap();

        let loader = ContentLoader::new(tmp.path());
        assert!(loader.get_by_slug(ContentType::Article, "../secret").is_none());
        assert!(loader.get_by_slug(ContentType::Article, "..").is_none());
        assert!(loader.get_by_slug(ContentType::Article, "").is_none());
    }

    #[test]
    fn test_malformed_item_degrades() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            ContentType::Article,
            "broken.md",
            "---\ntitle: [unclosed\ndate: 2024-01-01\n---\nBody",
        );
        write(tmp.path(), ContentType::Article, "fine.md", &dated("Fine", "2024-01-01"));

        let loader = ContentLoader::new(tmp.path());
        assert!(loader.get_by_slug(ContentType::Article, "broken").is_none());
        let items = loader.list_all(ContentType::Article);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].slug, "fine");
    }

    #[test]
    fn test_reload_picks_up_changes() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), ContentType::Article, "post.md", &dated("First", "2024-01-01"));
        let loader = ContentLoader::new(tmp.path());
        assert_eq!(loader.get_by_slug(ContentType::Article, "post").unwrap().title, "First");

        write(tmp.path(), ContentType::Article, "post.md", &dated("Second", "2024-01-01"));
        assert_eq!(loader.get_by_slug(ContentType::Article, "post").unwrap().title, "Second");
    }
}
