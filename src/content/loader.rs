//! Content loader - loads posts and pages from a content directory
//!
//! Mirrors the layout the site serves: `journals/*.md` are dated posts,
//! top-level `*.md` files are standalone pages. A file that cannot be
//! read is logged and skipped; one bad document never aborts the rest.

use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::Post;

/// Loads posts and pages from a content directory
pub struct ContentLoader {
    content_dir: PathBuf,
}

impl ContentLoader {
    pub fn new<P: AsRef<Path>>(content_dir: P) -> Self {
        Self {
            content_dir: content_dir.as_ref().to_path_buf(),
        }
    }

    /// Load all posts from `<content>/journals`, newest first.
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let journals_dir = self.content_dir.join("journals");
        if !journals_dir.exists() {
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&journals_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                match fs::read_to_string(path) {
                    Ok(content) => {
                        posts.push(Post::parse(&content, &self.relative_name(path)));
                    }
                    Err(e) => {
                        tracing::warn!("Skipping {:?}: {}", path, e);
                    }
                }
            }
        }

        posts.sort_by(|a, b| b.date_obj.cmp(&a.date_obj));

        Ok(posts)
    }

    /// Load top-level pages, keyed by page name (`about.md` -> `about`).
    pub fn load_pages(&self) -> Result<HashMap<String, Post>> {
        let mut pages = HashMap::new();

        if !self.content_dir.exists() {
            return Ok(pages);
        }

        for entry in WalkDir::new(&self.content_dir)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                match fs::read_to_string(path) {
                    Ok(content) => {
                        let name = self.relative_name(path);
                        let name = name.strip_suffix(".md").unwrap_or(&name).to_string();
                        pages.insert(name.clone(), Post::parse(&content, &name));
                    }
                    Err(e) => {
                        tracing::warn!("Skipping {:?}: {}", path, e);
                    }
                }
            }
        }

        Ok(pages)
    }

    /// Path relative to the content dir, with forward slashes, so slug
    /// derivation sees `journals/2023-01-29.md` on every platform.
    fn relative_name(&self, path: &Path) -> String {
        path.strip_prefix(&self.content_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_post(dir: &Path, name: &str, date: &str, title: &str) {
        let journals = dir.join("journals");
        fs::create_dir_all(&journals).unwrap();
        fs::write(
            journals.join(name),
            format!("+++\ntitle = \"{}\"\ndate = \"{}\"\n+++\nBody text.\n", title, date),
        )
        .unwrap();
    }

    #[test]
    fn test_load_posts_sorted_newest_first() {
        let tmp = tempfile::tempdir().unwrap();
        write_post(tmp.path(), "2023-01-29.md", "29 Jan 2023", "Older");
        write_post(tmp.path(), "2024-06-17.md", "17 Jun 2024", "Newer");

        let posts = ContentLoader::new(tmp.path()).load_posts().unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title, "Newer");
        assert_eq!(posts[1].title, "Older");
    }

    #[test]
    fn test_unreadable_file_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        write_post(tmp.path(), "2023-01-29.md", "29 Jan 2023", "Good");
        // Invalid UTF-8 makes read_to_string fail for this one.
        fs::write(tmp.path().join("journals/2023-02-03.md"), [0xff, 0xfe, 0x01]).unwrap();

        let posts = ContentLoader::new(tmp.path()).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Good");
    }

    #[test]
    fn test_missing_journals_dir_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let posts = ContentLoader::new(tmp.path()).load_posts().unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn test_load_pages_keyed_by_name() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join("about.md"),
            "+++\ntitle = \"About\"\n+++\nHello.\n",
        )
        .unwrap();
        write_post(tmp.path(), "2023-01-29.md", "29 Jan 2023", "Post");

        let pages = ContentLoader::new(tmp.path()).load_pages().unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages.get("about").unwrap().title, "About");
    }

    #[test]
    fn test_non_markdown_files_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("journals")).unwrap();
        fs::write(tmp.path().join("journals/notes.txt"), "not markdown").unwrap();

        let posts = ContentLoader::new(tmp.path()).load_posts().unwrap();
        assert!(posts.is_empty());
    }
}
