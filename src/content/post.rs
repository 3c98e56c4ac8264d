//! Post model
//!
//! A [`Post`] ties together the front-matter side-channel and the
//! rendered document: display metadata, the slugs the site routes on,
//! and the final HTML plus footnote table.

use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use super::{Frontmatter, MarkdownRenderer};
use crate::helpers::date::parse_post_date;
use crate::helpers::text::{slugify, strip_inline_markup};

/// A rendered journal post or page
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// Post title from front-matter, "Untitled" when absent
    pub title: String,

    /// Description from front-matter, else the first body paragraph
    /// with inline markup stripped
    pub description: String,

    /// Display date string as the author wrote it
    pub date: String,

    /// Parsed date, used for sorting; falls back to a date found in
    /// the filename, then to today
    pub date_obj: NaiveDate,

    /// Filename-derived slug (`journals/2023-01-29.md` -> `2023-01-29`)
    pub date_slug: String,

    /// Slugified title
    pub title_slug: String,

    /// Canonical slug: `date_slug/title_slug`
    pub slug: String,

    /// Source path without the `.md` extension
    pub path: String,

    /// Rendered HTML content
    pub content: String,

    /// Rendered footnotes, keyed by number
    pub footnotes: BTreeMap<u32, String>,
}

impl Post {
    /// Parse a document into a post. Never fails: malformed front-matter
    /// or markdown degrades to literal text, missing metadata gets
    /// defaults.
    pub fn parse(content: &str, filename: &str) -> Self {
        let (meta, body) = Frontmatter::parse(content);
        let rendered = MarkdownRenderer::new().render(body);

        let date_slug = {
            let name = filename.strip_prefix("journals/").unwrap_or(filename);
            name.strip_suffix(".md").unwrap_or(name).to_string()
        };
        let title_slug = slugify(meta.title().unwrap_or("untitled"));

        let date = meta.date().unwrap_or("").to_string();
        let date_obj = parse_post_date(meta.date().unwrap_or(filename))
            .unwrap_or_else(|| Local::now().date_naive());

        let description = meta
            .description()
            .map(str::to_string)
            .unwrap_or_else(|| extract_description(body));

        Self {
            title: meta.title().unwrap_or("Untitled").to_string(),
            description,
            date,
            date_obj,
            slug: format!("{}/{}", date_slug, title_slug),
            date_slug,
            title_slug,
            path: filename.strip_suffix(".md").unwrap_or(filename).to_string(),
            content: rendered.html,
            footnotes: rendered.footnotes,
        }
    }
}

/// First non-blank, non-heading body line with inline markdown
/// stripped, capped at 200 characters. Used when the author gave no
/// `description` key.
fn extract_description(body: &str) -> String {
    for line in body.split('\n') {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        return strip_inline_markup(line).chars().take(200).collect();
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_document() {
        let content = "+++\ntitle = \"Hello\"\n+++\n# Hi\n\nSome *text*.\n";
        let post = Post::parse(content, "journals/2023-01-29.md");
        assert_eq!(post.title, "Hello");
        assert!(post
            .content
            .contains("<h1 id=\"hi\">Hi <a href=\"#hi\" class=\"header-link\">#</a></h1>"));
        assert!(post.content.contains("<em>text</em>"));
    }

    #[test]
    fn test_slug_derivation() {
        let content = "+++\ntitle = \"My Post!\"\n+++\nbody";
        let post = Post::parse(content, "journals/2023-09-23.md");
        assert_eq!(post.date_slug, "2023-09-23");
        assert_eq!(post.title_slug, "my-post");
        assert_eq!(post.slug, "2023-09-23/my-post");
        assert_eq!(post.path, "journals/2023-09-23");
    }

    #[test]
    fn test_untitled_defaults() {
        let post = Post::parse("no frontmatter at all", "journals/2024-02-08.md");
        assert_eq!(post.title, "Untitled");
        assert_eq!(post.title_slug, "untitled");
        assert_eq!(post.date, "");
    }

    #[test]
    fn test_date_from_frontmatter() {
        let content = "+++\ntitle = \"t\"\ndate = \"29 Jan 2023\"\n+++\nbody";
        let post = Post::parse(content, "journals/2023-01-29.md");
        assert_eq!(post.date, "29 Jan 2023");
        assert_eq!(post.date_obj, NaiveDate::from_ymd_opt(2023, 1, 29).unwrap());
    }

    #[test]
    fn test_date_falls_back_to_filename() {
        let post = Post::parse("+++\ntitle = \"t\"\n+++\nbody", "journals/2024-06-17.md");
        assert_eq!(post.date_obj, NaiveDate::from_ymd_opt(2024, 6, 17).unwrap());
    }

    #[test]
    fn test_description_fallback() {
        let content = "+++\ntitle = \"t\"\n+++\n# Heading\n\nA [linked](https://x.dev) **bold** start.\n";
        let post = Post::parse(content, "about.md");
        assert_eq!(post.description, "A linked bold start.");
    }

    #[test]
    fn test_description_from_frontmatter_wins() {
        let content = "+++\ntitle = \"t\"\ndescription = \"given\"\n+++\nbody text";
        let post = Post::parse(content, "about.md");
        assert_eq!(post.description, "given");
    }

    #[test]
    fn test_footnotes_attached() {
        let content = "+++\ntitle = \"t\"\n+++\nsee[^1]\n\n[^1]: Note one.";
        let post = Post::parse(content, "journals/2025-02-10.md");
        assert_eq!(post.footnotes.get(&1).map(String::as_str), Some("Note one."));
    }
}
