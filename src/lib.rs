//! journal-rs: a markdown renderer for journal-style blogs
//!
//! This crate implements the rendering core of a small journal site:
//! `+++` front-matter extraction, sidebar footnotes, and a hand-rolled
//! line-oriented markdown-to-HTML pipeline. Rendering is total — no
//! author input can make it fail — and pure, so documents can be
//! processed in parallel by the caller.

pub mod content;
pub mod helpers;

pub use content::{ContentLoader, Frontmatter, MarkdownRenderer, Post, RenderedDocument};

/// Render a document (front-matter included) to HTML plus footnotes.
///
/// The front-matter mapping is discarded here; callers that need it use
/// [`Frontmatter::parse`] or [`Post::parse`].
pub fn render(document: &str) -> RenderedDocument {
    let (_, body) = Frontmatter::parse(document);
    MarkdownRenderer::new().render(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_skips_frontmatter() {
        let doc = render("+++\ntitle = \"Hello\"\n+++\n# Hi\n\nSome *text*.\n");
        assert!(doc.html.contains("<h1 id=\"hi\">"));
        assert!(doc.html.contains("<em>text</em>"));
        assert!(!doc.html.contains("+++"));
    }
}
