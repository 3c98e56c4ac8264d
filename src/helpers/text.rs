//! Text helper functions

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_ALPHANUMERIC_RE: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
    static ref STRIP_LINK_RE: Regex = Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap();
    static ref STRIP_BOLD_RE: Regex = Regex::new(r"\*\*([^*]+)\*\*").unwrap();
    static ref STRIP_ITALIC_RE: Regex = Regex::new(r"\*([^*]+)\*").unwrap();
    static ref STRIP_CODE_RE: Regex = Regex::new(r"`([^`]+)`").unwrap();
}

/// Derive a URL/anchor slug: lowercase, runs of non-alphanumeric
/// characters collapsed to a single hyphen, outer hyphens trimmed.
///
/// Shared by heading anchor ids and title slugs; identical inputs give
/// identical slugs, collisions included.
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    NON_ALPHANUMERIC_RE
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}

/// Reduce inline markdown (links, bold, italic, code) to its plain
/// text, for description extraction.
pub fn strip_inline_markup(text: &str) -> String {
    let text = STRIP_LINK_RE.replace_all(text, "${1}");
    let text = STRIP_BOLD_RE.replace_all(&text, "${1}");
    let text = STRIP_ITALIC_RE.replace_all(&text, "${1}");
    STRIP_CODE_RE.replace_all(&text, "${1}").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Hi"), "hi");
    }

    #[test]
    fn test_slugify_collapses_runs() {
        assert_eq!(slugify("a -- b!! c"), "a-b-c");
    }

    #[test]
    fn test_slugify_trims_hyphens() {
        assert_eq!(slugify("...leading and trailing..."), "leading-and-trailing");
    }

    #[test]
    fn test_slugify_drops_non_ascii() {
        // Anything outside [a-z0-9] becomes a separator, digits stay.
        assert_eq!(slugify("Über 9000"), "ber-9000");
    }

    #[test]
    fn test_strip_inline_markup() {
        assert_eq!(
            strip_inline_markup("a [link](https://x.dev) with **bold**, *italic* and `code`"),
            "a link with bold, italic and code"
        );
    }
}
