//! Front-matter parsing
//!
//! Journal posts open with a `+++` delimited block of `key = "value"`
//! lines. The format deliberately supports nothing fancier: values are
//! double-quoted, embedded quotes are not escaped, and malformed lines
//! are skipped rather than rejected.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

/// Marker line opening and closing the front-matter block.
pub const DELIMITER: &str = "+++";

lazy_static! {
    static ref META_LINE_RE: Regex = Regex::new(r#"^(\w+)\s*=\s*"(.+)"$"#).unwrap();
}

/// Front-matter key/value mapping from a post or page
#[derive(Debug, Clone, Default)]
pub struct Frontmatter {
    fields: HashMap<String, String>,
}

impl Frontmatter {
    /// Parse front-matter from document text.
    ///
    /// Returns `(frontmatter, body)` where the body is trimmed. When the
    /// first line is not the delimiter the whole input is body. When the
    /// opening delimiter is never closed, the body is likewise the whole
    /// input (delimiter and key lines included) — author mistakes must
    /// not make a document disappear.
    pub fn parse(content: &str) -> (Self, &str) {
        let mut fields = HashMap::new();
        let mut body = content;

        if let Some(rest) = content.strip_prefix("+++\n") {
            let mut consumed = DELIMITER.len() + 1;
            for line in rest.split('\n') {
                if line == DELIMITER {
                    body = &content[consumed + DELIMITER.len()..];
                    break;
                }
                if let Some(caps) = META_LINE_RE.captures(line) {
                    fields.insert(caps[1].to_string(), caps[2].to_string());
                }
                consumed += line.len() + 1;
            }
        }

        (Self { fields }, body.trim())
    }

    /// Look up a metadata value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    pub fn description(&self) -> Option<&str> {
        self.get("description")
    }

    pub fn date(&self) -> Option<&str> {
        self.get("date")
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// All key/value pairs, for callers that want author-defined keys.
    pub fn fields(&self) -> &HashMap<String, String> {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_frontmatter() {
        let content = "+++\ntitle = \"Hello\"\ndate = \"29 Jan 2023\"\n+++\n# Hi\n";
        let (fm, body) = Frontmatter::parse(content);
        assert_eq!(fm.title(), Some("Hello"));
        assert_eq!(fm.date(), Some("29 Jan 2023"));
        assert_eq!(body, "# Hi");
    }

    #[test]
    fn test_no_frontmatter() {
        let (fm, body) = Frontmatter::parse("just some text\n");
        assert!(fm.is_empty());
        assert_eq!(body, "just some text");
    }

    #[test]
    fn test_values_round_trip_exactly() {
        let content = "+++\ntitle = \"  spaced  out  \"\n+++\nbody";
        let (fm, _) = Frontmatter::parse(content);
        assert_eq!(fm.title(), Some("  spaced  out  "));
    }

    #[test]
    fn test_whitespace_around_equals() {
        let content = "+++\ntitle=\"tight\"\ndate   =   \"loose\"\n+++\nbody";
        let (fm, _) = Frontmatter::parse(content);
        assert_eq!(fm.title(), Some("tight"));
        assert_eq!(fm.date(), Some("loose"));
    }

    #[test]
    fn test_malformed_lines_ignored() {
        let content = "+++\ntitle = \"ok\"\nbroken line\nalso = unquoted\nnum = 42\n+++\nbody";
        let (fm, body) = Frontmatter::parse(content);
        assert_eq!(fm.title(), Some("ok"));
        assert_eq!(fm.fields().len(), 1);
        assert_eq!(body, "body");
    }

    #[test]
    fn test_author_defined_keys() {
        let content = "+++\ntitle = \"t\"\nmood = \"rainy\"\n+++\nbody";
        let (fm, _) = Frontmatter::parse(content);
        assert_eq!(fm.get("mood"), Some("rainy"));
    }

    #[test]
    fn test_unterminated_block_is_body() {
        let content = "+++\ntitle = \"Hello\"\nno closing marker here";
        let (fm, body) = Frontmatter::parse(content);
        // Keys scanned before EOF are still recorded, but nothing is
        // carved out of the body.
        assert_eq!(fm.title(), Some("Hello"));
        assert!(body.starts_with(DELIMITER));
        assert!(body.contains("no closing marker here"));
    }

    #[test]
    fn test_delimiter_must_be_first_line() {
        let content = "\n+++\ntitle = \"nope\"\n+++\nbody";
        let (fm, _) = Frontmatter::parse(content);
        assert!(fm.is_empty());
    }

    #[test]
    fn test_empty_block() {
        let (fm, body) = Frontmatter::parse("+++\n+++\ncontent");
        assert!(fm.is_empty());
        assert_eq!(body, "content");
    }
}
