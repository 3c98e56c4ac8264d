//! HTML helper functions

/// Escape the five HTML-significant characters. `&` goes first so
/// entities produced here are not escaped twice.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
