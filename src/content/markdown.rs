//! Hand-rolled markdown rendering
//!
//! The renderer is a fixed sequence of passes over the document text:
//! footnote collection, code-block shielding, block transforms (tables,
//! blockquotes, lists, rules, headers), inline substitutions, paragraph
//! wrapping, and finally code-block restoration. Every pass is total —
//! malformed constructs fall through as literal text, author input never
//! causes an error.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::BTreeMap;

use crate::helpers::html::escape_html;
use crate::helpers::text::slugify;

lazy_static! {
    static ref FOOTNOTE_DEF_RE: Regex = Regex::new(r"(?m)^\[\^(\d+)\]:\s*(.+)$").unwrap();
    static ref CODE_FENCE_OPEN_RE: Regex = Regex::new(r"^```(\w*)$").unwrap();
    static ref TABLE_ROW_RE: Regex = Regex::new(r"^\|(.+)\|$").unwrap();
    static ref TABLE_SEP_RE: Regex = Regex::new(r"^\|[\s:|-]+\|$").unwrap();
    static ref UL_ITEM_RE: Regex = Regex::new(r"^[-*]\s+(.+)$").unwrap();
    static ref OL_ITEM_RE: Regex = Regex::new(r"^(\d+)\.\s+(.+)$").unwrap();
    static ref HR_DASH_RE: Regex = Regex::new(r"(?m)^-{3,}$").unwrap();
    static ref HR_STAR_RE: Regex = Regex::new(r"(?m)^\*{3,}$").unwrap();
    static ref HR_UNDERSCORE_RE: Regex = Regex::new(r"(?m)^_{3,}$").unwrap();
    static ref H1_RE: Regex = Regex::new(r"(?m)^# (.+)$").unwrap();
    static ref H2_RE: Regex = Regex::new(r"(?m)^## (.+)$").unwrap();
    static ref H3_RE: Regex = Regex::new(r"(?m)^### (.+)$").unwrap();
    static ref IMAGE_RE: Regex = Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap();
    static ref LINK_RE: Regex = Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap();
    static ref BOLD_RE: Regex = Regex::new(r"\*\*(.+?)\*\*").unwrap();
    static ref ITALIC_UNDERSCORE_RE: Regex = Regex::new(r"_([^_]+)_").unwrap();
    static ref ITALIC_STAR_SIMPLE_RE: Regex = Regex::new(r"\*(.+?)\*").unwrap();
    static ref INLINE_CODE_RE: Regex = Regex::new(r"`([^`]+)`").unwrap();
    static ref FOOTNOTE_REF_RE: Regex = Regex::new(r"\[\^(\d+)\]").unwrap();
}

/// Final output of the rendering pipeline: the HTML body plus the
/// footnote table with inline markup already applied. Footnotes are
/// keyed by number, so iteration is numerically ascending.
#[derive(Debug, Clone, Default)]
pub struct RenderedDocument {
    pub html: String,
    pub footnotes: BTreeMap<u32, String>,
}

/// Markdown renderer for journal posts
///
/// Stateless; every call to [`render`](Self::render) is a pure function
/// of its input, so one renderer can be shared across documents (or
/// threads) freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render markdown body text (frontmatter already stripped) to HTML.
    pub fn render(&self, markdown: &str) -> RenderedDocument {
        let (body, raw_footnotes) = collect_footnotes(markdown);
        let (body, code_blocks) = shield_code_blocks(&body);
        let body = transform_tables(&body);
        let body = transform_blockquotes(&body);
        let body = transform_lists(&body);
        let body = substitute_rules(&body);
        let body = substitute_headers(&body);
        let body = substitute_inline(&body);
        let body = wrap_paragraphs(&body);
        let html = restore_code_blocks(body, &code_blocks);
        let footnotes = render_footnotes(&raw_footnotes);

        RenderedDocument { html, footnotes }
    }
}

/// Pull full-line `[^N]: text` definitions out of the body.
///
/// Returns the body with definition lines blanked and the raw (not yet
/// inline-rendered) footnote table.
fn collect_footnotes(markdown: &str) -> (String, BTreeMap<u32, String>) {
    let mut notes = BTreeMap::new();
    for caps in FOOTNOTE_DEF_RE.captures_iter(markdown) {
        if let Ok(num) = caps[1].parse::<u32>() {
            notes.insert(num, caps[2].trim().to_string());
        }
    }
    let body = FOOTNOTE_DEF_RE.replace_all(markdown, "").into_owned();
    (body, notes)
}

/// Replace fenced code blocks with opaque placeholder tokens.
///
/// Block content is captured verbatim, escaped exactly once, and stored
/// (with its language class, if the fence carried a tag) for restoration
/// after all other passes. An unterminated fence consumes the rest of
/// the document as code.
fn shield_code_blocks(text: &str) -> (String, Vec<String>) {
    let mut blocks: Vec<String> = Vec::new();
    let mut out: Vec<String> = Vec::new();
    let mut lines = text.split('\n');

    while let Some(line) = lines.next() {
        let Some(caps) = CODE_FENCE_OPEN_RE.captures(line) else {
            out.push(line.to_string());
            continue;
        };
        let lang = caps.get(1).map(|m| m.as_str()).unwrap_or("");

        let mut code = String::new();
        for code_line in lines.by_ref() {
            if code_line == "```" {
                break;
            }
            code.push_str(code_line);
            code.push('\n');
        }

        let lang_class = if lang.is_empty() {
            String::new()
        } else {
            format!(" class=\"language-{}\"", lang)
        };
        out.push(format!("<!--CODEBLOCK{}-->", blocks.len()));
        blocks.push(format!(
            "<pre><code{}>{}</code></pre>",
            lang_class,
            escape_html(code.trim())
        ));
    }

    (out.join("\n"), blocks)
}

/// Group contiguous `|cell|cell|` lines into `<table>` elements.
///
/// Separator rows (`|---|---|`) are consumed without output. A line
/// carrying a code-block placeholder force-closes any open table run and
/// passes through untouched.
fn transform_tables(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<String>> = Vec::new();

    for line in text.split('\n') {
        if line.contains("<!--CODEBLOCK") {
            if !rows.is_empty() {
                out.push(render_table(&rows));
                rows.clear();
            }
            out.push(line.to_string());
            continue;
        }

        if TABLE_ROW_RE.is_match(line.trim()) {
            if TABLE_SEP_RE.is_match(line) {
                continue;
            }
            let parts: Vec<&str> = line.split('|').collect();
            let cells = parts[1..parts.len() - 1]
                .iter()
                .map(|c| c.trim().to_string())
                .collect();
            rows.push(cells);
        } else {
            if !rows.is_empty() {
                out.push(render_table(&rows));
                rows.clear();
            }
            out.push(line.to_string());
        }
    }

    if !rows.is_empty() {
        out.push(render_table(&rows));
    }

    out.join("\n")
}

/// Render accumulated table rows; the first row becomes the header.
fn render_table(rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut html = String::from("<table>\n");

    html.push_str("<tr>");
    for cell in &rows[0] {
        html.push_str(&format!("<th>{}</th>", cell));
    }
    html.push_str("</tr>\n");

    for row in &rows[1..] {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!("<td>{}</td>", cell));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</table>");
    html
}

/// Group contiguous `> ` lines into one `<blockquote>`, lines joined
/// with `<br>`. A bare `>` contributes an empty line within the quote.
fn transform_blockquotes(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut quote: Vec<String> = Vec::new();

    for line in text.split('\n') {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix("> ") {
            quote.push(rest.to_string());
        } else if trimmed == ">" {
            quote.push(String::new());
        } else {
            if !quote.is_empty() {
                out.push(format!("<blockquote>{}</blockquote>", quote.join("<br>")));
                quote.clear();
            }
            out.push(line.to_string());
        }
    }

    if !quote.is_empty() {
        out.push(format!("<blockquote>{}</blockquote>", quote.join("<br>")));
    }

    out.join("\n")
}

/// Group contiguous list items into `<ul>`/`<ol>` containers.
///
/// An item of one kind closes an open run of the other kind; any
/// non-item line closes whichever run is open.
fn transform_lists(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut in_ul = false;
    let mut in_ol = false;

    for line in text.split('\n') {
        let trimmed = line.trim();

        if let Some(caps) = UL_ITEM_RE.captures(trimmed) {
            if in_ol {
                out.push("</ol>".to_string());
                in_ol = false;
            }
            if !in_ul {
                out.push("<ul>".to_string());
                in_ul = true;
            }
            out.push(format!("<li>{}</li>", &caps[1]));
        } else if let Some(caps) = OL_ITEM_RE.captures(trimmed) {
            if in_ul {
                out.push("</ul>".to_string());
                in_ul = false;
            }
            if !in_ol {
                out.push("<ol>".to_string());
                in_ol = true;
            }
            out.push(format!("<li>{}</li>", &caps[2]));
        } else {
            if in_ul {
                out.push("</ul>".to_string());
                in_ul = false;
            }
            if in_ol {
                out.push("</ol>".to_string());
                in_ol = false;
            }
            out.push(line.to_string());
        }
    }

    if in_ul {
        out.push("</ul>".to_string());
    }
    if in_ol {
        out.push("</ol>".to_string());
    }

    out.join("\n")
}

/// Full lines of 3+ `-`, `*`, or `_` become `<hr>`.
fn substitute_rules(text: &str) -> String {
    let text = HR_DASH_RE.replace_all(text, "<hr>");
    let text = HR_STAR_RE.replace_all(&text, "<hr>");
    HR_UNDERSCORE_RE.replace_all(&text, "<hr>").into_owned()
}

/// `#`–`###` lines become headings with slugified anchor ids and a
/// self-link. Identical heading text yields identical (colliding) ids.
fn substitute_headers(text: &str) -> String {
    let heading = |tag: &'static str| {
        move |caps: &Captures| {
            let text = &caps[1];
            let id = slugify(text);
            format!(
                "<{tag} id=\"{id}\">{text} <a href=\"#{id}\" class=\"header-link\">#</a></{tag}>"
            )
        }
    };

    let text = H3_RE.replace_all(text, heading("h3"));
    let text = H2_RE.replace_all(&text, heading("h2"));
    H1_RE.replace_all(&text, heading("h1")).into_owned()
}

/// Ordered inline substitutions. The order is load-bearing: images
/// before links (image syntax is a superset), bold before italic so
/// `**` is not half-eaten by the single-asterisk rule.
fn substitute_inline(text: &str) -> String {
    let text = IMAGE_RE.replace_all(text, "<img src=\"${2}\" alt=\"${1}\">");
    let text = LINK_RE.replace_all(&text, "<a href=\"${2}\">${1}</a>");
    let text = BOLD_RE.replace_all(&text, "<strong>${1}</strong>");
    let text = ITALIC_UNDERSCORE_RE.replace_all(&text, "<em>${1}</em>");
    let text = italic_asterisk(&text);
    let text = INLINE_CODE_RE.replace_all(&text, "<code>${1}</code>");

    FOOTNOTE_REF_RE
        .replace_all(&text, |caps: &Captures| match caps[1].parse::<u32>() {
            Ok(num) => format!(
                "<span class=\"footnote-ref\"><sup><a href=\"#fn{num}\" id=\"fnref{num}\">{num}</a></sup></span>"
            ),
            Err(_) => caps[0].to_string(),
        })
        .into_owned()
}

/// Single-asterisk italic, skipping asterisks that touch another `*`.
///
/// Equivalent to `(?<!\*)\*(?!\*)([^*]+)\*(?!\*)`, written as an
/// explicit scan because the regex crate has no look-around. Only the
/// ASCII `*` byte is inspected, so byte stepping stays on UTF-8
/// boundaries at every slice point.
fn italic_asterisk(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let is_opener = bytes[i] == b'*'
            && (i == 0 || bytes[i - 1] != b'*')
            && bytes.get(i + 1).is_some_and(|&b| b != b'*');
        if is_opener {
            let close = bytes[i + 1..]
                .iter()
                .position(|&b| b == b'*')
                .map(|p| i + 1 + p);
            if let Some(j) = close {
                if bytes.get(j + 1) != Some(&b'*') {
                    out.push_str(&text[start..i]);
                    out.push_str("<em>");
                    out.push_str(&text[i + 1..j]);
                    out.push_str("</em>");
                    i = j + 1;
                    start = i;
                    continue;
                }
            }
        }
        i += 1;
    }

    out.push_str(&text[start..]);
    out
}

/// Wrap leftover text lines in `<p>` elements.
///
/// Blank lines close an open paragraph; already-rendered block markup
/// and placeholder lines pass through untouched. Paragraph lines keep a
/// trailing space since they are joined back without separators.
fn wrap_paragraphs(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut in_paragraph = false;

    for raw in text.split('\n') {
        let line = raw.trim();

        if line.is_empty() {
            if in_paragraph {
                out.push("</p>".to_string());
                in_paragraph = false;
            }
            continue;
        }

        if is_block_markup(line) {
            if in_paragraph {
                out.push("</p>".to_string());
                in_paragraph = false;
            }
            out.push(line.to_string());
        } else {
            if !in_paragraph {
                out.push("<p>".to_string());
                in_paragraph = true;
            }
            out.push(format!("{} ", line));
        }
    }

    if in_paragraph {
        out.push("</p>".to_string());
    }

    out.join("\n")
}

/// Lines the paragraph pass must not wrap.
fn is_block_markup(line: &str) -> bool {
    line.starts_with("<h")
        || line.starts_with("<blockquote>")
        || line.starts_with("<pre>")
        || line.starts_with("<table>")
        || line.starts_with("<tr>")
        || line == "</table>"
        || line.starts_with("<img")
        || line.contains("<!--CODEBLOCK")
        || line.starts_with("<ul>")
        || line.starts_with("</ul>")
        || line.starts_with("<ol>")
        || line.starts_with("</ol>")
        || line.starts_with("<li>")
        || line == "<hr>"
}

/// Substitute placeholder tokens back with their rendered code blocks,
/// exactly one substitution per token, in discovery order.
fn restore_code_blocks(mut html: String, blocks: &[String]) -> String {
    for (i, block) in blocks.iter().enumerate() {
        let placeholder = format!("<!--CODEBLOCK{}-->", i);
        html = html.replacen(&placeholder, block, 1);
    }
    html
}

/// Apply the reduced inline set (links, bold, plain asterisk italic,
/// inline code — no images, no footnote refs) to each raw footnote.
fn render_footnotes(raw: &BTreeMap<u32, String>) -> BTreeMap<u32, String> {
    raw.iter()
        .map(|(&num, content)| {
            let text = LINK_RE.replace_all(content, "<a href=\"${2}\">${1}</a>");
            let text = BOLD_RE.replace_all(&text, "<strong>${1}</strong>");
            let text = ITALIC_STAR_SIMPLE_RE.replace_all(&text, "<em>${1}</em>");
            let text = INLINE_CODE_RE.replace_all(&text, "<code>${1}</code>");
            (num, text.into_owned())
        })
        .collect()
}
