//! Conversions from HTML descriptions to comment and literal text

use crate::text::{HtmlError, HtmlEvent, HtmlReader};

/// Two-character escape sequences for a CRLF line break, as written into
/// a string literal
pub const ESCAPED_NEWLINE: &str = "\\r\\n";

/// Prefix emitted when a list item opens
pub const LIST_ITEM_MARKER: &str = "* ";

/// Character reference standing in for a line break inside `///` comments
pub const DOC_LINE_BREAK: &str = "&#10;";

/// Marker appended to a summary that was cut at its first line
pub const ELLIPSIS: &str = " ...";

/// Elements whose closing tag ends a line
const BLOCK_ELEMENTS: &[&str] = &["p", "li", "h1", "h2", "h3", "h4", "h5"];

/// How [`render_inline`] writes text and line breaks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineStyle {
    /// Written after every block-level element
    pub newline: &'static str,
    /// Escape text for a double-quoted string literal
    pub escape: bool,
}

impl InlineStyle {
    /// Single-line text safe inside a double-quoted literal
    pub const ESCAPED: InlineStyle = InlineStyle {
        newline: ESCAPED_NEWLINE,
        escape: true,
    };

    /// Multi-line plain text, left for a serializer to escape
    pub const PLAIN: InlineStyle = InlineStyle {
        newline: "\n",
        escape: false,
    };
}

/// Escape text for a double-quoted string literal.
///
/// Backslashes and quotes are escaped, and both CRLF and bare LF become
/// [`ESCAPED_NEWLINE`].
pub fn escape_literal(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace("\r\n", ESCAPED_NEWLINE)
        .replace('\n', ESCAPED_NEWLINE)
}

/// Flatten an HTML fragment into one run of text.
///
/// List items are prefixed with [`LIST_ITEM_MARKER`], block-level closings
/// append the style's newline, and trailing newlines are trimmed.
pub fn render_inline(html: &str, style: InlineStyle) -> Result<String, HtmlError> {
    let mut output = String::new();

    for event in HtmlReader::new(html) {
        match event? {
            HtmlEvent::Start { name, .. } if name == "li" => output.push_str(LIST_ITEM_MARKER),
            HtmlEvent::Start { .. } => {}
            HtmlEvent::Text(text) if style.escape => output.push_str(&escape_literal(&text)),
            HtmlEvent::Text(text) => output.push_str(&text),
            HtmlEvent::End { name } => {
                if BLOCK_ELEMENTS.contains(&name.as_str()) {
                    output.push_str(style.newline);
                }
            }
        }
    }

    while output.ends_with(style.newline) {
        output.truncate(output.len() - style.newline.len());
    }
    Ok(output)
}

/// Escaped single-line form of a description, for string literals
pub fn to_inline_comment(html: &str) -> Result<String, HtmlError> {
    render_inline(html, InlineStyle::ESCAPED)
}

/// First line of a description with paragraph tags removed.
///
/// [`ELLIPSIS`] is appended whenever the description contains a line break.
pub fn to_plain_summary(html: &str) -> String {
    let strip = |s: &str| s.replace("<p>", "").replace("</p>", "");

    match html.split_once('\n') {
        Some((first, _)) => format!("{}{}", strip(first.trim_end_matches('\r')), ELLIPSIS),
        None => strip(html),
    }
}

/// Keep a description on one `///` line by replacing its line breaks with
/// [`DOC_LINE_BREAK`]. Markup is left in place.
pub fn to_doc_comment(html: &str) -> String {
    html.replace("\r\n", DOC_LINE_BREAK)
        .replace('\n', DOC_LINE_BREAK)
}
