//! Description text handling
//!
//! - `html`: streaming reader for the HTML subset found in descriptions
//! - `rich`: conversions to escaped literals, summaries and doc comments

pub mod html;
pub mod rich;

pub use html::{HtmlError, HtmlEvent, HtmlReader};
pub use rich::{
    escape_literal, render_inline, to_doc_comment, to_inline_comment, to_plain_summary,
    InlineStyle, ESCAPED_NEWLINE,
};
