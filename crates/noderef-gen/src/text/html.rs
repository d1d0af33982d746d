//! Streaming reader for the HTML subset used in API descriptions
//!
//! The reader walks a fragment as a flat stream of start tags, end tags and
//! text. Fragments are wrapped in a synthetic `<html>` root first, so a bare
//! run of text or several sibling paragraphs read fine. Elements still open
//! at the end of input are closed implicitly; closing a tag that was never
//! opened is an error.

use std::collections::VecDeque;

use thiserror::Error;

/// Synthetic root element wrapped around every fragment
pub const ROOT_ELEMENT: &str = "html";

/// Elements that never have content or a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Errors raised while reading a fragment
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HtmlError {
    /// A `<` opened a tag that never closed
    #[error("unterminated tag at offset {offset}")]
    UnterminatedTag { offset: usize },

    /// A `<!--` comment never closed
    #[error("unterminated comment at offset {offset}")]
    UnterminatedComment { offset: usize },

    /// A closing tag matched no open element
    #[error("unexpected closing tag </{name}> at offset {offset}")]
    UnexpectedEndTag { name: String, offset: usize },
}

/// One item of the token stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlEvent {
    /// Opening tag; `name` is lowercased
    Start { name: String, self_closing: bool },
    /// Closing tag, explicit or implied
    End { name: String },
    /// Text with entities decoded. Whitespace-only runs are not reported.
    Text(String),
}

/// Pull-based reader over a wrapped fragment
pub struct HtmlReader {
    source: String,
    pos: usize,
    open: Vec<String>,
    pending: VecDeque<HtmlEvent>,
    finished: bool,
}

impl HtmlReader {
    /// Create a reader over `fragment`, wrapped in the synthetic root
    pub fn new(fragment: &str) -> Self {
        Self {
            source: format!("<{0}>{1}</{0}>", ROOT_ELEMENT, fragment),
            pos: 0,
            open: Vec::new(),
            pending: VecDeque::new(),
            finished: false,
        }
    }

    fn rest(&self) -> &str {
        &self.source[self.pos..]
    }

    fn fail(&mut self, err: HtmlError) -> Option<Result<HtmlEvent, HtmlError>> {
        self.finished = true;
        Some(Err(err))
    }

    /// Offset of the `>` ending the tag that starts at `self.pos`, skipping
    /// over quoted attribute values
    fn tag_end(&self) -> Option<usize> {
        let mut quote = None;
        for (i, c) in self.rest().char_indices().skip(1) {
            match (quote, c) {
                (Some(q), c) if c == q => quote = None,
                (Some(_), _) => {}
                (None, '"' | '\'') => quote = Some(c),
                (None, '>') => return Some(self.pos + i),
                (None, _) => {}
            }
        }
        None
    }

    fn read_start_tag(&mut self) -> Option<Result<HtmlEvent, HtmlError>> {
        let start = self.pos;
        let Some(end) = self.tag_end() else {
            return self.fail(HtmlError::UnterminatedTag { offset: start });
        };

        let inner = &self.source[start + 1..end];
        let explicit_close = inner.ends_with('/');
        let name: String = inner
            .chars()
            .take_while(|c| !c.is_whitespace() && *c != '/')
            .collect::<String>()
            .to_ascii_lowercase();

        self.pos = end + 1;

        let self_closing = explicit_close || VOID_ELEMENTS.contains(&name.as_str());
        if !self_closing {
            self.open.push(name.clone());
        }
        Some(Ok(HtmlEvent::Start { name, self_closing }))
    }

    fn read_end_tag(&mut self) -> Option<Result<HtmlEvent, HtmlError>> {
        let start = self.pos;
        let Some(end) = self.source[start..].find('>').map(|i| start + i) else {
            return self.fail(HtmlError::UnterminatedTag { offset: start });
        };

        let name = self.source[start + 2..end].trim().to_ascii_lowercase();
        self.pos = end + 1;

        let Some(depth) = self.open.iter().rposition(|open| *open == name) else {
            return self.fail(HtmlError::UnexpectedEndTag { name, offset: start });
        };

        // Inner elements left open are closed before the matched one
        while self.open.len() > depth {
            if let Some(closed) = self.open.pop() {
                self.pending.push_back(HtmlEvent::End { name: closed });
            }
        }
        self.pending.pop_front().map(Ok)
    }

    fn read_text(&mut self) -> Option<HtmlEvent> {
        let start = self.pos;
        let first = self.rest().chars().next().map_or(1, char::len_utf8);
        let end = self.source[start + first..]
            .find('<')
            .map(|i| start + first + i)
            .unwrap_or(self.source.len());
        self.pos = end;

        let raw = &self.source[start..end];
        if raw.trim().is_empty() {
            return None;
        }
        Some(HtmlEvent::Text(
            html_escape::decode_html_entities(raw).into_owned(),
        ))
    }

    /// Skip a `<!...>` or `<?...>` declaration
    fn skip_declaration(&mut self) -> Result<(), HtmlError> {
        let start = self.pos;
        match self.rest().find('>') {
            Some(i) => {
                self.pos = start + i + 1;
                Ok(())
            }
            None => Err(HtmlError::UnterminatedTag { offset: start }),
        }
    }
}

impl Iterator for HtmlReader {
    type Item = Result<HtmlEvent, HtmlError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(Ok(event));
            }
            if self.finished {
                return None;
            }
            if self.pos >= self.source.len() {
                while let Some(name) = self.open.pop() {
                    self.pending.push_back(HtmlEvent::End { name });
                }
                self.finished = true;
                continue;
            }

            let rest = self.rest();
            if rest.starts_with("<!--") {
                let start = self.pos;
                match rest[4..].find("-->") {
                    Some(i) => self.pos = start + 4 + i + 3,
                    None => return self.fail(HtmlError::UnterminatedComment { offset: start }),
                }
            } else if let Some(body) = rest.strip_prefix("<![CDATA[") {
                let start = self.pos;
                let Some(i) = body.find("]]>") else {
                    return self.fail(HtmlError::UnterminatedTag { offset: start });
                };
                let text = body[..i].to_string();
                self.pos = start + 9 + i + 3;
                if !text.trim().is_empty() {
                    return Some(Ok(HtmlEvent::Text(text)));
                }
            } else if rest.starts_with("<!") || rest.starts_with("<?") {
                if let Err(err) = self.skip_declaration() {
                    return self.fail(err);
                }
            } else if rest.starts_with("</") {
                return self.read_end_tag();
            } else if rest.starts_with('<')
                && rest[1..].starts_with(|c: char| c.is_ascii_alphabetic())
            {
                return self.read_start_tag();
            } else if let Some(text) = self.read_text() {
                return Some(Ok(text));
            }
        }
    }
}
