//! Line-oriented text buffer with scoped indentation

use std::ops::{Deref, DerefMut};

/// Spaces per nesting level
pub const INDENT_WIDTH: usize = 4;

/// Accumulates generated source one line at a time
#[derive(Debug, Default)]
pub struct CodeWriter {
    output: String,
    depth: usize,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current nesting level
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Write one indented line
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            self.output
                .extend(std::iter::repeat(' ').take(self.depth * INDENT_WIDTH));
            self.output.push_str(text);
        }
        self.output.push('\n');
    }

    /// Write each line of a multi-line block at the current depth, keeping
    /// the block's own relative indentation
    pub fn block(&mut self, text: &str) {
        for line in text.lines() {
            self.line(line);
        }
    }

    /// Write text verbatim, without indentation or a line break
    pub fn raw(&mut self, text: &str) {
        self.output.push_str(text);
    }

    /// Nest one level deeper until the returned guard is dropped
    pub fn indent(&mut self) -> Indented<'_> {
        self.depth += 1;
        Indented { writer: self }
    }

    /// Take the accumulated text
    pub fn finish(self) -> String {
        self.output
    }
}

/// Guard returned by [`CodeWriter::indent`]; restores the depth on drop
pub struct Indented<'a> {
    writer: &'a mut CodeWriter,
}

impl Deref for Indented<'_> {
    type Target = CodeWriter;

    fn deref(&self) -> &CodeWriter {
        self.writer
    }
}

impl DerefMut for Indented<'_> {
    fn deref_mut(&mut self) -> &mut CodeWriter {
        self.writer
    }
}

impl Drop for Indented<'_> {
    fn drop(&mut self) {
        self.writer.depth -= 1;
    }
}
