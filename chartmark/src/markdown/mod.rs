//! Markdown integration
//!
//! Charts live in CommonMark documents parsed by comrak. Rendering a document runs in two
//! independent passes over the comrak AST:
//!
//! 1. **Transform** (./transform.rs): one depth-first walk collects the fenced code blocks whose
//!    language tag is claimed by the [`HandlerRegistry`](crate::handlers::HandlerRegistry), then
//!    swaps each of them for a placeholder paragraph holding a unique token. Block content is not
//!    looked at.
//! 2. **Render** (./render.rs): every placeholder recovers its source text from the document
//!    through its line range and runs the matching handler. comrak writes the document as HTML
//!    and each token is then replaced by its block's markup.
//!
//! # Library Choice
//!
//! We use `comrak` for parsing and HTML output: its arena AST supports detaching and inserting
//! nodes, which is all the transform needs. The document keeps comrak's safe rendering (raw HTML
//! omitted, dangerous links dropped); only the markup produced by handlers is spliced in verbatim.
//! Tokens carry a digest of the whole document, so document text cannot forge one.
//!
//! # Source Text
//!
//! A placeholder keeps the line range of the block body, not its text. The text is rebuilt from
//! the document source, line terminators included: the container prefix (block quote markers,
//! list indentation) and up to the fence's own indentation are removed from each line.

pub mod render;
pub mod transform;

use comrak::nodes::AstNode;
use comrak::Options;
use std::fmt;

pub use render::{BlockFailure, HtmlRenderer, RenderedDocument};
pub use transform::ChartTransformer;

/// comrak options used for chart documents
pub fn markdown_options() -> Options<'static> {
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options
}

/// 1-based range of source lines: `start` is the first line, `len` the number of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineRange {
    pub start: usize,
    pub len: usize,
}

impl LineRange {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Last line of the range, if any.
    pub fn end(&self) -> Option<usize> {
        (self.len > 0).then(|| self.start + self.len - 1)
    }
}

/// Placeholder left in the tree for a claimed block.
#[derive(Clone)]
pub struct ChartBlock<'a> {
    /// Placeholder paragraph in the comrak tree
    pub node: &'a AstNode<'a>,
    /// Fence label that claimed the block
    pub label: String,
    /// Lines of the block body
    pub lines: LineRange,
    /// Text of the placeholder, replaced by the block's markup after rendering
    pub token: String,
    /// Container prefix in front of the fence, as written on the fence line
    pub(crate) prefix: String,
    /// Indentation of the fence inside its container
    pub(crate) indent: usize,
}

impl<'a> ChartBlock<'a> {
    /// Rebuild the exact body text of the block from the document source.
    pub fn source_text(&self, source: &str) -> String {
        if self.lines.is_empty() {
            return String::new();
        }

        let mut text = String::new();
        for line in source
            .split_inclusive('\n')
            .skip(self.lines.start.saturating_sub(1))
            .take(self.lines.len)
        {
            let line = strip_container(line, &self.prefix);
            let spaces = line
                .bytes()
                .take(self.indent)
                .take_while(|b| *b == b' ')
                .count();
            text.push_str(&line[spaces..]);
        }
        text
    }
}

impl fmt::Debug for ChartBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartBlock")
            .field("label", &self.label)
            .field("lines", &self.lines)
            .field("token", &self.token)
            .field("prefix", &self.prefix)
            .field("indent", &self.indent)
            .finish_non_exhaustive()
    }
}

/// Removes the container prefix of one body line.
///
/// `prefix` is the prefix of the fence line. Block quote markers are matched on every line with
/// their own optional space, so `>` and `> ` both open a quoted line. Every other prefix
/// character stands for one column of indentation, which blank lines may lack.
fn strip_container<'s>(line: &'s str, prefix: &str) -> &'s str {
    let mut rest = line;
    let mut markers = prefix.chars().peekable();

    while let Some(marker) = markers.next() {
        match marker {
            '>' => {
                let unindented = rest.trim_start_matches(' ');
                if rest.len() - unindented.len() > 3 || !unindented.starts_with('>') {
                    break;
                }
                rest = &unindented[1..];
                rest = rest.strip_prefix(' ').unwrap_or(rest);
                if markers.peek() == Some(&' ') {
                    markers.next();
                }
            }
            '\t' => rest = rest.strip_prefix('\t').unwrap_or(rest),
            _ => rest = rest.strip_prefix(' ').unwrap_or(rest),
        }
    }
    rest
}
