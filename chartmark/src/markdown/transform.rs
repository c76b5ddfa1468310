use super::{ChartBlock, LineRange};
use crate::chart::block_id;
use crate::handlers::HandlerRegistry;
use comrak::nodes::{Ast, AstNode, NodeCodeBlock, NodeValue, Sourcepos};
use comrak::Arena;
use std::cell::RefCell;
use tracing::debug;

/// Swaps claimed fenced code blocks for placeholder paragraphs.
///
/// A block is claimed when it is fenced and the first word of its info string is a label known
/// to the registry. Indented code blocks and every other node are left alone.
pub struct ChartTransformer<'r> {
    registry: &'r HandlerRegistry,
}

struct Claim {
    label: String,
    sourcepos: Sourcepos,
    lines: LineRange,
    prefix_width: usize,
    indent: usize,
}

impl<'r> ChartTransformer<'r> {
    pub fn new(registry: &'r HandlerRegistry) -> Self {
        Self { registry }
    }

    /// Replace every claimed block below `root`, returning the placeholders in document order.
    ///
    /// `source` is the text `root` was parsed from.
    pub fn transform<'a>(
        &self,
        arena: &'a Arena<AstNode<'a>>,
        root: &'a AstNode<'a>,
        source: &str,
    ) -> Vec<ChartBlock<'a>> {
        // Collect first: the tree must not change while it is being walked.
        let claimed: Vec<(&'a AstNode<'a>, Claim)> = root
            .descendants()
            .filter_map(|node| self.claim(node).map(|claim| (node, claim)))
            .collect();

        if claimed.is_empty() {
            return Vec::new();
        }

        let digest = block_id(source.as_bytes());
        let nonce = &digest[..16];
        let blocks: Vec<ChartBlock<'a>> = claimed
            .into_iter()
            .enumerate()
            .map(|(index, (node, claim))| {
                let token = format!("chartmark-{nonce}-{index}-chart");
                replace(arena, node, claim, token, source)
            })
            .collect();

        debug!(blocks = blocks.len(), "replaced fenced blocks");
        blocks
    }

    fn claim(&self, node: &AstNode<'_>) -> Option<Claim> {
        let ast = node.data.borrow();
        let NodeValue::CodeBlock(code) = &ast.value else {
            return None;
        };
        if !code.fenced {
            return None;
        }

        let label = fence_label(code)?;
        if !self.registry.handles(label) {
            return None;
        }

        let sourcepos = ast.sourcepos;
        let indent = code.fence_offset;
        Some(Claim {
            label: label.to_string(),
            sourcepos,
            lines: LineRange::new(sourcepos.start.line + 1, body_lines(&code.literal)),
            prefix_width: sourcepos.start.column.saturating_sub(1 + indent),
            indent,
        })
    }
}

/// Language tag of a fenced block: the info string up to the first whitespace.
pub fn fence_label(code: &NodeCodeBlock) -> Option<&str> {
    code.info.split_whitespace().next()
}

fn body_lines(literal: &str) -> usize {
    let newlines = literal.matches('\n').count();
    if literal.is_empty() || literal.ends_with('\n') {
        newlines
    } else {
        newlines + 1
    }
}

/// Container prefix of the fence line, e.g. `> ` inside a block quote.
fn fence_prefix(source: &str, line: usize, width: usize) -> String {
    source
        .split_inclusive('\n')
        .nth(line.saturating_sub(1))
        .and_then(|fence| fence.get(..width))
        .unwrap_or_default()
        .to_string()
}

fn replace<'a>(
    arena: &'a Arena<AstNode<'a>>,
    node: &'a AstNode<'a>,
    claim: Claim,
    token: String,
    source: &str,
) -> ChartBlock<'a> {
    let mut paragraph = Ast::new(NodeValue::Paragraph, claim.sourcepos.start);
    paragraph.sourcepos = claim.sourcepos;
    let text = Ast::new(NodeValue::Text(token.clone()), claim.sourcepos.start);

    let placeholder: &'a AstNode<'a> = arena.alloc(AstNode::new(RefCell::new(paragraph)));
    placeholder.append(arena.alloc(AstNode::new(RefCell::new(text))));
    node.insert_before(placeholder);
    node.detach();

    ChartBlock {
        node: placeholder,
        label: claim.label,
        lines: claim.lines,
        token,
        prefix: fence_prefix(source, claim.sourcepos.start.line, claim.prefix_width),
        indent: claim.indent,
    }
}
