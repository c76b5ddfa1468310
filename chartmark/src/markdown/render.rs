use super::{markdown_options, ChartBlock, ChartTransformer, LineRange};
use crate::error::ChartError;
use crate::handlers::HandlerRegistry;
use crate::html::{wrap_in_page, HtmlOptions};
use crate::options::ChartOptions;
use comrak::{format_html, parse_document, Arena};
use tracing::{debug, warn};

/// A claimed block that failed to render.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockFailure {
    pub label: String,
    pub lines: LineRange,
    pub error: ChartError,
}

/// Output of rendering one document
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    pub html: String,
    /// Number of blocks that produced markup
    pub charts: usize,
    pub failures: Vec<BlockFailure>,
}

impl RenderedDocument {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Renders Markdown documents with chart blocks to HTML.
///
/// A block that fails to parse renders to nothing: the failure is logged, recorded in
/// [`RenderedDocument::failures`], and the rest of the document is still produced.
pub struct HtmlRenderer {
    registry: HandlerRegistry,
    html_options: HtmlOptions,
}

impl HtmlRenderer {
    pub fn new(options: &ChartOptions) -> Self {
        Self::with_registry(HandlerRegistry::with_charts(options))
    }

    pub fn with_registry(registry: HandlerRegistry) -> Self {
        Self {
            registry,
            html_options: HtmlOptions::default(),
        }
    }

    pub fn with_html_options(mut self, html_options: HtmlOptions) -> Self {
        self.html_options = html_options;
        self
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut HandlerRegistry {
        &mut self.registry
    }

    /// Render a document to an HTML fragment.
    pub fn render(&self, source: &str) -> Result<RenderedDocument, ChartError> {
        let arena = Arena::new();
        let options = markdown_options();
        let root = parse_document(&arena, source, &options);

        let blocks = ChartTransformer::new(&self.registry).transform(&arena, root, source);

        let mut charts = 0;
        let mut failures = Vec::new();
        let mut rendered = Vec::with_capacity(blocks.len());
        for block in &blocks {
            match self.render_block(block, source) {
                Ok(markup) => {
                    if !markup.is_empty() {
                        charts += 1;
                    }
                    rendered.push((block.token.as_str(), markup));
                }
                Err(error) => {
                    warn!(
                        label = %block.label,
                        start = block.lines.start,
                        end = ?block.lines.end(),
                        error = %error,
                        "chart block skipped"
                    );
                    failures.push(BlockFailure {
                        label: block.label.clone(),
                        lines: block.lines,
                        error,
                    });
                    rendered.push((block.token.as_str(), String::new()));
                }
            }
        }

        let mut output = Vec::new();
        format_html(root, &options, &mut output)
            .map_err(|e| ChartError::Serialization(format!("HTML output failed: {e}")))?;
        let html = String::from_utf8(output)
            .map_err(|e| ChartError::Serialization(format!("UTF-8 conversion failed: {e}")))?;

        debug!(charts, failures = failures.len(), "rendered document");
        Ok(RenderedDocument {
            html: splice(html, &rendered),
            charts,
            failures,
        })
    }

    /// Render a document to a standalone page that loads Chart.js.
    pub fn render_page(&self, source: &str) -> Result<RenderedDocument, ChartError> {
        let mut document = self.render(source)?;
        document.html = wrap_in_page(&document.html, &self.html_options);
        Ok(document)
    }

    /// Render the block behind one placeholder.
    ///
    /// Returns the block's markup, empty when the block renders to nothing.
    pub fn render_block(&self, block: &ChartBlock<'_>, source: &str) -> Result<String, ChartError> {
        let content = block.source_text(source);
        let mut markup = String::new();
        self.registry.render(&block.label, &content, &mut markup)?;
        Ok(markup)
    }
}

/// Replace each placeholder token in comrak's output with its markup.
///
/// A placeholder renders as `<p>token</p>` in block context and as the bare token inside tight
/// list items.
fn splice(mut html: String, rendered: &[(&str, String)]) -> String {
    for (token, markup) in rendered {
        let paragraph = format!("<p>{token}</p>\n");
        if html.contains(&paragraph) {
            let replacement = if markup.is_empty() {
                String::new()
            } else {
                format!("{markup}\n")
            };
            html = html.replacen(&paragraph, &replacement, 1);
        } else {
            html = html.replacen(token, markup, 1);
        }
    }
    html
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::with_registry(HandlerRegistry::default())
    }
}
