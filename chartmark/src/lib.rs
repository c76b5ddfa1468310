//! Chart.js charts from fenced Markdown blocks
//!
//!     This crate turns fenced code blocks tagged `vis` in a Markdown document into interactive
//!     Chart.js charts: each block becomes a container `<div>` and an inline `<script>` that draws
//!     the chart once the page is loaded. All other content renders as ordinary CommonMark.
//!
//!     A chart block is a small, forgiving, YAML-like description:
//!
//!     ```text
//!     layout: bar
//!     title: Visitors
//!     data: [
//!       { key: 'mon', value: 12 },
//!       { key: 'tue', value: 30 },
//!     ]
//!     ```
//!
//!     This is a pure lib: it never prints, reads the environment or installs a log subscriber.
//!     Logging goes through `tracing`, hosts decide where it ends up.
//!
//! Architecture
//!
//!     The work is split into four independent stages, each one testable on its own:
//!
//!     1.  **Block Selector** (./markdown/transform.rs): walks the comrak tree and swaps every
//!         claimed fenced block for a placeholder that remembers the block's line range.
//!     2.  **Chart Description Parser** (./chart/parser.rs, ./chart/normalize.rs): scans the block
//!         for its fields and coerces the loose data syntax into strict JSON.
//!     3.  **Markup Generator** (./chart/generator.rs): builds the container and the script,
//!         including the Chart.js configuration object.
//!     4.  **Render Orchestration** (./handlers/chart.rs, ./markdown/render.rs): per placeholder,
//!         recovers the source text, hashes it into the container id and runs 2 and 3.
//!
//!     Which blocks are claimed is decided by the [`HandlerRegistry`], so other fence labels can
//!     be served by other [`BlockHandler`]s alongside charts.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── options.rs              # ChartOptions (marker, colors)
//!     ├── html.rs                 # html5ever helpers, page wrapping
//!     ├── chart
//!     │   ├── parser.rs
//!     │   ├── normalize.rs        # data coercion pipeline
//!     │   ├── generator.rs
//!     │   └── mod.rs              # ChartDescription, ids
//!     ├── handlers                # BlockHandler + HandlerRegistry
//!     ├── markdown                # comrak integration
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     └── <area>
//!         ├── <testname>.rs
//!         └── fixtures
//!             └── <docname>.md
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Failures
//!
//!     A block that does not describe a chart renders to nothing. The document is still produced,
//!     the failure is logged and listed in [`RenderedDocument::failures`]. Rendering a single
//!     block ([`HtmlRenderer::render_block`]) returns the error instead.

pub mod chart;
pub mod error;
pub mod handlers;
pub mod html;
pub mod markdown;
pub mod options;

pub use chart::{
    block_id, build_chart, parse_chart, ChartDescription, ChartKind, ChartMarkup, Point, PointKey,
};
pub use error::{ChartError, Field};
pub use handlers::{BlockHandler, ChartHandler, HandlerRegistry};
pub use html::{wrap_in_page, HtmlOptions};
pub use markdown::{BlockFailure, ChartBlock, HtmlRenderer, LineRange, RenderedDocument};
pub use options::{ChartOptions, DEFAULT_MARKER};

/// Render a Markdown document to an HTML fragment with its charts inlined.
///
/// # Example
///
/// ```ignore
/// let doc = chartmark::render_markdown(source, &ChartOptions::default())?;
/// println!("{}", doc.html);
/// ```
pub fn render_markdown(source: &str, options: &ChartOptions) -> Result<RenderedDocument, ChartError> {
    HtmlRenderer::new(options).render(source)
}
