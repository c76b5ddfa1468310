//! Fenced Block Handlers and Registry
//!
//!     Fenced code blocks are normally rendered as `<pre><code>`. Some of them, identified by the
//!     language tag in their info string, carry content meant to become something richer: the
//!     `vis` blocks handled by this crate become Chart.js charts.
//!
//! Architecture
//!
//!     1.  **`BlockHandler` Trait**: renders the raw text of one block into HTML.
//!     2.  **`HandlerRegistry`**: maps fence labels (e.g. "vis") to handlers, each handler under
//!         the label it reports. The selector asks the registry which blocks to claim, the renderer
//!         asks it how to render each claimed block.
//!
//!     Matching is exact and case-sensitive.
//!
//! Usage
//!
//! ```rust,ignore
//! let mut registry = HandlerRegistry::new();
//! registry.register(Box::new(ChartHandler::new(ChartOptions::default())));
//!
//! if let Some(handler) = registry.get("vis") {
//!     let mut out = String::new();
//!     handler.render(content, &mut out)?;
//! }
//! ```

use crate::error::ChartError;
use crate::options::ChartOptions;
use std::collections::HashMap;

pub mod chart;

pub use chart::ChartHandler;

/// Renders the content of one claimed block.
pub trait BlockHandler: Send + Sync {
    /// Fence label this handler is registered under (e.g., "vis").
    fn label(&self) -> &str;

    /// Appends the HTML for a block to `out`.
    ///
    /// `content` is the exact source text of the block body. On error nothing is written.
    fn render(&self, content: &str, out: &mut String) -> Result<(), ChartError>;
}

/// A registry for fenced block handlers.
pub struct HandlerRegistry {
    handlers: HashMap<String, Box<dyn BlockHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Creates a registry with the chart handler registered under `options.marker`.
    pub fn with_charts(options: &ChartOptions) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ChartHandler::new(options.clone())));
        registry
    }

    /// Registers a handler under its own label, replacing any handler already there.
    pub fn register(&mut self, handler: Box<dyn BlockHandler>) {
        self.handlers.insert(handler.label().to_string(), handler);
    }

    /// Gets the handler for exactly this label.
    pub fn get(&self, label: &str) -> Option<&dyn BlockHandler> {
        self.handlers.get(label).map(|handler| handler.as_ref())
    }

    /// Whether some handler claims the label.
    pub fn handles(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    /// Render a block with the handler registered for `label`.
    pub fn render(&self, label: &str, content: &str, out: &mut String) -> Result<(), ChartError> {
        let handler = self
            .get(label)
            .ok_or_else(|| ChartError::HandlerNotFound(label.to_string()))?;
        handler.render(content, out)
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::with_charts(&ChartOptions::default())
    }
}
