//! Rendering options shared by the selector, the generator and the renderer.

/// Fence language tag that marks a chart block.
pub const DEFAULT_MARKER: &str = "vis";

/// Knobs that shape chart selection and generated markup.
///
/// The marker is carried here rather than as a global so a host (or a test)
/// can claim a different fence label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartOptions {
    /// Fence language tag selected as a chart block (exact, case-sensitive)
    pub marker: String,
    /// Foreground color used when a block has no `color:` line
    pub default_color: String,
    /// Grid color used when a block has no `color:` line
    pub grid_color: String,
    /// CSS class set on every chart container
    pub container_class: String,
}

impl Default for ChartOptions {
    fn default() -> Self {
        ChartOptions {
            marker: DEFAULT_MARKER.to_string(),
            default_color: "#4b5563".to_string(),
            grid_color: "rgba(128, 128, 128, 0.2)".to_string(),
            container_class: "chartmark-chart".to_string(),
        }
    }
}

impl ChartOptions {
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }
}
