use super::BlockHandler;
use crate::chart::{block_id, build_chart, parse_chart};
use crate::error::ChartError;
use crate::options::ChartOptions;
use tracing::debug;

/// Handler for chart blocks (`vis` by default).
///
/// Hashes the block text into the container id, parses the description and writes the
/// container followed by the script. Empty blocks render to nothing.
pub struct ChartHandler {
    options: ChartOptions,
}

impl ChartHandler {
    pub fn new(options: ChartOptions) -> Self {
        Self { options }
    }
}

impl BlockHandler for ChartHandler {
    fn label(&self) -> &str {
        &self.options.marker
    }

    fn render(&self, content: &str, out: &mut String) -> Result<(), ChartError> {
        if content.is_empty() {
            return Ok(());
        }

        let id = block_id(content.as_bytes());
        let chart = parse_chart(content)?;
        let markup = build_chart(&id, &chart, &self.options)?;

        debug!(
            id = %id,
            kind = %chart.chart_kind(),
            points = chart.points.len(),
            "rendered chart block"
        );

        out.push_str(&markup.into_string());
        Ok(())
    }
}
