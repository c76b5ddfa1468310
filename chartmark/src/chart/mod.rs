//! Chart descriptions
//!
//!     A chart block is a small, forgiving description of one chart:
//!
//!         layout: bar
//!         height: 20rem
//!         label: Visitors
//!         title: Weekly visitors
//!         color: #1f2937
//!         data: [
//!             { key: 'Mon', value: 120 },
//!             { key: 'Tue', value: 98, },
//!         ]
//!
//!     The parser (./parser.rs) turns that text into a [`ChartDescription`], using the ordered
//!     rewrites in ./normalize.rs to coerce the data block into strict JSON. The generator
//!     (./generator.rs) turns a description into the container and script consumed by Chart.js.
//!
//!     Descriptions are built fresh for every render and never mutated afterwards.

pub mod generator;
pub mod normalize;
pub mod parser;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

pub use generator::{build_chart, ChartMarkup};
pub use parser::parse_chart;

/// Chart family understood by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
}

impl ChartKind {
    /// Maps a raw `layout:` value onto a kind; anything unknown draws as a bar chart.
    pub fn from_hint(hint: &str) -> Self {
        match hint.trim().to_lowercase().as_str() {
            "line" => ChartKind::Line,
            "pie" => ChartKind::Pie,
            _ => ChartKind::Bar,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
        }
    }

    /// Pie charts have no cartesian axes.
    pub fn has_axes(&self) -> bool {
        !matches!(self, ChartKind::Pie)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of a data point, kept in the form it was written in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointKey {
    Number(serde_json::Number),
    Text(String),
}

impl PointKey {
    /// Whether the key reads as a number.
    ///
    /// Text keys must be a complete numeric literal: `"3.5"` and `"-2e3"` qualify,
    /// `"abc"`, `" 3"`, `"inf"` and `"NaN"` do not.
    pub fn is_numeric(&self) -> bool {
        match self {
            PointKey::Number(_) => true,
            PointKey::Text(text) => is_numeric_literal(text),
        }
    }
}

impl fmt::Display for PointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointKey::Number(number) => write!(f, "{number}"),
            PointKey::Text(text) => f.write_str(text),
        }
    }
}

fn is_numeric_literal(text: &str) -> bool {
    let words_free = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    words_free && text.parse::<f64>().is_ok()
}

/// One (key, value) pair of the single data series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub key: PointKey,
    pub value: f64,
}

/// Structured form of one chart block.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDescription {
    /// Raw `layout:` value, never empty
    pub kind: String,
    /// Container height, passed through untouched
    pub size_hint: Option<String>,
    /// Name of the data series
    pub label: Option<String>,
    pub title: Option<String>,
    /// Foreground and grid color
    pub color_hint: Option<String>,
    /// Points in source order, never empty
    pub points: Vec<Point>,
    /// True iff every key is numeric
    pub keys_are_numeric: bool,
}

impl ChartDescription {
    /// Kind used for rendering.
    pub fn chart_kind(&self) -> ChartKind {
        ChartKind::from_hint(&self.kind)
    }

    /// Title shown above the chart: the title, else the label, else nothing.
    pub fn display_title(&self) -> Option<&str> {
        self.title.as_deref().or(self.label.as_deref())
    }
}

impl std::str::FromStr for ChartDescription {
    type Err = crate::error::ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_chart(s)
    }
}

/// Identifier for a chart block: lowercase hex SHA-256 of its exact source bytes.
///
/// Identical blocks share an identifier, in one document and across renders.
pub fn block_id(source: &[u8]) -> String {
    hex::encode(Sha256::digest(source))
}
