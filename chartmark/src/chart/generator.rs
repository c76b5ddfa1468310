//! Chart.js markup generation
//!
//! Turns a [`ChartDescription`] into the HTML consumed in the browser: a sized container
//! carrying the block identifier, followed by a script that builds the Chart.js configuration
//! and draws into a canvas appended to that container.
//!
//! The configuration is modelled as plain serde structs and embedded as a JSON literal. Every
//! user supplied string (labels, titles, colors) therefore reaches the script as data, and the
//! characters that could close the `<script>` element are escaped.

use super::{ChartDescription, ChartKind, PointKey};
use crate::error::ChartError;
use crate::html::{create_element, create_text, serialize_node};
use crate::options::ChartOptions;
use serde::Serialize;
use std::fmt;

/// Container and script for one chart, in output order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartMarkup {
    pub container: String,
    pub script: String,
}

impl ChartMarkup {
    pub fn into_string(self) -> String {
        let mut html = self.container;
        html.push_str(&self.script);
        html
    }
}

impl fmt::Display for ChartMarkup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.container)?;
        f.write_str(&self.script)
    }
}

/// Build the container and script for a chart.
///
/// The output depends only on the arguments.
pub fn build_chart(
    id: &str,
    chart: &ChartDescription,
    options: &ChartOptions,
) -> Result<ChartMarkup, ChartError> {
    let config = ChartConfig::new(chart, options);
    let container = build_container(id, chart, options)?;
    let script = build_script(id, &config)?;
    Ok(ChartMarkup { container, script })
}

fn build_container(
    id: &str,
    chart: &ChartDescription,
    options: &ChartOptions,
) -> Result<String, ChartError> {
    let mut style = String::from("position: relative; width: 100%");
    if let Some(height) = &chart.size_hint {
        style.push_str("; height: ");
        style.push_str(height);
    }

    let div = create_element(
        "div",
        vec![
            ("id", id),
            ("class", &options.container_class),
            ("style", &style),
        ],
    );
    serialize_node(&div)
}

fn build_script(id: &str, config: &ChartConfig<'_>) -> Result<String, ChartError> {
    let id_literal = script_literal(&id)?;
    let config_literal = script_literal(config)?;

    let body = format!(
        r#"
(function () {{
  function draw() {{
    var container = document.getElementById({id_literal});
    if (!container || typeof Chart === "undefined") {{
      return;
    }}
    var canvas = document.createElement("canvas");
    container.appendChild(canvas);
    new Chart(canvas.getContext("2d"), {config_literal});
  }}
  if (document.readyState === "loading") {{
    document.addEventListener("DOMContentLoaded", draw);
  }} else {{
    draw();
  }}
}})();
"#
    );

    let script = create_element("script", vec![]);
    script.children.borrow_mut().push(create_text(&body));
    serialize_node(&script)
}

/// Serialize a value as a JSON literal that is safe inside a `<script>` element.
///
/// serde_json only emits `<`, `>`, `&` and the line separators inside string literals, where a
/// `\u` escape means the same character.
pub fn script_literal<T: Serialize + ?Sized>(value: &T) -> Result<String, ChartError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ChartError::Serialization(format!("chart configuration: {e}")))?;

    let mut escaped = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => escaped.push_str("\\u003c"),
            '>' => escaped.push_str("\\u003e"),
            '&' => escaped.push_str("\\u0026"),
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            _ => escaped.push(c),
        }
    }
    Ok(escaped)
}

// ---------------------------------------------------------------------------
// Chart.js configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChartConfig<'a> {
    #[serde(rename = "type")]
    kind: ChartKind,
    data: ChartData<'a>,
    options: ChartSettings,
}

#[derive(Debug, Serialize)]
struct ChartData<'a> {
    labels: Vec<&'a PointKey>,
    datasets: Vec<Dataset>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Dataset {
    label: String,
    data: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    background_color: Option<Vec<String>>,
    border_width: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartSettings {
    responsive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    maintain_aspect_ratio: Option<bool>,
    plugins: Plugins,
    #[serde(skip_serializing_if = "Option::is_none")]
    scales: Option<Scales>,
}

#[derive(Debug, Serialize)]
struct Plugins {
    title: TitlePlugin,
    legend: LegendPlugin,
}

#[derive(Debug, Serialize)]
struct TitlePlugin {
    display: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    color: String,
}

#[derive(Debug, Serialize)]
struct LegendPlugin {
    labels: Colored,
}

#[derive(Debug, Serialize)]
struct Colored {
    color: String,
}

#[derive(Debug, Serialize)]
struct Scales {
    x: Axis,
    y: Axis,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Axis {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    scale_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    begin_at_zero: Option<bool>,
    ticks: Colored,
    grid: Colored,
}

impl<'a> ChartConfig<'a> {
    fn new(chart: &'a ChartDescription, options: &ChartOptions) -> Self {
        let kind = chart.chart_kind();
        let labels = chart.points.iter().map(|point| &point.key).collect();
        let values = chart.points.iter().map(|point| point.value).collect();

        let foreground = chart
            .color_hint
            .clone()
            .unwrap_or_else(|| options.default_color.clone());
        let grid = chart
            .color_hint
            .clone()
            .unwrap_or_else(|| options.grid_color.clone());

        let dataset = Dataset {
            label: dataset_label(kind, chart.label.as_deref()),
            data: values,
            background_color: (kind == ChartKind::Pie).then(|| slice_colors(chart.points.len())),
            border_width: 1,
        };

        let title = chart.display_title().map(str::to_string);
        let plugins = Plugins {
            title: TitlePlugin {
                display: title.is_some(),
                text: title,
                color: foreground.clone(),
            },
            legend: LegendPlugin {
                labels: Colored {
                    color: foreground.clone(),
                },
            },
        };

        let scales = kind.has_axes().then(|| {
            let linear_x = kind == ChartKind::Line && chart.keys_are_numeric;
            Scales {
                x: Axis {
                    scale_type: linear_x.then_some("linear"),
                    begin_at_zero: None,
                    ticks: Colored {
                        color: foreground.clone(),
                    },
                    grid: Colored {
                        color: grid.clone(),
                    },
                },
                y: Axis {
                    scale_type: None,
                    begin_at_zero: Some(true),
                    ticks: Colored {
                        color: foreground.clone(),
                    },
                    grid: Colored { color: grid },
                },
            }
        });

        ChartConfig {
            kind,
            data: ChartData {
                labels,
                datasets: vec![dataset],
            },
            options: ChartSettings {
                responsive: true,
                maintain_aspect_ratio: chart.size_hint.as_ref().map(|_| false),
                plugins,
                scales,
            },
        }
    }
}

fn dataset_label(kind: ChartKind, label: Option<&str>) -> String {
    match (label, kind) {
        (Some(label), _) => label.to_string(),
        (None, ChartKind::Pie) => "Series".to_string(),
        (None, ChartKind::Bar) => "Bar".to_string(),
        (None, ChartKind::Line) => "Line".to_string(),
    }
}

/// Evenly spaced hues, one per slice.
fn slice_colors(count: usize) -> Vec<String> {
    let count = count.max(1);
    (0..count)
        .map(|i| format!("hsl({}, 70%, 60%)", i * 360 / count))
        .collect()
}
