//! HTML building blocks
//!
//! Chart markup is assembled as a small `RcDom` tree and serialized with html5ever, so attribute
//! values are escaped and `<script>` contents are written raw, exactly as a browser expects.
//! Standalone pages wrap a rendered fragment with the Chart.js loader.

use crate::error::ChartError;
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Chart.js build loaded by standalone pages.
pub const DEFAULT_CHARTJS_SRC: &str = "https://cdn.jsdelivr.net/npm/chart.js";

/// Options for whole-page output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Script source for the Chart.js library
    pub chartjs_src: String,
    /// Page `<title>`
    pub title: String,
    /// Optional CSS appended to the page stylesheet
    pub custom_css: Option<String>,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            chartjs_src: DEFAULT_CHARTJS_SRC.to_string(),
            title: "Charts".to_string(),
            custom_css: None,
        }
    }
}

impl HtmlOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_custom_css(mut self, css: String) -> Self {
        self.custom_css = Some(css);
        self
    }
}

/// Wrap a rendered fragment in a complete HTML document that loads Chart.js.
pub fn wrap_in_page(body_html: &str, options: &HtmlOptions) -> String {
    let title = html_escape(&options.title);
    let chartjs_src = html_escape(&options.chartjs_src);
    let custom_css = options.custom_css.as_deref().unwrap_or("");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta name="generator" content="chartmark">
  <title>{title}</title>
  <script src="{chartjs_src}"></script>
  <style>
.chartmark-document {{ max-width: 48rem; margin: 0 auto; }}
{custom_css}
  </style>
</head>
<body>
<div class="chartmark-document">
{body_html}
</div>
</body>
</html>"#
    )
}

/// Create an HTML element with attributes
pub(crate) fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
pub(crate) fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Serialize a node, including its own tag, to an HTML string
pub(crate) fn serialize_node(node: &Handle) -> Result<String, ChartError> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    let serializable = SerializableHandle::from(node.clone());
    serialize(&mut output, &serializable, opts)
        .map_err(|e| ChartError::Serialization(format!("HTML serialization failed: {e}")))?;

    String::from_utf8(output)
        .map_err(|e| ChartError::Serialization(format!("UTF-8 conversion failed: {e}")))
}

/// Escape HTML special characters in text
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
