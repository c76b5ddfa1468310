//! Chart block parsing
//!
//! Converts the raw text of a chart block into a [`ChartDescription`].
//! Pipeline: block text → line scan (fields + data buffer) → normalized JSON → points

use super::normalize::normalize;
use super::{ChartDescription, Point};
use crate::error::{ChartError, Field};

/// Scalar fields recognized at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scalar {
    Layout,
    Height,
    Label,
    Title,
    Color,
}

const SCALARS: &[(&str, Scalar)] = &[
    ("layout:", Scalar::Layout),
    ("height:", Scalar::Height),
    ("label:", Scalar::Label),
    ("title:", Scalar::Title),
    ("color:", Scalar::Color),
];

const DATA_PREFIX: &str = "data:";

/// Parse the text of one chart block.
pub fn parse_chart(input: &str) -> Result<ChartDescription, ChartError> {
    let scan = scan_lines(input);

    let kind = scan.layout.unwrap_or_default();
    if kind.is_empty() {
        return Err(ChartError::MissingField(Field::Layout));
    }
    if scan.data_lines.is_empty() {
        return Err(ChartError::MissingField(Field::Data));
    }

    let buffer = scan.data_lines.join("\n");
    let points = parse_points(&buffer)?;
    let keys_are_numeric = points.iter().all(|point| point.key.is_numeric());

    Ok(ChartDescription {
        kind,
        size_hint: scan.height,
        label: scan.label,
        title: scan.title,
        color_hint: scan.color,
        points,
        keys_are_numeric,
    })
}

/// Normalize a data buffer and deserialize its points.
pub fn parse_points(buffer: &str) -> Result<Vec<Point>, ChartError> {
    let normalized = normalize(buffer);
    let points: Vec<Point> = serde_json::from_str(&normalized).map_err(ChartError::malformed)?;
    if points.is_empty() {
        return Err(ChartError::MissingField(Field::Data));
    }
    Ok(points)
}

/// Everything collected from a single pass over the block.
#[derive(Debug, Default)]
struct LineScan {
    layout: Option<String>,
    height: Option<String>,
    label: Option<String>,
    title: Option<String>,
    color: Option<String>,
    data_lines: Vec<String>,
}

impl LineScan {
    fn record(&mut self, scalar: Scalar, value: &str) {
        let value = unquote(value.trim());
        let value = (!value.is_empty()).then(|| value.to_string());
        match scalar {
            Scalar::Layout => self.layout = value,
            Scalar::Height => self.height = value,
            Scalar::Label => self.label = value,
            Scalar::Title => self.title = value,
            Scalar::Color => self.color = value,
        }
    }
}

fn scan_lines(input: &str) -> LineScan {
    let mut scan = LineScan::default();
    let mut in_data = false;
    let mut depth = BracketDepth::default();

    for line in input.trim().lines() {
        let line = line.trim();

        // An open data block swallows every line until its brackets balance
        if in_data && depth.is_open() {
            depth.feed(line);
            scan.data_lines.push(line.to_string());
            continue;
        }

        if let Some((scalar, rest)) = match_scalar(line) {
            scan.record(scalar, rest);
        } else if let Some(rest) = line.strip_prefix(DATA_PREFIX) {
            in_data = true;
            depth = BracketDepth::default();
            let rest = match rest.find('[') {
                Some(start) => &rest[start..],
                None => rest.trim(),
            };
            if !rest.is_empty() {
                depth.feed(rest);
                scan.data_lines.push(rest.to_string());
            }
            if !depth.seen_open() {
                // No bracket yet: keep collecting until the block ends
                depth.hold_open();
            }
        } else if in_data {
            depth.feed(line);
            scan.data_lines.push(line.to_string());
        }
    }

    scan
}

fn match_scalar(line: &str) -> Option<(Scalar, &str)> {
    SCALARS
        .iter()
        .find_map(|(prefix, scalar)| line.strip_prefix(prefix).map(|rest| (*scalar, rest)))
}

/// Strips one pair of matching surrounding quotes.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Square bracket nesting of a data block, ignoring brackets inside quoted strings.
#[derive(Debug, Default)]
struct BracketDepth {
    depth: usize,
    opened: bool,
    held: bool,
}

impl BracketDepth {
    fn feed(&mut self, text: &str) {
        let mut quote: Option<char> = None;
        let mut escaped = false;

        for c in text.chars() {
            if escaped {
                escaped = false;
                continue;
            }
            match (quote, c) {
                (Some(_), '\\') => escaped = true,
                (Some(q), c) if c == q => quote = None,
                (Some(_), _) => {}
                (None, '"') | (None, '\'') => quote = Some(c),
                (None, '[') => {
                    self.depth += 1;
                    self.opened = true;
                    self.held = false;
                }
                (None, ']') => self.depth = self.depth.saturating_sub(1),
                _ => {}
            }
        }
    }

    fn hold_open(&mut self) {
        self.held = true;
    }

    fn seen_open(&self) -> bool {
        self.opened
    }

    fn is_open(&self) -> bool {
        self.held || self.depth > 0
    }
}
