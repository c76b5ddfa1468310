//! Parsing tests for chart blocks (block text → ChartDescription)

use chartmark::{parse_chart, ChartError, ChartKind, Field, PointKey};

#[test]
fn test_full_description() {
    let block = "layout: line\nheight: 20rem\nlabel: Visitors\ntitle: Weekly visitors\ncolor: #1f2937\ndata: [\n  { key: 'Mon', value: 120 },\n  { key: 'Tue', value: 98.5 },\n]\n";
    let chart = parse_chart(block).unwrap();

    assert_eq!(chart.kind, "line");
    assert_eq!(chart.chart_kind(), ChartKind::Line);
    assert_eq!(chart.size_hint.as_deref(), Some("20rem"));
    assert_eq!(chart.label.as_deref(), Some("Visitors"));
    assert_eq!(chart.title.as_deref(), Some("Weekly visitors"));
    assert_eq!(chart.color_hint.as_deref(), Some("#1f2937"));
    assert_eq!(chart.points.len(), 2);
    assert_eq!(chart.points[0].key, PointKey::Text("Mon".to_string()));
    assert_eq!(chart.points[1].value, 98.5);
    assert!(!chart.keys_are_numeric);
}

#[test]
fn test_missing_layout() {
    let err = parse_chart("data: [{key: 1, value: 1}]").unwrap_err();
    assert_eq!(err, ChartError::MissingField(Field::Layout));
    assert_eq!(err.to_string(), "layout not found");
}

#[test]
fn test_missing_data() {
    let err = parse_chart("layout: bar\ntitle: Nothing").unwrap_err();
    assert_eq!(err, ChartError::MissingField(Field::Data));
    assert_eq!(err.to_string(), "data not found");
}

#[test]
fn test_empty_layout_is_missing() {
    let err = parse_chart("layout:\ndata: [{key: 1, value: 1}]").unwrap_err();
    assert_eq!(err, ChartError::MissingField(Field::Layout));
}

#[test]
fn test_trailing_commas_accepted() {
    let chart = parse_chart("layout: bar\ndata: [{key: 'a', value: 1,}, {key: 'b', value: 2},]").unwrap();
    let values: Vec<f64> = chart.points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![1.0, 2.0]);
}

#[test]
fn test_non_numeric_value_is_malformed() {
    let err = parse_chart("layout: bar\ndata: [{key: 'a', value: 'lots'}]").unwrap_err();
    assert!(matches!(err, ChartError::MalformedData { .. }));
    assert!(err.to_string().starts_with("failed to parse chart data"));
}

#[test]
fn test_unknown_layout_draws_as_bar() {
    let chart = parse_chart("layout: scatter\ndata: [{key: 1, value: 2}]").unwrap();
    assert_eq!(chart.kind, "scatter");
    assert_eq!(chart.chart_kind(), ChartKind::Bar);
}

#[test]
fn test_numeric_keys_detected() {
    let chart = parse_chart("layout: line\ndata: [{key: 1, value: 2}, {key: '2.5', value: 3}]").unwrap();
    assert!(chart.keys_are_numeric);

    let chart = parse_chart("layout: line\ndata: [{key: 1, value: 2}, {key: 'x', value: 3}]").unwrap();
    assert!(!chart.keys_are_numeric);
}

#[test]
fn test_fields_after_data_block() {
    let block = "layout: bar\ndata: [\n  {key: 'a', value: 1}\n]\ntitle: After\n";
    let chart = parse_chart(block).unwrap();
    assert_eq!(chart.title.as_deref(), Some("After"));
    assert_eq!(chart.points.len(), 1);
}

#[test]
fn test_whitespace_only_differences_parse_the_same() {
    let tight = parse_chart("layout: bar\ndata: [{key:'a',value:1}]").unwrap();
    let loose = parse_chart("  layout:   bar  \n\ndata: [ { key: 'a' , value: 1 } ]\n").unwrap();
    assert_eq!(tight.points, loose.points);
    assert_eq!(tight.chart_kind(), loose.chart_kind());
}

#[test]
fn test_from_str() {
    let chart: chartmark::ChartDescription = "layout: pie\ndata: [{key: 'x', value: 1}]"
        .parse()
        .unwrap();
    assert_eq!(chart.chart_kind(), ChartKind::Pie);
}

#[test]
fn test_punctuation_inside_quoted_keys() {
    let chart = parse_chart("layout: bar\ndata: [{key: 'a, value: b', value: 1}, {key: 'x, ]', value: 2},]").unwrap();
    assert_eq!(chart.points[0].key, PointKey::Text("a, value: b".to_string()));
    assert_eq!(chart.points[1].key, PointKey::Text("x, ]".to_string()));
}
