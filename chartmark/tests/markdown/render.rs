//! Document rendering tests (Markdown → HTML with charts)

use chartmark::{
    block_id, render_markdown, ChartError, ChartOptions, Field, HtmlOptions, HtmlRenderer,
};
use std::path::PathBuf;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

#[test]
fn test_report_renders_every_chart() {
    let source = fixture("report.md");
    let doc = render_markdown(&source, &ChartOptions::default()).unwrap();

    assert_eq!(doc.charts, 3);
    assert!(doc.is_clean());
    assert_eq!(doc.html.matches("class=\"chartmark-chart\"").count(), 3);
    assert_eq!(doc.html.matches("<script>").count(), 3);

    assert!(doc.html.contains("<h1>Quarterly report</h1>"));
    assert!(doc.html.contains("<h2>Revenue</h2>"));
    assert!(doc.html.contains("<blockquote>"));
    assert!(doc.html.contains("<code class=\"language-rust\">"));
    assert!(!doc.html.contains("language-vis"));
}

#[test]
fn test_report_chart_details() {
    let source = fixture("report.md");
    let doc = render_markdown(&source, &ChartOptions::default()).unwrap();

    assert!(doc.html.contains(r#""text": "Visitors per month""#));
    assert!(doc.html.contains("height: 18rem"));
    assert!(doc.html.contains(r#""type": "linear""#));
    assert!(doc.html.contains(r#""type": "pie""#));
}

#[test]
fn test_charts_follow_document_order() {
    let source = fixture("report.md");
    let doc = render_markdown(&source, &ChartOptions::default()).unwrap();

    let bar = doc.html.find(r#""type": "bar""#).unwrap();
    let line = doc.html.find(r#""type": "line""#).unwrap();
    let pie = doc.html.find(r#""type": "pie""#).unwrap();
    assert!(bar < line && line < pie);
}

#[test]
fn test_broken_blocks_are_skipped() {
    let source = fixture("broken.md");
    let doc = render_markdown(&source, &ChartOptions::default()).unwrap();

    assert_eq!(doc.charts, 1);
    let errors: Vec<&ChartError> = doc.failures.iter().map(|f| &f.error).collect();
    assert_eq!(errors.len(), 3);
    assert_eq!(errors[0], &ChartError::MissingField(Field::Layout));
    assert_eq!(errors[1], &ChartError::MissingField(Field::Data));
    assert!(matches!(errors[2], ChartError::MalformedData { .. }));

    assert!(doc.failures.iter().all(|f| f.label == "vis"));
    assert!(!doc.html.contains("<pre>"));
    assert!(doc.html.contains("<p>The end.</p>"));
}

#[test]
fn test_identical_blocks_share_ids() {
    let block = "layout: bar\ndata: [{key: 'a', value: 1}]\n";
    let source = format!("```vis\n{block}```\n\nbetween\n\n```vis\n{block}```\n");
    let doc = render_markdown(&source, &ChartOptions::default()).unwrap();

    let id = block_id(block.as_bytes());
    assert_eq!(doc.charts, 2);
    assert_eq!(doc.html.matches(&format!("<div id=\"{id}\"")).count(), 2);
}

#[test]
fn test_whitespace_changes_the_id() {
    let tight = "layout: bar\ndata: [{key: 'a', value: 1}]\n";
    let loose = "layout: bar\ndata: [ {key: 'a', value: 1} ]\n";
    let source = format!("```vis\n{tight}```\n\n```vis\n{loose}```\n");
    let doc = render_markdown(&source, &ChartOptions::default()).unwrap();

    assert_ne!(block_id(tight.as_bytes()), block_id(loose.as_bytes()));
    assert!(doc.html.contains(&block_id(tight.as_bytes())));
    assert!(doc.html.contains(&block_id(loose.as_bytes())));
}

#[test]
fn test_render_block_propagates_errors() {
    use chartmark::markdown::{markdown_options, ChartTransformer};
    use comrak::{parse_document, Arena};

    let source = "```vis\nlayout: bar\n```\n";
    let renderer = HtmlRenderer::default();
    let arena = Arena::new();
    let root = parse_document(&arena, source, &markdown_options());
    let blocks = ChartTransformer::new(renderer.registry()).transform(&arena, root, source);

    let err = renderer.render_block(&blocks[0], source).unwrap_err();
    assert_eq!(err, ChartError::MissingField(Field::Data));
}

#[test]
fn test_crlf_block_id_hashes_exact_bytes() {
    let source = fixture("report.md").replace('\n', "\r\n");
    let doc = render_markdown(&source, &ChartOptions::default()).unwrap();

    let block = "layout: line\r\nheight: 18rem\r\ndata: [\r\n  { key: 2021, value: 1.5 },\r\n  { key: 2022, value: 2.25 },\r\n  { key: 2023, value: 3 }\r\n]\r\n";
    assert_eq!(doc.charts, 3);
    assert!(doc.html.contains(&block_id(block.as_bytes())));
    assert!(!doc.html.contains(&block_id(block.replace("\r\n", "\n").as_bytes())));
}

#[test]
fn test_raw_html_in_document_is_not_passed_through() {
    let source = "<script>alert('x')</script>\n\n<img src=x onerror=alert(2)>\n\n[link](javascript:alert(3))\n\n```vis\nlayout: bar\ndata: [{key: 'a', value: 1}]\n```\n";
    let doc = render_markdown(source, &ChartOptions::default()).unwrap();

    assert_eq!(doc.charts, 1);
    assert!(!doc.html.contains("alert("));
    assert!(!doc.html.contains("onerror"));
    assert!(!doc.html.contains("javascript:"));
    assert_eq!(doc.html.matches("<script>").count(), 1);
}

#[test]
fn test_chart_in_quote_with_uneven_markers() {
    let source = "> ```vis\n>layout: pie\n> data: [{key: 'x', value: 1}]\n> ```\n";
    let doc = render_markdown(source, &ChartOptions::default()).unwrap();

    let body = "layout: pie\ndata: [{key: 'x', value: 1}]\n";
    assert_eq!(doc.charts, 1);
    assert!(doc.html.contains(&block_id(body.as_bytes())));
    assert!(doc.html.starts_with("<blockquote>\n<div id="));
}

#[test]
fn test_standalone_page() {
    let source = fixture("report.md");
    let renderer = HtmlRenderer::new(&ChartOptions::default()).with_html_options(HtmlOptions {
        chartjs_src: "/static/chart.umd.js".to_string(),
        title: "Q3 & Q4".to_string(),
        custom_css: None,
    });
    let doc = renderer.render_page(&source).unwrap();

    assert!(doc.html.starts_with("<!DOCTYPE html>"));
    assert!(doc.html.contains(r#"<script src="/static/chart.umd.js"></script>"#));
    assert!(doc.html.contains("<title>Q3 &amp; Q4</title>"));
    assert_eq!(doc.charts, 3);
}
