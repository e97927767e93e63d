//! Tests for the tree printer and JSON output.

use std::thread;

use serde_json::Value;
use thicket_html::{parse_html, print_tree, render_tree, to_json};

/// Nesting far deeper than a small thread stack could hold one frame per
/// level for.
const DEEP: usize = 2_000;

/// Run `f` on a thread with a deliberately small stack.
fn on_small_stack<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
    thread::Builder::new()
        .stack_size(128 * 1024)
        .spawn(f)
        .expect("spawn thread")
        .join()
        .expect("thread finished")
}

fn render(html: &str) -> String {
    let (document, _) = parse_html(html);
    let document = document.expect("tree expected");
    render_tree(document.tree(), document.root())
}

#[test]
fn test_render_nested_elements() {
    let out = render(r#"<div id="main" hidden class="a"><p>Hello</p><br/></div>"#);
    assert_eq!(
        out,
        "<div class=\"a\" hidden id=\"main\">\n  <p>\n    Text: \"Hello\"\n  <br>\n"
    );
}

#[test]
fn test_render_fragment_with_comment_and_doctype() {
    let out = render("<!DOCTYPE html><!--  note  --><p>a\nb  </p>");
    assert_eq!(
        out,
        "Fragment (root)\n  Doctype: html\n  Comment: \"note\"\n  <p>\n    Text: \"a\\nb\"\n"
    );
}

#[test]
fn test_render_skips_whitespace_only_text() {
    let mut tree = thicket_dom::DomTree::new();
    let blank = tree.alloc(thicket_dom::NodeKind::Text("  \n ".to_string()));
    tree.append_child(thicket_dom::NodeId::ROOT, blank);
    assert_eq!(render_tree(&tree, thicket_dom::NodeId::ROOT), "Fragment (root)\n");
}

#[test]
fn test_json_for_tree() {
    let html = r#"<div id="x"><!-- c -->hi</div>"#;
    let (document, issues) = parse_html(html);
    let json = to_json(html, document.as_ref(), &issues).unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["root"]["type"], "element");
    assert_eq!(value["root"]["tagName"], "div");
    assert_eq!(value["root"]["attributes"]["id"], "x");
    assert_eq!(value["root"]["children"][0]["type"], "comment");
    assert_eq!(value["root"]["children"][0]["content"], " c ");
    assert_eq!(value["root"]["children"][1]["type"], "text");
    assert_eq!(value["root"]["children"][1]["content"], "hi");
    assert_eq!(value["diagnostics"], Value::Array(Vec::new()));
}

#[test]
fn test_json_for_diagnostics() {
    let html = "<div>\n<p>x</div>";
    let (document, issues) = parse_html(html);
    let json = to_json(html, document.as_ref(), &issues).unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();

    let diagnostic = &value["diagnostics"][0];
    assert_eq!(diagnostic["code"], "implicit-close");
    assert_eq!(diagnostic["fatal"], false);
    assert_eq!(diagnostic["position"], 10);
    assert_eq!(diagnostic["line"], 2);
    assert_eq!(diagnostic["column"], 5);
}

#[test]
fn test_json_for_fatal() {
    let html = "<p";
    let (document, issues) = parse_html(html);
    let json = to_json(html, document.as_ref(), &issues).unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();

    assert!(value["root"].is_null());
    assert_eq!(value["diagnostics"][0]["code"], "unterminated-tag");
    assert_eq!(value["diagnostics"][0]["fatal"], true);
    assert!(value["diagnostics"][0].get("position").is_none());
}

#[test]
fn test_print_tree_writes_without_panicking() {
    let (document, _) = parse_html("<ul><li>one</li><li>two</li></ul>");
    let document = document.unwrap();
    print_tree(document.tree(), document.root(), 0);
}

#[test]
fn test_render_deeply_nested_tree() {
    let (document, issues) = parse_html(&"<div>".repeat(DEEP));
    let document = document.expect("tree expected");
    assert_eq!(issues.len(), DEEP);

    let out = on_small_stack(move || render_tree(document.tree(), document.root()));
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), DEEP);
    assert_eq!(lines[0], "<div>");
    assert_eq!(lines[DEEP - 1].trim_start(), "<div>");
    assert_eq!(lines[DEEP - 1].len() - "<div>".len(), 2 * (DEEP - 1));
}

#[test]
fn test_json_for_deeply_nested_tree() {
    let html = "<div>".repeat(DEEP);
    let (document, issues) = parse_html(&html);
    let document = document.expect("tree expected");

    let json = on_small_stack(move || to_json(&html, Some(&document), &issues).unwrap());

    assert!(json.starts_with("{\n  \"root\": {\n    \"type\": \"element\","));
    assert_eq!(json.matches("\"tagName\": \"div\"").count(), DEEP);
    assert_eq!(json.matches('{').count(), json.matches('}').count());
    assert_eq!(json.matches('[').count(), json.matches(']').count());
    assert_eq!(json.matches("\"code\": \"unclosed-at-end-of-document\"").count(), DEEP);
}

#[test]
fn test_json_for_nested_tree_is_valid() {
    let html = format!("{}<p>x</p>", "<section a=\"1\">".repeat(40));
    let (document, issues) = parse_html(&html);
    let json = to_json(&html, document.as_ref(), &issues).unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();

    let mut node = &value["root"];
    for _ in 0..40 {
        assert_eq!(node["tagName"], "section");
        assert_eq!(node["attributes"]["a"], "1");
        node = &node["children"][0];
    }
    assert_eq!(node["tagName"], "p");
    assert_eq!(node["children"][0]["content"], "x");
    assert_eq!(value["diagnostics"].as_array().map(Vec::len), Some(40));
}
