//! Property tests over arbitrary input.

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use thicket_dom::{DomTree, NodeId, NodeKind};
use thicket_html::{ParseError, ParseIssue, is_void_element, parse_html};

/// Arbitrary strings rarely contain markup, so most properties also run on
/// a string assembled from markup-heavy pieces picked by the generated bytes.
fn markup_from(picks: &[u8]) -> String {
    const PIECES: [&str; 16] = [
        "<div>", "</div>", "<p class=\"x\">", "</p>", "<br/>", "<img src=a>", "text", " ",
        "<!-- c -->", "</span>", "<b>", "</b>", "<!DOCTYPE html>", "\n", "< ", "<i / >",
    ];
    picks
        .iter()
        .map(|&b| PIECES[usize::from(b) % PIECES.len()])
        .collect()
}

fn check_tree_invariants(tree: &DomTree, id: NodeId) -> bool {
    let Some(node) = tree.get(id) else {
        return false;
    };
    match &node.kind {
        NodeKind::Text(text) if text.trim().is_empty() => return false,
        NodeKind::Element(data) if is_void_element(&data.tag_name) && !node.children.is_empty() => {
            return false;
        }
        _ => {}
    }
    node.children
        .iter()
        .all(|&child| tree.parent(child) == Some(id) && check_tree_invariants(tree, child))
}

#[quickcheck]
fn prop_whitespace_only_is_empty_input(spaces: Vec<u8>) -> bool {
    let ws = [' ', '\t', '\n', '\r', '\u{a0}', '\u{3000}'];
    let input: String = spaces
        .iter()
        .map(|&b| ws[usize::from(b) % ws.len()])
        .collect();
    let (document, issues) = parse_html(&input);
    document.is_none() && issues == vec![ParseIssue::Fatal(ParseError::EmptyInput)]
}

#[quickcheck]
fn prop_arbitrary_input_terminates_and_is_deterministic(input: String) -> bool {
    parse_html(&input) == parse_html(&input)
}

#[quickcheck]
fn prop_fatal_iff_no_tree(picks: Vec<u8>) -> bool {
    let input = markup_from(&picks);
    let (document, issues) = parse_html(&input);
    let fatal_count = issues.iter().filter(|i| i.is_fatal()).count();
    match document {
        Some(_) => fatal_count == 0,
        None => fatal_count == 1 && issues.last().is_some_and(ParseIssue::is_fatal),
    }
}

#[quickcheck]
fn prop_tree_invariants_hold(picks: Vec<u8>) -> TestResult {
    let input = markup_from(&picks);
    let (document, _) = parse_html(&input);
    let Some(document) = document else {
        return TestResult::discard();
    };
    TestResult::from_bool(check_tree_invariants(document.tree(), NodeId::ROOT))
}

#[quickcheck]
fn prop_end_of_document_closes_come_last(picks: Vec<u8>) -> bool {
    let input = markup_from(&picks);
    let (_, issues) = parse_html(&input);
    let first_unclosed = issues
        .iter()
        .position(|i| matches!(i, ParseIssue::UnclosedAtEndOfDocument { .. }))
        .unwrap_or(issues.len());
    issues[first_unclosed..]
        .iter()
        .all(|i| matches!(i, ParseIssue::UnclosedAtEndOfDocument { .. }))
}

#[quickcheck]
fn prop_unterminated_open_tag_is_fatal(name: String) -> TestResult {
    let name: String = name.chars().filter(char::is_ascii_alphanumeric).collect();
    if name.is_empty() {
        return TestResult::discard();
    }
    let (document, issues) = parse_html(&format!("<{name} id=\"main\""));
    TestResult::from_bool(
        document.is_none() && issues == vec![ParseIssue::Fatal(ParseError::UnterminatedTag)],
    )
}

#[quickcheck]
fn prop_unterminated_comment_is_fatal(body: String) -> TestResult {
    if body.contains("-->") {
        return TestResult::discard();
    }
    let (document, issues) = parse_html(&format!("<!--{body}"));
    TestResult::from_bool(
        document.is_none() && issues == vec![ParseIssue::Fatal(ParseError::UnterminatedComment)],
    )
}
