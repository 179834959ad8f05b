//! Depth-first walk over a parsed document, rewriting eligible text nodes.

use std::borrow::Cow;

use crate::dom::{ArenaDom, NodeId};
use crate::rewrite::{BrandRules, rewrite_bare_tokens, rewrite_phrases};

/// Elements whose whole subtree is left alone.
pub const EXCLUDED_ELEMENTS: &[&str] = &["script", "style"];

/// Counters collected during one rewrite.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RewriteStats {
    /// Text nodes outside excluded elements.
    pub text_nodes_visited: usize,
    /// Text nodes whose content changed.
    pub text_nodes_rewritten: usize,
    /// Excluded elements whose subtree was skipped.
    pub skipped_subtrees: usize,
}

/// Rewrite every eligible text node of `dom` in place.
///
/// Attributes, comments and doctypes are never looked at. Text nodes are
/// edited in place; the tree shape is not changed.
pub(crate) fn rewrite_text_nodes(dom: &mut ArenaDom, rules: &BrandRules) -> RewriteStats {
    let mut stats = RewriteStats::default();
    let mut stack = vec![dom.document()];

    while let Some(id) = stack.pop() {
        if is_excluded(dom, id) {
            stats.skipped_subtrees += 1;
            continue;
        }

        let in_anchor = dom.is_html_element(id, "a");
        let children: Vec<NodeId> = dom.children(id).collect();

        for &child in &children {
            let Some(text) = dom.text_content(child) else {
                continue;
            };
            stats.text_nodes_visited += 1;
            if let Some(rewritten) = rewrite_text(text, in_anchor, rules) {
                dom.set_text(child, rewritten);
                stats.text_nodes_rewritten += 1;
            }
        }

        // Push element children in reverse for left-to-right traversal
        stack.extend(children.into_iter().rev().filter(|&c| !dom.is_text(c)));
    }

    stats
}

fn is_excluded(dom: &ArenaDom, id: NodeId) -> bool {
    dom.element_name(id)
        .is_some_and(|name| EXCLUDED_ELEMENTS.contains(&name.as_ref()))
}

/// New content for one text node, or `None` when it stays as is.
fn rewrite_text(text: &str, in_anchor: bool, rules: &BrandRules) -> Option<String> {
    if in_anchor && rules.is_anchor_label(text) {
        let start = text.len() - text.trim_start().len();
        let end = start + text.trim().len();
        return match rewrite_bare_tokens(&text[start..end], rules) {
            Cow::Owned(label) => Some(format!("{}{label}{}", &text[..start], &text[end..])),
            Cow::Borrowed(_) => None,
        };
    }

    match rewrite_phrases(text, rules) {
        Cow::Owned(rewritten) => Some(rewritten),
        Cow::Borrowed(_) => None,
    }
}
