//! Document-level brand substitution.
//!
//! Parses HTML, rewrites eligible text nodes in place and serializes the
//! result. Markup, attributes, comments and `script`/`style` content pass
//! through untouched.
//!
//! # Example
//!
//! ```
//! use faleproxy::transform_document;
//!
//! let out = transform_document(r#"<a href="https://www.yale.edu/about">About Yale</a>"#);
//! assert!(out.contains(r#"<a href="https://www.yale.edu/about">About Fale</a>"#));
//! ```

mod walker;

pub use walker::{EXCLUDED_ELEMENTS, RewriteStats};

use encoding_rs::{Encoding, UTF_8};
use tracing::debug;

use crate::dom::{ArenaDom, NodeId, parse_html, serialize_html};
use crate::error::Result;
use crate::rewrite::BrandRules;
use crate::util::{charset_from_content_type, decode_text, sniff_meta_charset};

/// Rewrites brand phrases in HTML documents.
///
/// Holds validated [`BrandRules`]; each call owns its own parsed tree, so a
/// single `Rewriter` can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Rewriter {
    rules: BrandRules,
}

impl Rewriter {
    /// Create a rewriter, validating the rules.
    pub fn new(rules: BrandRules) -> Result<Self> {
        rules.validate()?;
        Ok(Self { rules })
    }

    /// The rules in use.
    pub fn rules(&self) -> &BrandRules {
        &self.rules
    }

    /// Rewrite the text nodes of an already parsed document.
    pub fn rewrite_dom(&self, dom: &mut ArenaDom) -> RewriteStats {
        walker::rewrite_text_nodes(dom, &self.rules)
    }

    /// Parse, rewrite and serialize an HTML document.
    ///
    /// Never fails. Input that is not HTML is treated as body text.
    pub fn transform_document(&self, html: &str) -> String {
        let dom = self.parse_and_rewrite(html);
        serialize_html(&dom)
    }

    /// Decode raw bytes and transform them.
    ///
    /// `charset` is typically the `Content-Type` charset of the response; when
    /// absent a `<meta charset>` in the document is used as the hint. The
    /// output is UTF-8, so `<meta>` charset declarations naming another
    /// encoding are changed to `utf-8`.
    pub fn transform_bytes(&self, bytes: &[u8], charset: Option<&str>) -> String {
        let hint = charset.or_else(|| sniff_meta_charset(bytes));
        let html = decode_text(bytes, hint);
        let mut dom = self.parse_and_rewrite(&html);
        let redeclared = declare_utf8(&mut dom);
        if redeclared > 0 {
            debug!(redeclared, "meta charset changed to utf-8");
        }
        serialize_html(&dom)
    }

    fn parse_and_rewrite(&self, html: &str) -> ArenaDom {
        let mut dom = parse_html(html);
        let stats = self.rewrite_dom(&mut dom);
        debug!(
            input_bytes = html.len(),
            visited = stats.text_nodes_visited,
            rewritten = stats.text_nodes_rewritten,
            skipped = stats.skipped_subtrees,
            "transformed document"
        );
        dom
    }
}

/// Point `<meta charset>` and `<meta http-equiv="Content-Type">` at UTF-8.
/// Declarations that already resolve to UTF-8 are left as written.
/// Returns the number of elements changed.
fn declare_utf8(dom: &mut ArenaDom) -> usize {
    let is_utf8 = |label: &str| Encoding::for_label(label.as_bytes()) == Some(UTF_8);

    let metas: Vec<NodeId> = dom
        .descendants()
        .filter(|&id| dom.is_html_element(id, "meta"))
        .collect();

    let mut changed = 0;
    for id in metas {
        if dom.get_attr(id, "charset").is_some_and(|c| !is_utf8(c.trim())) {
            dom.set_attr(id, "charset", "utf-8".to_string());
            changed += 1;
        }

        let is_content_type = dom
            .get_attr(id, "http-equiv")
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("content-type"));
        let declared = dom.get_attr(id, "content").and_then(charset_from_content_type);
        if is_content_type && declared.is_some_and(|c| !is_utf8(c)) {
            dom.set_attr(id, "content", "text/html; charset=utf-8".to_string());
            changed += 1;
        }
    }
    changed
}

/// Transform a document with the default rules ("Yale" -> "Fale").
pub fn transform_document(html: &str) -> String {
    Rewriter::default().transform_document(html)
}
