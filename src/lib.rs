//! # faleproxy
//!
//! Fetches an HTML page and rewrites a brand name inside it, keeping the
//! letter casing of every occurrence and leaving markup alone.
//!
//! ## Rules
//!
//! The target word (default `Yale`) is rewritten only when:
//!
//! - it is followed by whitespace and one of the configured continuations
//!   (`University`, `College`, `medical school`), or
//! - it is inside an `<a>` whose trimmed text is exactly a configured label
//!   (`About Yale`).
//!
//! Attribute values, comments and `script`/`style` content are never touched.
//!
//! ## Quick Start
//!
//! ```
//! use faleproxy::transform_document;
//!
//! let html = "<p>YALE University, Yale College, and yale medical school.</p>";
//! let out = transform_document(html);
//! assert!(out.contains("FALE University, Fale College, and fale medical school."));
//! ```
//!
//! ## Custom rules
//!
//! ```
//! use faleproxy::{BrandRules, Rewriter};
//!
//! let rules = BrandRules::new("Acme", "Apex").with_continuation("Corp");
//! let rewriter = Rewriter::new(rules).unwrap();
//! assert!(rewriter.transform_document("<b>ACME Corp</b>").contains("<b>APEX Corp</b>"));
//! ```
//!
//! With the default `server` feature the crate also provides the HTTP
//! service that fetches pages and returns them rewritten (see [`server`]).

pub mod dom;
pub mod error;
pub mod rewrite;
pub mod transform;
pub(crate) mod util;

#[cfg(feature = "server")]
pub mod server;

pub use error::{Error, Result};
pub use rewrite::BrandRules;
pub use transform::{RewriteStats, Rewriter, transform_document};
