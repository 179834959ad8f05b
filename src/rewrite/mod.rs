//! Text-level brand rewriting.
//!
//! These functions operate on plain strings and know nothing about HTML;
//! [`crate::transform`] applies them to the text nodes of a parsed document.

mod casing;
mod phrase;
mod rules;

pub use casing::{CasingPattern, apply_casing, classify, preserve_case};
pub use phrase::{rewrite_bare_tokens, rewrite_phrases};
pub use rules::BrandRules;
