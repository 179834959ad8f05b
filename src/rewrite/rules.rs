//! Brand rewrite rules.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// What to rewrite and where.
///
/// The target word is only rewritten when it is followed by one of the
/// `continuations`, or when it sits inside an anchor whose trimmed text is
/// exactly one of the `anchor_labels`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandRules {
    /// Brand word to replace, matched case-insensitively as a whole word.
    pub target: String,
    /// Replacement word; its casing is taken from each matched occurrence.
    pub replacement: String,
    /// Literal phrases that must follow the target. Matched case-sensitively,
    /// with any run of whitespace standing in for each internal space.
    pub continuations: Vec<String>,
    /// Exact link labels whose target token is always rewritten.
    pub anchor_labels: Vec<String>,
}

impl Default for BrandRules {
    fn default() -> Self {
        Self {
            target: "Yale".to_string(),
            replacement: "Fale".to_string(),
            continuations: vec![
                "University".to_string(),
                "College".to_string(),
                "medical school".to_string(),
            ],
            anchor_labels: vec!["About Yale".to_string()],
        }
    }
}

impl BrandRules {
    /// Create rules for `target` -> `replacement` with no continuations or labels.
    pub fn new(target: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            replacement: replacement.into(),
            continuations: Vec::new(),
            anchor_labels: Vec::new(),
        }
    }

    /// Add a continuation phrase.
    pub fn with_continuation(mut self, continuation: impl Into<String>) -> Self {
        self.continuations.push(continuation.into());
        self
    }

    /// Add an exact anchor label.
    pub fn with_anchor_label(mut self, label: impl Into<String>) -> Self {
        self.anchor_labels.push(label.into());
        self
    }

    /// Check that the rules can be matched.
    ///
    /// The target must be a non-empty run of letters, since matches are
    /// delimited by non-letter boundaries.
    pub fn validate(&self) -> Result<()> {
        if self.target.is_empty() || !self.target.chars().all(char::is_alphabetic) {
            return Err(Error::InvalidRules(format!(
                "target must be a single word of letters, got {:?}",
                self.target
            )));
        }
        if self.replacement.is_empty() {
            return Err(Error::InvalidRules("replacement must not be empty".into()));
        }
        if let Some(bad) = self.continuations.iter().find(|c| c.trim().is_empty()) {
            return Err(Error::InvalidRules(format!(
                "continuation must contain a word, got {bad:?}"
            )));
        }
        Ok(())
    }

    /// Whether `text`, trimmed, is one of the configured anchor labels.
    pub fn is_anchor_label(&self, text: &str) -> bool {
        let trimmed = text.trim();
        self.anchor_labels.iter().any(|label| label == trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_are_valid() {
        let rules = BrandRules::default();
        assert!(rules.validate().is_ok());
        assert_eq!(rules.target, "Yale");
        assert_eq!(rules.continuations.len(), 3);
    }

    #[test]
    fn test_rejects_multi_word_target() {
        let rules = BrandRules::new("Yale University", "Fale");
        assert!(matches!(rules.validate(), Err(Error::InvalidRules(_))));
    }

    #[test]
    fn test_rejects_blank_continuation() {
        let rules = BrandRules::new("Yale", "Fale").with_continuation("  ");
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_anchor_label_is_exact_after_trim() {
        let rules = BrandRules::default();
        assert!(rules.is_anchor_label("  About Yale\n"));
        assert!(!rules.is_anchor_label("About Yale today"));
        assert!(!rules.is_anchor_label("about Yale"));
    }
}
