//! Letter-casing classification and transfer.
//!
//! A matched brand word is classified as all-upper, all-lower or mixed case,
//! and the same pattern is reproduced onto the replacement word.

/// Casing pattern of a single word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CasingPattern {
    /// Every cased character is uppercase (`YALE`).
    AllUpper,
    /// Every cased character is lowercase (`yale`).
    AllLower,
    /// Anything else (`Yale`, `YaLe`).
    Mixed,
}

/// Classify the casing of `word`.
///
/// Precedence is upper, then lower, then mixed: a word without cased
/// characters (including the empty word) is its own uppercase form and is
/// therefore [`CasingPattern::AllUpper`].
///
/// # Examples
///
/// ```
/// use faleproxy::rewrite::{classify, CasingPattern};
///
/// assert_eq!(classify("YALE"), CasingPattern::AllUpper);
/// assert_eq!(classify("yale"), CasingPattern::AllLower);
/// assert_eq!(classify("Yale"), CasingPattern::Mixed);
/// ```
pub fn classify(word: &str) -> CasingPattern {
    if word == word.to_uppercase() {
        CasingPattern::AllUpper
    } else if word == word.to_lowercase() {
        CasingPattern::AllLower
    } else {
        CasingPattern::Mixed
    }
}

/// Render `base` with the casing `pattern` observed on `source`.
///
/// For [`CasingPattern::Mixed`] the casing is copied character by character:
/// position `i` of the output is uppercase when position `i` of `source` is
/// uppercase, and lowercase otherwise (including positions past the end of
/// `source`).
pub fn apply_casing(pattern: CasingPattern, source: &str, base: &str) -> String {
    match pattern {
        CasingPattern::AllUpper => base.to_uppercase(),
        CasingPattern::AllLower => base.to_lowercase(),
        CasingPattern::Mixed => {
            let mut source_chars = source.chars();
            let mut out = String::with_capacity(base.len());
            for ch in base.chars() {
                match source_chars.next() {
                    Some(s) if s.is_uppercase() => out.extend(ch.to_uppercase()),
                    _ => out.extend(ch.to_lowercase()),
                }
            }
            out
        }
    }
}

/// Classify `source` and render `base` with its casing.
///
/// ```
/// use faleproxy::rewrite::preserve_case;
///
/// assert_eq!(preserve_case("YaLe", "Fale"), "FaLe");
/// ```
pub fn preserve_case(source: &str, base: &str) -> String {
    apply_casing(classify(source), source, base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_patterns() {
        assert_eq!(classify("YALE"), CasingPattern::AllUpper);
        assert_eq!(classify("yale"), CasingPattern::AllLower);
        assert_eq!(classify("Yale"), CasingPattern::Mixed);
        assert_eq!(classify("yALE"), CasingPattern::Mixed);
    }

    #[test]
    fn test_classify_uncased_prefers_upper() {
        assert_eq!(classify(""), CasingPattern::AllUpper);
        assert_eq!(classify("7"), CasingPattern::AllUpper);
        assert_eq!(classify("Y"), CasingPattern::AllUpper);
        assert_eq!(classify("y"), CasingPattern::AllLower);
    }

    #[test]
    fn test_apply_uniform_casing() {
        assert_eq!(apply_casing(CasingPattern::AllUpper, "YALE", "Fale"), "FALE");
        assert_eq!(apply_casing(CasingPattern::AllLower, "yale", "Fale"), "fale");
    }

    #[test]
    fn test_mixed_copies_per_character() {
        assert_eq!(preserve_case("Yale", "Fale"), "Fale");
        assert_eq!(preserve_case("YaLe", "Fale"), "FaLe");
        assert_eq!(preserve_case("yAlE", "fale"), "fAlE");
    }

    #[test]
    fn test_mixed_defaults_to_lower_past_source() {
        assert_eq!(apply_casing(CasingPattern::Mixed, "Ab", "wxyz"), "Wxyz");
        assert_eq!(apply_casing(CasingPattern::Mixed, "aB", "WXYZ"), "wXyz");
    }
}
