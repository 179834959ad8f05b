//! Boundary-aware brand phrase matching.
//!
//! Scans a single text string left to right for whole-word occurrences of the
//! target word. An occurrence is rewritten only when a whitespace run and one
//! of the configured continuations follow it; all other text, including the
//! whitespace and the continuation itself, is copied through untouched.
//!
//! Matching never looks beyond the string it is given, so a phrase split
//! across two text nodes is not a match.

use std::borrow::Cow;

use memchr::memchr2;

use super::casing::preserve_case;
use super::rules::BrandRules;

/// Rewrite every target word that starts a brand phrase.
///
/// Returns the input borrowed when nothing matched.
///
/// # Examples
///
/// ```
/// use faleproxy::rewrite::{rewrite_phrases, BrandRules};
///
/// let rules = BrandRules::default();
/// assert_eq!(
///     rewrite_phrases("YALE University and Yale College", &rules),
///     "FALE University and Fale College"
/// );
/// assert_eq!(rewrite_phrases("no Yale references", &rules), "no Yale references");
/// ```
pub fn rewrite_phrases<'a>(text: &'a str, rules: &BrandRules) -> Cow<'a, str> {
    rewrite_matches(text, rules, |end| {
        let after_gap = skip_whitespace(text, end)?;
        rules
            .continuations
            .iter()
            .find_map(|continuation| match_continuation(text, after_gap, continuation))
    })
}

/// Rewrite every whole-word target token, whatever follows it.
///
/// Used for exact anchor labels, where the label itself is the context.
pub fn rewrite_bare_tokens<'a>(text: &'a str, rules: &BrandRules) -> Cow<'a, str> {
    rewrite_matches(text, rules, Some)
}

/// Drive the scan. `accept` receives the end of a target occurrence and
/// returns where scanning resumes if the occurrence should be rewritten.
fn rewrite_matches<'a, F>(text: &'a str, rules: &BrandRules, accept: F) -> Cow<'a, str>
where
    F: Fn(usize) -> Option<usize>,
{
    let mut out: Option<String> = None;
    let mut copied = 0;
    let mut pos = 0;

    while let Some((start, end)) = find_target(text, &rules.target, pos) {
        match accept(end) {
            Some(resume) => {
                let buf = out.get_or_insert_with(|| String::with_capacity(text.len()));
                buf.push_str(&text[copied..start]);
                buf.push_str(&preserve_case(&text[start..end], &rules.replacement));
                copied = end;
                pos = resume.max(end);
            }
            None => pos = end,
        }
    }

    match out {
        Some(mut buf) => {
            buf.push_str(&text[copied..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(text),
    }
}

/// Find the next whole-word, ASCII case-insensitive occurrence of `target`
/// at or after byte offset `from`.
fn find_target(text: &str, target: &str, from: usize) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    let first = *target.as_bytes().first()?;
    let (lower, upper) = (first.to_ascii_lowercase(), first.to_ascii_uppercase());

    let mut pos = from;
    while pos < bytes.len() {
        let start = pos + memchr2(lower, upper, &bytes[pos..])?;
        let end = start + target.len();
        if let Some(candidate) = text.get(start..end)
            && candidate.eq_ignore_ascii_case(target)
            && !letter_before(text, start)
            && !letter_at(text, end)
        {
            return Some((start, end));
        }
        pos = start + 1;
    }
    None
}

/// Match `continuation` at `from`, allowing any whitespace run for each of its
/// internal spaces. Returns the end offset when the match ends on a word
/// boundary.
fn match_continuation(text: &str, from: usize, continuation: &str) -> Option<usize> {
    let mut words = continuation.split_whitespace();
    let mut pos = from;

    let first = words.next()?;
    pos = match_literal(text, pos, first)?;
    for word in words {
        pos = skip_whitespace(text, pos)?;
        pos = match_literal(text, pos, word)?;
    }

    (!letter_at(text, pos)).then_some(pos)
}

fn match_literal(text: &str, pos: usize, literal: &str) -> Option<usize> {
    text[pos..].starts_with(literal).then(|| pos + literal.len())
}

/// Skip one or more whitespace characters. `None` if there are none.
fn skip_whitespace(text: &str, from: usize) -> Option<usize> {
    let rest = &text[from..];
    let run = rest
        .find(|c: char| !c.is_whitespace())
        .unwrap_or(rest.len());
    (run > 0).then_some(from + run)
}

fn letter_before(text: &str, pos: usize) -> bool {
    text[..pos].chars().next_back().is_some_and(char::is_alphabetic)
}

fn letter_at(text: &str, pos: usize) -> bool {
    text[pos..].chars().next().is_some_and(char::is_alphabetic)
}
