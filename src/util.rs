//! Text decoding helpers for fetched documents.

use std::borrow::Cow;

use memchr::memmem;

/// Decode bytes to a string, handling various encodings.
///
/// This function:
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. If malformed, tries the hint encoding (from `Content-Type` or `<meta charset>`)
/// 3. Falls back to Windows-1252 (what browsers assume for legacy pages)
///
/// Uses `Cow<str>` to avoid allocation when the input is valid UTF-8.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Extract the `charset` parameter from a `Content-Type` header value.
///
/// ```ignore
/// assert_eq!(charset_from_content_type("text/html; charset=ISO-8859-1"), Some("ISO-8859-1"));
/// ```
pub fn charset_from_content_type(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"'))
            .filter(|v| !v.is_empty())
    })
}

/// Look for a `charset=` declaration inside a `<meta>` tag in the first
/// kilobyte of a document.
///
/// Covers both `<meta charset="...">` and the `http-equiv` form.
pub fn sniff_meta_charset(bytes: &[u8]) -> Option<&str> {
    let head = &bytes[..bytes.len().min(1024)];
    let lower = head.to_ascii_lowercase();

    memmem::find_iter(&lower, b"<meta").find_map(|start| {
        let tag_end = memchr::memchr(b'>', &lower[start..]).map_or(lower.len(), |end| start + end);
        let pos = start + memmem::find(&lower[start..tag_end], b"charset=")? + b"charset=".len();

        let rest = &head[pos..tag_end];
        let rest = rest.strip_prefix(b"\"").or_else(|| rest.strip_prefix(b"'")).unwrap_or(rest);
        let end = rest
            .iter()
            .position(|&b| !(b.is_ascii_alphanumeric() || b == b'-' || b == b'_'))
            .unwrap_or(rest.len());

        std::str::from_utf8(&rest[..end]).ok().filter(|s| !s.is_empty())
    })
}
