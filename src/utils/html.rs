//! HTML utility functions.
//!
//! Provides the small amount of HTML handling the renderer and the
//! rehydration pass need:
//! - `escape()`, `escape_attr()` - HTML entity escaping
//! - `unescape_attr()` - Decode entities in attribute values read back from a page
//! - `spaceless()` - Collapse whitespace between tags
//! - `open_tag_end()` - Locate the `>` closing an opening tag

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// HTML Escaping
// =============================================================================

/// Characters that require HTML escaping.
const ESCAPE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

/// Get the HTML entity for a special character.
#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escape HTML special characters in text content.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
#[inline]
pub fn escape(s: &str) -> Cow<'_, str> {
    escape_with(s, &ESCAPE_CHARS)
}

/// Escape HTML attribute values.
///
/// Identical to `escape()` but semantically indicates attribute context.
#[inline]
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    escape_with(s, &ESCAPE_CHARS)
}

fn escape_with<'a>(s: &'a str, chars: &[char]) -> Cow<'a, str> {
    if !s.contains(chars) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match escape_char(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Decode character references in an attribute value as written in the source.
///
/// Covers the references `escape_attr()` produces plus numeric ones. A value
/// with an unknown or malformed reference is returned unchanged.
pub fn unescape_attr(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }
    quick_xml::escape::unescape(s).unwrap_or(Cow::Borrowed(s))
}

// =============================================================================
// Whitespace
// =============================================================================

/// Remove whitespace between tags, keeping whitespace inside text nodes.
///
/// `<svg>\n  <title>a b</title>\n</svg>` becomes `<svg><title>a b</title></svg>`.
pub fn spaceless(html: &str) -> Cow<'_, str> {
    static RE_BETWEEN_TAGS: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r">[ \t\r\n]+<").unwrap());

    RE_BETWEEN_TAGS.replace_all(html.trim_matches([' ', '\t', '\r', '\n']), "><")
}

// =============================================================================
// Tag Scanning
// =============================================================================

/// Find the byte offset just past the `>` that closes the opening tag at `start`.
///
/// Quoted attribute values may contain `>`, so quotes are tracked.
/// Returns `None` if `start` is not at `<` or the tag never closes.
pub fn open_tag_end(html: &str, start: usize) -> Option<usize> {
    let bytes = html.as_bytes();
    if bytes.get(start) != Some(&b'<') {
        return None;
    }

    let mut quote: Option<u8> = None;
    for (offset, &b) in bytes[start + 1..].iter().enumerate() {
        match (quote, b) {
            (Some(q), _) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(b),
            (None, b'>') => return Some(start + 1 + offset + 1),
            _ => {}
        }
    }
    None
}

// =============================================================================
// Tests
// =============================================================================
