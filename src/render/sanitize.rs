//! Input sanitization for rendered markup.
//!
//! - `sanitize_text()` - Strip tags and control characters from free text
//! - `sanitize_url()` - Drop characters that are not legal in a URL
//! - `rawurlencode()` - RFC 3986 percent-encoding of a single component

use std::borrow::Cow;
use std::sync::LazyLock;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;

/// Everything except the RFC 3986 unreserved set.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Punctuation kept by `sanitize_url` (letters and digits are always kept).
const URL_PUNCTUATION: &str = "$-_.+!*'(),{}|\\^~[]`<>#%\";/?:@&=";

/// Strip markup and control characters from free text, then trim.
///
/// An unterminated tag swallows the rest of the input.
/// Line breaks and tabs become spaces; other control characters are removed.
pub fn sanitize_text(input: &str) -> String {
    static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>?").unwrap());

    let stripped = RE_TAG.replace_all(input, "");
    let cleaned: String = stripped
        .chars()
        .filter_map(|c| match c {
            '\t' | '\n' | '\r' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect();

    cleaned.trim().to_string()
}

/// Remove every character that cannot appear in a URL.
///
/// Whitespace, non-ASCII and control characters are dropped.
pub fn sanitize_url(input: &str) -> Cow<'_, str> {
    let legal = |c: char| c.is_ascii_alphanumeric() || URL_PUNCTUATION.contains(c);

    if input.chars().all(legal) {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(input.chars().filter(|&c| legal(c)).collect())
    }
}

/// Percent-encode everything except `A-Z a-z 0-9 - _ . ~`.
pub fn rawurlencode(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}
