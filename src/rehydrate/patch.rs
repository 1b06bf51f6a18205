//! Page mutation: inline the sprites and point references at local fragments.

use std::sync::LazyLock;

use regex::Regex;

use super::scan::{IconMatch, PageScan};
use crate::utils::html::escape_attr;

/// Opening tag of the container holding the inlined sprite documents.
pub const SPRITE_CONTAINER_OPEN: &str = r#"<div hidden aria-hidden="true" style="display: none">"#;

/// `href` / `xlink:href` attributes inside an opening tag, with leading whitespace.
static RE_HREF_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[ \t\r\n]+(?:xlink:)?href[ \t\r\n]*=[ \t\r\n]*(?:"[^"]*"|'[^']*'|[^ \t\r\n>"']+)"#)
        .unwrap()
});

/// Replace both href forms of a `<use>` opening tag with `href="#{icon}"`.
pub fn rewrite_use_tag(open_tag: &str, icon_id: &str) -> String {
    let stripped = RE_HREF_ATTR.replace_all(open_tag, "");
    let split = if stripped.ends_with("/>") {
        stripped.len() - 2
    } else {
        stripped.len().saturating_sub(1)
    };
    let (head, tail) = stripped.split_at(split);
    format!(r##"{} href="#{}"{tail}"##, head.trim_end(), escape_attr(icon_id))
}

/// Apply the rehydration to the page source.
///
/// Inserts `fragment` in a hidden container right after `<body>` (or at the
/// document start) and rewrites every matched `<use>` element.
pub fn rewrite(html: &str, scan: &PageScan, matches: &[IconMatch], fragment: &str) -> String {
    let insert_at = scan.body_start.unwrap_or(0);
    let container = format!("{SPRITE_CONTAINER_OPEN}{fragment}</div>");

    // (start, end, replacement), non-overlapping
    let mut edits: Vec<(usize, usize, String)> = Vec::with_capacity(matches.len() + 1);
    edits.push((insert_at, insert_at, container));
    for m in matches {
        let elem = &scan.uses[m.element];
        let open_tag = &html[elem.start..elem.open_end];
        edits.push((
            elem.start,
            elem.open_end,
            rewrite_use_tag(open_tag, &m.reference.icon_id),
        ));
    }
    edits.sort_by_key(|(start, end, _)| (*start, *end));

    let added: usize = edits.iter().map(|(_, _, r)| r.len()).sum();
    let mut out = String::with_capacity(html.len() + added);
    let mut cursor = 0;
    for (start, end, replacement) in &edits {
        out.push_str(&html[cursor..*start]);
        out.push_str(replacement);
        cursor = *end;
    }
    out.push_str(&html[cursor..]);
    out
}
