//! Page scanning and sprite reference parsing.
//!
//! Everything here is a pure function over the page source or over the
//! element list produced by `scan_page`, so the rehydration steps can be
//! tested without fetching anything.

use regex::Regex;
use rustc_hash::FxHashSet;

use crate::debug;
use crate::utils::html::{open_tag_end, unescape_attr};

/// A `<use>` element found inside an `<svg>` container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseElement {
    /// Byte offset of the element's `<`.
    pub start: usize,
    /// Byte offset just past the opening tag's `>`.
    pub open_end: usize,
    /// Attribute name/value pairs, values with character references decoded.
    pub attrs: Vec<(String, String)>,
}

impl UseElement {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The referenced URL: `xlink:href` wins over `href`, empty values count as absent.
    pub fn reference(&self) -> Option<&str> {
        self.attr("xlink:href")
            .filter(|v| !v.is_empty())
            .or_else(|| self.attr("href").filter(|v| !v.is_empty()))
    }
}

/// Result of scanning one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageScan {
    /// `<use>` elements in source order.
    pub uses: Vec<UseElement>,
    /// Byte offset just past `<body ...>`, if the page has a body tag.
    pub body_start: Option<usize>,
}

/// Collect `<use>` elements inside `<svg>` containers and locate `<body>`.
pub fn scan_page(html: &str) -> Result<PageScan, String> {
    let dom = tl::parse(html, tl::ParserOptions::default()).map_err(|e| format!("{e:?}"))?;
    let parser = dom.parser();

    let mut scan = PageScan::default();
    for handle in dom.children() {
        visit(*handle, parser, html, false, &mut scan);
    }
    scan.uses.sort_by_key(|u| u.start);
    Ok(scan)
}

fn visit(
    handle: tl::NodeHandle,
    parser: &tl::Parser,
    html: &str,
    in_svg: bool,
    scan: &mut PageScan,
) {
    let Some(tl::Node::Tag(tag)) = handle.get(parser) else {
        return;
    };

    let name = tag.name().as_utf8_str().to_ascii_lowercase();
    let (start, _) = tag.boundaries(parser);

    match name.as_str() {
        "use" if in_svg => {
            if let Some(open_end) = open_tag_end(html, start) {
                let attrs = tag
                    .attributes()
                    .iter()
                    .map(|(key, value)| {
                        let key: &str = key.as_ref();
                        let value = value.map(|v| unescape_attr(&v).into_owned());
                        (key.to_string(), value.unwrap_or_default())
                    })
                    .collect();
                scan.uses.push(UseElement {
                    start,
                    open_end,
                    attrs,
                });
            }
        }
        "body" if scan.body_start.is_none() => {
            scan.body_start = open_tag_end(html, start);
        }
        _ => {}
    }

    let in_svg = in_svg || name == "svg";
    for child in tag.children().top().iter() {
        visit(*child, parser, html, in_svg, scan);
    }
}

// ============================================================================
// Sprite references
// ============================================================================

/// One icon inside one sprite document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconReference {
    /// Sprite file name between the base path and `.svg`.
    pub set_id: String,
    /// Fragment after `#`.
    pub icon_id: String,
    /// The full URL including the fragment.
    pub url: String,
}

impl IconReference {
    /// Sprite document URL: everything before the first `#`.
    pub fn sprite_url(&self) -> &str {
        self.url.split_once('#').map_or(self.url.as_str(), |(doc, _)| doc)
    }
}

/// Matches `{base}{set}.svg{anything but #}#{icon}`.
#[derive(Debug, Clone)]
pub struct SpritePattern {
    base: String,
    re: Regex,
}

impl SpritePattern {
    pub fn new(base: &str) -> Result<Self, regex::Error> {
        let re = Regex::new(&format!(r"(?s)^{}(.+?)\.svg[^#]*#(.+)$", regex::escape(base)))?;
        Ok(Self {
            base: base.to_string(),
            re,
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    #[inline]
    pub fn is_prefixed(&self, url: &str) -> bool {
        url.starts_with(&self.base)
    }

    pub fn parse(&self, url: &str) -> Option<IconReference> {
        let caps = self.re.captures(url)?;
        Some(IconReference {
            set_id: caps[1].to_string(),
            icon_id: caps[2].to_string(),
            url: url.to_string(),
        })
    }
}

/// An element that references a sprite under the base path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconMatch {
    /// Index into `PageScan::uses`.
    pub element: usize,
    pub reference: IconReference,
}

/// Keep elements whose reference starts with the sprite base and parse them.
///
/// Prefixed references that do not name a sprite and fragment are skipped.
pub fn collect_references(uses: &[UseElement], pattern: &SpritePattern) -> Vec<IconMatch> {
    uses.iter()
        .enumerate()
        .filter_map(|(index, elem)| {
            let url = elem.reference().filter(|url| pattern.is_prefixed(url))?;
            match pattern.parse(url) {
                Some(reference) => Some(IconMatch {
                    element: index,
                    reference,
                }),
                None => {
                    debug!("rehydrate"; "skipping malformed sprite reference `{}`", url);
                    None
                }
            }
        })
        .collect()
}

/// Map each set to its sprite URL; the first occurrence wins, first-seen order.
pub fn unique_sprites(matches: &[IconMatch]) -> Vec<(String, String)> {
    let mut seen = FxHashSet::default();
    matches
        .iter()
        .filter(|m| seen.insert(m.reference.set_id.as_str()))
        .map(|m| {
            (
                m.reference.set_id.clone(),
                m.reference.sprite_url().to_string(),
            )
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
