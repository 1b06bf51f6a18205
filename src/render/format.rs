//! Markup formatting behind a narrow interface.
//!
//! The renderer validates and sanitizes a request into an `IconMarkup` or
//! `ImageMarkup` view model; a `MarkupFormatter` turns that into HTML.
//! Formatters receive raw (unescaped) values and must escape them.

use std::fmt::Write;

use super::request::Role;
use crate::utils::html::{escape, escape_attr};

/// Sanitized data for a sprite icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconMarkup {
    pub role: Role,
    pub classes: Option<String>,
    pub title: Option<String>,
    pub desc: Option<String>,
    /// Fully qualified sprite URL including the fragment.
    pub href: String,
}

/// Sanitized data for a standalone SVG image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMarkup {
    pub src: String,
    /// Class attribute, already including the inline-svg marker class.
    pub classes: String,
    pub alt: Option<String>,
    pub role: Role,
}

/// Turns view models into markup.
pub trait MarkupFormatter {
    fn icon(&self, markup: &IconMarkup) -> String;
    fn image(&self, markup: &ImageMarkup) -> String;
}

/// Default HTML formatter.
///
/// ```text
/// <svg role="image" class="btn"><title>..</title><desc>..</desc><use xlink:href=".."></use></svg>
/// <img src=".." class="logo js-inline-svg" alt=".." role="presentation">
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFormatter;

impl MarkupFormatter for HtmlFormatter {
    fn icon(&self, markup: &IconMarkup) -> String {
        let mut out = String::with_capacity(96 + markup.href.len());

        let _ = write!(out, r#"<svg role="{}""#, markup.role.as_str());
        if let Some(classes) = &markup.classes {
            let _ = write!(out, r#" class="{}""#, escape_attr(classes));
        }
        out.push('>');

        if let Some(title) = &markup.title {
            let _ = write!(out, "<title>{}</title>", escape(title));
        }
        if let Some(desc) = &markup.desc {
            let _ = write!(out, "<desc>{}</desc>", escape(desc));
        }

        let _ = write!(
            out,
            r#"<use xlink:href="{}"></use></svg>"#,
            escape_attr(&markup.href)
        );
        out
    }

    fn image(&self, markup: &ImageMarkup) -> String {
        let mut out = String::with_capacity(64 + markup.src.len());

        let _ = write!(
            out,
            r#"<img src="{}" class="{}""#,
            escape_attr(&markup.src),
            escape_attr(&markup.classes)
        );
        if let Some(alt) = &markup.alt {
            let _ = write!(out, r#" alt="{}""#, escape_attr(alt));
        }
        let _ = write!(out, r#" role="{}">"#, markup.role.as_str());
        out
    }
}
