//! Server-side icon rendering.
//!
//! Produces markup that references an icon inside a shared sprite document
//! by fragment identifier:
//!
//! ```text
//! {theme url}/assets/svg-sprite/{set}.svg?v={version}#{icon}
//! ```
//!
//! The rendered reference assumes the sprite is served from the page's own
//! origin. When it is not, the rehydration pass (`crate::rehydrate`) inlines
//! the sprite documents after rendering.
//!
//! # Module Structure
//!
//! ```text
//! render/
//! ├── request    # IconRequest, ImageRequest, Role, Scope, Classes
//! ├── format     # MarkupFormatter trait and the default HtmlFormatter
//! ├── sanitize   # Text/URL sanitization
//! └── mod.rs     # IconRenderer, AssetRoots (this file)
//! ```

mod format;
mod request;
pub mod sanitize;

pub use format::{HtmlFormatter, IconMarkup, ImageMarkup, MarkupFormatter};
pub use request::{IconRequest, ImageRequest, Role, Scope};

use sanitize::{rawurlencode, sanitize_text, sanitize_url};

use crate::utils::html::spaceless;

/// Path of the sprite directory inside a theme.
pub const SPRITE_PATH: &str = "/assets/svg-sprite/";

/// Path of the standalone image directory inside a theme.
pub const IMAGE_PATH: &str = "/assets/images/";

/// Marker class that lets scripts swap an `<img>` for its inline SVG.
pub const INLINE_SVG_CLASS: &str = "js-inline-svg";

/// Sprite used when a request names none.
pub const DEFAULT_SET: &str = "ui";

// ============================================================================
// Asset roots
// ============================================================================

/// Base URL and version of one theme's assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeAssets {
    /// Absolute theme URL, e.g. `https://cdn.example/theme`.
    pub url: String,
    /// Theme version, used as cache-busting query parameter.
    pub version: String,
}

impl ThemeAssets {
    pub fn new(url: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            version: version.into(),
        }
    }

    /// Theme URL without trailing slash.
    #[inline]
    pub fn root(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// URL prefix shared by every sprite of this theme.
    pub fn sprite_base(&self) -> String {
        format!("{}{SPRITE_PATH}", self.root())
    }
}

/// Asset roots of the primary theme and an optional override theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRoots {
    pub base: ThemeAssets,
    pub child: Option<ThemeAssets>,
}

impl AssetRoots {
    pub fn new(base: ThemeAssets) -> Self {
        Self { base, child: None }
    }

    pub fn with_child(mut self, child: ThemeAssets) -> Self {
        self.child = Some(child);
        self
    }

    /// Select the asset root for a scope. `Child` falls back to `base`.
    pub fn resolve(&self, scope: Scope) -> &ThemeAssets {
        match (scope, &self.child) {
            (Scope::Child, Some(child)) => child,
            _ => &self.base,
        }
    }
}

// ============================================================================
// Renderer
// ============================================================================

/// Renders sprite icons and standalone SVG images.
#[derive(Debug, Clone)]
pub struct IconRenderer<F = HtmlFormatter> {
    roots: AssetRoots,
    formatter: F,
}

impl IconRenderer<HtmlFormatter> {
    pub fn new(roots: AssetRoots) -> Self {
        Self::with_formatter(roots, HtmlFormatter)
    }
}

impl<F: MarkupFormatter> IconRenderer<F> {
    pub fn with_formatter(roots: AssetRoots, formatter: F) -> Self {
        Self { roots, formatter }
    }

    pub fn roots(&self) -> &AssetRoots {
        &self.roots
    }

    /// Full sprite URL for an icon, sanitized.
    pub fn sprite_url(&self, set: &str, icon: &str, scope: Scope) -> String {
        let theme = self.roots.resolve(scope);
        let url = format!(
            "{}{SPRITE_PATH}{set}.svg?v={}#{icon}",
            theme.root(),
            rawurlencode(&theme.version)
        );
        sanitize_url(&url).into_owned()
    }

    /// Full URL of a standalone SVG image, sanitized.
    pub fn image_url(&self, icon: &str, scope: Scope) -> String {
        let theme = self.roots.resolve(scope);
        let url = format!("{}{IMAGE_PATH}{icon}.svg", theme.root());
        sanitize_url(&url).into_owned()
    }

    /// Validate and sanitize an icon request into its view model.
    pub fn icon_markup(&self, req: &IconRequest) -> Option<IconMarkup> {
        if req.icon.is_empty() {
            return None;
        }

        Some(IconMarkup {
            role: req.role,
            classes: req.classes.as_ref().and_then(|c| non_empty(&c.joined())),
            title: req.title.as_deref().and_then(non_empty),
            desc: req.desc.as_deref().and_then(non_empty),
            href: self.sprite_url(&req.set, &req.icon, req.scope),
        })
    }

    /// Validate and sanitize an image request into its view model.
    pub fn image_markup(&self, req: &ImageRequest) -> Option<ImageMarkup> {
        if req.icon.is_empty() {
            return None;
        }

        let classes = match req.classes.as_ref().and_then(|c| non_empty(&c.joined())) {
            Some(classes) => format!("{classes} {INLINE_SVG_CLASS}"),
            None => INLINE_SVG_CLASS.to_string(),
        };

        Some(ImageMarkup {
            src: self.image_url(&req.icon, req.scope),
            classes,
            alt: req.alt.as_deref().and_then(non_empty),
            role: req.role,
        })
    }

    /// Render an icon. `None` when the request has no icon.
    pub fn render_icon(&self, req: &IconRequest) -> Option<String> {
        let markup = self.icon_markup(req)?;
        Some(spaceless(&self.formatter.icon(&markup)).into_owned())
    }

    /// Render a standalone SVG image. `None` when the request has no icon.
    pub fn render_image(&self, req: &ImageRequest) -> Option<String> {
        let markup = self.image_markup(req)?;
        Some(spaceless(&self.formatter.image(&markup)).into_owned())
    }
}

/// Sanitize free text, treating an empty result as absent.
fn non_empty(text: &str) -> Option<String> {
    let text = sanitize_text(text);
    (!text.is_empty()).then_some(text)
}

// ============================================================================
// Tests
// ============================================================================
