//! Cross-origin sprite rehydration.
//!
//! `<use xlink:href="https://cdn.example/theme/assets/svg-sprite/ui.svg#close">`
//! only resolves when the sprite is served from the page's own origin. When
//! the theme assets live on another host, this post-render pass fetches the
//! referenced sprite documents once each, inlines them at the start of the
//! page body and rewrites every reference to a same-document fragment
//! (`href="#close"`).
//!
//! # Steps
//!
//! ```text
//! is_cross_origin ─► scan_page ─► collect_references ─► unique_sprites
//!                                                            │
//!                         rewrite ◄── fetch_all (concurrent, all-or-nothing)
//! ```
//!
//! A failed fetch aborts the pass for that page and leaves it untouched.

pub mod fetch;
pub mod origin;
pub mod patch;
pub mod scan;

pub use fetch::{CachedSource, FetchError, HttpSource, LocalSource, SpriteSource, fetch_all};
pub use origin::is_cross_origin;
pub use scan::{IconMatch, PageScan, SpritePattern};

use thiserror::Error;

use crate::debug;
use crate::render::ThemeAssets;

#[derive(Debug, Error)]
pub enum RehydrateError {
    #[error("invalid URL `{0}`")]
    Url(String, #[source] url::ParseError),

    #[error("invalid sprite base `{0}`")]
    Pattern(String, #[source] regex::Error),

    #[error("failed to parse page: {0}")]
    Parse(String),

    #[error("failed to fetch sprites")]
    Fetch(#[from] FetchError),
}

/// Outcome of rehydrating one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rehydration {
    /// Assets share the page's host; nothing to do.
    SameOrigin,
    /// No `<use>` element references the sprite base.
    NoReferences,
    /// The page with sprites inlined and references rewritten.
    Patched {
        html: String,
        sprites: usize,
        icons: usize,
    },
}

/// Everything the pass needs before fetching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub scan: PageScan,
    pub matches: Vec<IconMatch>,
    /// `(set id, sprite URL)` in first-seen order.
    pub sprites: Vec<(String, String)>,
}

/// Post-render pass inlining cross-origin sprites into a page.
#[derive(Debug, Clone)]
pub struct Rehydrator {
    page_url: String,
    asset_url: String,
    pattern: SpritePattern,
}

impl Rehydrator {
    /// `page_url` is the site URL; sprites are expected under the theme's sprite path.
    pub fn new(page_url: &str, theme: &ThemeAssets) -> Result<Self, RehydrateError> {
        let base = theme.sprite_base();
        let pattern =
            SpritePattern::new(&base).map_err(|err| RehydrateError::Pattern(base.clone(), err))?;

        Ok(Self {
            page_url: page_url.to_string(),
            asset_url: theme.url.clone(),
            pattern,
        })
    }

    pub fn sprite_base(&self) -> &str {
        self.pattern.base()
    }

    /// Whether the assets are served from another host than the page.
    pub fn is_active(&self) -> Result<bool, RehydrateError> {
        is_cross_origin(&self.page_url, &self.asset_url).map_err(|err| {
            let bad = if url::Url::parse(&self.page_url).is_err() {
                &self.page_url
            } else {
                &self.asset_url
            };
            RehydrateError::Url(bad.clone(), err)
        })
    }

    /// Scan a page and work out which sprites it needs. Pure, no I/O.
    pub fn plan(&self, html: &str) -> Result<Plan, RehydrateError> {
        let scan = scan::scan_page(html).map_err(RehydrateError::Parse)?;
        let matches = scan::collect_references(&scan.uses, &self.pattern);
        let sprites = scan::unique_sprites(&matches);
        Ok(Plan {
            scan,
            matches,
            sprites,
        })
    }

    /// Run the full pass on one page.
    pub async fn run<S>(&self, html: &str, source: &S) -> Result<Rehydration, RehydrateError>
    where
        S: SpriteSource + Sync,
    {
        if !self.is_active()? {
            return Ok(Rehydration::SameOrigin);
        }

        let plan = self.plan(html)?;
        if plan.matches.is_empty() {
            return Ok(Rehydration::NoReferences);
        }

        debug!("rehydrate"; "fetching {} sprite(s) for {} icon(s)", plan.sprites.len(), plan.matches.len());
        let fragment = fetch_all(source, &plan.sprites).await?;

        Ok(Rehydration::Patched {
            html: patch::rewrite(html, &plan.scan, &plan.matches, &fragment),
            sprites: plan.sprites.len(),
            icons: plan.matches.len(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rehydrate::fetch::tests::MemorySource;
    use crate::render::{AssetRoots, IconRenderer, IconRequest};

    const SITE: &str = "https://www.example.com";
    const CDN: &str = "https://cdn.example/theme";

    fn theme() -> ThemeAssets {
        ThemeAssets::new(CDN, "2.3")
    }

    fn page(icons: &[(&str, &str)]) -> String {
        let renderer = IconRenderer::new(AssetRoots::new(theme()));
        let body: String = icons
            .iter()
            .map(|(set, icon)| renderer.render_icon(&IconRequest::new(*icon).set(*set)).unwrap())
            .collect();
        format!("<!DOCTYPE html><html><head></head><body>{body}</body></html>")
    }

    fn sprite(url: &str) -> String {
        format!("{CDN}/assets/svg-sprite/{url}")
    }

    #[tokio::test]
    async fn test_same_origin_is_noop() {
        let html = page(&[("ui", "close")]);
        let source = MemorySource::default();
        let rehydrator = Rehydrator::new("https://cdn.example", &theme()).unwrap();

        let result = rehydrator.run(&html, &source).await.unwrap();
        assert_eq!(result, Rehydration::SameOrigin);
        assert!(source.requests().is_empty());
    }

    #[tokio::test]
    async fn test_one_fetch_per_set() {
        let html = page(&[("ui", "close"), ("ui", "open"), ("social", "mail")]);
        let ui = sprite("ui.svg?v=2.3");
        let social = sprite("social.svg?v=2.3");
        let source = MemorySource::with(&[
            (ui.as_str(), "<svg><symbol id=\"close\"/><symbol id=\"open\"/></svg>"),
            (social.as_str(), "<svg><symbol id=\"mail\"/></svg>"),
        ]);
        let rehydrator = Rehydrator::new(SITE, &theme()).unwrap();

        let result = rehydrator.run(&html, &source).await.unwrap();
        let Rehydration::Patched { html: out, sprites, icons } = result else {
            panic!("expected patched page");
        };

        assert_eq!(sprites, 2);
        assert_eq!(icons, 3);
        assert_eq!(source.requests(), vec![ui, social]);

        assert!(out.contains(concat!(
            "<body><div hidden aria-hidden=\"true\" style=\"display: none\">",
            "<svg><symbol id=\"close\"/><symbol id=\"open\"/></svg>",
            "<svg><symbol id=\"mail\"/></svg></div>"
        )));
        assert!(out.contains(r##"<use href="#close"></use>"##));
        assert!(out.contains(r##"<use href="#open"></use>"##));
        assert!(out.contains(r##"<use href="#mail"></use>"##));
        assert!(!out.contains("xlink:href"));
        assert!(!out.contains(&format!("href=\"{CDN}")));
    }

    #[tokio::test]
    async fn test_escaped_reference_round_trips() {
        let html = page(&[("a&b", "it's")]);
        assert!(html.contains("a&amp;b.svg?v=2.3#it&#39;s"));

        let sprite_url = sprite("a&b.svg?v=2.3");
        let source = MemorySource::with(&[(sprite_url.as_str(), "<svg><symbol id=\"it's\"/></svg>")]);
        let rehydrator = Rehydrator::new(SITE, &theme()).unwrap();

        let result = rehydrator.run(&html, &source).await.unwrap();
        let Rehydration::Patched { html: out, .. } = result else {
            panic!("expected patched page");
        };

        assert_eq!(source.requests(), vec![sprite_url]);
        assert!(out.contains(r##"<use href="#it&#39;s"></use>"##));
    }

    #[tokio::test]
    async fn test_no_references() {
        let html = "<html><body><svg><use href=\"#local\"></use></svg></body></html>";
        let source = MemorySource::default();
        let rehydrator = Rehydrator::new(SITE, &theme()).unwrap();

        let result = rehydrator.run(html, &source).await.unwrap();
        assert_eq!(result, Rehydration::NoReferences);
        assert!(source.requests().is_empty());
    }

    #[tokio::test]
    async fn test_failed_fetch_aborts() {
        let html = page(&[("ui", "close"), ("missing", "x")]);
        let ui = sprite("ui.svg?v=2.3");
        let source = MemorySource::with(&[(ui.as_str(), "<svg/>")]);
        let rehydrator = Rehydrator::new(SITE, &theme()).unwrap();

        let result = rehydrator.run(&html, &source).await;
        assert!(matches!(result, Err(RehydrateError::Fetch(_))));
    }

    #[test]
    fn test_plan_is_pure() {
        let html = page(&[("ui", "close"), ("ui", "close")]);
        let plan = Rehydrator::new(SITE, &theme()).unwrap().plan(&html).unwrap();
        assert_eq!(plan.matches.len(), 2);
        assert_eq!(plan.sprites, vec![("ui".to_string(), sprite("ui.svg?v=2.3"))]);
    }

    #[test]
    fn test_invalid_site_url() {
        let rehydrator = Rehydrator::new("not a url", &theme()).unwrap();
        assert!(matches!(
            rehydrator.is_active(),
            Err(RehydrateError::Url(url, _)) if url == "not a url"
        ));
    }
}
