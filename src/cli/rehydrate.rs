//! `rehydrate` command: run the sprite rehydration pass over rendered pages.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use jwalk::WalkDir;

use crate::config::{IconkitConfig, SpriteSourceKind};
use crate::logger::ProgressLine;
use crate::rehydrate::{
    CachedSource, HttpSource, LocalSource, Rehydration, Rehydrator, SpriteSource,
};
use crate::utils::str::ends_with;
use crate::{debug, log};

/// Page suffixes picked up when walking directories.
const PAGE_SUFFIXES: &[&str] = &[".html", ".htm"];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub patched: usize,
    pub unchanged: usize,
    pub failed: usize,
}

pub fn run_rehydrate(paths: &[PathBuf], dry: bool, config: &IconkitConfig) -> Result<()> {
    let site_url = config.site.url.as_deref().context("`site.url` is not configured")?;
    let rehydrator = Rehydrator::new(site_url, &config.theme.base())?;

    if !rehydrator.is_active()? {
        log!("rehydrate"; "theme assets are served from the site origin, nothing to do");
        return Ok(());
    }

    let pages = collect_pages(paths);
    if pages.is_empty() {
        log!("rehydrate"; "no HTML pages found");
        return Ok(());
    }
    debug!("rehydrate"; "sprite base {}", rehydrator.sprite_base());

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    let summary = match config.rehydrate.source {
        SpriteSourceKind::Http => {
            let source = CachedSource::new(HttpSource::new());
            rt.block_on(rehydrate_pages(&rehydrator, &pages, &source, dry))
        }
        SpriteSourceKind::Local => {
            let dir = config
                .rehydrate
                .dir
                .clone()
                .context("`rehydrate.dir` is not configured")?;
            let source = CachedSource::new(LocalSource::new(&config.theme.url, dir));
            rt.block_on(rehydrate_pages(&rehydrator, &pages, &source, dry))
        }
    };

    let verb = if dry { "would patch" } else { "patched" };
    log!("rehydrate"; "{} {} page(s), {} unchanged, {} failed",
        verb, summary.patched, summary.unchanged, summary.failed);

    if summary.failed > 0 {
        bail!("{} page(s) could not be rehydrated", summary.failed);
    }
    Ok(())
}

/// Expand files and directories into a sorted list of pages.
///
/// Explicit files are taken as given; directories contribute `.html`/`.htm` files.
pub fn collect_pages(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut pages: Vec<PathBuf> = paths
        .iter()
        .flat_map(|path| {
            if path.is_dir() {
                WalkDir::new(path)
                    .into_iter()
                    .filter_map(Result::ok)
                    .filter(|e| e.file_type().is_file())
                    .map(|e| e.path())
                    .filter(|p| is_page(p))
                    .collect()
            } else {
                vec![path.clone()]
            }
        })
        .collect();
    pages.sort();
    pages.dedup();
    pages
}

fn is_page(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| ends_with(&name.to_ascii_lowercase(), PAGE_SUFFIXES))
}

/// Rehydrate pages one after the other. A failing page is left untouched.
pub async fn rehydrate_pages<S>(
    rehydrator: &Rehydrator,
    pages: &[PathBuf],
    source: &S,
    dry: bool,
) -> Summary
where
    S: SpriteSource + Sync,
{
    let progress = ProgressLine::new(&[("pages", pages.len())]);
    let mut summary = Summary::default();

    for page in pages {
        match rehydrate_page(rehydrator, page, source, dry).await {
            Ok(true) => summary.patched += 1,
            Ok(false) => summary.unchanged += 1,
            Err(err) => {
                summary.failed += 1;
                log!("error"; "{}: {:#}", page.display(), err);
            }
        }
        progress.inc("pages");
    }

    progress.finish();
    summary
}

/// Returns whether the page was (or, when `dry`, would be) rewritten.
async fn rehydrate_page<S>(
    rehydrator: &Rehydrator,
    page: &Path,
    source: &S,
    dry: bool,
) -> Result<bool>
where
    S: SpriteSource + Sync,
{
    let html = tokio::fs::read_to_string(page)
        .await
        .with_context(|| format!("failed to read {}", page.display()))?;

    match rehydrator.run(&html, source).await? {
        Rehydration::Patched { html, sprites, icons } => {
            debug!("rehydrate"; "{}: {} icon(s) from {} sprite(s)", page.display(), icons, sprites);
            if !dry {
                tokio::fs::write(page, html)
                    .await
                    .with_context(|| format!("failed to write {}", page.display()))?;
            }
            Ok(true)
        }
        Rehydration::NoReferences | Rehydration::SameOrigin => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rehydrate::fetch::tests::MemorySource;
    use crate::render::ThemeAssets;
    use std::fs;

    const CDN: &str = "https://cdn.example/theme";
    const SPRITE: &str = "https://cdn.example/theme/assets/svg-sprite/ui.svg?v=1";

    fn rehydrator() -> Rehydrator {
        Rehydrator::new("https://www.example.com", &ThemeAssets::new(CDN, "1")).unwrap()
    }

    fn page_with_icon() -> String {
        format!("<html><body><svg><use xlink:href=\"{SPRITE}#close\"></use></svg></body></html>")
    }

    #[test]
    fn test_collect_pages() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("blog")).unwrap();
        fs::write(dir.path().join("index.html"), "").unwrap();
        fs::write(dir.path().join("blog/post.HTM"), "").unwrap();
        fs::write(dir.path().join("style.css"), "").unwrap();
        let extra = dir.path().join("fragment.txt");
        fs::write(&extra, "").unwrap();

        let pages = collect_pages(&[dir.path().to_path_buf(), extra.clone(), extra.clone()]);
        assert_eq!(
            pages,
            vec![
                dir.path().join("blog/post.HTM"),
                extra,
                dir.path().join("index.html"),
            ]
        );
    }

    #[tokio::test]
    async fn test_rehydrate_pages_writes_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let patched = dir.path().join("a.html");
        let plain = dir.path().join("b.html");
        fs::write(&patched, page_with_icon()).unwrap();
        fs::write(&plain, "<html><body><p>text</p></body></html>").unwrap();

        let source = MemorySource::with(&[(SPRITE, "<svg><symbol id=\"close\"/></svg>")]);
        let summary =
            rehydrate_pages(&rehydrator(), &[patched.clone(), plain.clone()], &source, false).await;

        assert_eq!(summary, Summary { patched: 1, unchanged: 1, failed: 0 });
        let out = fs::read_to_string(&patched).unwrap();
        assert!(out.contains("<symbol id=\"close\"/>"));
        assert!(out.contains("<use href=\"#close\"></use>"));
        assert_eq!(
            fs::read_to_string(&plain).unwrap(),
            "<html><body><p>text</p></body></html>"
        );
    }

    #[tokio::test]
    async fn test_rehydrate_pages_dry_run() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("a.html");
        fs::write(&page, page_with_icon()).unwrap();

        let source = MemorySource::with(&[(SPRITE, "<svg/>")]);
        let summary = rehydrate_pages(&rehydrator(), &[page.clone()], &source, true).await;

        assert_eq!(summary.patched, 1);
        assert_eq!(fs::read_to_string(&page).unwrap(), page_with_icon());
    }

    #[tokio::test]
    async fn test_rehydrate_pages_failure_leaves_page() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("a.html");
        let missing = dir.path().join("missing.html");
        fs::write(&page, page_with_icon()).unwrap();

        let source = MemorySource::default();
        let summary = rehydrate_pages(&rehydrator(), &[page.clone(), missing], &source, false).await;

        assert_eq!(summary.failed, 2);
        assert_eq!(fs::read_to_string(&page).unwrap(), page_with_icon());
    }

    #[tokio::test]
    async fn test_rehydrate_pages_shares_cache() {
        let dir = tempfile::tempdir().unwrap();
        let pages: Vec<_> = (0..3)
            .map(|i| {
                let path = dir.path().join(format!("{i}.html"));
                fs::write(&path, page_with_icon()).unwrap();
                path
            })
            .collect();

        let source = CachedSource::new(MemorySource::with(&[(SPRITE, "<svg/>")]));
        let summary = rehydrate_pages(&rehydrator(), &pages, &source, true).await;

        assert_eq!(summary.patched, 3);
        assert_eq!(source.len(), 1);
    }
}
