//! Sprite document fetching.
//!
//! `SpriteSource` is the seam between the rehydration pass and wherever the
//! sprite files actually live:
//!
//! | Source        | Reads from                                         |
//! |---------------|----------------------------------------------------|
//! | `HttpSource`  | The asset server, over HTTP(S)                     |
//! | `LocalSource` | A local copy of the theme directory                |
//! | `CachedSource`| Another source, remembering bodies across pages    |

use std::future::Future;
use std::path::{Component, Path, PathBuf};

use futures_util::future::try_join_all;
use parking_lot::Mutex;
use percent_encoding::percent_decode_str;
use rustc_hash::FxHashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to `{url}` failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("`{0}` does not map into the local theme directory")]
    OutsideRoot(String),
}

/// Fetches the raw markup of one sprite document.
pub trait SpriteSource {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Issue every fetch at once and concatenate the bodies in input order.
///
/// The first failure fails the whole batch; nothing is retried.
pub async fn fetch_all<S>(source: &S, sprites: &[(String, String)]) -> Result<String, FetchError>
where
    S: SpriteSource + Sync,
{
    let bodies = try_join_all(sprites.iter().map(|(_, url)| source.fetch(url))).await?;
    Ok(bodies.concat())
}

// ============================================================================
// HTTP
// ============================================================================

/// Fetch sprites from the asset server.
#[derive(Debug, Clone, Default)]
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SpriteSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let http = |source| FetchError::Http {
            url: url.to_string(),
            source,
        };

        self.client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(http)?
            .text()
            .await
            .map_err(http)
    }
}

// ============================================================================
// Local theme directory
// ============================================================================

/// Read sprites from a local theme checkout instead of the network.
///
/// `https://cdn.example/theme/assets/svg-sprite/ui.svg?v=2` with base URL
/// `https://cdn.example/theme` reads `{dir}/assets/svg-sprite/ui.svg`.
#[derive(Debug, Clone)]
pub struct LocalSource {
    base_url: String,
    dir: PathBuf,
}

impl LocalSource {
    pub fn new(base_url: &str, dir: impl Into<PathBuf>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            dir: dir.into(),
        }
    }

    /// Map a sprite URL onto a file below the theme directory.
    pub fn resolve(&self, url: &str) -> Option<PathBuf> {
        let rest = url
            .strip_prefix(&self.base_url)
            .filter(|rest| rest.starts_with('/'))?;
        let path = rest.split(['?', '#']).next().unwrap_or(rest);
        let decoded = percent_decode_str(path).decode_utf8().ok()?;

        let relative = Path::new(decoded.trim_start_matches('/'));
        let is_plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !is_plain || relative.as_os_str().is_empty() {
            return None;
        }
        Some(self.dir.join(relative))
    }
}

impl SpriteSource for LocalSource {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let path = self
            .resolve(url)
            .ok_or_else(|| FetchError::OutsideRoot(url.to_string()))?;
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|err| FetchError::Io(path, err))
    }
}

// ============================================================================
// Cache
// ============================================================================

/// Remembers fetched bodies so a multi-page run requests each sprite once.
///
/// Failures are not cached.
pub struct CachedSource<S> {
    inner: S,
    bodies: Mutex<FxHashMap<String, String>>,
}

impl<S> CachedSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            bodies: Mutex::new(FxHashMap::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.bodies.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.lock().is_empty()
    }
}

impl<S: SpriteSource + Sync> SpriteSource for CachedSource<S> {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let cached = self.bodies.lock().get(url).cloned();
        if let Some(body) = cached {
            return Ok(body);
        }

        let body = self.inner.fetch(url).await?;
        self.bodies.lock().insert(url.to_string(), body.clone());
        Ok(body)
    }
}

// ============================================================================
// Tests
// ============================================================================
