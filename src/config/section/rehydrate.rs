//! `[rehydrate]` section configuration.
//!
//! ```toml
//! [rehydrate]
//! source = "local"   # "http" | "local"
//! dir = "../theme"   # theme checkout, required for "local"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RehydrateConfig {
    pub source: SpriteSourceKind,

    /// Local copy of the base theme, relative to the config file.
    pub dir: Option<PathBuf>,
}

/// Where sprite documents are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpriteSourceKind {
    /// Fetch from the asset server.
    #[default]
    Http,
    /// Read from `dir`.
    Local,
}

pub struct RehydrateFields {
    pub source: FieldPath,
    pub dir: FieldPath,
}

impl RehydrateConfig {
    pub const FIELDS: RehydrateFields = RehydrateFields {
        source: FieldPath::new("rehydrate.source"),
        dir: FieldPath::new("rehydrate.dir"),
    };

    pub fn normalize(&mut self, root: &Path) {
        if let Some(dir) = self.dir.take() {
            self.dir = Some(root.join(dir));
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        match (self.source, &self.dir) {
            (SpriteSourceKind::Local, None) => diag.error_with_hint(
                Self::FIELDS.dir,
                format!("{} is \"local\" but no directory is set", Self::FIELDS.source),
                format!("set {} to the theme checkout", Self::FIELDS.dir),
            ),
            (SpriteSourceKind::Local, Some(dir)) if !dir.is_dir() => diag.error(
                Self::FIELDS.dir,
                format!("`{}` is not a directory", dir.display()),
            ),
            (SpriteSourceKind::Http, Some(_)) => diag.warn(
                Self::FIELDS.dir,
                format!("ignored unless {} is \"local\"", Self::FIELDS.source),
            ),
            _ => {}
        }
    }
}
