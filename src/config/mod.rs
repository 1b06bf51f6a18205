//! Configuration management for `iconkit.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [site], [theme], [theme.child], [rehydrate]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! ├── util.rs        # Config file lookup, URL checks
//! └── mod.rs         # IconkitConfig (this file)
//! ```
//!
//! The file is optional for commands that need no theme (`extract`, `title`);
//! `icon`, `img` and `rehydrate` refuse to run without it.

pub mod section;
pub mod types;
mod util;

pub use section::{RehydrateConfig, SiteSectionConfig, SpriteSourceKind, ThemeSectionConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use util::find_config_file;

use crate::cli::{Cli, Commands};
use crate::log;
use crate::render::AssetRoots;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing `iconkit.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IconkitConfig {
    /// Absolute path to the config file, empty when none was found
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub site: SiteSectionConfig,

    #[serde(default)]
    pub theme: ThemeSectionConfig,

    #[serde(default)]
    pub rehydrate: RehydrateConfig,
}

impl IconkitConfig {
    /// Load configuration for the given command line.
    ///
    /// Searches upward from cwd for the config file. CLI flags override file values.
    pub fn load(cli: &Cli) -> Result<Self> {
        let found = find_config_file(&cli.config);

        let mut config = match &found {
            Some(path) => Self::from_path(path)?,
            None if cli.needs_theme() => {
                return Err(ConfigError::NotFound(cli.config.clone()).into());
            }
            None => Self::default(),
        };

        if let Some(path) = found {
            let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
            config.rehydrate.normalize(&root);
            config.config_path = path;
        }

        config.apply_cli(cli);

        if cli.needs_theme() {
            config.validate(&cli.command)?;
        }
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load from a file, warning about unknown fields.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    fn apply_cli(&mut self, cli: &Cli) {
        crate::logger::set_verbose(cli.verbose);
        if cli.dev {
            self.site.dev = true;
        }
    }

    /// Renderer asset roots from `[theme]` and `[theme.child]`.
    pub fn asset_roots(&self) -> AssetRoots {
        self.theme.asset_roots()
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration for a command, reporting every problem at once.
    pub fn validate(&self, command: &Commands) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&mut diag);
        self.theme.validate(&mut diag);

        if let Commands::Rehydrate { .. } = command {
            if self.site.url.is_none() {
                diag.error_with_hint(
                    SiteSectionConfig::FIELDS.url,
                    "rehydration compares the site origin with the theme origin",
                    format!("set {}, e.g.: \"https://www.example.com\"", SiteSectionConfig::FIELDS.url),
                );
            }
            self.rehydrate.validate(&mut diag);
        }

        diag.print_warnings();
        diag.into_result().map_err(ConfigError::Diagnostics)
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config with a minimal `[theme]` section.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> IconkitConfig {
    let config =
        format!("[theme]\nurl = \"https://cdn.example/theme\"\nversion = \"2.3\"\n{extra}");
    let (parsed, ignored) = IconkitConfig::parse_with_ignored(&config).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
