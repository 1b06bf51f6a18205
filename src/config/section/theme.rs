//! `[theme]` section configuration.
//!
//! ```toml
//! [theme]
//! url = "https://cdn.example.com/themes/base"
//! version = "2.3.0"
//!
//! [theme.child]
//! url = "https://cdn.example.com/themes/brand"
//! version = "1.0.4"
//! ```

use serde::{Deserialize, Serialize};

use crate::config::util::check_http_url;
use crate::config::{ConfigDiagnostics, FieldPath};
use crate::render::{AssetRoots, ThemeAssets};

/// Base theme, plus an optional child theme overriding it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSectionConfig {
    /// Public URL of the theme root directory.
    pub url: String,

    /// Appended to asset URLs as `?v=` for cache busting.
    pub version: String,

    pub child: Option<ThemeAssetsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeAssetsConfig {
    pub url: String,
    pub version: String,
}

pub struct ThemeFields {
    pub url: FieldPath,
    pub version: FieldPath,
    pub child_url: FieldPath,
}

impl ThemeSectionConfig {
    pub const FIELDS: ThemeFields = ThemeFields {
        url: FieldPath::new("theme.url"),
        version: FieldPath::new("theme.version"),
        child_url: FieldPath::new("theme.child.url"),
    };

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.url.is_empty() {
            diag.error_with_hint(
                Self::FIELDS.url,
                "theme asset URL is not configured",
                format!(
                    "set {}, e.g.: \"https://cdn.example.com/theme\"",
                    Self::FIELDS.url
                ),
            );
        } else {
            check_http_url(Self::FIELDS.url, &self.url, diag);
        }

        if self.version.is_empty() {
            diag.warn(
                Self::FIELDS.version,
                "empty version, asset URLs will not be cache-busted",
            );
        }

        if let Some(child) = &self.child {
            if child.url.is_empty() {
                diag.error(Self::FIELDS.child_url, "child theme URL is empty");
            } else {
                check_http_url(Self::FIELDS.child_url, &child.url, diag);
            }
        }
    }

    pub fn base(&self) -> ThemeAssets {
        ThemeAssets::new(&self.url, &self.version)
    }

    /// Asset roots for rendering; the child root is only set when configured.
    pub fn asset_roots(&self) -> AssetRoots {
        let roots = AssetRoots::new(self.base());
        match &self.child {
            Some(child) => roots.with_child(ThemeAssets::new(&child.url, &child.version)),
            None => roots,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ConfigDiagnostics, test_parse_config};
    use crate::render::Scope;

    #[test]
    fn test_theme_with_child() {
        let config = test_parse_config(
            "[theme.child]\nurl = \"https://cdn.example/brand/\"\nversion = \"1.0\"",
        );
        let roots = config.theme.asset_roots();
        assert_eq!(roots.resolve(Scope::Base).root(), "https://cdn.example/theme");
        assert_eq!(roots.resolve(Scope::Child).root(), "https://cdn.example/brand");
        assert_eq!(roots.resolve(Scope::Child).version, "1.0");
    }

    #[test]
    fn test_theme_child_falls_back_to_base() {
        let config = test_parse_config("");
        let roots = config.theme.asset_roots();
        assert_eq!(roots.resolve(Scope::Child).root(), "https://cdn.example/theme");
    }

    #[test]
    fn test_theme_missing_url() {
        let config: crate::config::IconkitConfig = toml::from_str("").unwrap();
        let mut diag = ConfigDiagnostics::new();
        config.theme.validate(&mut diag);
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].field.as_str(), "theme.url");
        assert_eq!(diag.warnings().len(), 1);
    }

    #[test]
    fn test_theme_invalid_child_url() {
        let config = test_parse_config("[theme.child]\nurl = \"brand\"");
        let mut diag = ConfigDiagnostics::new();
        config.theme.validate(&mut diag);
        assert_eq!(diag.errors()[0].field.as_str(), "theme.child.url");
    }
}
