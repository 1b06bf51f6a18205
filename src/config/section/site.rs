//! `[site]` section configuration.
//!
//! ```toml
//! [site]
//! url = "https://www.example.com"
//! dev = false
//! ```

use serde::{Deserialize, Serialize};

use crate::config::util::check_http_url;
use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Origin the pages are served from.
    pub url: Option<String>,

    /// Development installation; marks document titles.
    pub dev: bool,
}

pub struct SiteFields {
    pub url: FieldPath,
    pub dev: FieldPath,
}

impl SiteSectionConfig {
    pub const FIELDS: SiteFields = SiteFields {
        url: FieldPath::new("site.url"),
        dev: FieldPath::new("site.dev"),
    };

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Some(url) = &self.url {
            check_http_url(Self::FIELDS.url, url, diag);
        }
    }
}
