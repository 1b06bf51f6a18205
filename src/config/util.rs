//! Configuration utility functions.

use std::path::{Path, PathBuf};

use super::{ConfigDiagnostics, FieldPath};

/// Find the config file by searching upward from the current directory.
///
/// ```text
/// /srv/site/public/blog/   ← cwd
/// /srv/site/iconkit.toml   ← found
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_file_from(&cwd, config_name)
}

/// Walk up from `start` looking for `config_name`.
pub fn find_config_file_from(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }
        current = current.parent()?;
    }
}

/// Require an absolute `http`/`https` URL with a host.
pub fn check_http_url(field: FieldPath, url: &str, diag: &mut ConfigDiagnostics) {
    const HINT: &str = "use format like https://example.com";

    match url::Url::parse(url) {
        Ok(parsed) => {
            if !matches!(parsed.scheme(), "http" | "https") {
                diag.error_with_hint(
                    field,
                    format!(
                        "scheme '{}' not supported, must be http or https",
                        parsed.scheme()
                    ),
                    HINT,
                );
            }
            if parsed.host_str().is_none() {
                diag.error_with_hint(field, "URL must have a valid host", HINT);
            }
        }
        Err(e) => diag.error_with_hint(field, format!("invalid URL: {}", e), HINT),
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_find_config_file_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("public/blog/2024");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("iconkit.toml"), "").unwrap();

        let found = find_config_file_from(&nested, Path::new("iconkit.toml")).unwrap();
        assert_eq!(found, dir.path().join("iconkit.toml"));
    }

    #[test]
    fn test_find_config_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_config_file_from(dir.path(), Path::new("iconkit-missing.toml")).is_none());
    }

    #[test]
    fn test_find_config_file_absolute() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        assert!(find_config_file_from(Path::new("/"), &path).is_none());

        fs::write(&path, "").unwrap();
        assert_eq!(find_config_file_from(Path::new("/"), &path), Some(path));
    }

    #[test]
    fn test_check_http_url() {
        let field = FieldPath::new("site.url");
        let mut diag = ConfigDiagnostics::new();

        check_http_url(field, "https://example.com/blog", &mut diag);
        check_http_url(field, "http://localhost:8080", &mut diag);
        assert!(diag.is_empty());

        check_http_url(field, "ftp://example.com", &mut diag);
        check_http_url(field, "example.com", &mut diag);
        assert_eq!(diag.len(), 2);
    }
}
