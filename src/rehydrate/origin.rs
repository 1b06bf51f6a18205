//! Page origin vs asset origin.

use url::Url;

/// Check whether two absolute URLs live on different hosts.
///
/// Only the host is compared; scheme and port are ignored.
pub fn is_cross_origin(page_url: &str, asset_url: &str) -> Result<bool, url::ParseError> {
    let page = Url::parse(page_url)?;
    let asset = Url::parse(asset_url)?;
    Ok(page.host_str() != asset.host_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_host() {
        assert!(!is_cross_origin("https://example.com/", "https://example.com/wp-content/themes/a").unwrap());
        // Scheme and port are not considered
        assert!(!is_cross_origin("http://example.com:8080", "https://example.com/theme").unwrap());
        // Host comparison is case-insensitive
        assert!(!is_cross_origin("https://Example.COM", "https://example.com").unwrap());
    }

    #[test]
    fn test_different_host() {
        assert!(is_cross_origin("https://example.com", "https://cdn.example.com/theme").unwrap());
        assert!(is_cross_origin("https://example.com", "https://example.org").unwrap());
    }

    #[test]
    fn test_invalid_url() {
        assert!(is_cross_origin("example.com", "https://example.com").is_err());
        assert!(is_cross_origin("https://example.com", "/theme").is_err());
    }
}
