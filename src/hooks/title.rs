//! Document title filter.

/// Hammer and wrench, as an HTML character reference.
pub const DEV_MARKER: &str = "&#x1f6e0; ";

/// Prefix the title with [`DEV_MARKER`] on development installations.
pub fn dev_title(title: &str, is_dev: bool) -> String {
    if is_dev {
        format!("{DEV_MARKER}{title}")
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dev_title_marks_development() {
        assert_eq!(dev_title("Home | Site", true), "&#x1f6e0; Home | Site");
    }

    #[test]
    fn test_dev_title_production_unchanged() {
        assert_eq!(dev_title("Home | Site", false), "Home | Site");
        assert_eq!(dev_title("", false), "");
    }
}
