//! String helpers.

/// Determine if `haystack` ends with any of the given needles.
///
/// Empty needles never match.
///
/// # Example
/// ```ignore
/// assert!(ends_with("sprite.svg", ["svg", "png"]));
/// assert!(!ends_with("sprite.svg", [""]));
/// ```
pub fn ends_with<I, S>(haystack: &str, needles: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    needles.into_iter().any(|needle| {
        let needle = needle.as_ref();
        !needle.is_empty() && haystack.ends_with(needle)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ends_with_single() {
        assert!(ends_with("jason", ["on"]));
        assert!(ends_with("jason", ["jason"]));
        assert!(!ends_with("jason", ["no"]));
        assert!(!ends_with("jason", ["JASON"]));
    }

    #[test]
    fn test_ends_with_any_of_many() {
        assert!(ends_with("jason", ["no", "on"]));
        assert!(!ends_with("jason", ["no", "xx"]));
        assert!(ends_with("sprite.svg", vec!["png".to_string(), "svg".to_string()]));
    }

    #[test]
    fn test_ends_with_empty() {
        assert!(!ends_with("jason", [""]));
        assert!(!ends_with("", [""]));
        assert!(!ends_with("jason", Vec::<&str>::new()));
        assert!(!ends_with("", ["a"]));
    }

    #[test]
    fn test_ends_with_multibyte() {
        assert!(ends_with("größe", ["ße"]));
        assert!(ends_with("🛠 title", ["title"]));
    }
}
