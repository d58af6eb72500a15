//! Subscription link helpers
//!
//! Subscription URLs are the panel's `sub_url` base joined with a per-client
//! `sub_id`. Both sides arrive from operator input, so slash handling is
//! deliberately forgiving.

use rand::{Rng, distributions::Alphanumeric};

/// Length of a generated subscription id
pub const SUB_ID_LEN: usize = 16;

/// Build the full subscription URL for a client.
///
/// A `sub_id` that is already a fully-qualified `http(s)://` URL is returned
/// verbatim. Otherwise trailing slashes are stripped from the base and
/// leading slashes from the id, joining with exactly one `/`. An empty base
/// or id yields an empty string.
#[must_use]
pub fn build_sub_url(base: &str, sub_id: &str) -> String {
    if base.is_empty() || sub_id.is_empty() {
        return String::new();
    }
    if sub_id.starts_with("http://") || sub_id.starts_with("https://") {
        return sub_id.to_string();
    }

    let base = base.trim_end_matches('/');
    let sub_id = sub_id.trim_start_matches('/');
    format!("{base}/{sub_id}")
}

/// Generate a random 16-character alphanumeric subscription id
#[must_use]
pub fn generate_sub_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUB_ID_LEN)
        .map(char::from)
        .collect()
}

/// Strip leading and trailing slashes from an operator-supplied sub id.
///
/// Stray slashes would otherwise produce double slashes in the joined URL.
#[must_use]
pub fn sanitize_sub_id(sub_id: &str) -> String {
    sub_id.trim_matches('/').to_string()
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::uninlined_format_args)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("https://x.com", "abc", "https://x.com/abc")]
    #[case("https://x.com/", "abc", "https://x.com/abc")]
    #[case("https://x.com///", "//abc", "https://x.com/abc")]
    #[case("https://x.com", "/abc/def", "https://x.com/abc/def")]
    fn test_build_sub_url_joins_with_single_slash(
        #[case] base: &str,
        #[case] sub_id: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(build_sub_url(base, sub_id), expected);
    }

    #[test]
    fn test_build_sub_url_passes_through_full_urls() {
        assert_eq!(
            build_sub_url("https://x.com", "https://other.example/sub/xyz"),
            "https://other.example/sub/xyz"
        );
        assert_eq!(
            build_sub_url("https://x.com", "http://plain.example/abc"),
            "http://plain.example/abc"
        );
    }

    #[test]
    fn test_build_sub_url_empty_inputs() {
        assert_eq!(build_sub_url("", "abc"), "");
        assert_eq!(build_sub_url("https://x.com", ""), "");
        assert_eq!(build_sub_url("", ""), "");
    }

    #[test]
    fn test_generate_sub_id_shape() {
        for _ in 0..100 {
            let id = generate_sub_id();
            assert_eq!(id.len(), SUB_ID_LEN);
            assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
            assert!(!id.starts_with('/'));
            assert!(!id.ends_with('/'));
        }
    }

    #[test]
    fn test_generate_sub_id_varies() {
        let first = generate_sub_id();
        let second = generate_sub_id();
        // 62^16 possibilities; a collision here means the RNG is broken
        assert_ne!(first, second);
    }

    #[rstest]
    #[case("/abc/", "abc")]
    #[case("//abc//", "abc")]
    #[case("abc", "abc")]
    #[case("a/b", "a/b")]
    #[case("///", "")]
    fn test_sanitize_sub_id(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_sub_id(input), expected);
    }
}
