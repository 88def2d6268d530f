//! Frame URL canonicalization.

/// Canonicalizes a frame URL or path: strips any query string and
/// fragment, then trims a single trailing slash.
///
/// Total function with no side effects.
pub fn parse_path(url: &str) -> String {
    let mut path = url;
    if let Some((head, _)) = path.split_once('?') {
        path = head;
    }
    if let Some((head, _)) = path.split_once('#') {
        path = head;
    }
    path.strip_suffix('/').unwrap_or(path).to_string()
}

#[cfg(test)]
mod tests {
    use super::parse_path;

    #[test]
    fn strips_query_and_fragment() {
        assert_eq!(
            parse_path("https://example.com/frame?foo=1#section"),
            "https://example.com/frame"
        );
    }

    #[test]
    fn trims_single_trailing_slash() {
        assert_eq!(parse_path("https://example.com/frame/"), "https://example.com/frame");
        assert_eq!(parse_path("/frame/sub"), "/frame/sub");
    }

    #[test]
    fn leaves_clean_urls_untouched() {
        assert_eq!(parse_path("https://example.com/frame"), "https://example.com/frame");
    }
}
