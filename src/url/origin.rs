use url::Url;

/// Extracts the origin key (scheme + host) from a URL
///
/// The port and path are not part of the key, so every port on a host
/// shares one rate-limit slot. The host is lowercased.
///
/// # Arguments
///
/// * `url` - The URL to extract the origin from
///
/// # Returns
///
/// * `Some(String)` - The `scheme://host` origin
/// * `None` - If the URL has no host
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_scrape::url::origin_of;
///
/// let url = Url::parse("https://EXAMPLE.com:8443/path?q=1").unwrap();
/// assert_eq!(origin_of(&url), Some("https://example.com".to_string()));
/// ```
pub fn origin_of(url: &Url) -> Option<String> {
    url.host_str()
        .map(|host| format!("{}://{}", url.scheme(), host.to_lowercase()))
}

/// Derives the robots.txt location for a URL
///
/// The document lives at the root of the server that serves `url`, so an
/// explicit port is kept here even though it is dropped from the origin key.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_scrape::url::robots_url;
///
/// let url = Url::parse("https://example.com/a/b?c=d#e").unwrap();
/// assert_eq!(
///     robots_url(&url).unwrap().as_str(),
///     "https://example.com/robots.txt"
/// );
/// ```
pub fn robots_url(url: &Url) -> Option<Url> {
    url.host_str()?;
    url.join("/robots.txt").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_simple() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(origin_of(&url), Some("https://example.com".to_string()));
    }

    #[test]
    fn test_origin_ignores_path_and_query() {
        let a = Url::parse("https://example.com/one?x=1").unwrap();
        let b = Url::parse("https://example.com/two/three#frag").unwrap();
        assert_eq!(origin_of(&a), origin_of(&b));
    }

    #[test]
    fn test_origin_ignores_port() {
        let a = Url::parse("http://127.0.0.1:8080/").unwrap();
        let b = Url::parse("http://127.0.0.1:9090/").unwrap();
        assert_eq!(origin_of(&a), Some("http://127.0.0.1".to_string()));
        assert_eq!(origin_of(&a), origin_of(&b));
    }

    #[test]
    fn test_origin_distinguishes_scheme() {
        let a = Url::parse("http://example.com/").unwrap();
        let b = Url::parse("https://example.com/").unwrap();
        assert_ne!(origin_of(&a), origin_of(&b));
    }

    #[test]
    fn test_origin_distinguishes_subdomain() {
        let a = Url::parse("https://blog.example.com/").unwrap();
        let b = Url::parse("https://example.com/").unwrap();
        assert_ne!(origin_of(&a), origin_of(&b));
    }

    #[test]
    fn test_origin_without_host() {
        let url = Url::parse("mailto:someone@example.com").unwrap();
        assert_eq!(origin_of(&url), None);
    }

    #[test]
    fn test_robots_url_keeps_port() {
        let url = Url::parse("http://127.0.0.1:4000/deep/page.html").unwrap();
        assert_eq!(
            robots_url(&url).unwrap().as_str(),
            "http://127.0.0.1:4000/robots.txt"
        );
    }

    #[test]
    fn test_robots_url_without_host() {
        let url = Url::parse("data:text/plain,hello").unwrap();
        assert!(robots_url(&url).is_none());
    }
}
