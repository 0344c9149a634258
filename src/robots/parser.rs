//! Robots.txt parser implementation
//!
//! This module provides functionality for evaluating robots.txt content using the robotstxt crate.

use robotstxt::DefaultMatcher;

/// Blanket policy applied instead of parsed rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Blanket {
    AllowAll,
    DisallowAll,
}

/// Parsed robots.txt data
///
/// This is a wrapper around the robotstxt crate's matcher, providing a simplified
/// interface for checking if URLs are allowed.
#[derive(Debug, Clone)]
pub struct ParsedRobots {
    /// Raw robots.txt content
    content: String,
    /// Overrides the rules when set
    blanket: Option<Blanket>,
}

impl ParsedRobots {
    /// Creates a new ParsedRobots from raw robots.txt content
    ///
    /// # Arguments
    ///
    /// * `content` - The raw robots.txt file content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
            blanket: None,
        }
    }

    /// Creates a permissive ParsedRobots that allows everything
    ///
    /// Used when a site has no robots.txt.
    pub fn allow_all() -> Self {
        Self {
            content: String::new(),
            blanket: Some(Blanket::AllowAll),
        }
    }

    /// Creates a ParsedRobots that forbids everything
    ///
    /// Used when the robots.txt request is answered with 401 or 403.
    pub fn disallow_all() -> Self {
        Self {
            content: String::new(),
            blanket: Some(Blanket::DisallowAll),
        }
    }

    /// Checks if a URL is allowed for the given user agent
    ///
    /// # Arguments
    ///
    /// * `url` - The URL (or bare path, e.g. "/page.html") to check
    /// * `user_agent` - The user agent string; only its product token is matched
    ///
    /// # Returns
    ///
    /// * `true` - If the URL is allowed
    /// * `false` - If the URL is disallowed
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        match self.blanket {
            Some(Blanket::AllowAll) => return true,
            Some(Blanket::DisallowAll) => return false,
            None => {}
        }

        if self.content.trim().is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, product_token(user_agent), url)
    }
}

/// Extracts the product token robots.txt groups are matched against
///
/// `"Mozilla/5.0 (X11; Linux x86_64)"` becomes `"Mozilla"`.
pub fn product_token(user_agent: &str) -> &str {
    let trimmed = user_agent.trim();
    let end = trimmed
        .find(|c: char| c == '/' || c.is_whitespace())
        .unwrap_or(trimmed.len());
    &trimmed[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_all() {
        let robots = ParsedRobots::allow_all();
        assert!(robots.is_allowed("/any/path", "TestBot"));
        assert!(robots.is_allowed("/admin", "TestBot"));
    }

    #[test]
    fn test_disallow_all() {
        let robots = ParsedRobots::disallow_all();
        assert!(!robots.is_allowed("/", "TestBot"));
        assert!(!robots.is_allowed("https://example.com/page", "TestBot"));
    }

    #[test]
    fn test_parse_disallow_all() {
        let content = "User-agent: *\nDisallow: /";
        let robots = ParsedRobots::from_content(content);
        assert!(!robots.is_allowed("/", "TestBot"));
        assert!(!robots.is_allowed("/page", "TestBot"));
    }

    #[test]
    fn test_parse_disallow_specific() {
        let content = "User-agent: *\nDisallow: /admin";
        let robots = ParsedRobots::from_content(content);
        assert!(robots.is_allowed("/", "TestBot"));
        assert!(robots.is_allowed("/page", "TestBot"));
        assert!(!robots.is_allowed("/admin", "TestBot"));
        assert!(!robots.is_allowed("/admin/users", "TestBot"));
    }

    #[test]
    fn test_full_urls_are_matched_by_path() {
        let content = "User-agent: *\nDisallow: /private";
        let robots = ParsedRobots::from_content(content);
        assert!(robots.is_allowed("https://example.com/public", "TestBot"));
        assert!(!robots.is_allowed("https://example.com/private/doc", "TestBot"));
    }

    #[test]
    fn test_parse_allow_and_disallow() {
        let content = "User-agent: *\nDisallow: /private\nAllow: /private/public";
        let robots = ParsedRobots::from_content(content);
        assert!(robots.is_allowed("/", "TestBot"));
        assert!(!robots.is_allowed("/private", "TestBot"));
        assert!(robots.is_allowed("/private/public", "TestBot"));
    }

    #[test]
    fn test_parse_specific_user_agent() {
        let content = "User-agent: BadBot\nDisallow: /\n\nUser-agent: *\nAllow: /";
        let robots = ParsedRobots::from_content(content);
        assert!(robots.is_allowed("/page", "GoodBot"));
        assert!(!robots.is_allowed("/page", "BadBot"));
    }

    #[test]
    fn test_full_user_agent_matches_product_group() {
        let content = "User-agent: Mozilla\nDisallow: /\n\nUser-agent: *\nAllow: /";
        let robots = ParsedRobots::from_content(content);
        assert!(!robots.is_allowed(
            "/page",
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/114.0"
        ));
        assert!(robots.is_allowed("/page", "OtherBot/2.0"));
    }

    #[test]
    fn test_invalid_robots_txt() {
        let content = "This is not valid robots.txt {{{";
        let robots = ParsedRobots::from_content(content);
        assert!(robots.is_allowed("/any/path", "TestBot"));
    }

    #[test]
    fn test_empty_robots_txt() {
        let robots = ParsedRobots::from_content("");
        assert!(robots.is_allowed("/any/path", "TestBot"));
    }

    #[test]
    fn test_product_token() {
        assert_eq!(product_token("TestBot/1.0"), "TestBot");
        assert_eq!(product_token("Mozilla/5.0 (X11)"), "Mozilla");
        assert_eq!(product_token("  SimpleBot  "), "SimpleBot");
        assert_eq!(product_token("Spaced Bot"), "Spaced");
        assert_eq!(product_token(""), "");
    }
}
