use glob::Pattern;
use url::Url;

/// Host pattern for narrowing a view to some request hosts
#[derive(Debug, Clone)]
pub enum HostPattern {
    /// Exact hostname match (case-insensitive)
    Exact(String),
    /// Glob pattern match (e.g., *.cdn.example.com)
    Glob(Pattern),
}

impl HostPattern {
    /// Parse a host pattern string.
    ///
    /// Patterns containing '*' or '?' are globs, anything else is an exact
    /// hostname. Both compare lowercased.
    pub fn parse(pattern: &str) -> crate::Result<Self> {
        let pattern_lower = pattern.trim().to_lowercase();
        if pattern_lower.is_empty() {
            return Err(crate::Error::InvalidPattern(
                "Empty host pattern".to_string(),
            ));
        }

        if pattern_lower.contains('*') || pattern_lower.contains('?') {
            let glob_pattern = Pattern::new(&pattern_lower).map_err(|e| {
                crate::Error::InvalidPattern(format!("Invalid glob pattern '{}': {}", pattern, e))
            })?;
            Ok(HostPattern::Glob(glob_pattern))
        } else {
            Ok(HostPattern::Exact(pattern_lower))
        }
    }

    /// Check if a hostname matches this pattern
    pub fn matches(&self, hostname: &str) -> bool {
        let hostname_lower = hostname.to_lowercase();
        match self {
            HostPattern::Exact(pattern) => &hostname_lower == pattern,
            HostPattern::Glob(pattern) => pattern.matches(&hostname_lower),
        }
    }

    /// Check the host of a request URL; URLs without a host never match
    pub fn matches_url(&self, url: &str) -> bool {
        match Url::parse(url) {
            Ok(parsed) => parsed.host_str().is_some_and(|host| self.matches(host)),
            Err(e) => {
                tracing::debug!("Failed to parse URL {}: {}", url, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let pattern = HostPattern::parse("cdn.example.com").unwrap();
        assert!(pattern.matches("cdn.example.com"));
        assert!(pattern.matches("CDN.EXAMPLE.COM"));
        assert!(!pattern.matches("www.example.com"));
        assert!(!pattern.matches("cdn.example.com.evil"));
    }

    #[test]
    fn test_glob_wildcard_prefix() {
        let pattern = HostPattern::parse("*.example.com").unwrap();
        assert!(pattern.matches("static.example.com"));
        assert!(pattern.matches("API.EXAMPLE.COM"));
        assert!(!pattern.matches("example.com"));
        assert!(!pattern.matches("static.other.com"));
    }

    #[test]
    fn test_glob_question_mark() {
        let pattern = HostPattern::parse("img?.example.com").unwrap();
        assert!(pattern.matches("img1.example.com"));
        assert!(!pattern.matches("img.example.com"));
        assert!(!pattern.matches("img12.example.com"));
    }

    #[test]
    fn test_matches_url() {
        let pattern = HostPattern::parse("fonts.gstatic.com").unwrap();
        assert!(pattern.matches_url("https://fonts.gstatic.com/s/roboto.woff2"));
        assert!(!pattern.matches_url("https://www.example.com/"));
        assert!(!pattern.matches_url("data:image/png;base64,AAAA"));
        assert!(!pattern.matches_url("not a url"));
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(HostPattern::parse("").is_err());
        assert!(HostPattern::parse("*[a-").is_err());
    }
}
