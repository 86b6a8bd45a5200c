//! Domain name matching.

use crate::config::schema::ServerConfig;

/// Outcome of a successful host-name match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostMatch {
    /// The input equalled a configured pattern verbatim; carries that
    /// pattern.
    Exact(String),

    /// A wildcard-style segment match. Carries no pattern: callers rely on
    /// the absence to tell wildcard matches apart from exact ones.
    Wildcard,
}

/// Match a host name against a set of configured patterns.
///
/// Empty input never matches. Exact equality against any pattern wins
/// immediately. Otherwise a pattern is compared segment-wise, and only when
/// it has the same number of dot-separated segments as the input — a
/// three-label pattern never matches a four-label name. Within a segment,
/// `*` and the empty segment match anything.
pub fn match_host_name(patterns: &[String], name: &str) -> Option<HostMatch> {
    if name.is_empty() {
        return None;
    }
    let name_segments: Vec<&str> = name.split('.').collect();

    for pattern in patterns {
        if pattern.is_empty() {
            continue;
        }
        if pattern == name {
            return Some(HostMatch::Exact(pattern.clone()));
        }

        let pattern_segments: Vec<&str> = pattern.split('.').collect();
        if pattern_segments.len() != name_segments.len() {
            continue;
        }
        let matched = pattern_segments
            .iter()
            .zip(name_segments.iter())
            .all(|(p, n)| p == n || *p == "*" || p.is_empty());
        if matched {
            return Some(HostMatch::Wildcard);
        }
    }
    None
}

impl ServerConfig {
    /// Match an incoming host name against this server's configured name
    /// patterns.
    pub fn match_name(&self, name: &str) -> Option<HostMatch> {
        match_host_name(&self.name, name)
    }

    /// The first configured pattern containing no `*`, if any.
    pub fn first_name(&self) -> Option<&str> {
        self.name
            .iter()
            .find(|n| !n.contains('*'))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_exact_match_carries_the_pattern() {
        let names = patterns(&["www.example.com", "example.com"]);
        assert_eq!(
            match_host_name(&names, "example.com"),
            Some(HostMatch::Exact("example.com".to_string()))
        );
    }

    #[test]
    fn test_wildcard_match_withholds_the_pattern() {
        let names = patterns(&["*.example.com"]);
        assert_eq!(
            match_host_name(&names, "www.example.com"),
            Some(HostMatch::Wildcard)
        );
    }

    #[test]
    fn test_empty_segment_matches_any_single_segment() {
        let names = patterns(&[".example.com"]);
        assert_eq!(
            match_host_name(&names, "api.example.com"),
            Some(HostMatch::Wildcard)
        );
    }

    #[test]
    fn test_segment_count_must_agree() {
        let names = patterns(&["www.example.com"]);
        assert_eq!(match_host_name(&names, "example.com"), None);
        let wildcard = patterns(&["*.example.com"]);
        assert_eq!(match_host_name(&wildcard, "a.b.example.com"), None);
    }

    #[test]
    fn test_empty_input_never_matches() {
        let names = patterns(&["example.com", ""]);
        assert_eq!(match_host_name(&names, ""), None);
    }

    #[test]
    fn test_empty_pattern_is_skipped() {
        let names = patterns(&[""]);
        assert_eq!(match_host_name(&names, "example.com"), None);
    }

    #[test]
    fn test_first_name_skips_wildcards() {
        let mut server = ServerConfig::new();
        server.add_name("*.example.com");
        server.add_name("example.com");
        assert_eq!(server.first_name(), Some("example.com"));

        let mut all_wildcarded = ServerConfig::new();
        all_wildcarded.add_name("*.example.com");
        assert_eq!(all_wildcarded.first_name(), None);
    }
}
