//! Lookup input classification
//!
//! Distinguishes an IPv4 literal from a domain name before any network call
//! is made. Anything that is neither gets rejected up front.

use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;

use crate::TrackerError;

// Four dot-separated groups, each 0-255.
static IPV4_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$",
    )
    .expect("invalid IPv4 pattern")
});

// Labels of letters/digits/hyphens separated by dots, first character not a
// hyphen, final label 2-6 letters.
static DOMAIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9-]*([.-][a-z0-9]+)*\.[A-Za-z]{2,6}$")
        .expect("invalid domain pattern")
});

/// Classified lookup input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupTarget {
    /// A dotted-quad IPv4 literal
    Ipv4(String),
    /// A domain name
    Domain(String),
}

/// Classify a raw query string as an IPv4 literal or a domain name.
///
/// The IPv4 pattern is tried first, so "8.8.8.8" never falls through to the
/// domain branch. Returns a validation error for anything else; the caller
/// must not issue a network call in that case.
pub fn parse(input: &str) -> Result<LookupTarget> {
    let input = input.trim();

    if IPV4_PATTERN.is_match(input) {
        return Ok(LookupTarget::Ipv4(input.to_string()));
    }

    if DOMAIN_PATTERN.is_match(input) {
        return Ok(LookupTarget::Domain(input.to_string()));
    }

    Err(TrackerError::validation(format!("not an IP address or domain: '{input}'")).into())
}

impl LookupTarget {
    /// The raw query string this target was classified from
    #[must_use]
    pub fn query(&self) -> &str {
        match self {
            LookupTarget::Ipv4(s) | LookupTarget::Domain(s) => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("8.8.8.8")]
    #[case("0.0.0.0")]
    #[case("255.255.255.255")]
    #[case("192.168.0.1")]
    #[case("  8.8.4.4  ")]
    fn test_ipv4_literals(#[case] input: &str) {
        assert!(matches!(parse(input).unwrap(), LookupTarget::Ipv4(_)));
    }

    #[rstest]
    #[case("example.com")]
    #[case("sub.example.co.uk")]
    #[case("my-site.org")]
    #[case("a1.io")]
    fn test_domain_names(#[case] input: &str) {
        assert!(matches!(parse(input).unwrap(), LookupTarget::Domain(_)));
    }

    #[rstest]
    #[case("not an ip")]
    #[case("")]
    #[case("-bad.com")]
    #[case("localhost")]
    #[case("256.1.1.1")]
    #[case("1.2.3.999")]
    #[case("example.x")]
    #[case("example.toolongtld")]
    fn test_invalid_inputs(#[case] input: &str) {
        assert!(parse(input).is_err());
    }

    #[test]
    fn test_ipv4_wins_over_domain() {
        // "8.8.8.8" would never match the domain pattern anyway (numeric
        // final label), but the IPv4 branch must be evaluated first.
        let target = parse("8.8.8.8").unwrap();
        assert_eq!(target, LookupTarget::Ipv4("8.8.8.8".to_string()));
    }

    #[test]
    fn test_query_accessor() {
        assert_eq!(parse("example.com").unwrap().query(), "example.com");
        assert_eq!(parse("8.8.8.8").unwrap().query(), "8.8.8.8");
    }
}
