//! Allowed hosts and CSRF trusted origins.

use serde::Serialize;

/// Host patterns the server answers for.
///
/// Pattern rules:
/// - `*` matches any host
/// - `.example.com` matches `example.com` and every subdomain
/// - anything else is an exact, case-insensitive match
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct AllowedHosts(Vec<String>);

impl AllowedHosts {
    pub fn new(hosts: Vec<String>) -> Self {
        Self(hosts.into_iter().map(|h| h.to_ascii_lowercase()).collect())
    }

    /// The production rule: the site hostname is the only allowed host.
    pub fn from_hostname(hostname: &str) -> Self {
        Self::new(vec![hostname.to_string()])
    }

    /// Parses a comma-separated list, skipping blank entries.
    pub fn from_csv(value: &str) -> Self {
        Self::new(split_csv(value))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks a `Host` header value (port and trailing dot ignored).
    pub fn matches(&self, host_header: &str) -> bool {
        let host = strip_port(host_header).trim_end_matches('.').to_ascii_lowercase();
        if host.is_empty() {
            return false;
        }
        self.0.iter().any(|pattern| host_matches(pattern, &host))
    }
}

fn host_matches(pattern: &str, host: &str) -> bool {
    if pattern == "*" {
        return true;
    }
    if let Some(domain) = pattern.strip_prefix('.') {
        return host == domain || host.ends_with(pattern);
    }
    pattern == host
}

/// Drops a trailing `:port`, leaving bracketed IPv6 literals intact.
///
/// Anything that is not `host`, `host:digits`, `[v6]` or `[v6]:digits` is
/// returned unchanged, so it cannot match a configured pattern.
pub fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) if is_port_suffix(&host[end + 1..]) => &host[..=end],
            _ => host,
        };
    }
    match host.rsplit_once(':') {
        Some((name, port)) if is_port(port) => name,
        _ => host,
    }
}

fn is_port(port: &str) -> bool {
    !port.is_empty() && port.chars().all(|c| c.is_ascii_digit())
}

/// Empty, or `:` followed by a port.
fn is_port_suffix(rest: &str) -> bool {
    match rest.strip_prefix(':') {
        Some(port) => is_port(port),
        None => rest.is_empty(),
    }
}

/// Origins trusted for unsafe (state-changing) requests.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct CsrfTrustedOrigins(Vec<String>);

impl CsrfTrustedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        Self(
            origins
                .into_iter()
                .map(|o| o.trim_end_matches('/').to_ascii_lowercase())
                .collect(),
        )
    }

    /// The production rule: the site hostname over HTTPS.
    pub fn from_hostname(hostname: &str) -> Self {
        Self::new(vec![format!("https://{}", hostname)])
    }

    pub fn from_csv(value: &str) -> Self {
        Self::new(split_csv(value))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, origin: &str) -> bool {
        let origin = origin.trim_end_matches('/').to_ascii_lowercase();
        self.0.iter().any(|o| *o == origin)
    }
}

fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hostname_derives_both_lists() {
        let hosts = AllowedHosts::from_hostname("toota.azurewebsites.net");
        let origins = CsrfTrustedOrigins::from_hostname("toota.azurewebsites.net");

        assert_eq!(hosts.as_slice(), ["toota.azurewebsites.net"]);
        assert_eq!(origins.as_slice(), ["https://toota.azurewebsites.net"]);
    }

    #[test]
    fn test_exact_match_ignores_port_and_case() {
        let hosts = AllowedHosts::from_hostname("Toota.example.com");
        assert!(hosts.matches("toota.example.com"));
        assert!(hosts.matches("TOOTA.example.com:443"));
        assert!(!hosts.matches("evil.example.com"));
        assert!(!hosts.matches(""));
    }

    #[test]
    fn test_leading_dot_matches_subdomains() {
        let hosts = AllowedHosts::new(vec![".example.com".into()]);
        assert!(hosts.matches("example.com"));
        assert!(hosts.matches("api.example.com"));
        assert!(!hosts.matches("notexample.com"));
    }

    #[test]
    fn test_wildcard_matches_anything() {
        let hosts = AllowedHosts::new(vec!["*".into()]);
        assert!(hosts.matches("whatever.test"));
    }

    #[test]
    fn test_ipv6_literal() {
        let hosts = AllowedHosts::from_csv("[::1], localhost");
        assert!(hosts.matches("[::1]:8000"));
        assert!(hosts.matches("localhost:8000"));
        assert_eq!(strip_port("[::1]"), "[::1]");

        assert!(!hosts.matches("[::1]evil.com"));
        assert!(!hosts.matches("[::1]:"));
        assert!(!hosts.matches("[::1]:80x"));
    }

    #[test]
    fn test_empty_port_does_not_match() {
        let hosts = AllowedHosts::from_hostname("site.test");
        assert!(!hosts.matches("site.test:"));
        assert!(!hosts.matches("site.test:abc"));
        assert!(hosts.matches("site.test:8443"));
    }

    #[test]
    fn test_csv_skips_blanks() {
        let hosts = AllowedHosts::from_csv("a.test, ,b.test,");
        assert_eq!(hosts.as_slice(), ["a.test", "b.test"]);
    }

    #[test]
    fn test_trusted_origin_lookup() {
        let origins = CsrfTrustedOrigins::from_csv("https://a.test/, http://localhost:3000");
        assert!(origins.contains("https://a.test"));
        assert!(origins.contains("HTTP://localhost:3000"));
        assert!(!origins.contains("http://a.test"));
    }
}
