//! Static membership set of known disposable email domains.
//!
//! The list is embedded at compile time and parsed once on first use;
//! lookups are O(1) hash set membership checks.

use once_cell::sync::Lazy;
use std::collections::HashSet;

static DISPOSABLE_DOMAINS: Lazy<HashSet<String>> = Lazy::new(|| {
    include_str!("../data/disposable_domains.txt")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_ascii_lowercase)
        .collect()
});

/// Returns true when `domain` (already lowercased) is a known
/// disposable-mailbox provider.
pub(crate) fn is_disposable_domain(domain: &str) -> bool {
    DISPOSABLE_DOMAINS.contains(domain)
}

#[cfg(test)]
pub(crate) fn domain_count() -> usize {
    DISPOSABLE_DOMAINS.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_disposable_domains_are_present() {
        assert!(is_disposable_domain("mailinator.com"));
        assert!(is_disposable_domain("guerrillamail.com"));
        assert!(is_disposable_domain("yopmail.com"));
        assert!(is_disposable_domain("10minutemail.com"));
    }

    #[test]
    fn normal_providers_are_absent() {
        assert!(!is_disposable_domain("gmail.com"));
        assert!(!is_disposable_domain("outlook.com"));
        assert!(!is_disposable_domain("fastmail.com"));
    }

    #[test]
    fn comments_and_blanks_are_skipped() {
        assert!(!is_disposable_domain(""));
        assert!(!is_disposable_domain("# known disposable / throwaway email domains."));
        assert!(domain_count() > 400);
    }
}
