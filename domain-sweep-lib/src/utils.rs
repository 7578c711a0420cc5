//! Domain syntax validation.
//!
//! Pure classification of raw input lines: a line either parses into a
//! syntactically plausible domain or it is rejected. Rejection is a normal
//! outcome, not an error: invalid and blank lines are dropped before they
//! ever reach the work queue.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Label-dot structure: one or more labels of alphanumerics/hyphens
    /// (1-63 chars, no leading/trailing hyphen), ending in a TLD of at
    /// least two alphabetic characters.
    static ref DOMAIN_PATTERN: Regex = Regex::new(
        r"^(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$"
    )
    .expect("domain pattern is a valid regex");
}

/// Check whether a trimmed string is a syntactically plausible domain.
///
/// This is a pure function with no hidden state: re-validating the same
/// input always yields the same answer.
pub fn is_valid_domain(domain: &str) -> bool {
    // Regex backtracking is linear here, but cap length anyway per RFC 1035.
    domain.len() <= 253 && DOMAIN_PATTERN.is_match(domain)
}

/// Classify one raw input line.
///
/// Strips surrounding whitespace, then applies the domain pattern. Returns
/// the cleaned domain for valid lines, `None` for blank or malformed ones.
pub fn parse_domain_line(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    if is_valid_domain(trimmed) {
        Some(trimmed)
    } else {
        None
    }
}
