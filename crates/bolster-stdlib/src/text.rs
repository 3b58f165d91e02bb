//! Text predicates and strict numeric parsing
//!
//! `starts_with` and `contains` treat their argument as a regular
//! expression pattern rather than a literal substring, so metacharacters
//! change what matches. That behavior is deliberate compatibility with
//! the library this one descends from; use anchored literals if that is
//! what you need.

use once_cell::sync::Lazy;
use regex::Regex;

use bolster_core::{Error, Result};

static FLOAT_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(\.\d+)?$").expect("literal pattern"));
static INT_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("literal pattern"));

/// Whether `s` matches `prefix` anchored at the start, with `prefix`
/// interpreted as a regular expression pattern.
///
/// Fails with `InvalidArgument` when the pattern does not compile.
pub fn starts_with(s: &str, prefix: &str) -> Result<bool> {
    let re = compile(&format!("^{prefix}"), "starts_with")?;
    Ok(re.is_match(s))
}

/// Whether `s` ends with the literal suffix
pub fn ends_with(s: &str, suffix: &str) -> bool {
    s.ends_with(suffix)
}

/// Whether `s` matches `pattern` anywhere, with `pattern` interpreted as
/// a regular expression.
///
/// Fails with `InvalidArgument` when the pattern does not compile.
pub fn contains(s: &str, pattern: &str) -> Result<bool> {
    let re = compile(pattern, "contains")?;
    Ok(re.is_match(s))
}

/// New string with leading and trailing whitespace removed
pub fn strip(s: &str) -> String {
    s.trim().to_string()
}

/// `s` enclosed on both sides; an absent or empty enclosing string falls
/// back to a double quote
pub fn quote(s: &str, enclosing: Option<&str>) -> String {
    let enclosing = match enclosing {
        Some(e) if !e.is_empty() => e,
        _ => "\"",
    };
    format!("{enclosing}{s}{enclosing}")
}

/// Parse a float, accepting only unsigned decimal literals
/// (`digits`, optionally `.digits`); anything else — including negatives
/// and exponent notation — yields the `NaN` sentinel, never an error.
pub fn to_float(s: &str) -> f64 {
    if FLOAT_LITERAL.is_match(s) {
        s.parse().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

/// Parse an integer, accepting only unsigned digit runs; anything else
/// yields the `NaN` sentinel
pub fn to_integer(s: &str) -> f64 {
    if INT_LITERAL.is_match(s) {
        s.parse().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

fn compile(pattern: &str, what: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| Error::invalid_argument(format!("{what}: bad pattern: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_literal_prefixes() {
        assert!(starts_with("foobar", "foo").unwrap());
        assert!(!starts_with("foobar", "bar").unwrap());
        assert!(starts_with("anything", "").unwrap());
    }

    #[test]
    fn test_starts_with_is_pattern_based() {
        // Metacharacters act as a pattern, not a literal prefix.
        assert!(starts_with("xylophone", ".ylo").unwrap());
        assert!(starts_with("a1", r"[a-z]\d").unwrap());
        assert!(starts_with("foobar", "f.*r").unwrap());
    }

    #[test]
    fn test_ends_with_is_literal() {
        assert!(ends_with("foobar", "bar"));
        assert!(!ends_with("foobar", "foo"));
        assert!(!ends_with("foobar", ".ar"), "no pattern matching here");
        assert!(ends_with("anything", ""));
    }

    #[test]
    fn test_contains_is_pattern_based() {
        assert!(contains("foobar", "oba").unwrap());
        assert!(!contains("foobar", "xyz").unwrap());
        assert!(contains("foobar", "o+b").unwrap());
        assert!(contains("abc", ".").unwrap(), "dot matches anything");
    }

    #[test]
    fn test_uncompilable_patterns_are_invalid_argument() {
        assert!(starts_with("x", "(").unwrap_err().is_invalid_argument());
        assert!(contains("x", "[").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_strip() {
        assert_eq!(strip("  padded out \t\n"), "padded out");
        assert_eq!(strip("untouched"), "untouched");
        assert_eq!(strip(" \t "), "");
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("hi", None), "\"hi\"");
        assert_eq!(quote("hi", Some("*")), "*hi*");
        assert_eq!(quote("hi", Some("")), "\"hi\"", "empty encloser falls back");
    }

    #[test]
    fn test_to_float_strictness() {
        assert_eq!(to_float("1.234"), 1.234);
        assert_eq!(to_float("1234"), 1234.0);
        assert!(to_float("one").is_nan());
        assert!(to_float("-1.5").is_nan(), "negatives are rejected");
        assert!(to_float("1e3").is_nan(), "exponent notation is rejected");
        assert!(to_float("1.").is_nan());
        assert!(to_float("").is_nan());
    }

    #[test]
    fn test_to_integer_strictness() {
        assert_eq!(to_integer("1234"), 1234.0);
        assert!(to_integer("1.5").is_nan());
        assert!(to_integer("-2").is_nan());
        assert!(to_integer("12a").is_nan());
    }
}
