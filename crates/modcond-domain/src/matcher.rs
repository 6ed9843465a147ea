//! Keyword and regular-expression matching used by the `...MatchOf` leaves.
//!
//! Pattern syntax:
//! - `/body/flags` is a regular expression. Flags: `i` (case-insensitive),
//!   `m` (multi-line), `s` (dot matches newline), `u` (accepted, always on),
//!   `g` and `y` (accepted, no effect on a containment test).
//! - anything else is a list of space-separated literal fragments; the pattern
//!   matches when every fragment is contained in the text (case-sensitive).

use crate::error::MatchError;
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

/// Capability: test a text against a list of patterns.
pub trait PatternMatcher {
    /// `true` when any pattern matches. Empty text or no patterns never match.
    fn matches_any(&self, text: &str, patterns: &[String]) -> Result<bool, MatchError>;
}

/// Pattern field of a leaf: a single pattern or a list of them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Patterns {
    One(String),
    Many(Vec<String>),
}

impl Patterns {
    pub fn as_slice(&self) -> &[String] {
        match self {
            Patterns::One(p) => std::slice::from_ref(p),
            Patterns::Many(ps) => ps,
        }
    }
}

impl From<&str> for Patterns {
    fn from(value: &str) -> Self {
        Patterns::One(value.to_string())
    }
}

/// `true` when any of `texts` matches any pattern.
pub fn any_text_matches<'t>(
    matcher: &dyn PatternMatcher,
    texts: impl IntoIterator<Item = &'t String>,
    patterns: &Patterns,
) -> Result<bool, MatchError> {
    for text in texts {
        if matcher.matches_any(text, patterns.as_slice())? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// The host's keyword matcher.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeywordMatcher;

impl PatternMatcher for KeywordMatcher {
    fn matches_any(&self, text: &str, patterns: &[String]) -> Result<bool, MatchError> {
        if patterns.is_empty() || text.is_empty() {
            return Ok(false);
        }

        for pattern in patterns {
            let matched = match split_regex(pattern) {
                Some((body, flags)) => regex_matches(pattern, body, flags, text)?,
                None => pattern.split(' ').all(|fragment| text.contains(fragment)),
            };
            if matched {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Split `/body/flags` at the last slash. The body must be non-empty and
/// neither part may span lines.
fn split_regex(pattern: &str) -> Option<(&str, &str)> {
    let rest = pattern.strip_prefix('/')?;
    let close = rest.rfind('/')?;
    let (body, flags) = (&rest[..close], &rest[close + 1..]);
    if body.is_empty() || body.contains('\n') || flags.contains('\n') {
        return None;
    }
    Some((body, flags))
}

fn regex_matches(pattern: &str, body: &str, flags: &str, text: &str) -> Result<bool, MatchError> {
    let mut builder = RegexBuilder::new(body);
    for flag in flags.chars() {
        match flag {
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            'u' | 'g' | 'y' => {}
            other => {
                return Err(MatchError::Flag {
                    pattern: pattern.to_string(),
                    flag: other,
                });
            }
        }
    }
    let re = builder.build().map_err(|source| MatchError::Regex {
        pattern: pattern.to_string(),
        source,
    })?;
    Ok(re.is_match(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(text: &str, patterns: &[&str]) -> Result<bool, MatchError> {
        let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        KeywordMatcher.matches_any(text, &patterns)
    }

    #[test]
    fn literal_is_case_sensitive_containment() {
        assert!(matches("hogetesthuge", &["test"]).unwrap());
        assert!(!matches("hogeTesthuge", &["test"]).unwrap());
    }

    #[test]
    fn spaces_require_every_fragment() {
        assert!(matches("hogeTesthuge", &["Test hoge"]).unwrap());
        assert!(!matches("hogeTesthuge", &["Test fuga"]).unwrap());
    }

    #[test]
    fn slashes_make_a_regex_with_flags() {
        assert!(matches("hogetesthuge", &["/Test/i"]).unwrap());
        assert!(!matches("hogetesthuge", &["/Test/"]).unwrap());
        assert!(matches("a\nb", &["/^b$/m"]).unwrap());
        assert!(matches("a\nb", &["/a.b/s"]).unwrap());
    }

    #[test]
    fn any_pattern_suffices() {
        assert!(matches("bar", &["foo", "bar"]).unwrap());
        assert!(!matches("baz", &["foo", "bar"]).unwrap());
    }

    #[test]
    fn empty_text_or_patterns_never_match() {
        assert!(!matches("", &["/.*/"]).unwrap());
        assert!(!matches("anything", &[]).unwrap());
    }

    #[test]
    fn malformed_regex_is_an_error() {
        let err = matches("text", &["/ [ /"]).unwrap_err();
        assert!(matches!(err, MatchError::Regex { .. }));

        let err = matches("text", &["/x/q"]).unwrap_err();
        assert!(matches!(err, MatchError::Flag { flag: 'q', .. }));
    }

    #[test]
    fn lone_slashes_are_literals() {
        assert!(matches("a // b", &["//"]).unwrap());
        assert!(matches("path/to", &["/to"]).unwrap());
    }

    #[test]
    fn patterns_accept_string_or_list() {
        let one: Patterns = serde_json::from_str(r#""foo""#).unwrap();
        let many: Patterns = serde_json::from_str(r#"["foo","bar"]"#).unwrap();
        assert_eq!(one.as_slice(), ["foo".to_string()]);
        assert_eq!(many.as_slice().len(), 2);
    }
}
