//! Fuzz target for keyword and regular-expression matching.
//!
//! Goal: the matcher should **never panic**. Invalid regular expressions and
//! unknown flags must come back as errors.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_keyword_matcher
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use modcond_domain::matcher::{KeywordMatcher, PatternMatcher};

#[derive(Arbitrary, Debug)]
struct MatchInput {
    text: String,
    patterns: Vec<String>,
}

fuzz_target!(|input: MatchInput| {
    if input.patterns.len() > 16 || input.text.len() > 4096 {
        return;
    }
    let patterns: Vec<String> = input
        .patterns
        .into_iter()
        .filter(|p| p.len() <= 256)
        .collect();

    let _ = KeywordMatcher.matches_any(&input.text, &patterns);
});
