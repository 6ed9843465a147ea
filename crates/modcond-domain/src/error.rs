//! Error types raised while evaluating a formula.
//!
//! None of these reach the host through [`crate::evaluate`]; they collapse to
//! "no match" at the public boundary. [`crate::try_evaluate`] exposes them for
//! diagnostics.

use thiserror::Error;

/// A pattern could not be interpreted by the keyword/regex matcher.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("invalid regular expression {pattern:?}: {source}")]
    Regex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("unsupported regular expression flag {flag:?} in {pattern:?}")]
    Flag { pattern: String, flag: char },
}

/// An encoded perceptual hash could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed perceptual hash {hash:?}: {reason}")]
    Malformed { hash: String, reason: String },

    #[error("no perceptual hash decoder is available")]
    Unavailable,
}

/// Failure of a sub-evaluator while walking a formula.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error(transparent)]
    Match(#[from] MatchError),

    #[error("perceptual hash grids differ in length: {left} vs {right}")]
    GridMismatch { left: usize, right: usize },

    #[error("total attached file size overflows")]
    SizeOverflow,
}
