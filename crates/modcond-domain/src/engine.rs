use crate::error::EvalError;
use crate::formula::Formula;
use crate::matcher::{KeywordMatcher, PatternMatcher};
use crate::perceptual::HashDecoder;

/// Host capabilities a leaf may call into.
#[derive(Clone, Copy)]
pub struct Capabilities<'a> {
    pub matcher: &'a dyn PatternMatcher,
    pub decoder: &'a dyn HashDecoder,
}

impl<'a> Capabilities<'a> {
    pub fn new(matcher: &'a dyn PatternMatcher, decoder: &'a dyn HashDecoder) -> Self {
        Self { matcher, decoder }
    }
}

impl Capabilities<'static> {
    /// Keyword matcher plus the built-in perceptual hash decoder, if compiled in.
    pub fn standard() -> Self {
        #[cfg(feature = "blurhash")]
        let decoder: &'static dyn HashDecoder = &crate::perceptual::BlurhashDecoder;
        #[cfg(not(feature = "blurhash"))]
        let decoder: &'static dyn HashDecoder = &crate::perceptual::NoDecoder;

        Self {
            matcher: &KeywordMatcher,
            decoder,
        }
    }
}

impl Default for Capabilities<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for Capabilities<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities").finish_non_exhaustive()
    }
}

/// A dialect's leaf set evaluated against that dialect's facts.
pub trait Predicate<F> {
    fn test(&self, facts: &F, caps: &Capabilities<'_>) -> Result<bool, EvalError>;
}

/// Evaluate `formula` against `facts`.
///
/// Never fails: any error raised anywhere in the tree makes the whole formula
/// not match. The null formula never matches.
pub fn evaluate<L, F>(formula: &Formula<L>, facts: &F, caps: &Capabilities<'_>) -> bool
where
    L: Predicate<F>,
{
    match try_evaluate(formula, facts, caps) {
        Ok(matched) => matched,
        Err(err) => {
            tracing::debug!(error = %err, "formula evaluation failed, treating as no match");
            false
        }
    }
}

/// Like [`evaluate`], but reports the first error instead of swallowing it.
pub fn try_evaluate<L, F>(
    formula: &Formula<L>,
    facts: &F,
    caps: &Capabilities<'_>,
) -> Result<bool, EvalError>
where
    L: Predicate<F>,
{
    eval_node(formula, facts, caps)
}

fn eval_node<L, F>(formula: &Formula<L>, facts: &F, caps: &Capabilities<'_>) -> Result<bool, EvalError>
where
    L: Predicate<F>,
{
    match formula {
        Formula::Null => Ok(false),
        Formula::True => Ok(true),
        Formula::False => Ok(false),
        Formula::And(children) => {
            for child in children {
                if !eval_node(child, facts, caps)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        Formula::Or(children) => {
            for child in children {
                if eval_node(child, facts, caps)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        Formula::Not(inner) => Ok(!eval_node(inner, facts, caps)?),
        Formula::Leaf(leaf) => leaf.test(facts, caps),
        Formula::Unsupported(raw) => {
            tracing::trace!(node = %raw, "unsupported formula node");
            Ok(false)
        }
    }
}
