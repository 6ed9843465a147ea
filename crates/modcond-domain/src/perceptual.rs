//! Perceptual-hash similarity.
//!
//! Decoding an encoded hash into samples is a host capability ([`HashDecoder`]);
//! this module only owns the distance between two decoded grids.

use crate::error::{DecodeError, EvalError};

/// Grid edge used when decoding hashes for comparison.
pub const GRID_SIZE: u32 = 5;

/// A decoded perceptual hash: fixed-length brightness samples.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashGrid(Vec<u8>);

impl HashGrid {
    pub fn new(samples: Vec<u8>) -> Self {
        Self(samples)
    }

    pub fn samples(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Capability: decode an encoded perceptual hash.
pub trait HashDecoder {
    fn decode(&self, hash: &str) -> Result<HashGrid, DecodeError>;
}

/// Sum of absolute per-sample differences between two grids of equal length.
pub fn distance(a: &HashGrid, b: &HashGrid) -> Result<u64, EvalError> {
    if a.len() != b.len() {
        return Err(EvalError::GridMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.samples()
        .iter()
        .zip(b.samples())
        .map(|(x, y)| u64::from(x.abs_diff(*y)))
        .sum())
}

/// `true` when any candidate lies within `diff` of `reference`.
///
/// Candidates whose grid length differs from the reference are not comparable
/// and are skipped.
pub fn any_within<'g>(
    candidates: impl IntoIterator<Item = &'g HashGrid>,
    reference: &HashGrid,
    diff: f64,
) -> bool {
    candidates
        .into_iter()
        .any(|grid| match distance(grid, reference) {
            Ok(d) => d as f64 <= diff,
            Err(err) => {
                tracing::trace!(error = %err, "skipping incomparable hash grid");
                false
            }
        })
}

/// Decode `reference` and test it against `candidates`.
///
/// A reference hash that fails to decode makes the leaf non-matching; it is
/// not an evaluation error.
pub fn likely_match<'g>(
    decoder: &dyn HashDecoder,
    reference: &str,
    candidates: impl IntoIterator<Item = &'g HashGrid>,
    diff: f64,
) -> bool {
    match decoder.decode(reference) {
        Ok(reference) => any_within(candidates, &reference, diff),
        Err(err) => {
            tracing::trace!(error = %err, "reference hash not decodable");
            false
        }
    }
}

/// Decoder backed by the `blurhash` crate, producing a 5×5 RGBA grid.
#[cfg(feature = "blurhash")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BlurhashDecoder;

#[cfg(feature = "blurhash")]
impl HashDecoder for BlurhashDecoder {
    fn decode(&self, hash: &str) -> Result<HashGrid, DecodeError> {
        ::blurhash::decode(hash, GRID_SIZE, GRID_SIZE, 1.0)
            .map(HashGrid::new)
            .map_err(|err| DecodeError::Malformed {
                hash: hash.to_string(),
                reason: format!("{err:?}"),
            })
    }
}

/// Decoder for hosts that do not compare images. Every hash fails to decode.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDecoder;

impl HashDecoder for NoDecoder {
    fn decode(&self, _hash: &str) -> Result<HashGrid, DecodeError> {
        Err(DecodeError::Unavailable)
    }
}
