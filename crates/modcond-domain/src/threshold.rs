//! Numeric comparisons shared by the counting and sizing leaves.
//!
//! Thresholds come from JSON documents and may be any number, so every
//! comparison is carried out in `f64`.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Cmp {
    Eq,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Cmp {
    pub(crate) fn holds(self, actual: f64, threshold: f64) -> bool {
        match self {
            Cmp::Eq => actual == threshold,
            Cmp::Lt => actual < threshold,
            Cmp::Le => actual <= threshold,
            Cmp::Gt => actual > threshold,
            Cmp::Ge => actual >= threshold,
        }
    }
}

pub(crate) fn count(actual: usize, cmp: Cmp, threshold: f64) -> bool {
    cmp.holds(actual as f64, threshold)
}

pub(crate) fn amount(actual: u64, cmp: Cmp, threshold: f64) -> bool {
    cmp.holds(actual as f64, threshold)
}
