//! Pure formula evaluation (no IO).
//!
//! Input: a formula tree parsed from the host's stored document, plus a fact
//! bundle assembled from the subject under inspection.
//! Output: a single boolean. `true` means the formula matched.

#![forbid(unsafe_code)]

pub mod entropy;
pub mod error;
pub mod facts;
pub mod formula;
pub mod matcher;
pub mod model;
pub mod note;
pub mod perceptual;
pub mod policy;
pub mod user;

mod engine;
mod threshold;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use engine::{Capabilities, Predicate, evaluate, try_evaluate};
pub use error::EvalError;
pub use facts::{NoteFacts, UserFacts};
pub use formula::{Formula, Leaf};
pub use note::NoteLeaf;
pub use policy::EngineConfig;
pub use user::UserLeaf;

pub type NoteFormula = Formula<NoteLeaf>;
pub type UserFormula = Formula<UserLeaf>;
