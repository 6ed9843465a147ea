//! Username entropy scoring.
//!
//! A string is reduced to a sequence of character classes and scored by summing
//! transition weights from a [`EntropyTable`]. The table arrives from host
//! configuration as an untyped document and must pass [`validate_table`] first.

use serde_json::Value;
use thiserror::Error;

/// Number of character classes: "other", digit, and `a`..=`z`.
pub const CLASS_COUNT: usize = 28;

/// Class keys in table order.
pub const CLASS_KEYS: [&str; CLASS_COUNT] = [
    "_", "0", "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q",
    "r", "s", "t", "u", "v", "w", "x", "y", "z",
];

const OTHER: usize = 0;
const DIGIT: usize = 1;

/// Why a document is not a usable entropy table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("entropy table must be an object")]
    NotAnObject,

    #[error("entropy table is missing row {0:?}")]
    MissingRow(&'static str),

    #[error("entropy table row {0:?} must be an object")]
    RowNotAnObject(&'static str),

    #[error("entropy table row {row:?} is missing column {col:?}")]
    MissingCell { row: &'static str, col: &'static str },

    #[error("entropy table cell {row:?}/{col:?} must be a number")]
    NotANumber { row: &'static str, col: &'static str },

    #[error("entropy table cell {row:?}/{col:?} must not be negative")]
    Negative { row: &'static str, col: &'static str },
}

/// A validated transition-weight table indexed `[previous][current]`.
#[derive(Clone, Debug, PartialEq)]
pub struct EntropyTable {
    cells: [[f64; CLASS_COUNT]; CLASS_COUNT],
}

impl EntropyTable {
    /// Table with every weight set to zero.
    pub fn zeroed() -> Self {
        Self {
            cells: [[0.0; CLASS_COUNT]; CLASS_COUNT],
        }
    }

    pub fn weight(&self, previous: usize, current: usize) -> f64 {
        self.cells[previous][current]
    }

    /// Set one cell by class key. Returns `false` when a key is unknown or the
    /// weight is negative.
    pub fn set(&mut self, previous: &str, current: &str, weight: f64) -> bool {
        match (class_index(previous), class_index(current)) {
            (Some(p), Some(c)) if weight >= 0.0 => {
                self.cells[p][c] = weight;
                true
            }
            _ => false,
        }
    }

    /// Document form accepted by [`validate_table`].
    pub fn to_value(&self) -> Value {
        let mut rows = serde_json::Map::new();
        for (p, row_key) in CLASS_KEYS.iter().enumerate() {
            let mut row = serde_json::Map::new();
            for (c, col_key) in CLASS_KEYS.iter().enumerate() {
                row.insert((*col_key).to_string(), Value::from(self.cells[p][c]));
            }
            rows.insert((*row_key).to_string(), Value::Object(row));
        }
        Value::Object(rows)
    }
}

/// Check that `value` has a non-negative number for every class pair.
///
/// Rows are checked in class order and the first violation is returned. Keys
/// outside the class set are ignored.
pub fn validate_table(value: &Value) -> Result<EntropyTable, TableError> {
    let rows = value.as_object().ok_or(TableError::NotAnObject)?;
    let mut table = EntropyTable::zeroed();

    for (p, row_key) in CLASS_KEYS.into_iter().enumerate() {
        let row = rows.get(row_key).ok_or(TableError::MissingRow(row_key))?;
        let row = row.as_object().ok_or(TableError::RowNotAnObject(row_key))?;

        for (c, col_key) in CLASS_KEYS.into_iter().enumerate() {
            let cell = row.get(col_key).ok_or(TableError::MissingCell {
                row: row_key,
                col: col_key,
            })?;
            let weight = cell.as_f64().ok_or(TableError::NotANumber {
                row: row_key,
                col: col_key,
            })?;
            if weight < 0.0 {
                return Err(TableError::Negative {
                    row: row_key,
                    col: col_key,
                });
            }
            table.cells[p][c] = weight;
        }
    }

    Ok(table)
}

/// Information score of `text` under `table`.
///
/// The text is lower-cased, runs of digits collapse to one digit class and runs
/// of anything outside `0-9a-z` collapse to one "other" class. Scoring starts
/// from "other" and ends with an implicit transition back to "other".
pub fn score(text: &str, table: &EntropyTable) -> f64 {
    let mut previous = OTHER;
    let mut total = 0.0;
    for current in classes(text) {
        total += table.weight(previous, current);
        previous = current;
    }
    total + table.weight(previous, OTHER)
}

/// Score divided by the number of characters in `text` (at least one).
pub fn mean_score(text: &str, table: &EntropyTable) -> f64 {
    score(text, table) / text.chars().count().max(1) as f64
}

fn class_index(key: &str) -> Option<usize> {
    CLASS_KEYS.iter().position(|k| *k == key)
}

fn classify(c: char) -> usize {
    match c {
        '0'..='9' => DIGIT,
        'a'..='z' => 2 + (c as usize - 'a' as usize),
        _ => OTHER,
    }
}

/// Normalized class sequence. Only digit runs and "other" runs collapse;
/// repeated letters are kept.
fn classes(text: &str) -> Vec<usize> {
    let mut out: Vec<usize> = Vec::with_capacity(text.len());
    for class in text.to_lowercase().chars().map(classify) {
        let collapses = (class == DIGIT || class == OTHER) && out.last() == Some(&class);
        if !collapses {
            out.push(class);
        }
    }
    out
}
