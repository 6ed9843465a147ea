//! Fuzz target for username entropy scoring.
//!
//! Goal: scoring any text against any valid table should **never panic** and
//! never produce a negative or NaN score.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_entropy_score
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use modcond_domain::entropy::{self, CLASS_KEYS, EntropyTable};

#[derive(Arbitrary, Debug)]
struct ScoreInput {
    text: String,
    /// Cell weights, cycled over the table.
    weights: Vec<u16>,
}

fuzz_target!(|input: ScoreInput| {
    if input.text.len() > 1024 || input.weights.is_empty() {
        return;
    }

    let mut table = EntropyTable::zeroed();
    let mut weights = input.weights.iter().cycle();
    for row in CLASS_KEYS {
        for col in CLASS_KEYS {
            let weight = weights.next().copied().unwrap_or(0);
            table.set(row, col, f64::from(weight) / 100.0);
        }
    }

    let total = entropy::score(&input.text, &table);
    let mean = entropy::mean_score(&input.text, &table);
    assert!(total >= 0.0 && !total.is_nan());
    assert!(mean >= 0.0 && mean <= total);
});
