//! Fuzz target for formula parsing and evaluation.
//!
//! Goal: parsing a stored document and evaluating it against either dialect
//! should **never panic**. Arbitrary documents may be unsupported or fail
//! closed, but the engine must always produce a verdict.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_formula_eval
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use modcond_domain::model::{NoteSubject, RoleId, UserSubject};
use modcond_domain::policy::EngineConfig;
use modcond_domain::{Capabilities, NoteFacts, NoteFormula, UserFacts, UserFormula, evaluate};
use time::OffsetDateTime;

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }
    let Ok(doc) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };

    let caps = Capabilities::standard();
    let config = EngineConfig::default();
    let roles = [RoleId::new("moderator")];

    let note = NoteSubject {
        user_id: "u1".to_string(),
        text: Some("hello #rust @alice".to_string()),
        hashtags: vec!["rust".to_string()],
        ..NoteSubject::default()
    };
    let formula = NoteFormula::from_value(&doc);
    if formula.depth() <= config.max_depth {
        let facts = NoteFacts::assemble(&note, &roles, caps.decoder, &config);
        let _ = evaluate(&formula, &facts, &caps);
    }

    let user: UserSubject = match serde_json::from_value(serde_json::json!({
        "id": "u1",
        "username": "alice_01",
        "createdAt": "2020-01-01T00:00:00Z"
    })) {
        Ok(user) => user,
        Err(_) => return,
    };
    let formula = UserFormula::from_value(&doc);
    if formula.depth() <= config.max_depth {
        let facts = UserFacts::assemble(&user, &roles, OffsetDateTime::UNIX_EPOCH, None, caps.decoder);
        let _ = evaluate(&formula, &facts, &caps);
    }
});
