//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Connective laws (double negation, identities)
//! - Parsing and evaluating arbitrary documents without panicking
//! - Entropy scoring and perceptual distance

use crate::engine::{Capabilities, evaluate};
use crate::entropy::{self, EntropyTable, CLASS_KEYS};
use crate::facts::{NoteFacts, UserFacts};
use crate::formula::Formula;
use crate::matcher::KeywordMatcher;
use crate::model::{NoteRef, NoteSubject, RoleId};
use crate::note::NoteLeaf;
use crate::perceptual::{self, HashGrid};
use crate::policy::EngineConfig;
use crate::test_support::{FakeDecoder, file, mention, note, user};
use crate::user::UserLeaf;
use modcond_types::ids;
use proptest::prelude::*;
use serde_json::{Value, json};
use time::macros::datetime;

// ============================================================================
// Strategies
// ============================================================================

fn arb_leaf_doc() -> impl Strategy<Value = Value> {
    let fixed = prop::sample::select(vec![
        json!({ "type": "true" }),
        json!({ "type": "false" }),
        json!({}),
        json!({ "type": "unknownKind" }),
        json!({ "type": "hasText" }),
        json!({ "type": "isReply" }),
        json!({ "type": "hasFiles" }),
        json!({ "type": "hasMentions" }),
        json!({ "type": "roleAssignedOf", "roleId": "r1" }),
    ]);
    prop_oneof![
        fixed,
        (0u32..4).prop_map(|n| json!({ "type": "mentionCountIs", "value": n })),
        (0u32..4).prop_map(|n| json!({ "type": "fileCountLessThan", "value": n })),
        (0u64..5000).prop_map(|n| json!({ "type": "hasFileSizeLessThan", "size": n })),
        (0u64..5000).prop_map(|n| json!({ "type": "fileTotalSizeMoreThanOrEq", "size": n })),
        prop::sample::select(vec!["hello", "/h.l/i", "nope", "hel lo"])
            .prop_map(|p| json!({ "type": "textMatchOf", "pattern": p })),
    ]
}

fn arb_formula_doc() -> impl Strategy<Value = Value> {
    arb_leaf_doc().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4)
                .prop_map(|v| json!({ "type": "and", "values": v })),
            prop::collection::vec(inner.clone(), 0..4)
                .prop_map(|v| json!({ "type": "or", "values": v })),
            inner.prop_map(|v| json!({ "type": "not", "value": v })),
        ]
    })
}

fn arb_note() -> impl Strategy<Value = NoteSubject> {
    (
        prop::option::of(prop::sample::select(vec!["", "hello", "hello world", "bye"])),
        any::<bool>(),
        prop::option::of(prop::collection::vec(0u64..4096, 0..4)),
        prop::collection::vec(0u8..3, 0..4),
    )
        .prop_map(|(text, reply, sizes, mention_ids)| {
            let mut subject = note("u1");
            subject.text = text.map(str::to_string);
            subject.reply = reply.then(NoteRef::default);
            subject.files = sizes.map(|sizes| {
                sizes
                    .into_iter()
                    .map(|size| file(size, "image/png", None))
                    .collect()
            });
            subject.mentions = mention_ids
                .into_iter()
                .map(|id| mention(&id.to_string(), "someone", None))
                .collect();
            subject
        })
}

/// Arbitrary JSON biased toward formula-shaped objects.
fn arb_json() -> impl Strategy<Value = Value> {
    let kinds: Vec<&'static str> = ids::CONNECTIVE_KINDS
        .iter()
        .chain(ids::NOTE_LEAF_KINDS)
        .chain(ids::USER_LEAF_KINDS)
        .copied()
        .collect();
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z/ ]{0,8}".prop_map(Value::from),
        prop::sample::select(kinds).prop_map(Value::from),
    ];
    leaf.prop_recursive(4, 64, 6, |inner| {
        let keys = prop::sample::select(vec![
            "type", "values", "value", "pattern", "size", "hash", "diff", "roleId", "sec", "day",
        ]);
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
            prop::collection::btree_map(keys.prop_map(String::from), inner, 0..5)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn arb_table() -> impl Strategy<Value = EntropyTable> {
    prop::collection::vec(0.0f64..10.0, CLASS_KEYS.len() * CLASS_KEYS.len()).prop_map(|weights| {
        let mut table = EntropyTable::zeroed();
        for (i, w) in weights.into_iter().enumerate() {
            let p = CLASS_KEYS[i / CLASS_KEYS.len()];
            let c = CLASS_KEYS[i % CLASS_KEYS.len()];
            table.set(p, c, w);
        }
        table
    })
}

fn eval_note(doc: &Value, subject: &NoteSubject) -> bool {
    let config = EngineConfig::default();
    let decoder = FakeDecoder::default();
    let roles = [RoleId::from("r1")];
    let facts = NoteFacts::assemble(subject, &roles, &decoder, &config);
    let caps = Capabilities::new(&KeywordMatcher, &decoder);
    evaluate(&Formula::<NoteLeaf>::from_value(doc), &facts, &caps)
}

// ============================================================================
// Connective laws
// ============================================================================

proptest! {
    #[test]
    fn double_negation_is_identity(doc in arb_formula_doc(), subject in arb_note()) {
        let wrapped = json!({ "type": "not", "value": { "type": "not", "value": doc.clone() } });
        prop_assert_eq!(eval_note(&wrapped, &subject), eval_note(&doc, &subject));
    }

    #[test]
    fn single_child_connectives_are_transparent(doc in arb_formula_doc(), subject in arb_note()) {
        let expected = eval_note(&doc, &subject);
        let and = json!({ "type": "and", "values": [doc.clone(), { "type": "true" }] });
        let or = json!({ "type": "or", "values": [{ "type": "false" }, doc] });
        prop_assert_eq!(eval_note(&and, &subject), expected);
        prop_assert_eq!(eval_note(&or, &subject), expected);
    }

    #[test]
    fn empty_connectives_are_identities(subject in arb_note()) {
        let empty_and = eval_note(&json!({ "type": "and", "values": [] }), &subject);
        let empty_or = eval_note(&json!({ "type": "or", "values": [] }), &subject);
        let null = eval_note(&json!({}), &subject);
        prop_assert!(empty_and);
        prop_assert!(!empty_or);
        prop_assert!(!null);
    }

    #[test]
    fn false_child_decides_and(doc in arb_formula_doc(), subject in arb_note()) {
        let and = json!({ "type": "and", "values": [{ "type": "false" }, doc] });
        prop_assert!(!eval_note(&and, &subject));
    }
}

// ============================================================================
// Robustness
// ============================================================================

proptest! {
    #[test]
    fn arbitrary_documents_never_panic(doc in arb_json(), subject in arb_note()) {
        let _ = eval_note(&doc, &subject);

        let account = user("fuzzy");
        let decoder = FakeDecoder::default();
        let facts = UserFacts::assemble(&account, &[], datetime!(2024-01-01 00:00:00 UTC), None, &decoder);
        let caps = Capabilities::new(&KeywordMatcher, &decoder);
        let _ = evaluate(&Formula::<UserLeaf>::from_value(&doc), &facts, &caps);
    }

    #[test]
    fn reparsing_serialized_formula_is_stable(doc in arb_json()) {
        let parsed = Formula::<NoteLeaf>::from_value(&doc);
        let text = serde_json::to_value(&parsed).expect("formula serializes");
        prop_assert_eq!(Formula::<NoteLeaf>::from_value(&text), parsed);
    }

    #[test]
    fn depth_never_exceeds_node_count(doc in arb_formula_doc()) {
        let formula = Formula::<NoteLeaf>::from_value(&doc);
        prop_assert!(formula.depth() <= formula.node_count());
        prop_assert!(formula.unsupported_count() <= formula.node_count());
    }
}

// ============================================================================
// Entropy and perceptual distance
// ============================================================================

proptest! {
    #[test]
    fn entropy_is_deterministic_and_non_negative(text in "\\PC{0,24}", table in arb_table()) {
        let first = entropy::score(&text, &table);
        prop_assert_eq!(first.to_bits(), entropy::score(&text, &table).to_bits());
        prop_assert!(first >= 0.0);
    }

    #[test]
    fn digit_runs_score_as_one_digit(
        prefix in "[a-z_]{0,6}",
        digits in "[0-9]{1,6}",
        suffix in "[a-z_]{0,6}",
        table in arb_table(),
    ) {
        let long = format!("{prefix}{digits}{suffix}");
        let short = format!("{prefix}7{suffix}");
        prop_assert_eq!(entropy::score(&long, &table), entropy::score(&short, &table));
    }

    #[test]
    fn validated_tables_round_trip(table in arb_table()) {
        let parsed = entropy::validate_table(&table.to_value());
        prop_assert_eq!(parsed, Ok(table));
    }

    #[test]
    fn distance_is_symmetric(a in prop::collection::vec(any::<u8>(), 100), b in prop::collection::vec(any::<u8>(), 100)) {
        let (a, b) = (HashGrid::new(a), HashGrid::new(b));
        prop_assert_eq!(
            perceptual::distance(&a, &b).expect("equal lengths"),
            perceptual::distance(&b, &a).expect("equal lengths"),
        );
        prop_assert_eq!(perceptual::distance(&a, &a).expect("equal lengths"), 0);
    }
}
