//! Corpus-level properties of the grammar generator
//!
//! These tests build whole corpora from fixed seeds and check the invariants
//! any corpus must satisfy: the reference parser accepts every document,
//! generation is deterministic per seed, nesting respects the recursion
//! budget, and the small sentinel documents stay reachable.

use jsongrind_core::{Document, GrammarConfig, GrammarGenerator, ValueWeights};
use serde_json::Value;

fn corpus(config: GrammarConfig, seed: u64, count: usize) -> Vec<Document> {
    let mut generator = GrammarGenerator::new(config, seed).unwrap();
    (0..count).map(|_| generator.generate()).collect()
}

fn nesting_depth(value: &Value) -> usize {
    match value {
        Value::Array(items) => 1 + items.iter().map(nesting_depth).max().unwrap_or(0),
        Value::Object(fields) => 1 + fields.values().map(nesting_depth).max().unwrap_or(0),
        _ => 1,
    }
}

#[test]
fn every_document_parses() {
    for doc in corpus(GrammarConfig::default(), 0xBADC0FFE, 10_000) {
        let parsed: Result<Value, _> = serde_json::from_str(doc.as_str());
        assert!(parsed.is_ok(), "reference parser rejected: {doc}");
    }
}

#[test]
fn escape_heavy_profile_still_parses() {
    let config = GrammarConfig {
        escape_weight: 5,
        plain_char_weight: 5,
        string_max_chars: 24,
        ..GrammarConfig::default()
    };
    for doc in corpus(config, 0xE5CA9E, 5_000) {
        let parsed: Result<Value, _> = serde_json::from_str(doc.as_str());
        assert!(parsed.is_ok(), "escape-heavy document rejected: {doc}");
    }
}

#[test]
fn number_heavy_profile_still_parses() {
    let config = GrammarConfig {
        digit_continue: 0.9,
        value_weights: ValueWeights {
            number: 10,
            ..ValueWeights::default()
        },
        ..GrammarConfig::default()
    };
    for doc in corpus(config, 0x9e3779b97f4a7c15, 5_000) {
        let parsed: Result<Value, _> = serde_json::from_str(doc.as_str());
        assert!(parsed.is_ok(), "number-heavy document rejected: {doc}");
    }
}

#[test]
fn same_seed_reproduces_the_corpus() {
    let a = corpus(GrammarConfig::default(), 42, 1_000);
    let b = corpus(GrammarConfig::default(), 42, 1_000);
    assert_eq!(a, b);
}

#[test]
fn different_seeds_diverge() {
    let a = corpus(GrammarConfig::default(), 1, 50);
    let b = corpus(GrammarConfig::default(), 2, 50);
    assert_ne!(a, b);
}

#[test]
fn sentinel_documents_are_reachable() {
    let docs = corpus(GrammarConfig::default(), 0x5EED, 10_000);
    let trimmed: Vec<&str> = docs.iter().map(|d| d.as_str().trim()).collect();

    assert!(trimmed.contains(&"[]"), "empty array never surfaced");
    assert!(trimmed.contains(&"{}"), "empty object never surfaced");
    assert!(trimmed.contains(&"0"), "bare zero never surfaced");
    assert!(trimmed.contains(&"true"));
    assert!(trimmed.contains(&"null"));
}

#[test]
fn full_scalar_range_is_exercised() {
    let docs = corpus(GrammarConfig::default(), 0x1DEA, 5_000);
    let astral = docs
        .iter()
        .flat_map(|d| d.as_str().chars())
        .any(|c| c as u32 > 0xFFFF);
    assert!(astral, "no astral-plane character in 5000 documents");
}

#[test]
fn disabled_escapes_never_emit_backslash() {
    let config = GrammarConfig {
        escape_weight: 0,
        ..GrammarConfig::default()
    };
    for doc in corpus(config, 0xD15AB1ED, 5_000) {
        assert!(!doc.as_str().contains('\\'), "backslash leaked: {doc}");
    }
}

#[test]
fn nesting_never_exceeds_the_budget() {
    let config = GrammarConfig {
        max_fuel: 8,
        item_continue: 0.8,
        value_weights: ValueWeights {
            object: 5,
            array: 5,
            string: 1,
            number: 1,
            lit_true: 1,
            lit_false: 1,
            lit_null: 1,
        },
        ..GrammarConfig::default()
    };
    for doc in corpus(config, 0xDEE9, 2_000) {
        let parsed: Value = serde_json::from_str(doc.as_str()).unwrap();
        let depth = nesting_depth(&parsed);
        assert!(depth <= 8, "depth {depth} exceeds budget: {doc}");
    }
}

#[test]
fn zero_budget_documents_are_scalars() {
    let config = GrammarConfig {
        max_fuel: 0,
        ..GrammarConfig::default()
    };
    for doc in corpus(config, 0x0, 1_000) {
        let parsed: Value = serde_json::from_str(doc.as_str()).unwrap();
        assert!(
            !parsed.is_array() && !parsed.is_object(),
            "container at zero budget: {doc}"
        );
    }
}
