//! Grammar-driven JSON document generation
//!
//! Copyright (c) 2025 jsongrind Team
//! Licensed under the Apache-2.0 license
//!
//! This module implements a weighted random walk over the json.org grammar.
//! A [`GrammarGenerator`] owns a seeded RNG and a recursion budget; every
//! production takes the remaining budget along with the random source and
//! hands back the rendered fragment plus whatever budget is left. Each
//! `value` expansion consumes one unit of budget, and once the budget is
//! exhausted the value choice narrows to the non-recursive alternatives, so
//! generation always terminates and nesting depth never exceeds the budget.
//!
//! The same seed and configuration always reproduce the same document
//! sequence, which is what makes a failing run replayable.

pub mod config;
pub mod tokens;

pub use config::{GrammarConfig, ValueWeights};

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::document::Document;
use crate::error::{Error, Result};

/// The seven alternatives of the `value` production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Object,
    Array,
    String,
    Number,
    True,
    False,
    Null,
}

/// All `value` alternatives, in weight-table order.
pub(crate) const VALUE_KINDS: [ValueKind; 7] = [
    ValueKind::Object,
    ValueKind::Array,
    ValueKind::String,
    ValueKind::Number,
    ValueKind::True,
    ValueKind::False,
    ValueKind::Null,
];

/// The non-recursive alternatives, used once the budget is spent.
pub(crate) const LEAF_KINDS: [ValueKind; 5] = [
    ValueKind::String,
    ValueKind::Number,
    ValueKind::True,
    ValueKind::False,
    ValueKind::Null,
];

/// Longest digit run in an integer or fraction part.
const MAX_MANTISSA_DIGITS: usize = 200;

/// Longest digit run in an exponent part. Two digits cap the exponent
/// value at 99, which keeps any literal with `MAX_MANTISSA_DIGITS`
/// integer digits inside f64's finite range; the reference parser
/// rejects numbers past it.
const MAX_EXPONENT_DIGITS: usize = 2;

/// Seedable generator of grammar-valid JSON documents.
///
/// The generator is an infinite stream: [`GrammarGenerator::generate`] (or
/// the [`Iterator`] impl) yields one document per call, advancing the
/// internal RNG. Two generators built from the same configuration and seed
/// yield identical streams.
#[derive(Debug, Clone)]
pub struct GrammarGenerator {
    config: GrammarConfig,
    rng: SmallRng,
    full_table: WeightedIndex<u32>,
    leaf_table: WeightedIndex<u32>,
}

impl GrammarGenerator {
    /// Builds a generator from a validated profile and a seed.
    pub fn new(config: GrammarConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let full_table = WeightedIndex::new(
            VALUE_KINDS.iter().map(|k| config.value_weights.weight(*k)),
        )
        .map_err(|err| Error::config(format!("unusable value weights: {err}")))?;
        let leaf_table = WeightedIndex::new(
            LEAF_KINDS.iter().map(|k| config.value_weights.weight(*k)),
        )
        .map_err(|err| Error::config(format!("unusable leaf value weights: {err}")))?;
        Ok(Self {
            config,
            rng: SmallRng::seed_from_u64(seed),
            full_table,
            leaf_table,
        })
    }

    /// The profile this generator runs with.
    pub fn config(&self) -> &GrammarConfig {
        &self.config
    }

    /// Renders the next document in the stream.
    pub fn generate(&mut self) -> Document {
        let (text, _remaining) = self.element(self.config.max_fuel);
        tracing::trace!(chars = text.chars().count(), "generated document");
        Document::new(text)
    }

    /// `element := ws value ws`
    fn element(&mut self, fuel: u32) -> (String, u32) {
        let lead = self.whitespace();
        let (value, fuel) = self.value(fuel);
        let trail = self.whitespace();
        (format!("{lead}{value}{trail}"), fuel)
    }

    /// `value := object | array | string | number | "true" | "false" | "null"`
    ///
    /// Consumes one unit of budget; with none left the weighted choice runs
    /// over the leaf alternatives only.
    fn value(&mut self, fuel: u32) -> (String, u32) {
        let fuel = fuel.saturating_sub(1);
        let kind = if fuel == 0 {
            LEAF_KINDS[self.leaf_table.sample(&mut self.rng)]
        } else {
            VALUE_KINDS[self.full_table.sample(&mut self.rng)]
        };
        match kind {
            ValueKind::Object => self.object(fuel),
            ValueKind::Array => self.array(fuel),
            ValueKind::String => (self.string(), fuel),
            ValueKind::Number => (self.number(), fuel),
            ValueKind::True => ("true".to_string(), fuel),
            ValueKind::False => ("false".to_string(), fuel),
            ValueKind::Null => ("null".to_string(), fuel),
        }
    }

    /// `object := "{" (member ("," member)*)? "}"`
    fn object(&mut self, mut fuel: u32) -> (String, u32) {
        let mut out = String::from("{");
        let mut first = true;
        while fuel > 0 && self.rng.gen_bool(self.config.item_continue) {
            if !first {
                out.push(',');
            }
            let (member, rest) = self.member(fuel);
            fuel = rest;
            out.push_str(&member);
            first = false;
        }
        out.push('}');
        (out, fuel)
    }

    /// `member := ws string ws ":" element`
    fn member(&mut self, fuel: u32) -> (String, u32) {
        let lead = self.whitespace();
        let key = self.string();
        let mid = self.whitespace();
        let (element, fuel) = self.element(fuel);
        (format!("{lead}{key}{mid}:{element}"), fuel)
    }

    /// `array := "[" (element ("," element)*)? "]"`
    fn array(&mut self, mut fuel: u32) -> (String, u32) {
        let mut out = String::from("[");
        let mut first = true;
        while fuel > 0 && self.rng.gen_bool(self.config.item_continue) {
            if !first {
                out.push(',');
            }
            let (element, rest) = self.element(fuel);
            fuel = rest;
            out.push_str(&element);
            first = false;
        }
        out.push(']');
        (out, fuel)
    }

    /// `string := '"' character* '"'`
    ///
    /// Each character is either an unescaped scalar or an escape sequence,
    /// weighted by the configured char weights.
    fn string(&mut self) -> String {
        let mut out = String::from("\"");
        let count = self.rng.gen_range(0..=self.config.string_max_chars);
        let escape = u64::from(self.config.escape_weight);
        let total = escape + u64::from(self.config.plain_char_weight);
        for _ in 0..count {
            if self.rng.gen_range(0..total) < escape {
                out.push('\\');
                out.push_str(&tokens::escape_body(&mut self.rng));
            } else {
                out.push(tokens::plain_char(&mut self.rng));
            }
        }
        out.push('"');
        out
    }

    /// `number := integer fraction? exponent?`
    ///
    /// Digit runs are capped so every literal stays inside f64's finite
    /// range and the reference parser accepts it.
    fn number(&mut self) -> String {
        let mut out = self.integer();
        if self.rng.gen_bool(0.5) {
            out.push('.');
            out.push_str(&tokens::digit_run(
                &mut self.rng,
                self.config.digit_continue,
                MAX_MANTISSA_DIGITS,
            ));
        }
        if self.rng.gen_bool(0.5) {
            out.push(if self.rng.gen_bool(0.5) { 'e' } else { 'E' });
            out.push_str(tokens::sign(&mut self.rng));
            out.push_str(&tokens::digit_run(
                &mut self.rng,
                self.config.digit_continue,
                MAX_EXPONENT_DIGITS,
            ));
        }
        out
    }

    /// `integer := "-"? digit | "-"? onenine digit+`
    ///
    /// The single-digit form may produce a bare `0`; the multi-digit form
    /// starts with a nonzero digit so no number carries a leading zero.
    fn integer(&mut self) -> String {
        let mut out = String::new();
        if self.rng.gen_bool(0.5) {
            out.push('-');
        }
        if self.rng.gen_bool(0.5) {
            out.push(tokens::digit(&mut self.rng));
        } else {
            out.push(tokens::one_nine(&mut self.rng));
            out.push_str(&tokens::digit_run(
                &mut self.rng,
                self.config.digit_continue,
                MAX_MANTISSA_DIGITS,
            ));
        }
        out
    }

    /// `ws := ("" | " " | "\n" | "\r" | "\t")*`, capped by `ws_max` atoms.
    fn whitespace(&mut self) -> String {
        let count = self.rng.gen_range(0..=self.config.ws_max);
        let mut out = String::new();
        for _ in 0..count {
            out.push_str(tokens::whitespace_atom(&mut self.rng));
        }
        out
    }
}

impl Iterator for GrammarGenerator {
    type Item = Document;

    fn next(&mut self) -> Option<Document> {
        Some(self.generate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    const SEED: u64 = 0x6a736f6e;

    fn generator() -> GrammarGenerator {
        GrammarGenerator::new(GrammarConfig::default(), SEED).unwrap()
    }

    #[test]
    fn test_number_lexemes_match_grammar() {
        let shape =
            regex::Regex::new(r"^-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?$").unwrap();
        let mut generator = generator();
        for _ in 0..10_000 {
            let number = generator.number();
            assert!(shape.is_match(&number), "bad number lexeme: {number:?}");
        }
    }

    #[test]
    fn test_number_edge_forms_reachable() {
        let mut generator = generator();
        let numbers: Vec<String> = (0..10_000).map(|_| generator.number()).collect();
        let distinct: HashSet<&str> = numbers.iter().map(String::as_str).collect();

        assert!(distinct.contains("0"), "bare zero never generated");
        assert!(distinct.contains("-0"), "negative zero never generated");
        assert!(numbers.iter().any(|n| n.contains('.')));
        assert!(numbers.iter().any(|n| n.contains("e+") || n.contains("E+")));
        assert!(numbers.iter().any(|n| n.contains("e-") || n.contains("E-")));
    }

    #[test]
    fn test_number_literals_fit_in_f64() {
        let mut generator = generator();
        for _ in 0..20_000 {
            let number = generator.number();
            let parsed: f64 = serde_json::from_str(&number)
                .unwrap_or_else(|err| panic!("literal out of range: {number:?} ({err})"));
            assert!(parsed.is_finite(), "literal overflows f64: {number:?}");
        }
    }

    #[test]
    fn test_aggressive_digit_runs_stay_finite() {
        let config = GrammarConfig {
            digit_continue: 0.99,
            ..GrammarConfig::default()
        };
        let mut generator = GrammarGenerator::new(config, SEED).unwrap();
        for _ in 0..2_000 {
            let number = generator.number();
            let parsed: f64 = serde_json::from_str(&number)
                .unwrap_or_else(|err| panic!("literal out of range: {number:?} ({err})"));
            assert!(parsed.is_finite(), "literal overflows f64: {number:?}");
        }
    }

    #[test]
    fn test_string_literals_parse_standalone() {
        let mut generator = generator();
        for _ in 0..5_000 {
            let literal = generator.string();
            assert!(literal.starts_with('"') && literal.ends_with('"'));
            let parsed: std::result::Result<String, _> = serde_json::from_str(&literal);
            assert!(parsed.is_ok(), "unparseable string literal: {literal:?}");
        }
    }

    #[test]
    fn test_escape_weight_zero_emits_no_backslash() {
        let config = GrammarConfig {
            escape_weight: 0,
            ..GrammarConfig::default()
        };
        let mut generator = GrammarGenerator::new(config, SEED).unwrap();
        for _ in 0..2_000 {
            let literal = generator.string();
            assert!(!literal.contains('\\'), "escape leaked: {literal:?}");
        }
    }

    #[test]
    fn test_exhausted_budget_yields_leaf_values() {
        let mut generator = generator();
        for _ in 0..2_000 {
            let (fragment, remaining) = generator.value(1);
            assert_eq!(remaining, 0);
            assert!(!fragment.starts_with('['), "array at zero budget: {fragment:?}");
            assert!(!fragment.starts_with('{'), "object at zero budget: {fragment:?}");
        }
    }

    #[test]
    fn test_value_consumes_budget() {
        let mut generator = generator();
        for _ in 0..500 {
            let (_, remaining) = generator.value(10);
            assert!(remaining < 10);
        }
    }

    #[test]
    fn test_whitespace_uses_only_insignificant_atoms() {
        let mut generator = generator();
        for _ in 0..1_000 {
            let ws = generator.whitespace();
            assert!(ws.chars().all(|c| matches!(c, ' ' | '\n' | '\r' | '\t')));
        }
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = generator();
        let mut b = generator();
        for _ in 0..200 {
            assert_eq!(a.generate(), b.generate());
        }
    }

    #[test]
    fn test_invalid_profile_rejected_at_construction() {
        let config = GrammarConfig {
            value_weights: ValueWeights {
                string: 0,
                number: 0,
                lit_true: 0,
                lit_false: 0,
                lit_null: 0,
                ..ValueWeights::default()
            },
            ..GrammarConfig::default()
        };
        let err = GrammarGenerator::new(config, SEED).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
