//! Tunable knobs for the grammar generator
//!
//! Every field has a default that yields moderate documents, so a plain
//! `GrammarConfig::default()` is a working profile. The struct deserializes
//! from the `[grammar]` table of a config file with the same defaults
//! applied to missing fields.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::grammar::ValueKind;

/// Relative weights for the seven `value` alternatives.
///
/// Weights are relative, not percentages; a zero removes the alternative
/// entirely. At exhausted recursion budget the object and array weights are
/// ignored and the choice narrows to the five leaf alternatives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValueWeights {
    pub object: u32,
    pub array: u32,
    pub string: u32,
    pub number: u32,
    #[serde(rename = "true")]
    pub lit_true: u32,
    #[serde(rename = "false")]
    pub lit_false: u32,
    #[serde(rename = "null")]
    pub lit_null: u32,
}

impl Default for ValueWeights {
    fn default() -> Self {
        Self {
            object: 2,
            array: 2,
            string: 3,
            number: 4,
            lit_true: 1,
            lit_false: 1,
            lit_null: 1,
        }
    }
}

impl ValueWeights {
    /// The weight configured for one production alternative.
    pub fn weight(&self, kind: ValueKind) -> u32 {
        match kind {
            ValueKind::Object => self.object,
            ValueKind::Array => self.array,
            ValueKind::String => self.string,
            ValueKind::Number => self.number,
            ValueKind::True => self.lit_true,
            ValueKind::False => self.lit_false,
            ValueKind::Null => self.lit_null,
        }
    }
}

/// Shape parameters for generated documents.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GrammarConfig {
    /// Recursion budget per document. Each `value` expansion consumes one
    /// unit, so nesting depth and total value count never exceed this.
    ///
    /// Budgets past ~128 can produce documents deeper than serde_json's
    /// default nesting limit, which matters when reference validation is on.
    pub max_fuel: u32,

    /// Relative weights for the `value` alternatives.
    pub value_weights: ValueWeights,

    /// Weight of picking an escape sequence for a string character.
    /// Zero disables escapes and every character is drawn plain.
    pub escape_weight: u32,

    /// Weight of picking an unescaped character for a string character.
    pub plain_char_weight: u32,

    /// Probability of appending another element or member while the
    /// recursion budget lasts.
    pub item_continue: f64,

    /// Most whitespace atoms emitted per padding site. Atoms include the
    /// empty string, so sites often render shorter than this.
    pub ws_max: u32,

    /// Most characters in a generated string body.
    pub string_max_chars: u32,

    /// Probability of extending a digit run past its mandatory first digit.
    pub digit_continue: f64,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            max_fuel: 48,
            value_weights: ValueWeights::default(),
            escape_weight: 1,
            plain_char_weight: 9,
            item_continue: 0.4,
            ws_max: 2,
            string_max_chars: 12,
            digit_continue: 0.3,
        }
    }
}

impl GrammarConfig {
    /// Checks the profile for combinations the generator cannot run with.
    pub fn validate(&self) -> Result<()> {
        let w = &self.value_weights;
        let leaf_total = u64::from(w.string)
            + u64::from(w.number)
            + u64::from(w.lit_true)
            + u64::from(w.lit_false)
            + u64::from(w.lit_null);
        if leaf_total == 0 {
            return Err(Error::config(
                "value weights leave no leaf alternative; string, number, true, false and null cannot all be zero",
            ));
        }
        // the sampling tables accumulate weights in u32
        if leaf_total + u64::from(w.object) + u64::from(w.array) > u64::from(u32::MAX) {
            return Err(Error::config("value weights must sum to at most u32::MAX"));
        }
        if self.escape_weight == 0 && self.plain_char_weight == 0 {
            return Err(Error::config(
                "escape_weight and plain_char_weight cannot both be zero",
            ));
        }
        for (name, p) in [
            ("item_continue", self.item_continue),
            ("digit_continue", self.digit_continue),
        ] {
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(Error::config(format!(
                    "{name} must be a probability in [0, 1], got {p}"
                )));
            }
        }
        // digit runs have no budget gating them, so certainty of another
        // digit would never terminate
        if self.digit_continue >= 1.0 {
            return Err(Error::config("digit_continue must be below 1.0"));
        }
        Ok(())
    }
}
