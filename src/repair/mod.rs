//! Validate-and-repair for untrusted intent candidates
//!
//! The lenient path. A generator is asked for
//! `{"type", "intensity", "scope", "temporal"}` but may return anything;
//! [`repair`] turns whatever arrived into a valid [`Intent`] by replacing
//! each bad field with the fallback atom's value. It never fails.
//!
//! Repairs are not silent to callers that ask: [`repair_with_report`]
//! returns the same intent plus one [`RepairNote`] per correction, so a UI
//! can flag values that were not what the generator said.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit0, digit1, one_of},
    combinator::{opt, recognize},
    IResult, Parser,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::intent::{Intensity, Intent, IntentField, Vocabulary};

/// One correction made while repairing a candidate
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RepairNote {
    /// The candidate was not an object; the whole fallback atom was used
    NotARecord,
    /// A field was missing or invalid and took the fallback value
    Replaced {
        field: IntentField,
        found: Option<Value>,
    },
    /// Intensity arrived as text and was read as a number
    CoercedFromText { text: String, value: f64 },
    /// Intensity was numeric but outside [0.0, 1.0]
    Clamped { from: f64, to: f64 },
}

/// A repaired intent and what was changed to produce it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Repaired {
    pub intent: Intent,
    pub notes: Vec<RepairNote>,
}

impl Repaired {
    /// Whether the candidate needed any correction
    pub fn was_repaired(&self) -> bool {
        !self.notes.is_empty()
    }
}

/// Repair a candidate into a valid intent
pub fn repair(candidate: &Value) -> Intent {
    repair_with_report(candidate).intent
}

/// Repair a candidate, reporting each correction
///
/// Fields are repaired independently: a valid type survives an invalid
/// temporal. Unknown extra keys are ignored.
pub fn repair_with_report(candidate: &Value) -> Repaired {
    let Some(record) = candidate.as_object() else {
        tracing::warn!("Generator output is not a record, using fallback intent");
        return Repaired {
            intent: Intent::FALLBACK,
            notes: vec![RepairNote::NotARecord],
        };
    };

    let fallback = Intent::FALLBACK;
    let mut notes = Vec::new();

    let intent = Intent {
        intent_type: repair_member(record, IntentField::Type, fallback.intent_type, &mut notes),
        intensity: repair_intensity(record, &mut notes),
        scope: repair_member(record, IntentField::Scope, fallback.scope, &mut notes),
        temporal: repair_member(record, IntentField::Temporal, fallback.temporal, &mut notes),
    };

    if !notes.is_empty() {
        tracing::warn!("Repaired {} field(s) of generator output: {:?}", notes.len(), notes);
    }

    Repaired { intent, notes }
}

fn repair_member<T: Vocabulary>(
    record: &Map<String, Value>,
    field: IntentField,
    fallback: T,
    notes: &mut Vec<RepairNote>,
) -> T {
    let found = record.get(field.as_str());
    match found.and_then(Value::as_str).and_then(T::lookup) {
        Some(value) => value,
        None => {
            notes.push(RepairNote::Replaced {
                field,
                found: found.cloned(),
            });
            fallback
        }
    }
}

fn repair_intensity(record: &Map<String, Value>, notes: &mut Vec<RepairNote>) -> Intensity {
    let found = record.get(IntentField::Intensity.as_str());

    let number = match found {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(text)) => {
            let value = leading_float(text);
            if let Some(value) = value {
                notes.push(RepairNote::CoercedFromText {
                    text: text.clone(),
                    value,
                });
            }
            value
        }
        _ => None,
    };

    match number.and_then(Intensity::clamped) {
        Some(intensity) => {
            if let Some(from) = number.filter(|n| *n != intensity.value()) {
                notes.push(RepairNote::Clamped {
                    from,
                    to: intensity.value(),
                });
            }
            intensity
        }
        None => {
            notes.push(RepairNote::Replaced {
                field: IntentField::Intensity,
                found: found.cloned(),
            });
            Intent::FALLBACK.intensity
        }
    }
}

/// Numeric prefix of `text`, ignoring leading whitespace ("0.8 (high)" -> 0.8)
///
/// Reads like JavaScript's `parseFloat`: an incomplete exponent ends the
/// number ("1e" -> 1.0) and a leading `Infinity` is infinite.
fn leading_float(text: &str) -> Option<f64> {
    let parsed: IResult<&str, &str> = alt((infinity, decimal)).parse(text.trim_start());
    parsed.ok().and_then(|(_, digits)| digits.parse().ok())
}

fn infinity(input: &str) -> IResult<&str, &str> {
    recognize((opt(one_of("+-")), tag("Infinity"))).parse(input)
}

fn decimal(input: &str) -> IResult<&str, &str> {
    recognize((
        opt(one_of("+-")),
        alt((
            recognize((digit1, opt((char('.'), digit0)))),
            recognize((char('.'), digit1)),
        )),
        opt((one_of("eE"), opt(one_of("+-")), digit1)),
    ))
    .parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::{IntentType, Scope, Temporal};
    use serde_json::json;

    #[test]
    fn test_valid_candidate_untouched() {
        let candidate = json!({
            "type": "R4_Empathize",
            "intensity": 0.65,
            "scope": "Other",
            "temporal": "LongTerm"
        });
        let repaired = repair_with_report(&candidate);
        assert!(!repaired.was_repaired());
        assert_eq!(repaired.intent.intent_type, IntentType::R4Empathize);
        assert_eq!(repaired.intent.intensity.value(), 0.65);
        assert_eq!(repaired.intent.scope, Scope::Other);
        assert_eq!(repaired.intent.temporal, Temporal::LongTerm);
    }

    #[test]
    fn test_mixed_candidate_repaired_field_by_field() {
        let candidate = json!({
            "type": "bogus",
            "intensity": "abc",
            "scope": "Self",
            "temporal": "Forever"
        });
        assert_eq!(repair(&candidate), Intent::FALLBACK);

        let repaired = repair_with_report(&candidate);
        assert_eq!(repaired.notes.len(), 3);
        assert!(repaired.notes.contains(&RepairNote::Replaced {
            field: IntentField::Type,
            found: Some(json!("bogus")),
        }));
        assert!(!repaired
            .notes
            .iter()
            .any(|n| matches!(n, RepairNote::Replaced { field: IntentField::Scope, .. })));
    }

    #[test]
    fn test_partial_validity_preserved() {
        let candidate = json!({
            "type": "P4_Avoid",
            "intensity": 0.2,
            "scope": "Environment",
            "temporal": "Someday"
        });
        let intent = repair(&candidate);
        assert_eq!(intent.intent_type, IntentType::P4Avoid);
        assert_eq!(intent.scope, Scope::Environment);
        assert_eq!(intent.temporal, Temporal::ShortTerm);
    }

    #[test]
    fn test_non_records_use_fallback() {
        for candidate in [
            Value::Null,
            json!(42),
            json!("P2_Defend"),
            json!(true),
            json!(["P2_Defend", 0.9, "Self", "Immediate"]),
        ] {
            let repaired = repair_with_report(&candidate);
            assert_eq!(repaired.intent, Intent::FALLBACK);
            assert_eq!(repaired.notes, vec![RepairNote::NotARecord]);
        }
    }

    #[test]
    fn test_empty_record_uses_every_fallback() {
        let repaired = repair_with_report(&json!({}));
        assert_eq!(repaired.intent, Intent::FALLBACK);
        assert_eq!(repaired.notes.len(), 4);
    }

    #[test]
    fn test_intensity_clamped() {
        let high = repair_with_report(&json!({"type": "T1_Create", "intensity": 3.5}));
        assert_eq!(high.intent.intensity.value(), 1.0);
        assert!(high.notes.contains(&RepairNote::Clamped { from: 3.5, to: 1.0 }));

        let low = repair(&json!({"intensity": -0.4}));
        assert_eq!(low.intensity.value(), 0.0);
    }

    #[test]
    fn test_intensity_coerced_from_text() {
        let repaired = repair_with_report(&json!({"intensity": "0.7"}));
        assert_eq!(repaired.intent.intensity.value(), 0.7);
        assert!(repaired.notes.contains(&RepairNote::CoercedFromText {
            text: "0.7".into(),
            value: 0.7
        }));

        assert_eq!(repair(&json!({"intensity": " 0.8 (high)"})).intensity.value(), 0.8);
        assert_eq!(repair(&json!({"intensity": "12"})).intensity.value(), 1.0);
    }

    #[test]
    fn test_intensity_wrong_types_fall_back() {
        for bad in [json!(true), json!(null), json!([0.3]), json!({"v": 0.3}), json!("")] {
            let intent = repair(&json!({ "intensity": bad }));
            assert_eq!(intent.intensity.value(), 0.5);
        }
    }

    #[test]
    fn test_vocabulary_match_is_exact() {
        let intent = repair(&json!({"type": "p2_defend", "scope": "self", "temporal": 1}));
        assert_eq!(intent, Intent::FALLBACK);
    }

    #[test]
    fn test_extra_keys_ignored() {
        let candidate = json!({
            "type": "P2_Defend",
            "intensity": 0.9,
            "scope": "Self",
            "temporal": "Immediate",
            "reasoning": "the user sounds threatened"
        });
        assert!(!repair_with_report(&candidate).was_repaired());
    }

    #[test]
    fn test_leading_float() {
        assert_eq!(leading_float("0.25"), Some(0.25));
        assert_eq!(leading_float("  .5"), Some(0.5));
        assert_eq!(leading_float("-1e-2x"), Some(-0.01));
        assert_eq!(leading_float("abc"), None);
        assert_eq!(leading_float(""), None);
        assert_eq!(leading_float("."), None);
    }

    #[test]
    fn test_leading_float_incomplete_exponent() {
        assert_eq!(leading_float("0.8each"), Some(0.8));
        assert_eq!(leading_float("0.8e"), Some(0.8));
        assert_eq!(leading_float("1e"), Some(1.0));
        assert_eq!(leading_float("0.9E+"), Some(0.9));
        assert_eq!(leading_float("2E-1 or so"), Some(0.2));
        assert_eq!(leading_float("1."), Some(1.0));
    }

    #[test]
    fn test_leading_float_infinity() {
        assert_eq!(leading_float("Infinity"), Some(f64::INFINITY));
        assert_eq!(leading_float("+Infinity!"), Some(f64::INFINITY));
        assert_eq!(leading_float(" -Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(leading_float("infinity"), None);
    }

    #[test]
    fn test_text_intensity_read_like_parse_float() {
        for (text, expected) in [
            ("0.8e", 0.8),
            ("0.8each", 0.8),
            ("1e", 1.0),
            ("0.9E+", 0.9),
            ("Infinity", 1.0),
            ("-Infinity", 0.0),
        ] {
            let intent = repair(&json!({ "intensity": text }));
            assert_eq!(intent.intensity.value(), expected, "{:?}", text);
        }
    }
}
