//! Grammar parser integration tests
//!
//! Exercise `parse_document` through the public API: both document kinds,
//! every error kind, and the rendered forms parsing back.

use hsil::hsil::{parse_document, DocField, Document, ParseError};
use hsil::intent::{CompositeMode, Intent, IntentType, Scope, Temporal};

const DISCOVER: &str = "(intent (type E1_Discover) (intensity 0.5) (scope Self) (temporal ShortTerm))";
const DEFEND: &str = "(intent (type P2_Defend) (intensity 0.9) (scope Group) (temporal Immediate))";

#[test]
fn test_single_intent_document() {
    let doc = parse_document(DISCOVER).unwrap();
    assert_eq!(doc, Document::Single(Intent::FALLBACK));
}

#[test]
fn test_field_order_is_free() {
    let text = "(intent (temporal LongTerm) (scope Other) (intensity 0.25) (type R4_Empathize))";
    let Document::Single(intent) = parse_document(text).unwrap() else {
        panic!("expected a single intent");
    };
    assert_eq!(intent.intent_type, IntentType::R4Empathize);
    assert_eq!(intent.intensity.value(), 0.25);
    assert_eq!(intent.scope, Scope::Other);
    assert_eq!(intent.temporal, Temporal::LongTerm);
}

#[test]
fn test_surrounding_whitespace_trimmed() {
    let text = format!("\n\t  {}  \n", DISCOVER);
    assert!(parse_document(&text).is_ok());
}

#[test]
fn test_unrecognized_document() {
    assert_eq!(
        parse_document("not an hsil document"),
        Err(ParseError::UnrecognizedDocument)
    );
    assert_eq!(parse_document(""), Err(ParseError::UnrecognizedDocument));
    assert_eq!(
        parse_document("(intentional (type E1_Discover))"),
        Err(ParseError::UnrecognizedDocument)
    );
}

#[test]
fn test_missing_type() {
    let text = "(intent (intensity 0.5) (scope Self) (temporal ShortTerm))";
    assert_eq!(
        parse_document(text),
        Err(ParseError::MissingField(DocField::Type))
    );
}

#[test]
fn test_invalid_type() {
    let text = "(intent (type X9_Fly) (intensity 0.5) (scope Self) (temporal ShortTerm))";
    assert!(matches!(
        parse_document(text),
        Err(ParseError::InvalidEnumValue { field: DocField::Type, .. })
    ));
}

#[test]
fn test_intensity_errors() {
    let missing = "(intent (type E1_Discover) (scope Self) (temporal ShortTerm))";
    assert_eq!(
        parse_document(missing),
        Err(ParseError::MissingField(DocField::Intensity))
    );

    let text = "(intent (type E1_Discover) (intensity high) (scope Self) (temporal ShortTerm))";
    assert!(matches!(
        parse_document(text),
        Err(ParseError::NotNumeric { field: DocField::Intensity, .. })
    ));

    let high = "(intent (type E1_Discover) (intensity 1.01) (scope Self) (temporal ShortTerm))";
    assert!(matches!(
        parse_document(high),
        Err(ParseError::OutOfRange { field: DocField::Intensity, .. })
    ));
}

#[test]
fn test_intensity_bounds_inclusive() {
    for bound in ["0.0", "1.0", "0", "1"] {
        let text = format!(
            "(intent (type E1_Discover) (intensity {}) (scope Self) (temporal ShortTerm))",
            bound
        );
        assert!(parse_document(&text).is_ok(), "{} should be in range", bound);
    }
}

#[test]
fn test_scope_and_temporal_errors() {
    let no_scope = "(intent (type E1_Discover) (intensity 0.5) (temporal ShortTerm))";
    assert!(matches!(
        parse_document(no_scope),
        Err(ParseError::InvalidEnumValue { field: DocField::Scope, value: None })
    ));

    let bad_temporal = "(intent (type E1_Discover) (intensity 0.5) (scope Self) (temporal Forever))";
    assert!(matches!(
        parse_document(bad_temporal),
        Err(ParseError::InvalidEnumValue { field: DocField::Temporal, .. })
    ));
}

#[test]
fn test_composite_document() {
    let text = format!("(intent-composite (mode Conflict) {} {})", DEFEND, DISCOVER);
    let Document::Composite(composite) = parse_document(&text).unwrap() else {
        panic!("expected a composite");
    };
    assert_eq!(composite.mode(), CompositeMode::Conflict);
    assert_eq!(composite.intents().len(), 2);
    assert_eq!(composite.intents()[0].intent_type, IntentType::P2Defend);
    assert_eq!(composite.intents()[1], Intent::FALLBACK);
}

#[test]
fn test_composite_needs_two_intents() {
    let text = format!("(intent-composite (mode Dominant) {})", DISCOVER);
    assert_eq!(
        parse_document(&text),
        Err(ParseError::InsufficientIntents { found: 1 })
    );
}

#[test]
fn test_composite_bad_mode() {
    let text = format!("(intent-composite (mode Chaotic) {} {})", DEFEND, DISCOVER);
    assert!(matches!(
        parse_document(&text),
        Err(ParseError::InvalidEnumValue { field: DocField::Mode, .. })
    ));
}

#[test]
fn test_composite_member_error_propagates() {
    let bad = "(intent (type E1_Discover) (intensity 2.0) (scope Self) (temporal ShortTerm))";
    let text = format!("(intent-composite (mode Blended) {} {})", DEFEND, bad);
    assert!(matches!(
        parse_document(&text),
        Err(ParseError::OutOfRange { field: DocField::Intensity, .. })
    ));
}

#[test]
fn test_composite_rejects_nested_intents() {
    let nested = format!(
        "(intent-composite (mode Blended) {} (intent (type E1_Discover) {}))",
        DEFEND, DISCOVER
    );
    assert_eq!(parse_document(&nested), Err(ParseError::NestedIntent));
}

#[test]
fn test_composite_unbalanced() {
    let text = format!("(intent-composite (mode Blended) {} {}", DEFEND, DISCOVER);
    assert!(matches!(
        parse_document(&text),
        Err(ParseError::Malformed(_))
    ));
}

#[test]
fn test_rendered_forms_parse_back() {
    let intent = Intent::new(IntentType::T5Transition, 0.75, Scope::Environment, Temporal::LongTerm)
        .unwrap();

    assert_eq!(parse_document(&intent.to_hsil()), Ok(Document::Single(intent)));
    assert_eq!(
        parse_document(&intent.to_hsil_pretty()),
        Ok(Document::Single(intent))
    );

    let composite = format!("(intent-composite (mode Dominant) {} {})", intent, DEFEND);
    let doc = parse_document(&composite).unwrap();
    assert_eq!(parse_document(&doc.to_string()), Ok(doc));
}
