//! The intent atom and its field-level validation
//!
//! An [`Intent`] can only be built from values that already passed the
//! checks in this module, so every instance satisfies the vocabulary and
//! range invariants without downstream re-checking.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::hsil::{DocField, ParseError};
use crate::intent::vocabulary::{Category, IntentType, Scope, Temporal, Vocabulary};

/// Intensity scalar, always within [0.0, 1.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Intensity(f64);

impl Intensity {
    pub const MIN: Intensity = Intensity(0.0);
    pub const MAX: Intensity = Intensity(1.0);

    /// Accept a value only if it is already in range
    pub fn new(value: f64) -> Option<Self> {
        (Self::MIN.0..=Self::MAX.0)
            .contains(&value)
            .then_some(Self(value))
    }

    /// Clamp into range; `None` only for NaN
    pub fn clamped(value: f64) -> Option<Self> {
        if value.is_nan() {
            None
        } else {
            Some(Self(value.clamp(Self::MIN.0, Self::MAX.0)))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Intensity {
    type Error = ParseError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.is_nan() {
            return Err(ParseError::NotNumeric {
                field: DocField::Intensity,
                value: value.to_string(),
            });
        }
        Self::new(value).ok_or(ParseError::OutOfRange {
            field: DocField::Intensity,
            value,
        })
    }
}

impl From<Intensity> for f64 {
    fn from(intensity: Intensity) -> Self {
        intensity.0
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single validated `{type, intensity, scope, temporal}` record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    #[serde(rename = "type")]
    pub intent_type: IntentType,
    pub intensity: Intensity,
    pub scope: Scope,
    pub temporal: Temporal,
}

impl Intent {
    /// Substituted by the lenient path for anything it cannot salvage
    pub const FALLBACK: Intent = Intent {
        intent_type: IntentType::E1Discover,
        intensity: Intensity(0.5),
        scope: Scope::Oneself,
        temporal: Temporal::ShortTerm,
    };

    pub fn new(
        intent_type: IntentType,
        intensity: f64,
        scope: Scope,
        temporal: Temporal,
    ) -> Result<Self, ParseError> {
        Ok(Self {
            intent_type,
            intensity: Intensity::try_from(intensity)?,
            scope,
            temporal,
        })
    }

    pub fn category(&self) -> Category {
        self.intent_type.category()
    }

    /// Replace one field, re-validating the new value
    ///
    /// `value` is HSIL field text (`"P2_Defend"`, `0.7`, quoted or not),
    /// checked exactly as the grammar parser checks it. The other three
    /// fields are carried over unchanged.
    pub fn with_field(&self, field: IntentField, value: &str) -> Result<Intent, ParseError> {
        let mut next = *self;
        match field {
            IntentField::Type => next.intent_type = parse_type(Some(value))?,
            IntentField::Intensity => next.intensity = parse_intensity(Some(value))?,
            IntentField::Scope => next.scope = parse_member(DocField::Scope, Some(value))?,
            IntentField::Temporal => {
                next.temporal = parse_member(DocField::Temporal, Some(value))?
            }
        }
        Ok(next)
    }

    /// One-line `(intent ...)` document that parses back to this atom
    pub fn to_hsil(&self) -> String {
        self.to_string()
    }

    /// Multi-line rendering with quoted scalars, for display
    pub fn to_hsil_pretty(&self) -> String {
        format!(
            "(intent\n  (type \"{}\")\n  (intensity {:.2})\n  (scope \"{}\")\n  (temporal \"{}\")\n)",
            self.intent_type,
            self.intensity.value(),
            self.scope,
            self.temporal
        )
    }
}

impl Default for Intent {
    fn default() -> Self {
        Self::FALLBACK
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(intent (type {}) (intensity {}) (scope {}) (temporal {}))",
            self.intent_type, self.intensity, self.scope, self.temporal
        )
    }
}

/// The four editable fields of an intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentField {
    Type,
    Intensity,
    Scope,
    Temporal,
}

impl Vocabulary for IntentField {
    const ALL: &'static [Self] = &[
        IntentField::Type,
        IntentField::Intensity,
        IntentField::Scope,
        IntentField::Temporal,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            IntentField::Type => "type",
            IntentField::Intensity => "intensity",
            IntentField::Scope => "scope",
            IntentField::Temporal => "temporal",
        }
    }
}

impl fmt::Display for IntentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strip one pair of surrounding double quotes, if present
pub(crate) fn unquote(raw: &str) -> &str {
    raw.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(raw)
        .trim()
}

pub(crate) fn parse_type(raw: Option<&str>) -> Result<IntentType, ParseError> {
    let raw = raw.map(unquote).filter(|s| !s.is_empty());
    let Some(raw) = raw else {
        return Err(ParseError::MissingField(DocField::Type));
    };
    IntentType::lookup(raw).ok_or_else(|| ParseError::InvalidEnumValue {
        field: DocField::Type,
        value: Some(raw.to_string()),
    })
}

pub(crate) fn parse_intensity(raw: Option<&str>) -> Result<Intensity, ParseError> {
    let raw = raw.map(unquote).filter(|s| !s.is_empty());
    let Some(raw) = raw else {
        return Err(ParseError::MissingField(DocField::Intensity));
    };
    let value: f64 = raw.parse().map_err(|_| ParseError::NotNumeric {
        field: DocField::Intensity,
        value: raw.to_string(),
    })?;
    Intensity::try_from(value)
}

/// Scope, temporal and mode: a missing value is reported as invalid
pub(crate) fn parse_member<T: Vocabulary>(
    field: DocField,
    raw: Option<&str>,
) -> Result<T, ParseError> {
    let raw = raw.map(unquote);
    raw.and_then(T::lookup)
        .ok_or_else(|| ParseError::InvalidEnumValue {
            field,
            value: raw.map(str::to_string),
        })
}
