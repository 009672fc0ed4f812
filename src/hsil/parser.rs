//! HSIL grammar parser
//!
//! Recognizes the two document forms:
//!
//! ```text
//! (intent (type <IntentType>) (intensity <float>) (scope <Scope>) (temporal <Temporal>))
//! (intent-composite (mode <Dominant|Blended|Conflict>) (intent ...) (intent ...) ...)
//! ```
//!
//! Field order inside a block is free. Values may be bare atoms or quoted
//! scalars. An `(intent ...)` block may not contain another intent block.
//! This is a grammar rule, enforced when reading composites.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::chain::resolver::{resolve_with, Resolution};
use crate::core::config::ResolverConfig;
use crate::hsil::extract::extract;
use crate::hsil::reader::{self, Node};
use crate::intent::atom::{parse_intensity, parse_member, parse_type};
use crate::intent::{CompositeMode, Intent, IntentField};

const INTENT_HEAD: &str = "intent";
const COMPOSITE_HEAD: &str = "intent-composite";

/// A composite must combine at least this many intents
pub const MIN_COMPOSITE_INTENTS: usize = 2;

/// Field named in a parse failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocField {
    Type,
    Intensity,
    Scope,
    Temporal,
    Mode,
}

impl From<IntentField> for DocField {
    fn from(field: IntentField) -> Self {
        match field {
            IntentField::Type => DocField::Type,
            IntentField::Intensity => DocField::Intensity,
            IntentField::Scope => DocField::Scope,
            IntentField::Temporal => DocField::Temporal,
        }
    }
}

impl fmt::Display for DocField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocField::Type => "type",
            DocField::Intensity => "intensity",
            DocField::Scope => "scope",
            DocField::Temporal => "temporal",
            DocField::Mode => "mode",
        };
        f.write_str(name)
    }
}

/// Why a strict-path document was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Missing field: {0}")]
    MissingField(DocField),

    #[error("Invalid {field}: {}", .value.as_deref().unwrap_or("<missing>"))]
    InvalidEnumValue {
        field: DocField,
        value: Option<String>,
    },

    #[error("{field} must be numeric, got {value}")]
    NotNumeric { field: DocField, value: String },

    #[error("{field} must be between 0.0 and 1.0, got {value}")]
    OutOfRange { field: DocField, value: f64 },

    #[error("Composite requires at least {} (intent ...) blocks, found {found}", MIN_COMPOSITE_INTENTS)]
    InsufficientIntents { found: usize },

    #[error("Intent blocks cannot be nested")]
    NestedIntent,

    #[error("Malformed document: {0}")]
    Malformed(String),

    #[error("HSIL document must begin with (intent ...) or (intent-composite ...)")]
    UnrecognizedDocument,
}

/// A parsed top-level HSIL document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Document {
    Single(Intent),
    Composite(CompositeDocument),
}

impl Document {
    /// The intents the document carries, in document order
    pub fn intents(&self) -> &[Intent] {
        match self {
            Document::Single(intent) => std::slice::from_ref(intent),
            Document::Composite(composite) => composite.intents(),
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Document::Single(intent) => fmt::Display::fmt(intent, f),
            Document::Composite(composite) => fmt::Display::fmt(composite, f),
        }
    }
}

/// Two or more intents under a declared mode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeDocument {
    mode: CompositeMode,
    intents: Vec<Intent>,
}

impl CompositeDocument {
    pub fn new(mode: CompositeMode, intents: Vec<Intent>) -> Result<Self, ParseError> {
        if intents.len() < MIN_COMPOSITE_INTENTS {
            return Err(ParseError::InsufficientIntents {
                found: intents.len(),
            });
        }
        Ok(Self { mode, intents })
    }

    pub fn mode(&self) -> CompositeMode {
        self.mode
    }

    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    /// Resolve the composite's intents as a chain, in document order
    pub fn resolve(&self, config: &ResolverConfig) -> Resolution {
        resolve_with(&self.intents, config)
    }
}

impl fmt::Display for CompositeDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} (mode {})", COMPOSITE_HEAD, self.mode)?;
        for intent in &self.intents {
            write!(f, " {}", intent)?;
        }
        write!(f, ")")
    }
}

/// Parse a top-level HSIL document
pub fn parse_document(text: &str) -> Result<Document, ParseError> {
    let text = text.trim();

    let result = if opens_with(text, INTENT_HEAD) {
        parse_intent(text).map(Document::Single)
    } else if opens_with(text, COMPOSITE_HEAD) {
        parse_composite(text).map(Document::Composite)
    } else {
        Err(ParseError::UnrecognizedDocument)
    };

    match &result {
        Ok(doc) => tracing::debug!("Parsed HSIL document with {} intent(s)", doc.intents().len()),
        Err(e) => tracing::debug!("Rejected HSIL document: {}", e),
    }
    result
}

/// `(head` followed by whitespace
fn opens_with(text: &str, head: &str) -> bool {
    text.strip_prefix('(')
        .and_then(|rest| rest.strip_prefix(head))
        .and_then(|rest| rest.chars().next())
        .is_some_and(char::is_whitespace)
}

/// Parse a single `(intent ...)` block
///
/// Checks run type, intensity, scope, temporal, and the first failure is
/// reported.
pub fn parse_intent(text: &str) -> Result<Intent, ParseError> {
    let intent_type = parse_type(extract("type", text))?;
    let intensity = parse_intensity(extract("intensity", text))?;
    let scope = parse_member(DocField::Scope, extract("scope", text))?;
    let temporal = parse_member(DocField::Temporal, extract("temporal", text))?;

    Ok(Intent {
        intent_type,
        intensity,
        scope,
        temporal,
    })
}

fn parse_composite(text: &str) -> Result<CompositeDocument, ParseError> {
    let mode = parse_member(DocField::Mode, extract("mode", text))?;

    let root = reader::read(text)?;
    let blocks = intent_blocks(&root)?;
    if blocks.len() < MIN_COMPOSITE_INTENTS {
        return Err(ParseError::InsufficientIntents {
            found: blocks.len(),
        });
    }

    let intents = blocks
        .into_iter()
        .map(parse_intent)
        .collect::<Result<Vec<_>, _>>()?;

    CompositeDocument::new(mode, intents)
}

/// Source text of each top-level `(intent ...)` child of a composite
fn intent_blocks<'a>(root: &Node<'a>) -> Result<Vec<&'a str>, ParseError> {
    let mut blocks = Vec::new();
    for child in root.children() {
        match child.head() {
            Some(INTENT_HEAD) => {
                if child.contains_intent_block() {
                    return Err(ParseError::NestedIntent);
                }
                if let Some(source) = child.source() {
                    blocks.push(source);
                }
            }
            Some(COMPOSITE_HEAD) => return Err(ParseError::NestedIntent),
            _ => {}
        }
    }
    Ok(blocks)
}
