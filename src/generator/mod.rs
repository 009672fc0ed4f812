//! Statement encoding through an injected generator
//!
//! The generator is an external collaborator that turns a natural-language
//! statement into a candidate `{type, intensity, scope, temporal}` object.
//! It may be absent, may fail, and may return garbage; [`encode_statement`]
//! always produces a valid intent regardless.

pub mod recorded;

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::core::config::GeneratorConfig;
use crate::core::error::Result;
use crate::intent::Intent;
use crate::repair::{repair_with_report, RepairNote};

pub use recorded::{extract_candidate, RecordedGenerator};

/// Produces a candidate intent object for a statement
///
/// `Ok(None)` means the generator had nothing to say.
pub trait Generator: Send + Sync {
    fn generate(&self, statement: &str) -> Result<Option<Value>>;
}

impl<F> Generator for F
where
    F: Fn(&str) -> Result<Option<Value>> + Send + Sync,
{
    fn generate(&self, statement: &str) -> Result<Option<Value>> {
        self(statement)
    }
}

/// A generator that may have failed to initialize
pub enum IntentGenerator {
    Available(Box<dyn Generator>),
    Unavailable { reason: String },
}

impl IntentGenerator {
    pub fn available(generator: impl Generator + 'static) -> Self {
        Self::Available(Box::new(generator))
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Build the generator named by config
    ///
    /// A recorded-replies file that cannot be loaded leaves the generator
    /// unavailable rather than failing the caller.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        let Some(path) = &config.recorded else {
            return Self::unavailable("no generator configured");
        };
        match RecordedGenerator::load(path) {
            Ok(recorded) => {
                tracing::info!("Loaded {} recorded replies from {:?}", recorded.len(), path);
                Self::available(recorded)
            }
            Err(e) => {
                tracing::warn!("Generator unavailable: {}", e);
                Self::unavailable(e.to_string())
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

impl fmt::Debug for IntentGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available(_) => f.write_str("Available"),
            Self::Unavailable { reason } => {
                f.debug_struct("Unavailable").field("reason", reason).finish()
            }
        }
    }
}

/// Where an encoded intent came from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum EncodingOrigin {
    /// Generator output, possibly repaired
    Generated,
    /// The fallback atom, because the generator produced nothing usable
    Fallback { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Encoding {
    pub intent: Intent,
    #[serde(flatten)]
    pub origin: EncodingOrigin,
    /// Corrections made to the generator's candidate
    pub notes: Vec<RepairNote>,
}

impl Encoding {
    fn fallback(reason: impl Into<String>) -> Self {
        Self {
            intent: Intent::FALLBACK,
            origin: EncodingOrigin::Fallback {
                reason: reason.into(),
            },
            notes: Vec::new(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, EncodingOrigin::Fallback { .. })
    }
}

/// Encode one statement; never fails
pub fn encode_statement(generator: &IntentGenerator, statement: &str) -> Encoding {
    let generator = match generator {
        IntentGenerator::Available(generator) => generator,
        IntentGenerator::Unavailable { reason } => {
            tracing::debug!("Generator unavailable ({}), using fallback intent", reason);
            return Encoding::fallback(reason.clone());
        }
    };

    match generator.generate(statement) {
        Ok(Some(candidate)) => {
            let repaired = repair_with_report(&candidate);
            Encoding {
                intent: repaired.intent,
                origin: EncodingOrigin::Generated,
                notes: repaired.notes,
            }
        }
        Ok(None) => {
            tracing::warn!("Generator returned nothing for {:?}, using fallback intent", statement);
            Encoding::fallback("empty generator reply")
        }
        Err(e) => {
            tracing::warn!("Generator failed: {}, using fallback intent", e);
            Encoding::fallback(e.to_string())
        }
    }
}
