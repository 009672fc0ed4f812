//! Resolution configuration with documented constants
//!
//! Every threshold and weight the resolver uses lives here, so they can be
//! tuned from a TOML file without touching the algorithm.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{HsilError, Result};
use crate::intent::{Category, Temporal};

/// Maximum score gap between winner and runner-up for a cross-category
/// pair to be classified as Conflicted.
pub const CONFLICT_SCORE_GAP: f64 = 0.3;

/// Maximum score gap between winner and runner-up for the pair to be
/// classified as Blended.
pub const BLEND_SCORE_GAP: f64 = 0.2;

/// Winner scores at or above this ceiling never produce a conflict.
pub const CONFLICT_SCORE_CEILING: f64 = 1.0;

/// Default tracing directive for the binary
pub const DEFAULT_LOG_FILTER: &str = "hsil=info";

/// Priority tier per intent category
///
/// Higher tiers win before intensity is considered at all. The default
/// order is Protective > Relational > Transformative > Exploratory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityTable {
    pub protective: u8,
    pub relational: u8,
    pub transformative: u8,
    pub exploratory: u8,
}

impl PriorityTable {
    pub fn tier(&self, category: Category) -> u8 {
        match category {
            Category::Protective => self.protective,
            Category::Relational => self.relational,
            Category::Transformative => self.transformative,
            Category::Exploratory => self.exploratory,
        }
    }
}

impl Default for PriorityTable {
    fn default() -> Self {
        Self {
            protective: Category::Protective.default_priority(),
            relational: Category::Relational.default_priority(),
            transformative: Category::Transformative.default_priority(),
            exploratory: Category::Exploratory.default_priority(),
        }
    }
}

/// Intensity multiplier per temporal horizon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemporalWeights {
    pub immediate: f64,
    pub short_term: f64,
    pub long_term: f64,
}

impl TemporalWeights {
    pub fn weight(&self, temporal: Temporal) -> f64 {
        match temporal {
            Temporal::Immediate => self.immediate,
            Temporal::ShortTerm => self.short_term,
            Temporal::LongTerm => self.long_term,
        }
    }
}

impl Default for TemporalWeights {
    fn default() -> Self {
        Self {
            immediate: Temporal::Immediate.default_multiplier(),
            short_term: Temporal::ShortTerm.default_multiplier(),
            long_term: Temporal::LongTerm.default_multiplier(),
        }
    }
}

/// Configuration for chain resolution
///
/// Scores are `intensity × temporal weight`, so with the default weights
/// they range over [0.0, 1.2].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Gap below which a cross-category pair is Conflicted
    ///
    /// Only applies when the winner's score is also below
    /// `conflict_score_ceiling`: an overwhelming winner is Dominant even
    /// against a close runner-up from another category.
    pub conflict_score_gap: f64,

    /// Gap below which the top two intents are Blended
    ///
    /// Checked after the conflict rule, so in practice this classifies
    /// same-category pairs and cross-category pairs with a strong winner.
    pub blend_score_gap: f64,

    /// Winner score at which conflicts stop being reported
    ///
    /// At 1.0, only an Immediate intent above ~0.83 intensity clears it.
    pub conflict_score_ceiling: f64,

    /// Primary sort key
    pub priorities: PriorityTable,

    /// Multipliers applied to intensity to produce the secondary sort key
    pub temporal_weights: TemporalWeights,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            conflict_score_gap: CONFLICT_SCORE_GAP,
            blend_score_gap: BLEND_SCORE_GAP,
            conflict_score_ceiling: CONFLICT_SCORE_CEILING,
            priorities: PriorityTable::default(),
            temporal_weights: TemporalWeights::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` takes precedence
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Recorded generator replies to replay (see `RecordedGenerator`)
    pub recorded: Option<PathBuf>,
}

/// Top-level configuration file
///
/// Every section is optional; missing keys keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HsilConfig {
    pub resolver: ResolverConfig,
    pub logging: LoggingConfig,
    pub generator: GeneratorConfig,
}

impl HsilConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            HsilError::ConfigError(format!("Failed to read config {:?}: {}", path, e))
        })?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: HsilConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let r = &self.resolver;
        let gaps = [
            ("conflict_score_gap", r.conflict_score_gap),
            ("blend_score_gap", r.blend_score_gap),
            ("conflict_score_ceiling", r.conflict_score_ceiling),
            ("temporal_weights.immediate", r.temporal_weights.immediate),
            ("temporal_weights.short_term", r.temporal_weights.short_term),
            ("temporal_weights.long_term", r.temporal_weights.long_term),
        ];
        for (name, value) in gaps {
            if !value.is_finite() || value < 0.0 {
                return Err(HsilError::ConfigError(format!(
                    "resolver.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
