//! The closed HSIL vocabularies
//!
//! Every field of an intent atom draws from one of these sets. Values are
//! exchanged by their canonical identifier (`"E1_Discover"`, `"Self"`,
//! `"ShortTerm"`), both in the S-expression grammar and in JSON.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed set of named values
pub trait Vocabulary: Sized + Copy + 'static {
    /// Every member, in canonical order
    const ALL: &'static [Self];

    /// Canonical identifier
    fn as_str(&self) -> &'static str;

    /// Exact, case-sensitive lookup by canonical identifier
    fn lookup(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == name)
    }
}

/// The 20 HSIL intent elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentType {
    // === EXPLORATORY ===
    #[serde(rename = "E1_Discover")]
    E1Discover,
    #[serde(rename = "E2_Understand")]
    E2Understand,
    #[serde(rename = "E3_SeekNovelty")]
    E3SeekNovelty,
    #[serde(rename = "E4_Observe")]
    E4Observe,
    #[serde(rename = "E5_Expand")]
    E5Expand,

    // === TRANSFORMATIVE ===
    #[serde(rename = "T1_Create")]
    T1Create,
    #[serde(rename = "T2_Modify")]
    T2Modify,
    #[serde(rename = "T3_Optimize")]
    T3Optimize,
    #[serde(rename = "T4_Construct")]
    T4Construct,
    #[serde(rename = "T5_Transition")]
    T5Transition,

    // === PROTECTIVE ===
    #[serde(rename = "P1_Preserve")]
    P1Preserve,
    #[serde(rename = "P2_Defend")]
    P2Defend,
    #[serde(rename = "P3_Stabilize")]
    P3Stabilize,
    #[serde(rename = "P4_Avoid")]
    P4Avoid,
    #[serde(rename = "P5_Anchor")]
    P5Anchor,

    // === RELATIONAL ===
    #[serde(rename = "R1_Connect")]
    R1Connect,
    #[serde(rename = "R2_Communicate")]
    R2Communicate,
    #[serde(rename = "R3_Collaborate")]
    R3Collaborate,
    #[serde(rename = "R4_Empathize")]
    R4Empathize,
    #[serde(rename = "R5_Belong")]
    R5Belong,
}

impl IntentType {
    pub const fn category(&self) -> Category {
        use IntentType::*;
        match self {
            E1Discover | E2Understand | E3SeekNovelty | E4Observe | E5Expand => {
                Category::Exploratory
            }
            T1Create | T2Modify | T3Optimize | T4Construct | T5Transition => {
                Category::Transformative
            }
            P1Preserve | P2Defend | P3Stabilize | P4Avoid | P5Anchor => Category::Protective,
            R1Connect | R2Communicate | R3Collaborate | R4Empathize | R5Belong => {
                Category::Relational
            }
        }
    }
}

impl Vocabulary for IntentType {
    const ALL: &'static [Self] = &[
        IntentType::E1Discover,
        IntentType::E2Understand,
        IntentType::E3SeekNovelty,
        IntentType::E4Observe,
        IntentType::E5Expand,
        IntentType::T1Create,
        IntentType::T2Modify,
        IntentType::T3Optimize,
        IntentType::T4Construct,
        IntentType::T5Transition,
        IntentType::P1Preserve,
        IntentType::P2Defend,
        IntentType::P3Stabilize,
        IntentType::P4Avoid,
        IntentType::P5Anchor,
        IntentType::R1Connect,
        IntentType::R2Communicate,
        IntentType::R3Collaborate,
        IntentType::R4Empathize,
        IntentType::R5Belong,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            IntentType::E1Discover => "E1_Discover",
            IntentType::E2Understand => "E2_Understand",
            IntentType::E3SeekNovelty => "E3_SeekNovelty",
            IntentType::E4Observe => "E4_Observe",
            IntentType::E5Expand => "E5_Expand",
            IntentType::T1Create => "T1_Create",
            IntentType::T2Modify => "T2_Modify",
            IntentType::T3Optimize => "T3_Optimize",
            IntentType::T4Construct => "T4_Construct",
            IntentType::T5Transition => "T5_Transition",
            IntentType::P1Preserve => "P1_Preserve",
            IntentType::P2Defend => "P2_Defend",
            IntentType::P3Stabilize => "P3_Stabilize",
            IntentType::P4Avoid => "P4_Avoid",
            IntentType::P5Anchor => "P5_Anchor",
            IntentType::R1Connect => "R1_Connect",
            IntentType::R2Communicate => "R2_Communicate",
            IntentType::R3Collaborate => "R3_Collaborate",
            IntentType::R4Empathize => "R4_Empathize",
            IntentType::R5Belong => "R5_Belong",
        }
    }
}

/// Intent category, derived from the leading letter of the type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Exploratory,
    Transformative,
    Protective,
    Relational,
}

impl Category {
    /// Priority tier used when no override is configured (P=4, R=3, T=2, E=1)
    pub const fn default_priority(&self) -> u8 {
        match self {
            Category::Protective => 4,
            Category::Relational => 3,
            Category::Transformative => 2,
            Category::Exploratory => 1,
        }
    }

    /// Series letter ("P-series", "E-series", ...)
    pub const fn letter(&self) -> char {
        match self {
            Category::Exploratory => 'E',
            Category::Transformative => 'T',
            Category::Protective => 'P',
            Category::Relational => 'R',
        }
    }
}

impl Vocabulary for Category {
    const ALL: &'static [Self] = &[
        Category::Exploratory,
        Category::Transformative,
        Category::Protective,
        Category::Relational,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Category::Exploratory => "Exploratory",
            Category::Transformative => "Transformative",
            Category::Protective => "Protective",
            Category::Relational => "Relational",
        }
    }
}

/// Who or what the intent is directed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    #[serde(rename = "Self")]
    Oneself,
    Other,
    Group,
    Object,
    Environment,
    System,
}

impl Vocabulary for Scope {
    const ALL: &'static [Self] = &[
        Scope::Oneself,
        Scope::Other,
        Scope::Group,
        Scope::Object,
        Scope::Environment,
        Scope::System,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Scope::Oneself => "Self",
            Scope::Other => "Other",
            Scope::Group => "Group",
            Scope::Object => "Object",
            Scope::Environment => "Environment",
            Scope::System => "System",
        }
    }
}

/// Time horizon of an intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Temporal {
    Immediate,
    ShortTerm,
    LongTerm,
}

impl Temporal {
    /// Intensity weighting used when no override is configured
    pub const fn default_multiplier(&self) -> f64 {
        match self {
            Temporal::Immediate => 1.2,
            Temporal::ShortTerm => 1.0,
            Temporal::LongTerm => 0.8,
        }
    }
}

impl Vocabulary for Temporal {
    const ALL: &'static [Self] = &[Temporal::Immediate, Temporal::ShortTerm, Temporal::LongTerm];

    fn as_str(&self) -> &'static str {
        match self {
            Temporal::Immediate => "Immediate",
            Temporal::ShortTerm => "ShortTerm",
            Temporal::LongTerm => "LongTerm",
        }
    }
}

/// Mode declared by an `(intent-composite ...)` document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompositeMode {
    Dominant,
    Blended,
    Conflict,
}

impl Vocabulary for CompositeMode {
    const ALL: &'static [Self] = &[
        CompositeMode::Dominant,
        CompositeMode::Blended,
        CompositeMode::Conflict,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            CompositeMode::Dominant => "Dominant",
            CompositeMode::Blended => "Blended",
            CompositeMode::Conflict => "Conflict",
        }
    }
}

/// How a chain of intents combined, as computed by the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResolutionMode {
    /// One intent clearly prevails
    Dominant,
    /// Near-tied intents that combine
    Blended,
    /// Near-tied intents from different categories
    Conflicted,
}

impl Vocabulary for ResolutionMode {
    const ALL: &'static [Self] = &[
        ResolutionMode::Dominant,
        ResolutionMode::Blended,
        ResolutionMode::Conflicted,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ResolutionMode::Dominant => "Dominant",
            ResolutionMode::Blended => "Blended",
            ResolutionMode::Conflicted => "Conflicted",
        }
    }
}

impl fmt::Display for IntentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Temporal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for CompositeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ResolutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
