//! Intent atoms and the closed vocabularies they draw from

pub mod atom;
pub mod vocabulary;

pub use atom::{Intensity, Intent, IntentField};
pub use vocabulary::{
    Category, CompositeMode, IntentType, ResolutionMode, Scope, Temporal, Vocabulary,
};
