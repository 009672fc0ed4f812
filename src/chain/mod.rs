//! Intent chains and their resolution

pub mod item;
pub mod resolver;

pub use item::{ChainItem, IntentChain};
pub use resolver::{resolve, resolve_with, RankedIntent, Resolution};
