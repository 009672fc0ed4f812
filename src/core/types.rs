//! Core type definitions shared across the chain and session layers

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Unique identifier for an item in an intent chain
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
pub struct ChainItemId(pub Uuid);

impl ChainItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ChainItemId {
    fn default() -> Self {
        Self::new()
    }
}

/// Milliseconds since the Unix epoch
pub type Timestamp = u64;

/// Current wall-clock time as a [`Timestamp`]
///
/// A clock set before 1970 reads as 0 rather than failing.
pub fn now_millis() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as Timestamp)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_item_ids_are_unique() {
        let a = ChainItemId::new();
        let b = ChainItemId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_chain_item_id_displays_as_uuid() {
        let id = ChainItemId::new();
        assert_eq!(id.to_string(), id.0.to_string());
    }

    #[test]
    fn test_now_millis_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(now_millis() > 1_577_836_800_000);
    }
}
