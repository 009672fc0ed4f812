//! The intent chain: an append-ordered history of encoded statements
//!
//! Insertion order is chronological order and is the tie-break basis for
//! resolution. Items are never partially mutated: an edit replaces the
//! whole intent of one item, and items leave only when the chain is cleared.

use serde::{Deserialize, Serialize};

use crate::chain::resolver::{resolve_with, Resolution};
use crate::core::config::ResolverConfig;
use crate::core::types::{now_millis, ChainItemId, Timestamp};
use crate::hsil::ParseError;
use crate::intent::{Intent, IntentField};

/// One encoded statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainItem {
    pub id: ChainItemId,
    /// Source statement the intent was encoded from
    pub text: String,
    pub intent: Intent,
    /// Milliseconds since the Unix epoch
    pub timestamp: Timestamp,
}

impl ChainItem {
    pub fn new(text: impl Into<String>, intent: Intent) -> Self {
        Self {
            id: ChainItemId::new(),
            text: text.into(),
            intent,
            timestamp: now_millis(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntentChain {
    items: Vec<ChainItem>,
}

impl IntentChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new item at the tail, returning its id
    pub fn append(&mut self, text: impl Into<String>, intent: Intent) -> ChainItemId {
        let item = ChainItem::new(text, intent);
        let id = item.id;
        tracing::debug!("Appended {} as item {}", item.intent.intent_type, id);
        self.items.push(item);
        id
    }

    /// Replace the intent of the item with `id`
    ///
    /// Returns false, leaving the chain untouched, if no item has that id.
    pub fn replace_intent(&mut self, id: ChainItemId, intent: Intent) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.intent = intent;
                true
            }
            None => false,
        }
    }

    /// Re-validate and replace one field of the item with `id`
    ///
    /// `Ok(false)` if the id is absent. An invalid value is an error and
    /// leaves the item unchanged.
    pub fn update_field(
        &mut self,
        id: ChainItemId,
        field: IntentField,
        value: &str,
    ) -> Result<bool, ParseError> {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return Ok(false);
        };
        item.intent = item.intent.with_field(field, value)?;
        Ok(true)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn get(&self, id: ChainItemId) -> Option<&ChainItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Item at a position in insertion order
    pub fn at(&self, index: usize) -> Option<&ChainItem> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChainItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Snapshot of the intents in insertion order
    pub fn intents(&self) -> Vec<Intent> {
        self.items.iter().map(|item| item.intent).collect()
    }

    pub fn resolve(&self, config: &ResolverConfig) -> Resolution {
        resolve_with(&self.intents(), config)
    }
}

impl<'a> IntoIterator for &'a IntentChain {
    type Item = &'a ChainItem;
    type IntoIter = std::slice::Iter<'a, ChainItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
