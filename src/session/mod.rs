//! Caller-owned session state
//!
//! A session owns exactly one chain, the generator used to encode
//! statements into it, and the resolver configuration. The core functions
//! stay pure; all mutation happens here.

use crate::chain::{IntentChain, Resolution};
use crate::core::config::{HsilConfig, ResolverConfig};
use crate::core::error::{HsilError, Result};
use crate::core::types::ChainItemId;
use crate::generator::{encode_statement, Encoding, IntentGenerator};
use crate::hsil::{parse_document, Document};
use crate::intent::{Intent, IntentField};

#[derive(Debug)]
pub struct Session {
    chain: IntentChain,
    generator: IntentGenerator,
    resolver: ResolverConfig,
}

impl Session {
    pub fn new(generator: IntentGenerator, resolver: ResolverConfig) -> Self {
        Self {
            chain: IntentChain::new(),
            generator,
            resolver,
        }
    }

    pub fn from_config(config: &HsilConfig) -> Self {
        Self::new(
            IntentGenerator::from_config(&config.generator),
            config.resolver.clone(),
        )
    }

    pub fn chain(&self) -> &IntentChain {
        &self.chain
    }

    pub fn generator(&self) -> &IntentGenerator {
        &self.generator
    }

    pub fn resolver_config(&self) -> &ResolverConfig {
        &self.resolver
    }

    /// Encode a statement through the generator and append it
    pub fn encode(&mut self, statement: &str) -> (ChainItemId, Encoding) {
        let encoding = encode_statement(&self.generator, statement);
        let id = self.chain.append(statement, encoding.intent);
        (id, encoding)
    }

    /// Parse an HSIL document and append its intents
    ///
    /// A composite appends one item per member intent, in document order.
    /// Nothing is appended if the document fails to parse.
    pub fn add_document(&mut self, text: &str) -> Result<Vec<ChainItemId>> {
        let ids = match parse_document(text)? {
            Document::Single(intent) => vec![self.chain.append(text.trim(), intent)],
            Document::Composite(composite) => composite
                .intents()
                .iter()
                .map(|intent| self.chain.append(intent.to_hsil(), *intent))
                .collect(),
        };
        Ok(ids)
    }

    /// Re-validate and replace one field of an item
    pub fn edit(&mut self, id: ChainItemId, field: IntentField, value: &str) -> Result<Intent> {
        if !self.chain.update_field(id, field, value)? {
            return Err(HsilError::ChainItemNotFound(id));
        }
        self.chain
            .get(id)
            .map(|item| item.intent)
            .ok_or(HsilError::ChainItemNotFound(id))
    }

    /// Replace an item's whole intent
    pub fn replace(&mut self, id: ChainItemId, intent: Intent) -> Result<()> {
        if self.chain.replace_intent(id, intent) {
            Ok(())
        } else {
            Err(HsilError::ChainItemNotFound(id))
        }
    }

    pub fn clear(&mut self) {
        tracing::debug!("Cleared {} chain items", self.chain.len());
        self.chain.clear();
    }

    pub fn resolve(&self) -> Resolution {
        self.chain.resolve(&self.resolver)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(
            IntentGenerator::unavailable("no generator configured"),
            ResolverConfig::default(),
        )
    }
}
