//! HSIL text grammar: field extraction, S-expression reading, document parsing

pub mod extract;
pub mod parser;
pub mod reader;

pub use extract::extract;
pub use parser::{
    parse_document, parse_intent, CompositeDocument, DocField, Document, ParseError,
    MIN_COMPOSITE_INTENTS,
};
