//! HSIL - a small grammar for intent atoms, with lenient repair of
//! generator output and resolution of intent chains

pub mod chain;
pub mod core;
pub mod generator;
pub mod hsil;
pub mod intent;
pub mod repair;
pub mod session;

pub use crate::chain::{resolve, resolve_with, IntentChain, Resolution};
pub use crate::core::error::{HsilError, Result};
pub use crate::hsil::{parse_document, Document, ParseError};
pub use crate::intent::Intent;
pub use crate::repair::{repair, repair_with_report};
