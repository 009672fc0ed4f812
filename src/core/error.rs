use thiserror::Error;

use crate::hsil::ParseError;

#[derive(Error, Debug)]
pub enum HsilError {
    #[error("HSIL parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Chain item not found: {0}")]
    ChainItemNotFound(crate::core::types::ChainItemId),

    #[error("Generator error: {0}")]
    GeneratorError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, HsilError>;
