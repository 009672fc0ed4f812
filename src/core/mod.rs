pub mod config;
pub mod error;
pub mod types;

pub use config::{HsilConfig, ResolverConfig};
pub use error::{HsilError, Result};
pub use types::{ChainItemId, Timestamp};
