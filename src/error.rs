//! Error types for parsing and configuration
//!
//! Rejected gameplay commands are not errors; they return `false` or `None`.

use std::path::PathBuf;

use thiserror::Error;

/// Text that is not dice notation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid dice notation {0:?}")]
pub struct DiceNotationError(pub String);

/// Failure to turn a build descriptor into a character
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("no builder matches descriptor {0:?}")]
    UnknownDescriptor(String),
}

/// Failure to load or validate the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("configuration file {0} does not exist")]
    MissingFile(PathBuf),

    #[error("level must be at least 1x1, got {width}x{height}")]
    EmptyLevel { width: u32, height: u32 },

    #[error("party must have at least one member")]
    EmptyParty,

    #[error("invalid party member: {0}")]
    Party(#[from] BuildError),
}
