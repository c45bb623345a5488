//! Error types shared across Barista crates

use thiserror::Error;

/// Marker trait for Barista error types.
///
/// Lets downstream code accept any workspace error without naming the
/// concrete type.
pub trait BaristaError: std::error::Error {}

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The configuration file could not be found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// The configuration could not be parsed
    #[error("Failed to parse configuration: {details}")]
    ParseError { details: String },

    /// The configuration parsed but failed validation
    #[error("Invalid configuration: {details}")]
    ValidationError { details: String },
}

impl BaristaError for ConfigurationError {}
