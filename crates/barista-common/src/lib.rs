//! Shared foundation for the Barista workspace.
//!
//! Holds the pieces every binary needs: configuration loading, the
//! configuration error type, and unified logging initialization.

pub mod config;
pub mod error;
pub mod logging;

pub use config::ConfigLoader;
pub use error::{BaristaError, ConfigurationError};
