//! Configuration loading shared by all Barista binaries
//!
//! Every service config implements [`ConfigLoader`], which layers three
//! sources in increasing priority: serialized defaults, a TOML file, and
//! environment variables prefixed with the binary's prefix (sections
//! separated by `__`, e.g. `BARISTA_API_SERVER__BIND_ADDRESS`).

use crate::error::ConfigurationError;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};

/// Loader trait for service configuration structs.
pub trait ConfigLoader<T>
where
    T: Default + Serialize + DeserializeOwned,
{
    /// Environment variable prefix, e.g. `BARISTA_API_`.
    fn env_prefix() -> &'static str;

    /// Config file consulted when no path is given on the command line.
    fn default_config_file() -> &'static str;

    /// Load from the default file location (or the given path) and the
    /// environment.
    fn load(path: Option<PathBuf>) -> Result<T, ConfigurationError> {
        let file = path.unwrap_or_else(|| PathBuf::from(Self::default_config_file()));
        let figment = Figment::from(Serialized::defaults(T::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(Self::env_prefix()).split("__"));

        figment.extract().map_err(|e| ConfigurationError::ParseError {
            details: e.to_string(),
        })
    }

    /// Load from an explicit file path; the file must exist.
    fn load_from_file(path: &Path) -> Result<T, ConfigurationError> {
        if !path.exists() {
            return Err(ConfigurationError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let figment = Figment::from(Serialized::defaults(T::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(Self::env_prefix()).split("__"));

        figment.extract().map_err(|e| ConfigurationError::ParseError {
            details: e.to_string(),
        })
    }

}
