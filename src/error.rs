//! Fatal errors
//!
//! Problems in the documented sources are diagnostics (see `doc::diagnostics`); the
//! errors here abort the whole run.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocletError {
    /// Reading or writing a file failed
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: Could not delete existing file: {source}")]
    DeleteExisting {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not rename \"{from}\" to \"{to}\": {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },

    /// No marker base types configured for a rule family
    #[error("No base types configured for {family}")]
    MissingBaseTypes { family: &'static str },

    #[error("No option provider interface configured")]
    MissingOptionProviderInterface,

    #[error("Source loading failed: {0:#}")]
    Sources(#[from] anyhow::Error),

    #[error("Write error: {0}")]
    Xml(String),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl DocletError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DocletError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DocletError>;
