//! Initialization errors
//!
//! Initialization is the only place where a failure is fatal: without a
//! usable namespace directory no slot can be read or written. Everything
//! after initialization reports failures through completion outcomes.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that abort store initialization
#[derive(Debug, Error)]
pub enum InitError {
    /// The supplied configuration is invalid
    #[error("Invalid save configuration: {0}")]
    Config(#[from] ConfigError),

    /// The namespace directory could not be created
    #[error("Failed to create save directory {path}: {source}")]
    CreateDir {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_dir_display() {
        let err = InitError::CreateDir {
            path: PathBuf::from("/readonly/ns"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/readonly/ns"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_from_config_error() {
        let err: InitError = ConfigError::EmptyNamespace.into();
        assert!(matches!(err, InitError::Config(ConfigError::EmptyNamespace)));
    }
}
