//! Save configuration
//!
//! Set once at initialization and fixed for the lifetime of the store.
//! Can be built in code or loaded from a `slotsave.toml`:
//!
//! ```toml
//! max_index = 3
//! format = "text"
//! namespace = "MyGame"
//! base_dir = "./saves"
//! backup = true
//! sync_writes = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

use crate::format::SaveFormat;
use crate::slot::MAX_SLOT_COUNT;

/// Conventional config file name.
pub const CONFIG_FILE_NAME: &str = "slotsave.toml";

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "TesterSaveManager";

/// Slot store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveConfig {
    /// Number of slots, `1..=10`
    pub max_index: usize,
    /// On-disk representation
    pub format: SaveFormat,
    /// Product namespace; becomes the directory holding the slot files
    pub namespace: String,
    /// Directory under which the namespace directory is created
    pub base_dir: PathBuf,
    /// Copy the previous primary to a backup file before each overwrite
    pub backup: bool,
    /// fsync slot files (and their directory) after each write
    pub sync_writes: bool,
}

impl Default for SaveConfig {
    fn default() -> Self {
        SaveConfig {
            max_index: 1,
            format: SaveFormat::Text,
            namespace: DEFAULT_NAMESPACE.to_string(),
            base_dir: PathBuf::from("."),
            backup: true,
            sync_writes: true,
        }
    }
}

impl SaveConfig {
    /// Create a config rooted at `base_dir` with defaults for everything else
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        SaveConfig {
            base_dir: base_dir.into(),
            ..Default::default()
        }
    }

    /// Set the slot count
    pub fn with_max_index(mut self, max_index: usize) -> Self {
        self.max_index = max_index;
        self
    }

    /// Set the on-disk format
    pub fn with_format(mut self, format: SaveFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the product namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the base directory
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Enable or disable backup files
    pub fn with_backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }

    /// Enable or disable fsync after writes
    pub fn with_sync_writes(mut self, sync_writes: bool) -> Self {
        self.sync_writes = sync_writes;
        self
    }

    /// Directory holding this namespace's slot files
    pub fn namespace_dir(&self) -> PathBuf {
        self.base_dir.join(&self.namespace)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_index == 0 || self.max_index > MAX_SLOT_COUNT {
            return Err(ConfigError::MaxIndexOutOfRange {
                max_index: self.max_index,
            });
        }

        if self.namespace.trim().is_empty() {
            return Err(ConfigError::EmptyNamespace);
        }

        // The namespace must name exactly one directory below base_dir.
        let mut components = Path::new(&self.namespace).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(()),
            _ => Err(ConfigError::InvalidNamespace(self.namespace.clone())),
        }
    }

    /// Parse and validate a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SaveConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Default config file content with comments
    pub fn default_toml() -> &'static str {
        r#"# SlotSave configuration
#
# Number of save slots (1-10)
max_index = 1

# Slot file format: "text" (JSON, .txt files) or "binary"
format = "text"

# Product namespace, created as a directory under base_dir
namespace = "TesterSaveManager"

# Directory under which the namespace directory lives
base_dir = "."

# Keep a copy of the previous save before overwriting it
backup = true

# fsync every write (slower, survives power loss)
sync_writes = true
"#
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Slot count outside `1..=10`
    #[error("max_index must be between 1 and 10, got {max_index}")]
    MaxIndexOutOfRange {
        /// Configured slot count
        max_index: usize,
    },

    /// Namespace is empty
    #[error("Namespace must not be empty")]
    EmptyNamespace,

    /// Namespace is not a single path component
    #[error("Namespace '{0}' must be a single directory name")]
    InvalidNamespace(String),

    /// Config file could not be read
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML for this schema
    #[error("Failed to parse config: {0}")]
    Parse(String),
}
