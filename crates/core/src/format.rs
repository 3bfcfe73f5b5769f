//! On-disk record formats

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Representation used for slot files.
///
/// Chosen once at initialization; a store never mixes formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveFormat {
    /// Human-readable JSON, stored with a `.txt` suffix
    #[default]
    #[serde(alias = "json")]
    Text,
    /// Compact binary encoding, stored without a suffix
    Binary,
}

impl SaveFormat {
    /// File suffix appended to slot file names.
    pub fn extension(self) -> &'static str {
        match self {
            SaveFormat::Text => ".txt",
            SaveFormat::Binary => "",
        }
    }

    /// Stable lowercase name, as used in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            SaveFormat::Text => "text",
            SaveFormat::Binary => "binary",
        }
    }
}

impl fmt::Display for SaveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SaveFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "json" => Ok(SaveFormat::Text),
            "binary" | "bin" => Ok(SaveFormat::Binary),
            _ => Err(ParseFormatError(s.to_string())),
        }
    }
}

/// Unknown format name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown save format '{0}' (expected \"text\" or \"binary\")")]
pub struct ParseFormatError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extensions() {
        assert_eq!(SaveFormat::Text.extension(), ".txt");
        assert_eq!(SaveFormat::Binary.extension(), "");
    }

    #[test]
    fn test_parse() {
        assert_eq!("text".parse::<SaveFormat>().unwrap(), SaveFormat::Text);
        assert_eq!("JSON".parse::<SaveFormat>().unwrap(), SaveFormat::Text);
        assert_eq!("binary".parse::<SaveFormat>().unwrap(), SaveFormat::Binary);
        assert!("xml".parse::<SaveFormat>().is_err());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&SaveFormat::Binary).unwrap(), "\"binary\"");
        let parsed: SaveFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(parsed, SaveFormat::Text);
    }
}
