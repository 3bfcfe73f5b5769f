//! ArgMatches → config and action.

use std::path::Path;

use clap::ArgMatches;
use slotsave_core::{SaveConfig, SaveFormat};

use crate::demo::DemoRecord;

/// Base directory used when neither `--dir` nor a config file names one.
pub const DEFAULT_DIR: &str = ".slotsave";

/// Field overrides given to `save`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordEdits {
    pub num: Option<i32>,
    pub name: Option<String>,
    pub values: Option<Vec<i32>>,
}

impl RecordEdits {
    /// Apply the overrides to a staged record.
    pub fn apply(&self, record: &mut DemoRecord) {
        if let Some(num) = self.num {
            record.num = num;
        }
        if let Some(name) = &self.name {
            record.name.clone_from(name);
        }
        if let Some(values) = &self.values {
            record.test_num.clone_from(values);
        }
    }
}

/// What the invocation asks for
#[derive(Debug, Clone, PartialEq)]
pub enum CliAction {
    Save { slot: i64, edits: RecordEdits },
    Load { slot: i64 },
    Delete { slot: i64 },
    Status,
}

/// Translate the matched subcommand into an action.
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction, String> {
    let (name, sub) = matches
        .subcommand()
        .ok_or_else(|| "No command given".to_string())?;

    let slot = || {
        sub.get_one::<i64>("slot")
            .copied()
            .ok_or_else(|| "Missing slot number".to_string())
    };

    match name {
        "save" => Ok(CliAction::Save {
            slot: slot()?,
            edits: RecordEdits {
                num: sub.get_one::<i32>("num").copied(),
                name: sub.get_one::<String>("name").cloned(),
                values: sub
                    .get_many::<i32>("values")
                    .map(|values| values.copied().collect()),
            },
        }),
        "load" => Ok(CliAction::Load { slot: slot()? }),
        "delete" => Ok(CliAction::Delete { slot: slot()? }),
        "status" => Ok(CliAction::Status),
        other => Err(format!("Unknown command: {other}")),
    }
}

/// Build the save configuration from an optional config file plus flags.
pub fn config_from_matches(matches: &ArgMatches) -> Result<SaveConfig, String> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => SaveConfig::from_file(Path::new(path)).map_err(|e| e.to_string())?,
        None => SaveConfig::new(DEFAULT_DIR),
    };

    if let Some(dir) = matches.get_one::<String>("dir") {
        config.base_dir = dir.into();
    }
    if let Some(namespace) = matches.get_one::<String>("namespace") {
        config.namespace.clone_from(namespace);
    }
    if let Some(slots) = matches.get_one::<usize>("slots") {
        config.max_index = *slots;
    }
    if let Some(format) = matches.get_one::<String>("format") {
        config.format = format.parse::<SaveFormat>().map_err(|e| e.to_string())?;
    }
    if matches.get_flag("no-backup") {
        config.backup = false;
    }

    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}
