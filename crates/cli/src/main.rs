//! SlotSave CLI: drives a staging manager over numbered save slots.
//!
//! Each invocation runs one command and exits:
//! - `slotsave save 1 --num 5 --name x`: edit the demo record and save it
//! - `slotsave load 1`: print the record in a slot (falls back to its backup)
//! - `slotsave delete 1`: remove a slot and its backup
//! - `slotsave status`: list which slots hold files

mod commands;
mod demo;
mod format;
mod parse;

use std::process;

use slotsave_core::{SaveConfig, SlotIndex};
use slotsave_durability::SlotPaths;
use slotsave_engine::{StagingError, StagingManager};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use commands::build_cli;
use demo::{DemoHooks, DemoRecord};
use format::{format_error, format_report, OutputMode, Report, ReportBody, SlotStatus};
use parse::{config_from_matches, matches_to_action, CliAction};

type DemoManager = StagingManager<DemoRecord, DemoHooks>;

fn main() {
    let matches = build_cli().get_matches();

    init_logging(matches.get_count("verbose"));

    let mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    // Handle `config` before touching any save directory.
    if matches.subcommand_name() == Some("config") {
        print!("{}", SaveConfig::default_toml());
        return;
    }

    let action = match matches_to_action(&matches) {
        Ok(action) => action,
        Err(e) => fail(&e, mode, 2),
    };

    let config = match config_from_matches(&matches) {
        Ok(config) => config,
        Err(e) => fail(&e, mode, 2),
    };

    debug!(
        dir = %config.namespace_dir().display(),
        format = %config.format,
        slots = config.max_index,
        "Opening save directory"
    );
    let mut manager = DemoManager::new(config, DemoHooks::default());
    if let Err(e) = manager.init() {
        fail(&format!("Failed to open save directory: {e}"), mode, 1);
    }

    match execute(&mut manager, action) {
        Ok(report) => {
            println!("{}", format_report(&report, mode));
            process::exit(report.exit_code());
        }
        Err(e) => fail(&e.to_string(), mode, 1),
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,slotsave={level},slotsave_durability={level},slotsave_engine={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn fail(message: &str, mode: OutputMode, code: i32) -> ! {
    eprintln!("{}", format_error(message, mode));
    process::exit(code);
}

fn execute(manager: &mut DemoManager, action: CliAction) -> Result<Report, StagingError> {
    let body = match action {
        CliAction::Save { slot, edits } => {
            // Start from what the slot holds so unspecified fields survive.
            manager.load(slot)?;
            manager.edit_staged(|record| edits.apply(record))?;
            let completion = manager.save(slot)?;
            ReportBody::Saved { slot, completion }
        }
        CliAction::Load { slot } => {
            let record = if manager.load(slot)? {
                manager.committed().cloned()
            } else {
                None
            };
            ReportBody::Loaded { slot, record }
        }
        CliAction::Delete { slot } => {
            let completion = manager.delete(slot)?;
            ReportBody::Deleted { slot, completion }
        }
        CliAction::Status => ReportBody::Status(slot_status(manager.config())),
    };

    Ok(Report {
        events: manager.hooks_mut().take_events(),
        body,
    })
}

fn slot_status(config: &SaveConfig) -> Vec<SlotStatus> {
    let paths = SlotPaths::compute(config.namespace_dir(), config.format, config.max_index);

    (0..paths.len())
        .map(SlotIndex::new)
        .map(|slot| SlotStatus {
            slot: slot.user_facing(),
            primary: paths.primary(slot).is_some_and(|p| p.exists()),
            backup: paths.backup(slot).is_some_and(|p| p.exists()),
        })
        .collect()
}
