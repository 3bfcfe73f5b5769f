//! Report → human/json string formatting.
//!
//! Two modes:
//! - **Human** (default): lifecycle events prefixed with `>`, then the result
//! - **JSON** (`--json`): one `serde_json::to_string_pretty` object

use serde::Serialize;
use serde_json::json;
use slotsave_durability::Completion;

use crate::demo::DemoRecord;

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Files present for one slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotStatus {
    pub slot: usize,
    pub primary: bool,
    pub backup: bool,
}

/// Result of one command
#[derive(Debug, Clone, PartialEq)]
pub enum ReportBody {
    Saved { slot: i64, completion: Completion },
    Loaded { slot: i64, record: Option<DemoRecord> },
    Deleted { slot: i64, completion: Completion },
    Status(Vec<SlotStatus>),
}

/// Result plus the hook events raised while producing it
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub events: Vec<String>,
    pub body: ReportBody,
}

impl Report {
    /// Process exit code for this report.
    pub fn exit_code(&self) -> i32 {
        match &self.body {
            ReportBody::Saved { completion, .. } | ReportBody::Deleted { completion, .. } => {
                i32::from(!completion.is_success())
            }
            ReportBody::Loaded { .. } | ReportBody::Status(_) => 0,
        }
    }
}

/// Format a report.
pub fn format_report(report: &Report, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => format_json(report),
        OutputMode::Human => format_human(report),
    }
}

/// Format an error.
pub fn format_error(message: &str, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(&json!({ "error": message }))
            .unwrap_or_else(|_| format!("{{\"error\": \"{message}\"}}")),
        OutputMode::Human => format!("(error) {message}"),
    }
}

fn format_human(report: &Report) -> String {
    let mut lines: Vec<String> = report.events.iter().map(|e| format!("> {e}")).collect();

    match &report.body {
        ReportBody::Saved { slot, completion } => {
            lines.push(completion_line("saved", *slot, completion));
        }
        ReportBody::Deleted { slot, completion } => {
            lines.push(completion_line("deleted", *slot, completion));
        }
        ReportBody::Loaded { slot, record: None } => {
            lines.push(format!("slot {slot}: (nil)"));
        }
        ReportBody::Loaded {
            slot,
            record: Some(record),
        } => {
            lines.push(format!("slot {slot}:"));
            lines.push(format!("  num      = {}", record.num));
            lines.push(format!("  name     = {:?}", record.name));
            lines.push(format!("  test_num = {:?}", record.test_num));
        }
        ReportBody::Status(slots) => {
            if slots.iter().all(|s| !s.primary) {
                lines.push("(no saves)".to_string());
            }
            for s in slots {
                let state = match (s.primary, s.backup) {
                    (true, true) => "saved, backup",
                    (true, false) => "saved",
                    (false, true) => "backup only",
                    (false, false) => "empty",
                };
                lines.push(format!("slot {}: {state}", s.slot));
            }
        }
    }

    lines.join("\n")
}

fn completion_line(verb: &str, slot: i64, completion: &Completion) -> String {
    match completion.error_message() {
        None => format!("OK {verb} slot {slot}"),
        Some(error) => format!("(error) {error}"),
    }
}

fn format_json(report: &Report) -> String {
    let result = match &report.body {
        ReportBody::Saved { slot, completion } | ReportBody::Deleted { slot, completion } => {
            json!({
                "slot": slot,
                "ok": completion.is_success(),
                "error": completion.error_message(),
            })
        }
        ReportBody::Loaded { slot, record } => json!({ "slot": slot, "record": record }),
        ReportBody::Status(slots) => json!({ "slots": slots }),
    };

    serde_json::to_string_pretty(&json!({
        "events": report.events,
        "result": result,
    }))
    .unwrap_or_else(|e| format_error(&e.to_string(), OutputMode::Json))
}
