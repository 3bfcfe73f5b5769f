//! Integration Tests
//!
//! Cross-crate tests through the `slotsave` facade:
//! - End-to-end slot lifecycle with real files
//! - Completion channels and subscription teardown
//! - Shared managers through the registry

#[path = "../common/mod.rs"]
mod common;

mod end_to_end;
mod notifications;
mod registry;
