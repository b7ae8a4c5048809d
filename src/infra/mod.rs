//! Infrastructure layer: adapters for config, logging, and local storage.

pub mod config;
pub mod contracts;
pub mod error;
pub mod logging;
pub mod storage_layout;

/// Returns the infra module name for smoke checks.
pub fn module_name() -> &'static str {
    "infra"
}
