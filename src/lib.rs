#![doc(test(attr(deny(warnings))))]

//! Pitaka aggregates salary and expense records into dashboard totals,
//! time-bucketed trends and printable reports, and ships a small shell
//! (`pitaka_cli`) for managing the records from a terminal.

pub mod cli;
pub mod utils;

pub use pitaka_config as config;
pub use pitaka_core as core;
pub use pitaka_domain as domain;
pub use pitaka_storage_json as storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Pitaka tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_is_idempotent() {
        super::init();
        super::init();
    }
}
