//! Roster
//!
//! Client-side sync for employee records kept in a remote REST store: a
//! collection synchronizer for list views, a draft editor for create/edit
//! views, and a reference in-memory store to run them against.

pub mod config;
pub mod lifetime;
pub mod models;
pub mod server;
pub mod store;
pub mod sync;

#[cfg(test)]
mod testing;

pub use config::{Config, ConfigError, ConfigSource, ConfigValue};
pub use lifetime::{ViewLifetime, ViewToken};
pub use models::{Level, Record, RecordId, RecordPatch};
pub use store::{RecordStore, StoreError};
pub use sync::{EditTarget, EditorState, Navigation, Outcome, RecordCollection, RecordEditor};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
