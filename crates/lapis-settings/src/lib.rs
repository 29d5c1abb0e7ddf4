//! # lapis-settings
//!
//! Per-destination boolean settings: identifier pairs, the static catalog of
//! declared defaults, the SQLite-backed pool, and the gate that combines them.

pub mod catalog;
pub mod gate;
pub mod identifier;
pub mod store;

pub use catalog::{CommandSettings, SettingsCategory, SettingsItem, CATALOG};
pub use gate::SettingsGate;
pub use identifier::SettingsIdentifierPair;
pub use store::SettingsPool;
