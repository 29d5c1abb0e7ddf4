//! # lapis-core
//!
//! Core types, traits, configuration, and error handling for the Lapis bot.

pub mod config;
pub mod error;
pub mod message;
pub mod traits;

pub use config::shellexpand;
