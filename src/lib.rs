//! # lapis
//!
//! Command resolution for the Lapis chat bot: the command tree, the
//! passive/direct/strict dispatchers, and the built-in commands.

pub mod commands;
pub mod console;
pub mod dispatch;
pub mod gateway;
pub mod replies;

#[cfg(test)]
mod test_support;
