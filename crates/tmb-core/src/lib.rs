//! Core domain + application logic for the Telegram moderation bot.
//!
//! This crate is intentionally framework-agnostic. Telegram and the
//! classifier backends live behind ports (traits) implemented in adapter
//! crates.

pub mod audit;
pub mod classifier;
pub mod config;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod guidelines;
pub mod logging;
pub mod messaging;
pub mod moderation;

#[cfg(test)]
pub(crate) mod testing;

pub use errors::{Error, Result};
