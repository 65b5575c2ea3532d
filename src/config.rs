//! Configuration loader and schema types.
//!
//! This module exposes the settings the host would otherwise hand to the
//! provider (library folder, recursion, art server interface) plus a few
//! tuning knobs, and helpers to load them from disk and environment.

mod load;
mod schema;

pub use load::{CONFIG_PATH_VAR, default_config_path, resolve_config_path};
pub use schema::*;

#[cfg(test)]
mod tests;
