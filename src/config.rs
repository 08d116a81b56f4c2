//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema used to tune the playback
//! engine and helpers to load configuration from disk.

mod load;
mod schema;

pub use schema::*;
