//! segue: a playlist playback coordinator.
//!
//! The crate drives an external decode/render engine (the [`decoder`] port)
//! and an external visual surface (the [`display`] sink), and keeps a
//! position indicator synchronized with real playback progress. The core is
//! [`player::Player`]: it owns the shared transport state, spawns the render
//! and tracker threads for each playback session, and resumes mid-stream at
//! the exact frame the decoder reached before a pause.

pub mod config;
pub mod decoder;
pub mod display;
pub mod error;
pub mod library;
pub mod player;
pub mod transport;

pub use error::PlayerError;
