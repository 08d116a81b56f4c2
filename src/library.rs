//! Track and playlist model.
//!
//! A [`Track`] is an immutable value: file path plus the metadata the
//! player needs (title, artist, frame rate). A [`Playlist`] is an ordered
//! sequence of tracks with a current position and boundary-checked
//! navigation.

mod model;
mod playlist;

pub use model::*;
pub use playlist::*;

#[cfg(test)]
mod tests;
