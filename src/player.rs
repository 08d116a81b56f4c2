//! The playback coordinator and its two per-session activities.
//!
//! [`Player`] handles the transport commands (load, play, pause, stop,
//! next, previous). Each playback session runs two threads: the render
//! thread, which drives the blocking decoder call and fans its callbacks
//! back into the coordinator, and the tracker thread, which advances the
//! elapsed counter and pushes slider positions to the display until it
//! observes a stop condition.

mod coordinator;
mod render;
mod tracker;

pub use coordinator::*;
pub use tracker::slider_frame;
