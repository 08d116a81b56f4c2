//! Shared transport state: the one mutable structure both playback
//! activities and the control thread touch.
//!
//! Writer discipline: the control thread and the render thread's decoder
//! callbacks write `phase` and `resume_frame`; the tracker thread writes
//! only `elapsed_ms`. Everything goes through the single mutex in
//! [`TransportShared`], and the paired condvar is the only cross-thread
//! handshake (the pause/resume signal).

mod state;

pub use state::*;
