//! The port into the external decode/render engine.
//!
//! The coordinator never talks to an audio backend directly; it opens a
//! [`DecoderSession`] per playback session through a [`Decoder`] and
//! receives progress through [`DecoderEvents`]. The crate ships one real
//! adapter, [`RodioDecoder`], over rodio's mixer and sink.
//!
//! Position units: `play` takes a starting offset in *frames* (the track
//! knows its frames-per-millisecond rate); the decoder reports positions
//! back in its own time units (milliseconds of rendered audio). The
//! coordinator converts reported positions to frames with the track's
//! frame rate. That conversion, not the tracker's elapsed counter, is
//! what makes pause/resume land on the exact frame.

mod rodio;

pub use self::rodio::RodioDecoder;


use std::sync::Arc;

use crate::error::PlayerError;
use crate::library::Track;

/// Factory for playback sessions. One session is open at a time; the
/// coordinator always stops and closes the previous session before opening
/// the next.
pub trait Decoder: Send + Sync {
    fn open(&self, track: &Track) -> Result<Arc<dyn DecoderSession>, PlayerError>;
}

/// Callbacks fired by a session from inside the blocking [`play`] call.
///
/// [`play`]: DecoderSession::play
pub trait DecoderEvents: Sync {
    /// Rendering has actually begun (audio is flowing).
    fn started(&self);
    /// Rendering stopped, naturally or via [`stop`]. `last_position` is the
    /// decoder's authoritative position in milliseconds of rendered audio,
    /// measured from the frame this session started at.
    ///
    /// [`stop`]: DecoderSession::stop
    fn finished(&self, last_position: u64);
}

/// One open decode-and-render session.
pub trait DecoderSession: Send + Sync {
    /// Render the track from `from_frame` until completion or [`stop`].
    /// Blocks for the duration; fires `events.started()` once rendering
    /// begins and `events.finished(..)` once it ends. An error return means
    /// rendering failed before a finish could be reported.
    ///
    /// [`stop`]: DecoderSession::stop
    fn play(&self, from_frame: u64, events: &dyn DecoderEvents) -> Result<(), PlayerError>;

    /// Interrupt rendering; callable from any thread. Returns the position
    /// reached, in milliseconds of rendered audio since the session's start
    /// frame (0 when rendering never began). This synchronous return is the
    /// resume point the coordinator records; a blocked `play` also returns
    /// shortly after and reports its `finished` position, but by then a new
    /// session may already have been opened with the recorded value.
    fn stop(&self) -> u64;

    /// Release the session's resources. No calls are valid afterwards.
    fn close(&self);
}
