//! Error types for the playback coordinator.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced at the public API of the player.
///
/// Decoder failures during playback are not represented here: the
/// coordinator recovers them internally and treats them as an abrupt finish.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// A track's file could not be opened or probed.
    #[error("could not open track {path:?}: {reason}")]
    TrackOpen { path: PathBuf, reason: String },

    /// A playlist file produced no tracks.
    #[error("playlist is empty")]
    EmptyPlaylist,

    /// The playlist file itself could not be read.
    #[error("could not read playlist {path:?}")]
    PlaylistRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No audio output device was available when building the decoder.
    #[error("audio output unavailable: {0}")]
    OutputUnavailable(String),

    /// The decoder failed while rendering. The coordinator recovers this
    /// as an abrupt finish; it never reaches the display beyond a notice.
    #[error("decode failed: {0}")]
    Decode(String),
}
