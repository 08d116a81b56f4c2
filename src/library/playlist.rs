use std::fs;
use std::path::Path;

use crate::error::PlayerError;

use super::Track;

/// An ordered sequence of tracks plus the current position.
///
/// Invariant: `current` is a valid index whenever the playlist exists
/// (construction fails on an empty track list, and navigation is
/// boundary-checked).
#[derive(Debug, Clone)]
pub struct Playlist {
    tracks: Vec<Track>,
    current: usize,
}

impl Playlist {
    /// Build a playlist positioned at the first track.
    pub fn from_tracks(tracks: Vec<Track>) -> Result<Self, PlayerError> {
        if tracks.is_empty() {
            return Err(PlayerError::EmptyPlaylist);
        }
        Ok(Self { tracks, current: 0 })
    }

    /// Load a playlist file: one track path per line, blank lines skipped.
    ///
    /// Every listed path is probed for metadata; an unreadable track fails
    /// the whole load.
    pub fn load(path: &Path) -> Result<Self, PlayerError> {
        let contents = fs::read_to_string(path).map_err(|source| PlayerError::PlaylistRead {
            path: path.to_path_buf(),
            source,
        })?;

        let mut tracks = Vec::new();
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            tracks.push(Track::probe(Path::new(line))?);
        }

        Self::from_tracks(tracks)
    }

    pub fn current(&self) -> &Track {
        &self.tracks[self.current]
    }

    pub fn position(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// True iff a track exists after the current one.
    pub fn can_advance(&self) -> bool {
        self.current + 1 < self.tracks.len()
    }

    /// True iff a track exists before the current one.
    pub fn can_retreat(&self) -> bool {
        self.current > 0
    }

    /// Move to the next track. Callers must check [`can_advance`] first.
    ///
    /// [`can_advance`]: Playlist::can_advance
    pub fn advance(&mut self) {
        debug_assert!(self.can_advance());
        self.current += 1;
    }

    /// Move to the previous track. Callers must check [`can_retreat`] first.
    ///
    /// [`can_retreat`]: Playlist::can_retreat
    pub fn retreat(&mut self) {
        debug_assert!(self.can_retreat());
        self.current -= 1;
    }
}
