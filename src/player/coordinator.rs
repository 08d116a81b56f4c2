use std::sync::{Arc, Mutex};

use log::{info, warn};

use crate::config::Settings;
use crate::decoder::{Decoder, DecoderSession};
use crate::display::DisplaySink;
use crate::error::PlayerError;
use crate::library::{Playlist, Track};
use crate::transport::{Direction, Phase, TransportHandle, TransportShared};

use super::{render, tracker};

/// The playback coordinator.
///
/// Owns the shared transport state, starts and stops decoder sessions, and
/// spawns the render and tracker threads for each session. All methods are
/// callable from any thread; the decoder's completion callback re-enters
/// the same logic for playlist auto-advance.
pub struct Player {
    inner: Arc<PlayerInner>,
}

pub(super) struct PlayerInner {
    pub(super) decoder: Arc<dyn Decoder>,
    pub(super) display: Arc<dyn DisplaySink>,
    pub(super) transport: TransportHandle,
    pub(super) settings: Settings,
    /// Lock order: transport before playlist. The session slot is only
    /// ever locked on its own.
    playlist: Mutex<Option<Playlist>>,
    session: Mutex<Option<Arc<dyn DecoderSession>>>,
}

impl Player {
    pub fn new(decoder: Arc<dyn Decoder>, display: Arc<dyn DisplaySink>, settings: Settings) -> Self {
        Self {
            inner: Arc::new(PlayerInner {
                decoder,
                display,
                transport: Arc::new(TransportShared::default()),
                settings,
                playlist: Mutex::new(None),
                session: Mutex::new(None),
            }),
        }
    }

    /// Handle to the shared transport state, for observers (UIs, tests).
    pub fn transport(&self) -> TransportHandle {
        self.inner.transport.clone()
    }

    /// Current track index within the playlist, if one is loaded.
    pub fn playlist_position(&self) -> Option<usize> {
        self.inner.lock_playlist().as_ref().map(|p| p.position())
    }

    /// Load a single track, replacing any playlist, and start playing it.
    pub fn load_track(&self, track: Track) {
        self.inner.supersede();
        self.inner.stop_session();
        *self.inner.lock_playlist() = None;
        self.inner.begin_track(track);
    }

    /// Probe `path` for metadata and load the resulting track.
    pub fn load_path(&self, path: &std::path::Path) -> Result<(), PlayerError> {
        let track = Track::probe(path)?;
        self.load_track(track);
        Ok(())
    }

    /// Load a playlist, replacing any previous one, and start its first track.
    pub fn load_playlist(&self, playlist: Playlist) {
        self.inner.supersede();
        self.inner.stop_session();
        let track = playlist.current().clone();
        *self.inner.lock_playlist() = Some(playlist);
        self.inner.begin_track(track);
    }

    /// Resume from a pause, or (re)start the loaded track from the top.
    /// No-op while already playing or with nothing loaded.
    pub fn play(&self) {
        let (track, resume, epoch) = {
            let mut st = self.inner.transport.lock();
            match st.phase {
                Phase::Paused => match st.track.clone() {
                    Some(t) => (t, true, st.epoch),
                    None => return,
                },
                Phase::Idle | Phase::Finished => match st.track.clone() {
                    Some(t) => {
                        st.reset_for(t.clone());
                        (t, false, st.epoch)
                    }
                    None => return,
                },
                Phase::Playing | Phase::Navigating(_) => return,
            }
        };

        if !resume {
            self.inner.display.set_position(0);
        }
        self.inner.display.show_playing_controls();
        self.inner.start_session(track, resume, epoch);
    }

    /// Interrupt playback, recording the decoder's authoritative position
    /// as the resume point. No-op unless playing.
    pub fn pause(&self) {
        let epoch = {
            let mut st = self.inner.transport.lock();
            if st.phase != Phase::Playing {
                return;
            }
            st.phase = Phase::Paused;
            st.epoch
        };
        // `stop` returns its reached position synchronously, so the resume
        // point is recorded before `pause` returns and a `play` issued right
        // after can never observe a stale frame. The session's trailing
        // `finished` report carries the same position and is ignored.
        let reached_ms = self.inner.stop_session();
        {
            let mut st = self.inner.transport.lock();
            if st.epoch == epoch && st.phase == Phase::Paused {
                st.resume_frame += (reached_ms as f64 * st.frames_per_ms()) as u64;
            }
        }
        self.inner.display.show_paused_controls();
    }

    /// Stop and close the session entirely. The loaded track stays loaded;
    /// a later `play` starts it from the top.
    pub fn stop(&self) {
        {
            let mut st = self.inner.transport.lock();
            st.phase = Phase::Idle;
            st.resume_frame = 0;
            st.elapsed_ms = 0;
            // Reject any callback still in flight from the closing session.
            st.epoch += 1;
        }
        self.inner.stop_session();
        self.inner.display.show_paused_controls();
    }

    /// Skip to the next playlist track. No-op without a playlist or at the
    /// last index.
    pub fn next(&self) {
        self.inner.navigate(Direction::Next);
    }

    /// Go back to the previous playlist track. No-op without a playlist or
    /// at index 0.
    pub fn previous(&self) {
        self.inner.navigate(Direction::Previous);
    }
}

impl PlayerInner {
    fn lock_playlist(&self) -> std::sync::MutexGuard<'_, Option<Playlist>> {
        self.playlist.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Invalidate the current session before it is stopped, so its final
    /// callbacks and tracker iterations can no longer be mistaken for the
    /// next session's. Must run before `stop_session` on every load path.
    fn supersede(&self) {
        let mut st = self.transport.lock();
        st.phase = Phase::Idle;
        st.epoch += 1;
    }

    /// Stop and close the open session, if any, returning the position it
    /// reached in milliseconds (0 when there was none). Always called
    /// before a new session is opened: two decoder sessions are never open
    /// at once.
    pub(super) fn stop_session(&self) -> u64 {
        let session = self
            .session
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .take();
        match session {
            Some(s) => {
                let reached_ms = s.stop();
                s.close();
                reached_ms
            }
            None => 0,
        }
    }

    /// Reset the transport for `track`, announce it, and start a session at
    /// frame 0.
    fn begin_track(self: &Arc<Self>, track: Track) {
        let epoch = {
            let mut st = self.transport.lock();
            st.reset_for(track.clone());
            st.epoch
        };
        self.announce_track(&track);
        self.start_session(track, false, epoch);
    }

    fn announce_track(&self, track: &Track) {
        self.display
            .show_title_artist(&track.title, track.artist.as_deref());
        self.display.set_slider_range(track.total_frames);
        self.display.set_position(0);
        self.display.show_playing_controls();
    }

    /// Open a decoder session for `track` and spawn the render and tracker
    /// threads. `expect_epoch` is the transport epoch the caller observed
    /// when it decided to start this session; if another command moved the
    /// epoch in the meantime, the start is abandoned. On open failure the
    /// player surfaces a notice and returns to idle; nothing propagates.
    pub(super) fn start_session(self: &Arc<Self>, track: Track, resume: bool, expect_epoch: u64) {
        if self.transport.lock().epoch != expect_epoch {
            return;
        }

        let session = match self.decoder.open(&track) {
            Ok(s) => s,
            Err(e) => {
                warn!("could not open {:?}: {e}", track.path);
                self.display
                    .show_notice(&format!("could not play {}", track.title));
                let mut st = self.transport.lock();
                if st.epoch == expect_epoch {
                    st.phase = Phase::Idle;
                }
                return;
            }
        };

        // Commit atomically with the epoch check. Each session gets its own
        // epoch so a tracker or callback from a superseded session can
        // never touch this one's state.
        let epoch = {
            let mut st = self.transport.lock();
            if st.epoch != expect_epoch {
                // Another command took over while the decoder was opening.
                drop(st);
                session.stop();
                session.close();
                return;
            }
            st.epoch += 1;
            *self.session.lock().unwrap_or_else(|p| p.into_inner()) = Some(session.clone());
            st.epoch
        };

        render::spawn(self.clone(), session, epoch, resume);
        tracker::spawn(self.clone(), track.frames_per_ms, epoch, resume);
    }

    /// Shared by `next`, `previous` and auto-advance.
    pub(super) fn navigate(self: &Arc<Self>, direction: Direction) {
        // Mark the change before stopping the decoder so a finish report
        // racing with us is attributed to navigation, not natural
        // completion, and so the old tracker sees an exit condition.
        {
            let mut st = self.transport.lock();
            let guard = self.lock_playlist();
            let Some(playlist) = guard.as_ref() else {
                return;
            };
            let movable = match direction {
                Direction::Next => playlist.can_advance(),
                Direction::Previous => playlist.can_retreat(),
            };
            if !movable {
                // Boundary: silently ignored, never an error.
                return;
            }
            if matches!(st.phase, Phase::Navigating(_)) {
                // A track change is already in flight.
                return;
            }
            st.phase = Phase::Navigating(direction);
            // Invalidate the outgoing session (and any start still racing
            // toward the slot) before stopping the decoder.
            st.epoch += 1;
        }

        self.stop_session();

        let (track, epoch) = {
            let mut st = self.transport.lock();
            let mut guard = self.lock_playlist();
            let Some(playlist) = guard.as_mut() else {
                return;
            };
            match direction {
                Direction::Next => playlist.advance(),
                Direction::Previous => playlist.retreat(),
            }
            let track = playlist.current().clone();
            st.reset_for(track.clone());
            (track, st.epoch)
        };

        self.announce_track(&track);
        self.start_session(track, false, epoch);
    }

    /// Decoder reported that rendering began.
    pub(super) fn handle_started(&self, epoch: u64) {
        {
            let mut st = self.transport.lock();
            if st.epoch != epoch {
                return;
            }
            if matches!(st.phase, Phase::Paused) {
                // A pause already landed on this session; leave the paused
                // controls in place.
                return;
            }
            // Clear navigation/finished residue now that audio is flowing.
            st.phase = Phase::Playing;
        }
        info!("playback started");
        self.display.show_playing_controls();
    }

    /// Decoder reported that rendering stopped, with its authoritative
    /// position (milliseconds rendered since the session's start frame).
    pub(super) fn handle_finished(self: &Arc<Self>, epoch: u64, last_position: u64) {
        enum Outcome {
            Ignore,
            Advance,
            Finish,
        }

        let outcome = {
            let mut st = self.transport.lock();
            if st.epoch != epoch {
                // A stale report from a superseded session.
                Outcome::Ignore
            } else {
                match st.phase {
                    // The resume point was already recorded from `stop`'s
                    // synchronous return inside `pause`; this trailing
                    // report repeats the same position.
                    Phase::Paused => Outcome::Ignore,
                    // Navigation already owns this transition; a concurrent
                    // finish must not advance a second time.
                    Phase::Navigating(_) => Outcome::Ignore,
                    Phase::Idle | Phase::Finished => Outcome::Ignore,
                    Phase::Playing => {
                        let advance = self.settings.playback.auto_advance
                            && self
                                .lock_playlist()
                                .as_ref()
                                .is_some_and(|p| p.can_advance());
                        if advance {
                            Outcome::Advance
                        } else {
                            st.phase = Phase::Finished;
                            Outcome::Finish
                        }
                    }
                }
            }
        };

        match outcome {
            Outcome::Ignore => {}
            Outcome::Advance => {
                info!("playback finished at {last_position} ms, advancing");
                self.navigate(Direction::Next);
            }
            Outcome::Finish => {
                info!("playback finished at {last_position} ms");
                self.stop_session();
                self.display.show_paused_controls();
            }
        }
    }
}
