use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::Duration;

use crate::library::Track;

/// Which way a user-initiated track change is going.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// The transport phase of the current playback session.
///
/// Exactly one variant is active at a time, which makes the tracker's exit
/// causes (paused, finished, navigating) mutually exclusive by construction.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    /// No session: nothing loaded, or playback was stopped.
    Idle,
    /// A render thread is (or is about to be) driving the decoder.
    Playing,
    /// Playback was interrupted; `resume_frame` holds the resume point.
    Paused,
    /// The decoder reported natural completion and no auto-advance occurred.
    Finished,
    /// A user-initiated track change is in flight; a concurrent "finished"
    /// report from the decoder must be ignored while this is set.
    Navigating(Direction),
}

impl Default for Phase {
    fn default() -> Self {
        Self::Idle
    }
}

/// The mutable fields shared between the control thread, the render thread
/// and the tracker thread.
#[derive(Debug, Default)]
pub struct TransportState {
    /// The track the current session plays, if any.
    pub track: Option<Track>,
    /// Resume point in frames. Accumulated from decoder-reported positions
    /// on pause; never derived from `elapsed_ms`.
    pub resume_frame: u64,
    /// Elapsed playback time in milliseconds. Drives the displayed slider
    /// position; frozen while paused, reset on load/next/previous.
    pub elapsed_ms: u64,
    pub phase: Phase,
    /// Session generation. Bumped on every transport reset; a tracker
    /// spawned for an older epoch exits as soon as it notices the change.
    pub epoch: u64,
}

impl TransportState {
    /// Reset for a new session on `track`: frame 0, elapsed 0, flags
    /// cleared back to `Playing`, new epoch. Happens on every load, next
    /// and previous.
    pub fn reset_for(&mut self, track: Track) {
        self.track = Some(track);
        self.resume_frame = 0;
        self.elapsed_ms = 0;
        self.phase = Phase::Playing;
        self.epoch += 1;
    }

    /// Frames-per-millisecond of the current track, or 0.0 when idle.
    pub fn frames_per_ms(&self) -> f64 {
        self.track.as_ref().map_or(0.0, |t| t.frames_per_ms)
    }
}

/// The lock-and-notify pair guarding the transport state.
///
/// One instance per [`Player`](crate::player::Player); independent players
/// never share a signal.
#[derive(Debug, Default)]
pub struct TransportShared {
    state: Mutex<TransportState>,
    resume_signal: Condvar,
}

impl TransportShared {
    /// Lock the transport state. Recovers from poisoning: a panicking
    /// display sink must not wedge the whole player.
    pub fn lock(&self) -> MutexGuard<'_, TransportState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Flip `Paused` to `Playing` and wake the tracker. Called by the render
    /// thread just before it hands the decoder the resume frame.
    pub fn signal_resumed(&self) {
        let mut st = self.lock();
        if st.phase == Phase::Paused {
            st.phase = Phase::Playing;
        }
        drop(st);
        self.resume_signal.notify_all();
    }

    /// Block until the render thread of the session identified by `epoch`
    /// has signalled the resume, or until that session is superseded. The
    /// timed re-check covers supersession, which resets the phase without
    /// a notify.
    pub fn wait_resumed(&self, epoch: u64) -> MutexGuard<'_, TransportState> {
        let mut st = self.lock();
        while st.phase == Phase::Paused && st.epoch == epoch {
            let (guard, _) = self
                .resume_signal
                .wait_timeout(st, Duration::from_millis(50))
                .unwrap_or_else(|p| p.into_inner());
            st = guard;
        }
        st
    }
}

pub type TransportHandle = Arc<TransportShared>;
