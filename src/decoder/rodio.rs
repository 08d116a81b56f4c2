//! Rodio-backed decoder adapter.

use std::fs::File;
use std::io::BufReader;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rodio::mixer::Mixer;
use rodio::{OutputStream, OutputStreamBuilder, Sink, Source};

use crate::error::PlayerError;
use crate::library::Track;

use super::{Decoder, DecoderEvents, DecoderSession};

/// Decoder over rodio: one shared output stream, one `Sink` per session.
pub struct RodioDecoder {
    stream: OutputStream,
}

impl RodioDecoder {
    pub fn new() -> Result<Self, PlayerError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| PlayerError::OutputUnavailable(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped; noisy for hosts.
        stream.log_on_drop(false);
        Ok(Self { stream })
    }
}

impl Decoder for RodioDecoder {
    fn open(&self, track: &Track) -> Result<Arc<dyn DecoderSession>, PlayerError> {
        // Fail the open early if the file is gone; `play` re-opens it.
        File::open(&track.path).map_err(|e| PlayerError::TrackOpen {
            path: track.path.clone(),
            reason: e.to_string(),
        })?;

        Ok(Arc::new(RodioSession {
            mixer: self.stream.mixer().clone(),
            track: track.clone(),
            gate: StopGate::new(),
            stopped_at: Mutex::new(None),
        }))
    }
}

struct RodioSession {
    mixer: Mixer,
    track: Track,
    /// Hands the live sink from `play` to `stop` across threads.
    gate: StopGate<Arc<Sink>>,
    /// Position captured by `stop()` before the sink discards its queue.
    stopped_at: Mutex<Option<Duration>>,
}

impl RodioSession {
    fn frame_offset(&self, from_frame: u64) -> Duration {
        if self.track.frames_per_ms > 0.0 {
            Duration::from_millis((from_frame as f64 / self.track.frames_per_ms) as u64)
        } else {
            Duration::ZERO
        }
    }
}

impl DecoderSession for RodioSession {
    fn play(&self, from_frame: u64, events: &dyn DecoderEvents) -> Result<(), PlayerError> {
        let file = File::open(&self.track.path).map_err(|e| PlayerError::TrackOpen {
            path: self.track.path.clone(),
            reason: e.to_string(),
        })?;

        let source = rodio::Decoder::new(BufReader::new(file))
            .map_err(|e| PlayerError::Decode(e.to_string()))?
            // `skip_duration` is the resume primitive; Duration::ZERO is fine.
            .skip_duration(self.frame_offset(from_frame));

        // Fill the sink while paused so a `stop` landing before the commit
        // clears the queue and nothing ever reaches the mixer.
        let sink = Arc::new(Sink::connect_new(&self.mixer));
        sink.pause();
        sink.append(source);
        if !self.gate.commit(sink.clone()) {
            // Stopped before rendering began.
            sink.stop();
            events.finished(0);
            return Ok(());
        }
        sink.play();

        events.started();
        sink.sleep_until_end();

        // Skipped input does not count toward `get_pos`, so the reported
        // position is relative to this session's starting frame.
        let last = self
            .stopped_at
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .unwrap_or_else(|| sink.get_pos());
        events.finished(last.as_millis() as u64);
        Ok(())
    }

    fn stop(&self) -> u64 {
        match self.gate.interrupt() {
            Some(sink) => {
                let pos = sink.get_pos();
                *self.stopped_at.lock().unwrap_or_else(|p| p.into_inner()) = Some(pos);
                sink.stop();
                pos.as_millis() as u64
            }
            None => 0,
        }
    }

    fn close(&self) {
        self.gate.interrupt();
    }
}

/// One-shot hand-off of the live playback resource from the rendering side
/// to the stopping side. Once `interrupt` has run, a later `commit` is
/// refused, so a stop can never be lost to a render thread that was still
/// setting up.
pub(super) struct StopGate<T> {
    slot: Mutex<GateSlot<T>>,
}

struct GateSlot<T> {
    value: Option<T>,
    stopped: bool,
}

impl<T> StopGate<T> {
    pub(super) fn new() -> Self {
        Self {
            slot: Mutex::new(GateSlot {
                value: None,
                stopped: false,
            }),
        }
    }

    /// Store the live value. Returns false when `interrupt` already ran;
    /// the caller must then tear the value down itself.
    pub(super) fn commit(&self, value: T) -> bool {
        let mut slot = self.slot.lock().unwrap_or_else(|p| p.into_inner());
        if slot.stopped {
            return false;
        }
        slot.value = Some(value);
        true
    }

    /// Mark the session stopped and take the committed value, if any.
    pub(super) fn interrupt(&self) -> Option<T> {
        let mut slot = self.slot.lock().unwrap_or_else(|p| p.into_inner());
        slot.stopped = true;
        slot.value.take()
    }
}
