use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::error;

use crate::decoder::{DecoderEvents, DecoderSession};

use super::coordinator::PlayerInner;

/// Spawn the render thread for one session: hand the decoder its starting
/// frame, block for the duration of playback, and fan the decoder's
/// callbacks back into the coordinator.
///
/// When resuming, the resume signal is raised before the blocking play so
/// the tracker is guaranteed to see `Playing` only after the render side
/// has committed to restarting.
pub(super) fn spawn(
    inner: Arc<PlayerInner>,
    session: Arc<dyn DecoderSession>,
    epoch: u64,
    resume: bool,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let from_frame = if resume {
            let frame = inner.transport.lock().resume_frame;
            inner.transport.signal_resumed();
            frame
        } else {
            0
        };

        let events = RenderEvents {
            inner: &inner,
            epoch,
        };
        if let Err(e) = session.play(from_frame, &events) {
            // Decoder I/O failure mid-play: recover as an abrupt finish at
            // whatever position was last reported.
            error!("decoder failed: {e}");
            inner.handle_finished(epoch, 0);
        }
    })
}

struct RenderEvents<'a> {
    inner: &'a Arc<PlayerInner>,
    epoch: u64,
}

impl DecoderEvents for RenderEvents<'_> {
    fn started(&self) {
        self.inner.handle_started(self.epoch);
    }

    fn finished(&self, last_position: u64) {
        self.inner.handle_finished(self.epoch, last_position);
    }
}
