use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::transport::Phase;

use super::coordinator::PlayerInner;

/// Convert the tracker's elapsed-time counter into a slider frame value.
///
/// The calibration factor compensates for the decoder's internal buffering
/// granularity; this estimate drives the display only. Resume points come
/// from the decoder's own position reports.
pub fn slider_frame(elapsed_ms: u64, calibration: f64, frames_per_ms: f64) -> u64 {
    (elapsed_ms as f64 * calibration * frames_per_ms) as u64
}

/// Spawn the position-tracking thread for one session.
///
/// Each iteration advances the elapsed counter by one tick, pushes the
/// derived frame position to the display, and sleeps a tick. The loop ends
/// within one iteration of the phase leaving `Playing` or the epoch moving
/// to a newer session.
pub(super) fn spawn(
    inner: Arc<PlayerInner>,
    frames_per_ms: f64,
    epoch: u64,
    resume: bool,
) -> JoinHandle<()> {
    let calibration = inner.settings.tracker.calibration;
    let tick_ms = inner.settings.tracker.tick_ms.max(1);
    let tick = Duration::from_millis(tick_ms);

    thread::spawn(move || {
        if resume {
            // Do not start counting until the render thread has committed
            // to the restart; counting early desynchronizes the display.
            drop(inner.transport.wait_resumed(epoch));
        }

        loop {
            let frame = {
                let mut st = inner.transport.lock();
                if st.epoch != epoch || st.phase != Phase::Playing {
                    break;
                }
                st.elapsed_ms += tick_ms;
                slider_frame(st.elapsed_ms, calibration, frames_per_ms)
            };
            inner.display.set_position(frame);
            thread::sleep(tick);
        }
    })
}
