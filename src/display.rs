//! The sink through which the player talks to the visual surface.
//!
//! The actual surface (buttons, slider, labels) lives outside this crate;
//! the coordinator only ever pushes notifications through this trait.

/// Notifications emitted by the player toward the visual surface.
///
/// Implementations must tolerate calls from the control thread, the render
/// thread and the tracker thread. One stale [`set_position`] update may
/// arrive just after a pause or track change.
///
/// [`set_position`]: DisplaySink::set_position
pub trait DisplaySink: Send + Sync {
    /// Move the playback slider to `frame`.
    fn set_position(&self, frame: u64);
    /// Size the playback slider for a track of `total_frames`.
    fn set_slider_range(&self, total_frames: u64);
    /// Playback is active: show the pause control.
    fn show_playing_controls(&self);
    /// Playback is paused, finished or idle: show the play control.
    fn show_paused_controls(&self);
    /// A new track became current.
    fn show_title_artist(&self, title: &str, artist: Option<&str>);
    /// A non-fatal, human-readable notice (e.g. "could not play ...").
    fn show_notice(&self, message: &str);
}

/// A display sink that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDisplay;

impl DisplaySink for NullDisplay {
    fn set_position(&self, _frame: u64) {}
    fn set_slider_range(&self, _total_frames: u64) {}
    fn show_playing_controls(&self) {}
    fn show_paused_controls(&self) {}
    fn show_title_artist(&self, _title: &str, _artist: Option<&str>) {}
    fn show_notice(&self, _message: &str) {}
}
