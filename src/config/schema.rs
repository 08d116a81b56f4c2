use serde::Deserialize;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/segue/config.toml` or
/// `~/.config/segue/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `SEGUE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tracker: TrackerSettings,
    pub playback: PlaybackSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tracker: TrackerSettings::default(),
            playback: PlaybackSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrackerSettings {
    /// Multiplier applied when converting the tracker's elapsed-time
    /// counter into a slider frame position. Compensates for the decoder's
    /// internal buffering granularity; an empirical calibration value, not
    /// derived from the file format. Tune it against the decoder in use.
    pub calibration: f64,
    /// Tracker iteration period in milliseconds. Each iteration advances
    /// the elapsed counter by this amount and pushes one slider update.
    pub tick_ms: u64,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            calibration: 2.08,
            tick_ms: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Whether natural track completion advances to the next playlist
    /// entry. When disabled the player just ends the session.
    pub auto_advance: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self { auto_advance: true }
    }
}
