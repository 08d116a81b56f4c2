use std::path::{Path, PathBuf};

use lofty::prelude::*;
use lofty::tag::ItemKey;

use crate::error::PlayerError;

/// Samples per MPEG Layer III frame. Used to estimate the frame rate when
/// the container does not carry an explicit frame count.
const SAMPLES_PER_FRAME: f64 = 1152.0;

/// Sample rate assumed when the tag probe reports none.
const FALLBACK_SAMPLE_RATE: u32 = 44_100;

/// An immutable track: file path plus the metadata the player needs.
#[derive(Debug, Clone)]
pub struct Track {
    pub path: PathBuf,
    pub title: String,
    pub artist: Option<String>,
    /// Decoder frames per millisecond of audio. The conversion factor
    /// between the tracker's elapsed-time counter and slider frames, and
    /// between decoder-reported positions and resume frames.
    pub frames_per_ms: f64,
    /// Total frames in the track; sizes the playback slider.
    pub total_frames: u64,
}

impl Track {
    pub fn new(
        path: PathBuf,
        title: String,
        artist: Option<String>,
        frames_per_ms: f64,
        total_frames: u64,
    ) -> Self {
        Self {
            path,
            title,
            artist,
            frames_per_ms,
            total_frames,
        }
    }

    /// Build a `Track` by probing `path` for tags and audio properties.
    ///
    /// Fails with [`PlayerError::TrackOpen`] when the file is missing,
    /// unreadable or not a recognized audio format.
    pub fn probe(path: &Path) -> Result<Self, PlayerError> {
        let tagged = lofty::read_from_path(path).map_err(|e| PlayerError::TrackOpen {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let properties = tagged.properties();
        let duration_ms = properties.duration().as_millis() as u64;
        let sample_rate = properties.sample_rate().unwrap_or(FALLBACK_SAMPLE_RATE);
        let frames_per_ms = f64::from(sample_rate) / SAMPLES_PER_FRAME / 1000.0;
        let total_frames = (duration_ms as f64 * frames_per_ms) as u64;

        let mut title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string();
        let mut artist: Option<String> = None;

        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            if let Some(v) = tag.get_string(&ItemKey::TrackTitle) {
                if !v.trim().is_empty() {
                    title = v.to_string();
                }
            }
            if let Some(v) = tag.get_string(&ItemKey::TrackArtist) {
                let v = v.trim();
                if !v.is_empty() {
                    artist = Some(v.to_string());
                }
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            title,
            artist,
            frames_per_ms,
            total_frames,
        })
    }
}
