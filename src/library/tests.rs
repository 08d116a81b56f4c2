use std::fs;
use std::path::{Path, PathBuf};

use tempfile::tempdir;

use super::*;
use crate::error::PlayerError;

fn t(title: &str) -> Track {
    Track::new(PathBuf::new(), title.into(), None, 2.0, 1000)
}

#[test]
fn from_tracks_rejects_empty() {
    assert!(matches!(
        Playlist::from_tracks(Vec::new()),
        Err(PlayerError::EmptyPlaylist)
    ));
}

#[test]
fn from_tracks_starts_at_first() {
    let pl = Playlist::from_tracks(vec![t("A"), t("B")]).unwrap();
    assert_eq!(pl.position(), 0);
    assert_eq!(pl.current().title, "A");
    assert_eq!(pl.len(), 2);
}

#[test]
fn navigation_respects_boundaries() {
    let mut pl = Playlist::from_tracks(vec![t("A"), t("B"), t("C")]).unwrap();

    assert!(!pl.can_retreat());
    assert!(pl.can_advance());

    pl.advance();
    pl.advance();
    assert_eq!(pl.current().title, "C");
    assert!(!pl.can_advance());
    assert!(pl.can_retreat());

    pl.retreat();
    assert_eq!(pl.current().title, "B");
}

#[test]
fn single_track_playlist_cannot_move() {
    let pl = Playlist::from_tracks(vec![t("only")]).unwrap();
    assert!(!pl.can_advance());
    assert!(!pl.can_retreat());
}

#[test]
fn load_rejects_blank_only_file() {
    let dir = tempdir().unwrap();
    let list = dir.path().join("empty.txt");
    fs::write(&list, "\n   \n\n").unwrap();

    assert!(matches!(
        Playlist::load(&list),
        Err(PlayerError::EmptyPlaylist)
    ));
}

#[test]
fn load_fails_on_missing_playlist_file() {
    assert!(matches!(
        Playlist::load(Path::new("/nonexistent/playlist.txt")),
        Err(PlayerError::PlaylistRead { .. })
    ));
}

#[test]
fn load_fails_on_unreadable_track() {
    let dir = tempdir().unwrap();
    let list = dir.path().join("list.txt");
    fs::write(&list, "/nonexistent/song.mp3\n").unwrap();

    assert!(matches!(
        Playlist::load(&list),
        Err(PlayerError::TrackOpen { .. })
    ));
}

#[test]
fn probe_fails_on_missing_file() {
    assert!(matches!(
        Track::probe(Path::new("/nonexistent/song.mp3")),
        Err(PlayerError::TrackOpen { .. })
    ));
}
