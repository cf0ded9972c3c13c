// state_tests.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of gst-tutorials
//
// SPDX-License-Identifier: GPL-3.0-only

use super::state::*;

#[test]
fn test_playback_state_display() {
    assert_eq!(PlaybackState::Null.to_string(), "null");
    assert_eq!(PlaybackState::Ready.to_string(), "ready");
    assert_eq!(PlaybackState::Paused.to_string(), "paused");
    assert_eq!(PlaybackState::Playing.to_string(), "playing");
}

#[test]
fn test_playback_state_from_str() {
    assert_eq!("null".parse::<PlaybackState>().unwrap(), PlaybackState::Null);
    assert_eq!("ready".parse::<PlaybackState>().unwrap(), PlaybackState::Ready);
    assert_eq!(
        "paused".parse::<PlaybackState>().unwrap(),
        PlaybackState::Paused
    );
    // Case insensitive
    assert_eq!(
        "PLAYING".parse::<PlaybackState>().unwrap(),
        PlaybackState::Playing
    );
}

#[test]
fn test_playback_state_from_str_invalid() {
    assert!("void_pending".parse::<PlaybackState>().is_err());
    assert!("".parse::<PlaybackState>().is_err());
}

#[test]
fn test_playback_state_ordering_follows_lifecycle() {
    assert!(PlaybackState::Null < PlaybackState::Ready);
    assert!(PlaybackState::Ready < PlaybackState::Paused);
    assert!(PlaybackState::Paused < PlaybackState::Playing);

    assert!(!PlaybackState::Null.is_prerolled());
    assert!(!PlaybackState::Ready.is_prerolled());
    assert!(PlaybackState::Paused.is_prerolled());
    assert!(PlaybackState::Playing.is_prerolled());
}

#[test]
fn test_playback_state_gstreamer_conversion() {
    assert_eq!(PlaybackState::from_gst(gstreamer::State::VoidPending), None);
    assert_eq!(
        PlaybackState::from_gst(gstreamer::State::Null),
        Some(PlaybackState::Null)
    );
    assert_eq!(
        PlaybackState::from_gst(gstreamer::State::Playing),
        Some(PlaybackState::Playing)
    );

    for state in [
        PlaybackState::Null,
        PlaybackState::Ready,
        PlaybackState::Paused,
        PlaybackState::Playing,
    ] {
        let gst_state: gstreamer::State = state.into();
        assert_eq!(PlaybackState::from_gst(gst_state), Some(state));
    }
}

#[test]
fn test_playback_state_serializes_lowercase() {
    let json = serde_json::to_string(&PlaybackState::Paused).unwrap();
    assert_eq!(json, "\"paused\"");
    let state: PlaybackState = serde_json::from_str("\"ready\"").unwrap();
    assert_eq!(state, PlaybackState::Ready);
}
