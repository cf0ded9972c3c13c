// state.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of gst-tutorials
//
// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

/// Playback state tracked by the dispatcher.
///
/// Variants are declared in transition order so `PartialOrd` follows the
/// pipeline lifecycle: `Null < Ready < Paused < Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    Null,
    Ready,
    Paused,
    Playing,
}

impl PlaybackState {
    /// Convert a GStreamer state, mapping `VoidPending` to `None`.
    pub fn from_gst(state: gstreamer::State) -> Option<Self> {
        match state {
            gstreamer::State::VoidPending => None,
            gstreamer::State::Null => Some(PlaybackState::Null),
            gstreamer::State::Ready => Some(PlaybackState::Ready),
            gstreamer::State::Paused => Some(PlaybackState::Paused),
            gstreamer::State::Playing => Some(PlaybackState::Playing),
        }
    }

    /// Position and duration are only queryable from Paused upwards.
    pub fn is_prerolled(self) -> bool {
        self >= PlaybackState::Paused
    }
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackState::Null => write!(f, "null"),
            PlaybackState::Ready => write!(f, "ready"),
            PlaybackState::Paused => write!(f, "paused"),
            PlaybackState::Playing => write!(f, "playing"),
        }
    }
}

impl std::str::FromStr for PlaybackState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "null" => Ok(PlaybackState::Null),
            "ready" => Ok(PlaybackState::Ready),
            "paused" => Ok(PlaybackState::Paused),
            "playing" => Ok(PlaybackState::Playing),
            _ => Err("Invalid state. Valid values: null, ready, paused, playing".to_string()),
        }
    }
}

impl From<PlaybackState> for gstreamer::State {
    fn from(state: PlaybackState) -> Self {
        match state {
            PlaybackState::Null => gstreamer::State::Null,
            PlaybackState::Ready => gstreamer::State::Ready,
            PlaybackState::Paused => gstreamer::State::Paused,
            PlaybackState::Playing => gstreamer::State::Playing,
        }
    }
}
