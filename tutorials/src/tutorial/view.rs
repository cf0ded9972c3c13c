// view.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of gst-tutorials
//
// SPDX-License-Identifier: GPL-3.0-only

use gstreamer as gst;
use serde::Serialize;
use tracing::debug;

use crate::gst::player::MediaClock;
use crate::gst::state::PlaybackState;
use crate::gst::streams::StreamInfo;

type ValueChanged = Box<dyn FnMut(f64)>;

pub fn to_seconds(time: gst::ClockTime) -> f64 {
    time.nseconds() as f64 / gst::ClockTime::SECOND.nseconds() as f64
}

/// Inverse of [`to_seconds`]; negative values clamp to zero.
pub fn from_seconds(seconds: f64) -> gst::ClockTime {
    gst::ClockTime::from_nseconds((seconds.max(0.0) * 1_000_000_000.0) as u64)
}

/// Seek slider model, in seconds.
///
/// User moves go through [`SeekSlider::set_value`] and notify the
/// value-changed handler. Periodic refreshes use
/// [`SeekSlider::set_value_silently`], which blocks the handler for the
/// duration of the update. Until a range is set the slider is unbounded
/// above, so positions in media of unknown length are kept as is.
#[derive(Default)]
pub struct SeekSlider {
    max: Option<f64>,
    value: f64,
    blocked: bool,
    handler: Option<ValueChanged>,
}

impl SeekSlider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect_value_changed<F>(&mut self, handler: F)
    where
        F: FnMut(f64) + 'static,
    {
        self.handler = Some(Box::new(handler));
    }

    pub fn set_range(&mut self, max: f64) {
        let max = max.max(0.0);
        self.max = Some(max);
        self.value = self.value.min(max);
    }

    pub fn clear_range(&mut self) {
        self.max = None;
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Move the slider, clamped to `[0, max]`, and notify the handler.
    pub fn set_value(&mut self, value: f64) {
        let value = value.max(0.0);
        self.value = match self.max {
            Some(max) => value.min(max),
            None => value,
        };
        if self.blocked {
            return;
        }
        if let Some(handler) = self.handler.as_mut() {
            handler(self.value);
        }
    }

    /// Move the slider without notifying the handler.
    pub fn set_value_silently(&mut self, value: f64) {
        self.blocked = true;
        self.set_value(value);
        self.blocked = false;
    }
}

/// Snapshot printed by the `status` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Status {
    pub state: Option<PlaybackState>,
    pub position: f64,
    pub duration: Option<f64>,
    pub streams: Vec<StreamInfo>,
}

/// Headless player window: seek slider plus the stream list.
pub struct PlayerView {
    pub slider: SeekSlider,
    position: Option<gst::ClockTime>,
    duration: Option<gst::ClockTime>,
    streams: Vec<StreamInfo>,
}

impl PlayerView {
    pub fn new(slider: SeekSlider) -> Self {
        Self {
            slider,
            position: None,
            duration: None,
            streams: Vec::new(),
        }
    }

    /// Periodic refresh. Position and duration are only queried once the
    /// pipeline is at least Paused; the duration is queried until known.
    /// Returns whether the view changed.
    pub fn refresh(&mut self, clock: &impl MediaClock, state: Option<PlaybackState>) -> bool {
        if !state.is_some_and(PlaybackState::is_prerolled) {
            return false;
        }

        if self.duration.is_none() {
            match clock.duration() {
                Some(duration) => {
                    debug!("Stream duration is {}", duration);
                    self.duration = Some(duration);
                    self.slider.set_range(to_seconds(duration));
                }
                None => debug!("Could not query current duration"),
            }
        }

        match clock.position() {
            Some(position) => {
                self.position = Some(position);
                self.slider.set_value_silently(to_seconds(position));
                true
            }
            None => false,
        }
    }

    /// Forget position and duration, e.g. when the pipeline went back to
    /// Ready.
    pub fn reset(&mut self) {
        self.position = None;
        self.duration = None;
        self.slider.clear_range();
        self.slider.set_value_silently(0.0);
    }

    /// Last position reported by the pipeline.
    pub fn position(&self) -> Option<gst::ClockTime> {
        self.position
    }

    pub fn duration(&self) -> Option<gst::ClockTime> {
        self.duration
    }

    pub fn set_streams(&mut self, streams: Vec<StreamInfo>) {
        self.streams = streams;
    }

    pub fn streams(&self) -> &[StreamInfo] {
        &self.streams
    }

    pub fn status(&self, state: Option<PlaybackState>) -> Status {
        Status {
            state,
            position: self.position.map(to_seconds).unwrap_or_default(),
            duration: self.duration.map(to_seconds),
            streams: self.streams.clone(),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self
            .state
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        match self.duration {
            Some(duration) => write!(
                f,
                "{} {:.1}s / {:.1}s",
                state, self.position, duration
            ),
            None => write!(f, "{} {:.1}s / --", state, self.position),
        }
    }
}
