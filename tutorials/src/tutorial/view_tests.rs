// view_tests.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of gst-tutorials
//
// SPDX-License-Identifier: GPL-3.0-only

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gstreamer as gst;

use super::view::*;
use crate::gst::player::MediaClock;
use crate::gst::state::PlaybackState;
use crate::gst::streams::{StreamId, StreamInfo, StreamKind};

#[derive(Default)]
struct FakeClock {
    position: Option<gst::ClockTime>,
    duration: Option<gst::ClockTime>,
    duration_queries: Cell<u32>,
}

impl MediaClock for FakeClock {
    fn position(&self) -> Option<gst::ClockTime> {
        self.position
    }

    fn duration(&self) -> Option<gst::ClockTime> {
        self.duration_queries.set(self.duration_queries.get() + 1);
        self.duration
    }
}

fn clock(position: u64, duration: Option<u64>) -> FakeClock {
    FakeClock {
        position: Some(gst::ClockTime::from_seconds(position)),
        duration: duration.map(gst::ClockTime::from_seconds),
        ..Default::default()
    }
}

/// A view whose slider records every value passed to its handler.
fn recording_view() -> (PlayerView, Rc<RefCell<Vec<f64>>>) {
    let seeks = Rc::new(RefCell::new(Vec::new()));
    let mut slider = SeekSlider::new();
    let recorded = Rc::clone(&seeks);
    slider.connect_value_changed(move |value| recorded.borrow_mut().push(value));
    (PlayerView::new(slider), seeks)
}

// =============================================================================
// Slider
// =============================================================================

#[test]
fn test_slider_user_move_notifies_handler() {
    let (mut view, seeks) = recording_view();
    view.slider.set_range(60.0);
    view.slider.set_value(12.5);
    assert_eq!(*seeks.borrow(), vec![12.5]);
}

#[test]
fn test_slider_silent_update_does_not_notify() {
    let (mut view, seeks) = recording_view();
    view.slider.set_range(60.0);
    view.slider.set_value_silently(30.0);
    assert_eq!(view.slider.value(), 30.0);
    assert!(seeks.borrow().is_empty());

    // The handler is unblocked again afterwards
    view.slider.set_value(40.0);
    assert_eq!(*seeks.borrow(), vec![40.0]);
}

#[test]
fn test_slider_clamps_to_range() {
    let mut slider = SeekSlider::new();
    slider.set_range(10.0);
    slider.set_value(25.0);
    assert_eq!(slider.value(), 10.0);
    slider.set_value(-3.0);
    assert_eq!(slider.value(), 0.0);
}

// =============================================================================
// Refresh
// =============================================================================

#[test]
fn test_refresh_skipped_before_preroll() {
    let (mut view, _) = recording_view();
    let clock = clock(5, Some(60));

    for state in [None, Some(PlaybackState::Null), Some(PlaybackState::Ready)] {
        assert!(!view.refresh(&clock, state));
    }
    assert_eq!(clock.duration_queries.get(), 0);
    assert_eq!(view.duration(), None);
}

#[test]
fn test_refresh_sets_range_and_position_without_seeking() {
    let (mut view, seeks) = recording_view();
    let clock = clock(5, Some(60));

    assert!(view.refresh(&clock, Some(PlaybackState::Playing)));

    assert_eq!(view.duration(), Some(gst::ClockTime::from_seconds(60)));
    assert_eq!(view.slider.max(), Some(60.0));
    assert_eq!(view.slider.value(), 5.0);
    assert!(seeks.borrow().is_empty());
}

#[test]
fn test_refresh_queries_duration_until_known() {
    let (mut view, _) = recording_view();
    let mut clock = clock(0, None);

    view.refresh(&clock, Some(PlaybackState::Paused));
    view.refresh(&clock, Some(PlaybackState::Paused));
    assert_eq!(clock.duration_queries.get(), 2);

    clock.duration = Some(gst::ClockTime::from_seconds(30));
    view.refresh(&clock, Some(PlaybackState::Paused));
    view.refresh(&clock, Some(PlaybackState::Paused));
    assert_eq!(clock.duration_queries.get(), 3);
}

#[test]
fn test_unknown_duration_keeps_position_and_seeks() {
    let (mut view, seeks) = recording_view();

    assert!(view.refresh(&clock(42, None), Some(PlaybackState::Playing)));
    assert_eq!(view.slider.max(), None);
    assert_eq!(view.position(), Some(gst::ClockTime::from_seconds(42)));
    assert_eq!(view.status(Some(PlaybackState::Playing)).position, 42.0);

    // A user move is not rewritten while the range is unknown
    view.slider.set_value(30.0);
    assert_eq!(*seeks.borrow(), vec![30.0]);
}

#[test]
fn test_reset_forgets_duration() {
    let (mut view, seeks) = recording_view();
    view.refresh(&clock(10, Some(60)), Some(PlaybackState::Playing));
    view.reset();
    assert_eq!(view.duration(), None);
    assert_eq!(view.position(), None);
    assert_eq!(view.slider.max(), None);
    assert_eq!(view.slider.value(), 0.0);
    assert!(seeks.borrow().is_empty());
}

// =============================================================================
// Status
// =============================================================================

#[test]
fn test_status_snapshot() {
    let (mut view, _) = recording_view();
    view.refresh(&clock(5, Some(60)), Some(PlaybackState::Playing));
    view.set_streams(vec![StreamInfo {
        id: StreamId {
            kind: StreamKind::Audio,
            index: 0,
        },
        codec: Some("Vorbis".to_string()),
        language: None,
        bitrate: None,
        tags: None,
    }]);

    let status = view.status(Some(PlaybackState::Playing));
    assert_eq!(status.to_string(), "playing 5.0s / 60.0s");

    let json = serde_json::to_value(&status).unwrap();
    assert_eq!(json["state"], "playing");
    assert_eq!(json["duration"], 60.0);
    assert_eq!(json["streams"][0]["id"], "AUDIO[0]");
}

#[test]
fn test_status_without_duration() {
    let (view, _) = recording_view();
    assert_eq!(view.status(None).to_string(), "unknown 0.0s / --");
}

#[test]
fn test_seconds_conversion() {
    assert_eq!(to_seconds(gst::ClockTime::from_mseconds(1500)), 1.5);
    assert_eq!(from_seconds(2.25), gst::ClockTime::from_mseconds(2250));
    assert_eq!(from_seconds(-1.0), gst::ClockTime::ZERO);
}
