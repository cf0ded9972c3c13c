// pad_tests.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of gst-tutorials
//
// SPDX-License-Identifier: GPL-3.0-only

use std::sync::Arc;

use gstreamer as gst;
use gstreamer::prelude::*;

use super::media::MediaKind;
use super::pad::*;
use crate::error::TutorialError;

fn init_gstreamer() {
    let _ = gst::init();
}

/// A sometimes source pad whose template advertises `media_type`,
/// standing in for a pad created by a demuxing source.
fn dynamic_pad(name: &str, media_type: &str) -> gst::Pad {
    let templ = gst::PadTemplate::new(
        "src_%u",
        gst::PadDirection::Src,
        gst::PadPresence::Sometimes,
        &gst::Caps::new_empty_simple(media_type),
    )
    .unwrap();
    gst::Pad::builder_from_template(&templ).name(name).build()
}

fn sink(name: &str) -> gst::Element {
    gst::ElementFactory::make("fakesink")
        .name(name)
        .build()
        .unwrap()
}

fn sink_pad(element: &gst::Element) -> gst::Pad {
    element.static_pad("sink").unwrap()
}

// =============================================================================
// Single branch (audio only)
// =============================================================================

#[test]
fn test_audio_pad_is_linked() {
    init_gstreamer();
    let audio_sink = sink("audio-sink");
    let router = PadRouter::new()
        .branch(MediaKind::Audio, &audio_sink)
        .unwrap();

    let pad = dynamic_pad("src_0", "audio/x-raw");
    let outcome = router.route("source", &pad);

    assert!(outcome.is_linked());
    assert_eq!(
        outcome,
        PadOutcome::Linked {
            kind: MediaKind::Audio,
            media_type: "audio/x-raw".to_string(),
        }
    );
    assert_eq!(pad.peer(), Some(sink_pad(&audio_sink)));
}

#[test]
fn test_second_identical_pad_is_skipped() {
    init_gstreamer();
    let audio_sink = sink("audio-sink");
    let router = PadRouter::new()
        .branch(MediaKind::Audio, &audio_sink)
        .unwrap();

    let first = dynamic_pad("src_0", "audio/x-raw");
    let second = dynamic_pad("src_1", "audio/x-raw");

    assert!(router.route("source", &first).is_linked());
    let outcome = router.route("source", &second);
    assert_eq!(
        outcome,
        PadOutcome::AlreadyLinked {
            kind: MediaKind::Audio
        }
    );
    assert!(outcome.error("src_1").is_none());

    // The first link is untouched
    assert_eq!(first.peer(), Some(sink_pad(&audio_sink)));
    assert!(!second.is_linked());
}

#[test]
fn test_routing_the_same_pad_twice_is_idempotent() {
    init_gstreamer();
    let audio_sink = sink("audio-sink");
    let router = PadRouter::new()
        .branch(MediaKind::Audio, &audio_sink)
        .unwrap();

    let pad = dynamic_pad("src_0", "audio/x-raw");
    assert!(router.route("source", &pad).is_linked());
    assert!(matches!(
        router.route("source", &pad),
        PadOutcome::AlreadyLinked { .. }
    ));
    assert_eq!(pad.peer(), Some(sink_pad(&audio_sink)));
}

#[test]
fn test_unregistered_type_is_ignored() {
    init_gstreamer();
    let audio_sink = sink("audio-sink");
    let router = PadRouter::new()
        .branch(MediaKind::Audio, &audio_sink)
        .unwrap();

    let pad = dynamic_pad("src_0", "text/x-raw");
    let outcome = router.route("source", &pad);

    assert_eq!(
        outcome,
        PadOutcome::Unsupported {
            media_type: "text/x-raw".to_string()
        }
    );
    assert!(matches!(
        outcome.error("src_0"),
        Some(TutorialError::UnsupportedPadType(t)) if t == "text/x-raw"
    ));
    assert!(!pad.is_linked());
    assert!(!sink_pad(&audio_sink).is_linked());
}

#[test]
fn test_video_pad_without_video_branch_is_dropped() {
    init_gstreamer();
    let audio_sink = sink("audio-sink");
    let router = PadRouter::new()
        .branch(MediaKind::Audio, &audio_sink)
        .unwrap();

    let pad = dynamic_pad("src_0", "video/x-raw");
    assert_eq!(
        router.route("source", &pad),
        PadOutcome::NoBranch {
            kind: MediaKind::Video
        }
    );
    assert!(!sink_pad(&audio_sink).is_linked());
}

#[test]
fn test_pad_with_any_caps_is_unsupported() {
    init_gstreamer();
    let audio_sink = sink("audio-sink");
    let router = PadRouter::new()
        .branch(MediaKind::Audio, &audio_sink)
        .unwrap();

    // No template: caps query answers ANY
    let pad = gst::Pad::builder(gst::PadDirection::Src).name("src_0").build();
    assert!(matches!(
        router.route("source", &pad),
        PadOutcome::Unsupported { .. }
    ));
    assert!(!sink_pad(&audio_sink).is_linked());
}

// =============================================================================
// Two branches (audio and video)
// =============================================================================

#[test]
fn test_branches_are_routed_independently() {
    init_gstreamer();
    let audio_sink = sink("audio-sink");
    let video_sink = sink("video-sink");
    let router = PadRouter::new()
        .branch(MediaKind::Audio, &audio_sink)
        .unwrap()
        .branch(MediaKind::Video, &video_sink)
        .unwrap();

    let video = dynamic_pad("src_0", "video/x-raw");
    let audio = dynamic_pad("src_1", "audio/x-raw");
    let extra_audio = dynamic_pad("src_2", "audio/x-raw");

    assert_eq!(
        router.route("source", &video),
        PadOutcome::Linked {
            kind: MediaKind::Video,
            media_type: "video/x-raw".to_string(),
        }
    );
    assert_eq!(
        router.route("source", &audio),
        PadOutcome::Linked {
            kind: MediaKind::Audio,
            media_type: "audio/x-raw".to_string(),
        }
    );
    assert_eq!(
        router.route("source", &extra_audio),
        PadOutcome::AlreadyLinked {
            kind: MediaKind::Audio
        }
    );

    assert_eq!(video.peer(), Some(sink_pad(&video_sink)));
    assert_eq!(audio.peer(), Some(sink_pad(&audio_sink)));
}

#[test]
fn test_branch_registration_replaces_same_kind() {
    init_gstreamer();
    let first = sink("first");
    let second = sink("second");
    let router = PadRouter::new()
        .branch(MediaKind::Audio, &first)
        .unwrap()
        .branch(MediaKind::Audio, &second)
        .unwrap();

    assert_eq!(router.kinds().collect::<Vec<_>>(), vec![MediaKind::Audio]);

    let pad = dynamic_pad("src_0", "audio/x-raw");
    assert!(router.route("source", &pad).is_linked());
    assert_eq!(pad.peer(), Some(sink_pad(&second)));
}

#[test]
fn test_branch_requires_static_sink_pad() {
    init_gstreamer();
    let source = gst::ElementFactory::make("fakesrc").build().unwrap();
    assert!(matches!(
        PadRouter::new().branch(MediaKind::Audio, &source),
        Err(TutorialError::Link { .. })
    ));
}

#[test]
fn test_concurrent_routes_link_once() {
    init_gstreamer();
    let audio_sink = sink("audio-sink");
    let router = Arc::new(
        PadRouter::new()
            .branch(MediaKind::Audio, &audio_sink)
            .unwrap(),
    );

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let router = Arc::clone(&router);
            std::thread::spawn(move || {
                let pad = dynamic_pad(&format!("src_{}", i), "audio/x-raw");
                router.route("source", &pad)
            })
        })
        .collect();

    let outcomes: Vec<PadOutcome> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(outcomes.iter().filter(|o| o.is_linked()).count(), 1);
    assert!(outcomes
        .iter()
        .all(|o| o.is_linked() || matches!(o, PadOutcome::AlreadyLinked { .. })));
}

#[test]
fn test_attach_routes_pads_added_to_element() {
    init_gstreamer();
    let audio_sink = sink("audio-sink");
    let router = Arc::new(
        PadRouter::new()
            .branch(MediaKind::Audio, &audio_sink)
            .unwrap(),
    );

    // Adding a pad to an element emits pad-added on the adding thread
    let source = gst::ElementFactory::make("identity")
        .name("source")
        .build()
        .unwrap();
    router.attach(&source);

    let pad = dynamic_pad("src_0", "audio/x-raw");
    source.add_pad(&pad).unwrap();

    assert_eq!(pad.peer(), Some(sink_pad(&audio_sink)));
}
