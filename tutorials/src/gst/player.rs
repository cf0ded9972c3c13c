// player.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of gst-tutorials
//
// SPDX-License-Identifier: GPL-3.0-only

use gstreamer::prelude::*;
use gstreamer::{self as gst};
use tracing::{debug, info, warn};

use crate::error::{Result, TutorialError};
use crate::gst::bus::TAGS_CHANGED;
use crate::gst::state::PlaybackState;
use crate::gst::streams::{StreamId, StreamInfo, StreamKind};

/// Source of position and duration, queried by the periodic refresh.
pub trait MediaClock {
    fn position(&self) -> Option<gst::ClockTime>;
    fn duration(&self) -> Option<gst::ClockTime>;
}

/// A `playbin` with the control operations of the player tutorial.
///
/// Cloning is cheap and shares the same element.
#[derive(Clone)]
pub struct Player {
    playbin: gst::Element,
}

impl Player {
    pub fn new(uri: &str) -> Result<Self> {
        let playbin = gst::ElementFactory::make("playbin")
            .name("playbin")
            .property("uri", uri)
            .build()
            .map_err(|_| TutorialError::Creation {
                factory: "playbin".to_string(),
                name: "playbin".to_string(),
            })?;

        for kind in StreamKind::ALL {
            playbin.connect(kind.tags_changed_signal(), false, |values| {
                let playbin = values[0].get::<gst::Element>().ok()?;
                post_tags_changed(&playbin);
                None
            });
        }

        info!("Created player for '{}'", uri);
        Ok(Self { playbin })
    }

    pub fn element(&self) -> &gst::Element {
        &self.playbin
    }

    pub fn bus(&self) -> Result<gst::Bus> {
        self.playbin.bus().ok_or(TutorialError::NoBus)
    }

    pub fn set_state(&self, state: PlaybackState) -> Result<()> {
        self.playbin
            .set_state(state.into())
            .map_err(|_| TutorialError::StateTransition(state))?;
        debug!("Player state change to {} requested", state);
        Ok(())
    }

    pub fn play(&self) -> Result<()> {
        self.set_state(PlaybackState::Playing)
    }

    pub fn pause(&self) -> Result<()> {
        self.set_state(PlaybackState::Paused)
    }

    /// Stop keeps the pipeline in Ready so it can be restarted.
    pub fn stop(&self) -> Result<()> {
        self.set_state(PlaybackState::Ready)
    }

    /// Flushing seek that snaps to the nearest key unit.
    pub fn seek(&self, position: gst::ClockTime) -> Result<()> {
        self.playbin
            .seek_simple(gst::SeekFlags::FLUSH | gst::SeekFlags::KEY_UNIT, position)
            .map_err(|e| TutorialError::Seek(e.to_string()))?;
        info!("Seeking to {}", position);
        Ok(())
    }

    pub fn stream_count(&self, kind: StreamKind) -> i32 {
        self.playbin.property::<i32>(kind.count_property())
    }

    /// Read the tags of every stream.
    pub fn analyze_streams(&self) -> Vec<StreamInfo> {
        let mut streams = Vec::new();
        for kind in StreamKind::ALL {
            for index in 0..self.stream_count(kind) {
                let tags = self
                    .playbin
                    .emit_by_name::<Option<gst::TagList>>(kind.tags_signal(), &[&index]);
                if let Some(tags) = tags {
                    streams.push(StreamInfo::from_tags(StreamId { kind, index }, &tags));
                }
            }
        }
        streams
    }

    /// Make `id` the active stream of its kind. Returns whether it changed.
    pub fn select_stream(&self, id: StreamId) -> Result<bool> {
        let count = self.stream_count(id.kind);
        if id.index >= count {
            return Err(TutorialError::InvalidCommand(format!(
                "{} does not exist ({} {} stream(s))",
                id,
                count,
                id.kind.label()
            )));
        }

        let property = id.kind.current_property();
        if self.playbin.property::<i32>(property) == id.index {
            return Ok(false);
        }

        info!("Selecting {} : {}", property, id.index);
        self.playbin.set_property(property, id.index);
        Ok(true)
    }

    /// Tear the pipeline down, joining its streaming threads.
    pub fn shutdown(&self) {
        if self.playbin.set_state(gst::State::Null).is_err() {
            warn!("Unable to set the player to the null state");
        }
    }
}

impl MediaClock for Player {
    fn position(&self) -> Option<gst::ClockTime> {
        self.playbin.query_position::<gst::ClockTime>()
    }

    fn duration(&self) -> Option<gst::ClockTime> {
        self.playbin.query_duration::<gst::ClockTime>()
    }
}

/// Notify the control thread that stream tags changed.
///
/// Called from a streaming thread, so the notification goes through the bus.
pub fn post_tags_changed(element: &gst::Element) {
    let msg = gst::message::Application::builder(gst::Structure::new_empty(TAGS_CHANGED))
        .src(element)
        .build();
    if element.post_message(msg).is_err() {
        warn!("Failed to post '{}' on the bus", TAGS_CHANGED);
    }
}
