// error.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of gst-tutorials
//
// SPDX-License-Identifier: GPL-3.0-only

use thiserror::Error;

use crate::gst::state::PlaybackState;

/// Process exit code for any construction, link or state transition failure.
pub const EXIT_CODE_FAILURE: i32 = -1;

#[derive(Error, Debug)]
pub enum TutorialError {
    #[error("Element '{name}' of type '{factory}' could not be created")]
    Creation { factory: String, name: String },

    #[error("Could not link '{from}' to '{to}': {reason}")]
    Link {
        from: String,
        to: String,
        reason: String,
    },

    #[error("Unable to set the pipeline to the {0} state")]
    StateTransition(PlaybackState),

    #[error("Error received from element {element}: {message}")]
    Stream {
        element: String,
        message: String,
        debug: Option<String>,
    },

    #[error("Unsupported pad type '{0}'")]
    UnsupportedPadType(String),

    #[error("Invalid property '{property}' on '{element}': {reason}")]
    Property {
        element: String,
        property: String,
        reason: String,
    },

    #[error("Invalid media type: {0}")]
    MediaType(String),

    #[error("Pipeline has no bus")]
    NoBus,

    #[error("Seek failed: {0}")]
    Seek(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("GStreamer error: {0}")]
    GStreamer(String),

    #[error("GLib error: {0}")]
    Glib(#[from] gstreamer::glib::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<gstreamer::glib::BoolError> for TutorialError {
    fn from(err: gstreamer::glib::BoolError) -> Self {
        TutorialError::GStreamer(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TutorialError>;
