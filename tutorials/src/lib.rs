// lib.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of gst-tutorials
//
// SPDX-License-Identifier: GPL-3.0-only

pub mod config;
pub mod error;
pub mod gst;
pub mod tutorial;

pub use config::{Config, Tutorial};
pub use error::{Result, TutorialError, EXIT_CODE_FAILURE};
pub use gst::{Assembly, Dispatcher, PadRouter, PipelineSpec, PlaybackState, Player, StageSpec};
