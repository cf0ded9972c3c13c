// mod.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of gst-tutorials
//
// SPDX-License-Identifier: GPL-3.0-only

pub mod command;
pub mod dynamic_pipeline;
pub mod player;
pub mod static_pipeline;
pub mod view;

pub use command::Command;
pub use view::{PlayerView, SeekSlider, Status};




#[cfg(test)]
mod view_tests;
