// mod.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of gst-tutorials
//
// SPDX-License-Identifier: GPL-3.0-only

pub mod assembly;
pub mod bus;
pub mod media;
pub mod pad;
pub mod player;
pub mod state;
pub mod streams;

pub use assembly::{Assembly, PipelineSpec, StageSpec};
pub use bus::{BusEvent, Dispatcher, EosPolicy, EventKind, Outcome, Session, StreamError};
pub use media::{MediaKind, MediaType};
pub use pad::{PadOutcome, PadRouter};
pub use player::{MediaClock, Player};
pub use state::PlaybackState;
pub use streams::{StreamId, StreamInfo, StreamKind};




#[cfg(test)]
mod pad_tests;


#[cfg(test)]
mod state_tests;
