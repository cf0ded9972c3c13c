// command.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of gst-tutorials
//
// SPDX-License-Identifier: GPL-3.0-only

use crate::error::TutorialError;
use crate::gst::streams::StreamId;

pub const HELP: &str = "\
Commands:
  play              Start or resume playback
  pause             Pause playback
  stop              Stop playback (back to ready)
  seek <seconds>    Move the seek slider
  select <STREAM>   Select a stream, e.g. AUDIO[1]
  streams           List the streams and their tags
  status            Print state, position and duration
  help              Print this help
  quit              Leave the player";

/// A line typed on the player's standard input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Play,
    Pause,
    Stop,
    Seek(f64),
    Select(StreamId),
    Streams,
    Status,
    Help,
    Quit,
}

impl std::str::FromStr for Command {
    type Err = TutorialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let Some(name) = words.next() else {
            return Err(TutorialError::InvalidCommand("empty command".to_string()));
        };
        let argument = words.next();
        if words.next().is_some() {
            return Err(TutorialError::InvalidCommand(format!(
                "too many arguments to '{}'",
                name
            )));
        }

        let command = match (name.to_lowercase().as_str(), argument) {
            ("play", None) => Command::Play,
            ("pause", None) => Command::Pause,
            ("stop", None) => Command::Stop,
            ("seek", Some(seconds)) => match seconds.parse::<f64>() {
                Ok(seconds) if seconds.is_finite() && seconds >= 0.0 => Command::Seek(seconds),
                _ => {
                    return Err(TutorialError::InvalidCommand(format!(
                        "'{}' is not a position in seconds",
                        seconds
                    )))
                }
            },
            ("select", Some(stream)) => Command::Select(stream.parse()?),
            ("streams", None) => Command::Streams,
            ("status", None) => Command::Status,
            ("help" | "?", None) => Command::Help,
            ("quit" | "exit" | "q", None) => Command::Quit,
            ("seek" | "select", None) => {
                return Err(TutorialError::InvalidCommand(format!(
                    "'{}' needs an argument",
                    name
                )))
            }
            _ => {
                return Err(TutorialError::InvalidCommand(format!(
                    "unknown command '{}', type 'help'",
                    s.trim()
                )))
            }
        };
        Ok(command)
    }
}
