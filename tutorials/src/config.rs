// config.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of gst-tutorials
//
// SPDX-License-Identifier: GPL-3.0-only

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Media played by the dynamic pipeline tutorial.
pub const DEFAULT_DYNAMIC_URI: &str =
    "https://gstreamer.freedesktop.org/data/media/sintel_trailer-480p.webm";

/// Media played by the player tutorial; it carries several audio and
/// subtitle streams.
pub const DEFAULT_PLAYER_URI: &str =
    "https://gstreamer.freedesktop.org/data/media/sintel_cropped_multilingual.webm";

#[derive(Parser, Debug)]
#[command(name = "gst-tutorials")]
#[command(author = "Stéphane Cerveau")]
#[command(version)]
#[command(about = "GStreamer basic tutorials: static and dynamic pipelines, and a media player")]
pub struct Config {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub tutorial: Tutorial,
}

#[derive(Subcommand, Debug)]
pub enum Tutorial {
    /// Source linked to a sink, run until error or end-of-stream
    Static(StaticArgs),
    /// uridecodebin whose pads are linked as they appear
    Dynamic(DynamicArgs),
    /// playbin driven from the terminal
    Player(PlayerArgs),
}

#[derive(Args, Debug)]
pub struct StaticArgs {
    /// Source element factory
    #[arg(long, default_value = "videotestsrc")]
    pub source: String,

    /// Sink element factory
    #[arg(long, default_value = "autovideosink")]
    pub sink: String,

    /// Source property, KEY=VALUE (repeatable)
    #[arg(short = 's', long = "source-property", value_parser = parse_property)]
    pub source_properties: Vec<(String, String)>,

    /// Sink property, KEY=VALUE (repeatable)
    #[arg(short = 'k', long = "sink-property", value_parser = parse_property)]
    pub sink_properties: Vec<(String, String)>,
}

#[derive(Args, Debug)]
pub struct DynamicArgs {
    /// Media URI
    #[arg(short, long, env = "GST_TUTORIALS_URI", default_value = DEFAULT_DYNAMIC_URI)]
    pub uri: String,

    /// Audio sink element factory
    #[arg(long, default_value = "autoaudiosink")]
    pub audio_sink: String,

    /// Also link the video pad to a video branch
    #[arg(long)]
    pub video: bool,

    /// Video sink element factory, used with --video
    #[arg(long, default_value = "autovideosink")]
    pub video_sink: String,
}

#[derive(Args, Debug)]
pub struct PlayerArgs {
    /// Media URI
    #[arg(short, long, env = "GST_TUTORIALS_URI", default_value = DEFAULT_PLAYER_URI)]
    pub uri: String,

    /// Quit at end-of-stream instead of waiting for commands
    #[arg(long)]
    pub exit_on_eos: bool,

    /// Print status and stream lists as JSON
    #[arg(long)]
    pub json: bool,
}

/// Parse a `KEY=VALUE` property override.
pub fn parse_property(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("'{}' is not KEY=VALUE", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("'{}' has an empty property name", s));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

/// Log filter: `rust_log` when it is set and valid, otherwise this crate at
/// info level, or debug level when `verbose`.
pub fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if let Some(directives) = rust_log.filter(|d| !d.trim().is_empty()) {
        match EnvFilter::try_new(directives) {
            Ok(filter) => return filter,
            Err(e) => eprintln!("Ignoring invalid RUST_LOG '{}': {}", directives, e),
        }
    }

    let level = if verbose { "debug" } else { "info" };
    EnvFilter::new(format!("gsttut={level},gst_tutorials={level}"))
}
