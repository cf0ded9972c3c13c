// main.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of gst-tutorials
//
// SPDX-License-Identifier: GPL-3.0-only

use clap::Parser;
use tracing::{error, info};

use gsttut::config::log_filter;
use gsttut::tutorial::{dynamic_pipeline, player, static_pipeline};
use gsttut::{Config, Tutorial, EXIT_CODE_FAILURE};

fn main() {
    let config = Config::parse();

    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = log_filter(config.verbose, rust_log.as_deref());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = gstreamer::init() {
        error!("Failed to initialize GStreamer: {}", e);
        std::process::exit(EXIT_CODE_FAILURE);
    }
    info!("GStreamer initialized");

    let result = match &config.tutorial {
        Tutorial::Static(args) => static_pipeline::run(args),
        Tutorial::Dynamic(args) => dynamic_pipeline::run(args),
        Tutorial::Player(args) => player::run(args),
    };

    match result {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("{}", e);
            std::process::exit(EXIT_CODE_FAILURE);
        }
    }
}
