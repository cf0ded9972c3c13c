// static_pipeline.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of gst-tutorials
//
// SPDX-License-Identifier: GPL-3.0-only

use tracing::info;

use crate::config::StaticArgs;
use crate::error::Result;
use crate::gst::assembly::{Assembly, PipelineSpec, StageSpec};
use crate::gst::bus::Dispatcher;

pub const PIPELINE_NAME: &str = "test-pipeline";

pub fn spec(args: &StaticArgs) -> PipelineSpec {
    let source = args
        .source_properties
        .iter()
        .fold(StageSpec::new(&args.source, "source"), |stage, (k, v)| {
            stage.property(k, v)
        });
    let sink = args
        .sink_properties
        .iter()
        .fold(StageSpec::new(&args.sink, "sink"), |stage, (k, v)| {
            stage.property(k, v)
        });

    PipelineSpec::new(PIPELINE_NAME)
        .stage(source)
        .stage(sink)
        .link("source", "sink")
}

/// Build, play and wait for error or end-of-stream. Returns the exit code.
pub fn run(args: &StaticArgs) -> Result<i32> {
    let assembly = Assembly::build(&spec(args))?;
    let bus = assembly.start()?;
    info!("Playing '{}' into '{}'", args.source, args.sink);

    let mut dispatcher = Dispatcher::new(assembly.pipeline());
    let outcome = dispatcher.run(&bus);
    info!("Static pipeline finished: {:?}", outcome);
    Ok(outcome.exit_code())
}
