// dynamic_pipeline.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of gst-tutorials
//
// SPDX-License-Identifier: GPL-3.0-only

use std::sync::Arc;

use tracing::info;

use crate::config::DynamicArgs;
use crate::error::{Result, TutorialError};
use crate::gst::assembly::{Assembly, PipelineSpec, StageSpec};
use crate::gst::bus::Dispatcher;
use crate::gst::media::MediaKind;
use crate::gst::pad::PadRouter;

pub const PIPELINE_NAME: &str = "test-pipeline";

/// The decoder is left unlinked: its pads only exist once the media is
/// being read.
pub fn spec(args: &DynamicArgs) -> PipelineSpec {
    let mut spec = PipelineSpec::new(PIPELINE_NAME)
        .stage(StageSpec::new("uridecodebin", "source").property("uri", &args.uri))
        .stage(StageSpec::new("audioconvert", "convert"))
        .stage(StageSpec::new(&args.audio_sink, "sink"))
        .link("convert", "sink");

    if args.video {
        spec = spec
            .stage(StageSpec::new("videoconvert", "video-convert"))
            .stage(StageSpec::new(&args.video_sink, "video-sink"))
            .link("video-convert", "video-sink");
    }
    spec
}

/// Router sending raw audio to the converter and, when built, raw video to
/// the video converter.
pub fn router(assembly: &Assembly) -> Result<PadRouter> {
    let stage = |name: &str| {
        assembly.stage(name).ok_or_else(|| TutorialError::Link {
            from: "source".to_string(),
            to: name.to_string(),
            reason: "unknown stage".to_string(),
        })
    };

    let mut router = PadRouter::new().branch(MediaKind::Audio, stage("convert")?)?;
    if let Some(convert) = assembly.stage("video-convert") {
        router = router.branch(MediaKind::Video, convert)?;
    }
    Ok(router)
}

/// Build, attach the router, play and wait for error or end-of-stream.
/// Returns the exit code.
pub fn run(args: &DynamicArgs) -> Result<i32> {
    let assembly = Assembly::build(&spec(args))?;
    let router = Arc::new(router(&assembly)?);
    let source = assembly.stage("source").ok_or_else(|| TutorialError::Link {
        from: "source".to_string(),
        to: "convert".to_string(),
        reason: "unknown stage".to_string(),
    })?;
    router.attach(source);

    let bus = assembly.start()?;
    info!("Playing '{}'", args.uri);

    let mut dispatcher = Dispatcher::new(assembly.pipeline());
    let outcome = dispatcher.run(&bus);
    info!("Dynamic pipeline finished: {:?}", outcome);
    Ok(outcome.exit_code())
}
