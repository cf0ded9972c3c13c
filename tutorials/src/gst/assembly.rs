// assembly.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of gst-tutorials
//
// SPDX-License-Identifier: GPL-3.0-only

use std::collections::HashMap;

use gstreamer as gst;
use gstreamer::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{Result, TutorialError};
use crate::gst::state::PlaybackState;

/// Timeout for waiting on a state change in seconds
pub const STATE_CHANGE_TIMEOUT_SECS: u64 = 30;

/// Descriptor of a single processing stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSpec {
    pub factory: String,
    pub name: String,
    /// Property overrides, deserialized against the property type on build.
    pub properties: Vec<(String, String)>,
}

impl StageSpec {
    pub fn new(factory: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            factory: factory.into(),
            name: name.into(),
            properties: Vec::new(),
        }
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push((key.into(), value.into()));
        self
    }
}

/// Declarative description of a pipeline: its stages and static links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSpec {
    pub name: String,
    pub stages: Vec<StageSpec>,
    pub links: Vec<(String, String)>,
}

impl PipelineSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stages: Vec::new(),
            links: Vec::new(),
        }
    }

    pub fn stage(mut self, stage: StageSpec) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn link(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.links.push((from.into(), to.into()));
        self
    }
}

/// Apply a string property override, validating it against the element's
/// `ParamSpec` first so that bad input is an error rather than a panic.
pub fn apply_property(element: &gst::Element, key: &str, value: &str) -> Result<()> {
    let property_error = |reason: String| TutorialError::Property {
        element: element.name().to_string(),
        property: key.to_string(),
        reason,
    };

    let pspec = element
        .find_property(key)
        .ok_or_else(|| property_error("no such property".to_string()))?;

    if !pspec.flags().contains(gst::glib::ParamFlags::WRITABLE) {
        return Err(property_error("property is not writable".to_string()));
    }

    let gvalue = <gst::glib::Value as GstValueExt>::deserialize(value, pspec.value_type())
        .map_err(|_| {
            property_error(format!(
                "cannot convert '{}' to {}",
                value,
                pspec.value_type().name()
            ))
        })?;

    element.set_property_from_value(key, &gvalue);
    debug!("Set {}:{} = {}", element.name(), key, value);
    Ok(())
}

/// An instantiated pipeline together with its named stages.
pub struct Assembly {
    pipeline: gst::Pipeline,
    stages: HashMap<String, gst::Element>,
}

impl Assembly {
    /// Instantiate, add and statically link every stage of `spec`.
    ///
    /// Nothing is started: dynamic pad handlers must be attached before
    /// calling [`Assembly::start`].
    pub fn build(spec: &PipelineSpec) -> Result<Self> {
        let pipeline = gst::Pipeline::with_name(&spec.name);
        let mut stages = HashMap::with_capacity(spec.stages.len());

        for stage in &spec.stages {
            let element = gst::ElementFactory::make(&stage.factory)
                .name(stage.name.as_str())
                .build()
                .map_err(|_| TutorialError::Creation {
                    factory: stage.factory.clone(),
                    name: stage.name.clone(),
                })?;

            for (key, value) in &stage.properties {
                apply_property(&element, key, value)?;
            }

            pipeline.add(&element)?;
            stages.insert(stage.name.clone(), element);
        }

        let assembly = Self { pipeline, stages };

        for (from, to) in &spec.links {
            assembly.link(from, to)?;
        }

        info!(
            "Assembled pipeline '{}' with {} stage(s) and {} static link(s)",
            spec.name,
            spec.stages.len(),
            spec.links.len()
        );

        Ok(assembly)
    }

    fn link(&self, from: &str, to: &str) -> Result<()> {
        let link_error = |reason: &str| TutorialError::Link {
            from: from.to_string(),
            to: to.to_string(),
            reason: reason.to_string(),
        };

        let src = self.stage(from).ok_or_else(|| link_error("unknown stage"))?;
        let sink = self.stage(to).ok_or_else(|| link_error("unknown stage"))?;

        src.link(sink).map_err(|e| link_error(&e.to_string()))?;
        debug!("Linked '{}' -> '{}'", from, to);
        Ok(())
    }

    pub fn stage(&self, name: &str) -> Option<&gst::Element> {
        self.stages.get(name)
    }

    pub fn pipeline(&self) -> &gst::Pipeline {
        &self.pipeline
    }

    pub fn bus(&self) -> Result<gst::Bus> {
        self.pipeline.bus().ok_or(TutorialError::NoBus)
    }

    /// Request a state change; an asynchronous change counts as accepted.
    pub fn set_state(&self, state: PlaybackState) -> Result<gst::StateChangeSuccess> {
        let success = self
            .pipeline
            .set_state(state.into())
            .map_err(|_| TutorialError::StateTransition(state))?;
        info!(
            "Pipeline '{}' state change to {} requested ({:?})",
            self.pipeline.name(),
            state,
            success
        );
        Ok(success)
    }

    /// Set the pipeline to Playing and hand back its bus for dispatching.
    pub fn start(&self) -> Result<gst::Bus> {
        let bus = self.bus()?;
        self.set_state(PlaybackState::Playing)?;
        Ok(bus)
    }

    /// Current state, waiting at most `timeout` for a pending change.
    pub fn state(&self, timeout: gst::ClockTime) -> Option<PlaybackState> {
        let (_result, current, _pending) = self.pipeline.state(timeout);
        PlaybackState::from_gst(current)
    }

    /// Wait for an asynchronous state change to complete.
    pub fn wait_for_state(&self) -> Option<PlaybackState> {
        self.state(gst::ClockTime::from_seconds(STATE_CHANGE_TIMEOUT_SECS))
    }
}

impl Drop for Assembly {
    fn drop(&mut self) {
        debug!("Dropping pipeline '{}'", self.pipeline.name());
        if self.pipeline.set_state(gst::State::Null).is_err() {
            warn!(
                "Pipeline '{}' could not be set to the null state",
                self.pipeline.name()
            );
        }
    }
}
