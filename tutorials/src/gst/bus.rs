// bus.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of gst-tutorials
//
// SPDX-License-Identifier: GPL-3.0-only

use gstreamer::prelude::*;
use gstreamer::{self as gst, MessageView};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::error::{TutorialError, EXIT_CODE_FAILURE};
use crate::gst::state::PlaybackState;

/// Structure name of the application message posted when stream tags change.
pub const TAGS_CHANGED: &str = "tags-changed";

/// Message types the dispatch loop waits for.
pub const DISPATCH_MASK: &[gst::MessageType] = &[
    gst::MessageType::StateChanged,
    gst::MessageType::Error,
    gst::MessageType::Eos,
    gst::MessageType::Application,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    StateChanged,
    Error,
    Eos,
    Application,
}

/// A decoded bus message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusEvent {
    StateChanged {
        old: PlaybackState,
        new: PlaybackState,
        pending: Option<PlaybackState>,
    },
    Error(StreamError),
    Eos,
    Application {
        name: String,
    },
}

impl BusEvent {
    /// Decode `msg`. Returns `None` for messages the dispatcher does not
    /// act on, including state changes of anything but `pipeline`.
    pub fn from_message(msg: &gst::Message, pipeline: &gst::Element) -> Option<Self> {
        match msg.view() {
            MessageView::StateChanged(state_changed) => {
                if msg.src() != Some(pipeline.upcast_ref::<gst::Object>()) {
                    return None;
                }
                let old = PlaybackState::from_gst(state_changed.old())?;
                let new = PlaybackState::from_gst(state_changed.current())?;
                let pending = PlaybackState::from_gst(state_changed.pending());
                Some(BusEvent::StateChanged { old, new, pending })
            }
            MessageView::Error(err) => Some(BusEvent::Error(StreamError {
                element: msg
                    .src()
                    .map(|s| s.name().to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.error().to_string(),
                debug: err.debug().map(|d| d.to_string()),
            })),
            MessageView::Eos(_) => Some(BusEvent::Eos),
            MessageView::Application(_) => Some(BusEvent::Application {
                name: msg.structure()?.name().to_string(),
            }),
            _ => None,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            BusEvent::StateChanged { .. } => EventKind::StateChanged,
            BusEvent::Error(_) => EventKind::Error,
            BusEvent::Eos => EventKind::Eos,
            BusEvent::Application { .. } => EventKind::Application,
        }
    }
}

/// Error reported by an element through the bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamError {
    pub element: String,
    pub message: String,
    pub debug: Option<String>,
}

impl From<StreamError> for TutorialError {
    fn from(err: StreamError) -> Self {
        TutorialError::Stream {
            element: err.element,
            message: err.message,
            debug: err.debug,
        }
    }
}

/// What end-of-stream does to the dispatch loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EosPolicy {
    /// Stop dispatching (single-shot tutorials).
    #[default]
    Terminate,
    /// Keep dispatching and wait for the user (player).
    KeepRunning,
}

/// Why the dispatch loop stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Eos,
    Error(StreamError),
    /// The bus was flushed before a terminal message arrived.
    Flushed,
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Eos => 0,
            Outcome::Error(_) | Outcome::Flushed => EXIT_CODE_FAILURE,
        }
    }
}

/// State shared with every handler, owned by the dispatcher.
#[derive(Debug, Default)]
pub struct Session {
    state: Option<PlaybackState>,
    terminate: bool,
    outcome: Option<Outcome>,
}

impl Session {
    /// Last state reported by the pipeline itself; `None` before any report.
    pub fn state(&self) -> Option<PlaybackState> {
        self.state
    }

    pub fn is_prerolled(&self) -> bool {
        self.state.is_some_and(PlaybackState::is_prerolled)
    }

    pub fn is_terminated(&self) -> bool {
        self.terminate
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }
}

type Handler<C> = Box<dyn FnMut(&BusEvent, &Session, &mut C)>;

/// Bus message dispatcher.
///
/// Built-in handling covers state tracking, error and end-of-stream; the
/// handlers registered with [`Dispatcher::on`] then run in registration
/// order with the caller's context `C`.
pub struct Dispatcher<C = ()> {
    pipeline: gst::Element,
    eos_policy: EosPolicy,
    session: Session,
    context: C,
    handlers: Vec<(EventKind, Handler<C>)>,
}

impl Dispatcher<()> {
    pub fn new(pipeline: &impl IsA<gst::Element>) -> Self {
        Self::with_context(pipeline, ())
    }
}

impl<C> Dispatcher<C> {
    pub fn with_context(pipeline: &impl IsA<gst::Element>, context: C) -> Self {
        Self {
            pipeline: pipeline.upcast_ref::<gst::Element>().clone(),
            eos_policy: EosPolicy::default(),
            session: Session::default(),
            context,
            handlers: Vec::new(),
        }
    }

    pub fn eos_policy(mut self, policy: EosPolicy) -> Self {
        self.eos_policy = policy;
        self
    }

    /// Register `handler` for events of `kind`.
    pub fn on<F>(&mut self, kind: EventKind, handler: F) -> &mut Self
    where
        F: FnMut(&BusEvent, &Session, &mut C) + 'static,
    {
        self.handlers.push((kind, Box::new(handler)));
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> Option<PlaybackState> {
        self.session.state
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn is_terminated(&self) -> bool {
        self.session.terminate
    }

    /// Ask the loop to exit once the current message is handled.
    pub fn request_termination(&mut self) {
        self.session.terminate = true;
    }

    /// Block on `bus` until the loop is asked to terminate.
    pub fn run(&mut self, bus: &gst::Bus) -> Outcome {
        while !self.session.terminate {
            match bus.timed_pop_filtered(gst::ClockTime::NONE, DISPATCH_MASK) {
                Some(msg) => {
                    self.handle_message(&msg);
                }
                None => {
                    warn!("Bus returned no message, it is flushing");
                    self.session.terminate = true;
                    self.session.outcome.get_or_insert(Outcome::Flushed);
                }
            }
        }
        self.session.outcome.clone().unwrap_or(Outcome::Flushed)
    }

    /// Decode and dispatch a single message. Returns the decoded event.
    pub fn handle_message(&mut self, msg: &gst::Message) -> Option<BusEvent> {
        let Some(event) = BusEvent::from_message(msg, &self.pipeline) else {
            if let MessageView::StateChanged(_) = msg.view() {
                debug!(
                    "Ignoring state change from '{}'",
                    msg.src().map(|s| s.name().to_string()).unwrap_or_default()
                );
            }
            return None;
        };
        self.dispatch(&event);
        Some(event)
    }

    /// Apply the built-in handling of `event`, then run its handlers.
    pub fn dispatch(&mut self, event: &BusEvent) {
        match event {
            BusEvent::StateChanged { old, new, .. } => {
                info!("Pipeline state changed from {} to {}", old, new);
                self.session.state = Some(*new);
            }
            BusEvent::Error(err) => {
                error!(
                    "Error received from element {}: {}",
                    err.element, err.message
                );
                error!(
                    "Debugging information: {}",
                    err.debug.as_deref().unwrap_or("none")
                );
                self.set_ready();
                self.session.outcome = Some(Outcome::Error(err.clone()));
                self.session.terminate = true;
            }
            BusEvent::Eos => {
                info!("End-Of-Stream reached");
                self.set_ready();
                if self.eos_policy == EosPolicy::Terminate {
                    self.session.outcome = Some(Outcome::Eos);
                    self.session.terminate = true;
                }
            }
            BusEvent::Application { name } => {
                debug!("Application message '{}'", name);
            }
        }

        let kind = event.kind();
        for (handler_kind, handler) in self.handlers.iter_mut() {
            if *handler_kind == kind {
                handler(event, &self.session, &mut self.context);
            }
        }
    }

    fn set_ready(&self) {
        if self.pipeline.set_state(gst::State::Ready).is_err() {
            warn!(
                "Unable to set pipeline '{}' to the ready state",
                self.pipeline.name()
            );
        }
    }
}
