// pad.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of gst-tutorials
//
// SPDX-License-Identifier: GPL-3.0-only

use std::sync::{Arc, Mutex};

use gstreamer::prelude::*;
use gstreamer::{self as gst, glib};
use tracing::{info, warn};

use crate::error::{Result, TutorialError};
use crate::gst::media::{MediaKind, MediaType};

/// Result of resolving one dynamically created pad.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PadOutcome {
    Linked { kind: MediaKind, media_type: String },
    AlreadyLinked { kind: MediaKind },
    Unsupported { media_type: String },
    NoBranch { kind: MediaKind },
    Failed { kind: MediaKind, reason: String },
}

impl PadOutcome {
    pub fn is_linked(&self) -> bool {
        matches!(self, PadOutcome::Linked { .. })
    }

    /// The error describing a dropped stream, if the pad was dropped.
    pub fn error(&self, pad_name: &str) -> Option<TutorialError> {
        match self {
            PadOutcome::Unsupported { media_type } => {
                Some(TutorialError::UnsupportedPadType(media_type.clone()))
            }
            PadOutcome::Failed { kind, reason } => Some(TutorialError::Link {
                from: pad_name.to_string(),
                to: format!("{} branch", kind),
                reason: reason.clone(),
            }),
            _ => None,
        }
    }
}

struct Branch {
    kind: MediaKind,
    sink_pad: gst::Pad,
}

/// Routes new source pads to the sink pad registered for their media kind.
///
/// The router is shared with `pad-added` handlers that run on streaming
/// threads. Link attempts are serialized so a branch is linked at most once.
#[derive(Default)]
pub struct PadRouter {
    branches: Vec<Branch>,
    link_lock: Mutex<()>,
}

impl PadRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `element`'s static sink pad as the target for `kind`.
    pub fn branch(self, kind: MediaKind, element: &gst::Element) -> Result<Self> {
        let sink_pad = element.static_pad("sink").ok_or_else(|| TutorialError::Link {
            from: kind.to_string(),
            to: element.name().to_string(),
            reason: "element has no static sink pad".to_string(),
        })?;
        Ok(self.branch_pad(kind, sink_pad))
    }

    pub fn branch_pad(mut self, kind: MediaKind, sink_pad: gst::Pad) -> Self {
        self.branches.retain(|b| b.kind != kind);
        self.branches.push(Branch { kind, sink_pad });
        self
    }

    pub fn kinds(&self) -> impl Iterator<Item = MediaKind> + '_ {
        self.branches.iter().map(|b| b.kind)
    }

    fn sink_pad(&self, kind: MediaKind) -> Option<&gst::Pad> {
        self.branches
            .iter()
            .find(|b| b.kind == kind)
            .map(|b| &b.sink_pad)
    }

    /// Connect the router to `element`'s `pad-added` signal.
    pub fn attach(self: &Arc<Self>, element: &gst::Element) -> glib::SignalHandlerId {
        let router = Arc::clone(self);
        element.connect_pad_added(move |src, pad| {
            router.route(&src.name(), pad);
        })
    }

    /// Resolve one new pad: classify it, then link it to its branch unless
    /// that branch is already linked.
    pub fn route(&self, src_name: &str, new_pad: &gst::Pad) -> PadOutcome {
        let pad_name = new_pad.name();
        info!("Received new pad '{}' from '{}'", pad_name, src_name);

        let outcome = self.resolve(new_pad);
        match &outcome {
            PadOutcome::Linked { media_type, .. } => {
                info!("Link succeeded (type '{}')", media_type)
            }
            PadOutcome::AlreadyLinked { kind } => {
                info!("The {} branch is already linked, ignoring", kind)
            }
            PadOutcome::NoBranch { kind } => {
                info!("No {} branch registered, ignoring pad '{}'", kind, pad_name)
            }
            PadOutcome::Unsupported { media_type } => info!(
                "It has type '{}' which is not raw audio or video, ignoring",
                media_type
            ),
            PadOutcome::Failed { .. } => {
                if let Some(err) = outcome.error(&pad_name) {
                    warn!("{}", err);
                }
            }
        }
        outcome
    }

    fn resolve(&self, new_pad: &gst::Pad) -> PadOutcome {
        let caps = new_pad
            .current_caps()
            .unwrap_or_else(|| new_pad.query_caps(None));

        let media_type = match MediaType::from_caps(&caps) {
            Ok(media_type) => media_type,
            Err(TutorialError::MediaType(name)) => {
                return PadOutcome::Unsupported { media_type: name }
            }
            Err(e) => {
                return PadOutcome::Unsupported {
                    media_type: e.to_string(),
                }
            }
        };

        let kind = media_type.kind();
        if kind == MediaKind::Unknown {
            return PadOutcome::Unsupported {
                media_type: media_type.to_string(),
            };
        }

        let Some(sink_pad) = self.sink_pad(kind) else {
            return PadOutcome::NoBranch { kind };
        };

        let _guard = self.link_lock.lock().unwrap_or_else(|e| e.into_inner());

        if sink_pad.is_linked() {
            return PadOutcome::AlreadyLinked { kind };
        }

        match new_pad.link(sink_pad) {
            Ok(_) => PadOutcome::Linked {
                kind,
                media_type: media_type.to_string(),
            },
            Err(gst::PadLinkError::WasLinked) => PadOutcome::AlreadyLinked { kind },
            Err(e) => PadOutcome::Failed {
                kind,
                reason: format!("{:?}", e),
            },
        }
    }
}
