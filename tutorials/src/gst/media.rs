// media.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of gst-tutorials
//
// SPDX-License-Identifier: GPL-3.0-only

use gstreamer as gst;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TutorialError};

/// Media type name reported for caps that carry no structure.
pub const ANY_CAPS: &str = "ANY";
pub const EMPTY_CAPS: &str = "EMPTY";

const RAW_SUBTYPE: &str = "x-raw";

/// Branch a decoded stream belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Video,
    Unknown,
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Audio => write!(f, "audio"),
            MediaKind::Video => write!(f, "video"),
            MediaKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// A `type/subtype` media type, as found in the name of a caps structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    media: String,
    subtype: String,
}

impl MediaType {
    pub fn media(&self) -> &str {
        &self.media
    }

    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// Only raw (decoded) audio and video are routable.
    pub fn kind(&self) -> MediaKind {
        if self.subtype != RAW_SUBTYPE {
            return MediaKind::Unknown;
        }
        match self.media.as_str() {
            "audio" => MediaKind::Audio,
            "video" => MediaKind::Video,
            _ => MediaKind::Unknown,
        }
    }

    /// Parse the media type of the first structure of `caps`.
    pub fn from_caps(caps: &gst::CapsRef) -> Result<Self> {
        if caps.is_any() {
            return Err(TutorialError::MediaType(ANY_CAPS.to_string()));
        }
        let structure = caps
            .structure(0)
            .ok_or_else(|| TutorialError::MediaType(EMPTY_CAPS.to_string()))?;
        structure.name().as_str().parse()
    }
}

fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | '.' | '_'))
}

impl std::str::FromStr for MediaType {
    type Err = TutorialError;

    fn from_str(s: &str) -> Result<Self> {
        let (media, subtype) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| TutorialError::MediaType(s.to_string()))?;

        if !is_token(media) || !is_token(subtype) {
            return Err(TutorialError::MediaType(s.to_string()));
        }

        Ok(Self {
            media: media.to_ascii_lowercase(),
            subtype: subtype.to_ascii_lowercase(),
        })
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.media, self.subtype)
    }
}
