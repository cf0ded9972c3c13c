// streams.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of gst-tutorials
//
// SPDX-License-Identifier: GPL-3.0-only

use gstreamer as gst;
use serde::{Serialize, Serializer};

use crate::error::TutorialError;

/// Kind of elementary stream exposed by playbin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    Video,
    Audio,
    Text,
}

impl StreamKind {
    pub const ALL: [StreamKind; 3] = [StreamKind::Video, StreamKind::Audio, StreamKind::Text];

    pub fn label(self) -> &'static str {
        match self {
            StreamKind::Video => "VIDEO",
            StreamKind::Audio => "AUDIO",
            StreamKind::Text => "TEXT",
        }
    }

    /// playbin property holding the number of streams of this kind.
    pub fn count_property(self) -> &'static str {
        match self {
            StreamKind::Video => "n-video",
            StreamKind::Audio => "n-audio",
            StreamKind::Text => "n-text",
        }
    }

    /// playbin property holding the selected stream index.
    pub fn current_property(self) -> &'static str {
        match self {
            StreamKind::Video => "current-video",
            StreamKind::Audio => "current-audio",
            StreamKind::Text => "current-text",
        }
    }

    /// playbin action signal returning the tags of one stream.
    pub fn tags_signal(self) -> &'static str {
        match self {
            StreamKind::Video => "get-video-tags",
            StreamKind::Audio => "get-audio-tags",
            StreamKind::Text => "get-text-tags",
        }
    }

    /// playbin signal emitted from a streaming thread when tags change.
    pub fn tags_changed_signal(self) -> &'static str {
        match self {
            StreamKind::Video => "video-tags-changed",
            StreamKind::Audio => "audio-tags-changed",
            StreamKind::Text => "text-tags-changed",
        }
    }
}

/// Identifies one stream, displayed as `AUDIO[1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamId {
    pub kind: StreamKind,
    pub index: i32,
}

impl std::fmt::Display for StreamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.kind.label(), self.index)
    }
}

impl std::str::FromStr for StreamId {
    type Err = TutorialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            TutorialError::InvalidCommand(format!(
                "'{}' is not a stream name, expected e.g. VIDEO[0] or AUDIO[1]",
                s
            ))
        };

        let (label, rest) = s.trim().split_once('[').ok_or_else(invalid)?;
        let index = rest.strip_suffix(']').ok_or_else(invalid)?;

        let kind = StreamKind::ALL
            .into_iter()
            .find(|k| k.label().eq_ignore_ascii_case(label))
            .ok_or_else(invalid)?;
        let index: i32 = index.parse().map_err(|_| invalid())?;
        if index < 0 {
            return Err(invalid());
        }

        Ok(Self { kind, index })
    }
}

impl Serialize for StreamId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Metadata row for one stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamInfo {
    pub id: StreamId,
    pub codec: Option<String>,
    pub language: Option<String>,
    pub bitrate: Option<u32>,
    /// Every tag of the stream, serialized; `None` when the list is empty.
    pub tags: Option<String>,
}

impl StreamInfo {
    pub fn from_tags(id: StreamId, tags: &gst::TagListRef) -> Self {
        let codec = match id.kind {
            StreamKind::Video => tags
                .get::<gst::tags::VideoCodec>()
                .map(|v| v.get().to_string()),
            StreamKind::Audio => tags
                .get::<gst::tags::AudioCodec>()
                .map(|v| v.get().to_string()),
            StreamKind::Text => tags
                .get::<gst::tags::SubtitleCodec>()
                .map(|v| v.get().to_string()),
        };

        Self {
            id,
            codec,
            language: tags
                .get::<gst::tags::LanguageCode>()
                .map(|v| v.get().to_string()),
            bitrate: tags.get::<gst::tags::Bitrate>().map(|v| v.get()),
            tags: (tags.n_tags() > 0).then(|| tags.to_string()),
        }
    }

    /// Human readable details column.
    pub fn details(&self) -> String {
        let mut parts = Vec::new();
        if let Some(codec) = &self.codec {
            parts.push(format!("codec: {}", codec));
        }
        if let Some(language) = &self.language {
            parts.push(format!("language: {}", language));
        }
        if let Some(bitrate) = self.bitrate {
            parts.push(format!("bitrate: {}", bitrate));
        }
        if let Some(tags) = &self.tags {
            parts.push(format!("tags: {}", tags));
        }
        if parts.is_empty() {
            "no tags".to_string()
        } else {
            parts.join(", ")
        }
    }
}

impl std::fmt::Display for StreamInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:<10} {}", self.id.to_string(), self.details())
    }
}
