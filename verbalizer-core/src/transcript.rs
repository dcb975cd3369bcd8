//! Value types exchanged with the external transcription engine.
//!
//! A `Segment` is one atomic recognition unit as emitted by the engine
//! (Whisper-style JSON). Segments arrive as a complete, ordered, immutable
//! list once transcription has finished — this crate never sees partial or
//! growing input.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One timestamped speech fragment from the transcription engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start of the fragment in seconds from the beginning of the recording.
    pub start: f64,
    /// End of the fragment in seconds (`start <= end`).
    pub end: f64,
    /// Recognised text. May be empty, never absent.
    pub text: String,
}

impl Segment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }
}

/// A run of merged segments representing one coherent utterance burst.
///
/// Produced by [`crate::grouping::group_segments`] in a single pass and
/// consumed once by the renderer. Block `start` values are non-decreasing
/// across a grouped list, and concatenating block texts in order
/// reconstructs the trimmed, space-joined transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicBlock {
    /// `start` of the first segment merged into this block, in seconds.
    pub start: f64,
    /// Member segment texts, each trimmed, joined with single spaces.
    pub text: String,
}

/// Result envelope of a full transcription run.
///
/// Mirrors the Whisper result object: a `segments` array plus an optional
/// flat `text` field. Unknown engine-specific fields (token ids, confidence
/// scores, language, ...) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionOutput {
    #[serde(default)]
    pub text: Option<String>,
    pub segments: Vec<Segment>,
}

/// Parse transcription-engine JSON into an ordered segment list.
///
/// Accepts either the full result envelope (`{"segments": [...]}`) or a
/// bare segment array.
pub fn parse_segments(json: &str) -> Result<Vec<Segment>> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SegmentsJson {
        Envelope(TranscriptionOutput),
        Bare(Vec<Segment>),
    }

    let parsed: SegmentsJson = serde_json::from_str(json)?;
    Ok(match parsed {
        SegmentsJson::Envelope(output) => output.segments,
        SegmentsJson::Bare(segments) => segments,
    })
}
