use serde::{Deserialize, Serialize};

/// Raw output of a speech model run. Matches the verbose-json shape produced
/// by Whisper-style backends; everything beyond the text is optional because
/// a backend is allowed to return a partially populated result.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTranscription {
    pub text: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub segments: Option<Vec<RawSegment>>,
}

/// One time-bounded fragment of a raw model result, before any defaulting.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSegment {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub start: Option<f64>,
    #[serde(default)]
    pub end: Option<f64>,
    #[serde(default)]
    pub text: Option<String>,
}

/// A fully populated transcript segment as returned to clients. Segment order
/// is insertion order, which is time order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptSegment {
    pub id: u32,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl From<RawSegment> for TranscriptSegment {
    fn from(raw: RawSegment) -> Self {
        Self {
            id: raw.id.unwrap_or(0),
            start: raw.start.unwrap_or(0.0),
            end: raw.end.unwrap_or(0.0),
            text: raw.text.unwrap_or_default(),
        }
    }
}
