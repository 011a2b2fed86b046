use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::RawTranscription;

use super::{SpeechModelError, TranscribeOptions};

/// Languages the conversion API advertises. The underlying model may
/// recognize more; this is the supported surface.
pub const SUPPORTED_LANGUAGES: [(&str, &str); 10] = [
    ("ko", "Korean"),
    ("en", "English"),
    ("ja", "Japanese"),
    ("zh", "Chinese"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
];

pub fn supported_languages() -> BTreeMap<&'static str, &'static str> {
    SUPPORTED_LANGUAGES.iter().copied().collect()
}

/// Snapshot of the engine for the model-info endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct EngineInfo {
    pub model_name: String,
    pub device: String,
    pub is_ready: bool,
    pub supported_languages: BTreeMap<&'static str, &'static str>,
}

/// Asynchronous facade over a blocking speech model.
///
/// Implementations own the loaded model handle and a bounded worker pool, and
/// must never block the calling runtime thread: `load_model` and `transcribe`
/// suspend the caller while the blocking work runs on pooled threads.
#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    /// One-time blocking model initialization. On success the engine reports
    /// ready; on failure it stays unready and the error is fatal to startup.
    async fn load_model(&self) -> Result<(), EngineError>;

    fn is_ready(&self) -> bool;

    fn model_id(&self) -> &str;

    fn device(&self) -> &str;

    /// Runs one conversion on the worker pool. Fails with
    /// [`EngineError::NotReady`] before `load_model` succeeds or after
    /// `cleanup`, and with [`EngineError::Overloaded`] when the bounded
    /// admission queue is full.
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        options: TranscribeOptions,
    ) -> Result<RawTranscription, EngineError>;

    /// Drains in-flight work, shuts the pool down, and drops the model
    /// handle. Safe to call more than once; `transcribe` afterwards fails
    /// with [`EngineError::NotReady`].
    async fn cleanup(&self);

    fn model_info(&self) -> EngineInfo {
        EngineInfo {
            model_name: self.model_id().to_string(),
            device: self.device().to_string(),
            is_ready: self.is_ready(),
            supported_languages: supported_languages(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("speech model is not loaded")]
    NotReady,
    #[error("transcription queue is full, try again later")]
    Overloaded,
    #[error(transparent)]
    Model(#[from] SpeechModelError),
    #[error("{0}")]
    Internal(String),
}
