use std::path::Path;

use crate::domain::{RawTranscription, TaskMode};

/// Decoding options passed through to the model for a single run.
#[derive(Debug, Clone)]
pub struct TranscribeOptions {
    pub task: TaskMode,
    pub language: Option<String>,
}

/// A loaded speech-to-text model.
///
/// `transcribe` is a blocking, potentially long-running call. It is only ever
/// invoked from the engine's worker pool, never from the request-serving
/// runtime. Implementations must be safe to call concurrently from several
/// pooled threads at once.
pub trait SpeechModel: Send + Sync {
    fn transcribe(
        &self,
        audio_path: &Path,
        options: &TranscribeOptions,
    ) -> Result<RawTranscription, SpeechModelError>;
}

/// Performs the slow, blocking initialization of a [`SpeechModel`].
/// Called once at startup, on a pooled worker thread.
pub trait SpeechModelLoader: Send + Sync {
    fn load(&self) -> Result<Box<dyn SpeechModel>, SpeechModelError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechModelError {
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
}
