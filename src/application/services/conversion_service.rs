use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use crate::application::ports::{EngineError, TranscribeOptions, TranscriptionEngine};
use crate::domain::{TaskMode, TranscriptSegment};

use super::intake::{self, IntakeError};

/// One inbound conversion request, as parsed off the wire.
#[derive(Debug)]
pub struct ConversionRequest {
    pub data: Vec<u8>,
    pub declared_type: Option<String>,
    pub language: Option<String>,
    pub task: TaskMode,
    pub return_segments: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversionResponse {
    pub success: bool,
    pub text: String,
    pub language: String,
    pub duration: f64,
    pub model: String,
    pub task: TaskMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<TranscriptSegment>>,
    pub processing_time: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error(transparent)]
    Invalid(#[from] IntakeError),
    #[error("speech model is not ready")]
    NotReady,
    #[error("transcription queue is full, try again later")]
    Overloaded,
    #[error("audio conversion failed: {0}")]
    Internal(String),
}

/// Coordinates one conversion end to end: validation, engine invocation,
/// result assembly.
pub struct ConversionService {
    engine: Arc<dyn TranscriptionEngine>,
}

impl ConversionService {
    pub fn new(engine: Arc<dyn TranscriptionEngine>) -> Self {
        Self { engine }
    }

    pub async fn convert(
        &self,
        request: ConversionRequest,
    ) -> Result<ConversionResponse, ConversionError> {
        intake::validate_upload(request.declared_type.as_deref(), &request.data)?;

        let started = Instant::now();

        let options = TranscribeOptions {
            task: request.task,
            language: request.language.clone(),
        };

        let raw = match self.engine.transcribe(request.data, options).await {
            Ok(raw) => raw,
            Err(EngineError::NotReady) => return Err(ConversionError::NotReady),
            Err(EngineError::Overloaded) => return Err(ConversionError::Overloaded),
            Err(e) => {
                tracing::error!(error = %e, task = %request.task, "Transcription engine call failed");
                return Err(ConversionError::Internal(e.to_string()));
            }
        };

        let processing_time = round2(started.elapsed().as_secs_f64());

        // Segments are included only when the caller asked for them and the
        // model produced them; each raw entry gets per-field defaults so a
        // partially populated model result still maps cleanly.
        let segments = if request.return_segments {
            raw.segments
                .map(|segs| segs.into_iter().map(TranscriptSegment::from).collect())
        } else {
            None
        };

        let text = raw.text.trim().to_string();
        let language = raw
            .language
            .or(request.language)
            .unwrap_or_else(|| "unknown".to_string());

        tracing::info!(
            processing_time,
            chars = text.len(),
            language = %language,
            task = %request.task,
            "Audio conversion completed"
        );

        Ok(ConversionResponse {
            success: true,
            text,
            language,
            duration: raw.duration.unwrap_or(0.0),
            model: self.engine.model_id().to_string(),
            task: request.task,
            segments,
            processing_time,
        })
    }
}

fn round2(seconds: f64) -> f64 {
    (seconds * 100.0).round() / 100.0
}
