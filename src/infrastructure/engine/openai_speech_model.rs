use std::path::Path;
use std::time::Duration;

use reqwest::blocking::multipart;

use crate::application::ports::{
    SpeechModel, SpeechModelError, SpeechModelLoader, TranscribeOptions,
};
use crate::domain::{RawTranscription, TaskMode};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

/// Builds the blocking HTTP client on a pooled worker thread at startup.
pub struct OpenAiSpeechModelLoader {
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiSpeechModelLoader {
    pub fn new(api_key: String, base_url: Option<String>, model: String) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            model,
        }
    }
}

impl SpeechModelLoader for OpenAiSpeechModelLoader {
    fn load(&self) -> Result<Box<dyn SpeechModel>, SpeechModelError> {
        if self.api_key.is_empty() {
            return Err(SpeechModelError::ModelLoadFailed(
                "API key required for the Whisper API backend".to_string(),
            ));
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SpeechModelError::ModelLoadFailed(format!("http client: {}", e)))?;

        Ok(Box::new(OpenAiSpeechModel {
            client,
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
        }))
    }
}

/// Whisper over an OpenAI-compatible HTTP API. Blocking by design: calls are
/// only made from the engine's worker pool.
pub struct OpenAiSpeechModel {
    client: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl SpeechModel for OpenAiSpeechModel {
    fn transcribe(
        &self,
        audio_path: &Path,
        options: &TranscribeOptions,
    ) -> Result<RawTranscription, SpeechModelError> {
        let endpoint = match options.task {
            TaskMode::Transcribe => "transcriptions",
            TaskMode::Translate => "translations",
        };
        let url = format!("{}/audio/{}", self.base_url, endpoint);

        let mut form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "verbose_json")
            .file("file", audio_path)
            .map_err(|e| SpeechModelError::ApiRequestFailed(format!("file part: {}", e)))?;

        // The translations endpoint has a fixed target language and takes no
        // source-language hint.
        if options.task == TaskMode::Transcribe {
            if let Some(language) = &options.language {
                form = form.text("language", language.clone());
            }
        }

        tracing::debug!(model = %self.model, task = %options.task, "Sending audio to Whisper API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .map_err(|e| SpeechModelError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(SpeechModelError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let transcription: RawTranscription = response
            .json()
            .map_err(|e| SpeechModelError::ApiRequestFailed(format!("body: {}", e)))?;

        tracing::info!(
            chars = transcription.text.len(),
            "Whisper API transcription completed"
        );

        Ok(transcription)
    }
}
