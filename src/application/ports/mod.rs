mod speech_model;
mod transcription_engine;

pub use speech_model::{SpeechModel, SpeechModelError, SpeechModelLoader, TranscribeOptions};
pub use transcription_engine::{
    EngineError, EngineInfo, SUPPORTED_LANGUAGES, TranscriptionEngine, supported_languages,
};
