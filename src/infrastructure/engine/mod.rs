mod openai_speech_model;
mod pooled_engine;

pub use openai_speech_model::{OpenAiSpeechModel, OpenAiSpeechModelLoader};
pub use pooled_engine::{EngineLimits, PooledSpeechEngine};
