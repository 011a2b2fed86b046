use std::sync::Arc;

use crate::application::ports::TranscriptionEngine;
use crate::application::services::{ConversionService, ServiceLifecycle};

/// Explicitly constructed service state, injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<dyn TranscriptionEngine>,
    pub conversion_service: Arc<ConversionService>,
    pub lifecycle: Arc<ServiceLifecycle>,
}
