use std::sync::Arc;

use tokio::sync::RwLock;

use crate::application::ports::TranscriptionEngine;
use crate::domain::LifecycleState;

#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("model load failed: {0}")]
    ModelLoadFailure(String),
    #[error("service was already started")]
    AlreadyStarted,
}

/// Owns the one-time startup and shutdown of the transcription engine.
///
/// `startup` runs exactly once; a load failure is terminal and the process
/// must not begin serving traffic. `shutdown` drains in-flight work through
/// the engine before declaring the service stopped, and is safe to call
/// again once stopped.
pub struct ServiceLifecycle {
    engine: Arc<dyn TranscriptionEngine>,
    state: RwLock<LifecycleState>,
}

impl ServiceLifecycle {
    pub fn new(engine: Arc<dyn TranscriptionEngine>) -> Self {
        Self {
            engine,
            state: RwLock::new(LifecycleState::Uninitialized),
        }
    }

    pub async fn startup(&self) -> Result<(), LifecycleError> {
        {
            let mut state = self.state.write().await;
            if *state != LifecycleState::Uninitialized {
                return Err(LifecycleError::AlreadyStarted);
            }
            *state = LifecycleState::Loading;
        }

        tracing::info!(model = %self.engine.model_id(), "Loading speech model");

        match self.engine.load_model().await {
            Ok(()) => {
                *self.state.write().await = LifecycleState::Ready;
                tracing::info!(model = %self.engine.model_id(), "Speech model loaded, service ready");
                Ok(())
            }
            Err(e) => {
                *self.state.write().await = LifecycleState::LoadFailed;
                tracing::error!(error = %e, "Speech model load failed");
                Err(LifecycleError::ModelLoadFailure(e.to_string()))
            }
        }
    }

    pub async fn shutdown(&self) {
        {
            let mut state = self.state.write().await;
            if *state == LifecycleState::Stopped {
                return;
            }
            *state = LifecycleState::ShuttingDown;
        }

        tracing::info!("Shutting down, draining transcription workers");
        self.engine.cleanup().await;

        *self.state.write().await = LifecycleState::Stopped;
        tracing::info!("Service stopped");
    }

    /// Truthful readiness query; never errors, callable in any state.
    pub async fn is_ready(&self) -> bool {
        *self.state.read().await == LifecycleState::Ready && self.engine.is_ready()
    }

    pub async fn state(&self) -> LifecycleState {
        *self.state.read().await
    }
}
