use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::{RwLock, Semaphore, TryAcquireError};
use tokio::task;

use crate::application::ports::{
    EngineError, SpeechModel, SpeechModelError, SpeechModelLoader, TranscribeOptions,
    TranscriptionEngine,
};
use crate::domain::RawTranscription;

/// Worker-pool sizing. `worker_slots` bounds concurrent model invocations;
/// `queue_depth` bounds how many extra requests may wait for a slot before
/// the engine starts rejecting with [`EngineError::Overloaded`].
#[derive(Debug, Clone, Copy)]
pub struct EngineLimits {
    pub worker_slots: u32,
    pub queue_depth: u32,
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self {
            worker_slots: 2,
            queue_depth: 8,
        }
    }
}

/// Asynchronous facade over a blocking [`SpeechModel`].
///
/// The model handle is shared read-mostly; the slot semaphore is what limits
/// concurrent device use. Blocking work runs on `spawn_blocking` threads, so
/// the request-serving runtime stays responsive while a conversion is in
/// flight.
pub struct PooledSpeechEngine {
    model_id: String,
    device: String,
    loader: Arc<dyn SpeechModelLoader>,
    model: RwLock<Option<Arc<dyn SpeechModel>>>,
    ready: AtomicBool,
    worker_slots: u32,
    slots: Arc<Semaphore>,
    admission: Arc<Semaphore>,
}

impl PooledSpeechEngine {
    pub fn new(
        model_id: impl Into<String>,
        device: impl Into<String>,
        loader: Arc<dyn SpeechModelLoader>,
        limits: EngineLimits,
    ) -> Self {
        let worker_slots = limits.worker_slots.max(1);
        Self {
            model_id: model_id.into(),
            device: device.into(),
            loader,
            model: RwLock::new(None),
            ready: AtomicBool::new(false),
            worker_slots,
            slots: Arc::new(Semaphore::new(worker_slots as usize)),
            admission: Arc::new(Semaphore::new((worker_slots + limits.queue_depth) as usize)),
        }
    }
}

#[async_trait]
impl TranscriptionEngine for PooledSpeechEngine {
    async fn load_model(&self) -> Result<(), EngineError> {
        let permit = Arc::clone(&self.slots)
            .acquire_owned()
            .await
            .map_err(|_| EngineError::NotReady)?;

        tracing::info!(model = %self.model_id, device = %self.device, "Initializing speech model");

        let loader = Arc::clone(&self.loader);
        let loaded = task::spawn_blocking(move || {
            let _permit = permit;
            loader.load()
        })
        .await
        .map_err(|e| EngineError::Internal(format!("model load task panicked: {}", e)))??;

        *self.model.write().await = Some(Arc::from(loaded));
        self.ready.store(true, Ordering::SeqCst);

        tracing::info!(model = %self.model_id, "Speech model initialized");
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn device(&self) -> &str {
        &self.device
    }

    async fn transcribe(
        &self,
        audio: Vec<u8>,
        options: TranscribeOptions,
    ) -> Result<RawTranscription, EngineError> {
        if !self.is_ready() {
            return Err(EngineError::NotReady);
        }
        let model = self
            .model
            .read()
            .await
            .clone()
            .ok_or(EngineError::NotReady)?;

        // Bounded admission in front of the pool: reject instead of letting
        // a burst queue without limit.
        let admission = match Arc::clone(&self.admission).try_acquire_owned() {
            Ok(permit) => permit,
            Err(TryAcquireError::Closed) => return Err(EngineError::NotReady),
            Err(TryAcquireError::NoPermits) => {
                tracing::warn!("Transcription admission queue is full, rejecting request");
                return Err(EngineError::Overloaded);
            }
        };

        let slot = Arc::clone(&self.slots)
            .acquire_owned()
            .await
            .map_err(|_| EngineError::NotReady)?;

        let result = task::spawn_blocking(move || {
            let _admission = admission;
            let _slot = slot;
            run_transcription(model, &audio, &options)
        })
        .await
        .map_err(|e| EngineError::Internal(format!("transcription task panicked: {}", e)))?;

        Ok(result?)
    }

    async fn cleanup(&self) {
        self.ready.store(false, Ordering::SeqCst);
        self.admission.close();

        // Draining every slot permit waits for in-flight conversions;
        // fails only if a previous cleanup already closed the pool.
        if let Ok(permits) = Arc::clone(&self.slots)
            .acquire_many_owned(self.worker_slots)
            .await
        {
            drop(permits);
        }
        self.slots.close();

        *self.model.write().await = None;
        tracing::info!("Transcription engine resources released");
    }
}

/// Runs on a pooled worker thread. The temporary audio file lives entirely
/// inside this function, so it is removed on success, on model failure, and
/// when the caller's future is dropped mid-flight.
fn run_transcription(
    model: Arc<dyn SpeechModel>,
    audio: &[u8],
    options: &TranscribeOptions,
) -> Result<RawTranscription, SpeechModelError> {
    let mut staged = tempfile::Builder::new()
        .prefix("verbatim-audio-")
        .tempfile()
        .map_err(|e| SpeechModelError::TranscriptionFailed(format!("temp file: {}", e)))?;
    staged
        .write_all(audio)
        .map_err(|e| SpeechModelError::TranscriptionFailed(format!("temp write: {}", e)))?;

    let result = model.transcribe(staged.path(), options);

    // A failed removal never fails the conversion itself.
    if let Err(e) = staged.close() {
        tracing::warn!(error = %e, "Failed to remove temporary audio file");
    }

    result
}
