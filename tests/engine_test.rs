use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex, mpsc};

use verbatim::application::ports::{
    EngineError, SpeechModel, SpeechModelError, SpeechModelLoader, TranscribeOptions,
    TranscriptionEngine,
};
use verbatim::domain::{RawTranscription, TaskMode};
use verbatim::infrastructure::engine::{EngineLimits, PooledSpeechEngine};

fn raw(text: &str) -> RawTranscription {
    RawTranscription {
        text: text.to_string(),
        language: Some("en".to_string()),
        duration: Some(1.0),
        segments: None,
    }
}

fn options() -> TranscribeOptions {
    TranscribeOptions {
        task: TaskMode::Transcribe,
        language: None,
    }
}

/// Loader wrapping an already-built model.
struct StaticLoader(Mutex<Option<Box<dyn SpeechModel>>>);

impl StaticLoader {
    fn new(model: Box<dyn SpeechModel>) -> Arc<Self> {
        Arc::new(Self(Mutex::new(Some(model))))
    }
}

impl SpeechModelLoader for StaticLoader {
    fn load(&self) -> Result<Box<dyn SpeechModel>, SpeechModelError> {
        self.0
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| SpeechModelError::ModelLoadFailed("model already taken".to_string()))
    }
}

struct FailingLoader;

impl SpeechModelLoader for FailingLoader {
    fn load(&self) -> Result<Box<dyn SpeechModel>, SpeechModelError> {
        Err(SpeechModelError::ModelLoadFailed(
            "weights missing".to_string(),
        ))
    }
}

/// Returns the staged audio bytes as the transcript, proving each request
/// reads its own temporary file.
struct EchoModel;

impl SpeechModel for EchoModel {
    fn transcribe(
        &self,
        audio_path: &Path,
        _options: &TranscribeOptions,
    ) -> Result<RawTranscription, SpeechModelError> {
        let contents = std::fs::read_to_string(audio_path)
            .map_err(|e| SpeechModelError::TranscriptionFailed(e.to_string()))?;
        Ok(raw(&contents))
    }
}

/// Echoes like [`EchoModel`] but first waits until `parties` calls are inside
/// the model at the same time, proving pooled parallelism.
struct BarrierEchoModel {
    barrier: Barrier,
}

impl SpeechModel for BarrierEchoModel {
    fn transcribe(
        &self,
        audio_path: &Path,
        _options: &TranscribeOptions,
    ) -> Result<RawTranscription, SpeechModelError> {
        self.barrier.wait();
        let contents = std::fs::read_to_string(audio_path)
            .map_err(|e| SpeechModelError::TranscriptionFailed(e.to_string()))?;
        Ok(raw(&contents))
    }
}

/// Signals entry, then blocks until released. Lets a test hold a worker slot
/// occupied deterministically.
struct StallingModel {
    started: mpsc::Sender<()>,
    release: Mutex<mpsc::Receiver<()>>,
}

impl SpeechModel for StallingModel {
    fn transcribe(
        &self,
        _audio_path: &Path,
        _options: &TranscribeOptions,
    ) -> Result<RawTranscription, SpeechModelError> {
        self.started.send(()).ok();
        self.release.lock().unwrap().recv().ok();
        Ok(raw("done"))
    }
}

/// Records the staged file path and the options it was called with.
struct CapturingModel {
    calls: AtomicUsize,
    seen_path: Mutex<Option<PathBuf>>,
    seen_options: Mutex<Option<(TaskMode, Option<String>)>>,
}

impl CapturingModel {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            seen_path: Mutex::new(None),
            seen_options: Mutex::new(None),
        }
    }
}

impl SpeechModel for CapturingModel {
    fn transcribe(
        &self,
        audio_path: &Path,
        options: &TranscribeOptions,
    ) -> Result<RawTranscription, SpeechModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.seen_path.lock().unwrap() = Some(audio_path.to_path_buf());
        *self.seen_options.lock().unwrap() = Some((options.task, options.language.clone()));
        assert!(audio_path.exists(), "staged audio file must exist");
        Ok(raw("captured"))
    }
}

fn engine_with(model: Box<dyn SpeechModel>, limits: EngineLimits) -> PooledSpeechEngine {
    PooledSpeechEngine::new("base", "cpu", StaticLoader::new(model), limits)
}

#[tokio::test]
async fn given_unloaded_engine_when_transcribe_then_fails_not_ready() {
    let engine = engine_with(Box::new(EchoModel), EngineLimits::default());

    assert!(!engine.is_ready());
    let result = engine.transcribe(b"audio".to_vec(), options()).await;
    assert!(matches!(result, Err(EngineError::NotReady)));
}

#[tokio::test]
async fn given_loaded_engine_when_transcribe_then_returns_model_output() {
    let engine = engine_with(Box::new(EchoModel), EngineLimits::default());
    engine.load_model().await.unwrap();

    assert!(engine.is_ready());
    let result = engine.transcribe(b"hello".to_vec(), options()).await.unwrap();
    assert_eq!(result.text, "hello");
}

#[tokio::test]
async fn given_failing_loader_when_load_model_then_engine_stays_unready() {
    let engine = PooledSpeechEngine::new(
        "base",
        "cpu",
        Arc::new(FailingLoader),
        EngineLimits::default(),
    );

    let result = engine.load_model().await;
    assert!(result.is_err());
    assert!(!engine.is_ready());
    assert!(matches!(
        engine.transcribe(b"audio".to_vec(), options()).await,
        Err(EngineError::NotReady)
    ));
}

#[tokio::test]
async fn given_cleaned_up_engine_when_transcribe_then_fails_not_ready() {
    let engine = engine_with(Box::new(EchoModel), EngineLimits::default());
    engine.load_model().await.unwrap();
    engine.cleanup().await;

    assert!(!engine.is_ready());
    let result = engine.transcribe(b"audio".to_vec(), options()).await;
    assert!(matches!(result, Err(EngineError::NotReady)));
}

#[tokio::test]
async fn given_cleaned_up_engine_when_cleanup_again_then_does_not_hang() {
    let engine = engine_with(Box::new(EchoModel), EngineLimits::default());
    engine.load_model().await.unwrap();

    engine.cleanup().await;
    engine.cleanup().await;
}

#[tokio::test]
async fn given_two_worker_slots_when_two_concurrent_requests_then_both_complete_independently() {
    let model = BarrierEchoModel {
        barrier: Barrier::new(2),
    };
    let engine = Arc::new(engine_with(
        Box::new(model),
        EngineLimits {
            worker_slots: 2,
            queue_depth: 0,
        },
    ));
    engine.load_model().await.unwrap();

    let first = engine.transcribe(b"first request".to_vec(), options());
    let second = engine.transcribe(b"second request".to_vec(), options());

    let (first, second) = tokio::join!(first, second);
    assert_eq!(first.unwrap().text, "first request");
    assert_eq!(second.unwrap().text, "second request");
}

// Multi-thread flavor: the test blocks on a std channel while the stalled
// request makes progress on another runtime thread.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn given_full_admission_queue_when_transcribe_then_fails_overloaded() {
    let (started_tx, started_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let model = StallingModel {
        started: started_tx,
        release: Mutex::new(release_rx),
    };
    let engine = Arc::new(engine_with(
        Box::new(model),
        EngineLimits {
            worker_slots: 1,
            queue_depth: 0,
        },
    ));
    engine.load_model().await.unwrap();

    let busy = {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move { engine.transcribe(b"slow".to_vec(), options()).await })
    };

    // The stalled request now owns the only admission permit.
    started_rx.recv().unwrap();

    let result = engine.transcribe(b"burst".to_vec(), options()).await;
    assert!(matches!(result, Err(EngineError::Overloaded)));

    release_tx.send(()).unwrap();
    assert_eq!(busy.await.unwrap().unwrap().text, "done");
}

#[tokio::test]
async fn given_completed_transcription_then_staged_file_is_removed() {
    let model = Arc::new(CapturingModel::new());
    let engine = {
        // Share the model so the test can inspect what it saw.
        struct Shared(Arc<CapturingModel>);
        impl SpeechModel for Shared {
            fn transcribe(
                &self,
                audio_path: &Path,
                options: &TranscribeOptions,
            ) -> Result<RawTranscription, SpeechModelError> {
                self.0.transcribe(audio_path, options)
            }
        }
        engine_with(Box::new(Shared(Arc::clone(&model))), EngineLimits::default())
    };
    engine.load_model().await.unwrap();

    let request_options = TranscribeOptions {
        task: TaskMode::Translate,
        language: Some("ko".to_string()),
    };
    engine
        .transcribe(b"audio".to_vec(), request_options)
        .await
        .unwrap();

    assert_eq!(model.calls.load(Ordering::SeqCst), 1);

    let seen_path = model.seen_path.lock().unwrap().clone().unwrap();
    assert!(!seen_path.exists(), "staged file must be removed after use");

    let (task, language) = model.seen_options.lock().unwrap().clone().unwrap();
    assert_eq!(task, TaskMode::Translate);
    assert_eq!(language.as_deref(), Some("ko"));
}
