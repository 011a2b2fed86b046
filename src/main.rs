use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use verbatim::application::ports::TranscriptionEngine;
use verbatim::application::services::{ConversionService, ServiceLifecycle};
use verbatim::infrastructure::engine::{EngineLimits, OpenAiSpeechModelLoader, PooledSpeechEngine};
use verbatim::infrastructure::observability::{TracingConfig, init_tracing};
use verbatim::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();

    init_tracing(TracingConfig::default(), settings.server.port);

    let loader = Arc::new(OpenAiSpeechModelLoader::new(
        settings.model.api_key.clone(),
        settings.model.base_url.clone(),
        settings.model.name.clone(),
    ));
    let engine: Arc<dyn TranscriptionEngine> = Arc::new(PooledSpeechEngine::new(
        settings.model.name.clone(),
        settings.model.device.clone(),
        loader,
        EngineLimits {
            worker_slots: settings.model.worker_slots,
            queue_depth: settings.model.queue_depth,
        },
    ));
    let lifecycle = Arc::new(ServiceLifecycle::new(Arc::clone(&engine)));

    // A failed model load aborts startup before the listener is bound.
    lifecycle.startup().await?;

    let conversion_service = Arc::new(ConversionService::new(Arc::clone(&engine)));

    let state = AppState {
        engine,
        conversion_service,
        lifecycle: Arc::clone(&lifecycle),
    };
    let router = create_router(state);

    let addr = SocketAddr::new(settings.server.host.parse()?, settings.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    lifecycle.shutdown().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
