//! Application startup and lifecycle management.

use crate::config::{ExamBotConfig, LlmConfig, ProviderKind};
use crate::services::providers::gemini::{GeminiConfig, GeminiVisionProvider};
use crate::services::providers::mock::MockVisionProvider;
use crate::services::VisionProvider;
use crate::{build_router, AppState};
use axum::Router;
use service_core::error::AppError;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;

/// Pick the model backend named by the configuration.
pub fn build_provider(config: &LlmConfig) -> Result<Arc<dyn VisionProvider>, AppError> {
    match config.provider {
        ProviderKind::Mock => {
            tracing::warn!("Using mock model provider; responses are placeholders");
            Ok(Arc::new(MockVisionProvider::new()))
        }
        ProviderKind::Gemini => {
            if config.api_key.is_none() {
                tracing::warn!("GEMINI_API_KEY is not set; generation requests will fail");
            }

            let provider = GeminiVisionProvider::new(GeminiConfig {
                api_key: config.api_key.clone(),
                model: config.model.clone(),
                api_base: config.api_base.clone(),
                timeout: Duration::from_secs(config.timeout_secs),
            })
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;

            tracing::info!(model = %config.model, "Initialized Gemini provider");
            Ok(Arc::new(provider))
        }
    }
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: ExamBotConfig) -> Result<Self, AppError> {
        let provider = build_provider(&config.llm)?;

        tracing::info!(
            ads_file = %config.ads.file.display(),
            persist = config.ads.persist,
            "Initialized ad store"
        );
        if !config.ads.persist {
            tracing::warn!("Ad updates will be accepted but not saved");
        }

        let address = config.common.address();
        let state = AppState::new(config, provider);
        let router = build_router(state);

        // Port 0 picks a random port for testing
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("ExamBot API listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
