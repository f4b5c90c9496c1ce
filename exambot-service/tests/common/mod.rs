//! Shared fixtures for the exambot-service integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use exambot_service::{
    build_router,
    config::{
        AdminConfig, AdsConfig, CorsConfig, ExamBotConfig, LlmConfig, LoggingConfig,
        ProviderKind,
    },
    services::{ImageInput, ProviderError, VisionProvider},
    AppState,
};
use secrecy::Secret;
use serde_json::Value;
use service_core::observability::LogFormat;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tower::ServiceExt;

pub const ADMIN_USERNAME: &str = "shaswat369";
pub const ADMIN_PASSWORD: &str = "shaswat.millionaire";

/// Provider double that records what it was asked and replies with a fixed
/// string (or a fixed error).
pub struct RecordingProvider {
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
    last_images: Mutex<Vec<ImageInput>>,
    reply: Result<String, fn() -> ProviderError>,
}

impl RecordingProvider {
    pub fn replying(text: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
            last_images: Mutex::new(Vec::new()),
            reply: Ok(text.to_string()),
        }
    }

    pub fn failing(make_error: fn() -> ProviderError) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
            last_images: Mutex::new(Vec::new()),
            reply: Err(make_error),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }

    pub fn last_images(&self) -> Vec<ImageInput> {
        self.last_images.lock().unwrap().clone()
    }
}

#[async_trait]
impl VisionProvider for RecordingProvider {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn generate(&self, prompt: &str, images: &[ImageInput]) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        *self.last_images.lock().unwrap() = images.to_vec();

        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(make_error) => Err(make_error()),
        }
    }
}

pub fn test_config(ads_dir: &TempDir) -> ExamBotConfig {
    ExamBotConfig {
        common: service_core::config::Config {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        llm: LlmConfig {
            provider: ProviderKind::Mock,
            api_key: None,
            model: "gemini-3-flash-preview".to_string(),
            api_base: "http://127.0.0.1:1".to_string(),
            timeout_secs: 5,
        },
        cors: CorsConfig {
            allowed_origins: vec!["*".to_string()],
        },
        ads: AdsConfig {
            file: ads_dir.path().join("ads.json"),
            persist: true,
        },
        admin: AdminConfig {
            username: ADMIN_USERNAME.to_string(),
            password: Secret::new(ADMIN_PASSWORD.to_string()),
            token_secret: Secret::new("integration-test-secret".to_string()),
            token_ttl_minutes: 60,
            require_token: false,
        },
        logging: LoggingConfig {
            level: "error".to_string(),
            format: LogFormat::Pretty,
            otlp_endpoint: None,
        },
    }
}

pub struct TestApp {
    pub router: Router,
    pub provider: Arc<RecordingProvider>,
    pub ads_dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with(RecordingProvider::replying("model output"), |_| {})
    }

    pub fn with(provider: RecordingProvider, customize: impl FnOnce(&mut ExamBotConfig)) -> Self {
        let ads_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut config = test_config(&ads_dir);
        customize(&mut config);

        let provider = Arc::new(provider);
        let state = AppState::new(config, provider.clone());

        Self {
            router: build_router(state),
            provider,
            ads_dir,
        }
    }

    pub fn ads_file(&self) -> std::path::PathBuf {
        self.ads_dir.path().join("ads.json")
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body), None).await
    }

    pub async fn post_with_token(&self, uri: &str, body: Value, token: &str) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body), Some(token)).await
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        bearer: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    pub async fn login(&self) -> String {
        let (status, body) = self
            .post(
                "/api/admin/login",
                serde_json::json!({"username": ADMIN_USERNAME, "password": ADMIN_PASSWORD}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }
}

pub fn full_ads() -> Value {
    serde_json::json!({
        "left1": {"imageUrl": "https://cdn.example/l1.png", "linkUrl": "https://shop.example/l1"},
        "left2": {"imageUrl": "https://cdn.example/l2.png", "linkUrl": "https://shop.example/l2"},
        "right1": {"imageUrl": "https://cdn.example/r1.png", "linkUrl": "https://shop.example/r1"},
        "right2": {"imageUrl": "https://cdn.example/r2.png", "linkUrl": "https://shop.example/r2"},
        "top": {"imageUrl": "https://cdn.example/top.png", "linkUrl": "https://shop.example/top?a=1&b=2"},
        "bottom": {"imageUrl": "", "linkUrl": "https://shop.example/ünïcode"}
    })
}
