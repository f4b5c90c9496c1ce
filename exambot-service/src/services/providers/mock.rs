//! Offline provider for deployments without model access, and for tests.

use super::{ImageInput, ProviderError, VisionProvider};
use async_trait::async_trait;

/// Answers every request with a fixed placeholder naming the image count.
#[derive(Debug, Default)]
pub struct MockVisionProvider;

impl MockVisionProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl VisionProvider for MockVisionProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(
        &self,
        _prompt: &str,
        images: &[ImageInput],
    ) -> Result<String, ProviderError> {
        Ok(format!("Mock Gemini response for {} images.", images.len()))
    }
}
