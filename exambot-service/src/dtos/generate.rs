use serde::{Deserialize, Serialize};
use validator::Validate;

/// Base64 images of study material, in upload order.
#[derive(Debug, Deserialize, Validate)]
pub struct ImageRequest {
    #[validate(length(min = 1, message = "No images provided"))]
    pub images: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub result: String,
}
