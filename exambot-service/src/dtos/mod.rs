//! Request and response bodies of the HTTP API.

pub mod admin;
pub mod ads;
pub mod generate;

pub use admin::{AdminLoginRequest, AdminLoginResponse};
pub use ads::AdsUpdateResponse;
pub use generate::{GenerateResponse, ImageRequest};

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
