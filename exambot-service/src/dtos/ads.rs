use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct AdsUpdateResponse {
    pub success: bool,
    pub message: String,
    /// Whether the layout was written to the backing file.
    pub persisted: bool,
}
