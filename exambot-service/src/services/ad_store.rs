use service_core::error::AppError;
use std::path::PathBuf;

use crate::models::AdsConfiguration;

/// Flat-file backing for the ad layout.
///
/// Nothing is cached and writes are not atomic: concurrent updates race and
/// the last writer wins.
#[derive(Debug, Clone)]
pub struct AdStore {
    path: PathBuf,
    persist: bool,
}

impl AdStore {
    pub fn new(path: impl Into<PathBuf>, persist: bool) -> Self {
        Self {
            path: path.into(),
            persist,
        }
    }

    /// Current layout, or the empty default when nothing has been saved.
    pub async fn load(&self) -> Result<AdsConfiguration, AppError> {
        let exists = tokio::fs::try_exists(&self.path).await.map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Error reading ads");
            load_failed()
        })?;

        if !exists {
            tracing::debug!(path = %self.path.display(), "No ads file, serving defaults");
            return Ok(AdsConfiguration::default());
        }

        let raw = tokio::fs::read(&self.path).await.map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Error reading ads");
            load_failed()
        })?;

        serde_json::from_slice(&raw).map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Error parsing ads");
            load_failed()
        })
    }

    /// Write the layout when persistence is enabled. Returns whether the file
    /// was written.
    pub async fn save(&self, ads: &AdsConfiguration) -> Result<bool, AppError> {
        if !self.persist {
            tracing::info!(
                filled_slots = ads.filled_slots(),
                "Ads update accepted without persisting"
            );
            return Ok(false);
        }

        let body = serde_json::to_vec_pretty(ads).map_err(|e| {
            tracing::error!(error = %e, "Error serializing ads");
            save_failed()
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                tracing::error!(path = %parent.display(), error = %e, "Error creating ads directory");
                save_failed()
            })?;
        }

        tokio::fs::write(&self.path, body).await.map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Error writing ads");
            save_failed()
        })?;

        tracing::info!(
            path = %self.path.display(),
            filled_slots = ads.filled_slots(),
            "Ads updated"
        );
        Ok(true)
    }
}

fn load_failed() -> AppError {
    AppError::InternalError(anyhow::anyhow!("Failed to load ads"))
}

fn save_failed() -> AppError {
    AppError::InternalError(anyhow::anyhow!("Failed to update ads"))
}
