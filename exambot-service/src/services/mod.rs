pub mod ad_store;
pub mod admin;
pub mod jwt;
pub mod prompts;
pub mod providers;

pub use ad_store::AdStore;
pub use admin::AdminService;
pub use jwt::{AdminClaims, AdminTokenService};
pub use prompts::StudyTask;
pub use providers::{ImageInput, ProviderError, VisionProvider};
