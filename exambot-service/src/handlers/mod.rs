//! HTTP handlers for the ExamBot API.

pub mod admin;
pub mod ads;
pub mod generate;
pub mod health;

pub use admin::admin_login;
pub use ads::{get_ads, update_ads};
pub use generate::{generate_questions, generate_summary};
pub use health::{api_root, health_check};
