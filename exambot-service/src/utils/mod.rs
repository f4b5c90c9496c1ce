pub mod validation;

pub use validation::{ApiJson, ValidatedJson};
