//! Domain models for the ExamBot service.

pub mod ads;

pub use ads::{AdBlock, AdsConfiguration};
