// src/api/mod.rs

pub mod types;
pub mod assess;
pub mod cached_assess;

pub use types::{AssessRequest, AssessResponse, AssessOptions, AssessmentStatus};
pub use assess::assess;
pub use cached_assess::assess_with_cache;
