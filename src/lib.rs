// src/lib.rs

pub mod types;
pub mod config;
pub mod providers;
pub mod checks;
pub mod scoring;
pub mod discovery;
pub mod api;
pub mod cache;
pub mod output;
pub mod server;

// Re-export commonly used types
pub use types::*;
pub use providers::{ChainProvider, ListingProvider, TextGenerator};
pub use scoring::build_risk_report;
pub use api::{assess, AssessRequest, AssessResponse};
pub use cache::SimpleCache;
