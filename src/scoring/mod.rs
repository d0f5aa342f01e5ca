// src/scoring/mod.rs

pub mod report;

pub use report::build_risk_report;
