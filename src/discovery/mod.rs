// src/discovery/mod.rs

pub mod types;
pub mod ranking;
pub mod pipeline;

pub use types::{BoostedToken, TradingData};
pub use ranking::rank_by_activity;
pub use pipeline::{enrich_with_trading_data, fetch_boosted_tokens, lookup_pair, run_discovery, DiscoveryResult};
