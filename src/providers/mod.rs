// src/providers/mod.rs

use async_trait::async_trait;
use thiserror::Error;

use crate::discovery::types::{DexBoost, DexPair};
use crate::types::*;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request timed out")]
    Timeout,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("network error: {0}")]
    NetworkError(String),
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("account not found")]
    NotFound,
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout
        } else if e.is_decode() {
            ProviderError::InvalidResponse(e.to_string())
        } else {
            ProviderError::NetworkError(e.to_string())
        }
    }
}

/// On-chain data source for a Solana mint.
#[async_trait]
pub trait ChainProvider: Send + Sync {
    fn provider_name(&self) -> &str;

    async fn fetch_mint_info(&self, mint: &str) -> Result<MintAccountInfo, ProviderError>;
    /// Every token account of `mint` under the SPL Token program.
    async fn fetch_token_accounts(&self, mint: &str) -> Result<Vec<TokenAccountRecord>, ProviderError>;
    async fn fetch_largest_accounts(&self, mint: &str) -> Result<Vec<LargestAccount>, ProviderError>;
    async fn fetch_lp_account(&self, lp_address: &str) -> Result<LpAccountData, ProviderError>;
}

/// Token discovery listings.
#[async_trait]
pub trait ListingProvider: Send + Sync {
    async fn latest_boosted_tokens(&self) -> Result<Vec<DexBoost>, ProviderError>;
    async fn token_pairs(&self, token_address: &str) -> Result<Vec<DexPair>, ProviderError>;
    async fn pair(&self, chain_id: &str, pair_id: &str) -> Result<Option<DexPair>, ProviderError>;
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

// Module declarations
pub mod mocks;
pub mod solana_rpc;
pub mod dexscreener;
pub mod gemini;

// Re-export for testing
pub use mocks::{MockChainProvider, MockListingProvider, MockTextGenerator};
pub use solana_rpc::SolanaRpcProvider;
pub use dexscreener::DexScreenerClient;
pub use gemini::GeminiClient;
