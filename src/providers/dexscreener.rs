use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::{ListingProvider, ProviderError};
use crate::discovery::types::{DexBoost, DexPair, PairResponse, TokenPairsResponse};

pub const DEXSCREENER_BASE_URL: &str = "https://api.dexscreener.com";

pub struct DexScreenerClient {
    client: reqwest::Client,
    base_url: String,
}

impl DexScreenerClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T, ProviderError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "dexscreener request");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(%url, %status, "dexscreener http error");
            return Err(ProviderError::InvalidResponse(format!("http status {}", status)));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ListingProvider for DexScreenerClient {
    async fn latest_boosted_tokens(&self) -> Result<Vec<DexBoost>, ProviderError> {
        // The feed is a bare array; anything else means "no listings".
        let value: serde_json::Value = self.get_json("/token-boosts/latest/v1").await?;
        if !value.is_array() {
            warn!("boosted feed is not an array");
            return Ok(Vec::new());
        }

        serde_json::from_value(value).map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }

    async fn token_pairs(&self, token_address: &str) -> Result<Vec<DexPair>, ProviderError> {
        let response: TokenPairsResponse = self
            .get_json(&format!("/latest/dex/tokens/{}", token_address))
            .await?;

        Ok(response.pairs.unwrap_or_default())
    }

    async fn pair(&self, chain_id: &str, pair_id: &str) -> Result<Option<DexPair>, ProviderError> {
        let response: PairResponse = self
            .get_json(&format!("/latest/dex/pairs/{}/{}", chain_id, pair_id))
            .await?;

        Ok(response
            .pair
            .or_else(|| response.pairs.and_then(|pairs| pairs.into_iter().next())))
    }
}
