use async_trait::async_trait;
use crate::discovery::types::{DexBoost, DexPair};
use crate::types::*;
use super::{ChainProvider, ListingProvider, ProviderError, TextGenerator};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// In-memory chain data keyed by address. Addresses registered with
/// `with_error` fail every call with a timeout.
pub struct MockChainProvider {
    pub name: String,
    pub mints: HashMap<String, MintAccountInfo>,
    pub token_accounts: HashMap<String, Vec<TokenAccountRecord>>,
    pub largest: HashMap<String, Vec<LargestAccount>>,
    pub lp_accounts: HashMap<String, LpAccountData>,
    pub errors: HashSet<String>,
    /// Simulated round-trip applied to every fetch.
    pub delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockChainProvider {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            mints: HashMap::new(),
            token_accounts: HashMap::new(),
            largest: HashMap::new(),
            lp_accounts: HashMap::new(),
            errors: HashSet::new(),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_mint(mut self, address: &str, info: MintAccountInfo) -> Self {
        self.mints.insert(address.to_string(), info);
        self
    }

    pub fn with_token_accounts(mut self, mint: &str, records: Vec<TokenAccountRecord>) -> Self {
        self.token_accounts.insert(mint.to_string(), records);
        self
    }

    pub fn with_largest(mut self, mint: &str, largest: Vec<LargestAccount>) -> Self {
        self.largest.insert(mint.to_string(), largest);
        self
    }

    pub fn with_lp_account(mut self, lp_address: &str, data: LpAccountData) -> Self {
        self.lp_accounts.insert(lp_address.to_string(), data);
        self
    }

    pub fn with_error(mut self, address: &str) -> Self {
        self.errors.insert(address.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of fetch calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn lookup<T: Clone>(&self, map: &HashMap<String, T>, address: &str) -> Result<T, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.errors.contains(address) {
            return Err(ProviderError::Timeout);
        }
        map.get(address).cloned().ok_or(ProviderError::NotFound)
    }
}

#[async_trait]
impl ChainProvider for MockChainProvider {
    fn provider_name(&self) -> &str {
        &self.name
    }

    async fn fetch_mint_info(&self, mint: &str) -> Result<MintAccountInfo, ProviderError> {
        self.lookup(&self.mints, mint).await
    }

    async fn fetch_token_accounts(&self, mint: &str) -> Result<Vec<TokenAccountRecord>, ProviderError> {
        self.lookup(&self.token_accounts, mint).await
    }

    async fn fetch_largest_accounts(&self, mint: &str) -> Result<Vec<LargestAccount>, ProviderError> {
        self.lookup(&self.largest, mint).await
    }

    async fn fetch_lp_account(&self, lp_address: &str) -> Result<LpAccountData, ProviderError> {
        self.lookup(&self.lp_accounts, lp_address).await
    }
}

#[derive(Default)]
pub struct MockListingProvider {
    pub boosts: Vec<DexBoost>,
    pub pairs: HashMap<String, Vec<DexPair>>,
    pub failing_tokens: HashSet<String>,
    pub feed_error: bool,
}

impl MockListingProvider {
    pub fn new(boosts: Vec<DexBoost>) -> Self {
        Self {
            boosts,
            ..Default::default()
        }
    }

    pub fn with_pairs(mut self, token_address: &str, pairs: Vec<DexPair>) -> Self {
        self.pairs.insert(token_address.to_string(), pairs);
        self
    }

    pub fn with_failing_token(mut self, token_address: &str) -> Self {
        self.failing_tokens.insert(token_address.to_string());
        self
    }

    pub fn with_feed_error(mut self) -> Self {
        self.feed_error = true;
        self
    }
}

#[async_trait]
impl ListingProvider for MockListingProvider {
    async fn latest_boosted_tokens(&self) -> Result<Vec<DexBoost>, ProviderError> {
        if self.feed_error {
            return Err(ProviderError::NetworkError("feed unavailable".to_string()));
        }
        Ok(self.boosts.clone())
    }

    async fn token_pairs(&self, token_address: &str) -> Result<Vec<DexPair>, ProviderError> {
        if self.failing_tokens.contains(token_address) {
            return Err(ProviderError::Timeout);
        }
        Ok(self.pairs.get(token_address).cloned().unwrap_or_default())
    }

    async fn pair(&self, chain_id: &str, pair_id: &str) -> Result<Option<DexPair>, ProviderError> {
        Ok(self
            .pairs
            .values()
            .flatten()
            .find(|p| p.chain_id == chain_id && p.pair_address == pair_id)
            .cloned())
    }
}

/// Returns a fixed reply and records every prompt it receives.
pub struct MockTextGenerator {
    pub reply: String,
    pub prompts: std::sync::Mutex<Vec<String>>,
}

impl MockTextGenerator {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            prompts: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        Ok(self.reply.trim().to_string())
    }
}
