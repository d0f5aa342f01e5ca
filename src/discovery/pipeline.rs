use serde::Serialize;
use tracing::{debug, info, warn};

use super::ranking::rank_by_activity;
use super::types::{BoostedToken, TradingData};
use crate::providers::{ListingProvider, ProviderError};

#[derive(Clone, Debug, Serialize)]
pub struct DiscoveryResult {
    pub all: Vec<BoostedToken>,
    pub top: Vec<BoostedToken>,
}

pub async fn fetch_boosted_tokens<L: ListingProvider + ?Sized>(
    listings: &L,
) -> Result<Vec<BoostedToken>, ProviderError> {
    let boosts = listings.latest_boosted_tokens().await?;
    info!(count = boosts.len(), "boosted tokens fetched");
    Ok(boosts.into_iter().map(BoostedToken::from).collect())
}

/// Attach the first listed pair of each token. A failed lookup leaves that
/// token without trading data.
pub async fn enrich_with_trading_data<L: ListingProvider + ?Sized>(
    listings: &L,
    tokens: &mut [BoostedToken],
) {
    for token in tokens.iter_mut() {
        match listings.token_pairs(&token.address).await {
            Ok(pairs) => {
                token.trading = pairs.into_iter().next().map(TradingData::from);
                if token.trading.is_none() {
                    debug!(address = %token.address, "no pairs listed");
                }
            }
            Err(e) => {
                warn!(address = %token.address, error = %e, "failed to fetch trading data");
                token.trading = None;
            }
        }
    }
}

/// Trading data of one pair, `None` when it is not listed.
pub async fn lookup_pair<L: ListingProvider + ?Sized>(
    listings: &L,
    chain_id: &str,
    pair_id: &str,
) -> Result<Option<TradingData>, ProviderError> {
    let pair = listings.pair(chain_id, pair_id).await?;
    if pair.is_none() {
        debug!(chain_id, pair_id, "pair not listed");
    }
    Ok(pair.map(TradingData::from))
}

pub async fn run_discovery<L: ListingProvider + ?Sized>(
    listings: &L,
    top_n: usize,
) -> Result<DiscoveryResult, ProviderError> {
    let mut all = fetch_boosted_tokens(listings).await?;
    enrich_with_trading_data(listings, &mut all).await;

    let top = rank_by_activity(&all, top_n);
    info!(ranked = top.len(), "discovery complete");

    Ok(DiscoveryResult { all, top })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::types::*;
    use crate::providers::MockListingProvider;

    fn boost(address: &str) -> DexBoost {
        DexBoost {
            url: Some(format!("https://dexscreener.com/solana/{}", address)),
            chain_id: "solana".to_string(),
            token_address: address.to_string(),
            description: None,
            icon: None,
            links: None,
            total_amount: Some(100.0),
            amount: Some(10.0),
        }
    }

    fn pair(address: &str, volume: f64) -> DexPair {
        DexPair {
            chain_id: "solana".to_string(),
            pair_address: format!("{}-pair", address),
            base_token: PairToken {
                address: address.to_string(),
                ..Default::default()
            },
            volume: Some(Windowed {
                h24: Some(volume),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_run_discovery_ranks_enriched_tokens() {
        let listings = MockListingProvider::new(vec![boost("a"), boost("b"), boost("c"), boost("d")])
            .with_pairs("a", vec![pair("a", 10.0)])
            .with_pairs("b", vec![pair("b", 300.0), pair("b", 99999.0)])
            .with_pairs("c", vec![pair("c", 200.0)]);

        let result = run_discovery(&listings, 3).await.unwrap();

        assert_eq!(result.all.len(), 4);
        let top: Vec<&str> = result.top.iter().map(|t| t.address.as_str()).collect();
        assert_eq!(top, vec!["b", "c", "a"]);
        // first pair wins
        assert_eq!(result.top[0].volume_h24(), 300.0);
        let d = result.all.iter().find(|t| t.address == "d").unwrap();
        assert!(d.trading.is_none());
    }

    #[tokio::test]
    async fn test_failed_enrichment_keeps_token() {
        let listings = MockListingProvider::new(vec![boost("a"), boost("b")])
            .with_pairs("a", vec![pair("a", 10.0)])
            .with_failing_token("b");

        let result = run_discovery(&listings, 3).await.unwrap();

        assert_eq!(result.all.len(), 2);
        assert_eq!(result.top[0].address, "a");
        assert!(result.top[1].trading.is_none());
    }

    #[tokio::test]
    async fn test_feed_error_propagates() {
        let listings = MockListingProvider::new(vec![]).with_feed_error();

        assert!(run_discovery(&listings, 3).await.is_err());
    }

    #[tokio::test]
    async fn test_lookup_pair() {
        let listings = MockListingProvider::new(vec![]).with_pairs("a", vec![pair("a", 42.0)]);

        let found = lookup_pair(&listings, "solana", "a-pair").await.unwrap().unwrap();
        assert_eq!(found.pair_address, "a-pair");
        assert_eq!(found.volume.and_then(|v| v.h24), Some(42.0));

        assert!(lookup_pair(&listings, "ethereum", "a-pair").await.unwrap().is_none());
        assert!(lookup_pair(&listings, "solana", "missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_feed() {
        let listings = MockListingProvider::new(vec![]);

        let result = run_discovery(&listings, 3).await.unwrap();

        assert!(result.all.is_empty());
        assert!(result.top.is_empty());
    }
}
