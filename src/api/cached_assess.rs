use crate::api::types::{AssessRequest, AssessResponse};
use crate::providers::ChainProvider;
use crate::cache::{SimpleCache, simple_cache::ttl_for_response};
use super::assess::assess;
use tokio::sync::Mutex;
use tracing::debug;

/// The cache lock is only held for the lookup and the store, never across
/// provider calls, so assessments of different tokens run concurrently.
pub async fn assess_with_cache<P: ChainProvider + ?Sized>(
    request: AssessRequest,
    provider: &P,
    cache: &Mutex<SimpleCache>,
    base_ttl: u64,
) -> AssessResponse {
    let cache_key = format!(
        "{}:{}:{}",
        request.address,
        request.options.include_holders,
        request.options.include_liquidity
    );

    if !request.options.force_refresh {
        if let Some(cached_response) = cache.lock().await.get(&cache_key) {
            debug!(key = %cache_key, "cache hit");
            return cached_response;
        }
    }

    let response = assess(request, provider).await;

    let ttl = ttl_for_response(&response, base_ttl);
    let mut cache = cache.lock().await;
    cache.cleanup();
    cache.set(cache_key, response.clone(), ttl);

    response
}
