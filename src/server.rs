use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::api::types::{AssessRequest, AssessResponse};
use crate::api::cached_assess::assess_with_cache;
use crate::cache::SimpleCache;
use crate::discovery::{lookup_pair, run_discovery, BoostedToken, TradingData};
use crate::providers::{ChainProvider, ListingProvider};

pub struct AppState {
    pub cache: Mutex<SimpleCache>,
    pub chain: Arc<dyn ChainProvider>,
    pub listings: Arc<dyn ListingProvider>,
    pub cache_ttl_secs: u64,
    pub default_top_n: usize,
}

#[derive(Debug, Deserialize)]
pub struct TopQuery {
    pub limit: Option<usize>,
}

pub async fn risk_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AssessRequest>,
) -> Result<Json<AssessResponse>, StatusCode> {
    if request.address.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    info!(address = %request.address, "risk request");

    let response = assess_with_cache(request, state.chain.as_ref(), &state.cache, state.cache_ttl_secs).await;

    Ok(Json(response))
}

pub async fn top_boosted_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TopQuery>,
) -> Result<Json<Vec<BoostedToken>>, StatusCode> {
    let limit = query.limit.unwrap_or(state.default_top_n);

    match run_discovery(state.listings.as_ref(), limit).await {
        Ok(result) => Ok(Json(result.top)),
        Err(e) => {
            warn!(error = %e, "discovery failed");
            Err(StatusCode::BAD_GATEWAY)
        }
    }
}

pub async fn pair_handler(
    State(state): State<Arc<AppState>>,
    Path((chain_id, pair_id)): Path<(String, String)>,
) -> Result<Json<TradingData>, StatusCode> {
    match lookup_pair(state.listings.as_ref(), &chain_id, &pair_id).await {
        Ok(Some(trading)) => Ok(Json(trading)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            warn!(chain_id = %chain_id, pair_id = %pair_id, error = %e, "pair lookup failed");
            Err(StatusCode::BAD_GATEWAY)
        }
    }
}

async fn health_check() -> &'static str {
    "OK"
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/risk", post(risk_handler))
        .route("/api/v1/boosted/top", get(top_boosted_handler))
        .route("/api/v1/pairs/:chain_id/:pair_id", get(pair_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use std::time::{Duration, Instant};
    use tower::ServiceExt;
    use crate::discovery::types::{DexBoost, DexPair, PairToken};
    use crate::providers::{MockChainProvider, MockListingProvider};
    use crate::types::*;

    fn state() -> Arc<AppState> {
        let chain = MockChainProvider::new("test")
            .with_mint("tok", MintAccountInfo::default())
            .with_token_accounts("tok", vec![TokenAccountRecord::new("a", "w", 5)])
            .with_largest("tok", vec![]);
        let listings = MockListingProvider::new(vec![DexBoost {
            url: None,
            chain_id: "solana".to_string(),
            token_address: "tok".to_string(),
            description: None,
            icon: None,
            links: None,
            total_amount: None,
            amount: None,
        }])
        .with_pairs(
            "tok",
            vec![DexPair {
                chain_id: "solana".to_string(),
                pair_address: "tok-pair".to_string(),
                base_token: PairToken {
                    address: "tok".to_string(),
                    ..Default::default()
                },
                price_usd: Some("0.25".to_string()),
                ..Default::default()
            }],
        );

        Arc::new(AppState {
            cache: Mutex::new(SimpleCache::new()),
            chain: Arc::new(chain),
            listings: Arc::new(listings),
            cache_ttl_secs: 600,
            default_top_n: 3,
        })
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = router(state())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_risk_endpoint() {
        let request = Request::post("/api/v1/risk")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"address":"tok"}"#))
            .unwrap();

        let response = router(state()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["report"]["authorities"]["mint_authority_disabled"], true);
        assert_eq!(json["report"]["top_holder_percentage"], 100.0);
    }

    #[tokio::test]
    async fn test_risk_requests_for_different_tokens_run_concurrently() {
        let delay = Duration::from_millis(100);
        let chain = MockChainProvider::new("slow")
            .with_mint("A", MintAccountInfo::default())
            .with_mint("B", MintAccountInfo::default())
            .with_token_accounts("A", vec![TokenAccountRecord::new("a", "w", 5)])
            .with_token_accounts("B", vec![TokenAccountRecord::new("b", "w", 5)])
            .with_largest("A", vec![])
            .with_largest("B", vec![])
            .with_delay(delay);
        let state = Arc::new(AppState {
            cache: Mutex::new(SimpleCache::new()),
            chain: Arc::new(chain),
            listings: Arc::new(MockListingProvider::new(vec![])),
            cache_ttl_secs: 600,
            default_top_n: 3,
        });
        let request = |address: &str| {
            Request::post("/api/v1/risk")
                .header("content-type", "application/json")
                .body(Body::from(format!(r#"{{"address":"{}"}}"#, address)))
                .unwrap()
        };

        // three sequential fetches per assessment
        let single = delay * 3;
        let started = Instant::now();
        let (a, b) = tokio::join!(
            router(state.clone()).oneshot(request("A")),
            router(state.clone()).oneshot(request("B")),
        );
        let elapsed = started.elapsed();

        assert_eq!(a.unwrap().status(), StatusCode::OK);
        assert_eq!(b.unwrap().status(), StatusCode::OK);
        assert!(elapsed < single * 2 - delay, "took {:?}", elapsed);
        assert_eq!(state.cache.lock().await.size(), 2);
    }

    #[tokio::test]
    async fn test_risk_endpoint_rejects_blank_address() {
        let request = Request::post("/api/v1/risk")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"address":"  "}"#))
            .unwrap();

        let response = router(state()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_pair_endpoint() {
        let found = router(state())
            .oneshot(Request::get("/api/v1/pairs/solana/tok-pair").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(found.status(), StatusCode::OK);
        let json = body_json(found).await;
        assert_eq!(json["pairAddress"], "tok-pair");
        assert_eq!(json["priceUsd"], "0.25");

        let missing = router(state())
            .oneshot(Request::get("/api/v1/pairs/solana/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_top_boosted_endpoint() {
        let request = Request::get("/api/v1/boosted/top?limit=1").body(Body::empty()).unwrap();

        let response = router(state()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["address"], "tok");
    }
}
