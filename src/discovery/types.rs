use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Entry of DexScreener's `token-boosts/latest/v1` feed.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexBoost {
    pub url: Option<String>,
    pub chain_id: String,
    pub token_address: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    #[serde(default)]
    pub links: Option<Vec<TokenLink>>,
    pub total_amount: Option<f64>,
    pub amount: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenLink {
    #[serde(rename = "type")]
    pub link_type: Option<String>,
    pub label: Option<String>,
    pub url: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PairToken {
    pub address: String,
    pub name: Option<String>,
    pub symbol: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TxnCount {
    #[serde(default)]
    pub buys: u64,
    #[serde(default)]
    pub sells: u64,
}

impl TxnCount {
    pub fn total(&self) -> u64 {
        self.buys + self.sells
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Txns {
    pub m5: Option<TxnCount>,
    pub h1: Option<TxnCount>,
    pub h6: Option<TxnCount>,
    pub h24: Option<TxnCount>,
}

/// Per-window figures, used for both volume and price change.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Windowed {
    pub m5: Option<f64>,
    pub h1: Option<f64>,
    pub h6: Option<f64>,
    pub h24: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Liquidity {
    pub usd: Option<f64>,
    pub base: Option<f64>,
    pub quote: Option<f64>,
}

/// Trading pair as returned by the `latest/dex` endpoints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexPair {
    pub chain_id: String,
    pub dex_id: Option<String>,
    pub url: Option<String>,
    pub pair_address: String,
    pub base_token: PairToken,
    pub quote_token: Option<PairToken>,
    pub price_native: Option<String>,
    pub price_usd: Option<String>,
    pub txns: Option<Txns>,
    pub volume: Option<Windowed>,
    pub price_change: Option<Windowed>,
    pub liquidity: Option<Liquidity>,
    pub fdv: Option<f64>,
    pub market_cap: Option<f64>,
    pub pair_created_at: Option<i64>,
    pub info: Option<Value>,
    pub boosts: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct TokenPairsResponse {
    pub pairs: Option<Vec<DexPair>>,
}

#[derive(Debug, Deserialize)]
pub struct PairResponse {
    pub pair: Option<DexPair>,
    pub pairs: Option<Vec<DexPair>>,
}

/// Trading figures taken from a token's first listed pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingData {
    pub pair_address: String,
    pub base_token: PairToken,
    pub quote_token: Option<PairToken>,
    pub price_native: Option<String>,
    pub price_usd: Option<String>,
    pub txns: Option<Txns>,
    pub volume: Option<Windowed>,
    pub price_change: Option<Windowed>,
    pub fdv: Option<f64>,
    pub market_cap: Option<f64>,
    pub pair_created_at: Option<i64>,
    pub info: Option<Value>,
    pub boosts: Option<Value>,
}

impl From<DexPair> for TradingData {
    fn from(pair: DexPair) -> Self {
        Self {
            pair_address: pair.pair_address,
            base_token: pair.base_token,
            quote_token: pair.quote_token,
            price_native: pair.price_native,
            price_usd: pair.price_usd,
            txns: pair.txns,
            volume: pair.volume,
            price_change: pair.price_change,
            fdv: pair.fdv,
            market_cap: pair.market_cap,
            pair_created_at: pair.pair_created_at,
            info: pair.info,
            boosts: pair.boosts,
        }
    }
}

/// A boosted listing, optionally enriched with trading data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoostedToken {
    pub address: String,
    pub chain_id: String,
    pub url: Option<String>,
    pub description: Option<String>,
    pub links: Option<Vec<TokenLink>>,
    pub total_amount: Option<f64>,
    pub amount: Option<f64>,
    /// `None` when DexScreener lists no pair for the token.
    pub trading: Option<TradingData>,
}

impl From<DexBoost> for BoostedToken {
    fn from(boost: DexBoost) -> Self {
        Self {
            address: boost.token_address,
            chain_id: boost.chain_id,
            url: boost.url,
            description: boost.description,
            links: boost.links,
            total_amount: boost.total_amount,
            amount: boost.amount,
            trading: None,
        }
    }
}

impl BoostedToken {
    pub fn volume_h24(&self) -> f64 {
        self.trading
            .as_ref()
            .and_then(|t| t.volume.as_ref())
            .and_then(|v| v.h24)
            .unwrap_or(0.0)
    }

    pub fn txns_h24(&self) -> u64 {
        self.trading
            .as_ref()
            .and_then(|t| t.txns.as_ref())
            .and_then(|t| t.h24)
            .map(|c| c.total())
            .unwrap_or(0)
    }
}
