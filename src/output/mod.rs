// src/output/mod.rs

//! Files written by a discovery run: the raw listing dump and the CSV of the
//! top-ranked tokens. The output directory is created on demand.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::discovery::BoostedToken;
use crate::providers::{ProviderError, TextGenerator};

pub const LISTINGS_FILE: &str = "boosted_tokens.json";

pub const CSV_PROMPT: &str = "From the following JSON data structures, extract the key names in to columns and the definitions as rows and return them as a single line of raw very precise CSV ";

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv_async::Error),
    #[error("text generation failed: {0}")]
    Generation(#[from] ProviderError),
}

pub fn csv_file_name(top_n: usize) -> String {
    format!("top_{}_boosted_tokens.csv", top_n)
}

async fn ensure_dir(dir: &Path) -> Result<(), OutputError> {
    tokio::fs::create_dir_all(dir).await?;
    Ok(())
}

pub async fn save_listings_json(dir: &Path, tokens: &[BoostedToken]) -> Result<PathBuf, OutputError> {
    ensure_dir(dir).await?;
    let path = dir.join(LISTINGS_FILE);

    let json = serde_json::to_string_pretty(tokens)?;
    tokio::fs::write(&path, json).await?;

    info!(path = %path.display(), count = tokens.len(), "listings saved");
    Ok(path)
}

/// Ask the text generator to render the tokens as CSV.
pub async fn format_csv_with_llm<G: TextGenerator + ?Sized>(
    generator: &G,
    tokens: &[BoostedToken],
) -> Result<String, OutputError> {
    let mut prompt = CSV_PROMPT.to_string();
    prompt.push_str(&serde_json::to_string_pretty(tokens)?);

    let text = generator.generate(&prompt).await?;
    Ok(strip_code_fence(&text).to_string())
}

/// Models often wrap CSV in a markdown fence.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    match trimmed.strip_prefix("```") {
        Some(rest) => {
            let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
            body.trim_end().trim_end_matches("```").trim()
        }
        None => trimmed,
    }
}

pub async fn save_csv(dir: &Path, top_n: usize, csv: &str) -> Result<PathBuf, OutputError> {
    ensure_dir(dir).await?;
    let path = dir.join(csv_file_name(top_n));

    tokio::fs::write(&path, csv).await?;

    info!(path = %path.display(), "csv saved");
    Ok(path)
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    address: &'a str,
    chain_id: &'a str,
    symbol: Option<&'a str>,
    name: Option<&'a str>,
    price_usd: Option<&'a str>,
    volume_h24: f64,
    txns_h24: u64,
    market_cap: Option<f64>,
    fdv: Option<f64>,
    url: Option<&'a str>,
}

impl<'a> From<&'a BoostedToken> for CsvRow<'a> {
    fn from(token: &'a BoostedToken) -> Self {
        let trading = token.trading.as_ref();
        Self {
            address: &token.address,
            chain_id: &token.chain_id,
            symbol: trading.and_then(|t| t.base_token.symbol.as_deref()),
            name: trading.and_then(|t| t.base_token.name.as_deref()),
            price_usd: trading.and_then(|t| t.price_usd.as_deref()),
            volume_h24: token.volume_h24(),
            txns_h24: token.txns_h24(),
            market_cap: trading.and_then(|t| t.market_cap),
            fdv: trading.and_then(|t| t.fdv),
            url: token.url.as_deref(),
        }
    }
}

/// Serialize one row per token without a text generator.
pub async fn write_ranked_csv(
    dir: &Path,
    top_n: usize,
    tokens: &[BoostedToken],
) -> Result<PathBuf, OutputError> {
    ensure_dir(dir).await?;
    let path = dir.join(csv_file_name(top_n));

    let file = tokio::fs::File::create(&path).await?;
    let mut serializer = csv_async::AsyncSerializer::from_writer(file);
    for token in tokens {
        serializer.serialize(CsvRow::from(token)).await?;
    }
    serializer.flush().await?;

    info!(path = %path.display(), rows = tokens.len(), "csv saved");
    Ok(path)
}
