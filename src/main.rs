//! Boosted token scanner and Solana token risk checker.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use token_risk_scanner::api::{assess, AssessRequest};
use token_risk_scanner::cache::SimpleCache;
use token_risk_scanner::config::AppConfig;
use token_risk_scanner::discovery::{lookup_pair, run_discovery};
use token_risk_scanner::output;
use token_risk_scanner::providers::{DexScreenerClient, GeminiClient, SolanaRpcProvider};
use token_risk_scanner::server::{run_server, AppState};

#[derive(Parser, Debug)]
#[clap(name = "token-risk-scanner", version, about, long_about = None)]
struct Cli {
    /// Log filter, overridden by RUST_LOG
    #[clap(short, long, value_name = "LEVEL", default_value = "info")]
    log_level: String,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch boosted tokens, rank them by activity and export JSON/CSV
    Scan {
        /// Number of top tokens to keep
        #[clap(short, long)]
        top: Option<usize>,

        /// Output directory
        #[clap(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Write CSV locally even when a Gemini key is configured
        #[clap(long)]
        no_llm: bool,
    },

    /// Assess the on-chain risk of a Solana token
    Risk {
        /// Token mint address
        #[clap(value_name = "MINT")]
        address: String,

        /// Print the report as JSON
        #[clap(long)]
        json: bool,
    },

    /// Show trading data for a single DexScreener pair
    Pair {
        /// Chain id, e.g. solana
        #[clap(value_name = "CHAIN")]
        chain_id: String,

        /// Pair address
        #[clap(value_name = "PAIR")]
        pair_id: String,
    },

    /// Serve the HTTP API
    Serve {
        #[clap(long)]
        host: Option<String>,

        #[clap(short, long)]
        port: Option<u16>,
    },
}

fn initialize_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("token_risk_scanner={},tower_http={}", level, level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_logging(&cli.log_level);

    let config = AppConfig::from_env().context("failed to load configuration")?;

    match cli.command {
        Commands::Scan { top, output, no_llm } => scan(&config, top, output, no_llm).await,
        Commands::Risk { address, json } => risk(&config, address, json).await,
        Commands::Pair { chain_id, pair_id } => pair(&config, chain_id, pair_id).await,
        Commands::Serve { host, port } => serve(&config, host, port).await,
    }
}

async fn scan(config: &AppConfig, top: Option<usize>, output_dir: Option<PathBuf>, no_llm: bool) -> Result<()> {
    let top_n = top.unwrap_or(config.top_n);
    let dir = output_dir.unwrap_or_else(|| config.output_dir.clone());

    let listings = DexScreenerClient::new(&config.dexscreener_base_url, config.http_timeout)?;
    let result = run_discovery(&listings, top_n)
        .await
        .context("failed to fetch boosted tokens")?;

    output::save_listings_json(&dir, &result.all).await?;

    let generator = match (&config.gemini_api_key, no_llm) {
        (Some(key), false) => Some(GeminiClient::new(key.clone(), &config.gemini_model, config.http_timeout)?),
        _ => None,
    };

    let csv_path = match generator {
        Some(generator) => match output::format_csv_with_llm(&generator, &result.top).await {
            Ok(csv) => output::save_csv(&dir, top_n, &csv).await?,
            Err(e) => {
                warn!(error = %e, "llm formatting failed, writing csv locally");
                output::write_ranked_csv(&dir, top_n, &result.top).await?
            }
        },
        None => output::write_ranked_csv(&dir, top_n, &result.top).await?,
    };
    info!(path = %csv_path.display(), "top tokens exported");

    println!("Boosted tokens with trading data: {}", result.all.len());
    println!("\nTop {} tokens with the highest 24h volume and transaction count:", top_n);
    println!("{}", serde_json::to_string_pretty(&result.top)?);

    Ok(())
}

async fn risk(config: &AppConfig, address: String, json: bool) -> Result<()> {
    let provider = SolanaRpcProvider::new(&config.solana_rpc_url, config.http_timeout)?;
    let response = assess(AssessRequest::new(address), &provider).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let report = &response.report;
    let unknown = |reason: &Option<String>| reason.clone().unwrap_or_else(|| "unknown".to_string());

    println!("Token Risk Analysis: {}", report.address);
    match &report.authorities {
        Some(flags) => {
            println!("Mint Authority Disabled: {}", flags.mint_authority_disabled);
            println!("Freeze Authority Disabled: {}", flags.freeze_authority_disabled);
        }
        None => println!("Authorities: unavailable"),
    }
    match report.top_holder_percentage {
        Some(pct) => println!("Top 10 Holders: {:.2}%", pct),
        None => println!("Top 10 Holders: unavailable"),
    }

    let lp = &report.liquidity;
    let reason = unknown(&lp.unknown_reason);
    let show = |value: Option<String>| value.unwrap_or_else(|| reason.clone());
    println!("LP Address: {}", show(lp.lp_address.clone()));
    println!("LP Burned: {}", show(lp.lp_burned.map(|v| v.to_string())));
    println!("Pooled Tokens: {}", show(lp.pooled_tokens.map(|v| v.to_string())));
    println!("Pooled SOL: {}", show(lp.pooled_sol.map(|v| v.to_string())));
    println!("Open Trading: {}", show(lp.open_trading.map(|v| v.to_string())));

    for warning in &response.warnings {
        println!("! {}", warning);
    }
    for error in &response.errors {
        println!("error: {}", error);
    }

    Ok(())
}

async fn pair(config: &AppConfig, chain_id: String, pair_id: String) -> Result<()> {
    let listings = DexScreenerClient::new(&config.dexscreener_base_url, config.http_timeout)?;

    match lookup_pair(&listings, &chain_id, &pair_id).await? {
        Some(trading) => println!("{}", serde_json::to_string_pretty(&trading)?),
        None => println!("Pair {} not listed on {}", pair_id, chain_id),
    }

    Ok(())
}

async fn serve(config: &AppConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    let host = host.unwrap_or_else(|| config.api_host.clone());
    let port = port.unwrap_or(config.api_port);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    let state = AppState {
        cache: Mutex::new(SimpleCache::new()),
        chain: Arc::new(SolanaRpcProvider::new(&config.solana_rpc_url, config.http_timeout)?),
        listings: Arc::new(DexScreenerClient::new(&config.dexscreener_base_url, config.http_timeout)?),
        cache_ttl_secs: config.cache_ttl_secs,
        default_top_n: config.top_n,
    };

    run_server(addr, state).await?;
    Ok(())
}
