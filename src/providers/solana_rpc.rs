use async_trait::async_trait;
use crate::types::*;
use super::{ChainProvider, ProviderError};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

pub const MAINNET_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
pub const TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
/// Size of an SPL Token account.
const TOKEN_ACCOUNT_SIZE: u64 = 165;

/// JSON-RPC client for a Solana node, using `jsonParsed` account encoding.
pub struct SolanaRpcProvider {
    client: reqwest::Client,
    rpc_url: String,
}

impl SolanaRpcProvider {
    pub fn new(rpc_url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, rpc_url))
    }

    pub fn with_client(client: reqwest::Client, rpc_url: impl Into<String>) -> Self {
        Self {
            client,
            rpc_url: rpc_url.into(),
        }
    }

    async fn rpc_call<T: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, ProviderError> {
        let request_body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        debug!(method, "solana rpc call");

        let response = self
            .client
            .post(&self.rpc_url)
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(method, %status, %body, "rpc http error");
            return Err(ProviderError::InvalidResponse(format!("http status {}", status)));
        }

        let text = response.text().await?;
        parse_rpc_response(&text)
    }

    async fn fetch_parsed_account(&self, address: &str) -> Result<ParsedInfo, ProviderError> {
        let account_info: AccountInfoResponse = self
            .rpc_call("getAccountInfo", json!([address, { "encoding": "jsonParsed" }]))
            .await?;

        let account = account_info.value.ok_or(ProviderError::NotFound)?;
        parsed_account(account.data)
    }
}

fn parse_rpc_response<T: for<'de> Deserialize<'de>>(text: &str) -> Result<T, ProviderError> {
    let rpc_response: RpcResponse<T> = serde_json::from_str(text).map_err(|e| {
        warn!(error = %e, "rpc json parse error");
        ProviderError::InvalidResponse(e.to_string())
    })?;

    if let Some(err) = rpc_response.error {
        return Err(ProviderError::Rpc {
            code: err.code,
            message: err.message,
        });
    }

    rpc_response
        .result
        .ok_or_else(|| ProviderError::InvalidResponse("missing result".to_string()))
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct AccountInfoResponse {
    value: Option<AccountData>,
}

#[derive(Debug, Deserialize)]
struct MultipleAccountsResponse {
    value: Vec<Option<AccountData>>,
}

#[derive(Debug, Deserialize)]
struct AccountData {
    data: DataField,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DataField {
    Parsed(ParsedData),
    Raw(Value),
}

#[derive(Debug, Deserialize)]
struct ParsedData {
    parsed: ParsedInfo,
}

#[derive(Debug, Deserialize)]
struct ParsedInfo {
    #[serde(rename = "type")]
    account_type: Option<String>,
    info: Value,
}

#[derive(Debug, Deserialize)]
struct ProgramAccount {
    pubkey: String,
    account: AccountData,
}

#[derive(Debug, Deserialize)]
struct LargestAccountsResponse {
    value: Vec<LargestAccountEntry>,
}

#[derive(Debug, Deserialize)]
struct LargestAccountEntry {
    address: String,
    amount: Value,
}

#[derive(Debug, Deserialize)]
struct MintInfo {
    decimals: u8,
    supply: String,
    #[serde(rename = "mintAuthority")]
    mint_authority: Option<String>,
    #[serde(rename = "freezeAuthority")]
    freeze_authority: Option<String>,
}

fn parsed_account(data: DataField) -> Result<ParsedInfo, ProviderError> {
    match data {
        DataField::Parsed(parsed) => Ok(parsed.parsed),
        DataField::Raw(_) => Err(ProviderError::InvalidResponse(
            "account data is not jsonParsed".to_string(),
        )),
    }
}

fn parsed_info(data: DataField) -> Result<Value, ProviderError> {
    parsed_account(data).map(|parsed| parsed.info)
}

/// Raw amounts arrive as decimal strings; some nodes send numbers.
fn raw_amount(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    }
}

/// Token accounts and wallets also parse as `jsonParsed`; only a mint has
/// authorities worth reporting.
fn mint_from_parsed(parsed: ParsedInfo) -> Result<MintAccountInfo, ProviderError> {
    match parsed.account_type.as_deref() {
        Some("mint") => mint_info_from(parsed.info),
        other => Err(ProviderError::InvalidResponse(format!(
            "account is not a mint (type {})",
            other.unwrap_or("unknown")
        ))),
    }
}

fn mint_info_from(info: Value) -> Result<MintAccountInfo, ProviderError> {
    let mint: MintInfo = serde_json::from_value(info)
        .map_err(|e| ProviderError::InvalidResponse(format!("account is not a mint: {}", e)))?;
    let supply = mint
        .supply
        .parse()
        .map_err(|_| ProviderError::InvalidResponse(format!("invalid mint supply {:?}", mint.supply)))?;

    Ok(MintAccountInfo {
        mint_authority: mint.mint_authority,
        freeze_authority: mint.freeze_authority,
        supply: Some(supply),
        decimals: Some(mint.decimals),
    })
}

fn lp_data_from(info: &Value) -> LpAccountData {
    LpAccountData {
        supply: raw_amount(info.get("supply")),
        token_amount: raw_amount(info.pointer("/tokenAmount/amount")),
        sol_amount: raw_amount(info.pointer("/solAmount/amount")),
        state: info.get("state").and_then(Value::as_str).map(str::to_string),
    }
}

fn token_record_from(account: ProgramAccount) -> Option<TokenAccountRecord> {
    let info = parsed_info(account.account.data).ok()?;
    let owner = info.get("owner").and_then(Value::as_str)?.to_string();
    let amount = raw_amount(info.pointer("/tokenAmount/amount"))?;

    Some(TokenAccountRecord {
        address: account.pubkey,
        owner,
        amount,
    })
}

fn owner_of(account: Option<AccountData>) -> Option<String> {
    let info = parsed_info(account?.data).ok()?;
    info.get("owner").and_then(Value::as_str).map(str::to_string)
}

/// Pair each largest account with its owner lookup, in request order.
/// Entries whose amount does not parse are dropped.
fn largest_accounts_from(
    entries: Vec<LargestAccountEntry>,
    owners: Vec<Option<AccountData>>,
) -> Vec<LargestAccount> {
    let mut owners = owners.into_iter();

    entries
        .into_iter()
        .filter_map(|entry| {
            let owner = owner_of(owners.next().flatten());
            let amount = raw_amount(Some(&entry.amount))?;
            Some(LargestAccount {
                address: entry.address,
                owner,
                amount,
            })
        })
        .collect()
}

#[async_trait]
impl ChainProvider for SolanaRpcProvider {
    fn provider_name(&self) -> &str {
        "solana-rpc"
    }

    async fn fetch_mint_info(&self, mint: &str) -> Result<MintAccountInfo, ProviderError> {
        let parsed = self.fetch_parsed_account(mint).await?;
        mint_from_parsed(parsed)
    }

    async fn fetch_token_accounts(&self, mint: &str) -> Result<Vec<TokenAccountRecord>, ProviderError> {
        let accounts: Vec<ProgramAccount> = self
            .rpc_call(
                "getProgramAccounts",
                json!([
                    TOKEN_PROGRAM_ID,
                    {
                        "encoding": "jsonParsed",
                        "filters": [
                            { "dataSize": TOKEN_ACCOUNT_SIZE },
                            { "memcmp": { "offset": 0, "bytes": mint } }
                        ]
                    }
                ]),
            )
            .await?;

        let total = accounts.len();
        let records: Vec<TokenAccountRecord> =
            accounts.into_iter().filter_map(token_record_from).collect();

        if records.len() < total {
            warn!(mint, skipped = total - records.len(), "unparseable token accounts skipped");
        }
        debug!(mint, count = records.len(), "token accounts fetched");

        Ok(records)
    }

    async fn fetch_largest_accounts(&self, mint: &str) -> Result<Vec<LargestAccount>, ProviderError> {
        let largest: LargestAccountsResponse = self
            .rpc_call("getTokenLargestAccounts", json!([mint]))
            .await?;

        if largest.value.is_empty() {
            return Ok(Vec::new());
        }

        let addresses: Vec<&str> = largest.value.iter().map(|e| e.address.as_str()).collect();
        let owners: MultipleAccountsResponse = self
            .rpc_call("getMultipleAccounts", json!([addresses, { "encoding": "jsonParsed" }]))
            .await?;

        let total = largest.value.len();
        let accounts = largest_accounts_from(largest.value, owners.value);

        if accounts.len() < total {
            warn!(mint, skipped = total - accounts.len(), "largest accounts with invalid amounts skipped");
        }

        Ok(accounts)
    }

    async fn fetch_lp_account(&self, lp_address: &str) -> Result<LpAccountData, ProviderError> {
        let parsed = self.fetch_parsed_account(lp_address).await?;
        Ok(lp_data_from(&parsed.info))
    }
}
