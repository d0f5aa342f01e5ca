// src/types.rs

use serde::{Deserialize, Serialize};

/// One on-chain token account holding a balance of the mint under analysis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAccountRecord {
    pub address: String,
    pub owner: String,
    /// Raw base units, before applying the mint's decimals.
    pub amount: u64,
}

impl TokenAccountRecord {
    pub fn new(address: impl Into<String>, owner: impl Into<String>, amount: u64) -> Self {
        Self {
            address: address.into(),
            owner: owner.into(),
            amount,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HolderDistribution {
    pub total_supply: u128,
    pub top_holders: Vec<TokenAccountRecord>,
    pub top_holder_percentage: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityFlags {
    pub mint_authority_disabled: bool,
    pub freeze_authority_disabled: bool,
}

/// Liquidity pool status. `None` means unknown, never "false" or zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityInfo {
    pub lp_address: Option<String>,
    pub lp_burned: Option<bool>,
    pub pooled_tokens: Option<u64>,
    pub pooled_sol: Option<u64>,
    pub open_trading: Option<bool>,
    pub unknown_reason: Option<String>,
}

/// Fields read from a parsed mint account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintAccountInfo {
    pub mint_authority: Option<String>,
    pub freeze_authority: Option<String>,
    pub supply: Option<u64>,
    pub decimals: Option<u8>,
}

/// Fields read from a parsed liquidity pool account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LpAccountData {
    pub supply: Option<u64>,
    pub token_amount: Option<u64>,
    pub sol_amount: Option<u64>,
    pub state: Option<String>,
}

/// An entry of `getTokenLargestAccounts` joined with the owner of that account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LargestAccount {
    pub address: String,
    pub owner: Option<String>,
    pub amount: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub address: String,
    /// `None` when the mint account could not be fetched.
    pub authorities: Option<AuthorityFlags>,
    /// `None` when the holder accounts could not be fetched.
    pub top_holder_percentage: Option<f64>,
    pub holder_count: Option<usize>,
    pub liquidity: LiquidityInfo,
}
