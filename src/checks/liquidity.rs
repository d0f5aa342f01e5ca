use crate::types::*;

pub const NO_LP_REASON: &str =
    "No LP address found. Token might not have a liquidity pool or might be traded on a different DEX.";

pub const LP_DATA_UNAVAILABLE_REASON: &str = "LP account data unavailable.";

/// Raydium AMM v4 pool authority. Pool vaults are token accounts owned by it.
pub const RAYDIUM_AMM_V4_AUTHORITY: &str = "5Q544fKrFoe6tsEbD7S8EmxGTJYAKtTVhAW5Q5pge4j1";

pub const KNOWN_DEX_POOL_AUTHORITIES: &[&str] = &[RAYDIUM_AMM_V4_AUTHORITY];

/// Best-effort LP discovery: the first of the mint's largest accounts that is
/// owned by a known DEX pool authority.
///
/// This is approximate. Pools on DEXes outside `dex_owners`, or pools whose
/// vault is not among the largest accounts, are reported as not found.
pub fn find_lp_address(largest: &[LargestAccount], dex_owners: &[&str]) -> Option<String> {
    largest
        .iter()
        .find(|acct| {
            acct.owner
                .as_deref()
                .map(|owner| dex_owners.contains(&owner))
                .unwrap_or(false)
        })
        .map(|acct| acct.address.clone())
}

pub fn evaluate_liquidity(
    lp_address: Option<&str>,
    lp_account_data: Option<&LpAccountData>,
) -> LiquidityInfo {
    let lp_address = match lp_address {
        Some(addr) => addr,
        None => return unknown(NO_LP_REASON),
    };

    let data = match lp_account_data {
        Some(d) => d,
        None => {
            return LiquidityInfo {
                lp_address: Some(lp_address.to_string()),
                ..unknown(LP_DATA_UNAVAILABLE_REASON)
            };
        }
    };

    LiquidityInfo {
        lp_address: Some(lp_address.to_string()),
        lp_burned: data.supply.map(|supply| supply == 0),
        pooled_tokens: data.token_amount,
        pooled_sol: data.sol_amount,
        open_trading: data.state.as_deref().map(|state| state == "initialized"),
        unknown_reason: None,
    }
}

fn unknown(reason: &str) -> LiquidityInfo {
    LiquidityInfo {
        lp_address: None,
        lp_burned: None,
        pooled_tokens: None,
        pooled_sol: None,
        open_trading: None,
        unknown_reason: Some(reason.to_string()),
    }
}
