use crate::checks::{find_lp_address, KNOWN_DEX_POOL_AUTHORITIES};
use crate::providers::ChainProvider;
use crate::scoring::build_risk_report;
use crate::types::*;
use super::types::*;
use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Raw chain data gathered for one mint. Failed fetches are `None`.
#[derive(Debug, Default)]
struct ChainFacts {
    mint_info: Option<MintAccountInfo>,
    token_accounts: Option<Vec<TokenAccountRecord>>,
    lp_address: Option<String>,
    lp_account: Option<LpAccountData>,
}

/// Fetch everything the risk scorer needs, then score it.
///
/// Fetch failures become absent inputs plus an entry in `errors`; they never
/// abort the assessment.
pub async fn assess<P: ChainProvider + ?Sized>(
    request: AssessRequest,
    provider: &P,
) -> AssessResponse {
    let assessment_id = Uuid::new_v4().to_string();
    let requested_at = Utc::now().to_rfc3339();
    let mut errors = Vec::new();

    info!(address = %request.address, provider = provider.provider_name(), "assessing token");

    let facts = gather_facts(provider, &request.address, &request.options, &mut errors).await;

    let status = if errors.is_empty() {
        AssessmentStatus::Ok
    } else if facts.mint_info.is_some() || facts.token_accounts.is_some() {
        AssessmentStatus::Partial
    } else {
        AssessmentStatus::Error
    };

    let report = build_risk_report(
        &request.address,
        facts.mint_info.as_ref(),
        facts.token_accounts.as_deref(),
        facts.lp_address.as_deref(),
        facts.lp_account.as_ref(),
    );
    let warnings = report.warnings();

    AssessResponse {
        schema_version: "1.0.0".to_string(),
        assessment_id,
        requested_at,
        address: request.address,
        status,
        report,
        warnings,
        errors,
    }
}

async fn gather_facts<P: ChainProvider + ?Sized>(
    provider: &P,
    address: &str,
    options: &AssessOptions,
    errors: &mut Vec<String>,
) -> ChainFacts {
    let mut facts = ChainFacts::default();

    match provider.fetch_mint_info(address).await {
        Ok(info) => facts.mint_info = Some(info),
        Err(e) => {
            warn!(address, error = %e, "mint info unavailable");
            errors.push(format!("Failed to fetch mint info: {}", e));
        }
    }

    if options.include_holders {
        match provider.fetch_token_accounts(address).await {
            Ok(records) => facts.token_accounts = Some(records),
            Err(e) => {
                warn!(address, error = %e, "token accounts unavailable");
                errors.push(format!("Failed to fetch token accounts: {}", e));
            }
        }
    }

    if options.include_liquidity {
        match provider.fetch_largest_accounts(address).await {
            Ok(largest) => facts.lp_address = find_lp_address(&largest, KNOWN_DEX_POOL_AUTHORITIES),
            Err(e) => {
                warn!(address, error = %e, "largest accounts unavailable");
                errors.push(format!("Failed to fetch largest accounts: {}", e));
            }
        }

        if let Some(lp_address) = &facts.lp_address {
            debug!(address, lp_address = %lp_address, "lp candidate found");
            match provider.fetch_lp_account(lp_address).await {
                Ok(data) => facts.lp_account = Some(data),
                Err(e) => {
                    warn!(lp_address = %lp_address, error = %e, "lp account unavailable");
                    errors.push(format!("Failed to fetch LP account: {}", e));
                }
            }
        }
    }

    facts
}
