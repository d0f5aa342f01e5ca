use crate::checks::*;
use crate::types::*;

/// Top-10 share above which the report flags holder concentration.
pub const HIGH_CONCENTRATION_PCT: f64 = 50.0;

/// Compose a risk report from already fetched inputs.
///
/// `None` inputs mean the caller could not obtain that data; the matching
/// report field is then omitted rather than guessed.
pub fn build_risk_report(
    address: &str,
    mint_info: Option<&MintAccountInfo>,
    account_records: Option<&[TokenAccountRecord]>,
    lp_address: Option<&str>,
    lp_account_data: Option<&LpAccountData>,
) -> RiskReport {
    let authorities = mint_info.map(|info| {
        evaluate_authorities(info.mint_authority.as_deref(), info.freeze_authority.as_deref())
    });

    let distribution = account_records.map(compute_holder_distribution);
    let holder_count =
        account_records.map(|records| records.iter().filter(|r| r.amount > 0).count());

    RiskReport {
        address: address.to_string(),
        authorities,
        top_holder_percentage: distribution.map(|d| d.top_holder_percentage),
        holder_count,
        liquidity: evaluate_liquidity(lp_address, lp_account_data),
    }
}

impl RiskReport {
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Some(flags) = &self.authorities {
            if !flags.mint_authority_disabled {
                warnings.push("Mint authority exists: supply is mutable and can be inflated.".to_string());
            }
            if !flags.freeze_authority_disabled {
                warnings.push("Freeze authority exists: token balances can be frozen.".to_string());
            }
        }

        if let Some(pct) = self.top_holder_percentage {
            if pct > HIGH_CONCENTRATION_PCT {
                warnings.push(format!("Top 10 holders own {:.2}% of supply.", pct));
            }
        }

        match (&self.liquidity.lp_address, self.liquidity.lp_burned) {
            (None, _) => warnings.push("Liquidity pool could not be located.".to_string()),
            (Some(_), Some(false)) => {
                warnings.push("LP tokens are not burned: liquidity can be withdrawn.".to_string())
            }
            _ => {}
        }

        warnings
    }
}
