use crate::types::*;

/// Number of accounts counted as "top holders".
pub const TOP_HOLDER_COUNT: usize = 10;

/// Supply distribution over the non-empty token accounts of a mint.
///
/// Zero-balance accounts are dropped before anything else, so they count
/// neither toward supply nor toward the ranking. Sums are kept in `u128`
/// and only the final ratio is computed in floating point, so large raw
/// amounts do not lose precision.
pub fn compute_holder_distribution(records: &[TokenAccountRecord]) -> HolderDistribution {
    let mut holders: Vec<&TokenAccountRecord> = records.iter().filter(|r| r.amount > 0).collect();

    let total_supply: u128 = holders.iter().map(|r| r.amount as u128).sum();

    // stable: ties keep input order
    holders.sort_by(|a, b| b.amount.cmp(&a.amount));

    let top_holders: Vec<TokenAccountRecord> = holders
        .into_iter()
        .take(TOP_HOLDER_COUNT)
        .cloned()
        .collect();

    let top_sum: u128 = top_holders.iter().map(|r| r.amount as u128).sum();

    HolderDistribution {
        total_supply,
        top_holder_percentage: percentage(top_sum, total_supply),
        top_holders,
    }
}

fn percentage(part: u128, total: u128) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}
