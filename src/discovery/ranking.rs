use std::cmp::Ordering;

use super::types::BoostedToken;

/// Most active tokens first: 24h volume, then 24h transaction count.
///
/// Tokens without trading data rank as zero on both keys. The sort is stable.
pub fn rank_by_activity(tokens: &[BoostedToken], limit: usize) -> Vec<BoostedToken> {
    let mut ranked: Vec<&BoostedToken> = tokens.iter().collect();

    ranked.sort_by(|a, b| {
        b.volume_h24()
            .partial_cmp(&a.volume_h24())
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.txns_h24().cmp(&a.txns_h24()))
    });

    ranked.into_iter().take(limit).cloned().collect()
}
