// src/checks/mod.rs

pub mod holder_distribution;
pub mod authorities;
pub mod liquidity;

// Re-export check functions
pub use holder_distribution::{compute_holder_distribution, TOP_HOLDER_COUNT};
pub use authorities::evaluate_authorities;
pub use liquidity::{
    evaluate_liquidity, find_lp_address, KNOWN_DEX_POOL_AUTHORITIES, RAYDIUM_AMM_V4_AUTHORITY,
};
