//! Gas price tiers derived from a base estimate.
//!
//! The base gas price is congestion-dependent and re-quoted at the moment of
//! user intent; the three tiers are deterministic integer multiples of it:
//! slow = floor(base * 0.8), medium = base, fast = floor(base * 1.2).
//! Truncating integer arithmetic keeps gas prices in whole wei.

use crate::core::constants::{GAS_TIER_FAST_PERCENT, GAS_TIER_SLOW_PERCENT};
use alloy::primitives::U256;
use serde::{Deserialize, Serialize};

/// The gas price tier offered to the user before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GasPriceTier {
    /// 80% of the base estimate
    Slow,
    /// The base estimate
    #[default]
    Medium,
    /// 120% of the base estimate
    Fast,
}

impl std::fmt::Display for GasPriceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GasPriceTier::Slow => write!(f, "slow"),
            GasPriceTier::Medium => write!(f, "medium"),
            GasPriceTier::Fast => write!(f, "fast"),
        }
    }
}

impl std::str::FromStr for GasPriceTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "slow" => Ok(GasPriceTier::Slow),
            "medium" => Ok(GasPriceTier::Medium),
            "fast" => Ok(GasPriceTier::Fast),
            _ => Err(format!(
                "Invalid gas tier '{}'. Valid options: slow, medium, fast",
                s
            )),
        }
    }
}

/// The three resolved gas prices for a prepared transaction, in wei.
///
/// Derived value; never persisted. `slow <= medium <= fast` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GasTiers {
    pub slow: U256,
    pub medium: U256,
    pub fast: U256,
}

impl GasTiers {
    /// Compute the tiers from a base gas price estimate.
    ///
    /// Multiplication saturates at `U256::MAX` before the division; real gas
    /// prices are nowhere near that bound.
    pub fn from_base(base: U256) -> Self {
        let hundred = U256::from(100u64);
        Self {
            slow: base.saturating_mul(U256::from(GAS_TIER_SLOW_PERCENT)) / hundred,
            medium: base,
            fast: base.saturating_mul(U256::from(GAS_TIER_FAST_PERCENT)) / hundred,
        }
    }

    /// Resolve a tier to its gas price.
    pub fn price(&self, tier: GasPriceTier) -> U256 {
        match tier {
            GasPriceTier::Slow => self.slow,
            GasPriceTier::Medium => self.medium,
            GasPriceTier::Fast => self.fast,
        }
    }
}
