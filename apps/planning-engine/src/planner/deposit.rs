//! Hedge-broker deposit sizing from risk and losing-streak assumptions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ChallengeConfig;

use super::constants::{DEPOSIT_CUSHION, TIER_CONSERVATIVE, TIER_MINIMUM, TIER_RECOMMENDED, TWO};

/// Recommended deposit levels for the hedge-side broker account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositPlan {
    /// Hedge risk × assumed losing streak × 2.
    pub base_buffer: Decimal,
    /// Base × 1.3 plus the spread cushion.
    pub minimum: Decimal,
    /// Base × 1.4 plus the spread cushion.
    pub recommended: Decimal,
    /// Base × 1.5 plus the spread cushion.
    pub conservative: Decimal,
}

/// Size the hedge-broker deposit with three safety tiers.
///
/// The base buffer covers the assumed losing streak twice over; each tier
/// scales it and adds a fixed 100-unit spread/slippage cushion. Total
/// function for finite non-negative input.
#[must_use]
pub fn plan_deposit(config: &ChallengeConfig) -> DepositPlan {
    let base_buffer = config.broker_risk * Decimal::from(config.max_losing_streak) * TWO;
    let tier = |multiplier: Decimal| base_buffer * multiplier + DEPOSIT_CUSHION;

    DepositPlan {
        base_buffer,
        minimum: tier(TIER_MINIMUM),
        recommended: tier(TIER_RECOMMENDED),
        conservative: tier(TIER_CONSERVATIVE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_canonical_deposit_tiers() {
        let plan = plan_deposit(&ChallengeConfig::default());

        // 30 * 6 * 2
        assert_eq!(plan.base_buffer, dec!(360));
        assert_eq!(plan.minimum, dec!(568));
        assert_eq!(plan.recommended, dec!(604));
        assert_eq!(plan.conservative, dec!(640));
    }

    #[test]
    fn test_tiers_are_strictly_ordered() {
        let plan = plan_deposit(&ChallengeConfig::default());

        assert!(plan.minimum < plan.recommended);
        assert!(plan.recommended < plan.conservative);
    }

    #[test]
    fn test_zero_hedge_risk_leaves_only_the_cushion() {
        let config = ChallengeConfig {
            broker_risk: dec!(0),
            ..ChallengeConfig::default()
        };
        let plan = plan_deposit(&config);

        assert_eq!(plan.base_buffer, dec!(0));
        assert_eq!(plan.minimum, dec!(100));
        assert_eq!(plan.recommended, dec!(100));
        assert_eq!(plan.conservative, dec!(100));
    }
}
