//! Currency amounts derived from percentage-based configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ChallengeConfig;

use super::constants::HUNDRED;

/// The five currency amounts behind every downstream calculation.
///
/// Purely derived from the configuration; recomputed on demand, never cached
/// or mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedAmounts {
    /// Maximum loss permitted within a single day.
    pub daily_drawdown_amount: Decimal,
    /// Maximum cumulative loss before the challenge is failed.
    pub max_drawdown_amount: Decimal,
    /// Profit required to pass phase 1.
    pub phase1_target_amount: Decimal,
    /// Profit required to pass phase 2.
    pub phase2_target_amount: Decimal,
    /// Smallest day profit that counts as progress.
    pub min_daily_profit_amount: Decimal,
}

/// Convert the percentage limits into absolute currency amounts.
///
/// Exact multiplication (`account_size × pct / 100`); no failure modes. A
/// zero percentage yields a zero amount, which downstream consumers tolerate.
#[must_use]
pub fn derive_amounts(config: &ChallengeConfig) -> DerivedAmounts {
    let pct_of_account = |pct: Decimal| config.account_size * pct / HUNDRED;

    DerivedAmounts {
        daily_drawdown_amount: pct_of_account(config.daily_drawdown_pct),
        max_drawdown_amount: pct_of_account(config.max_drawdown_pct),
        phase1_target_amount: pct_of_account(config.phase1_target_pct),
        phase2_target_amount: pct_of_account(config.phase2_target_pct),
        min_daily_profit_amount: pct_of_account(config.min_daily_profit_pct),
    }
}
