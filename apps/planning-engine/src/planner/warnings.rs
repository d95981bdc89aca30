//! Advisory checks for internally inconsistent plans.

use rust_decimal::Decimal;

use crate::config::ChallengeConfig;

use super::amounts::DerivedAmounts;
use super::constants::TWO;
use super::risk::RiskLimits;

/// Inspect the derived plan for contradictions worth flagging.
///
/// Returns human-readable messages in stable rule order, each rule appending
/// at most one. Warnings are advisory only; they never block or fail a
/// computation.
#[must_use]
pub fn collect_warnings(
    config: &ChallengeConfig,
    amounts: &DerivedAmounts,
    limits: &RiskLimits,
) -> Vec<String> {
    let mut warnings = Vec::new();

    // Rule 1: the minimum-profit floor outruns the phase-1 average pace
    if config.min_trading_days > 0 {
        let average_pace = amounts.phase1_target_amount / Decimal::from(config.min_trading_days);
        if amounts.min_daily_profit_amount > average_pace {
            warnings.push(format!(
                "Minimum daily profit {} exceeds the phase-1 average pace {}; the floor \
                 drives the schedule, not the target",
                amounts.min_daily_profit_amount, average_pace
            ));
        }
    }

    // Rule 2: one combined loss already exceeds the daily drawdown
    if limits.max_losses_daily_total < 1 {
        warnings.push(format!(
            "Daily drawdown {} cannot absorb a single combined loss of {}",
            amounts.daily_drawdown_amount,
            config.prop_risk + config.broker_risk
        ));
    }

    // Rule 3: a single primary-leg stop burns over half the daily budget
    if config.prop_risk > amounts.daily_drawdown_amount / TWO {
        warnings.push(format!(
            "Primary risk {} exceeds half of the daily drawdown {}",
            config.prop_risk, amounts.daily_drawdown_amount
        ));
    }

    warnings
}
