//! Fixed minimum-activity schedule for the opening challenge days.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ChallengeConfig;
use crate::error::PlanError;

use super::amounts::DerivedAmounts;
use super::constants::SCHEDULE_DAYS;

/// Advisory stop rule printed on every schedule row.
const STOP_RULE: &str =
    "Flat for the day after hitting the daily stop-loss count or -1.25% intraday drawdown";

/// One row of the minimum-activity schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceDay {
    /// Day number, 1-based.
    pub day: u32,
    /// Profit target shared by every row of the schedule.
    pub daily_target: Decimal,
    /// Recommended trades for the day, capped at 2.
    pub recommended_trades: u32,
    /// Primary-leg take-profit distance in currency.
    pub prop_take_profit: Decimal,
    /// Primary-leg stop-loss distance in currency.
    pub prop_stop_loss: Decimal,
    /// Hedge-leg take-profit distance in currency.
    pub broker_take_profit: Decimal,
    /// Hedge-leg stop-loss distance in currency.
    pub broker_stop_loss: Decimal,
    /// Fixed advisory stop rule.
    pub stop_rule: String,
}

/// The single pace figure shared by the schedule, phase plans, and simulator.
///
/// The larger of two constraints: the configured minimum daily profit and
/// the average pace needed to reach the phase-1 target within the minimum
/// trading days.
///
/// # Errors
///
/// Returns [`PlanError::ZeroTradingDays`] when `min_trading_days` is zero,
/// since the average-pace constraint divides by it.
pub fn shared_daily_target(
    config: &ChallengeConfig,
    amounts: &DerivedAmounts,
) -> Result<Decimal, PlanError> {
    if config.min_trading_days == 0 {
        return Err(PlanError::ZeroTradingDays);
    }

    let average_pace = amounts.phase1_target_amount / Decimal::from(config.min_trading_days);
    Ok(amounts.min_daily_profit_amount.max(average_pace))
}

/// Build the fixed 4-day minimum-activity schedule.
///
/// All rows are identical except the day number. The schedule is a flat
/// template, not an adaptive plan: one target is computed once and repeated,
/// and row 0 is the canonical daily pace figure consumed downstream.
///
/// The recommended trade count is 1 when a single primary-leg winner
/// (`prop_risk × prop_reward_ratio`) covers the daily target, else 2. The
/// count never exceeds 2 regardless of how far short one trade falls; that
/// is a policy cap, not a computed optimum.
///
/// # Errors
///
/// Returns [`PlanError::ZeroTradingDays`] when `min_trading_days` is zero.
pub fn build_compliance_schedule(
    config: &ChallengeConfig,
    amounts: &DerivedAmounts,
) -> Result<Vec<ComplianceDay>, PlanError> {
    let daily_target = shared_daily_target(config, amounts)?;

    let expected_win = config.prop_risk * config.prop_reward_ratio;
    let recommended_trades = if expected_win >= daily_target { 1 } else { 2 };

    let schedule = (1..=SCHEDULE_DAYS)
        .map(|day| ComplianceDay {
            day,
            daily_target,
            recommended_trades,
            prop_take_profit: config.prop_risk * config.prop_reward_ratio,
            prop_stop_loss: config.prop_risk,
            broker_take_profit: config.broker_risk * config.broker_reward_ratio,
            broker_stop_loss: config.broker_risk,
            stop_rule: STOP_RULE.to_string(),
        })
        .collect();

    Ok(schedule)
}
