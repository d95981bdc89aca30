//! Loss budgets derived from drawdown amounts and per-trade risk.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ChallengeConfig;
use crate::error::PlanError;

use super::amounts::DerivedAmounts;
use super::constants::STOP_DRAWDOWN_PCT;

/// Integer loss budgets for the challenge account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskLimits {
    /// Full primary-leg losses the daily drawdown can absorb.
    pub max_losses_daily_prop: u32,
    /// Combined (primary + hedge) losses the daily drawdown can absorb.
    pub max_losses_daily_total: u32,
    /// Consecutive combined losses tolerable before max drawdown is hit.
    pub max_consecutive_losses: u32,
    /// Operative daily stop count: the lower daily budget, never below 1.
    pub stop_losses_daily: u32,
    /// Intraday circuit-breaker threshold, percent of account size.
    pub stop_drawdown_pct: Decimal,
}

/// Convert drawdown amounts into whole-loss budgets by floor division.
///
/// Combined per-trade risk is `prop_risk + broker_risk`; a hedged trade that
/// loses on both legs consumes the combined amount. The operative stop count
/// floors at 1 so a plan never degenerates into "zero trades allowed" even
/// when one full loss exhausts the daily drawdown. A budget worth more than
/// `u32::MAX` whole losses saturates at `u32::MAX` instead of collapsing to
/// zero.
///
/// # Errors
///
/// Returns [`PlanError::NonPositiveRisk`] when the primary-leg risk is zero
/// or negative (it divides both drawdown budgets), and
/// [`PlanError::NegativeRisk`] when the hedge-leg risk is negative.
pub fn derive_risk_limits(
    config: &ChallengeConfig,
    amounts: &DerivedAmounts,
) -> Result<RiskLimits, PlanError> {
    if config.prop_risk <= Decimal::ZERO {
        return Err(PlanError::NonPositiveRisk {
            leg: "primary",
            value: config.prop_risk,
        });
    }
    if config.broker_risk < Decimal::ZERO {
        return Err(PlanError::NegativeRisk {
            leg: "hedge",
            value: config.broker_risk,
        });
    }

    let combined_risk = config.prop_risk + config.broker_risk;

    let whole_losses = |budget: Decimal, per_loss: Decimal| {
        let quotient = (budget / per_loss).floor();
        if quotient <= Decimal::ZERO {
            0
        } else {
            quotient.to_u32().unwrap_or(u32::MAX)
        }
    };

    let max_losses_daily_prop = whole_losses(amounts.daily_drawdown_amount, config.prop_risk);
    let max_losses_daily_total = whole_losses(amounts.daily_drawdown_amount, combined_risk);
    let max_consecutive_losses = whole_losses(amounts.max_drawdown_amount, combined_risk);

    let stop_losses_daily = max_losses_daily_prop.min(max_losses_daily_total).max(1);

    Ok(RiskLimits {
        max_losses_daily_prop,
        max_losses_daily_total,
        max_consecutive_losses,
        stop_losses_daily,
        stop_drawdown_pct: STOP_DRAWDOWN_PCT,
    })
}
