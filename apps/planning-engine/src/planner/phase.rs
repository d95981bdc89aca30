//! Day and trade projections for reaching a phase target.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// Projected effort to reach one phase target at a given daily pace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhasePlan {
    /// Profit required to pass the phase.
    pub total_target: Decimal,
    /// Daily pace assumed for the projection.
    pub daily_target: Decimal,
    /// Days needed at the daily pace, rounded up.
    pub estimated_days: u32,
    /// Trade count at one trade per day.
    pub trades_one_per_day: u32,
    /// Trade count at two trades per day.
    pub trades_two_per_day: u32,
}

/// Project days and trades needed to reach `total_target` at `daily_target`.
///
/// `estimated_days = ceil(total / daily)`; a target already met (zero or
/// negative) projects to zero days, and a count beyond `u32::MAX` saturates
/// rather than wrapping or collapsing back to "already met". The two-trade
/// count saturates the same way. Callers supply the daily pace, normally the
/// compliance schedule's row-0 target; it is not recomputed here.
///
/// # Errors
///
/// Returns [`PlanError::NonPositiveDailyTarget`] when `daily_target` is zero
/// or negative, rather than propagating an unbounded estimate.
pub fn project_phase(total_target: Decimal, daily_target: Decimal) -> Result<PhasePlan, PlanError> {
    if daily_target <= Decimal::ZERO {
        return Err(PlanError::NonPositiveDailyTarget {
            value: daily_target,
        });
    }

    let quotient = (total_target / daily_target).ceil();
    let estimated_days = if quotient <= Decimal::ZERO {
        0
    } else {
        quotient.to_u32().unwrap_or(u32::MAX)
    };

    Ok(PhasePlan {
        total_target,
        daily_target,
        estimated_days,
        trades_one_per_day: estimated_days,
        trades_two_per_day: estimated_days.saturating_mul(2),
    })
}
