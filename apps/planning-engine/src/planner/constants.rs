//! Decimal constants for challenge plan calculations.

use rust_decimal::Decimal;

pub const TWO: Decimal = Decimal::TWO;
pub const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Intraday circuit-breaker threshold as a percent of account size.
pub const STOP_DRAWDOWN_PCT: Decimal = Decimal::from_parts(125, 0, 0, false, 2); // 1.25

/// Spread/slippage allowance added on top of every deposit tier.
pub const DEPOSIT_CUSHION: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

pub const TIER_MINIMUM: Decimal = Decimal::from_parts(13, 0, 0, false, 1); // 1.3
pub const TIER_RECOMMENDED: Decimal = Decimal::from_parts(14, 0, 0, false, 1); // 1.4
pub const TIER_CONSERVATIVE: Decimal = Decimal::from_parts(15, 0, 0, false, 1); // 1.5

/// Length of the fixed minimum-activity schedule.
pub const SCHEDULE_DAYS: u32 = 4;

/// Hard cap on simulated days within a single challenge phase.
pub const MAX_PHASE_DAYS: u32 = 60;

/// The engine never schedules or simulates more than two trades per day.
pub const TRADES_PER_DAY_CAP: u32 = 2;
