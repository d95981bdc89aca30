//! Error types for challenge plan computations.

use rust_decimal::Decimal;
use thiserror::Error;

/// Configuration errors raised by planning and simulation components.
///
/// These are raised as close to the offending computation as possible and
/// halt that computation entirely; no partial or degenerate result is
/// returned. Advisory warnings never escalate into these errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// Per-trade risk must be positive where it divides a drawdown budget.
    #[error("Per-trade risk for the {leg} leg must be positive, got {value}")]
    NonPositiveRisk {
        /// Risk leg carrying the offending value (`"primary"` or `"hedge"`).
        leg: &'static str,
        /// Configured per-trade risk amount.
        value: Decimal,
    },

    /// Hedge-leg risk may be zero (no hedge) but never negative.
    #[error("Per-trade risk for the {leg} leg must not be negative, got {value}")]
    NegativeRisk {
        /// Risk leg carrying the offending value.
        leg: &'static str,
        /// Configured per-trade risk amount.
        value: Decimal,
    },

    /// A daily pace target must be positive before days can be estimated.
    #[error("Daily target must be positive, got {value}")]
    NonPositiveDailyTarget {
        /// Daily target amount supplied by the caller.
        value: Decimal,
    },

    /// The minimum-trading-days constraint divides the phase-1 target.
    #[error("Minimum trading days must be at least 1")]
    ZeroTradingDays,

    /// Probabilities are undefined over zero simulation runs.
    #[error("Simulation requires at least one run")]
    ZeroRuns,
}
