// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Planning Engine - Rust Core Library
//!
//! Deterministic planning engine for prop-firm challenge evaluations.
//!
//! Given one immutable [`ChallengeConfig`] the engine derives everything a
//! trader needs before day one of a two-phase funding challenge:
//!
//! - **Derived amounts**: percentage limits converted into currency amounts
//! - **Risk limits**: loss budgets per day and per streak, from per-trade risk
//! - **Compliance schedule**: a fixed 4-day minimum-activity template
//! - **Phase plans**: estimated days/trades to reach each phase target
//! - **Deposit plan**: hedge-broker deposit sizing with safety tiers
//! - **Outcome tree**: the five named pass/fail scenarios with cash results
//! - **Monte Carlo simulation**: pass and payout probabilities under random
//!   trade outcomes, with an injectable uniform random source
//!
//! Every computation is a pure function of the configuration (plus, for the
//! simulator, a run count and random source). Nothing persists between calls
//! and no component performs I/O.
//!
//! # Data flow
//!
//! ```text
//! ChallengeConfig
//!   └─> DerivedAmounts
//!         ├─> RiskLimits ──────────> warnings
//!         ├─> ComplianceSchedule ──> PhasePlan (row 0 daily target)
//!         ├─> OutcomeTree
//!         └─> MonteCarloSimulator
//! DepositPlan depends on configuration alone.
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Configuration record, file loading, and validation.
pub mod config;

/// Configuration-error taxonomy shared by the planner and simulator.
pub mod error;

/// Display formatting helpers for the CLI report.
pub mod format;

/// Deterministic planning components (amounts, limits, schedules, scenarios).
pub mod planner;

/// Monte Carlo simulation of the two-phase challenge.
pub mod simulation;

pub use config::{ChallengeConfig, ConfigError, load_config, validate_config};
pub use error::PlanError;
pub use planner::{
    ChallengePlan, ComplianceDay, DepositPlan, DerivedAmounts, OutcomeLeaf, OutcomeScenario,
    PhasePlan, RiskLimits, build_compliance_schedule, build_outcome_tree, collect_warnings,
    derive_amounts, derive_risk_limits, plan_deposit, project_phase, shared_daily_target,
};
pub use simulation::{
    MonteCarloBuilder, MonteCarloResult, MonteCarloSimulator, SimulationConfig, ThreadRngSource,
    TrialHistogram, UniformSource, XorShiftSource,
};
