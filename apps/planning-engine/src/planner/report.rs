//! One-call aggregation of every deterministic planning component.

use serde::{Deserialize, Serialize};

use crate::config::ChallengeConfig;
use crate::error::PlanError;

use super::amounts::{DerivedAmounts, derive_amounts};
use super::compliance::{ComplianceDay, build_compliance_schedule};
use super::deposit::{DepositPlan, plan_deposit};
use super::outcomes::{OutcomeLeaf, build_outcome_tree};
use super::phase::{PhasePlan, project_phase};
use super::risk::{RiskLimits, derive_risk_limits};
use super::warnings::collect_warnings;

/// The full deterministic plan for one challenge configuration.
///
/// Everything except the Monte Carlo estimate, computed in dependency order
/// from a single configuration record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengePlan {
    /// The configuration the plan was derived from.
    pub config: ChallengeConfig,
    /// Currency amounts behind every other component.
    pub amounts: DerivedAmounts,
    /// Whole-loss budgets.
    pub risk_limits: RiskLimits,
    /// The fixed 4-day minimum-activity schedule.
    pub compliance: Vec<ComplianceDay>,
    /// Projection for phase 1 at the schedule's daily pace.
    pub phase1: PhasePlan,
    /// Projection for phase 2 at the same pace.
    pub phase2: PhasePlan,
    /// Hedge-broker deposit tiers.
    pub deposit: DepositPlan,
    /// The five fixed outcome scenarios.
    pub outcomes: Vec<OutcomeLeaf>,
    /// Advisory warnings in stable rule order.
    pub warnings: Vec<String>,
}

impl ChallengePlan {
    /// Build the full plan from one configuration record.
    ///
    /// Both phase projections take the compliance schedule's row-0 target as
    /// the canonical daily pace.
    ///
    /// # Errors
    ///
    /// Propagates the first [`PlanError`] raised by a component: zero or
    /// negative primary risk, negative hedge risk, zero minimum trading
    /// days, or a non-positive daily pace.
    pub fn build(config: &ChallengeConfig) -> Result<Self, PlanError> {
        let amounts = derive_amounts(config);
        let risk_limits = derive_risk_limits(config, &amounts)?;
        let compliance = build_compliance_schedule(config, &amounts)?;

        // The schedule always has 4 rows
        let daily_target = compliance[0].daily_target;
        let phase1 = project_phase(amounts.phase1_target_amount, daily_target)?;
        let phase2 = project_phase(amounts.phase2_target_amount, daily_target)?;

        let deposit = plan_deposit(config);
        let outcomes = build_outcome_tree(config, &amounts);
        let warnings = collect_warnings(config, &amounts, &risk_limits);

        Ok(Self {
            config: config.clone(),
            amounts,
            risk_limits,
            compliance,
            phase1,
            phase2,
            deposit,
            outcomes,
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_build_canonical_plan() {
        let plan = ChallengePlan::build(&ChallengeConfig::default()).unwrap();

        assert_eq!(plan.amounts.phase1_target_amount, dec!(2000));
        assert_eq!(plan.risk_limits.stop_losses_daily, 5);
        assert_eq!(plan.compliance.len(), 4);
        // Phase plans run at the schedule pace of 500/day
        assert_eq!(plan.phase1.daily_target, dec!(500));
        assert_eq!(plan.phase1.estimated_days, 4);
        assert_eq!(plan.phase2.estimated_days, 3);
        assert_eq!(plan.deposit.base_buffer, dec!(360));
        assert_eq!(plan.outcomes.len(), 5);
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn test_build_propagates_risk_error() {
        let config = ChallengeConfig {
            prop_risk: dec!(0),
            ..ChallengeConfig::default()
        };

        let err = ChallengePlan::build(&config).unwrap_err();
        assert!(matches!(err, PlanError::NonPositiveRisk { leg: "primary", .. }));
    }

    #[test]
    fn test_build_propagates_zero_days_error() {
        let config = ChallengeConfig {
            min_trading_days: 0,
            ..ChallengeConfig::default()
        };

        let err = ChallengePlan::build(&config).unwrap_err();
        assert_eq!(err, PlanError::ZeroTradingDays);
    }

    #[test]
    fn test_extreme_phase_spread_builds_without_truncation() {
        // A microscopic phase-1 target drives a microscopic daily pace, so
        // the phase-2 projection runs to billions of days; the build must
        // saturate the trade doubling instead of overflowing
        let config = ChallengeConfig {
            phase1_target_pct: dec!(0.00000016),
            phase2_target_pct: dec!(100),
            min_daily_profit_pct: dec!(0),
            ..ChallengeConfig::default()
        };

        let plan = ChallengePlan::build(&config).unwrap();

        // Pace 0.00001/day against a 25000 phase-2 target
        assert_eq!(plan.phase2.estimated_days, 2_500_000_000);
        assert_eq!(plan.phase2.trades_two_per_day, u32::MAX);
        assert_eq!(plan.phase1.estimated_days, 4);
    }

    #[test]
    fn test_zero_pace_surfaces_as_daily_target_error() {
        // Zero phase-1 target and zero profit floor leave no positive pace
        let config = ChallengeConfig {
            phase1_target_pct: dec!(0),
            min_daily_profit_pct: dec!(0),
            ..ChallengeConfig::default()
        };

        let err = ChallengePlan::build(&config).unwrap_err();
        assert_eq!(err, PlanError::NonPositiveDailyTarget { value: dec!(0) });
    }

    #[test]
    fn test_plan_serializes_round_trip() {
        let plan = ChallengePlan::build(&ChallengeConfig::default()).unwrap();

        let json = serde_json::to_string(&plan).unwrap();
        let back: ChallengePlan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, plan);
    }
}
