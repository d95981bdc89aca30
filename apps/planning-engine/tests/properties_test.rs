//! Property Tests for the Planner Arithmetic
//!
//! Randomized checks of the exact-arithmetic identities behind the plan:
//! floor-division budgets, ceiling-division projections, tier ordering, and
//! the partition invariants of the simulator histogram.

#![allow(clippy::unwrap_used)]

use planning_engine::{
    ChallengeConfig, MonteCarloSimulator, SimulationConfig, derive_amounts, derive_risk_limits,
    plan_deposit, project_phase, shared_daily_target,
};
use proptest::prelude::{any, prop_assert, prop_assert_eq, proptest};
use rust_decimal::Decimal;

/// Build an exact-integer configuration for property checks.
fn config_from(
    account: u32,
    prop_risk: u32,
    broker_risk: u32,
    min_days: u32,
    streak: u32,
) -> ChallengeConfig {
    ChallengeConfig {
        account_size: Decimal::from(account),
        prop_risk: Decimal::from(prop_risk),
        broker_risk: Decimal::from(broker_risk),
        min_trading_days: min_days,
        max_losing_streak: streak,
        ..ChallengeConfig::default()
    }
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(64))]

    #[test]
    fn prop_amounts_scale_exactly(account in 1_000u32..500_000) {
        let config = config_from(account, 150, 30, 4, 6);
        let amounts = derive_amounts(&config);

        let account = Decimal::from(account);
        prop_assert_eq!(
            amounts.daily_drawdown_amount,
            account * Decimal::from(4u32) / Decimal::ONE_HUNDRED
        );
        prop_assert_eq!(
            amounts.phase1_target_amount,
            account * Decimal::from(8u32) / Decimal::ONE_HUNDRED
        );
    }

    #[test]
    fn prop_loss_budgets_are_true_floors(
        prop_risk in 1u32..3_000,
        broker_risk in 0u32..3_000,
    ) {
        let config = config_from(25_000, prop_risk, broker_risk, 4, 6);
        let amounts = derive_amounts(&config);
        let limits = derive_risk_limits(&config, &amounts).unwrap();

        // floor(B / c) consumes at most B, and one more loss would exceed it
        let combined = Decimal::from(prop_risk + broker_risk);
        let consumed = Decimal::from(limits.max_consecutive_losses) * combined;
        prop_assert!(consumed <= amounts.max_drawdown_amount);
        prop_assert!(consumed + combined > amounts.max_drawdown_amount);

        prop_assert!(limits.max_losses_daily_total <= limits.max_losses_daily_prop);
        prop_assert!(limits.stop_losses_daily >= 1);
    }

    #[test]
    fn prop_daily_target_covers_both_constraints(
        account in 10_000u32..200_000,
        min_days in 1u32..40,
    ) {
        let config = config_from(account, 150, 30, min_days, 6);
        let amounts = derive_amounts(&config);
        let target = shared_daily_target(&config, &amounts).unwrap();

        let pace = amounts.phase1_target_amount / Decimal::from(min_days);
        prop_assert!(target >= amounts.min_daily_profit_amount);
        prop_assert!(target >= pace);
        prop_assert!(target == pace || target == amounts.min_daily_profit_amount);
    }

    #[test]
    fn prop_phase_days_bracket_target(
        total in 1u32..100_000,
        daily in 1u32..5_000,
    ) {
        let plan = project_phase(Decimal::from(total), Decimal::from(daily)).unwrap();

        let daily = Decimal::from(daily);
        let days = Decimal::from(plan.estimated_days);
        prop_assert!(days * daily >= Decimal::from(total));
        prop_assert!((days - Decimal::ONE) * daily < Decimal::from(total));
        prop_assert_eq!(plan.trades_two_per_day, plan.estimated_days * 2);
    }

    #[test]
    fn prop_deposit_tiers_stay_ordered(
        broker_risk in 0u32..2_000,
        streak in 0u32..20,
    ) {
        let config = config_from(25_000, 150, broker_risk, 4, streak);
        let plan = plan_deposit(&config);

        prop_assert!(plan.minimum <= plan.recommended);
        prop_assert!(plan.recommended <= plan.conservative);
        // The spread cushion is the floor of every tier
        prop_assert!(plan.minimum >= Decimal::ONE_HUNDRED);
    }
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(16))]

    #[test]
    fn prop_histogram_partitions_every_run(
        seed in any::<u64>(),
        runs in 1u32..200,
        prop_rate in 0u32..=100,
        broker_rate in 0u32..=100,
    ) {
        let config = ChallengeConfig {
            prop_win_rate_pct: Decimal::from(prop_rate),
            broker_win_rate_pct: Decimal::from(broker_rate),
            ..ChallengeConfig::default()
        };
        let result = MonteCarloSimulator::new(
            &config,
            SimulationConfig { runs, seed: Some(seed) },
        )
        .unwrap()
        .run();

        let histogram = result.histogram;
        prop_assert_eq!(
            histogram.failed_phase1 + histogram.passed_phase1_only + histogram.passed_phase2,
            runs
        );
        prop_assert!(histogram.payouts <= histogram.passed_phase2);
        prop_assert!(result.payout_probability >= Decimal::ZERO);
        prop_assert!(result.payout_probability <= Decimal::ONE);
        prop_assert!(result.pass_phase2_probability <= result.pass_phase1_probability);
    }
}
