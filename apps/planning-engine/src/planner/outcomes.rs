//! Fixed scenario tree for the challenge attempt.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ChallengeConfig;

use super::amounts::DerivedAmounts;
use super::constants::TWO;

/// Hedge winners assumed by the best-case scenario.
const BEST_CASE_HEDGE_WINS: Decimal = Decimal::from_parts(3, 0, 0, false, 0);

/// The five named scenarios of the outcome tree.
///
/// A closed, domain-fixed set: the repetition counts behind each leaf are
/// part of its narrative meaning, so the set is not user-extensible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeScenario {
    /// Both phases passed; the account is funded.
    FullPass,
    /// Phase 1 passed, phase 2 hit max drawdown.
    PartialPass,
    /// Phase 1 hit max drawdown with the hedge stopped out too.
    FullFail,
    /// Phase 1 failed but the hedge recovered the fee; flat overall.
    BreakEven,
    /// Both phases passed and the hedge banked three straight winners.
    BestCase,
}

/// One leaf of the outcome tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeLeaf {
    /// Scenario tag.
    pub scenario: OutcomeScenario,
    /// Short human-readable name.
    pub label: String,
    /// Narrative description of the assumed path.
    pub status: String,
    /// Primary-leg account result (challenge ledger, not cash).
    pub prop_result: Decimal,
    /// Hedge-leg cash result.
    pub broker_result: Decimal,
    /// Combined cash result including the fee.
    pub net_result: Decimal,
}

/// Enumerate the five fixed scenarios with closed-form payouts.
///
/// Assumed hedge repetition counts per leaf: best case banks 3 winners, full
/// pass absorbs one hedge stop per phase, partial pass splits one winner and
/// one stop, full fail absorbs two hedge stops. Break-even is definitional:
/// the hedge recovery is pinned to the challenge fee so the combined result
/// is exactly flat. The fee is refunded only when the account is funded and
/// `fee_refundable` is set; every failed scenario forfeits it.
#[must_use]
pub fn build_outcome_tree(config: &ChallengeConfig, amounts: &DerivedAmounts) -> Vec<OutcomeLeaf> {
    let both_targets = amounts.phase1_target_amount + amounts.phase2_target_amount;
    let hedge_win = config.broker_risk * config.broker_reward_ratio;
    let hedge_loss = config.broker_risk;
    let fee = config.challenge_fee;
    let fee_when_funded = if config.fee_refundable {
        Decimal::ZERO
    } else {
        fee
    };

    let hedge_cost_wording = if config.hedge_is_insurance {
        "the premium for insuring the attempt"
    } else {
        "a direct cost against the net"
    };
    let refund_wording = if config.fee_refundable {
        "; fee refunded"
    } else {
        ""
    };

    let full_pass_hedge = -(TWO * hedge_loss);
    let partial_pass_hedge = hedge_win - hedge_loss;
    let full_fail_hedge = -(TWO * hedge_loss);
    let best_case_hedge = BEST_CASE_HEDGE_WINS * hedge_win;

    vec![
        OutcomeLeaf {
            scenario: OutcomeScenario::FullPass,
            label: "Full pass".to_string(),
            status: format!(
                "Funded: both phases passed; two hedge stops are {hedge_cost_wording}; \
                 keep {}% of funded profits{refund_wording}",
                config.profit_split_pct
            ),
            prop_result: both_targets,
            broker_result: full_pass_hedge,
            net_result: full_pass_hedge - fee_when_funded,
        },
        OutcomeLeaf {
            scenario: OutcomeScenario::PartialPass,
            label: "Partial pass".to_string(),
            status: "Phase 1 cleared, phase 2 hit max drawdown; the hedge split one winner \
                     and one stop; fee forfeited"
                .to_string(),
            prop_result: amounts.phase1_target_amount - amounts.max_drawdown_amount,
            broker_result: partial_pass_hedge,
            net_result: partial_pass_hedge - fee,
        },
        OutcomeLeaf {
            scenario: OutcomeScenario::FullFail,
            label: "Full fail".to_string(),
            status: "Phase 1 hit max drawdown and the hedge was stopped out twice; fee \
                     forfeited"
                .to_string(),
            prop_result: -amounts.max_drawdown_amount,
            broker_result: full_fail_hedge,
            net_result: full_fail_hedge - fee,
        },
        OutcomeLeaf {
            scenario: OutcomeScenario::BreakEven,
            label: "Break-even".to_string(),
            status: "Phase 1 failed but the hedge recovered the challenge fee; attempt \
                     washes out flat"
                .to_string(),
            prop_result: -amounts.max_drawdown_amount,
            broker_result: fee,
            net_result: Decimal::ZERO,
        },
        OutcomeLeaf {
            scenario: OutcomeScenario::BestCase,
            label: "Best case".to_string(),
            status: format!(
                "Funded off three straight hedge winners; keep {}% of funded \
                 profits{refund_wording}",
                config.profit_split_pct
            ),
            prop_result: both_targets,
            broker_result: best_case_hedge,
            net_result: best_case_hedge - fee_when_funded,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::amounts::derive_amounts;
    use rust_decimal_macros::dec;

    fn tree_for(config: &ChallengeConfig) -> Vec<OutcomeLeaf> {
        let amounts = derive_amounts(config);
        build_outcome_tree(config, &amounts)
    }

    #[test]
    fn test_five_scenarios_in_fixed_order() {
        let tree = tree_for(&ChallengeConfig::default());

        let scenarios: Vec<OutcomeScenario> = tree.iter().map(|leaf| leaf.scenario).collect();
        assert_eq!(
            scenarios,
            vec![
                OutcomeScenario::FullPass,
                OutcomeScenario::PartialPass,
                OutcomeScenario::FullFail,
                OutcomeScenario::BreakEven,
                OutcomeScenario::BestCase,
            ]
        );
    }

    #[test]
    fn test_canonical_scenario_payouts() {
        // Defaults: targets 2000 + 1250, max drawdown 2500, hedge win 60,
        // hedge stop 30, fee 250 refundable
        let tree = tree_for(&ChallengeConfig::default());

        let full_pass = &tree[0];
        assert_eq!(full_pass.prop_result, dec!(3250));
        assert_eq!(full_pass.broker_result, dec!(-60));
        assert_eq!(full_pass.net_result, dec!(-60));

        let partial = &tree[1];
        assert_eq!(partial.prop_result, dec!(-500));
        assert_eq!(partial.broker_result, dec!(30));
        assert_eq!(partial.net_result, dec!(-220));

        let full_fail = &tree[2];
        assert_eq!(full_fail.prop_result, dec!(-2500));
        assert_eq!(full_fail.broker_result, dec!(-60));
        assert_eq!(full_fail.net_result, dec!(-310));

        let best = &tree[4];
        assert_eq!(best.prop_result, dec!(3250));
        assert_eq!(best.broker_result, dec!(180));
        assert_eq!(best.net_result, dec!(180));
    }

    #[test]
    fn test_break_even_is_exactly_flat() {
        let tree = tree_for(&ChallengeConfig::default());

        let break_even = &tree[3];
        assert_eq!(break_even.broker_result, dec!(250));
        assert_eq!(break_even.net_result, dec!(0));
    }

    #[test]
    fn test_non_refundable_fee_charges_funded_scenarios() {
        let config = ChallengeConfig {
            fee_refundable: false,
            ..ChallengeConfig::default()
        };
        let tree = tree_for(&config);

        // Funded nets drop by the fee once it is non-refundable
        assert_eq!(tree[0].net_result, dec!(-310));
        assert_eq!(tree[4].net_result, dec!(-70));
        // Failed scenarios already forfeited it
        assert_eq!(tree[2].net_result, dec!(-310));
    }

    #[test]
    fn test_insurance_flag_changes_wording_only() {
        let insured = tree_for(&ChallengeConfig::default());
        let config = ChallengeConfig {
            hedge_is_insurance: false,
            ..ChallengeConfig::default()
        };
        let bare = tree_for(&config);

        assert!(insured[0].status.contains("premium"));
        assert!(!bare[0].status.contains("premium"));
        assert_eq!(insured[0].net_result, bare[0].net_result);
    }
}
