//! Monte Carlo simulation of the two-phase challenge.
//!
//! Each trial walks one full challenge attempt day by day. Both phases share
//! the daily pace target from the compliance schedule, and a day only counts
//! toward phase progress when its profit reaches that target. The hedge
//! balance is a single running account across the whole trial; it is never
//! reset between phases, and a funded trial only pays out when that balance
//! finishes non-negative.

use rand::Rng;
use rayon::prelude::*;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ChallengeConfig;
use crate::error::PlanError;
use crate::planner::constants::{HUNDRED, MAX_PHASE_DAYS, TRADES_PER_DAY_CAP};
use crate::planner::{derive_amounts, shared_daily_target};

use super::sampler::{UniformSource, XorShiftSource};

/// Default number of simulation trials.
const DEFAULT_RUNS: u32 = 10_000;

/// Trial count at which a seeded run is split across the thread pool.
///
/// Below this, pool scheduling costs more than the trials themselves.
const PARALLEL_MIN_RUNS: u32 = 10_000;

/// Configuration for the challenge simulation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of independent challenge trials.
    pub runs: u32,
    /// Seed for reproducible runs (`None` draws one from thread entropy).
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            runs: DEFAULT_RUNS,
            seed: None,
        }
    }
}

/// Trial counts by terminal outcome.
///
/// The first three buckets partition the trials. `payouts` is the subset of
/// `passed_phase2` whose hedge balance finished non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialHistogram {
    /// Trials that never cleared phase 1.
    pub failed_phase1: u32,
    /// Trials that cleared phase 1 but not phase 2.
    pub passed_phase1_only: u32,
    /// Trials that cleared both phases.
    pub passed_phase2: u32,
    /// Funded trials whose hedge balance survived.
    pub payouts: u32,
}

/// Aggregated outcome of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloResult {
    /// Trials simulated.
    pub runs: u32,
    /// Fraction of trials that cleared phase 1.
    pub pass_phase1_probability: Decimal,
    /// Fraction of trials that cleared both phases.
    pub pass_phase2_probability: Decimal,
    /// Fraction of trials that ended funded with a solvent hedge balance.
    pub payout_probability: Decimal,
    /// Outcome counts behind the probabilities.
    pub histogram: TrialHistogram,
    /// Mean days to clear phase 1, among trials that cleared it.
    pub avg_days_phase1: Option<Decimal>,
    /// Mean days to clear phase 2, among trials that cleared it.
    pub avg_days_phase2: Option<Decimal>,
}

/// Terminal state of one simulated challenge attempt.
#[derive(Debug, Clone, Copy)]
enum TrialOutcome {
    FailedPhase1,
    PassedPhase1Only,
    PassedPhase2 { payout: bool },
}

#[derive(Debug, Clone, Copy)]
struct TrialResult {
    outcome: TrialOutcome,
    days_phase1: u32,
    days_phase2: u32,
}

struct PhaseRun {
    passed: bool,
    days: u32,
}

/// Two-phase challenge simulator.
///
/// Every per-trial input is resolved once at construction, so `run` borrows
/// the simulator immutably and the parallel path shares it across threads.
#[derive(Debug, Clone)]
pub struct MonteCarloSimulator {
    config: SimulationConfig,
    phase1_target: Decimal,
    phase2_target: Decimal,
    daily_target: Decimal,
    min_trading_days: u32,
    trades_per_day: u32,
    prop_win: Decimal,
    prop_loss: Decimal,
    broker_win: Decimal,
    broker_loss: Decimal,
    prop_win_rate: f64,
    broker_win_rate: f64,
}

impl MonteCarloSimulator {
    /// Build a simulator from the challenge and simulation configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::ZeroRuns`] for a zero trial count,
    /// [`PlanError::NonPositiveRisk`] and [`PlanError::NegativeRisk`] for
    /// unusable per-trade risk, and [`PlanError::ZeroTradingDays`] when the
    /// daily pace cannot be derived. All are raised here, before any trial
    /// runs.
    pub fn new(config: &ChallengeConfig, simulation: SimulationConfig) -> Result<Self, PlanError> {
        if simulation.runs == 0 {
            return Err(PlanError::ZeroRuns);
        }
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

        let amounts = derive_amounts(config);
        let daily_target = shared_daily_target(config, &amounts)?;

        // Rates arrive as percentages; sampling compares against [0, 1)
        let rate = |pct: Decimal| (pct / HUNDRED).to_f64().unwrap_or(0.0);

        Ok(Self {
            config: simulation,
            phase1_target: amounts.phase1_target_amount,
            phase2_target: amounts.phase2_target_amount,
            daily_target,
            min_trading_days: config.min_trading_days,
            trades_per_day: config.max_trades_per_day.min(TRADES_PER_DAY_CAP),
            prop_win: config.prop_risk * config.prop_reward_ratio,
            prop_loss: config.prop_risk,
            broker_win: config.broker_risk * config.broker_reward_ratio,
            broker_loss: config.broker_risk,
            prop_win_rate: rate(config.prop_win_rate_pct),
            broker_win_rate: rate(config.broker_win_rate_pct),
        })
    }

    /// Run the configured number of trials.
    ///
    /// Each trial draws from its own stream derived from the master seed, so
    /// a seeded run produces the same result whether the trials execute
    /// sequentially or across the thread pool. Without a seed, one is drawn
    /// from thread entropy and logged.
    #[must_use]
    pub fn run(&self) -> MonteCarloResult {
        let master_seed = self
            .config
            .seed
            .unwrap_or_else(|| rand::rng().random::<u64>());

        info!(
            runs = self.config.runs,
            seed = master_seed,
            "Running challenge simulation"
        );

        let trials = if self.config.runs >= PARALLEL_MIN_RUNS {
            self.run_parallel(master_seed)
        } else {
            self.run_sequential(master_seed)
        };

        self.aggregate(&trials)
    }

    /// Run every trial from one injected source, strictly sequentially.
    ///
    /// The draw order is fixed (primary leg then hedge leg, trade by trade,
    /// day by day), so a deterministic source yields a reproducible result.
    #[must_use]
    pub fn run_with_source(&self, source: &mut dyn UniformSource) -> MonteCarloResult {
        info!(
            runs = self.config.runs,
            "Running challenge simulation with injected source"
        );

        let trials: Vec<TrialResult> = (0..self.config.runs)
            .map(|_| self.simulate_trial(source))
            .collect();

        self.aggregate(&trials)
    }

    fn run_sequential(&self, master_seed: u64) -> Vec<TrialResult> {
        (0..self.config.runs)
            .map(|trial| {
                if trial % 1000 == 0 {
                    debug!(trial, "Simulation progress");
                }
                let mut source = XorShiftSource::for_trial(master_seed, u64::from(trial));
                self.simulate_trial(&mut source)
            })
            .collect()
    }

    fn run_parallel(&self, master_seed: u64) -> Vec<TrialResult> {
        (0..self.config.runs)
            .into_par_iter()
            .map(|trial| {
                let mut source = XorShiftSource::for_trial(master_seed, u64::from(trial));
                self.simulate_trial(&mut source)
            })
            .collect()
    }

    /// Walk one full challenge attempt.
    ///
    /// The hedge balance persists across both phases; nothing resets it when
    /// phase 1 completes.
    fn simulate_trial(&self, source: &mut dyn UniformSource) -> TrialResult {
        let mut hedge_net = Decimal::ZERO;

        let phase1 = self.simulate_phase(self.phase1_target, true, &mut hedge_net, source);
        if !phase1.passed {
            return TrialResult {
                outcome: TrialOutcome::FailedPhase1,
                days_phase1: phase1.days,
                days_phase2: 0,
            };
        }

        let phase2 = self.simulate_phase(self.phase2_target, false, &mut hedge_net, source);
        if !phase2.passed {
            return TrialResult {
                outcome: TrialOutcome::PassedPhase1Only,
                days_phase1: phase1.days,
                days_phase2: phase2.days,
            };
        }

        TrialResult {
            outcome: TrialOutcome::PassedPhase2 {
                payout: hedge_net >= Decimal::ZERO,
            },
            days_phase1: phase1.days,
            days_phase2: phase2.days,
        }
    }

    /// Walk one phase, day by day, up to the phase cap.
    ///
    /// A day counts toward phase progress only when its profit reaches the
    /// shared daily target; a short day still consumes a calendar day and
    /// still moves the hedge balance. Phase 1 additionally requires the
    /// minimum trading days, so reaching the money target early does not
    /// shortcut the day count.
    fn simulate_phase(
        &self,
        target: Decimal,
        enforce_min_days: bool,
        hedge_net: &mut Decimal,
        source: &mut dyn UniformSource,
    ) -> PhaseRun {
        let mut profit = Decimal::ZERO;
        let mut days = 0u32;

        while days < MAX_PHASE_DAYS {
            days += 1;

            let mut day_profit = Decimal::ZERO;
            for _ in 0..self.trades_per_day {
                if source.next_uniform() < self.prop_win_rate {
                    day_profit += self.prop_win;
                } else {
                    day_profit -= self.prop_loss;
                }
                if source.next_uniform() < self.broker_win_rate {
                    *hedge_net += self.broker_win;
                } else {
                    *hedge_net -= self.broker_loss;
                }
            }

            if day_profit >= self.daily_target {
                profit += day_profit;
            }

            let min_days_met = !enforce_min_days || days >= self.min_trading_days;
            if profit >= target && min_days_met {
                return PhaseRun { passed: true, days };
            }
        }

        PhaseRun {
            passed: false,
            days: MAX_PHASE_DAYS,
        }
    }

    fn aggregate(&self, trials: &[TrialResult]) -> MonteCarloResult {
        let mut histogram = TrialHistogram::default();
        let mut days1_total = 0u64;
        let mut days2_total = 0u64;

        for trial in trials {
            match trial.outcome {
                TrialOutcome::FailedPhase1 => histogram.failed_phase1 += 1,
                TrialOutcome::PassedPhase1Only => {
                    histogram.passed_phase1_only += 1;
                    days1_total += u64::from(trial.days_phase1);
                }
                TrialOutcome::PassedPhase2 { payout } => {
                    histogram.passed_phase2 += 1;
                    days1_total += u64::from(trial.days_phase1);
                    days2_total += u64::from(trial.days_phase2);
                    if payout {
                        histogram.payouts += 1;
                    }
                }
            }
        }

        let runs = Decimal::from(self.config.runs);
        let passed_phase1 = histogram.passed_phase1_only + histogram.passed_phase2;

        let mean =
            |total: u64, count: u32| (count > 0).then(|| Decimal::from(total) / Decimal::from(count));

        MonteCarloResult {
            runs: self.config.runs,
            pass_phase1_probability: Decimal::from(passed_phase1) / runs,
            pass_phase2_probability: Decimal::from(histogram.passed_phase2) / runs,
            payout_probability: Decimal::from(histogram.payouts) / runs,
            histogram,
            avg_days_phase1: mean(days1_total, passed_phase1),
            avg_days_phase2: mean(days2_total, histogram.passed_phase2),
        }
    }
}

/// Builder for [`MonteCarloSimulator`].
#[derive(Debug, Default)]
pub struct MonteCarloBuilder {
    challenge: ChallengeConfig,
    simulation: SimulationConfig,
}

impl MonteCarloBuilder {
    /// Create a new builder with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the challenge configuration.
    #[must_use]
    pub fn challenge(mut self, config: ChallengeConfig) -> Self {
        self.challenge = config;
        self
    }

    /// Set the number of trials.
    #[must_use]
    pub const fn runs(mut self, runs: u32) -> Self {
        self.simulation.runs = runs;
        self
    }

    /// Set the seed for reproducibility.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.simulation.seed = Some(seed);
        self
    }

    /// Build the simulator.
    ///
    /// # Errors
    ///
    /// Propagates the construction errors of [`MonteCarloSimulator::new`].
    pub fn build(self) -> Result<MonteCarloSimulator, PlanError> {
        MonteCarloSimulator::new(&self.challenge, self.simulation)
    }
}
