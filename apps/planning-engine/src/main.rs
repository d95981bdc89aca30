//! Planning Engine Binary
//!
//! Computes the full challenge plan and simulated outcome probabilities for
//! one challenge configuration.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin planning-engine -- [config.yaml] [--json]
//! ```
//!
//! # Environment Variables
//!
//! ## Optional
//! - `PLANNER_CONFIG_PATH`: Challenge configuration file (default: config.yaml)
//! - `PLANNER_RUNS`: Simulation trial count (default: 10000)
//! - `PLANNER_SEED`: Simulation seed for reproducible output (default: entropy)
//! - `RUST_LOG`: Log level (default: info)

use anyhow::Context;
use planning_engine::format::{format_currency, format_days, format_pct};
use planning_engine::{
    ChallengeConfig, ChallengePlan, MonteCarloResult, MonteCarloSimulator, SimulationConfig,
    load_config,
};

/// Config file consulted when neither an argument nor an override names one.
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Parsed configuration from arguments and environment variables.
struct CliConfig {
    config_path: Option<String>,
    runs: Option<u32>,
    seed: Option<u64>,
    json: bool,
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting challenge planner");

    let cli = parse_cli();
    let config = resolve_config(&cli)?;
    log_config(&config);

    let plan = ChallengePlan::build(&config)?;
    for warning in &plan.warnings {
        tracing::warn!(%warning, "Plan advisory");
    }

    let mut simulation = SimulationConfig::default();
    if let Some(runs) = cli.runs {
        simulation.runs = runs;
    }
    simulation.seed = cli.seed;

    let simulator = MonteCarloSimulator::new(&config, simulation)?;
    let result = simulator.run();

    if cli.json {
        let report = serde_json::json!({
            "plan": plan,
            "simulation": result,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_plan(&plan);
        print_simulation(&result);
    }

    tracing::info!("Challenge planner finished");
    Ok(())
}

/// Initialize the tracing subscriber with environment filter.
///
/// Uses static directive strings that are compile-time constants guaranteed to parse.
#[allow(clippy::expect_used)]
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                "planning_engine=info"
                    .parse()
                    .expect("static directive 'planning_engine=info' is valid"),
            ),
        )
        .init();
}

/// Parse arguments and environment variables.
///
/// The first non-flag argument names the configuration file and wins over
/// `PLANNER_CONFIG_PATH`.
fn parse_cli() -> CliConfig {
    let mut config_path = std::env::var("PLANNER_CONFIG_PATH").ok();
    let mut json = false;

    for arg in std::env::args().skip(1) {
        if arg == "--json" {
            json = true;
        } else {
            config_path = Some(arg);
        }
    }

    let runs = std::env::var("PLANNER_RUNS")
        .ok()
        .and_then(|v| v.parse().ok());
    let seed = std::env::var("PLANNER_SEED")
        .ok()
        .and_then(|v| v.parse().ok());

    CliConfig {
        config_path,
        runs,
        seed,
        json,
    }
}

/// Load the challenge configuration.
///
/// An explicitly named file must load; the implicit default path may be
/// absent, in which case the built-in scenario is used.
fn resolve_config(cli: &CliConfig) -> anyhow::Result<ChallengeConfig> {
    if let Some(path) = &cli.config_path {
        return load_config(Some(path))
            .with_context(|| format!("failed to load configuration from {path}"));
    }

    if std::path::Path::new(DEFAULT_CONFIG_PATH).exists() {
        return load_config(None)
            .with_context(|| format!("failed to load configuration from {DEFAULT_CONFIG_PATH}"));
    }

    tracing::warn!("No configuration file found, using built-in defaults");
    Ok(ChallengeConfig::default())
}

/// Log the loaded configuration.
fn log_config(config: &ChallengeConfig) {
    tracing::info!(
        account_size = %config.account_size,
        instrument = %config.instrument,
        prop_risk = %config.prop_risk,
        broker_risk = %config.broker_risk,
        min_trading_days = config.min_trading_days,
        "Configuration loaded"
    );
}

/// Print the deterministic plan sections.
fn print_plan(plan: &ChallengePlan) {
    println!("=== Challenge Plan ===");
    println!(
        "Account {} on {}, fee {}{}",
        format_currency(plan.config.account_size),
        plan.config.instrument,
        format_currency(plan.config.challenge_fee),
        if plan.config.fee_refundable {
            " (refundable)"
        } else {
            ""
        },
    );

    println!();
    println!("Targets and buffers:");
    println!(
        "  Phase 1 target:     {}",
        format_currency(plan.amounts.phase1_target_amount)
    );
    println!(
        "  Phase 2 target:     {}",
        format_currency(plan.amounts.phase2_target_amount)
    );
    println!(
        "  Daily drawdown:     {}",
        format_currency(plan.amounts.daily_drawdown_amount)
    );
    println!(
        "  Max drawdown:       {}",
        format_currency(plan.amounts.max_drawdown_amount)
    );
    println!(
        "  Min daily profit:   {}",
        format_currency(plan.amounts.min_daily_profit_amount)
    );

    println!();
    println!("Risk limits:");
    println!(
        "  Daily losses (primary only / combined): {} / {}",
        plan.risk_limits.max_losses_daily_prop, plan.risk_limits.max_losses_daily_total
    );
    println!(
        "  Consecutive combined losses to failure: {}",
        plan.risk_limits.max_consecutive_losses
    );
    println!(
        "  Daily stop after {} losses or -{}% intraday",
        plan.risk_limits.stop_losses_daily, plan.risk_limits.stop_drawdown_pct
    );

    println!();
    println!("Compliance schedule:");
    for day in &plan.compliance {
        println!(
            "  Day {}: target {} in at most {} trades (TP/SL {} / {})",
            day.day,
            format_currency(day.daily_target),
            day.recommended_trades,
            format_currency(day.prop_take_profit),
            format_currency(day.prop_stop_loss),
        );
    }

    println!();
    for (name, phase) in [("Phase 1", &plan.phase1), ("Phase 2", &plan.phase2)] {
        println!(
            "{name}: {} at {}/day, about {} trading days ({} trades at 2/day)",
            format_currency(phase.total_target),
            format_currency(phase.daily_target),
            phase.estimated_days,
            phase.trades_two_per_day,
        );
    }

    println!();
    println!("Hedge deposit tiers:");
    println!(
        "  Base buffer {} -> minimum {}, recommended {}, conservative {}",
        format_currency(plan.deposit.base_buffer),
        format_currency(plan.deposit.minimum),
        format_currency(plan.deposit.recommended),
        format_currency(plan.deposit.conservative),
    );

    println!();
    println!("Outcome scenarios:");
    for leaf in &plan.outcomes {
        println!(
            "  {:<28} net {:>12}  ({})",
            leaf.label,
            format_currency(leaf.net_result),
            leaf.status
        );
    }

    println!();
    if plan.warnings.is_empty() {
        println!("Warnings: none");
    } else {
        println!("Warnings:");
        for warning in &plan.warnings {
            println!("  - {warning}");
        }
    }
}

/// Print the simulated outcome probabilities.
fn print_simulation(result: &MonteCarloResult) {
    println!();
    println!("Simulation ({} runs):", result.runs);
    println!(
        "  Pass phase 1:  {}",
        format_pct(result.pass_phase1_probability)
    );
    println!(
        "  Pass phase 2:  {}",
        format_pct(result.pass_phase2_probability)
    );
    println!(
        "  Payout:        {}",
        format_pct(result.payout_probability)
    );
    println!(
        "  Avg days to clear phase 1: {}",
        format_days(result.avg_days_phase1)
    );
    println!(
        "  Avg days to clear phase 2: {}",
        format_days(result.avg_days_phase2)
    );
    println!(
        "  Outcomes: {} failed phase 1, {} stalled in phase 2, {} funded, {} paid out",
        result.histogram.failed_phase1,
        result.histogram.passed_phase1_only,
        result.histogram.passed_phase2,
        result.histogram.payouts,
    );
}
