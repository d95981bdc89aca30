//! Configuration module for the planning engine.
//!
//! Provides the immutable challenge configuration record, YAML loading with
//! environment variable interpolation, and domain-bound validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! use planning_engine::config::{ChallengeConfig, load_config};
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//!
//! // Access configuration values
//! println!("account size: {}", config.account_size);
//! ```
//!
//! Validation enforces only per-field domain bounds (percentages 0-100,
//! non-negative currency). Cross-field consistency is intentionally not
//! enforced here; contradictory inputs surface as advisory warnings from the
//! planner, never as load failures.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// One immutable challenge configuration record.
///
/// Every planning component is a pure function of this record. Fields left
/// out of the YAML file fall back to a canonical 25k two-phase scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeConfig {
    /// Challenge account size in currency units.
    #[serde(default = "default_account_size")]
    pub account_size: Decimal,
    /// Phase-1 profit target as a percentage of account size.
    #[serde(default = "default_phase1_target_pct")]
    pub phase1_target_pct: Decimal,
    /// Phase-2 profit target as a percentage of account size.
    #[serde(default = "default_phase2_target_pct")]
    pub phase2_target_pct: Decimal,
    /// Maximum loss permitted within one day, percent of account size.
    #[serde(default = "default_daily_drawdown_pct")]
    pub daily_drawdown_pct: Decimal,
    /// Maximum cumulative loss before failure, percent of account size.
    #[serde(default = "default_max_drawdown_pct")]
    pub max_drawdown_pct: Decimal,
    /// Minimum number of trading days required to pass phase 1.
    #[serde(default = "default_min_trading_days")]
    pub min_trading_days: u32,
    /// Smallest day profit that counts as progress, percent of account size.
    #[serde(default = "default_min_daily_profit_pct")]
    pub min_daily_profit_pct: Decimal,
    /// Share of funded-stage profits paid to the trader, percent.
    #[serde(default = "default_profit_split_pct")]
    pub profit_split_pct: Decimal,
    /// Up-front challenge fee in currency units.
    #[serde(default = "default_challenge_fee")]
    pub challenge_fee: Decimal,
    /// Whether the fee is refunded once the account is funded.
    #[serde(default = "default_fee_refundable")]
    pub fee_refundable: bool,
    /// Per-trade risk on the primary (prop) leg, currency units.
    #[serde(default = "default_prop_risk")]
    pub prop_risk: Decimal,
    /// Per-trade risk on the hedge (broker) leg, currency units.
    #[serde(default = "default_broker_risk")]
    pub broker_risk: Decimal,
    /// Reward:risk ratio assumed for primary-leg winners.
    #[serde(default = "default_prop_reward_ratio")]
    pub prop_reward_ratio: Decimal,
    /// Reward:risk ratio assumed for hedge-leg winners.
    #[serde(default = "default_broker_reward_ratio")]
    pub broker_reward_ratio: Decimal,
    /// Most trades the trader intends to place per day.
    #[serde(default = "default_max_trades_per_day")]
    pub max_trades_per_day: u32,
    /// Losing-streak length assumed when sizing the hedge deposit.
    #[serde(default = "default_max_losing_streak")]
    pub max_losing_streak: u32,
    /// Traded instrument label; opaque to the engine.
    #[serde(default = "default_instrument")]
    pub instrument: String,
    /// Hedge position size relative to the primary position.
    #[serde(default = "default_hedge_ratio")]
    pub hedge_ratio: Decimal,
    /// Treat hedge-leg losses as an insurance premium in scenario text.
    #[serde(default = "default_hedge_is_insurance")]
    pub hedge_is_insurance: bool,
    /// Assumed primary-leg win rate, percent.
    #[serde(default = "default_prop_win_rate_pct")]
    pub prop_win_rate_pct: Decimal,
    /// Assumed hedge-leg win rate, percent.
    #[serde(default = "default_broker_win_rate_pct")]
    pub broker_win_rate_pct: Decimal,
}

impl Default for ChallengeConfig {
    fn default() -> Self {
        Self {
            account_size: default_account_size(),
            phase1_target_pct: default_phase1_target_pct(),
            phase2_target_pct: default_phase2_target_pct(),
            daily_drawdown_pct: default_daily_drawdown_pct(),
            max_drawdown_pct: default_max_drawdown_pct(),
            min_trading_days: default_min_trading_days(),
            min_daily_profit_pct: default_min_daily_profit_pct(),
            profit_split_pct: default_profit_split_pct(),
            challenge_fee: default_challenge_fee(),
            fee_refundable: default_fee_refundable(),
            prop_risk: default_prop_risk(),
            broker_risk: default_broker_risk(),
            prop_reward_ratio: default_prop_reward_ratio(),
            broker_reward_ratio: default_broker_reward_ratio(),
            max_trades_per_day: default_max_trades_per_day(),
            max_losing_streak: default_max_losing_streak(),
            instrument: default_instrument(),
            hedge_ratio: default_hedge_ratio(),
            hedge_is_insurance: default_hedge_is_insurance(),
            prop_win_rate_pct: default_prop_win_rate_pct(),
            broker_win_rate_pct: default_broker_win_rate_pct(),
        }
    }
}

const fn default_account_size() -> Decimal {
    Decimal::from_parts(25_000, 0, 0, false, 0)
}

const fn default_phase1_target_pct() -> Decimal {
    Decimal::from_parts(8, 0, 0, false, 0)
}

const fn default_phase2_target_pct() -> Decimal {
    Decimal::from_parts(5, 0, 0, false, 0)
}

const fn default_daily_drawdown_pct() -> Decimal {
    Decimal::from_parts(4, 0, 0, false, 0)
}

const fn default_max_drawdown_pct() -> Decimal {
    Decimal::from_parts(10, 0, 0, false, 0)
}

const fn default_min_trading_days() -> u32 {
    4
}

const fn default_min_daily_profit_pct() -> Decimal {
    Decimal::from_parts(5, 0, 0, false, 1) // 0.5
}

const fn default_profit_split_pct() -> Decimal {
    Decimal::from_parts(80, 0, 0, false, 0)
}

const fn default_challenge_fee() -> Decimal {
    Decimal::from_parts(250, 0, 0, false, 0)
}

const fn default_fee_refundable() -> bool {
    true
}

const fn default_prop_risk() -> Decimal {
    Decimal::from_parts(150, 0, 0, false, 0)
}

const fn default_broker_risk() -> Decimal {
    Decimal::from_parts(30, 0, 0, false, 0)
}

const fn default_prop_reward_ratio() -> Decimal {
    Decimal::TWO
}

const fn default_broker_reward_ratio() -> Decimal {
    Decimal::TWO
}

const fn default_max_trades_per_day() -> u32 {
    2
}

const fn default_max_losing_streak() -> u32 {
    6
}

fn default_instrument() -> String {
    "XAUUSD".to_string()
}

const fn default_hedge_ratio() -> Decimal {
    Decimal::ONE
}

const fn default_hedge_is_insurance() -> bool {
    true
}

const fn default_prop_win_rate_pct() -> Decimal {
    Decimal::from_parts(55, 0, 0, false, 0)
}

const fn default_broker_win_rate_pct() -> Decimal {
    Decimal::from_parts(45, 0, 0, false, 0)
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<ChallengeConfig, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    // Read the config file
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    // Interpolate environment variables
    let interpolated = interpolate_env_vars(&contents);

    // Parse YAML
    let config: ChallengeConfig = serde_yaml_bw::from_str(&interpolated)?;

    // Validate configuration
    validate_config(&config)?;

    Ok(config)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<ChallengeConfig, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: ChallengeConfig = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex pattern is a literal; always valid
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let mut result = input.to_string();

    // Match ${VAR} or ${VAR:-default} patterns
    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    for cap in re.captures_iter(input) {
        let Some(full_match) = cap.get(0) else {
            continue;
        };
        let Some(var_match) = cap.get(1) else {
            continue;
        };
        let full_match = full_match.as_str();
        let var_name = var_match.as_str();
        let default_value = cap.get(2).map(|m| m.as_str());

        let value = match std::env::var(var_name) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.map_or_else(String::new, str::to_string),
        };

        result = result.replace(full_match, &value);
    }

    result
}

/// Validate configuration values against their domain bounds.
///
/// # Errors
///
/// Returns a `ConfigError::ValidationError` naming the offending field when a
/// percentage falls outside 0-100 or a currency/ratio field is negative.
pub fn validate_config(config: &ChallengeConfig) -> Result<(), ConfigError> {
    // Account size scales every derived amount
    if config.account_size <= Decimal::ZERO {
        return Err(ConfigError::ValidationError(
            "account_size must be positive".to_string(),
        ));
    }

    // Percentage fields live on a 0-100 scale
    let percentages = [
        ("phase1_target_pct", config.phase1_target_pct),
        ("phase2_target_pct", config.phase2_target_pct),
        ("daily_drawdown_pct", config.daily_drawdown_pct),
        ("max_drawdown_pct", config.max_drawdown_pct),
        ("min_daily_profit_pct", config.min_daily_profit_pct),
        ("profit_split_pct", config.profit_split_pct),
        ("prop_win_rate_pct", config.prop_win_rate_pct),
        ("broker_win_rate_pct", config.broker_win_rate_pct),
    ];
    for (name, value) in percentages {
        if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
            return Err(ConfigError::ValidationError(format!(
                "{name} must be between 0 and 100"
            )));
        }
    }

    // Currency and ratio fields are non-negative; zero is a legal (if
    // contradictory) value surfaced later by planner warnings or errors
    let non_negative = [
        ("challenge_fee", config.challenge_fee),
        ("prop_risk", config.prop_risk),
        ("broker_risk", config.broker_risk),
        ("prop_reward_ratio", config.prop_reward_ratio),
        ("broker_reward_ratio", config.broker_reward_ratio),
        ("hedge_ratio", config.hedge_ratio),
    ];
    for (name, value) in non_negative {
        if value < Decimal::ZERO {
            return Err(ConfigError::ValidationError(format!(
                "{name} must not be negative"
            )));
        }
    }

    Ok(())
}
