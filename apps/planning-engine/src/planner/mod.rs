//! Deterministic planning components.
//!
//! Every function here is pure: a value computed from the configuration
//! record (plus previously derived values) with no I/O, no randomness, and
//! no retained state. Data flows one direction:
//!
//! ```text
//! ChallengeConfig -> DerivedAmounts -> { RiskLimits, ComplianceSchedule,
//!                                        OutcomeTree }
//! ComplianceSchedule row 0 -> PhasePlan (both phases)
//! RiskLimits + DerivedAmounts -> warnings
//! DepositPlan depends on the configuration alone.
//! ```
//!
//! [`ChallengePlan::build`] runs the whole chain in dependency order.

pub(crate) mod constants;

mod amounts;
mod compliance;
mod deposit;
mod outcomes;
mod phase;
mod report;
mod risk;
mod warnings;

pub use amounts::{DerivedAmounts, derive_amounts};
pub use compliance::{ComplianceDay, build_compliance_schedule, shared_daily_target};
pub use deposit::{DepositPlan, plan_deposit};
pub use outcomes::{OutcomeLeaf, OutcomeScenario, build_outcome_tree};
pub use phase::{PhasePlan, project_phase};
pub use report::ChallengePlan;
pub use risk::{RiskLimits, derive_risk_limits};
pub use warnings::collect_warnings;
