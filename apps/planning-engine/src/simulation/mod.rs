//! Monte Carlo estimation of challenge outcomes.
//!
//! The simulator consumes the same configuration and daily pace target as
//! the deterministic planner, so simulated probabilities and planned
//! schedules always describe the same challenge.

mod monte_carlo;
mod sampler;

pub use monte_carlo::{
    MonteCarloBuilder, MonteCarloResult, MonteCarloSimulator, SimulationConfig, TrialHistogram,
};
pub use sampler::{ThreadRngSource, UniformSource, XorShiftSource};
