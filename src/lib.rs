//! Stochastic simulation of the hawk-dove game in a finite haploid population.
//!
//! Each generation agents are paired at random, collect payoffs from their
//! contests, and reproduce in proportion to those payoffs. Offspring mutate
//! either by switching strategy (pure model) or by perturbing a heritable
//! propensity to play hawk (mixed model).

pub mod config;
pub mod engine;
pub mod error;
pub mod manager;
pub mod model;
pub mod mutation;
pub mod payoff;
pub mod stats;

use crate::config::Config;
use crate::engine::Engine;
use crate::error::SimError;
use crate::stats::OutputTable;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// Run a single replicate and return its records as a table.
///
/// # Errors
/// Fails if the configuration is invalid or if a generation ends with no
/// positive payoff.
pub fn run_simulation(cfg: Config, seed: u64) -> Result<OutputTable, SimError> {
    let rng = ChaCha12Rng::seed_from_u64(seed);
    let series = Engine::generate_initial_condition(cfg, rng)?.run()?;
    Ok(OutputTable::from(series.as_slice()))
}
