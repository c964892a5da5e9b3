use serde::{Deserialize, Serialize};

/// Strategy played in a single contest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    Dove,
    Hawk,
}

impl Strategy {
    /// Row or column of the strategy in the payoff matrix.
    pub fn idx(self) -> usize {
        match self {
            Strategy::Dove => 0,
            Strategy::Hawk => 1,
        }
    }
}

impl From<bool> for Strategy {
    fn from(is_hawk: bool) -> Self {
        if is_hawk { Strategy::Hawk } else { Strategy::Dove }
    }
}

/// Agent of the simulation.
///
/// Each agent has a realized phenotype (`is_hawk`), the payoff it collected
/// in the current generation and a heritable propensity to play hawk
/// (`prob_hawk`, meaningful in the mixed model only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub is_hawk: bool,
    pub payoff: f64,
    pub prob_hawk: f64,
}

impl Agent {
    /// Create a new agent with no payoff collected yet.
    pub fn new(is_hawk: bool, prob_hawk: f64) -> Self {
        Self {
            is_hawk,
            payoff: 0.0,
            prob_hawk,
        }
    }

    /// Strategy the agent plays this generation.
    pub fn strategy(&self) -> Strategy {
        Strategy::from(self.is_hawk)
    }
}

/// State of the simulation at a given generation.
///
/// Holds one full generation of agents. Its size is fixed for the lifetime
/// of a simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct State {
    /// Generations completed so far.
    pub generation: usize,

    /// Vector of agents of the current generation.
    pub agt_vec: Vec<Agent>,
}

impl State {
    /// Number of agents currently playing hawk.
    pub fn n_hawk(&self) -> usize {
        self.agt_vec.iter().filter(|agt| agt.is_hawk).count()
    }
}
