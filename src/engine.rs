use crate::config::Config;
use crate::error::SimError;
use crate::model::{Agent, State};
use crate::mutation::Mutator;
use crate::payoff::PayoffMatrix;
use crate::stats::{OutputSeries, Record};
use rand::prelude::*;
use rand_chacha::ChaCha12Rng;
use rand_distr::weighted::WeightedIndex;

/// Simulation engine.
///
/// Holds the configuration, current state, and random number generator,
/// and provides methods to initialize and run simulations.
pub struct Engine {
    cfg: Config,
    state: State,
    payoff_mat: PayoffMatrix,
    mutator: Mutator,
    rng: ChaCha12Rng,
}

impl Engine {
    /// Create a new `Engine` with the given configuration and a random initial state.
    ///
    /// Every agent plays hawk with probability `prob_hawk`. In the mixed model
    /// every agent also starts with exactly `prob_hawk` as its propensity.
    pub fn generate_initial_condition(cfg: Config, mut rng: ChaCha12Rng) -> Result<Self, SimError> {
        cfg.validate()?;

        let mutator = Mutator::new(&cfg.model)?;
        let payoff_mat = PayoffMatrix::new(cfg.model.value, cfg.model.cost);

        let prob_hawk = cfg.init.prob_hawk;
        let prob_hawk_init = if cfg.model.is_pure { 0.0 } else { prob_hawk };

        let mut agt_vec = Vec::with_capacity(cfg.model.n_agt);
        for _ in 0..cfg.model.n_agt {
            let is_hawk = rng.random_bool(prob_hawk);
            agt_vec.push(Agent::new(is_hawk, prob_hawk_init));
        }

        let state = State {
            generation: 0,
            agt_vec,
        };

        Ok(Self {
            cfg,
            state,
            payoff_mat,
            mutator,
            rng,
        })
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Run all generations and return the recorded series.
    pub fn run(self) -> Result<OutputSeries, SimError> {
        self.run_until(|| false)
    }

    /// Run until `max_time` generations are completed or `interrupted`
    /// returns true.
    ///
    /// `interrupted` is checked after every recorded generation; on
    /// interruption the records collected so far are returned.
    pub fn run_until<F>(mut self, mut interrupted: F) -> Result<OutputSeries, SimError>
    where
        F: FnMut() -> bool,
    {
        let max_time = self.cfg.output.max_time;
        let output_nth_generation = self.cfg.output.output_nth_generation;
        let steps_per_log = (max_time / 10).max(1);

        let mut series = Vec::with_capacity(max_time / output_nth_generation);

        while self.state.generation < max_time {
            self.perform_step()?;

            let generation = self.state.generation;
            if generation % output_nth_generation == 0 {
                let record = Record::from_state(&self.state, self.mutator.is_pure());
                log::debug!("{record:?}");
                series.push(record);

                if interrupted() {
                    log::info!("interrupted after generation {generation}");
                    return Ok(series);
                }
            }

            if generation % steps_per_log == 0 {
                let progress = 100.0 * generation as f64 / max_time as f64;
                log::info!("completed {progress:06.2}%");
            }
        }

        Ok(series)
    }

    /// Advance the population by one generation.
    pub fn perform_step(&mut self) -> Result<(), SimError> {
        // Pair agents at random and collect payoffs.
        self.interact();

        // Parents are selected in proportion to their payoffs.
        let par_dist = parent_dist(&self.state.agt_vec, self.state.generation)?;

        // Draw each offspring's parent, then mutate the offspring.
        let mut agt_vec = Vec::with_capacity(self.state.agt_vec.len());
        for _ in 0..self.state.agt_vec.len() {
            let par = &self.state.agt_vec[par_dist.sample(&mut self.rng)];
            let mut agt = Agent::new(par.is_hawk, par.prob_hawk);
            self.mutator.mutate_and_phenotype(&mut agt, &mut self.rng);
            agt_vec.push(agt);
        }

        self.state.agt_vec = agt_vec;
        self.state.generation += 1;

        Ok(())
    }

    fn interact(&mut self) {
        // Shuffle so that neighbouring agents form random pairs.
        self.state.agt_vec.shuffle(&mut self.rng);

        for pair in self.state.agt_vec.chunks_exact_mut(2) {
            let (payoff_a, payoff_b) =
                self.payoff_mat
                    .resolve(pair[0].strategy(), pair[1].strategy(), &mut self.rng);
            pair[0].payoff = payoff_a;
            pair[1].payoff = payoff_b;
        }
    }
}

/// Categorical distribution over agent indices weighted by payoff.
///
/// # Errors
/// Returns [`SimError::DegenerateWeights`] if no agent has a positive payoff.
pub fn parent_dist(agt_vec: &[Agent], generation: usize) -> Result<WeightedIndex<f64>, SimError> {
    let degenerate = SimError::DegenerateWeights {
        generation,
        n_agt: agt_vec.len(),
    };

    if !agt_vec.iter().any(|agt| agt.payoff > 0.0) {
        return Err(degenerate);
    }
    WeightedIndex::new(agt_vec.iter().map(|agt| agt.payoff)).map_err(|_| degenerate)
}
