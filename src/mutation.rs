use crate::config::ModelConfig;
use crate::error::ConfigError;
use crate::model::Agent;
use rand::Rng;
use rand_distr::{Bernoulli, Distribution, Normal};

/// Mutation operator, selected once per simulation.
#[derive(Debug, Clone)]
pub enum Mutator {
    /// With probability `prob_mut` the offspring switches strategy.
    Pure { mut_dist: Bernoulli },

    /// With probability `prob_mut` the offspring's propensity receives
    /// Gaussian noise (clamped to `[0, 1]`); its phenotype is then redrawn
    /// from the propensity.
    Mixed {
        mut_dist: Bernoulli,
        noise_dist: Normal<f64>,
    },
}

impl Mutator {
    pub fn new(model: &ModelConfig) -> Result<Self, ConfigError> {
        let mut_dist = Bernoulli::new(model.prob_mut).map_err(|_| ConfigError::OutOfRange {
            name: "prob_mut",
            value: model.prob_mut,
            range: "0.0..=1.0".to_string(),
        })?;
        if model.is_pure {
            Ok(Self::Pure { mut_dist })
        } else {
            let noise_dist =
                Normal::new(0.0, model.std_dev_mut).map_err(|_| ConfigError::OutOfRange {
                    name: "std_dev_mut",
                    value: model.std_dev_mut,
                    range: "0.0..inf".to_string(),
                })?;
            Ok(Self::Mixed {
                mut_dist,
                noise_dist,
            })
        }
    }

    pub fn is_pure(&self) -> bool {
        matches!(self, Self::Pure { .. })
    }

    /// Mutate an offspring copied from its parent and set its phenotype.
    pub fn mutate_and_phenotype<R: Rng + ?Sized>(&self, agt: &mut Agent, rng: &mut R) {
        match self {
            Self::Pure { mut_dist } => {
                if mut_dist.sample(rng) {
                    agt.is_hawk = !agt.is_hawk;
                }
            }
            Self::Mixed {
                mut_dist,
                noise_dist,
            } => {
                if mut_dist.sample(rng) {
                    let prob_hawk = agt.prob_hawk + noise_dist.sample(rng);
                    agt.prob_hawk = prob_hawk.clamp(0.0, 1.0);
                }
                agt.is_hawk = rng.random_bool(agt.prob_hawk);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    fn model(is_pure: bool, prob_mut: f64, std_dev_mut: f64) -> ModelConfig {
        Config::new(10, 1.0, 0.5, prob_mut, 10, 0.5, 1, is_pure, std_dev_mut).model
    }

    #[test]
    fn pure_flips_with_certain_mutation() {
        let mutator = Mutator::new(&model(true, 1.0, 0.0)).unwrap();
        assert!(mutator.is_pure());
        let mut rng = ChaCha12Rng::seed_from_u64(0);
        let mut agt = Agent::new(true, 0.0);
        mutator.mutate_and_phenotype(&mut agt, &mut rng);
        assert!(!agt.is_hawk);
        mutator.mutate_and_phenotype(&mut agt, &mut rng);
        assert!(agt.is_hawk);
    }

    #[test]
    fn pure_never_flips_without_mutation() {
        let mutator = Mutator::new(&model(true, 0.0, 0.0)).unwrap();
        let mut rng = ChaCha12Rng::seed_from_u64(1);
        for is_hawk in [true, false] {
            let mut agt = Agent::new(is_hawk, 0.0);
            for _ in 0..1000 {
                mutator.mutate_and_phenotype(&mut agt, &mut rng);
                assert_eq!(agt.is_hawk, is_hawk);
            }
        }
    }

    #[test]
    fn mixed_propensity_stays_in_unit_interval() {
        let mutator = Mutator::new(&model(false, 1.0, 5.0)).unwrap();
        assert!(!mutator.is_pure());
        let mut rng = ChaCha12Rng::seed_from_u64(2);
        let mut agt = Agent::new(false, 0.5);
        let mut hit_bound = false;
        for _ in 0..10_000 {
            mutator.mutate_and_phenotype(&mut agt, &mut rng);
            assert!((0.0..=1.0).contains(&agt.prob_hawk));
            hit_bound |= agt.prob_hawk == 0.0 || agt.prob_hawk == 1.0;
        }
        assert!(hit_bound);
    }

    #[test]
    fn mixed_phenotype_follows_propensity() {
        let mutator = Mutator::new(&model(false, 0.0, 0.1)).unwrap();
        let mut rng = ChaCha12Rng::seed_from_u64(3);

        let mut agt = Agent::new(false, 1.0);
        mutator.mutate_and_phenotype(&mut agt, &mut rng);
        assert!(agt.is_hawk);
        assert_eq!(agt.prob_hawk, 1.0);

        let mut agt = Agent::new(true, 0.0);
        mutator.mutate_and_phenotype(&mut agt, &mut rng);
        assert!(!agt.is_hawk);
        assert_eq!(agt.prob_hawk, 0.0);
    }
}
