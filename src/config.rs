use crate::error::ConfigError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path};

/// Simulation configuration parameters.
///
/// Loaded from a TOML file and validated before use.
/// See [`Config::from_file`] for loading.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Seed of the random number generator (fresh entropy if absent).
    pub seed: Option<u64>,

    /// Model parameters.
    pub model: ModelConfig,
    /// Initial condition parameters.
    pub init: InitConfig,
    /// Output parameters.
    pub output: OutputConfig,
}

/// Parameters of the game and of inheritance.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Number of agents (must be positive and even).
    pub n_agt: usize,

    /// Value of winning a contest.
    pub value: f64,
    /// Cost of losing an escalated contest.
    pub cost: f64,

    /// Whether agents play pure strategies (otherwise mixed).
    #[serde(default = "default_is_pure")]
    pub is_pure: bool,

    /// Probability that an offspring mutates.
    pub prob_mut: f64,
    /// Standard deviation of mutation noise (mixed model only).
    #[serde(default)]
    pub std_dev_mut: f64,
}

/// Parameters of the initial population.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct InitConfig {
    /// Initial probability of playing hawk.
    pub prob_hawk: f64,
}

/// Parameters of the run length and of recording.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Number of generations to simulate.
    pub max_time: usize,
    /// Number of generations between records.
    pub output_nth_generation: usize,
}

fn default_is_pure() -> bool {
    true
}

impl Config {
    /// Create a pure-strategy configuration.
    pub fn pure(
        n_agt: usize,
        value: f64,
        cost: f64,
        prob_mut: f64,
        max_time: usize,
        prob_hawk: f64,
        output_nth_generation: usize,
    ) -> Self {
        Self::new(
            n_agt,
            value,
            cost,
            prob_mut,
            max_time,
            prob_hawk,
            output_nth_generation,
            true,
            0.0,
        )
    }

    /// Create a configuration with every parameter given explicitly.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        n_agt: usize,
        value: f64,
        cost: f64,
        prob_mut: f64,
        max_time: usize,
        prob_hawk: f64,
        output_nth_generation: usize,
        is_pure: bool,
        std_dev_mut: f64,
    ) -> Self {
        Self {
            seed: None,
            model: ModelConfig {
                n_agt,
                value,
                cost,
                is_pure,
                prob_mut,
                std_dev_mut,
            },
            init: InitConfig { prob_hawk },
            output: OutputConfig {
                max_time,
                output_nth_generation,
            },
        }
    }

    /// Load a [`Config`] from a file.
    ///
    /// The file must be TOML-encoded and contain a serialized [`Config`].
    /// Performs validation on all parameters before returning.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        let config: Config = toml::from_str(&contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    /// Check every parameter, the output interval first.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let output_nth_generation = self.output.output_nth_generation;
        let max_time = self.output.max_time;
        if output_nth_generation < 1 {
            return Err(ConfigError::OutputIntervalTooSmall {
                output_nth_generation,
            });
        }
        if output_nth_generation >= max_time {
            return Err(ConfigError::OutputIntervalTooLarge {
                output_nth_generation,
                max_time,
            });
        }

        let n_agt = self.model.n_agt;
        if n_agt == 0 || n_agt % 2 != 0 {
            return Err(ConfigError::PopulationSize { n_agt });
        }

        check_num("value", self.model.value, 0.0..f64::INFINITY)?;
        check_num("cost", self.model.cost, 0.0..f64::INFINITY)?;

        // Payoffs reach `cost + value` and are summed into sampling weights.
        let (value, cost) = (self.model.value, self.model.cost);
        if !(value + cost).is_finite() || !(n_agt as f64 * (value + cost)).is_finite() {
            return Err(ConfigError::PayoffOverflow { n_agt, value, cost });
        }

        check_num("prob_mut", self.model.prob_mut, 0.0..=1.0)?;
        check_num("std_dev_mut", self.model.std_dev_mut, 0.0..f64::INFINITY)?;
        check_num("prob_hawk", self.init.prob_hawk, 0.0..=1.0)?;

        Ok(())
    }
}

fn check_num<R>(name: &'static str, num: f64, range: R) -> Result<(), ConfigError>
where
    R: RangeBounds<f64> + Debug,
{
    // NaN is rejected by every range.
    if !range.contains(&num) {
        return Err(ConfigError::OutOfRange {
            name,
            value: num,
            range: format!("{range:?}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Config {
        Config::pure(10, 1.0, 0.5, 0.01, 10, 0.5, 1)
    }

    #[test]
    fn accepts_minimal_interval() {
        assert_eq!(base().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_interval() {
        let mut cfg = base();
        cfg.output.output_nth_generation = 0;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::OutputIntervalTooSmall {
                output_nth_generation: 0
            })
        );
    }

    #[test]
    fn rejects_interval_equal_to_max_time() {
        let mut cfg = base();
        cfg.output.output_nth_generation = 10;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::OutputIntervalTooLarge {
                output_nth_generation: 10,
                max_time: 10
            })
        );
    }

    #[test]
    fn rejects_odd_and_empty_populations() {
        for n_agt in [0, 1, 7] {
            let mut cfg = base();
            cfg.model.n_agt = n_agt;
            assert_eq!(cfg.validate(), Err(ConfigError::PopulationSize { n_agt }));
        }
    }

    #[test]
    fn rejects_out_of_range_probabilities() {
        let mut cfg = base();
        cfg.model.prob_mut = 1.5;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::OutOfRange {
                name: "prob_mut",
                ..
            })
        ));

        let mut cfg = base();
        cfg.init.prob_hawk = f64::NAN;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::OutOfRange {
                name: "prob_hawk",
                ..
            })
        ));
    }

    #[test]
    fn rejects_payoffs_too_large_to_sum() {
        let cfg = Config::pure(10, 1e308, 1e308, 0.0, 5, 0.5, 1);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::PayoffOverflow {
                n_agt: 10,
                value: 1e308,
                cost: 1e308
            })
        );

        // Each payoff is finite but their total is not.
        let cfg = Config::pure(10, 1e308, 0.0, 0.0, 5, 0.5, 1);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::PayoffOverflow { .. })
        ));
    }

    #[test]
    fn parses_pure_shape_with_defaults() {
        let cfg: Config = toml::from_str(
            r#"
[model]
n_agt = 10
value = 1.0
cost = 0.5
prob_mut = 0.01

[init]
prob_hawk = 0.5

[output]
max_time = 10
output_nth_generation = 1
"#,
        )
        .unwrap();
        assert_eq!(cfg, base());
    }

    #[test]
    fn parses_full_shape() {
        let cfg: Config = toml::from_str(
            r#"
seed = 7

[model]
n_agt = 1000
value = 1.0
cost = 2.0
is_pure = false
prob_mut = 0.01
std_dev_mut = 0.05

[init]
prob_hawk = 0.05

[output]
max_time = 10000
output_nth_generation = 10
"#,
        )
        .unwrap();
        assert_eq!(cfg.seed, Some(7));
        assert!(!cfg.model.is_pure);
        assert_eq!(cfg.model.std_dev_mut, 0.05);
        assert_eq!(cfg.validate(), Ok(()));
    }
}
