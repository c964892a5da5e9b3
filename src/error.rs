use thiserror::Error;

/// Reason a configuration was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("number of agents must be a positive even number, but is {n_agt}")]
    PopulationSize { n_agt: usize },

    #[error("output is produced every {output_nth_generation} generations, but a minimum of 1 is required")]
    OutputIntervalTooSmall { output_nth_generation: usize },

    #[error(
        "output is produced every {output_nth_generation} generations, which is not smaller than the maximum time {max_time}"
    )]
    OutputIntervalTooLarge {
        output_nth_generation: usize,
        max_time: usize,
    },

    #[error("total payoff of {n_agt} agents with value {value} and cost {cost} is not finite")]
    PayoffOverflow {
        n_agt: usize,
        value: f64,
        cost: f64,
    },

    #[error("{name} must be in the range {range}, but is {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        range: String,
    },
}

/// Error raised by the simulation engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("invalid configuration")]
    Configuration(#[from] ConfigError),

    /// Every payoff of a generation is non-positive, so fitness-proportional
    /// sampling is undefined.
    #[error("all {n_agt} payoffs of generation {generation} are non-positive")]
    DegenerateWeights { generation: usize, n_agt: usize },
}
