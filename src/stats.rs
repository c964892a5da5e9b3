use crate::model::State;
use serde::{Deserialize, Serialize};

/// Summary of one recorded generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub generation: usize,
    pub freq_hawk: f64,
    pub mean_prob_hawk: f64,
    pub var_prob_hawk: f64,
}

impl Record {
    /// Summarize the current state.
    ///
    /// The variance is the plug-in estimate `E[p^2] - E[p]^2`. Pure
    /// strategies carry no propensity, so the hawk frequency stands in for
    /// its mean and the variance is zero.
    pub fn from_state(state: &State, is_pure: bool) -> Self {
        let n_agt = state.agt_vec.len() as f64;
        let freq_hawk = state.n_hawk() as f64 / n_agt;

        if is_pure {
            return Self {
                generation: state.generation,
                freq_hawk,
                mean_prob_hawk: freq_hawk,
                var_prob_hawk: 0.0,
            };
        }

        let (sum, sum_2) = state
            .agt_vec
            .iter()
            .fold((0.0, 0.0), |(sum, sum_2), agt| {
                (sum + agt.prob_hawk, sum_2 + agt.prob_hawk * agt.prob_hawk)
            });
        let mean_prob_hawk = sum / n_agt;

        Self {
            generation: state.generation,
            freq_hawk,
            mean_prob_hawk,
            var_prob_hawk: sum_2 / n_agt - mean_prob_hawk * mean_prob_hawk,
        }
    }
}

/// Records of a run, in generation order.
pub type OutputSeries = Vec<Record>;

/// Column-oriented view of an [`OutputSeries`].
///
/// Column names are kept for compatibility with existing analysis scripts;
/// `sd_pHawkMixed` holds the variance of the propensity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputTable {
    pub generation: Vec<usize>,
    #[serde(rename = "freq_Hawk")]
    pub freq_hawk: Vec<f64>,
    #[serde(rename = "mean_pHawkMixed")]
    pub mean_p_hawk_mixed: Vec<f64>,
    #[serde(rename = "sd_pHawkMixed")]
    pub sd_p_hawk_mixed: Vec<f64>,
}

impl OutputTable {
    pub const COLUMNS: [&'static str; 4] =
        ["generation", "freq_Hawk", "mean_pHawkMixed", "sd_pHawkMixed"];

    pub fn n_rows(&self) -> usize {
        self.generation.len()
    }
}

impl From<&[Record]> for OutputTable {
    fn from(series: &[Record]) -> Self {
        let mut table = Self::default();
        for rec in series {
            table.generation.push(rec.generation);
            table.freq_hawk.push(rec.freq_hawk);
            table.mean_p_hawk_mixed.push(rec.mean_prob_hawk);
            table.sd_p_hawk_mixed.push(rec.var_prob_hawk);
        }
        table
    }
}
