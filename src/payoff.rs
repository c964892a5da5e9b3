use crate::model::Strategy;
use rand::Rng;

/// Fixed 2x2 payoff table indexed by (own strategy, opponent strategy).
///
/// The hawk-hawk entry holds the expected payoff `(v - c) / 2`; realized
/// hawk-hawk contests are resolved by a fair coin in [`PayoffMatrix::resolve`].
#[derive(Debug, Clone, PartialEq)]
pub struct PayoffMatrix {
    value: f64,
    cost: f64,
    table: [[f64; 2]; 2],
}

impl PayoffMatrix {
    pub fn new(value: f64, cost: f64) -> Self {
        let table = [[value / 2.0, 0.0], [value, (value - cost) / 2.0]];
        Self { value, cost, table }
    }

    /// Unshifted payoff of `own` against `opp`.
    pub fn get(&self, own: Strategy, opp: Strategy) -> f64 {
        self.table[own.idx()][opp.idx()]
    }

    /// Additive shift that makes every realized payoff non-negative.
    pub fn baseline(&self) -> f64 {
        self.cost
    }

    /// Resolve one contest and return the shifted payoffs of both agents.
    ///
    /// Draws from `rng` only when both agents play hawk.
    pub fn resolve<R: Rng + ?Sized>(&self, a: Strategy, b: Strategy, rng: &mut R) -> (f64, f64) {
        let baseline = self.baseline();
        match (a, b) {
            (Strategy::Hawk, Strategy::Hawk) => {
                let win = baseline + self.value;
                let lose = baseline - self.cost;
                if rng.random_bool(0.5) {
                    (win, lose)
                } else {
                    (lose, win)
                }
            }
            _ => (
                baseline + self.get(a, b),
                baseline + self.get(b, a),
            ),
        }
    }
}
