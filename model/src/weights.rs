use serde::{Deserialize, Serialize};

/// Decision-maker priorities over the four scored objectives.
///
/// Raw inputs are arbitrary non-negative numbers; [`Weights::normalised`]
/// turns them into a distribution summing to 100.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub readiness: f64,
    pub reliability: f64,
    pub cost: f64,
    pub branding: f64,
}

impl Weights {
    pub fn new(readiness: f64, reliability: f64, cost: f64, branding: f64) -> Weights {
        Weights {
            readiness,
            reliability,
            cost,
            branding,
        }
    }

    /// The uniform distribution, used as fallback for an all-zero input.
    pub fn uniform() -> Weights {
        Weights::new(25.0, 25.0, 25.0, 25.0)
    }

    pub fn sum(&self) -> f64 {
        self.readiness + self.reliability + self.cost + self.branding
    }

    /// Scales the components to sum to 100. All-zero input yields the
    /// uniform distribution. Idempotent (up to floating-point rounding).
    pub fn normalised(&self) -> Weights {
        let sum = self.sum();
        if sum == 0.0 {
            return Weights::uniform();
        }
        Weights {
            readiness: self.readiness / sum * 100.0,
            reliability: self.reliability / sum * 100.0,
            cost: self.cost / sum * 100.0,
            branding: self.branding / sum * 100.0,
        }
    }
}

impl Default for Weights {
    // the planner UI's initial slider positions
    fn default() -> Weights {
        Weights::new(40.0, 30.0, 20.0, 10.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Weights;

    #[test]
    fn normalised_sums_to_one_hundred() {
        let weights = Weights::new(3.0, 7.0, 11.0, 2.0);

        let norm = weights.normalised();

        assert!((norm.sum() - 100.0).abs() < 1e-6);
        assert!(norm.readiness >= 0.0);
        assert!(norm.reliability >= 0.0);
        assert!(norm.cost >= 0.0);
        assert!(norm.branding >= 0.0);
    }

    #[test]
    fn normalising_twice_is_idempotent() {
        let weights = Weights::new(13.0, 0.5, 70.0, 9.25);

        let once = weights.normalised();
        let twice = once.normalised();

        assert!((once.readiness - twice.readiness).abs() < 1e-9);
        assert!((once.reliability - twice.reliability).abs() < 1e-9);
        assert!((once.cost - twice.cost).abs() < 1e-9);
        assert!((once.branding - twice.branding).abs() < 1e-9);
    }

    #[test]
    fn all_zero_weights_fall_back_to_uniform() {
        let weights = Weights::new(0.0, 0.0, 0.0, 0.0);

        assert_eq!(weights.normalised(), Weights::uniform());
    }

    #[test]
    fn already_normalised_weights_are_unchanged() {
        let weights = Weights::new(40.0, 30.0, 20.0, 10.0);

        assert_eq!(weights.normalised(), weights);
    }
}
