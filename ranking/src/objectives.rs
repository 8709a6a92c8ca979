use model::base_types::Score;
use model::trainsets::Trainset;
use model::weights::Weights;

const CERTIFICATION_POINTS: Score = 60.0;
const CLEANING_POINTS: Score = 40.0;
const PENALTY_PER_OPEN_JOB: Score = 12.0;
const TARGET_DAILY_KM: f64 = 200.0;
const PENALTY_PER_BAY: Score = 8.0;

/// The five per-trainset sub-scores derived from the raw attributes.
///
/// Recomputed on every read; never persisted. All values lie in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Objectives {
    pub readiness: Score,
    pub reliability: Score,
    pub cost: Score,
    pub branding: Score,
    /// Informational only; excluded from the composite score.
    pub shunting: Score,
}

impl Objectives {
    pub fn of(trainset: &Trainset) -> Objectives {
        let fully_certified =
            trainset.fitness_ok() && trainset.telecom_ok() && trainset.signalling_ok();
        let certification = if fully_certified { CERTIFICATION_POINTS } else { 0.0 };
        let cleaning = if trainset.cleaning_ready() { CLEANING_POINTS } else { 0.0 };
        let readiness = certification + cleaning;
        let reliability =
            (100.0 - trainset.maximo_open_jobs() as Score * PENALTY_PER_OPEN_JOB).max(0.0);
        // penalty centered on the daily distance target, symmetric in both directions
        let cost = (100.0 - (TARGET_DAILY_KM - trainset.mileage_km()).abs()).max(0.0);
        let branding = trainset.branding_priority() as Score;
        let shunting = (100.0 - trainset.bay_index() as Score * PENALTY_PER_BAY).max(0.0);
        Objectives {
            readiness,
            reliability,
            cost,
            branding,
            shunting,
        }
    }
}

/// Weighted sum of the four ranked objectives under normalised weights.
///
/// `shunting` never enters the composite; it influences display and alerts
/// only. The result is not re-clamped.
pub fn composite_score(trainset: &Trainset, weights: &Weights) -> (Score, Objectives) {
    let w = weights.normalised();
    let objectives = Objectives::of(trainset);
    let score = objectives.readiness * (w.readiness / 100.0)
        + objectives.reliability * (w.reliability / 100.0)
        + objectives.cost * (w.cost / 100.0)
        + objectives.branding * (w.branding / 100.0);
    (score, objectives)
}

#[cfg(test)]
mod tests {
    use model::base_types::TrainsetIdx;
    use model::trainsets::Trainset;
    use model::weights::Weights;

    use super::{composite_score, Objectives};

    fn trainset(open_jobs: u32, mileage_km: f64, bay_index: u32) -> Trainset {
        Trainset::new(
            TrainsetIdx(1),
            String::from("KMRL-01"),
            true,
            true,
            true,
            open_jobs,
            50,
            mileage_km,
            true,
            bay_index,
        )
    }

    #[test]
    fn fully_certified_and_clean_means_full_readiness() {
        let objectives = Objectives::of(&trainset(0, 200.0, 0));

        assert_eq!(objectives.readiness, 100.0);
    }

    #[test]
    fn a_single_missing_certificate_voids_the_certification_points() {
        let uncertified = Trainset::new(
            TrainsetIdx(2),
            String::from("KMRL-02"),
            true,
            false,
            true,
            0,
            50,
            200.0,
            true,
            0,
        );

        assert_eq!(Objectives::of(&uncertified).readiness, 40.0);
    }

    #[test]
    fn reliability_penalises_open_job_cards() {
        assert_eq!(Objectives::of(&trainset(3, 200.0, 0)).reliability, 64.0);
        // penalty floors at zero
        assert_eq!(Objectives::of(&trainset(20, 200.0, 0)).reliability, 0.0);
    }

    #[test]
    fn cost_penalty_is_symmetric_around_the_distance_target() {
        assert_eq!(Objectives::of(&trainset(0, 260.0, 0)).cost, 40.0);
        assert_eq!(Objectives::of(&trainset(0, 140.0, 0)).cost, 40.0);
        assert_eq!(Objectives::of(&trainset(0, 200.0, 0)).cost, 100.0);
    }

    #[test]
    fn shunting_penalises_bays_far_from_the_turnout() {
        assert_eq!(Objectives::of(&trainset(0, 200.0, 5)).shunting, 60.0);
    }

    #[test]
    fn shunting_is_excluded_from_the_composite() {
        let near_turnout = trainset(0, 200.0, 0);
        let far_from_turnout = trainset(0, 200.0, 11);

        let (near_score, _) = composite_score(&near_turnout, &Weights::default());
        let (far_score, _) = composite_score(&far_from_turnout, &Weights::default());

        assert_eq!(near_score, far_score);
    }

    #[test]
    fn composite_is_the_weighted_sum_of_the_four_objectives() {
        let ts = trainset(3, 260.0, 5);
        // readiness 100, reliability 64, cost 40, branding 50
        let weights = Weights::new(40.0, 30.0, 20.0, 10.0);

        let (score, _) = composite_score(&ts, &weights);

        let expected = 100.0 * 0.4 + 64.0 * 0.3 + 40.0 * 0.2 + 50.0 * 0.1;
        assert!((score - expected).abs() < 1e-9);
    }
}
