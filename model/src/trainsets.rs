use crate::base_types::{BayIndex, BrandingPriority, JobCount, Kilometers, TrainsetIdx};

/// A physical rail vehicle unit tracked by the planner.
///
/// The identifier is immutable once created; all other fields are only
/// mutable through [`Fleet::apply_objective_change`][crate::fleet::Fleet].
#[derive(Debug, Clone, PartialEq)]
pub struct Trainset {
    idx: TrainsetIdx,
    code: String,
    fitness_ok: bool,
    telecom_ok: bool,
    signalling_ok: bool,
    maximo_open_jobs: JobCount,
    branding_priority: BrandingPriority,
    mileage_km: Kilometers,
    cleaning_ready: bool,
    bay_index: BayIndex,
}

/// A decision-maker's request to update one raw attribute of a trainset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObjectiveChange {
    Fitness(bool),
    Telecom(bool),
    Signalling(bool),
    Cleaning(bool),
    BrandingPriority(BrandingPriority),
    OpenJobs(JobCount),
}

impl Trainset {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        idx: TrainsetIdx,
        code: String,
        fitness_ok: bool,
        telecom_ok: bool,
        signalling_ok: bool,
        maximo_open_jobs: JobCount,
        branding_priority: BrandingPriority,
        mileage_km: Kilometers,
        cleaning_ready: bool,
        bay_index: BayIndex,
    ) -> Trainset {
        Trainset {
            idx,
            code,
            fitness_ok,
            telecom_ok,
            signalling_ok,
            maximo_open_jobs,
            branding_priority,
            mileage_km,
            cleaning_ready,
            bay_index,
        }
    }

    pub fn idx(&self) -> TrainsetIdx {
        self.idx
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn fitness_ok(&self) -> bool {
        self.fitness_ok
    }

    pub fn telecom_ok(&self) -> bool {
        self.telecom_ok
    }

    pub fn signalling_ok(&self) -> bool {
        self.signalling_ok
    }

    pub fn maximo_open_jobs(&self) -> JobCount {
        self.maximo_open_jobs
    }

    pub fn branding_priority(&self) -> BrandingPriority {
        self.branding_priority
    }

    pub fn mileage_km(&self) -> Kilometers {
        self.mileage_km
    }

    pub fn cleaning_ready(&self) -> bool {
        self.cleaning_ready
    }

    pub fn bay_index(&self) -> BayIndex {
        self.bay_index
    }

    /// Business rule: a change is only accepted if the new value is strictly
    /// greater than the current one (booleans compare as 0/1).
    pub(crate) fn change_is_increase(&self, change: ObjectiveChange) -> bool {
        match change {
            ObjectiveChange::Fitness(new) => !self.fitness_ok && new,
            ObjectiveChange::Telecom(new) => !self.telecom_ok && new,
            ObjectiveChange::Signalling(new) => !self.signalling_ok && new,
            ObjectiveChange::Cleaning(new) => !self.cleaning_ready && new,
            ObjectiveChange::BrandingPriority(new) => self.branding_priority < new,
            ObjectiveChange::OpenJobs(new) => self.maximo_open_jobs < new,
        }
    }

    pub(crate) fn apply_change(&mut self, change: ObjectiveChange) {
        match change {
            ObjectiveChange::Fitness(new) => self.fitness_ok = new,
            ObjectiveChange::Telecom(new) => self.telecom_ok = new,
            ObjectiveChange::Signalling(new) => self.signalling_ok = new,
            ObjectiveChange::Cleaning(new) => self.cleaning_ready = new,
            ObjectiveChange::BrandingPriority(new) => self.branding_priority = new,
            ObjectiveChange::OpenJobs(new) => self.maximo_open_jobs = new,
        }
    }
}
