/// Induction policy parameters.
///
/// The status bands are fixed counts against the depot's nightly service
/// plan, not fractions of the fleet; they must not be rescaled when the
/// fleet size changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Ranked positions 0..revenue_quota enter revenue service.
    pub revenue_quota: usize,
    /// Ranked positions revenue_quota..standby_cutoff are held on standby;
    /// everything after goes to the inspection bay line.
    pub standby_cutoff: usize,
    /// Fleet size used when no snapshot exists yet.
    pub default_fleet_size: usize,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            revenue_quota: 17,
            standby_cutoff: 20,
            default_fleet_size: 25,
        }
    }
}
