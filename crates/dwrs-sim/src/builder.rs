//! Fluent builder for constructing a [`Sim`].

use dwrs_core::{DockConfig, TrialRng};
use dwrs_dispatch::DispatchPolicy;
use dwrs_entity::Fleet;

use crate::{ArrivalSchedule, Sim, SimError, SimResult};

/// Fluent builder for [`Sim<P>`].
///
/// # Required inputs
///
/// - [`DockConfig`] — horizon, fleet sizing, distributions, seed
/// - `P: DispatchPolicy` — e.g. [`dwrs_dispatch::DirectFirstPolicy`]
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                                           |
/// |--------------------------|---------------------------------------------------|
/// | `.trial(i)`              | trial 0, i.e. `TrialRng::new(config.seed)`        |
/// | `.rng(r)`                | see `.trial`                                      |
/// | `.arrivals(s)`           | `ArrivalSchedule::for_config`, drawn from the rng |
/// | `.robot_work_times(v)`   | one `TC` sample per robot, drawn from the rng     |
///
/// Defaults are drawn in the order listed: arrivals first, then robot duty
/// times.
///
/// # Example
///
/// ```rust,ignore
/// let config = params.resolve()?;
/// let mut sim = SimBuilder::new(config, DirectFirstPolicy)
///     .trial(3)
///     .build()?;
/// let summary = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<P: DispatchPolicy> {
    config:           DockConfig,
    policy:           P,
    rng:              Option<TrialRng>,
    arrivals:         Option<ArrivalSchedule>,
    robot_work_times: Option<Vec<u32>>,
}

impl<P: DispatchPolicy> SimBuilder<P> {
    pub fn new(config: DockConfig, policy: P) -> Self {
        Self {
            config,
            policy,
            rng:              None,
            arrivals:         None,
            robot_work_times: None,
        }
    }

    /// Seed the run as trial `trial` of a batch rooted at `config.seed`.
    pub fn trial(mut self, trial: u64) -> Self {
        self.rng = Some(TrialRng::for_trial(self.config.seed, trial));
        self
    }

    /// Use an explicit random stream.
    pub fn rng(mut self, rng: TrialRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Use a fixed arrival schedule.  Its horizon must match the config.
    pub fn arrivals(mut self, arrivals: ArrivalSchedule) -> Self {
        self.arrivals = Some(arrivals);
        self
    }

    /// Fix each robot's duty time (one entry per robot).
    pub fn robot_work_times(mut self, work_times: Vec<u32>) -> Self {
        self.robot_work_times = Some(work_times);
        self
    }

    /// Validate inputs, build the fleet and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<P>> {
        let config = self.config;
        config.validate()?;
        let mut rng = self.rng.unwrap_or_else(|| TrialRng::new(config.seed));

        let arrivals = match self.arrivals {
            Some(a) if a.horizon() != config.horizon => {
                return Err(SimError::Config(format!(
                    "arrival schedule covers {} ticks, horizon is {}",
                    a.horizon(),
                    config.horizon
                )));
            }
            Some(a) => a,
            None => ArrivalSchedule::for_config(&config, &mut rng)?,
        };

        let work_times = match self.robot_work_times {
            Some(v) if v.len() != config.robots => {
                return Err(SimError::Config(format!(
                    "{} robot work times given for {} robots",
                    v.len(),
                    config.robots
                )));
            }
            Some(v) => v,
            None => (0..config.robots).map(|_| config.robot_duty.sample(&mut rng)).collect(),
        };

        let fleet = Fleet::new(config.cranes, config.pallet_capacity, work_times)
            .map_err(|e| SimError::Config(e.to_string()))?;
        Ok(Sim::new(config, fleet, arrivals, self.policy, rng))
    }
}
