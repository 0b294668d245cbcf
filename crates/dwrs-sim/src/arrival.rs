//! The arrival process.
//!
//! An [`ArrivalSchedule`] is fixed before the first tick: one arrival count
//! per tick of the horizon.  Several ships may arrive in the same tick.

use dwrs_core::{DockConfig, Mode, Tick, TrialRng, WorkTime};

use crate::SimResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrivalSchedule {
    counts: Vec<u32>,
}

impl ArrivalSchedule {
    /// No arrivals at all.
    pub fn empty(horizon: u64) -> Self {
        Self { counts: vec![0; horizon as usize] }
    }

    /// One ship every `mean` ticks, starting at tick `mean`.
    pub fn periodic(horizon: u64, mean: u32) -> Self {
        let mut schedule = Self::empty(horizon);
        if mean == 0 {
            return schedule;
        }
        for t in (u64::from(mean)..horizon).step_by(mean as usize) {
            schedule.counts[t as usize] += 1;
        }
        schedule
    }

    /// Exponential inter-arrival times with mean `mean`.
    ///
    /// Arrival `n` lands on the rounded sum of the first `n` draws.
    pub fn stochastic(horizon: u64, mean: f64, rng: &mut TrialRng) -> SimResult<Self> {
        let gap = WorkTime::exponential(mean)?;
        let mut schedule = Self::empty(horizon);
        let mut clock = 0.0_f64;
        loop {
            clock += gap.draw(rng);
            let t = clock.round() as u64;
            if t >= horizon {
                break;
            }
            schedule.counts[t as usize] += 1;
        }
        Ok(schedule)
    }

    /// An explicit list of arrival ticks.  Ticks at or past `horizon` are
    /// ignored; repeated ticks mean several ships.
    pub fn from_ticks(horizon: u64, ticks: impl IntoIterator<Item = u64>) -> Self {
        let mut schedule = Self::empty(horizon);
        for t in ticks.into_iter().filter(|&t| t < horizon) {
            schedule.counts[t as usize] += 1;
        }
        schedule
    }

    /// Periodic for a deterministic configuration, stochastic otherwise.
    pub fn for_config(config: &DockConfig, rng: &mut TrialRng) -> SimResult<Self> {
        match config.mode {
            Mode::Deterministic => Ok(Self::periodic(config.horizon, config.arrival_mean)),
            Mode::Stochastic => {
                Self::stochastic(config.horizon, f64::from(config.arrival_mean), rng)
            }
        }
    }

    pub fn horizon(&self) -> u64 {
        self.counts.len() as u64
    }

    /// Ships arriving at `tick`; `0` past the horizon.
    #[inline]
    pub fn arrivals_at(&self, tick: Tick) -> u32 {
        self.counts.get(tick.index()).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// Ticks with at least one arrival, ascending.
    pub fn ticks(&self) -> impl Iterator<Item = Tick> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(t, _)| Tick(t as u64))
    }
}
