//! Repeated independent trials.
//!
//! Trial `i` is seeded from `config.seed` and `i` alone (see
//! [`dwrs_core::trial_seed`]), so a batch gives the same summaries whether
//! it runs in order or, with the `parallel` feature, on Rayon's pool.

use std::sync::Arc;

use dwrs_core::DockConfig;
use dwrs_dispatch::DispatchPolicy;

use crate::{NoopObserver, RunSummary, SimBuilder, SimResult};

/// Run trial `trial` of a batch to the end of the horizon.
pub fn run_trial<P: DispatchPolicy>(config: &DockConfig, trial: u64, policy: P) -> SimResult<RunSummary> {
    SimBuilder::new(config.clone(), policy)
        .trial(trial)
        .build()?
        .run(&mut NoopObserver)
}

/// Run `trials` independent trials and return their summaries in trial
/// order.  The first failing trial aborts the batch.
pub fn run_trials<P: DispatchPolicy>(
    config: &DockConfig,
    trials: u32,
    policy: P,
) -> SimResult<Vec<RunSummary>> {
    let policy = Arc::new(policy);

    #[cfg(not(feature = "parallel"))]
    {
        (0..u64::from(trials))
            .map(|i| run_trial(config, i, Arc::clone(&policy)))
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        (0..u64::from(trials))
            .into_par_iter()
            .map(|i| run_trial(config, i, Arc::clone(&policy)))
            .collect()
    }
}

// ── Aggregation ───────────────────────────────────────────────────────────────

/// Mean and sample standard deviation of one metric across trials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricStat {
    pub mean:    f64,
    /// `0.0` for a single value.
    pub std_dev: f64,
    /// Trials that contributed a value.
    pub count:   usize,
}

impl MetricStat {
    /// `None` for an empty input.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let values: Vec<f64> = values.into_iter().collect();
        let count = values.len();
        if count == 0 {
            return None;
        }
        let mean = values.iter().sum::<f64>() / count as f64;
        let std_dev = if count > 1 {
            let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        } else {
            0.0
        };
        Some(Self { mean, std_dev, count })
    }
}

/// Per-metric statistics over a batch of [`RunSummary`]s.
///
/// Trials whose mean is undefined (no ship docked or undocked) are skipped
/// for that metric only.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialAggregate {
    pub trials:                 usize,
    pub service_time:           Option<MetricStat>,
    pub queue_wait_time:        Option<MetricStat>,
    pub queue_length:           Option<MetricStat>,
    pub containers_transported: Option<MetricStat>,
    pub ships_serviced:         Option<MetricStat>,
    pub ships_balked:           Option<MetricStat>,
}

impl TrialAggregate {
    pub fn from_summaries(summaries: &[RunSummary]) -> Self {
        Self {
            trials:                 summaries.len(),
            service_time:           metric(summaries, |s| s.mean_service_time),
            queue_wait_time:        metric(summaries, |s| s.mean_queue_wait_time),
            queue_length:           metric(summaries, |s| Some(s.mean_queue_length)),
            containers_transported: metric(summaries, |s| Some(s.containers_transported as f64)),
            ships_serviced:         metric(summaries, |s| Some(s.ships_serviced as f64)),
            ships_balked:           metric(summaries, |s| Some(s.ships_balked as f64)),
        }
    }
}

fn metric(summaries: &[RunSummary], field: impl Fn(&RunSummary) -> Option<f64>) -> Option<MetricStat> {
    MetricStat::from_values(summaries.iter().filter_map(field))
}
