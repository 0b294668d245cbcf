//! Work-time distributions and the scheduling time estimator.
//!
//! A [`DistSpec`] is the raw descriptor read from a parameter document: a
//! bare integer for a fixed duration, or a named distribution with its
//! parameters.  [`WorkTime`] is the validated form.  Building it constructs
//! the `rand_distr` sampler once, so drawing later cannot fail.
//!
//! | Kind          | Params                  | Estimate (95th percentile)       |
//! |---------------|-------------------------|----------------------------------|
//! | fixed         | `n`                     | `n`                              |
//! | `uniform`     | `[low, high]`           | `low + 0.95 (high - low)`        |
//! | `triangular`  | `[min, mode, max]`      | inverse CDF                      |
//! | `exponential` | `[mean]`                | `mean * ln 20`                   |
//! | `normal`      | `[mean, std_dev]`       | `mean + 1.6449 std_dev`          |
//!
//! Integer durations are the rounded draw, clamped at zero.

use std::fmt;

use rand::distributions::{Distribution, Uniform};
use rand_distr::{Exp, Normal, Triangular};
use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult, TrialRng};

/// Quantile used by [`WorkTime::estimate`].
pub const ESTIMATE_QUANTILE: f64 = 0.95;

/// Standard normal quantile at [`ESTIMATE_QUANTILE`].
const NORMAL_Z_95: f64 = 1.644_853_626_951_472_2;

// ── DistSpec ──────────────────────────────────────────────────────────────────

/// Raw work-time descriptor.
///
/// ```json
/// 3
/// {"kind": "triangular", "params": [1, 3, 4]}
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DistSpec {
    Fixed(u32),
    Named { kind: String, params: Vec<f64> },
}

impl DistSpec {
    pub fn named(kind: &str, params: &[f64]) -> Self {
        DistSpec::Named { kind: kind.to_string(), params: params.to_vec() }
    }
}

impl From<u32> for DistSpec {
    fn from(n: u32) -> Self {
        DistSpec::Fixed(n)
    }
}

// ── WorkTime ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
enum Kernel {
    Fixed(u32),
    Uniform { dist: Uniform<f64>, low: f64, high: f64 },
    Triangular { dist: Triangular<f64>, min: f64, mode: f64, max: f64 },
    Exponential { dist: Exp<f64>, mean: f64 },
    Normal { dist: Normal<f64>, mean: f64, std_dev: f64 },
}

/// A validated work-time distribution.
#[derive(Clone, Debug)]
pub struct WorkTime {
    spec:   DistSpec,
    kernel: Kernel,
}

impl WorkTime {
    /// A fixed duration of `n` ticks.
    pub fn fixed(n: u32) -> Self {
        Self { spec: DistSpec::Fixed(n), kernel: Kernel::Fixed(n) }
    }

    /// Exponential distribution with the given mean.
    pub fn exponential(mean: f64) -> CoreResult<Self> {
        Self::from_spec(DistSpec::named("exponential", &[mean]))
    }

    /// Validate `spec` and build its sampler.
    pub fn from_spec(spec: DistSpec) -> CoreResult<Self> {
        let kernel = match &spec {
            DistSpec::Fixed(n) => Kernel::Fixed(*n),
            DistSpec::Named { kind, params } => build_kernel(kind, params)?,
        };
        Ok(Self { spec, kernel })
    }

    /// `true` for a fixed integer duration.
    pub fn is_fixed(&self) -> bool {
        matches!(self.kernel, Kernel::Fixed(_))
    }

    /// One raw continuous draw.  Fixed durations do not touch the RNG.
    pub fn draw(&self, rng: &mut TrialRng) -> f64 {
        match &self.kernel {
            Kernel::Fixed(n) => *n as f64,
            Kernel::Uniform { dist, .. } => dist.sample(rng.inner()),
            Kernel::Triangular { dist, .. } => dist.sample(rng.inner()),
            Kernel::Exponential { dist, .. } => dist.sample(rng.inner()),
            Kernel::Normal { dist, .. } => dist.sample(rng.inner()),
        }
    }

    /// One integer duration: the rounded draw, clamped at zero.
    pub fn sample(&self, rng: &mut TrialRng) -> u32 {
        match &self.kernel {
            Kernel::Fixed(n) => *n,
            _ => self.draw(rng).round().max(0.0) as u32,
        }
    }

    /// Conservative duration estimate used only for dispatch heuristics.
    ///
    /// Returns the [`ESTIMATE_QUANTILE`] quantile of the distribution.
    pub fn estimate(&self) -> f64 {
        let p = ESTIMATE_QUANTILE;
        match self.kernel {
            Kernel::Fixed(n) => f64::from(n),
            Kernel::Uniform { low, high, .. } => low + p * (high - low),
            Kernel::Triangular { min, mode, max, .. } => {
                let span = max - min;
                let split = (mode - min) / span;
                if p < split {
                    min + (p * span * (mode - min)).sqrt()
                } else {
                    max - ((1.0 - p) * span * (max - mode)).sqrt()
                }
            }
            Kernel::Exponential { mean, .. } => -mean * (1.0 - p).ln(),
            Kernel::Normal { mean, std_dev, .. } => mean + NORMAL_Z_95 * std_dev,
        }
    }
}

impl PartialEq for WorkTime {
    fn eq(&self, other: &Self) -> bool {
        self.spec == other.spec
    }
}

impl fmt::Display for WorkTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.spec {
            DistSpec::Fixed(n) => write!(f, "{n}"),
            DistSpec::Named { kind, params } => write!(f, "{kind}{params:?}"),
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn build_kernel(kind: &str, params: &[f64]) -> CoreResult<Kernel> {
    let kind = kind.trim().to_ascii_lowercase();
    match kind.as_str() {
        "uniform" => {
            let [low, high] = arity("uniform", params)?;
            if !(low.is_finite() && high.is_finite()) || low > high {
                return Err(invalid("uniform", params, "expected finite low <= high"));
            }
            Ok(Kernel::Uniform { dist: Uniform::new_inclusive(low, high), low, high })
        }
        "triangular" => {
            let [min, mode, max] = arity("triangular", params)?;
            let dist = Triangular::new(min, max, mode)
                .map_err(|e| invalid("triangular", params, &e.to_string()))?;
            Ok(Kernel::Triangular { dist, min, mode, max })
        }
        "exponential" => {
            let [mean] = arity("exponential", params)?;
            if !(mean.is_finite() && mean > 0.0) {
                return Err(invalid("exponential", params, "mean must be positive"));
            }
            let dist = Exp::new(1.0 / mean)
                .map_err(|e| invalid("exponential", params, &e.to_string()))?;
            Ok(Kernel::Exponential { dist, mean })
        }
        "normal" => {
            let [mean, std_dev] = arity("normal", params)?;
            if !mean.is_finite() {
                return Err(invalid("normal", params, "mean must be finite"));
            }
            if !(std_dev.is_finite() && std_dev >= 0.0) {
                return Err(invalid("normal", params, "std_dev must be non-negative"));
            }
            let dist = Normal::new(mean, std_dev)
                .map_err(|e| invalid("normal", params, &e.to_string()))?;
            Ok(Kernel::Normal { dist, mean, std_dev })
        }
        _ => Err(CoreError::UnsupportedDistribution(kind)),
    }
}

fn arity<const N: usize>(kind: &'static str, params: &[f64]) -> CoreResult<[f64; N]> {
    <[f64; N]>::try_from(params)
        .map_err(|_| invalid(kind, params, &format!("expected {N} parameter(s)")))
}

fn invalid(kind: &'static str, params: &[f64], reason: &str) -> CoreError {
    CoreError::InvalidParameters {
        kind,
        params: params.to_vec(),
        reason: reason.to_string(),
    }
}
