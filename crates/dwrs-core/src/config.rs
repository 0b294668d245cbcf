//! Simulation configuration.
//!
//! Two layers:
//!
//! - [`DockParams`] mirrors the parameter document field for field
//!   (`SIM_CTRL`, `D_PARAMS`, `S_PARAMS`, `MODE`, `SEED`) and derives serde.
//! - [`DockConfig`] is the resolved, validated form every other crate
//!   consumes.  [`DockParams::resolve`] is the only way from one to the other
//!   that checks everything; code that builds a `DockConfig` by hand should
//!   call [`DockConfig::validate`].
//!
//! ```json
//! {
//!   "SIM_CTRL": {"T_SIM_IN": 1440, "N": 1000},
//!   "D_PARAMS": {"L": 20, "C": 2, "T": 4, "P": 15, "A_MEAN": 35, "TC": 6},
//!   "S_PARAMS": {"K": 10, "CSP": 3, "CPT": 2, "CST": 4},
//!   "MODE": "deterministic"
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult, DistSpec, WorkTime};

/// Seed used when the document does not carry one.
pub const DEFAULT_SEED: u64 = 42;

// ── Mode ──────────────────────────────────────────────────────────────────────

/// Whether cargo sizes and transfer times are all fixed integers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Deterministic,
    Stochastic,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Deterministic => "deterministic",
            Mode::Stochastic => "stochastic",
        })
    }
}

// ── Raw document ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimCtrl {
    /// Number of simulated minutes per trial.
    #[serde(rename = "T_SIM_IN")]
    pub horizon: u64,

    /// Number of trials the driver should run.
    #[serde(rename = "N", default = "default_trials")]
    pub trials: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FleetParams {
    #[serde(rename = "L")]
    pub queue_capacity: usize,
    #[serde(rename = "C")]
    pub cranes: usize,
    #[serde(rename = "T")]
    pub robots: usize,
    #[serde(rename = "P")]
    pub pallet_capacity: u32,
    #[serde(rename = "A_MEAN")]
    pub arrival_mean: u32,
    #[serde(rename = "TC")]
    pub robot_duty: DistSpec,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkParams {
    #[serde(rename = "K")]
    pub cargo: DistSpec,
    #[serde(rename = "CSP")]
    pub ship_to_pallet: DistSpec,
    #[serde(rename = "CPT")]
    pub pallet_to_robot: DistSpec,
    #[serde(rename = "CST")]
    pub ship_to_robot: DistSpec,
}

/// The parameter document as written by the user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DockParams {
    #[serde(rename = "SIM_CTRL")]
    pub sim_ctrl: SimCtrl,

    #[serde(rename = "D_PARAMS")]
    pub fleet: FleetParams,

    #[serde(rename = "S_PARAMS")]
    pub work: WorkParams,

    /// Inferred from `S_PARAMS` when absent.
    #[serde(rename = "MODE", default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,

    #[serde(rename = "SEED", default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_trials() -> u32 {
    1
}

impl DockParams {
    /// Validate the document and build every distribution.
    pub fn resolve(&self) -> CoreResult<DockConfig> {
        let transfer = TransferTimes {
            ship_to_pallet:  WorkTime::from_spec(self.work.ship_to_pallet.clone())?,
            pallet_to_robot: WorkTime::from_spec(self.work.pallet_to_robot.clone())?,
            ship_to_robot:   WorkTime::from_spec(self.work.ship_to_robot.clone())?,
        };
        let cargo = WorkTime::from_spec(self.work.cargo.clone())?;
        let mode = match self.mode {
            Some(mode) => mode,
            None => Mode::infer(&cargo, &transfer),
        };

        let config = DockConfig {
            horizon:         self.sim_ctrl.horizon,
            trials:          self.sim_ctrl.trials,
            queue_capacity:  self.fleet.queue_capacity,
            cranes:          self.fleet.cranes,
            robots:          self.fleet.robots,
            pallet_capacity: self.fleet.pallet_capacity,
            arrival_mean:    self.fleet.arrival_mean,
            robot_duty:      WorkTime::from_spec(self.fleet.robot_duty.clone())?,
            cargo,
            transfer,
            mode,
            seed:            self.seed.unwrap_or(DEFAULT_SEED),
        };
        config.validate()?;
        Ok(config)
    }
}

// ── Resolved configuration ────────────────────────────────────────────────────

/// Durations of the three crane transfer legs.
#[derive(Clone, Debug, PartialEq)]
pub struct TransferTimes {
    /// CSP: ship → pallet.
    pub ship_to_pallet:  WorkTime,
    /// CPT: pallet → robot.
    pub pallet_to_robot: WorkTime,
    /// CST: ship → robot.
    pub ship_to_robot:   WorkTime,
}

impl TransferTimes {
    /// All three legs take a fixed number of ticks.
    pub fn fixed(ship_to_pallet: u32, pallet_to_robot: u32, ship_to_robot: u32) -> Self {
        Self {
            ship_to_pallet:  WorkTime::fixed(ship_to_pallet),
            pallet_to_robot: WorkTime::fixed(pallet_to_robot),
            ship_to_robot:   WorkTime::fixed(ship_to_robot),
        }
    }
}

/// Fully resolved configuration for one trial (or a batch of trials).
#[derive(Clone, Debug, PartialEq)]
pub struct DockConfig {
    /// Total ticks to simulate (`T_SIM_IN`).
    pub horizon: u64,

    /// Trials the driver should run (`N`).  Ignored by a single run.
    pub trials: u32,

    /// Ship queue bound (`L`).  Ships arriving to a full queue balk.
    pub queue_capacity: usize,

    /// Crane count (`C`); each crane owns one pallet.
    pub cranes: usize,

    /// Robot count (`T`).
    pub robots: usize,

    /// Containers one pallet holds (`P`).
    pub pallet_capacity: u32,

    /// Mean inter-arrival time in ticks (`A_MEAN`).
    pub arrival_mean: u32,

    /// Robot duty time (`TC`).  Sampled once per robot.
    pub robot_duty: WorkTime,

    /// Containers per ship (`K`).
    pub cargo: WorkTime,

    pub transfer: TransferTimes,

    pub mode: Mode,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl DockConfig {
    /// Check fleet sizing and that `mode` agrees with the distributions.
    pub fn validate(&self) -> CoreResult<()> {
        if self.horizon == 0 {
            return Err(CoreError::Config("T_SIM_IN must be positive".into()));
        }
        if self.cranes == 0 || self.cranes > usize::from(u16::MAX) {
            return Err(CoreError::Config(format!("C = {} is out of range", self.cranes)));
        }
        if self.robots == 0 || self.robots > usize::from(u16::MAX) {
            return Err(CoreError::Config(format!("T = {} is out of range", self.robots)));
        }
        if self.pallet_capacity == 0 {
            return Err(CoreError::Config("P must be at least 1".into()));
        }
        if self.arrival_mean == 0 {
            return Err(CoreError::Config("A_MEAN must be positive".into()));
        }
        self.check_mode()
    }

    fn check_mode(&self) -> CoreResult<()> {
        let legs = [
            ("K", &self.cargo),
            ("CSP", &self.transfer.ship_to_pallet),
            ("CPT", &self.transfer.pallet_to_robot),
            ("CST", &self.transfer.ship_to_robot),
        ];
        match self.mode {
            Mode::Deterministic => match legs.iter().find(|(_, w)| !w.is_fixed()) {
                Some((field, _)) => Err(CoreError::ModeMismatch { mode: self.mode, field: *field }),
                None => Ok(()),
            },
            Mode::Stochastic if legs.iter().all(|(_, w)| w.is_fixed()) => {
                Err(CoreError::ModeMismatch { mode: self.mode, field: "S_PARAMS" })
            }
            Mode::Stochastic => Ok(()),
        }
    }
}

impl Mode {
    /// Deterministic iff the cargo size and all three transfer legs are fixed.
    pub fn infer(cargo: &WorkTime, transfer: &TransferTimes) -> Mode {
        let all_fixed = cargo.is_fixed()
            && transfer.ship_to_pallet.is_fixed()
            && transfer.pallet_to_robot.is_fixed()
            && transfer.ship_to_robot.is_fixed();
        if all_fixed { Mode::Deterministic } else { Mode::Stochastic }
    }
}
