//! `dwrs-core` — foundational types for the dock worker robot simulation.
//!
//! This crate is a dependency of every other `dwrs-*` crate.  It has no
//! `dwrs-*` dependencies and performs no I/O.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `CraneId`, `RobotId`, `ShipId`                        |
//! | [`time`]        | `Tick`                                                |
//! | [`rng`]         | `TrialRng`, per-trial seed mixing                     |
//! | [`dist`]        | `DistSpec` descriptors, validated `WorkTime`          |
//! | [`config`]      | `DockParams` (raw document), `DockConfig` (resolved)  |
//! | [`error`]       | `CoreError`, `CoreResult`                             |

pub mod config;
pub mod dist;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{DEFAULT_SEED, DockConfig, DockParams, FleetParams, Mode, SimCtrl, TransferTimes, WorkParams};
pub use dist::{DistSpec, WorkTime, ESTIMATE_QUANTILE};
pub use error::{CoreError, CoreResult};
pub use ids::{CraneId, RobotId, ShipId};
pub use rng::{trial_seed, TrialRng};
pub use time::Tick;
