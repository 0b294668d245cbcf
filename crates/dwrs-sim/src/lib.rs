//! `dwrs-sim` — tick loop orchestrator for the dock worker robot simulation.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.horizon:
//!   ① Arrivals  — ships scheduled for this tick join the queue or balk.
//!   ② Robots    — every hauling robot advances; finished duties are
//!                 containers delivered to the city.
//!   ③ Cranes    — in CraneId order:
//!                   dock the queue head if the berth is empty
//!                   undock a ship with no cargo left
//!                   advance the transfer, or ask the DispatchPolicy for
//!                   one and start + advance it in the same tick
//!   ④ Queue     — sample the queue length.
//! ```
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`arrival`] | `ArrivalSchedule` — periodic, stochastic or scripted       |
//! | [`builder`] | `SimBuilder`                                               |
//! | [`sim`]     | `Sim<P>` and the tick loop                                 |
//! | [`observer`]| `SimObserver`, `NoopObserver`, `TickSnapshot`              |
//! | [`stats`]   | `RunStats` accumulator, `RunSummary` result record         |
//! | [`trials`]  | `run_trial`, `run_trials`, `TrialAggregate`, `MetricStat`  |
//! | [`error`]   | `SimError`, `SimResult<T>`                                 |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | `run_trials` runs whole trials on Rayon's thread pool. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use dwrs_dispatch::DirectFirstPolicy;
//! use dwrs_sim::{NoopObserver, SimBuilder};
//!
//! let config = params.resolve()?;
//! let mut sim = SimBuilder::new(config, DirectFirstPolicy).build()?;
//! let summary = sim.run(&mut NoopObserver)?;
//! ```

pub mod arrival;
pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod stats;
pub mod trials;

#[cfg(test)]
mod tests;

pub use arrival::ArrivalSchedule;
pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickSnapshot};
pub use sim::Sim;
pub use stats::{RunStats, RunSummary};
pub use trials::{run_trial, run_trials, MetricStat, TrialAggregate};
