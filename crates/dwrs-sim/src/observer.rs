//! Simulation observer trait for progress reporting and data collection.

use dwrs_core::{CraneId, RobotId, ShipId, Tick};
use dwrs_entity::{Ship, WorkType};

use crate::RunSummary;

/// State of the dock at the end of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSnapshot {
    pub tick:         Tick,
    pub queue_length: usize,
    /// Containers delivered to the city since the start of the run.
    pub delivered:    u64,
    pub busy_cranes:  usize,
    pub busy_robots:  usize,
    /// Containers sitting on pallets.
    pub palletized:   u64,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — container counter
///
/// ```rust,ignore
/// struct Unloaded(u64);
///
/// impl SimObserver for Unloaded {
///     fn on_transfer_complete(&mut self, _tick: Tick, _crane: CraneId, work: WorkType) {
///         if work.from_ship() {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// A ship arrived.  `balked` is `true` if the queue was full and the
    /// ship was turned away.
    fn on_arrival(&mut self, _tick: Tick, _ship: ShipId, _containers: u32, _balked: bool) {}

    /// `ship` was popped from the queue and docked to `crane`.
    fn on_dock(&mut self, _tick: Tick, _crane: CraneId, _ship: &Ship) {}

    /// `ship` left `crane` with no cargo aboard.  Its service window is set.
    fn on_undock(&mut self, _tick: Tick, _crane: CraneId, _ship: &Ship) {}

    /// A container reached the target of a `work` transfer.
    fn on_transfer_complete(&mut self, _tick: Tick, _crane: CraneId, _work: WorkType) {}

    /// `crane` is holding a container because `robot` is still hauling.
    fn on_stall(&mut self, _tick: Tick, _crane: CraneId, _robot: RobotId) {}

    /// Called at the end of each tick, after the queue length is sampled.
    fn on_tick_end(&mut self, _snapshot: &TickSnapshot) {}

    /// Called once after the final tick of [`Sim::run`][crate::Sim::run].
    fn on_sim_end(&mut self, _final_tick: Tick, _summary: &RunSummary) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
