//! The `Sim` struct and its tick loop.

use dwrs_core::{DockConfig, ShipId, Tick, TrialRng};
use dwrs_dispatch::{Decision, DispatchContext, DispatchPolicy};
use dwrs_entity::{Crane, Fleet, Robot, Ship, ShipQueue, Target, WorkOutcome};
use log::{debug, info, trace};

use crate::{
    ArrivalSchedule, RunStats, RunSummary, SimError, SimObserver, SimResult, TickSnapshot,
};

/// The main simulation runner.
///
/// `Sim<P>` owns every entity of one run and drives the tick loop:
///
/// 1. **Arrivals**: each ship scheduled for this tick is created with a
///    sampled cargo size and offered to the queue (or balks).
/// 2. **Robots**: every hauling robot advances one tick; finished duties
///    count as containers delivered.
/// 3. **Cranes**, in `CraneId` order:
///    - an empty berth docks the head of the queue;
///    - a docked ship with no cargo left is undocked;
///    - a working crane advances its transfer, otherwise the policy is
///      asked for one, which is started and advanced in the same tick.
/// 4. **Queue**: the queue length is sampled.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: DispatchPolicy> {
    /// Resolved configuration.  `transfer` durations are sampled from it.
    pub config: DockConfig,

    /// The next tick to be processed.
    pub now: Tick,

    pub queue: ShipQueue,

    /// Cranes and robots, indexed by their ids.
    pub fleet: Fleet,

    pub arrivals: ArrivalSchedule,

    pub stats: RunStats,

    pub policy: P,

    /// The run's single random stream.
    pub rng: TrialRng,

    pub(crate) next_ship: u32,
}

impl<P: DispatchPolicy> Sim<P> {
    pub(crate) fn new(
        config:   DockConfig,
        fleet:    Fleet,
        arrivals: ArrivalSchedule,
        policy:   P,
        rng:      TrialRng,
    ) -> Self {
        Self {
            queue: ShipQueue::new(config.queue_capacity),
            config,
            now: Tick::ZERO,
            fleet,
            arrivals,
            stats: RunStats::default(),
            policy,
            rng,
            next_ship: 0,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to the end of the horizon and return the
    /// result record.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunSummary> {
        while self.now.0 < self.config.horizon {
            self.step(observer)?;
        }
        let summary = self.summary();
        observer.on_sim_end(self.now, &summary);
        info!(
            "run finished at {}: {} ships serviced, {} containers transported, {} balked",
            self.now, summary.ships_serviced, summary.containers_transported, summary.ships_balked,
        );
        Ok(summary)
    }

    /// Run exactly `n` ticks from the current position (ignores the horizon).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Result record for the ticks processed so far.
    pub fn summary(&self) -> RunSummary {
        self.stats.summary()
    }

    pub fn is_finished(&self) -> bool {
        self.now.0 >= self.config.horizon
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.now;
        observer.on_tick_start(now);
        self.process_tick(now, observer)?;
        observer.on_tick_end(&self.snapshot(now));
        self.now = now.offset(1);
        Ok(())
    }

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<()> {
        // ── Phase 1: arrivals ─────────────────────────────────────────────
        for _ in 0..self.arrivals.arrivals_at(now) {
            let id = ShipId(self.next_ship);
            self.next_ship = self.next_ship.checked_add(1).ok_or(SimError::ShipIdsExhausted)?;
            let containers = self.config.cargo.sample(&mut self.rng);
            let balked = !self.queue.add_ship(Ship::new(id, now, containers));
            if balked {
                debug!(
                    "{now}: {id} balked ({}/{} queued)",
                    self.queue.len(),
                    self.queue.max_length()
                );
            }
            self.stats.record_arrival(balked);
            observer.on_arrival(now, id, containers, balked);
        }

        // ── Phase 2: robots ───────────────────────────────────────────────
        let delivered = self.fleet.advance_robots()?;
        self.stats.record_deliveries(delivered);

        // ── Phase 3: cranes ───────────────────────────────────────────────
        //
        // Explicit field borrows so the borrow checker sees disjoint access:
        // the policy reads `robots` while one crane is mutated.
        let Fleet { cranes, robots } = &mut self.fleet;
        for crane in cranes.iter_mut() {
            if !crane.is_docked() {
                if let Some(ship) = self.queue.pop_ship() {
                    crane.dock(ship, now)?;
                    if let Some(ship) = crane.docked_ship() {
                        let wait = ship.wait_time().unwrap_or(0);
                        debug!("{now}: {} docked to {} after {wait} ticks", ship.id, crane.id);
                        self.stats.record_dock(wait);
                        observer.on_dock(now, crane.id, ship);
                    }
                }
            }

            if crane.docked_ship().is_some_and(Ship::is_empty) {
                let ship = crane.undock(now)?;
                let service = ship.service_time().unwrap_or(0);
                debug!("{now}: {} left {} after {service} ticks", ship.id, crane.id);
                self.stats.record_undock(service);
                observer.on_undock(now, crane.id, &ship);
            }

            if !crane.is_working() {
                let decision = {
                    let ctx = DispatchContext::new(robots, &self.config.transfer);
                    self.policy.decide(crane, &ctx, &mut self.rng)
                };
                match decision {
                    Decision::Idle => continue,
                    Decision::Assign(a) => {
                        trace!("{now}: {} starts {} ({} ticks) → {:?}", crane.id, a.work, a.duration, a.target);
                        crane.initiate_work(a.work, a.duration, a.target, robots)?;
                    }
                }
            }
            advance_crane(crane, robots, now, &mut self.stats, observer)?;
        }

        // ── Phase 4: queue sample ─────────────────────────────────────────
        self.stats.sample_queue(self.queue.len());
        Ok(())
    }

    fn snapshot(&self, tick: Tick) -> TickSnapshot {
        TickSnapshot {
            tick,
            queue_length: self.queue.len(),
            delivered:    self.stats.containers_transported(),
            busy_cranes:  self.fleet.busy_cranes(),
            busy_robots:  self.fleet.busy_robots(),
            palletized:   self.fleet.palletized(),
        }
    }
}

/// Advance one crane's transfer and report the outcome.
fn advance_crane<O: SimObserver>(
    crane:    &mut Crane,
    robots:   &mut [Robot],
    now:      Tick,
    stats:    &mut RunStats,
    observer: &mut O,
) -> SimResult<()> {
    match crane.continue_work(robots)? {
        WorkOutcome::InProgress => {}
        WorkOutcome::WaitingForRobot => {
            stats.record_stall();
            if let Some(Target::Robot(robot)) = crane.transfer().map(|t| t.target) {
                trace!("{now}: {} waiting on {robot}", crane.id);
                observer.on_stall(now, crane.id, robot);
            }
        }
        WorkOutcome::Completed(work) => observer.on_transfer_complete(now, crane.id, work),
    }
    Ok(())
}
