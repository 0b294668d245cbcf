//! Integration tests for dwrs-sim.

use dwrs_core::{CraneId, DockConfig, Mode, RobotId, ShipId, Tick, TransferTimes, TrialRng, WorkTime};
use dwrs_dispatch::{DirectFirstPolicy, IdlePolicy};
use dwrs_entity::{Ship, WorkType};

use crate::{
    ArrivalSchedule, NoopObserver, RunSummary, SimBuilder, SimError, SimObserver, TickSnapshot,
    TrialAggregate,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// One crane, one robot, `K = 2`, every duration 1 tick, no arrivals of its
/// own (`A_MEAN` beyond any horizon used here).
fn test_config(horizon: u64) -> DockConfig {
    DockConfig {
        horizon,
        trials:          1,
        queue_capacity:  5,
        cranes:          1,
        robots:          1,
        pallet_capacity: 5,
        arrival_mean:    10_000,
        robot_duty:      WorkTime::fixed(1),
        cargo:           WorkTime::fixed(2),
        transfer:        TransferTimes::fixed(1, 1, 1),
        mode:            Mode::Deterministic,
        seed:            7,
    }
}

fn stochastic_config(horizon: u64) -> DockConfig {
    DockConfig {
        horizon,
        cranes:       2,
        robots:       3,
        arrival_mean: 30,
        robot_duty:   WorkTime::exponential(6.0).unwrap(),
        cargo:        WorkTime::exponential(8.0).unwrap(),
        transfer: TransferTimes {
            ship_to_pallet:  WorkTime::exponential(3.0).unwrap(),
            pallet_to_robot: WorkTime::exponential(2.0).unwrap(),
            ship_to_robot:   WorkTime::exponential(4.0).unwrap(),
        },
        mode: Mode::Stochastic,
        ..test_config(horizon)
    }
}

fn run_scripted(config: DockConfig, ticks: &[u64]) -> (RunSummary, Recorder) {
    let arrivals = ArrivalSchedule::from_ticks(config.horizon, ticks.iter().copied());
    let mut sim = SimBuilder::new(config, DirectFirstPolicy)
        .arrivals(arrivals)
        .build()
        .unwrap();
    let mut rec = Recorder::default();
    let summary = sim.run(&mut rec).unwrap();
    (summary, rec)
}

/// Observer that records every event.
#[derive(Default)]
struct Recorder {
    tick_starts: u64,
    arrivals:    Vec<(ShipId, u32, bool)>,
    docks:       Vec<(Tick, CraneId, ShipId)>,
    undocks:     Vec<(Tick, CraneId, Ship)>,
    completions: Vec<(Tick, CraneId, WorkType)>,
    stalls:      Vec<(Tick, CraneId, RobotId)>,
    snapshots:   Vec<TickSnapshot>,
    end:         Option<(Tick, RunSummary)>,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, _tick: Tick) {
        self.tick_starts += 1;
    }
    fn on_arrival(&mut self, _tick: Tick, ship: ShipId, containers: u32, balked: bool) {
        self.arrivals.push((ship, containers, balked));
    }
    fn on_dock(&mut self, tick: Tick, crane: CraneId, ship: &Ship) {
        self.docks.push((tick, crane, ship.id));
    }
    fn on_undock(&mut self, tick: Tick, crane: CraneId, ship: &Ship) {
        self.undocks.push((tick, crane, ship.clone()));
    }
    fn on_transfer_complete(&mut self, tick: Tick, crane: CraneId, work: WorkType) {
        self.completions.push((tick, crane, work));
    }
    fn on_stall(&mut self, tick: Tick, crane: CraneId, robot: RobotId) {
        self.stalls.push((tick, crane, robot));
    }
    fn on_tick_end(&mut self, snapshot: &TickSnapshot) {
        self.snapshots.push(*snapshot);
    }
    fn on_sim_end(&mut self, final_tick: Tick, summary: &RunSummary) {
        self.end = Some((final_tick, summary.clone()));
    }
}

impl Recorder {
    fn from_ship_completions(&self) -> usize {
        self.completions.iter().filter(|(_, _, w)| w.from_ship()).count()
    }
}

// ── ArrivalSchedule ───────────────────────────────────────────────────────────

#[cfg(test)]
mod arrival_tests {
    use super::*;

    #[test]
    fn periodic_starts_at_mean() {
        let s = ArrivalSchedule::periodic(10, 3);
        let ticks: Vec<Tick> = s.ticks().collect();
        assert_eq!(ticks, vec![Tick(3), Tick(6), Tick(9)]);
        assert_eq!(s.total(), 3);
        assert_eq!(s.horizon(), 10);
    }

    #[test]
    fn periodic_mean_beyond_horizon_is_empty() {
        assert_eq!(ArrivalSchedule::periodic(10, 10).total(), 0);
    }

    #[test]
    fn from_ticks_counts_repeats_and_drops_late() {
        let s = ArrivalSchedule::from_ticks(5, [0, 0, 2, 5, 99]);
        assert_eq!(s.arrivals_at(Tick(0)), 2);
        assert_eq!(s.arrivals_at(Tick(2)), 1);
        assert_eq!(s.arrivals_at(Tick(50)), 0);
        assert_eq!(s.total(), 3);
    }

    #[test]
    fn stochastic_rate_is_plausible() {
        let mut rng = TrialRng::new(3);
        let s = ArrivalSchedule::stochastic(100_000, 10.0, &mut rng).unwrap();
        let n = s.total();
        assert!((9_000..=11_000).contains(&n), "got {n} arrivals");
    }

    #[test]
    fn stochastic_is_reproducible() {
        let a = ArrivalSchedule::stochastic(1_000, 7.0, &mut TrialRng::new(11)).unwrap();
        let b = ArrivalSchedule::stochastic(1_000, 7.0, &mut TrialRng::new(11)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn for_config_follows_mode() {
        let mut config = test_config(100);
        config.arrival_mean = 25;
        let s = ArrivalSchedule::for_config(&config, &mut TrialRng::new(0)).unwrap();
        assert_eq!(s, ArrivalSchedule::periodic(100, 25));
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_defaults() {
        let sim = SimBuilder::new(test_config(10), DirectFirstPolicy).build().unwrap();
        assert_eq!(sim.fleet.cranes.len(), 1);
        assert_eq!(sim.fleet.robots.len(), 1);
        assert_eq!(sim.arrivals.horizon(), 10);
        assert_eq!(sim.now, Tick(0));
        assert!(!sim.is_finished());
    }

    #[test]
    fn arrival_horizon_mismatch_errors() {
        let result = SimBuilder::new(test_config(10), DirectFirstPolicy)
            .arrivals(ArrivalSchedule::empty(9))
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn robot_work_time_count_mismatch_errors() {
        let result = SimBuilder::new(test_config(10), DirectFirstPolicy)
            .robot_work_times(vec![1, 2])
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn invalid_config_rejected() {
        let mut config = test_config(10);
        config.cranes = 0;
        let result = SimBuilder::new(config, DirectFirstPolicy).build();
        assert!(matches!(result, Err(SimError::Core(_))));
    }

    #[test]
    fn robots_sample_duty_times() {
        let mut config = test_config(10);
        config.robots = 4;
        config.robot_duty = WorkTime::fixed(6);
        let sim = SimBuilder::new(config, DirectFirstPolicy).build().unwrap();
        assert!(sim.fleet.robots.iter().all(|r| r.work_time() == 6));
    }

    #[test]
    fn explicit_robot_work_times() {
        let mut config = test_config(10);
        config.robots = 2;
        let sim = SimBuilder::new(config, DirectFirstPolicy)
            .robot_work_times(vec![3, 8])
            .build()
            .unwrap();
        assert_eq!(sim.fleet.robots[1].work_time(), 8);
    }
}

// ── Basic run ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn runs_to_horizon() {
        let mut sim = SimBuilder::new(test_config(10), DirectFirstPolicy).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(sim.now, Tick(10));
        assert!(sim.is_finished());
        assert_eq!(rec.tick_starts, 10);
        assert_eq!(rec.snapshots.len(), 10);
        assert_eq!(rec.end.map(|(t, _)| t), Some(Tick(10)));
    }

    #[test]
    fn run_ticks_advances_clock() {
        let mut sim = SimBuilder::new(test_config(100), DirectFirstPolicy).build().unwrap();
        sim.run_ticks(5, &mut NoopObserver).unwrap();
        assert_eq!(sim.now, Tick(5));
        sim.run_ticks(3, &mut NoopObserver).unwrap();
        assert_eq!(sim.now, Tick(8));
    }

    #[test]
    fn empty_run_summary() {
        let mut sim = SimBuilder::new(test_config(10), DirectFirstPolicy).build().unwrap();
        let s = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(s.mean_service_time, None);
        assert_eq!(s.mean_queue_wait_time, None);
        assert_eq!(s.mean_queue_length, 0.0);
        assert_eq!(s.ships_arrived, 0);
    }

    #[test]
    fn ship_id_overflow_aborts_run() {
        let config = test_config(5);
        let arrivals = ArrivalSchedule::from_ticks(5, [2]);
        let mut sim = SimBuilder::new(config, DirectFirstPolicy).arrivals(arrivals).build().unwrap();
        sim.next_ship = u32::MAX;

        sim.run_ticks(2, &mut NoopObserver).unwrap();
        let err = sim.run_ticks(1, &mut NoopObserver).unwrap_err();
        assert!(matches!(err, SimError::ShipIdsExhausted));
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn minimal_single_ship() {
        let (s, rec) = run_scripted(test_config(20), &[0]);
        assert_eq!(s.ships_serviced, 1);
        assert_eq!(s.containers_transported, 2);
        // Docked at 0; two direct transfers at ticks 0 and 1; undocked at 2.
        assert_eq!(s.mean_service_time, Some(2.0));
        assert_eq!(s.mean_queue_wait_time, Some(0.0));
        assert_eq!(rec.docks, vec![(Tick(0), CraneId(0), ShipId(0))]);
        assert_eq!(rec.undocks[0].0, Tick(2));
        assert!(rec.completions.iter().all(|(_, _, w)| *w == WorkType::ShipToRobot));
        assert_eq!(s.crane_stall_ticks, 0);
    }

    #[test]
    fn zero_length_queue_balks_all() {
        let mut config = test_config(10);
        config.queue_capacity = 0;
        let (s, rec) = run_scripted(config, &[0, 0]);
        assert_eq!(s.ships_arrived, 2);
        assert_eq!(s.ships_balked, 2);
        assert_eq!(s.ships_serviced, 0);
        assert!(rec.arrivals.iter().all(|&(_, _, balked)| balked));
    }

    #[test]
    fn one_slot_queue_keeps_first() {
        let mut config = test_config(10);
        config.queue_capacity = 1;
        let (s, rec) = run_scripted(config, &[0, 0]);
        assert_eq!(s.ships_balked, 1);
        assert_eq!(rec.arrivals[0], (ShipId(0), 2, false));
        assert_eq!(rec.arrivals[1], (ShipId(1), 2, true));
        assert_eq!(s.ships_serviced, 1);
    }

    #[test]
    fn robot_contention_falls_back_to_pallet() {
        let mut config = test_config(40);
        config.cranes = 2;
        config.robot_duty = WorkTime::fixed(5);
        config.transfer = TransferTimes::fixed(1, 1, 3);
        let (s, rec) = run_scripted(config, &[0, 0]);

        let first = |crane: CraneId| rec.completions.iter().find(|(_, c, _)| *c == crane).map(|&(_, _, w)| w);
        assert_eq!(first(CraneId(0)), Some(WorkType::ShipToRobot));
        assert_eq!(first(CraneId(1)), Some(WorkType::ShipToPallet));
        assert_eq!(s.ships_serviced, 2);
        assert_eq!(s.containers_transported, 4);
    }

    #[test]
    fn second_ship_waits_for_berth() {
        let mut config = test_config(10);
        config.cargo = WorkTime::fixed(1);
        let (s, rec) = run_scripted(config, &[0, 0]);
        // Ship 0 leaves at tick 1; the berth is refilled at tick 2.
        assert_eq!(rec.docks[1], (Tick(2), CraneId(0), ShipId(1)));
        assert_eq!(s.mean_queue_wait_time, Some(1.0));
        assert_eq!(s.mean_service_time, Some(1.0));
        assert!((s.mean_queue_length - 0.2).abs() < 1e-12);
    }

    #[test]
    fn empty_ship_docks_and_undocks_same_tick() {
        let mut config = test_config(5);
        config.cargo = WorkTime::fixed(0);
        let (s, rec) = run_scripted(config, &[1]);
        assert_eq!(rec.undocks[0].0, Tick(1));
        assert_eq!(s.mean_service_time, Some(0.0));
        assert_eq!(s.ships_serviced, 1);
    }

    #[test]
    fn crane_stalls_on_hauling_robot() {
        let mut config = test_config(6);
        config.cargo = WorkTime::fixed(3);
        config.robot_duty = WorkTime::fixed(5);
        let (s, rec) = run_scripted(config, &[0]);
        // One direct transfer at 0, two pallet loads, then a pallet → robot
        // hand-off assigned at 4 that waits for the robot to finish at 5.
        assert_eq!(s.crane_stall_ticks, 1);
        assert_eq!(rec.stalls, vec![(Tick(4), CraneId(0), RobotId(0))]);
        assert_eq!(rec.completions.last(), Some(&(Tick(5), CraneId(0), WorkType::PalletToRobot)));
    }
}

// ── Invariants ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod invariant_tests {
    use super::*;

    #[test]
    fn queue_never_exceeds_bound() {
        let mut config = test_config(10);
        config.queue_capacity = 3;
        let arrivals = ArrivalSchedule::from_ticks(10, 0..10);
        let mut sim = SimBuilder::new(config, IdlePolicy).arrivals(arrivals).build().unwrap();
        let mut rec = Recorder::default();
        let s = sim.run(&mut rec).unwrap();

        assert!(rec.snapshots.iter().all(|snap| snap.queue_length <= 3));
        // One ship holds the berth forever; three wait; the rest balk.
        assert_eq!(s.ships_arrived, 10);
        assert_eq!(s.ships_balked, 6);
        assert_eq!(sim.queue.len(), 3);
    }

    #[test]
    fn containers_are_conserved() {
        let mut config = test_config(200);
        config.cranes = 2;
        config.robots = 2;
        config.arrival_mean = 20;
        config.cargo = WorkTime::fixed(3);
        config.robot_duty = WorkTime::fixed(4);
        config.transfer = TransferTimes::fixed(2, 1, 2);
        let mut sim = SimBuilder::new(config, DirectFirstPolicy).build().unwrap();
        let mut rec = Recorder::default();
        let s = sim.run(&mut rec).unwrap();

        assert_eq!(s.ships_arrived, 9);
        assert_eq!(s.ships_serviced, 9);
        let cargo: u32 = rec.undocks.iter().map(|(_, _, ship)| ship.initial_containers).sum();
        assert_eq!(rec.from_ship_completions() as u32, cargo);
        assert_eq!(s.containers_transported, u64::from(cargo));
        for (_, _, ship) in &rec.undocks {
            assert_eq!(ship.containers(), 0);
        }
    }

    #[test]
    fn pallets_stay_within_capacity() {
        let mut config = stochastic_config(2_000);
        config.pallet_capacity = 2;
        let mut sim = SimBuilder::new(config, DirectFirstPolicy).build().unwrap();
        for _ in 0..2_000 {
            sim.run_ticks(1, &mut NoopObserver).unwrap();
            for crane in &sim.fleet.cranes {
                assert!(crane.pallet().containers() <= 2);
            }
            for robot in &sim.fleet.robots {
                assert!(robot.work_time() >= 1);
            }
        }
    }

    #[test]
    fn deterministic_runs_are_identical() {
        let mut config = test_config(500);
        config.arrival_mean = 7;
        config.cranes = 2;
        let a = SimBuilder::new(config.clone(), DirectFirstPolicy).build().unwrap().run(&mut NoopObserver).unwrap();
        let b = SimBuilder::new(config, DirectFirstPolicy).build().unwrap().run(&mut NoopObserver).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn stochastic_runs_reproduce_from_seed() {
        let run = |trial| {
            SimBuilder::new(stochastic_config(1_440), DirectFirstPolicy)
                .trial(trial)
                .build()
                .unwrap()
                .run(&mut NoopObserver)
                .unwrap()
        };
        assert_eq!(run(4), run(4));
    }
}

// ── Trials ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod trial_tests {
    use super::*;
    use crate::{run_trial, run_trials, MetricStat};

    #[test]
    fn batch_matches_individual_trials() {
        let config = stochastic_config(720);
        let batch = run_trials(&config, 4, DirectFirstPolicy).unwrap();
        assert_eq!(batch.len(), 4);
        for (i, summary) in batch.iter().enumerate() {
            assert_eq!(*summary, run_trial(&config, i as u64, DirectFirstPolicy).unwrap());
        }
    }

    #[test]
    fn deterministic_trials_agree() {
        let mut config = test_config(300);
        config.arrival_mean = 9;
        let batch = run_trials(&config, 3, DirectFirstPolicy).unwrap();
        assert!(batch.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn metric_stat() {
        let s = MetricStat::from_values([2.0, 4.0, 6.0]).unwrap();
        assert_eq!(s.mean, 4.0);
        assert!((s.std_dev - 2.0).abs() < 1e-12);
        assert_eq!(s.count, 3);
        assert_eq!(MetricStat::from_values([5.0]).unwrap().std_dev, 0.0);
        assert!(MetricStat::from_values(std::iter::empty()).is_none());
    }

    #[test]
    fn aggregate_skips_undefined_means() {
        let a = RunSummary { mean_service_time: Some(10.0), containers_transported: 4, ..RunSummary::default() };
        let b = RunSummary { mean_service_time: None, containers_transported: 6, ..RunSummary::default() };
        let agg = TrialAggregate::from_summaries(&[a, b]);
        assert_eq!(agg.trials, 2);
        assert_eq!(agg.service_time.unwrap().count, 1);
        assert_eq!(agg.containers_transported.unwrap().mean, 5.0);
        assert!(agg.queue_wait_time.is_none());
    }
}
