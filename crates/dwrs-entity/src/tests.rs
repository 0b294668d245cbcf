//! Unit tests for dwrs-entity.

use dwrs_core::{CraneId, RobotId, ShipId, Tick};

use crate::{Crane, EntityError, Fleet, Robot, RobotState, Ship, ShipQueue, Target, WorkOutcome, WorkType};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn ship(id: u32, containers: u32) -> Ship {
    Ship::new(ShipId(id), Tick(0), containers)
}

fn robots(n: u16, work_time: u32) -> Vec<Robot> {
    (0..n).map(|i| Robot::new(RobotId(i), work_time)).collect()
}

/// Crane 0 with pallet capacity `p` and `containers` on its docked ship.
fn docked_crane(p: u32, containers: u32) -> Crane {
    let mut crane = Crane::new(CraneId(0), p);
    crane.dock(ship(0, containers), Tick(0)).unwrap();
    crane
}

/// Run the crane until it reports something other than `InProgress`.
fn run_to_outcome(crane: &mut Crane, robots: &mut [Robot]) -> WorkOutcome {
    loop {
        match crane.continue_work(robots).unwrap() {
            WorkOutcome::InProgress => continue,
            other => return other,
        }
    }
}

// ── ShipQueue ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod queue_tests {
    use super::*;

    #[test]
    fn fifo_order() {
        let mut q = ShipQueue::new(3);
        assert!(q.add_ship(ship(0, 1)));
        assert!(q.add_ship(ship(1, 1)));
        assert_eq!(q.pop_ship().unwrap().id, ShipId(0));
        assert_eq!(q.pop_ship().unwrap().id, ShipId(1));
        assert!(q.pop_ship().is_none());
    }

    #[test]
    fn full_queue_balks() {
        let mut q = ShipQueue::new(2);
        for i in 0..5 {
            q.add_ship(ship(i, 1));
            assert!(q.len() <= q.max_length());
        }
        assert_eq!(q.len(), 2);
        assert_eq!(q.balk_count(), 3);
        // The retained ships are the first two offered.
        assert_eq!(q.pop_ship().unwrap().id, ShipId(0));
        assert_eq!(q.pop_ship().unwrap().id, ShipId(1));
    }

    #[test]
    fn zero_length_queue_balks_everything() {
        let mut q = ShipQueue::new(0);
        assert!(!q.add_ship(ship(0, 1)));
        assert!(!q.add_ship(ship(1, 1)));
        assert!(q.is_empty());
        assert_eq!(q.balk_count(), 2);
    }
}

// ── Ship ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod ship_tests {
    use super::*;

    #[test]
    fn service_window() {
        let mut crane = Crane::new(CraneId(0), 1);
        let s = Ship::new(ShipId(4), Tick(3), 0);
        assert_eq!(s.wait_time(), None);
        crane.dock(s, Tick(10)).unwrap();
        assert_eq!(crane.docked_ship().unwrap().wait_time(), Some(7));
        let s = crane.undock(Tick(25)).unwrap();
        assert_eq!(s.service_time(), Some(15));
        assert!(!crane.is_docked());
    }

    #[test]
    fn double_dock_rejected() {
        let mut crane = docked_crane(1, 1);
        assert_eq!(crane.dock(ship(1, 1), Tick(0)), Err(EntityError::AlreadyDocked(CraneId(0))));
        assert_eq!(crane.docked_ship().unwrap().id, ShipId(0));
    }

    #[test]
    fn undock_without_ship() {
        let mut crane = Crane::new(CraneId(2), 1);
        assert_eq!(crane.undock(Tick(0)).unwrap_err(), EntityError::NoShipDocked(CraneId(2)));
    }
}

// ── Robot ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod robot_tests {
    use super::*;

    #[test]
    fn full_cycle() {
        let mut r = Robot::new(RobotId(0), 2);
        assert_eq!(r.state(), RobotState::Idle);
        r.connect().unwrap();
        assert_eq!(r.state(), RobotState::Reserved);
        r.initiate_work().unwrap();
        assert_eq!(r.remaining_time(), 2);
        assert!(!r.is_reserved());
        assert!(!r.continue_work().unwrap());
        assert!(r.continue_work().unwrap());
        assert_eq!(r.state(), RobotState::Idle);
    }

    #[test]
    fn second_reservation_rejected() {
        let mut r = Robot::new(RobotId(1), 2);
        r.connect().unwrap();
        assert_eq!(r.connect(), Err(EntityError::RobotAlreadyReserved(RobotId(1))));
    }

    #[test]
    fn reserve_while_hauling_keeps_reservation() {
        let mut r = Robot::new(RobotId(0), 1);
        r.connect().unwrap();
        r.initiate_work().unwrap();
        r.connect().unwrap();
        assert!(r.is_reserved() && r.is_hauling());
        assert_eq!(r.connect(), Err(EntityError::RobotAlreadyReserved(RobotId(0))));
        assert!(r.continue_work().unwrap());
        assert_eq!(r.state(), RobotState::Reserved);
    }

    #[test]
    fn cannot_start_without_reservation() {
        let mut r = Robot::new(RobotId(0), 3);
        assert_eq!(r.initiate_work(), Err(EntityError::RobotNotReserved(RobotId(0))));
        assert_eq!(r.continue_work(), Err(EntityError::RobotNotHauling(RobotId(0))));
    }

    #[test]
    fn zero_duty_runs_one_tick() {
        let mut r = Robot::new(RobotId(0), 0);
        assert_eq!(r.work_time(), 1);
        r.connect().unwrap();
        r.initiate_work().unwrap();
        assert!(r.continue_work().unwrap());
    }
}

// ── Crane ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod crane_tests {
    use super::*;

    #[test]
    fn ship_to_pallet() {
        let mut crane = docked_crane(2, 3);
        let mut rs = robots(1, 1);
        crane.initiate_work(WorkType::ShipToPallet, 3, Target::Pallet, &mut rs).unwrap();
        // Picked up at the start of the transfer.
        assert_eq!(crane.docked_ship().unwrap().containers(), 2);
        assert_eq!(crane.pallet().containers(), 0);

        assert_eq!(crane.continue_work(&mut rs).unwrap(), WorkOutcome::InProgress);
        assert_eq!(crane.continue_work(&mut rs).unwrap(), WorkOutcome::InProgress);
        assert_eq!(
            crane.continue_work(&mut rs).unwrap(),
            WorkOutcome::Completed(WorkType::ShipToPallet)
        );
        assert_eq!(crane.pallet().containers(), 1);
        assert!(!crane.is_working());
    }

    #[test]
    fn ship_to_robot_hands_over() {
        let mut crane = docked_crane(1, 1);
        let mut rs = robots(2, 4);
        crane.initiate_work(WorkType::ShipToRobot, 1, Target::Robot(RobotId(1)), &mut rs).unwrap();
        assert_eq!(rs[1].state(), RobotState::Reserved);
        assert_eq!(
            crane.continue_work(&mut rs).unwrap(),
            WorkOutcome::Completed(WorkType::ShipToRobot)
        );
        assert_eq!(rs[1].state(), RobotState::Hauling { remaining: 4, reserved: false });
        assert!(crane.docked_ship().unwrap().is_empty());
    }

    #[test]
    fn waits_for_hauling_robot() {
        let mut crane = docked_crane(1, 1);
        let mut rs = robots(1, 2);
        // Robot 0 is already carrying a container with 2 ticks left.
        rs[0].connect().unwrap();
        rs[0].initiate_work().unwrap();

        crane.initiate_work(WorkType::ShipToRobot, 1, Target::Robot(RobotId(0)), &mut rs).unwrap();
        assert_eq!(crane.continue_work(&mut rs).unwrap(), WorkOutcome::WaitingForRobot);
        assert_eq!(crane.transfer().unwrap().remaining, 1);

        rs[0].continue_work().unwrap();
        assert_eq!(crane.continue_work(&mut rs).unwrap(), WorkOutcome::WaitingForRobot);
        assert!(rs[0].continue_work().unwrap());
        assert_eq!(rs[0].state(), RobotState::Reserved);

        assert_eq!(
            crane.continue_work(&mut rs).unwrap(),
            WorkOutcome::Completed(WorkType::ShipToRobot)
        );
        assert!(rs[0].is_hauling());
    }

    #[test]
    fn pallet_to_robot_after_undock() {
        let mut crane = docked_crane(2, 1);
        let mut rs = robots(1, 1);
        crane.initiate_work(WorkType::ShipToPallet, 1, Target::Pallet, &mut rs).unwrap();
        run_to_outcome(&mut crane, &mut rs);
        crane.undock(Tick(1)).unwrap();

        crane.initiate_work(WorkType::PalletToRobot, 2, Target::Robot(RobotId(0)), &mut rs).unwrap();
        assert!(crane.pallet().is_empty());
        assert_eq!(run_to_outcome(&mut crane, &mut rs), WorkOutcome::Completed(WorkType::PalletToRobot));
    }

    #[test]
    fn empty_source_rejected_without_side_effects() {
        let mut crane = docked_crane(1, 0);
        let mut rs = robots(1, 1);
        let err = crane
            .initiate_work(WorkType::ShipToRobot, 1, Target::Robot(RobotId(0)), &mut rs)
            .unwrap_err();
        assert_eq!(err, EntityError::EmptySource { crane: CraneId(0), work: WorkType::ShipToRobot });
        assert_eq!(rs[0].state(), RobotState::Idle, "robot must not stay reserved");
        assert!(!crane.is_working());

        let err = crane
            .initiate_work(WorkType::PalletToRobot, 1, Target::Robot(RobotId(0)), &mut rs)
            .unwrap_err();
        assert!(matches!(err, EntityError::EmptySource { .. }));
    }

    #[test]
    fn reserved_robot_rejected_without_side_effects() {
        let mut crane = docked_crane(1, 2);
        let mut rs = robots(1, 1);
        rs[0].connect().unwrap();
        let err = crane
            .initiate_work(WorkType::ShipToRobot, 1, Target::Robot(RobotId(0)), &mut rs)
            .unwrap_err();
        assert_eq!(err, EntityError::RobotAlreadyReserved(RobotId(0)));
        assert_eq!(crane.docked_ship().unwrap().containers(), 2);
    }

    #[test]
    fn target_mismatch() {
        let mut crane = docked_crane(1, 2);
        let mut rs = robots(1, 1);
        assert!(matches!(
            crane.initiate_work(WorkType::ShipToPallet, 1, Target::Robot(RobotId(0)), &mut rs),
            Err(EntityError::TargetMismatch { .. })
        ));
        assert!(matches!(
            crane.initiate_work(WorkType::ShipToRobot, 1, Target::Pallet, &mut rs),
            Err(EntityError::TargetMismatch { .. })
        ));
    }

    #[test]
    fn unknown_robot() {
        let mut crane = docked_crane(1, 2);
        let mut rs = robots(1, 1);
        assert_eq!(
            crane.initiate_work(WorkType::ShipToRobot, 1, Target::Robot(RobotId(5)), &mut rs),
            Err(EntityError::UnknownRobot(RobotId(5)))
        );
    }

    #[test]
    fn busy_crane_rejects_second_transfer() {
        let mut crane = docked_crane(3, 3);
        let mut rs = robots(1, 1);
        crane.initiate_work(WorkType::ShipToPallet, 2, Target::Pallet, &mut rs).unwrap();
        assert_eq!(
            crane.initiate_work(WorkType::ShipToPallet, 2, Target::Pallet, &mut rs),
            Err(EntityError::CraneBusy(CraneId(0)))
        );
    }

    #[test]
    fn idle_crane_cannot_continue() {
        let mut crane = Crane::new(CraneId(1), 1);
        assert_eq!(crane.continue_work(&mut []), Err(EntityError::CraneIdle(CraneId(1))));
    }

    #[test]
    fn pallet_overflow_is_reported() {
        let mut crane = docked_crane(1, 3);
        let mut rs = robots(1, 1);
        crane.initiate_work(WorkType::ShipToPallet, 1, Target::Pallet, &mut rs).unwrap();
        run_to_outcome(&mut crane, &mut rs);
        crane.initiate_work(WorkType::ShipToPallet, 1, Target::Pallet, &mut rs).unwrap();
        assert_eq!(
            crane.continue_work(&mut rs),
            Err(EntityError::PalletFull { crane: CraneId(0), capacity: 1 })
        );
        assert_eq!(crane.pallet().containers(), 1);
    }

    #[test]
    fn zero_duration_takes_one_tick() {
        let mut crane = docked_crane(1, 1);
        let mut rs = robots(1, 1);
        crane.initiate_work(WorkType::ShipToPallet, 0, Target::Pallet, &mut rs).unwrap();
        assert_eq!(
            crane.continue_work(&mut rs).unwrap(),
            WorkOutcome::Completed(WorkType::ShipToPallet)
        );
    }
}

// ── Fleet ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod fleet_tests {
    use super::*;

    #[test]
    fn builds_indexed_arena() {
        let fleet = Fleet::new(2, 5, [3, 4, 5]).unwrap();
        assert_eq!(fleet.cranes.len(), 2);
        assert_eq!(fleet.robots.len(), 3);
        assert_eq!(fleet.crane(CraneId(1)).unwrap().pallet().capacity(), 5);
        assert_eq!(fleet.robot(RobotId(2)).unwrap().work_time(), 5);
        assert!(fleet.robot(RobotId(3)).is_none());
    }

    #[test]
    fn advance_robots_counts_deliveries() {
        let mut fleet = Fleet::new(1, 1, [1, 2]).unwrap();
        for r in fleet.robots.iter_mut() {
            r.connect().unwrap();
            r.initiate_work().unwrap();
        }
        assert_eq!(fleet.busy_robots(), 2);
        assert_eq!(fleet.advance_robots().unwrap(), 1);
        assert_eq!(fleet.advance_robots().unwrap(), 1);
        assert_eq!(fleet.advance_robots().unwrap(), 0);
        assert_eq!(fleet.busy_robots(), 0);
    }

    #[test]
    fn rejects_counts_beyond_id_range() {
        let too_many = usize::from(u16::MAX) + 2;

        let err = Fleet::new(too_many, 1, []).err().unwrap();
        assert_eq!(err, EntityError::FleetTooLarge { kind: "cranes", count: too_many });

        let err = Fleet::new(1, 1, std::iter::repeat_n(1, too_many)).err().unwrap();
        assert_eq!(err, EntityError::FleetTooLarge { kind: "robots", count: too_many });

        let fleet = Fleet::new(1, 1, std::iter::repeat_n(1, usize::from(u16::MAX) + 1)).unwrap();
        assert_eq!(fleet.robots.last().unwrap().id, RobotId(u16::MAX));
    }
}
