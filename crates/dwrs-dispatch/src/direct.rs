//! `DirectFirstPolicy` — prefer ship → robot, use the pallet as a buffer.
//!
//! Rules, first match wins:
//!
//! | # | Condition                                                | Assignment      |
//! |---|----------------------------------------------------------|-----------------|
//! | 1 | ship docked with cargo, a robot is available (CST)       | `ShipToRobot`   |
//! | 2 | ship docked with cargo, pallet has room                  | `ShipToPallet`  |
//! | 3 | no cargo aboard, pallet non-empty, robot available (CPT) | `PalletToRobot` |
//! | 4 | otherwise                                                | `Idle`          |
//!
//! A robot is *available* when it is not reserved and is either idle or will
//! finish its current duty within the 95th-percentile estimate of the leg
//! that would feed it.  Robots are scanned in `RobotId` order.

use dwrs_core::{RobotId, TrialRng, WorkTime};
use dwrs_entity::{Crane, Robot, Target, WorkType};

use crate::{Assignment, Decision, DispatchContext, DispatchPolicy};

#[derive(Debug, Default, Clone, Copy)]
pub struct DirectFirstPolicy;

impl DirectFirstPolicy {
    /// First robot in index order that can take a container fed by `leg`.
    pub fn available_robot(robots: &[Robot], leg: &WorkTime) -> Option<RobotId> {
        let estimate = leg.estimate();
        robots
            .iter()
            .find(|r| !r.is_reserved() && (!r.is_hauling() || f64::from(r.remaining_time()) <= estimate))
            .map(|r| r.id)
    }
}

impl DispatchPolicy for DirectFirstPolicy {
    fn decide(&self, crane: &Crane, ctx: &DispatchContext<'_>, rng: &mut TrialRng) -> Decision {
        let transfer = ctx.transfer;

        if crane.has_cargo_aboard() {
            if let Some(robot) = Self::available_robot(ctx.robots, &transfer.ship_to_robot) {
                return Decision::Assign(Assignment {
                    work:     WorkType::ShipToRobot,
                    duration: transfer.ship_to_robot.sample(rng),
                    target:   Target::Robot(robot),
                });
            }
            if crane.pallet().has_room() {
                return Decision::Assign(Assignment {
                    work:     WorkType::ShipToPallet,
                    duration: transfer.ship_to_pallet.sample(rng),
                    target:   Target::Pallet,
                });
            }
            return Decision::Idle;
        }

        if !crane.pallet().is_empty() {
            if let Some(robot) = Self::available_robot(ctx.robots, &transfer.pallet_to_robot) {
                return Decision::Assign(Assignment {
                    work:     WorkType::PalletToRobot,
                    duration: transfer.pallet_to_robot.sample(rng),
                    target:   Target::Robot(robot),
                });
            }
        }

        Decision::Idle
    }
}
