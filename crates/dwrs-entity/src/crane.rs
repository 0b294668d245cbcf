//! Cranes.
//!
//! A crane moves one container at a time along one of three legs:
//!
//! | `WorkType`       | Source       | Target            |
//! |------------------|--------------|-------------------|
//! | `ShipToPallet`   | docked ship  | own pallet        |
//! | `PalletToRobot`  | own pallet   | reserved robot    |
//! | `ShipToRobot`    | docked ship  | reserved robot    |
//!
//! The container leaves its source when the transfer starts and reaches its
//! target when the timer runs out.  A robot-bound transfer cannot finish
//! while the robot is still hauling a previous load; the crane then holds
//! the container one more tick and tries again.

use std::fmt;

use dwrs_core::{CraneId, RobotId, Tick};

use crate::{EntityError, EntityResult, Pallet, Robot, Ship};

// ── Transfer types ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkType {
    ShipToPallet,
    PalletToRobot,
    ShipToRobot,
}

impl WorkType {
    /// `true` if the container is picked up from the docked ship.
    #[inline]
    pub fn from_ship(self) -> bool {
        !matches!(self, WorkType::PalletToRobot)
    }

    /// Short parameter code (`CSP`, `CPT`, `CST`).
    pub fn code(self) -> &'static str {
        match self {
            WorkType::ShipToPallet => "CSP",
            WorkType::PalletToRobot => "CPT",
            WorkType::ShipToRobot => "CST",
        }
    }
}

impl fmt::Display for WorkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Where a transfer delivers its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// The crane's own pallet.
    Pallet,
    Robot(RobotId),
}

/// A transfer in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub work:      WorkType,
    pub target:    Target,
    /// Ticks the transfer was assigned.
    pub duration:  u32,
    /// Ticks until the container reaches its target.
    pub remaining: u32,
}

/// Result of advancing a crane by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkOutcome {
    InProgress,
    /// The timer ran out but the target robot is still hauling.
    WaitingForRobot,
    Completed(WorkType),
}

// ── Crane ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Crane {
    pub id:   CraneId,
    pallet:   Pallet,
    berth:    Option<Ship>,
    transfer: Option<Transfer>,
}

impl Crane {
    pub fn new(id: CraneId, pallet_capacity: u32) -> Self {
        Self {
            id,
            pallet: Pallet::new(pallet_capacity),
            berth: None,
            transfer: None,
        }
    }

    #[inline]
    pub fn pallet(&self) -> &Pallet {
        &self.pallet
    }

    #[inline]
    pub fn docked_ship(&self) -> Option<&Ship> {
        self.berth.as_ref()
    }

    #[inline]
    pub fn transfer(&self) -> Option<&Transfer> {
        self.transfer.as_ref()
    }

    #[inline]
    pub fn is_docked(&self) -> bool {
        self.berth.is_some()
    }

    #[inline]
    pub fn is_working(&self) -> bool {
        self.transfer.is_some()
    }

    /// `true` if the docked ship still has cargo to unload.
    #[inline]
    pub fn has_cargo_aboard(&self) -> bool {
        self.berth.as_ref().is_some_and(|s| !s.is_empty())
    }

    // ── Docking ───────────────────────────────────────────────────────────

    /// Attach `ship` and record the start of its service.
    pub fn dock(&mut self, mut ship: Ship, now: Tick) -> EntityResult<()> {
        if self.berth.is_some() {
            return Err(EntityError::AlreadyDocked(self.id));
        }
        ship.dock(now);
        self.berth = Some(ship);
        Ok(())
    }

    /// Detach the docked ship and record the end of its service.
    pub fn undock(&mut self, now: Tick) -> EntityResult<Ship> {
        let mut ship = self.berth.take().ok_or(EntityError::NoShipDocked(self.id))?;
        ship.undock(now);
        Ok(ship)
    }

    // ── Transfers ─────────────────────────────────────────────────────────

    /// Start moving one container along `work` to `target`.
    ///
    /// The container is removed from its source immediately.  For robot
    /// targets the robot is reserved.  Nothing is mutated if any
    /// precondition fails.  A zero-tick duration is executed as one tick.
    pub fn initiate_work(
        &mut self,
        work:     WorkType,
        duration: u32,
        target:   Target,
        robots:   &mut [Robot],
    ) -> EntityResult<()> {
        if self.transfer.is_some() {
            return Err(EntityError::CraneBusy(self.id));
        }

        let robot = match (work, target) {
            (WorkType::ShipToPallet, Target::Pallet) => None,
            (WorkType::PalletToRobot | WorkType::ShipToRobot, Target::Robot(id)) => Some(id),
            _ => return Err(EntityError::TargetMismatch { work, target }),
        };

        let source_empty = if work.from_ship() {
            self.berth.as_ref().ok_or(EntityError::NoShipDocked(self.id))?.is_empty()
        } else {
            self.pallet.is_empty()
        };
        if source_empty {
            return Err(EntityError::EmptySource { crane: self.id, work });
        }

        if let Some(id) = robot {
            robots
                .get_mut(id.index())
                .ok_or(EntityError::UnknownRobot(id))?
                .connect()?;
        }

        let picked = match self.berth.as_mut() {
            Some(ship) if work.from_ship() => ship.take_container(),
            _ => self.pallet.unload(),
        };
        debug_assert!(picked, "source emptiness checked above");

        let duration = duration.max(1);
        self.transfer = Some(Transfer { work, target, duration, remaining: duration });
        Ok(())
    }

    /// Advance the current transfer by one tick.
    pub fn continue_work(&mut self, robots: &mut [Robot]) -> EntityResult<WorkOutcome> {
        let transfer = self.transfer.as_mut().ok_or(EntityError::CraneIdle(self.id))?;

        transfer.remaining = transfer.remaining.saturating_sub(1);
        if transfer.remaining > 0 {
            return Ok(WorkOutcome::InProgress);
        }

        match transfer.target {
            Target::Pallet => {
                if !self.pallet.load() {
                    return Err(EntityError::PalletFull {
                        crane:    self.id,
                        capacity: self.pallet.capacity(),
                    });
                }
            }
            Target::Robot(id) => {
                let robot = robots.get_mut(id.index()).ok_or(EntityError::UnknownRobot(id))?;
                if !robot.is_reserved() {
                    return Err(EntityError::RobotNotReserved(id));
                }
                if robot.is_hauling() {
                    transfer.remaining = 1;
                    return Ok(WorkOutcome::WaitingForRobot);
                }
                robot.initiate_work()?;
            }
        }

        let work = transfer.work;
        self.transfer = None;
        Ok(WorkOutcome::Completed(work))
    }
}
