//! Transport robots.
//!
//! # State machine
//!
//! ```text
//!            connect()            initiate_work()
//!   Idle ──────────────▶ Reserved ───────────────▶ Hauling { reserved: false }
//!    ▲                      ▲                           │          │
//!    │ continue_work() = 0  │ continue_work() = 0       │ connect()│
//!    └──────────────────────┼───────────────────────────┘          ▼
//!                           └────────────────────── Hauling { reserved: true }
//! ```
//!
//! A crane reserves a robot when it starts a robot-bound transfer and hands
//! the container over (`initiate_work`) when the transfer completes.  A
//! robot may be reserved while it is still hauling its previous load; it
//! keeps the reservation when that duty ends.  Starting a duty releases the
//! reservation, so `Hauling { reserved: false }` is an ordinary state.

use dwrs_core::RobotId;

use crate::{EntityError, EntityResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RobotState {
    /// Free and unreserved.
    Idle,
    /// Committed to an inbound delivery that has not been handed over yet.
    Reserved,
    /// Carrying a container to the city.
    Hauling { remaining: u32, reserved: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Robot {
    pub id:    RobotId,
    work_time: u32,
    state:     RobotState,
}

impl Robot {
    /// A zero-tick duty is executed as one tick.
    pub fn new(id: RobotId, work_time: u32) -> Self {
        Self { id, work_time: work_time.max(1), state: RobotState::Idle }
    }

    #[inline]
    pub fn state(&self) -> RobotState {
        self.state
    }

    /// Ticks one duty takes.
    #[inline]
    pub fn work_time(&self) -> u32 {
        self.work_time
    }

    /// `true` while a crane holds a reservation on this robot.
    #[inline]
    pub fn is_reserved(&self) -> bool {
        matches!(self.state, RobotState::Reserved | RobotState::Hauling { reserved: true, .. })
    }

    #[inline]
    pub fn is_hauling(&self) -> bool {
        matches!(self.state, RobotState::Hauling { .. })
    }

    /// Ticks left on the current duty; `0` when not hauling.
    #[inline]
    pub fn remaining_time(&self) -> u32 {
        match self.state {
            RobotState::Hauling { remaining, .. } => remaining,
            _ => 0,
        }
    }

    /// Reserve the robot for an inbound delivery.
    pub fn connect(&mut self) -> EntityResult<()> {
        self.state = match self.state {
            RobotState::Idle => RobotState::Reserved,
            RobotState::Hauling { remaining, reserved: false } => {
                RobotState::Hauling { remaining, reserved: true }
            }
            RobotState::Reserved | RobotState::Hauling { reserved: true, .. } => {
                return Err(EntityError::RobotAlreadyReserved(self.id));
            }
        };
        Ok(())
    }

    /// Accept the reserved container and start hauling it.
    pub fn initiate_work(&mut self) -> EntityResult<()> {
        match self.state {
            RobotState::Reserved => {
                self.state = RobotState::Hauling { remaining: self.work_time, reserved: false };
                Ok(())
            }
            RobotState::Idle => Err(EntityError::RobotNotReserved(self.id)),
            RobotState::Hauling { .. } => Err(EntityError::RobotStillHauling(self.id)),
        }
    }

    /// Advance the current duty by one tick.
    ///
    /// Returns `true` when the container reaches the city this tick.
    pub fn continue_work(&mut self) -> EntityResult<bool> {
        let RobotState::Hauling { remaining, reserved } = self.state else {
            return Err(EntityError::RobotNotHauling(self.id));
        };
        let remaining = remaining.saturating_sub(1);
        if remaining > 0 {
            self.state = RobotState::Hauling { remaining, reserved };
            return Ok(false);
        }
        self.state = if reserved { RobotState::Reserved } else { RobotState::Idle };
        Ok(true)
    }
}
