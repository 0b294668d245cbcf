//! Invariant violations.
//!
//! These are contract errors between the dispatch policy, the cranes and
//! the robots.  A correct policy never triggers one; when one does occur
//! the run is aborted.  `FleetTooLarge` is the one construction-time error.

use dwrs_core::{CraneId, RobotId};
use thiserror::Error;

use crate::{Target, WorkType};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntityError {
    #[error("{0} is already reserved")]
    RobotAlreadyReserved(RobotId),

    #[error("{0} must be reserved before it can start a duty")]
    RobotNotReserved(RobotId),

    #[error("{0} is not hauling")]
    RobotNotHauling(RobotId),

    #[error("{0} is still hauling its previous load")]
    RobotStillHauling(RobotId),

    #[error("{0} is not part of the fleet")]
    UnknownRobot(RobotId),

    #[error("{crane} cannot start {work}: the source is empty")]
    EmptySource {
        crane: CraneId,
        work:  WorkType,
    },

    #[error("pallet of {crane} is full ({capacity} containers)")]
    PalletFull {
        crane:    CraneId,
        capacity: u32,
    },

    #[error("{0} has no ship docked")]
    NoShipDocked(CraneId),

    #[error("{0} already has a ship docked")]
    AlreadyDocked(CraneId),

    #[error("{0} is busy with another transfer")]
    CraneBusy(CraneId),

    #[error("{0} has no transfer in progress")]
    CraneIdle(CraneId),

    #[error("{count} {kind} exceed the id range")]
    FleetTooLarge {
        kind:  &'static str,
        count: usize,
    },

    #[error("{work} cannot deliver to {target:?}")]
    TargetMismatch {
        work:   WorkType,
        target: Target,
    },
}

pub type EntityResult<T> = Result<T, EntityError>;
