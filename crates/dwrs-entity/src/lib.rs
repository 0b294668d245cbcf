//! `dwrs-entity` — the dock's entities and their state machines.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! |-------------|----------------------------------------------------------------|
//! | [`ship`]    | `Ship` — arrival, remaining cargo, service window              |
//! | [`queue`]   | `ShipQueue` — bounded FIFO with a balk counter                 |
//! | [`pallet`]  | `Pallet` — bounded buffer owned by one crane                   |
//! | [`robot`]   | `Robot`, `RobotState` — Idle → Reserved → Hauling → Idle       |
//! | [`crane`]   | `Crane`, `WorkType`, `Target`, `WorkOutcome`                   |
//! | [`fleet`]   | `Fleet` — index arena owning every crane and robot             |
//! | [`error`]   | `EntityError`, `EntityResult<T>`                               |
//!
//! # Ownership
//!
//! A crane owns its pallet and, while docked, the ship it is servicing.
//! Robots live in the [`Fleet`] arena and are addressed by `RobotId`; a
//! crane only ever holds the id of the robot it has reserved.  Transition
//! functions take the robot slice as a parameter, so there is never more
//! than one live mutable path to a robot.
//!
//! Every transition that would break an invariant returns an
//! [`EntityError`] instead of mutating state.

pub mod crane;
pub mod error;
pub mod fleet;
pub mod pallet;
pub mod queue;
pub mod robot;
pub mod ship;

#[cfg(test)]
mod tests;

pub use crane::{Crane, Target, Transfer, WorkOutcome, WorkType};
pub use error::{EntityError, EntityResult};
pub use fleet::Fleet;
pub use pallet::Pallet;
pub use queue::ShipQueue;
pub use robot::{Robot, RobotState};
pub use ship::Ship;
