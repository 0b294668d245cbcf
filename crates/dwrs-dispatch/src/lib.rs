//! `dwrs-dispatch` — deciding what an idle crane does next.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`decision`] | `Decision` (`Idle` / `Assign`), `Assignment`                 |
//! | [`context`]  | `DispatchContext<'a>` — borrowed robot fleet + transfer times |
//! | [`policy`]   | `DispatchPolicy` trait                                        |
//! | [`direct`]   | `DirectFirstPolicy` — ship→robot first, pallet as a buffer    |
//! | [`idle`]     | `IdlePolicy` — never assigns work                             |
//!
//! # Design notes
//!
//! A policy only *reads* the fleet.  It returns an [`Assignment`] and the
//! simulation loop applies it through `Crane::initiate_work`, which is where
//! every invariant is enforced.  A buggy policy therefore surfaces as an
//! `EntityError` from the loop rather than as corrupted state.
//!
//! The robot slice is borrowed per call; policies hold no reference into the
//! fleet between ticks.

pub mod context;
pub mod decision;
pub mod direct;
pub mod idle;
pub mod policy;


pub use context::DispatchContext;
pub use decision::{Assignment, Decision};
pub use direct::DirectFirstPolicy;
pub use idle::IdlePolicy;
pub use policy::DispatchPolicy;
