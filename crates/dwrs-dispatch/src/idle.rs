//! A policy that never assigns work.

use dwrs_core::TrialRng;
use dwrs_entity::Crane;

use crate::{Decision, DispatchContext, DispatchPolicy};

/// A [`DispatchPolicy`] that always returns [`Decision::Idle`].
///
/// Useful in tests: ships dock and wait forever, which isolates arrivals,
/// queueing and balking from the transfer logic.
pub struct IdlePolicy;

impl DispatchPolicy for IdlePolicy {
    fn decide(&self, _crane: &Crane, _ctx: &DispatchContext<'_>, _rng: &mut TrialRng) -> Decision {
        Decision::Idle
    }
}
