//! The `DispatchPolicy` trait — the extension point for crane scheduling.

use std::sync::Arc;

use dwrs_core::TrialRng;
use dwrs_entity::Crane;

use crate::{Decision, DispatchContext};

/// Pluggable crane scheduling.
///
/// Called once per tick for every crane without a transfer in progress.
/// Durations must be drawn from `rng` so a run stays reproducible from its
/// seed.
///
/// # Thread safety
///
/// A single policy value is shared by every trial of a batch, and with the
/// `parallel` feature of dwrs-sim those trials run on several threads.  Any
/// per-run state belongs in the simulation, not in the policy.
///
/// # Example
///
/// ```rust,ignore
/// struct PalletOnly;
///
/// impl DispatchPolicy for PalletOnly {
///     fn decide(&self, crane: &Crane, ctx: &DispatchContext<'_>, rng: &mut TrialRng) -> Decision {
///         if crane.has_cargo_aboard() && crane.pallet().has_room() {
///             Decision::Assign(Assignment {
///                 work:     WorkType::ShipToPallet,
///                 duration: ctx.transfer.ship_to_pallet.sample(rng),
///                 target:   Target::Pallet,
///             })
///         } else {
///             Decision::Idle
///         }
///     }
/// }
/// ```
pub trait DispatchPolicy: Send + Sync + 'static {
    fn decide(
        &self,
        crane: &Crane,
        ctx:   &DispatchContext<'_>,
        rng:   &mut TrialRng,
    ) -> Decision;
}

impl<P: DispatchPolicy + ?Sized> DispatchPolicy for Box<P> {
    fn decide(&self, crane: &Crane, ctx: &DispatchContext<'_>, rng: &mut TrialRng) -> Decision {
        (**self).decide(crane, ctx, rng)
    }
}

impl<P: DispatchPolicy + ?Sized> DispatchPolicy for Arc<P> {
    fn decide(&self, crane: &Crane, ctx: &DispatchContext<'_>, rng: &mut TrialRng) -> Decision {
        (**self).decide(crane, ctx, rng)
    }
}
