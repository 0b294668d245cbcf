//! Read-only state handed to a policy for one decision.

use dwrs_core::TransferTimes;
use dwrs_entity::Robot;

/// A borrowed view of everything a policy may consult besides the crane.
///
/// Built by dwrs-sim for each decision.  Robots are indexed by `RobotId`.
pub struct DispatchContext<'a> {
    pub robots:   &'a [Robot],
    pub transfer: &'a TransferTimes,
}

impl<'a> DispatchContext<'a> {
    #[inline]
    pub fn new(robots: &'a [Robot], transfer: &'a TransferTimes) -> Self {
        Self { robots, transfer }
    }
}
