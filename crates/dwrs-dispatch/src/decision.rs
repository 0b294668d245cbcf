//! Dispatch results.

use dwrs_entity::{Target, WorkType};

/// One transfer for one crane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub work:     WorkType,
    /// Sampled duration in ticks.
    pub duration: u32,
    pub target:   Target,
}

/// What an idle crane should do this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Nothing to do; the crane stays idle this tick.
    Idle,
    Assign(Assignment),
}

impl Decision {
    #[inline]
    pub fn assignment(self) -> Option<Assignment> {
        match self {
            Decision::Assign(a) => Some(a),
            Decision::Idle => None,
        }
    }
}
