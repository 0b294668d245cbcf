//! Ships.

use dwrs_core::{ShipId, Tick};

/// A container ship.
///
/// Created on arrival with its full cargo.  Once docked, `containers` only
/// ever decreases, one unit per crane pickup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    pub id: ShipId,

    /// Tick the ship arrived at the dock.
    pub arrival: Tick,

    /// Cargo on board when the ship arrived.
    pub initial_containers: u32,

    /// Containers still on board.
    containers: u32,

    /// Tick the ship was docked to a crane.  `None` while queued.
    pub service_start: Option<Tick>,

    /// Tick the ship left its crane.  `None` until undocked.
    pub service_end: Option<Tick>,
}

impl Ship {
    pub fn new(id: ShipId, arrival: Tick, containers: u32) -> Self {
        Self {
            id,
            arrival,
            initial_containers: containers,
            containers,
            service_start: None,
            service_end: None,
        }
    }

    #[inline]
    pub fn containers(&self) -> u32 {
        self.containers
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.containers == 0
    }

    /// Remove one container.  Returns `false` (and changes nothing) if the
    /// ship is already empty.
    pub(crate) fn take_container(&mut self) -> bool {
        if self.containers == 0 {
            return false;
        }
        self.containers -= 1;
        true
    }

    pub(crate) fn dock(&mut self, now: Tick) {
        self.service_start = Some(now);
    }

    pub(crate) fn undock(&mut self, now: Tick) {
        self.service_end = Some(now);
    }

    /// Ticks spent queued before docking.
    pub fn wait_time(&self) -> Option<u64> {
        self.service_start.map(|start| start.since(self.arrival))
    }

    /// Ticks between docking and undocking.
    pub fn service_time(&self) -> Option<u64> {
        match (self.service_start, self.service_end) {
            (Some(start), Some(end)) => Some(end.since(start)),
            _ => None,
        }
    }
}
