//! Plain data row types written by the CSV backend.

use dwrs_sim::{TickSnapshot, TrialAggregate};

/// Dock state at the end of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:         u64,
    pub queue_length: u64,
    /// Cumulative containers delivered to the city.
    pub delivered:    u64,
    pub busy_cranes:  u64,
    pub busy_robots:  u64,
    pub palletized:   u64,
}

impl From<&TickSnapshot> for TickSummaryRow {
    fn from(s: &TickSnapshot) -> Self {
        Self {
            tick:         s.tick.0,
            queue_length: s.queue_length as u64,
            delivered:    s.delivered,
            busy_cranes:  s.busy_cranes as u64,
            busy_robots:  s.busy_robots as u64,
            palletized:   s.palletized,
        }
    }
}

/// One ship's fate.  Balked ships have no crane and no service window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipRow {
    pub ship_id:       u32,
    pub arrival:       u64,
    pub containers:    u32,
    pub balked:        bool,
    pub crane:         Option<u16>,
    pub service_start: Option<u64>,
    pub service_end:   Option<u64>,
}

/// Aggregate over the trials of one sweep point.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepRow {
    pub k:         u32,
    pub csp:       u32,
    pub cpt:       u32,
    pub cst:       u32,
    pub aggregate: TrialAggregate,
}
