//! `Fleet` — arena owning every crane and robot of one run.
//!
//! Cranes and robots are stored in two `Vec`s indexed by `CraneId` and
//! `RobotId`.  Keeping them as separate public fields lets the tick loop
//! iterate `&mut cranes` while handing `&mut robots` to each crane:
//!
//! ```ignore
//! for crane in fleet.cranes.iter_mut() {
//!     crane.continue_work(&mut fleet.robots)?;
//! }
//! ```

use dwrs_core::{CraneId, RobotId};

use crate::{Crane, EntityError, EntityResult, Robot};

pub struct Fleet {
    pub cranes: Vec<Crane>,
    pub robots: Vec<Robot>,
}

impl Fleet {
    /// `crane_count` cranes with empty pallets of `pallet_capacity`, and one
    /// robot per entry of `robot_work_times`.
    ///
    /// Fails if either count does not fit the id type.
    pub fn new(
        crane_count:      usize,
        pallet_capacity:  u32,
        robot_work_times: impl IntoIterator<Item = u32>,
    ) -> EntityResult<Self> {
        let cranes = (0..crane_count)
            .map(|i| {
                CraneId::try_from(i)
                    .map(|id| Crane::new(id, pallet_capacity))
                    .map_err(|_| EntityError::FleetTooLarge { kind: "cranes", count: crane_count })
            })
            .collect::<EntityResult<Vec<_>>>()?;
        let work_times: Vec<u32> = robot_work_times.into_iter().collect();
        let robot_count = work_times.len();
        let robots = work_times
            .into_iter()
            .enumerate()
            .map(|(i, work_time)| {
                RobotId::try_from(i)
                    .map(|id| Robot::new(id, work_time))
                    .map_err(|_| EntityError::FleetTooLarge { kind: "robots", count: robot_count })
            })
            .collect::<EntityResult<Vec<_>>>()?;
        Ok(Self { cranes, robots })
    }

    pub fn crane(&self, id: CraneId) -> Option<&Crane> {
        self.cranes.get(id.index())
    }

    pub fn robot(&self, id: RobotId) -> Option<&Robot> {
        self.robots.get(id.index())
    }

    /// Advance every hauling robot by one tick.
    ///
    /// Returns the number of containers delivered to the city this tick.
    pub fn advance_robots(&mut self) -> EntityResult<u64> {
        let mut delivered = 0;
        for robot in self.robots.iter_mut().filter(|r| r.is_hauling()) {
            if robot.continue_work()? {
                delivered += 1;
            }
        }
        Ok(delivered)
    }

    pub fn busy_cranes(&self) -> usize {
        self.cranes.iter().filter(|c| c.is_working()).count()
    }

    pub fn busy_robots(&self) -> usize {
        self.robots.iter().filter(|r| r.is_hauling()).count()
    }

    /// Containers currently sitting on pallets.
    pub fn palletized(&self) -> u64 {
        self.cranes.iter().map(|c| u64::from(c.pallet().containers())).sum()
    }
}
