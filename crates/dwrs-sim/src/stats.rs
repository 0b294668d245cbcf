//! Run statistics.
//!
//! [`RunStats`] accumulates sums and counts while the loop runs;
//! [`RunSummary`] is the result record handed back to the caller.
//!
//! | Field                    | Meaning                                              |
//! |--------------------------|------------------------------------------------------|
//! | `mean_service_time`      | dock → undock ticks, over undocked ships             |
//! | `mean_queue_wait_time`   | arrival → dock ticks, over docked ships              |
//! | `mean_queue_length`      | queue length sampled at the end of every tick        |
//! | `containers_transported` | containers delivered to the city by robots           |
//! | `ships_serviced`         | ships undocked with no cargo left                    |
//! | `ships_arrived`          | ships offered to the queue, including balks          |
//! | `ships_balked`           | ships turned away by a full queue                    |
//! | `crane_stall_ticks`      | crane-ticks spent waiting on a busy robot            |

/// Result record of one run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunSummary {
    /// `None` when no ship was undocked.
    pub mean_service_time:      Option<f64>,
    /// `None` when no ship was docked.
    pub mean_queue_wait_time:   Option<f64>,
    pub mean_queue_length:      f64,
    pub containers_transported: u64,
    pub ships_serviced:         u64,
    pub ships_arrived:          u64,
    pub ships_balked:           u64,
    pub crane_stall_ticks:      u64,
}

#[derive(Debug, Clone, Default)]
pub struct RunStats {
    service_time_total:     u64,
    ships_serviced:         u64,
    wait_time_total:        u64,
    ships_docked:           u64,
    queue_length_total:     u64,
    queue_samples:          u64,
    containers_transported: u64,
    ships_arrived:          u64,
    ships_balked:           u64,
    crane_stall_ticks:      u64,
}

impl RunStats {
    pub fn record_arrival(&mut self, balked: bool) {
        self.ships_arrived += 1;
        if balked {
            self.ships_balked += 1;
        }
    }

    pub fn record_dock(&mut self, wait: u64) {
        self.wait_time_total += wait;
        self.ships_docked += 1;
    }

    pub fn record_undock(&mut self, service: u64) {
        self.service_time_total += service;
        self.ships_serviced += 1;
    }

    pub fn record_deliveries(&mut self, n: u64) {
        self.containers_transported += n;
    }

    pub fn record_stall(&mut self) {
        self.crane_stall_ticks += 1;
    }

    pub fn sample_queue(&mut self, len: usize) {
        self.queue_length_total += len as u64;
        self.queue_samples += 1;
    }

    #[inline]
    pub fn containers_transported(&self) -> u64 {
        self.containers_transported
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            mean_service_time:      mean(self.service_time_total, self.ships_serviced),
            mean_queue_wait_time:   mean(self.wait_time_total, self.ships_docked),
            mean_queue_length:      mean(self.queue_length_total, self.queue_samples).unwrap_or(0.0),
            containers_transported: self.containers_transported,
            ships_serviced:         self.ships_serviced,
            ships_arrived:          self.ships_arrived,
            ships_balked:           self.ships_balked,
            crane_stall_ticks:      self.crane_stall_ticks,
        }
    }
}

fn mean(total: u64, count: u64) -> Option<f64> {
    (count > 0).then(|| total as f64 / count as f64)
}
