//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use dwrs_core::{CraneId, ShipId, Tick};
use dwrs_entity::Ship;
use dwrs_sim::{RunSummary, SimObserver, TickSnapshot};

use crate::row::{ShipRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes tick summaries and ship records to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_arrival(&mut self, tick: Tick, ship: ShipId, containers: u32, balked: bool) {
        if !balked {
            return;
        }
        let row = ShipRow {
            ship_id:       ship.0,
            arrival:       tick.0,
            containers,
            balked:        true,
            crane:         None,
            service_start: None,
            service_end:   None,
        };
        let result = self.writer.write_ship(&row);
        self.store_err(result);
    }

    fn on_undock(&mut self, _tick: Tick, crane: CraneId, ship: &Ship) {
        let row = ShipRow {
            ship_id:       ship.id.0,
            arrival:       ship.arrival.0,
            containers:    ship.initial_containers,
            balked:        false,
            crane:         Some(crane.0),
            service_start: ship.service_start.map(|t| t.0),
            service_end:   ship.service_end.map(|t| t.0),
        };
        let result = self.writer.write_ship(&row);
        self.store_err(result);
    }

    fn on_tick_end(&mut self, snapshot: &TickSnapshot) {
        let result = self.writer.write_tick_summary(&TickSummaryRow::from(snapshot));
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick, _summary: &RunSummary) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
