//! The `OutputWriter` trait implemented by per-run writers.

use crate::{OutputResult, ShipRow, TickSummaryRow};

/// Sink for the rows one run produces.
///
/// Errors raised while the simulation is running are held by the observer
/// and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Write one ship row.
    fn write_ship(&mut self, row: &ShipRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Calling it again after the first success is a no-op.
    fn finish(&mut self) -> OutputResult<()>;
}
