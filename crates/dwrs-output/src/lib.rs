//! `dwrs-output` — CSV output for the dock worker robot simulation.
//!
//! | File                 | Written by                        | One row per                  |
//! |----------------------|-----------------------------------|------------------------------|
//! | `tick_summaries.csv` | [`SimOutputObserver`]             | simulated tick               |
//! | `ships.csv`          | [`SimOutputObserver`]             | balked or undocked ship      |
//! | *(any path)*         | [`write_trials_csv`]              | trial of a batch             |
//! | *(any path)*         | [`write_sweep_csv`]               | parameter combination        |
//!
//! Per-run files go through the [`OutputWriter`] trait and are driven by
//! [`SimOutputObserver`], which implements `dwrs_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use dwrs_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use crate::csv::{write_sweep_csv, write_trials_csv, CsvWriter};
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{ShipRow, SweepRow, TickSummaryRow};
pub use writer::OutputWriter;
