//! CSV output backend.
//!
//! [`CsvWriter`] creates two files in the configured output directory:
//! - `tick_summaries.csv`
//! - `ships.csv`
//!
//! Batch results are written in one call by [`write_trials_csv`] and
//! [`write_sweep_csv`].  Undefined means are written as empty fields.

use std::fmt::Display;
use std::fs::File;
use std::path::Path;

use csv::Writer;
use dwrs_sim::RunSummary;

use crate::writer::OutputWriter;
use crate::{OutputResult, ShipRow, SweepRow, TickSummaryRow};

/// Per-trial columns, in the order `write_trials_csv` writes them.
pub const TRIAL_COLUMNS: [&str; 8] = ["trial", "S_T", "WQ_T", "Q_L", "C", "S", "arrived", "balked"];

/// Writes one run's output to two CSV files.
pub struct CsvWriter {
    summaries: Writer<File>,
    ships:     Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record([
            "tick", "queue_length", "delivered", "busy_cranes", "busy_robots", "palletized",
        ])?;

        let mut ships = Writer::from_path(dir.join("ships.csv"))?;
        ships.write_record([
            "ship_id", "arrival", "containers", "balked", "crane", "service_start", "service_end",
        ])?;

        Ok(Self {
            summaries,
            ships,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.queue_length.to_string(),
            row.delivered.to_string(),
            row.busy_cranes.to_string(),
            row.busy_robots.to_string(),
            row.palletized.to_string(),
        ])?;
        Ok(())
    }

    fn write_ship(&mut self, row: &ShipRow) -> OutputResult<()> {
        self.ships.write_record(&[
            row.ship_id.to_string(),
            row.arrival.to_string(),
            row.containers.to_string(),
            (row.balked as u8).to_string(),
            opt(row.crane),
            opt(row.service_start),
            opt(row.service_end),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.ships.flush()?;
        Ok(())
    }
}

/// Write one row per trial summary to `path`.
pub fn write_trials_csv(path: &Path, summaries: &[RunSummary]) -> OutputResult<()> {
    let mut w = Writer::from_path(path)?;
    w.write_record(TRIAL_COLUMNS)?;
    for (i, s) in summaries.iter().enumerate() {
        w.write_record(&[
            i.to_string(),
            opt(s.mean_service_time),
            opt(s.mean_queue_wait_time),
            s.mean_queue_length.to_string(),
            s.containers_transported.to_string(),
            s.ships_serviced.to_string(),
            s.ships_arrived.to_string(),
            s.ships_balked.to_string(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Write one row per sweep point to `path`: the fixed `K`/`CSP`/`CPT`/`CST`
/// values followed by the mean and standard deviation of each metric.
pub fn write_sweep_csv(path: &Path, rows: &[SweepRow]) -> OutputResult<()> {
    let mut w = Writer::from_path(path)?;
    w.write_record([
        "K", "CSP", "CPT", "CST", "trials",
        "S_T", "S_T_sd", "WQ_T", "WQ_T_sd", "Q_L", "Q_L_sd", "C", "C_sd", "S", "S_sd",
    ])?;
    for row in rows {
        let a = &row.aggregate;
        let mut record = vec![
            row.k.to_string(),
            row.csp.to_string(),
            row.cpt.to_string(),
            row.cst.to_string(),
            a.trials.to_string(),
        ];
        for stat in [a.service_time, a.queue_wait_time, a.queue_length, a.containers_transported, a.ships_serviced] {
            record.push(opt(stat.map(|s| s.mean)));
            record.push(opt(stat.map(|s| s.std_dev)));
        }
        w.write_record(&record)?;
    }
    w.flush()?;
    Ok(())
}

fn opt<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
