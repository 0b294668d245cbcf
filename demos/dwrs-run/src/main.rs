//! dwrs-run — command-line driver for the dock worker robot simulation.
//!
//! ```text
//! dwrs-run run   --params params.json [--trials N] [--seed S] [--write DIR]
//! dwrs-run sweep --params params.json --k 6,9,12 --csp 3,4,5 --cpt 2,3,4 --cst 5,7,9
//! ```
//!
//! `-v` raises the log level to debug, `-vv` to trace; `RUST_LOG` overrides
//! both.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use log::info;

use dwrs_core::{DistSpec, DockConfig, DockParams};
use dwrs_dispatch::DirectFirstPolicy;
use dwrs_output::{CsvWriter, SimOutputObserver, SweepRow, write_sweep_csv, write_trials_csv};
use dwrs_sim::{MetricStat, SimBuilder, TrialAggregate, run_trials};

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "dwrs-run")]
#[command(about = "Container dock simulation: ships, cranes, pallets and transport robots")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Run N trials of one parameter file and report the result metrics
    Run(RunArgs),
    /// Run every combination of fixed K/CSP/CPT/CST values
    Sweep(SweepArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Parameter file (JSON)
    #[arg(long)]
    params: PathBuf,

    /// Trials to run; defaults to SIM_CTRL.N
    #[arg(long)]
    trials: Option<u32>,

    /// Root seed; defaults to SEED from the parameter file
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for trials.csv plus the tick and ship log of trial 0
    #[arg(long)]
    write: Option<PathBuf>,
}

#[derive(Args)]
struct SweepArgs {
    /// Base parameter file (JSON)
    #[arg(long)]
    params: PathBuf,

    /// Containers per ship
    #[arg(long, value_delimiter = ',', required = true)]
    k: Vec<u32>,

    /// Ship → pallet ticks
    #[arg(long, value_delimiter = ',', required = true)]
    csp: Vec<u32>,

    /// Pallet → robot ticks
    #[arg(long, value_delimiter = ',', required = true)]
    cpt: Vec<u32>,

    /// Ship → robot ticks
    #[arg(long, value_delimiter = ',', required = true)]
    cst: Vec<u32>,

    /// Trials per combination; defaults to SIM_CTRL.N
    #[arg(long)]
    trials: Option<u32>,

    /// CSV file for one aggregate row per combination
    #[arg(long)]
    write: Option<PathBuf>,
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Command::Run(args) => run(args),
        Command::Sweep(args) => sweep(args),
    }
}

fn load_params(path: &Path) -> Result<DockParams> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))
}

// ── run ───────────────────────────────────────────────────────────────────────

fn run(args: RunArgs) -> Result<()> {
    let mut params = load_params(&args.params)?;
    if let Some(seed) = args.seed {
        params.seed = Some(seed);
    }
    let config = params.resolve()?;
    let trials = args.trials.unwrap_or(config.trials);
    if trials == 0 {
        bail!("at least one trial is required");
    }

    print_config(&config, trials);

    let t0 = Instant::now();
    let summaries = run_trials(&config, trials, DirectFirstPolicy)?;
    info!("{trials} trials in {:.2?}", t0.elapsed());

    println!();
    print_aggregate(&TrialAggregate::from_summaries(&summaries));

    if let Some(dir) = args.write {
        fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
        write_trials_csv(&dir.join("trials.csv"), &summaries)?;

        // Trial 0 again, this time with the per-tick and per-ship log.
        let writer = CsvWriter::new(&dir)?;
        let mut obs = SimOutputObserver::new(writer);
        SimBuilder::new(config, DirectFirstPolicy).trial(0).build()?.run(&mut obs)?;
        if let Some(e) = obs.take_error() {
            return Err(e).context("writing trial 0 log");
        }
        println!();
        println!("Output written to {}", dir.display());
    }
    Ok(())
}

// ── sweep ─────────────────────────────────────────────────────────────────────

fn sweep(args: SweepArgs) -> Result<()> {
    let base = load_params(&args.params)?;
    let trials = args.trials.unwrap_or(base.sim_ctrl.trials);
    if trials == 0 {
        bail!("at least one trial is required");
    }
    let points = args.k.len() * args.csp.len() * args.cpt.len() * args.cst.len();
    println!("Sweep: {points} combinations × {trials} trials");
    println!();
    println!(
        "{:>4} {:>4} {:>4} {:>4}  {:>16} {:>16} {:>14} {:>16} {:>14}",
        "K", "CSP", "CPT", "CST", "S_T", "WQ_T", "Q_L", "C", "S"
    );

    let mut rows = Vec::with_capacity(points);
    for &k in &args.k {
        for &csp in &args.csp {
            for &cpt in &args.cpt {
                for &cst in &args.cst {
                    let mut params = base.clone();
                    params.work.cargo = DistSpec::Fixed(k);
                    params.work.ship_to_pallet = DistSpec::Fixed(csp);
                    params.work.pallet_to_robot = DistSpec::Fixed(cpt);
                    params.work.ship_to_robot = DistSpec::Fixed(cst);
                    params.mode = None;
                    let config = params.resolve()?;

                    let summaries = run_trials(&config, trials, DirectFirstPolicy)?;
                    let aggregate = TrialAggregate::from_summaries(&summaries);
                    println!(
                        "{k:>4} {csp:>4} {cpt:>4} {cst:>4}  {:>16} {:>16} {:>14} {:>16} {:>14}",
                        fmt_stat(aggregate.service_time),
                        fmt_stat(aggregate.queue_wait_time),
                        fmt_stat(aggregate.queue_length),
                        fmt_stat(aggregate.containers_transported),
                        fmt_stat(aggregate.ships_serviced),
                    );
                    rows.push(SweepRow { k, csp, cpt, cst, aggregate });
                }
            }
        }
    }

    if let Some(path) = args.write {
        write_sweep_csv(&path, &rows)?;
        println!();
        println!("Output written to {}", path.display());
    }
    Ok(())
}

// ── Reporting ─────────────────────────────────────────────────────────────────

fn print_config(config: &DockConfig, trials: u32) {
    println!("=== dwrs-run ===");
    println!(
        "Horizon: {} min  |  Trials: {trials}  |  Mode: {}  |  Seed: {}",
        config.horizon, config.mode, config.seed
    );
    println!(
        "Queue L={}  Cranes C={}  Robots T={}  Pallet P={}  A_MEAN={}  TC={}",
        config.queue_capacity,
        config.cranes,
        config.robots,
        config.pallet_capacity,
        config.arrival_mean,
        config.robot_duty
    );
    println!(
        "K={}  CSP={}  CPT={}  CST={}",
        config.cargo,
        config.transfer.ship_to_pallet,
        config.transfer.pallet_to_robot,
        config.transfer.ship_to_robot
    );
}

fn print_aggregate(a: &TrialAggregate) {
    let lines = [
        ("Mean service time (S_T)", a.service_time),
        ("Mean queue wait (WQ_T)", a.queue_wait_time),
        ("Mean queue length (Q_L)", a.queue_length),
        ("Containers transported (C)", a.containers_transported),
        ("Ships serviced (S)", a.ships_serviced),
        ("Ships balked", a.ships_balked),
    ];
    for (label, stat) in lines {
        println!("{label:<28} {}", fmt_stat(stat));
    }
}

fn fmt_stat(stat: Option<MetricStat>) -> String {
    match stat {
        Some(s) => format!("{:.2} ± {:.2}", s.mean, s.std_dev),
        None => "n/a".to_owned(),
    }
}
