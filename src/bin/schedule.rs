//! Command line: build a schedule from the embedded (or given) configuration and print it.
//! Run with: cargo run --bin schedule -- [--config groups.json] [--seed 42] [--attempts 20]

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use round_robin_schedule::{
    generate_schedule_with_retries, render_csv, render_json, CompetitionConfig, ReportOptions,
    ScheduleError,
};
use std::path::PathBuf;
use std::process::ExitCode;

/// Round-robin schedule maker
///
/// Pairs every competitor with every other competitor of its group and books each match
/// on a court so that nobody plays two matches at the same time.
#[derive(Parser, Debug)]
#[command(version, about = "Round-robin schedule maker")]
struct Args {
    /// JSON competition configuration [default: built-in groups and calendar]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the slot shuffle; a fresh one is drawn when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// How many shuffles to try before giving up
    #[arg(default_value_t = 1, long)]
    attempts: u32,

    /// Field delimiter of the CSV output (one ASCII character)
    #[arg(default_value = ",", long, value_parser = parse_delimiter)]
    delimiter: u8,

    /// Always list competitors in pairing order
    #[arg(long)]
    no_shuffle_sides: bool,

    /// Print the schedule as JSON instead of CSV
    #[arg(long)]
    json: bool,
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(format!("{s:?} is not a single ASCII character")),
    }
}

fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    let args = Args::parse();

    match run(&args) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(ScheduleError::Infeasible(e)) if e.is_retryable() => {
            eprintln!("No conflict-free schedule found: {e}");
            eprintln!("Run again to try another shuffle, or pass a higher --attempts.");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<String, ScheduleError> {
    let config = match &args.config {
        Some(path) => CompetitionConfig::from_path(path)?,
        None => CompetitionConfig::embedded()?,
    };
    let competition = config.build()?;

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Scheduling with seed {}", seed);
    let schedule = generate_schedule_with_retries(&competition, seed, args.attempts)?;

    if args.json {
        return Ok(render_json(&schedule)?);
    }
    let options = ReportOptions {
        delimiter: args.delimiter,
        shuffle_sides: !args.no_shuffle_sides,
    };
    let mut rng = StdRng::seed_from_u64(schedule.seed);
    Ok(render_csv(&schedule.matches, &options, &mut rng)?)
}
