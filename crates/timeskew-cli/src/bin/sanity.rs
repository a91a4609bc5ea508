//! Quick sanity check of tiling correctness via half-step counters.

use std::process::ExitCode;

use clap::{ArgAction, Parser};
use timeskew_cli::{init_logging, print_run_header, PlanArgs};
use timeskew_verify::verify_counters;

#[derive(Parser, Debug)]
#[command(
    name = "sanity",
    about = "Quick sanity check of tiling correctness",
    disable_help_flag = true,
    after_help = "Note: parallelogram tiling uses suffix \"p\", trapezoid tiling uses \
                  suffix \"t\".\n\
                  Note: memory use is one counter per cell, so this scales to grids \
                  and timestep counts the symbolic verifier cannot reach."
)]
struct Cli {
    #[command(flatten)]
    plan: PlanArgs,

    /// Total timesteps to check
    #[arg(short = 'n', long = "total-timesteps", default_value_t = 100)]
    total_timesteps: usize,

    /// Dump per-range execution traces for debugging
    #[arg(short = 'd', long = "dump")]
    dump: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.dump);

    let config = cli.plan.to_config(cli.total_timesteps);
    print_run_header(&config);

    match verify_counters(&config) {
        Ok(()) => {
            println!("sanity check passed.");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
