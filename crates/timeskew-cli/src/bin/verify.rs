//! Symbolic verification of tiling correctness.

use std::process::ExitCode;

use clap::{ArgAction, Parser};
use timeskew_cli::{init_logging, print_run_header, PlanArgs};
use timeskew_verify::verify_symbolic;

#[derive(Parser, Debug)]
#[command(
    name = "verify",
    about = "Symbolic verification of tiling correctness",
    disable_help_flag = true,
    after_help = "Note: parallelogram tiling uses suffix \"p\", trapezoid tiling uses \
                  suffix \"t\".\n\
                  Note: symbolic verification requires extreme memory usage; expression \
                  trees grow with every timestep. A 20x20x20 grid at 60 timesteps is a \
                  practical upper bound on commodity hardware."
)]
struct Cli {
    #[command(flatten)]
    plan: PlanArgs,

    /// Total timesteps to verify
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

    match verify_symbolic(&config) {
        Ok(()) => {
            println!("verification passed.");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
