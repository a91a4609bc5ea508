//! Theoretical DRAM traffic savings of a tiled run.

use std::process::ExitCode;

use clap::{ArgAction, Parser};
use timeskew_cli::{init_logging, print_batches, print_run_header, PlanArgs};
use timeskew_core::AxisShape;
use timeskew_engine::TiledSchedule;
use timeskew_plan::traffic::{naive_traffic, plan_traffic};

#[derive(Parser, Debug)]
#[command(
    name = "traffic",
    about = "Calculate theoretical DRAM traffic saving",
    disable_help_flag = true,
    after_help = "Note: parallelogram tiling uses suffix \"p\", trapezoid tiling uses \
                  suffix \"t\".\n\
                  Note: assumes ideal data access patterns and an infinitely fast \
                  cache - actual speedup is much lower."
)]
struct Cli {
    #[command(flatten)]
    plan: PlanArgs,

    /// Total timesteps to model
    #[arg(short = 'n', long = "total-timesteps", default_value_t = 1000)]
    total_timesteps: usize,

    /// Model a sliding staging window along the K axis (requires a
    /// parallelogram K axis)
    #[arg(short = 'w', long = "sliding-window")]
    sliding_window: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(false);

    if cli.sliding_window && cli.plan.tile_size.shapes[2] != AxisShape::Parallelogram {
        eprintln!(
            "dimension k uses trapezoid tiling, parallelogram sliding window is unsupported"
        );
        return ExitCode::FAILURE;
    }

    let config = cli.plan.to_config(cli.total_timesteps);
    print_run_header(&config);

    let schedule = match TiledSchedule::build(&config) {
        Ok(schedule) => schedule,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };
    print_batches(&schedule);

    let mut tiled_bytes =
        plan_traffic(schedule.main_plan(), cli.sliding_window) * schedule.main_batches();
    if let Some(remainder) = schedule.remainder_plan() {
        tiled_bytes += plan_traffic(remainder, cli.sliding_window);
    }
    let naive_bytes = naive_traffic(config.grid_size, config.timesteps);

    println!("tiled total\t{:.0} MBytes", tiled_bytes as f64 / 1e6);
    println!("naive total\t{:.0} MBytes", naive_bytes as f64 / 1e6);
    println!(
        "speedup\t\t{:.1}%",
        100.0 * naive_bytes as f64 / tiled_bytes as f64
    );
    ExitCode::SUCCESS
}
