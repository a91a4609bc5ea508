//! Statistics over the unique subtile shapes of a plan.

use std::process::ExitCode;

use clap::{ArgAction, Parser};
use timeskew_cli::{init_logging, PlanArgs};
use timeskew_plan::stats::naive_grid_bytes;
use timeskew_plan::{build_plan, ShapeHistogram};

#[derive(Parser, Debug)]
#[command(
    name = "shapes",
    about = "Show statistics of all unique subtile shapes",
    disable_help_flag = true,
    after_help = "Note: parallelogram tiling uses suffix \"p\", trapezoid tiling uses \
                  suffix \"t\"."
)]
struct Cli {
    #[command(flatten)]
    plan: PlanArgs,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(false);

    println!(
        "grid\t\t{:04} x {:04} x {:04}",
        cli.plan.grid_size[0], cli.plan.grid_size[1], cli.plan.grid_size[2]
    );
    println!(
        "tile\t\t{:04} x {:04} x {:04}",
        cli.plan.tile_size.widths[0], cli.plan.tile_size.widths[1], cli.plan.tile_size.widths[2]
    );

    let plan = match build_plan(
        cli.plan.grid_size,
        cli.plan.tile_size.widths,
        cli.plan.tile_size.shapes,
        cli.plan.tile_height,
    ) {
        Ok(plan) => plan,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };

    let histogram = ShapeHistogram::of_plan(&plan);
    println!("\n{} unique subtile shapes found.", histogram.unique_shapes());
    for (shape, count) in histogram.iter() {
        println!(
            "{:02} x {:02} x {:02}\t{count}\tsubtiles",
            shape[0], shape[1], shape[2]
        );
    }

    println!(
        "{} bytes of RAM needed if grid is stored naively",
        naive_grid_bytes(cli.plan.grid_size)
    );
    println!(
        "{} bytes of RAM needed if overlapped tiles are stored multiple times",
        histogram.overlapped_bytes()
    );
    ExitCode::SUCCESS
}
