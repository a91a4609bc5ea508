//! ASCII visualization of how the simulation box is tiled.

use std::process::ExitCode;

use clap::{ArgAction, Parser};
use timeskew_cli::{init_logging, PlanArgs};
use timeskew_core::AxisShape;
use timeskew_plan::{
    build_plan, parallelogram_tiles, render_plan, trapezoid_tiles, Plan3D, PlanError,
};

#[derive(Parser, Debug)]
#[command(
    name = "demo",
    about = "Visualize how the simulation box is tiled in ASCII diagrams",
    disable_help_flag = true,
    after_help = "Note: parallelogram tiling uses suffix \"p\", trapezoid tiling uses \
                  suffix \"t\".\n\
                  Note: keep the grid size small, otherwise the diagrams will not fit \
                  in your terminal window."
)]
struct Cli {
    #[command(flatten)]
    plan: PlanArgs,

    /// Dump the full nested plan (stages, tiles, subtiles, ranges)
    #[arg(short = 'd', long = "dump")]
    dump: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

fn show_axes(cli: &Cli) -> Result<(), PlanError> {
    let grid = cli.plan.grid_size;
    let widths = cli.plan.tile_size.widths;
    let height = cli.plan.tile_height;

    println!("tiling for dimension i:");
    print!("{}", render_plan(&trapezoid_tiles(grid[0], widths[0], height)?));

    println!("\ntiling for dimension j:");
    print!("{}", render_plan(&trapezoid_tiles(grid[1], widths[1], height)?));

    println!("\ntiling for dimension k:");
    let plan_k = match cli.plan.tile_size.shapes[2] {
        AxisShape::Trapezoid => trapezoid_tiles(grid[2], widths[2], height)?,
        AxisShape::Parallelogram => parallelogram_tiles(grid[2], widths[2], height)?,
    };
    print!("{}", render_plan(&plan_k));
    Ok(())
}

fn dump_all_tiles(plan: &Plan3D) {
    for (stage_idx, stage) in plan.stages().enumerate() {
        println!("\n***********stage: {stage_idx}****************");
        for tile in stage {
            println!(
                "\t=============tileId: ({}, {}, {})=============",
                tile.id[0], tile.id[1], tile.id[2]
            );
            for subtile in tile.subtiles() {
                println!("\t\t---{}---", subtile.bounding_box());
                for range in subtile.ranges() {
                    println!("\t\t\t{range}");
                }
                println!("\t\t---------------------------");
            }
            println!("\t===========================");
        }
        println!("***************************");
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(false);

    if let Err(error) = show_axes(&cli) {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

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

    if cli.dump {
        dump_all_tiles(&plan);
    }
    ExitCode::SUCCESS
}
