use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use gridroute_lib::{load_maze, plan_route, render_grid, sweep_from, write_costs_csv, Grid};

#[derive(Parser, Debug)]
#[command(version, about = "Weighted-maze pathfinding utilities")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a maze rendered as text.
    Show {
        /// Path to the maze description file.
        maze: PathBuf,
    },
    /// Compute the cheapest route between two waypoints.
    Route {
        /// Path to the maze description file.
        maze: PathBuf,
        /// Starting waypoint label.
        #[arg(long = "from")]
        from: char,
        /// Destination waypoint label.
        #[arg(long = "to")]
        to: char,
        /// Emit the plan as JSON instead of rendering it.
        #[arg(long)]
        json: bool,
    },
    /// Compute the cost from a waypoint to every cell and write a CSV table.
    Sweep {
        /// Path to the maze description file.
        maze: PathBuf,
        /// Source waypoint label.
        #[arg(long = "from")]
        from: char,
        /// Output CSV file path.
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Show { maze } => handle_show(&maze),
        Command::Route {
            maze,
            from,
            to,
            json,
        } => handle_route(&maze, from, to, json),
        Command::Sweep { maze, from, output } => handle_sweep(&maze, from, &output),
    }
}

fn handle_show(maze: &Path) -> Result<()> {
    let grid = load_grid(maze)?;
    print!("{}", render_grid(&grid, None));
    Ok(())
}

fn handle_route(maze: &Path, from: char, to: char, json: bool) -> Result<()> {
    let grid = load_grid(maze)?;
    let plan = plan_route(&grid, from, to)
        .with_context(|| format!("failed to plan a route from '{from}' to '{to}'"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!(
        "Route from '{from}' to '{to}': {} hops, total cost {:.4}",
        plan.hop_count(),
        plan.total_cost
    );
    print!("{}", render_grid(&grid, Some(&plan.steps)));
    Ok(())
}

fn handle_sweep(maze: &Path, from: char, output: &Path) -> Result<()> {
    let grid = load_grid(maze)?;
    let costs =
        sweep_from(&grid, from).with_context(|| format!("failed to sweep costs from '{from}'"))?;

    let file = fs::File::create(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    write_costs_csv(&grid, &costs, file)
        .with_context(|| format!("failed to write costs to {}", output.display()))?;

    println!("Costs from '{from}' written to {}", output.display());
    Ok(())
}

fn load_grid(maze: &Path) -> Result<Grid> {
    load_maze(maze).with_context(|| format!("failed to load maze from {}", maze.display()))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
