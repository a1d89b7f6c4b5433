use clap::Parser;
use compute::{NoArgs, Simulate, SimulateBase, SimulateCreate};
use compute_selector::{Simulation, BACKEND_NAME};
use data::{grid::Generations, patterns::Pattern};
use eyre::{ensure, Result};
use indicatif::ProgressBar;
use log::info;
use std::time::Instant;

/// Run the Game of Life from a well-known seed pattern
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Side length of the square grid, including its outermost ring
    #[arg(short, long, default_value_t = 2050)]
    side: usize,

    /// Number of generations to compute
    #[arg(short, long, default_value_t = 100)]
    generations: usize,

    /// Seed pattern
    #[arg(short, long, value_enum, default_value_t = Pattern::Lidka)]
    pattern: Pattern,

    /// Column of the top-left corner of the seed pattern
    #[arg(short, long, default_value_t = 1000)]
    x: usize,

    /// Row of the top-left corner of the seed pattern
    #[arg(short, long, default_value_t = 1000)]
    y: usize,

    /// Run the same scenario through the single-threaded naive backend and
    /// check that it ends up in the same state
    #[arg(long)]
    verify: bool,

    /// Backend-specific arguments
    #[command(flatten)]
    backend: <Simulation as SimulateBase>::CliArgs,
}

fn main() -> Result<()> {
    // Enable logging to stderr
    env_logger::init();

    // Parse CLI arguments and seed the grid
    let args = Args::parse();
    let mut generations = Generations::new(args.side)?;
    args.pattern.place(generations.current_mut(), args.x, args.y)?;
    let initial = args.verify.then(|| generations.clone());

    // Run the simulation with the selected backend
    {
        let simulation = Simulation::new(args.side, args.backend)?;
        run(BACKEND_NAME, &simulation, &mut generations, args.generations)?;
    }

    // Check the outcome against the reference backend if asked to
    if let Some(mut expected) = initial {
        let reference = compute_naive::Simulation::new(args.side, NoArgs {})?;
        run("compute_naive", &reference, &mut expected, args.generations)?;
        ensure!(
            generations.current() == expected.current(),
            "{BACKEND_NAME} and compute_naive disagree on the final grid"
        );
        ensure!(
            generations.population() == expected.population(),
            "{BACKEND_NAME} and compute_naive disagree on the live cell count"
        );
        info!("Final grid matches the reference");
    }
    Ok(())
}

/// Compute `steps` generations and report how long it took
fn run(
    name: &str,
    simulation: &impl Simulate,
    generations: &mut Generations,
    steps: usize,
) -> Result<()> {
    let progress = ProgressBar::new(steps as u64);
    let start = Instant::now();
    for _ in 0..steps {
        simulation.perform_steps(generations, 1)?;
        progress.inc(1);
    }
    let elapsed = start.elapsed();
    progress.finish_and_clear();
    println!(
        "{name}: {} ms, alive={}",
        elapsed.as_millis(),
        generations.population()
    );
    Ok(())
}
