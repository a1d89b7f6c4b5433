//! Benchmarking utilities
//!
//! Please consider using the macros provided by this crate instead of calling
//! these implementation details directly.

use crate::Simulate;
use clap::{Args, Command, FromArgMatches};
use criterion::{BatchSize, BenchmarkId, Criterion, Throughput};
use data::{grid::Generations, patterns::Pattern};
use std::{hint::black_box, sync::Once};

/// Re-export criterion for the criterion_benchmark macro
pub use criterion;

// Make sure env_logger is only initialized once
fn init_logger() {
    static INIT_LOGGER: Once = Once::new();
    INIT_LOGGER.call_once(env_logger::init);
}

/// Common criterion benchmark for all Game of Life computations
/// Use via the criterion_benchmark macro
pub fn criterion_benchmark<Simulation: Simulate>(c: &mut Criterion, backend_name: &str) {
    init_logger();

    let mut group = c.benchmark_group(backend_name.to_owned());
    for size_pow2 in 7..=11 {
        // Interior side lengths are a power of two to suit the SIMD backends
        let side = 2usize.pow(size_pow2) + 2;
        let num_cells = (side * side) as u64;

        let args = Simulation::CliArgs::from_arg_matches(
            &Simulation::CliArgs::augment_args(Command::default().no_binary_name(true))
                .get_matches_from(None::<&str>),
        )
        .expect("Failed to parse arguments from defaults & environment");
        let sim = Simulation::new(black_box(side), black_box(args))
            .expect("Failed to set up the simulation");

        let mut initial = Generations::new(side).expect("Failed to allocate grids");
        let center = side / 2 - 8;
        Pattern::Lidka
            .place(initial.current_mut(), center, center)
            .expect("Failed to seed the grid");

        // Every iteration restarts from the seed, so that the pattern never
        // grows into the outermost ring of the grid
        group.throughput(Throughput::Elements(num_cells));
        group.bench_function(
            BenchmarkId::from_parameter(format!("{side}x{side}cells")),
            |b| {
                b.iter_batched_ref(
                    || initial.clone(),
                    |generations| sim.perform_steps(generations, 1).unwrap(),
                    BatchSize::LargeInput,
                );
            },
        );
    }
    group.finish();
}
