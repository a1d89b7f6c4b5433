//! Common facilities shared by all compute backends

#[cfg(feature = "criterion")]
#[doc(hidden)]
pub mod benchmark;
pub mod cpu;
pub mod rule;

use clap::Args;
use data::grid::Generations;
use std::fmt::Debug;
use thiserror::Error;

/// Commonalities between all compute backends
pub trait SimulateBase: Sized {
    /// Supplementary CLI arguments allowing fine-tuning of this backend
    ///
    /// To honor the principle of least surprise and make criterion
    /// microbenchmarks work smoothly, any argument you add must have a default
    /// value and should also be configurable through environment variables.
    type CliArgs: Args + Debug;

    /// Things that can go wrong while setting up or running the simulation
    type Error: std::error::Error + Send + Sync + 'static;
}

/// Simulation backend construction
///
/// The side length of the simulation grid is fixed for the whole lifetime of a
/// backend, which lets backends validate it and set up grid-size-dependent
/// resources once, at construction time.
pub trait SimulateCreate: SimulateBase {
    /// Set up the simulation for grids of a certain side length
    fn new(side: usize, args: Self::CliArgs) -> Result<Self, Self::Error>;
}

/// Simulation backend interface expected by the "simulate" CLI program
pub trait Simulate: SimulateBase + SimulateCreate {
    /// Perform `steps` generations of the simulation
    ///
    /// On success, the current generation of `generations` holds the outcome.
    fn perform_steps(&self, generations: &mut Generations, steps: usize)
        -> Result<(), Self::Error>;
}

/// Simplified version of Simulate that computes a single generation at a time
///
/// If you implement this, then a [`Simulate`] implementation that loops while
/// flipping the generation buffers will be automatically provided.
pub trait SimulateStep: SimulateBase + SimulateCreate {
    /// Compute the next generation of `generations` from its current one
    ///
    /// It is the job of the caller to flip the generations afterwards if they
    /// want the result to become the input of the next step.
    fn perform_step(&self, generations: &mut Generations) -> Result<(), Self::Error>;
}
//
impl<T: SimulateStep> Simulate for T {
    fn perform_steps(
        &self,
        generations: &mut Generations,
        steps: usize,
    ) -> Result<(), Self::Error> {
        for _ in 0..steps {
            self.perform_step(generations)?;
            generations.flip();
        }
        Ok(())
    }
}

/// Dummy command line arguments for backends that have no tuning knobs
#[derive(Args, Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct NoArgs {}

/// Check that some generations have the side length a backend was built for
pub fn check_side(expected: usize, generations: &Generations) -> Result<(), Error> {
    let actual = generations.side();
    if actual != expected {
        return Err(Error::SideMismatch { expected, actual });
    }
    Ok(())
}

/// Things that can go wrong in the sequential compute backends
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum Error {
    /// Grids do not have the side length that the backend was set up for
    #[error("grid side length {actual} does not match the configured side length {expected}")]
    SideMismatch {
        /// Side length that the backend was set up for
        expected: usize,

        /// Side length of the grids that were passed in
        actual: usize,
    },

    /// Grid is too small for the chosen kernel
    #[error("grid side length {side} is too small, this backend needs at least {min}")]
    GridTooSmall {
        /// Requested side length
        side: usize,

        /// Minimal side length supported by the backend
        min: usize,
    },

    /// Live cells were found on the outermost ring of the grid, which this
    /// backend never updates
    #[error("the outermost ring of the grid must stay dead with this backend")]
    LiveBorder,
}

/// Macro that generates a complete criterion benchmark harness for you
#[macro_export]
#[cfg(feature = "criterion")]
macro_rules! criterion_benchmark {
    ($backend:ident) => {
        fn criterion_benchmark(c: &mut $crate::benchmark::criterion::Criterion) {
            $crate::benchmark::criterion_benchmark::<$backend::Simulation>(
                c,
                stringify!($backend),
            )
        }
        $crate::benchmark::criterion::criterion_group!(benches, criterion_benchmark);
        $crate::benchmark::criterion::criterion_main!(benches);
    };
}
