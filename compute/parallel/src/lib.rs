//! Parallel implementation of the Game of Life
//!
//! This crate runs any band kernel on a persistent pool of worker threads.
//! The updated rows of the grid are split into one contiguous band per worker
//! once and for all, and every generation is a single barrier round where all
//! workers update their band concurrently while the main thread waits.

mod args;
pub mod barrier;
pub mod partition;
pub mod pool;

pub use crate::{args::CliArgs, barrier::BarrierKind, pool::WorkerPool};

use compute::{cpu::SimulateBand, SimulateBase, SimulateCreate, SimulateStep};
use data::grid::Generations;
use log::{debug, warn};
use std::{io, num::NonZeroUsize, thread};
use thiserror::Error;

/// Game of Life simulation
pub type Simulation = ParallelSimulation<compute_manualvec::Simulation>;

/// Game of Life simulation wrapper that spreads a band kernel over threads
pub struct ParallelSimulation<Backend: SimulateBand + Send + Sync + 'static> {
    /// Worker threads and the kernel they run
    pool: WorkerPool<Backend>,
}
//
impl<Backend: SimulateBand + Send + Sync + 'static> ParallelSimulation<Backend> {
    /// Number of worker threads
    pub fn num_workers(&self) -> usize {
        self.pool.num_workers()
    }

    /// Stop the worker threads, reporting any worker failure
    ///
    /// Dropping the simulation also stops the workers, but can only log errors.
    pub fn shutdown(self) -> Result<(), Error<Backend::Error>> {
        self.pool.shutdown()
    }
}
//
impl<Backend: SimulateBand + Send + Sync + 'static> SimulateBase for ParallelSimulation<Backend> {
    type CliArgs = CliArgs<Backend::CliArgs>;

    type Error = Error<Backend::Error>;
}
//
impl<Backend: SimulateBand + SimulateCreate + Send + Sync + 'static> SimulateCreate
    for ParallelSimulation<Backend>
{
    fn new(side: usize, args: Self::CliArgs) -> Result<Self, Self::Error> {
        let backend = Backend::new(side, args.backend).map_err(Error::Backend)?;
        Backend::check_min_side(side)?;
        let num_rows = Backend::updated_rows(side).len();
        let num_workers = match args.num_threads {
            Some(num_threads) => num_threads,
            None => default_num_workers(num_rows),
        };
        let pool = WorkerPool::new(backend, side, num_workers, args.barrier)?;
        Ok(Self { pool })
    }
}
//
impl<Backend: SimulateBand + SimulateCreate + Send + Sync + 'static> SimulateStep
    for ParallelSimulation<Backend>
{
    fn perform_step(&self, generations: &mut Generations) -> Result<(), Self::Error> {
        let (input, output) = generations.in_out();
        self.pool.advance_generation(input, output)
    }
}

/// Pick one worker per CPU thread, without exceeding the number of rows
fn default_num_workers(num_rows: usize) -> NonZeroUsize {
    let num_threads = thread::available_parallelism().unwrap_or_else(|e| {
        warn!("Failed to query available parallelism ({e}), will use a single worker");
        NonZeroUsize::MIN
    });
    let max_workers = NonZeroUsize::new(num_rows).unwrap_or(NonZeroUsize::MIN);
    if num_threads > max_workers {
        warn!(
            "Only {max_workers} rows to update, so only {max_workers} of {num_threads} \
             CPU threads will be used"
        );
        return max_workers;
    }
    debug!("Using one worker per CPU thread ({num_threads})");
    num_threads
}

/// Things that can go wrong when performing parallel simulation
#[derive(Debug, Error)]
pub enum Error<BackendError: std::error::Error> {
    /// Error from the underlying compute backend
    #[error(transparent)]
    Backend(BackendError),

    /// Grid is not suitable for the band kernel
    ///
    /// In an ideal world, this error kind wouldn't be needed, as Backend can
    /// cover this case. But Rust is not yet smart enough to treat From as
    /// a transitive operation.
    #[error(transparent)]
    Grid(#[from] compute::Error),

    /// More workers were requested than there are rows to update
    #[error("cannot split {rows} rows of cells between {workers} workers")]
    TooManyWorkers {
        /// Requested number of workers
        workers: usize,

        /// Number of rows that the kernel updates
        rows: usize,
    },

    /// Failed to spawn a worker thread
    #[error("failed to spawn a worker thread")]
    ThreadSpawn(#[source] io::Error),

    /// A worker thread panicked, so the grid contents cannot be trusted
    #[error("a worker thread panicked while computing a generation")]
    WorkerPanicked,

    /// A generation was requested while another one was being computed
    #[error("only one generation can be computed at a time")]
    Reentrant,
}
