//! Persistent pool of worker threads, each owning a band of the grid

use crate::{
    barrier::{BarrierKind, GenerationBarrier, Order},
    partition, Error,
};
use compute::cpu::SimulateBand;
use data::{grid::Grid, Cell};
use log::{debug, error, trace};
use std::{
    num::NonZeroUsize,
    ops::Range,
    panic::{self, AssertUnwindSafe},
    ptr,
    sync::{
        atomic::{AtomicBool, AtomicPtr, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
};

/// State shared between the main thread and the workers
struct Shared<Backend> {
    /// Band kernel
    backend: Backend,

    /// Side length of the grids
    side: usize,

    /// Rows of the grid that each worker updates
    bands: Box<[Range<usize>]>,

    /// Current generation, published before each barrier round
    input: AtomicPtr<Cell>,

    /// Next generation, published before each barrier round
    output: AtomicPtr<Cell>,

    /// Generation barrier
    barrier: Box<dyn GenerationBarrier>,

    /// A worker panicked while computing its band
    poisoned: AtomicBool,
}
//
impl<Backend: SimulateBand + Sync> Shared<Backend> {
    /// Worker thread main loop
    fn run_worker(&self, worker: usize) {
        let rows = self.bands[worker].clone();
        debug!("Worker {worker} is in charge of rows {rows:?}");
        while self.barrier.wait_for_work(worker) == Order::Work {
            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                // SAFETY: The main thread published pointers to two grids of
                //         side * side cells before starting the generation,
                //         and keeps them borrowed until all workers report
                //         done. Bands are disjoint, so this worker is the only
                //         one accessing this part of the output.
                let (input, output) = unsafe {
                    let input = self.input.load(Ordering::Relaxed);
                    let output = self.output.load(Ordering::Relaxed);
                    (
                        std::slice::from_raw_parts(input, self.side * self.side),
                        std::slice::from_raw_parts_mut(
                            output.add(self.side * rows.start),
                            self.side * rows.len(),
                        ),
                    )
                };
                self.backend
                    .update_band(input, output, self.side, rows.clone());
            }));
            if result.is_err() {
                self.poisoned.store(true, Ordering::Relaxed);
            }
            self.barrier.report_done(worker);
        }
        debug!("Worker {worker} is exiting");
    }
}

/// Pool of worker threads that compute generations together
///
/// Threads are spawned once when the pool is created and stay alive until it
/// is shut down, each of them updating the same band of rows of the grid on
/// every generation.
pub struct WorkerPool<Backend: SimulateBand + Send + Sync + 'static> {
    /// State shared with the workers
    shared: Arc<Shared<Backend>>,

    /// Worker threads
    workers: Vec<JoinHandle<()>>,

    /// A generation is being computed
    in_flight: AtomicBool,
}
//
impl<Backend: SimulateBand + Send + Sync + 'static> WorkerPool<Backend> {
    /// Spawn `num_workers` threads that will update grids of side `side`
    pub fn new(
        backend: Backend,
        side: usize,
        num_workers: NonZeroUsize,
        barrier: BarrierKind,
    ) -> Result<Self, Error<Backend::Error>> {
        Backend::check_min_side(side)?;
        let rows = Backend::updated_rows(side);
        let num_workers = num_workers.get();
        if num_workers > rows.len() {
            return Err(Error::TooManyWorkers {
                workers: num_workers,
                rows: rows.len(),
            });
        }
        let bands = partition::bands(rows, num_workers);
        debug!("Spawning {num_workers} workers with {barrier:?} barrier over bands {bands:?}");

        let mut pool = Self {
            shared: Arc::new(Shared {
                backend,
                side,
                bands: bands.into_boxed_slice(),
                input: AtomicPtr::new(ptr::null_mut()),
                output: AtomicPtr::new(ptr::null_mut()),
                barrier: barrier.build(num_workers),
                poisoned: AtomicBool::new(false),
            }),
            workers: Vec::with_capacity(num_workers),
            in_flight: AtomicBool::new(false),
        };
        for worker in 0..num_workers {
            let shared = pool.shared.clone();
            // On failure, dropping the pool stops the workers spawned so far
            let handle = thread::Builder::new()
                .name(format!("life-worker-{worker}"))
                .spawn(move || shared.run_worker(worker))
                .map_err(Error::ThreadSpawn)?;
            pool.workers.push(handle);
        }
        Ok(pool)
    }

    /// Number of worker threads
    pub fn num_workers(&self) -> usize {
        self.shared.bands.len()
    }

    /// Side length of the grids that this pool works on
    pub fn side(&self) -> usize {
        self.shared.side
    }

    /// Access the band kernel
    pub fn backend(&self) -> &Backend {
        &self.shared.backend
    }

    /// Compute `next` from `current` using all workers
    ///
    /// Returns once every band of `next` has been written. Only one call may be
    /// in progress at any time, concurrent calls fail with
    /// [`Error::Reentrant`].
    pub fn advance_generation(
        &self,
        current: &Grid,
        next: &mut Grid,
    ) -> Result<(), Error<Backend::Error>> {
        if self.in_flight.swap(true, Ordering::Acquire) {
            return Err(Error::Reentrant);
        }
        let _in_flight = InFlight(&self.in_flight);
        self.check_poisoned()?;

        let expected = self.shared.side;
        for actual in [current.side(), next.side()] {
            if actual != expected {
                return Err(compute::Error::SideMismatch { expected, actual }.into());
            }
        }
        Backend::check_input(current)?;

        trace!("Publishing buffers and starting a generation");
        self.shared
            .input
            .store(current.as_slice().as_ptr().cast_mut(), Ordering::Relaxed);
        self.shared
            .output
            .store(next.as_slice_mut().as_mut_ptr(), Ordering::Relaxed);
        self.shared.barrier.start_generation();
        self.shared.barrier.wait_for_completion();
        trace!("All workers are done");

        self.check_poisoned()
    }

    /// Stop the workers and wait for them to exit
    pub fn shutdown(mut self) -> Result<(), Error<Backend::Error>> {
        self.stop()
    }

    /// Implementation of shutdown that is shared with Drop
    fn stop(&mut self) -> Result<(), Error<Backend::Error>> {
        debug!("Stopping {} workers", self.workers.len());
        self.shared.barrier.shutdown();
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                self.shared.poisoned.store(true, Ordering::Relaxed);
            }
        }
        self.check_poisoned()
    }

    /// Error out if a worker panicked
    fn check_poisoned(&self) -> Result<(), Error<Backend::Error>> {
        if self.shared.poisoned.load(Ordering::Relaxed) {
            return Err(Error::WorkerPanicked);
        }
        Ok(())
    }
}
//
impl<Backend: SimulateBand + Send + Sync + 'static> Drop for WorkerPool<Backend> {
    fn drop(&mut self) {
        if self.workers.is_empty() {
            return;
        }
        if let Err(e) = self.stop() {
            error!("Worker pool did not shut down cleanly: {e}");
        }
    }
}

/// Clears the in-flight flag of a [`WorkerPool`] when dropped
struct InFlight<'pool>(&'pool AtomicBool);
//
impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
