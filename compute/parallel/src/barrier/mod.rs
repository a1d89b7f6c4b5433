//! Synchronization between the main thread and the workers
//!
//! Each generation goes through the same barrier round: the main thread raises
//! the "go" flag of every worker, each worker consumes its own "go" flag,
//! computes its band, then raises its "done" flag, and the main thread waits
//! for all "done" flags before clearing them. Setting the "kill" flags tells
//! the workers to exit, and takes priority over pending work.
//!
//! Two protocols implement this round with different tradeoffs between
//! latency and CPU usage, see [`SpinBarrier`] and [`BlockingBarrier`].

mod blocking;
mod spin;

pub use self::{blocking::BlockingBarrier, spin::SpinBarrier};

use clap::ValueEnum;

/// Generation barrier shared by the main thread and the workers
///
/// Workers are identified by an index in `0..num_workers()`.
pub trait GenerationBarrier: Send + Sync {
    /// Number of workers synchronized by this barrier
    fn num_workers(&self) -> usize;

    /// Tell every worker to compute one generation (main thread)
    ///
    /// Everything the main thread did before this call is visible to workers
    /// once they get [`Order::Work`].
    fn start_generation(&self);

    /// Wait for every worker to report that it is done (main thread)
    ///
    /// Everything the workers did before reporting is visible to the main
    /// thread once this returns. The "done" flags are reset for the next round.
    fn wait_for_completion(&self);

    /// Tell every worker to exit (main thread)
    fn shutdown(&self);

    /// Wait until there is something to do for a worker (worker thread)
    fn wait_for_work(&self, worker: usize) -> Order;

    /// Report that a worker finished its generation (worker thread)
    fn report_done(&self, worker: usize);
}

/// What a worker should do next
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Order {
    /// Compute a generation of the worker's band
    Work,

    /// Exit the worker thread
    Exit,
}

/// Available barrier protocols
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq, ValueEnum)]
pub enum BarrierKind {
    /// Busy-waiting on per-worker atomic flags
    Spin,

    /// Sleeping on condition variables
    #[default]
    Blocking,
}
//
impl BarrierKind {
    /// Build a barrier of this kind
    pub fn build(self, num_workers: usize) -> Box<dyn GenerationBarrier> {
        match self {
            Self::Spin => Box::new(SpinBarrier::new(num_workers)),
            Self::Blocking => Box::new(BlockingBarrier::new(num_workers)),
        }
    }
}
