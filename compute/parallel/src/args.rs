//! CLI arguments

use crate::barrier::BarrierKind;
use clap::Args;
use std::num::NonZeroUsize;

/// CLI parameters for the multithreaded implementation
#[derive(Args, Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct CliArgs<BackendArgs: Args> {
    /// Number of worker threads
    ///
    /// Each worker owns one band of rows of the grid for the whole simulation.
    /// By default, there is one worker per available CPU thread, or one
    /// worker per updated row if the grid is too small for that.
    #[arg(short = 'j', long, env)]
    pub num_threads: Option<NonZeroUsize>,

    /// Synchronization protocol between the main thread and the workers
    ///
    /// "spin" has the lowest latency but keeps every worker busy-waiting on
    /// its own CPU thread, so it should only be used when there are at least
    /// as many idle CPU threads as workers. "blocking" puts idle workers to
    /// sleep.
    #[arg(long, env, value_enum, default_value_t)]
    pub barrier: BarrierKind,

    /// Expose backend arguments too
    #[command(flatten)]
    pub backend: BackendArgs,
}
