//! Busy-waiting barrier

use super::{GenerationBarrier, Order};
use std::{
    hint,
    sync::atomic::{AtomicBool, Ordering},
};

/// Flags of a single worker
///
/// Each worker gets its own cache line so that polling workers do not steal
/// cache lines from each other.
#[derive(Debug, Default)]
#[repr(align(64))]
struct WorkerFlags {
    /// Main thread asks this worker to compute a generation
    go: AtomicBool,

    /// Worker is done with its generation
    done: AtomicBool,

    /// Main thread asks this worker to exit
    kill: AtomicBool,
}

/// Barrier where every waiting thread keeps polling atomic flags
///
/// This reacts as fast as the cache coherence protocol allows, but an idle
/// worker keeps a CPU thread busy for the entire lifetime of the pool.
#[derive(Debug)]
pub struct SpinBarrier {
    /// Flags of each worker
    workers: Box<[WorkerFlags]>,
}
//
impl SpinBarrier {
    /// Set up a barrier for `num_workers` workers
    pub fn new(num_workers: usize) -> Self {
        Self {
            workers: (0..num_workers).map(|_| WorkerFlags::default()).collect(),
        }
    }
}
//
impl GenerationBarrier for SpinBarrier {
    fn num_workers(&self) -> usize {
        self.workers.len()
    }

    fn start_generation(&self) {
        for flags in self.workers.iter() {
            flags.go.store(true, Ordering::Release);
        }
    }

    fn wait_for_completion(&self) {
        for flags in self.workers.iter() {
            while !flags.done.load(Ordering::Acquire) {
                hint::spin_loop();
            }
        }
        // Workers only touch "done" again after the next "go"
        for flags in self.workers.iter() {
            flags.done.store(false, Ordering::Relaxed);
        }
    }

    fn shutdown(&self) {
        for flags in self.workers.iter() {
            flags.kill.store(true, Ordering::Release);
        }
    }

    fn wait_for_work(&self, worker: usize) -> Order {
        let flags = &self.workers[worker];
        loop {
            if flags.kill.load(Ordering::Acquire) {
                return Order::Exit;
            }
            if flags.go.load(Ordering::Acquire) {
                flags.go.store(false, Ordering::Relaxed);
                return Order::Work;
            }
            hint::spin_loop();
        }
    }

    fn report_done(&self, worker: usize) {
        self.workers[worker].done.store(true, Ordering::Release);
    }
}
