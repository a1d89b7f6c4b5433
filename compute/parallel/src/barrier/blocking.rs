//! Condition variable based barrier

use super::{GenerationBarrier, Order};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// Flags that workers wait for
#[derive(Debug)]
struct WorkState {
    /// Per-worker request to compute a generation
    go: Box<[bool]>,

    /// Per-worker request to exit
    kill: Box<[bool]>,
}

/// Barrier where waiting threads sleep until they are notified
///
/// Idle workers do not consume CPU time, at the expense of a wake-up latency
/// on every generation.
#[derive(Debug)]
pub struct BlockingBarrier {
    /// Work requests
    work: Mutex<WorkState>,

    /// Signaled when work requests are added
    work_available: Condvar,

    /// Per-worker completion flags
    done: Mutex<Box<[bool]>>,

    /// Signaled when a worker reports completion
    work_done: Condvar,
}
//
impl BlockingBarrier {
    /// Set up a barrier for `num_workers` workers
    pub fn new(num_workers: usize) -> Self {
        let flags = || vec![false; num_workers].into_boxed_slice();
        Self {
            work: Mutex::new(WorkState {
                go: flags(),
                kill: flags(),
            }),
            work_available: Condvar::new(),
            done: Mutex::new(flags()),
            work_done: Condvar::new(),
        }
    }
}
//
impl GenerationBarrier for BlockingBarrier {
    fn num_workers(&self) -> usize {
        lock(&self.done).len()
    }

    fn start_generation(&self) {
        lock(&self.work).go.fill(true);
        self.work_available.notify_all();
    }

    fn wait_for_completion(&self) {
        let mut done = self
            .work_done
            .wait_while(lock(&self.done), |done| !done.iter().all(|&done| done))
            .unwrap_or_else(PoisonError::into_inner);
        done.fill(false);
    }

    fn shutdown(&self) {
        lock(&self.work).kill.fill(true);
        self.work_available.notify_all();
    }

    fn wait_for_work(&self, worker: usize) -> Order {
        let mut state = self
            .work_available
            .wait_while(lock(&self.work), |state| {
                !state.go[worker] && !state.kill[worker]
            })
            .unwrap_or_else(PoisonError::into_inner);
        if state.kill[worker] {
            return Order::Exit;
        }
        state.go[worker] = false;
        Order::Work
    }

    fn report_done(&self, worker: usize) {
        lock(&self.done)[worker] = true;
        self.work_done.notify_one();
    }
}

/// Lock a mutex, ignoring poisoning
///
/// Critical sections only flip flags, which cannot leave them inconsistent.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
