use compute::{cpu::SimulateBand, NoArgs, Simulate, SimulateBase, SimulateCreate};
use compute_parallel::{BarrierKind, CliArgs, Error, ParallelSimulation, WorkerPool};
use data::{
    grid::{Generations, Grid},
    patterns::Pattern,
    Cell,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::{
    collections::BTreeSet,
    num::NonZeroUsize,
    ops::Range,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Once,
    },
    thread,
};

const BARRIERS: [BarrierKind; 2] = [BarrierKind::Spin, BarrierKind::Blocking];

// Make sure env_logger is only initialized once
fn init_logger() {
    static INIT_LOGGER: Once = Once::new();
    INIT_LOGGER.call_once(env_logger::init);
}

fn args(num_threads: usize, barrier: BarrierKind) -> CliArgs<NoArgs> {
    CliArgs {
        num_threads: NonZeroUsize::new(num_threads),
        barrier,
        backend: NoArgs {},
    }
}

fn workers(num_workers: usize) -> NonZeroUsize {
    NonZeroUsize::new(num_workers).unwrap()
}

fn seeded(side: usize, pattern: Pattern, x: usize, y: usize) -> Generations {
    let mut generations = Generations::new(side).unwrap();
    pattern.place(generations.current_mut(), x, y).unwrap();
    generations
}

fn run<Backend: SimulateBand + SimulateCreate<CliArgs = NoArgs> + Send + Sync + 'static>(
    mut generations: Generations,
    num_threads: usize,
    barrier: BarrierKind,
    steps: usize,
) -> Generations {
    let sim = ParallelSimulation::<Backend>::new(generations.side(), args(num_threads, barrier))
        .unwrap();
    assert_eq!(sim.num_workers(), num_threads);
    sim.perform_steps(&mut generations, steps).unwrap();
    sim.shutdown().unwrap();
    generations
}

fn reference(mut generations: Generations, steps: usize) -> Generations {
    compute_naive::Simulation::new(generations.side(), NoArgs {})
        .unwrap()
        .perform_steps(&mut generations, steps)
        .unwrap();
    generations
}

#[test]
fn lidka_matches_reference() {
    init_logger();
    let initial = seeded(130, Pattern::Lidka, 60, 55);
    let expected = reference(initial.clone(), 100);
    assert_eq!(expected.population(), 144);
    for barrier in BARRIERS {
        for num_threads in [1, 3, 4] {
            let simd = run::<compute_manualvec::Simulation>(
                initial.clone(),
                num_threads,
                barrier,
                100,
            );
            assert_eq!(simd.current(), expected.current(), "{barrier:?} x{num_threads}");
            assert_eq!(simd.population(), expected.population());

            let naive =
                run::<compute_naive::Simulation>(initial.clone(), num_threads, barrier, 100);
            assert_eq!(naive.current(), expected.current(), "{barrier:?} x{num_threads}");
        }
    }
}

#[test]
fn uneven_bands_with_live_border() {
    init_logger();
    let side = 37;
    let mut rng = StdRng::seed_from_u64(42);
    let mut initial = Generations::new(side).unwrap();
    for j in 0..side {
        for i in 0..side {
            initial.current_mut().set(i, j, rng.gen_bool(0.4));
        }
    }
    let expected = reference(initial.clone(), 10);
    for barrier in BARRIERS {
        for num_threads in [2, 5, 7, side] {
            let result = run::<compute_naive::Simulation>(initial.clone(), num_threads, barrier, 10);
            assert_eq!(result.current(), expected.current(), "{barrier:?} x{num_threads}");
        }
    }
}

#[test]
fn glider_moves_diagonally() {
    init_logger();
    let initial = seeded(20, Pattern::Glider, 5, 10);
    let shifted = initial
        .current()
        .live_cells()
        .into_iter()
        .map(|[i, j]| [i + 1, j - 1])
        .collect::<BTreeSet<_>>();
    for barrier in BARRIERS {
        let result = run::<compute_manualvec::Simulation>(initial.clone(), 3, barrier, 4);
        let cells = result.current().live_cells();
        assert_eq!(cells.len(), 5);
        assert_eq!(cells.into_iter().collect::<BTreeSet<_>>(), shifted);
    }
}

#[test]
fn block_is_still() {
    init_logger();
    let initial = seeded(16, Pattern::Block, 7, 7);
    for barrier in BARRIERS {
        let result = run::<compute_manualvec::Simulation>(initial.clone(), 4, barrier, 50);
        assert_eq!(result.current(), initial.current());
        assert_eq!(result.population(), 4);
    }
}

#[test]
fn teardown_without_generations() {
    init_logger();
    for barrier in BARRIERS {
        let sim = compute_parallel::Simulation::new(64, args(4, barrier)).unwrap();
        sim.shutdown().unwrap();
        let sim = compute_parallel::Simulation::new(64, args(4, barrier)).unwrap();
        drop(sim);
    }
}

#[test]
fn default_worker_count() {
    init_logger();
    let sim = compute_parallel::Simulation::new(4, args(0, BarrierKind::Blocking)).unwrap();
    assert!((1..=2).contains(&sim.num_workers()));
    let sim = compute_naive_parallel(64, 0);
    assert!(sim.num_workers() >= 1);
}

fn compute_naive_parallel(
    side: usize,
    num_threads: usize,
) -> ParallelSimulation<compute_naive::Simulation> {
    ParallelSimulation::new(side, args(num_threads, BarrierKind::Blocking)).unwrap()
}

#[test]
fn too_many_workers() {
    init_logger();
    let result = compute_parallel::Simulation::new(10, args(9, BarrierKind::Spin));
    assert!(matches!(
        result,
        Err(Error::TooManyWorkers {
            workers: 9,
            rows: 8
        })
    ));
    let sim = compute_parallel::Simulation::new(10, args(8, BarrierKind::Spin)).unwrap();
    assert_eq!(sim.num_workers(), 8);
    assert_eq!(compute_naive_parallel(10, 10).num_workers(), 10);
}

#[test]
fn invalid_grids() {
    init_logger();
    assert!(matches!(
        compute_parallel::Simulation::new(2, args(1, BarrierKind::Blocking)),
        Err(Error::Backend(compute::Error::GridTooSmall { side: 2, min: 3 }))
    ));

    let sim = compute_parallel::Simulation::new(8, args(2, BarrierKind::Blocking)).unwrap();
    let mut generations = Generations::new(9).unwrap();
    assert!(matches!(
        sim.perform_steps(&mut generations, 1),
        Err(Error::Grid(compute::Error::SideMismatch {
            expected: 8,
            actual: 9
        }))
    ));

    let mut generations = Generations::new(8).unwrap();
    generations.current_mut().set(7, 3, true);
    assert!(matches!(
        sim.perform_steps(&mut generations, 1),
        Err(Error::Grid(compute::Error::LiveBorder))
    ));
    sim.shutdown().unwrap();
}

/// Band kernel that panics on the band that contains row 1
#[derive(Debug)]
struct Panicky;
//
impl SimulateBase for Panicky {
    type CliArgs = NoArgs;

    type Error = compute::Error;
}
//
impl SimulateBand for Panicky {
    const SKIPS_BORDER: bool = false;

    fn unchecked_update_band(
        &self,
        _input: &[Cell],
        output: &mut [Cell],
        _side: usize,
        rows: Range<usize>,
    ) {
        if rows.contains(&1) {
            panic!("this band kernel always fails on row 1");
        }
        output.fill(0);
    }
}

#[test]
fn worker_panic_is_reported() {
    init_logger();
    for barrier in BARRIERS {
        let pool = WorkerPool::new(Panicky, 10, workers(3), barrier).unwrap();
        let current = Grid::new(10).unwrap();
        let mut next = Grid::new(10).unwrap();
        assert!(matches!(
            pool.advance_generation(&current, &mut next),
            Err(Error::WorkerPanicked)
        ));
        assert!(matches!(
            pool.advance_generation(&current, &mut next),
            Err(Error::WorkerPanicked)
        ));
        assert!(matches!(pool.shutdown(), Err(Error::WorkerPanicked)));
    }
}

/// Band kernel that waits for permission before completing
#[derive(Debug)]
struct Gate {
    entered: Arc<AtomicBool>,
    release: Arc<AtomicBool>,
}
//
impl SimulateBase for Gate {
    type CliArgs = NoArgs;

    type Error = compute::Error;
}
//
impl SimulateBand for Gate {
    const SKIPS_BORDER: bool = false;

    fn unchecked_update_band(
        &self,
        _input: &[Cell],
        _output: &mut [Cell],
        _side: usize,
        _rows: Range<usize>,
    ) {
        self.entered.store(true, Ordering::Release);
        while !self.release.load(Ordering::Acquire) {
            thread::yield_now();
        }
    }
}

#[test]
fn concurrent_generations_are_rejected() {
    init_logger();
    let entered = Arc::new(AtomicBool::new(false));
    let release = Arc::new(AtomicBool::new(false));
    let gate = Gate {
        entered: entered.clone(),
        release: release.clone(),
    };
    let pool = WorkerPool::new(gate, 5, workers(1), BarrierKind::Blocking).unwrap();
    thread::scope(|s| {
        let first = s.spawn(|| {
            let current = Grid::new(5).unwrap();
            let mut next = Grid::new(5).unwrap();
            pool.advance_generation(&current, &mut next)
        });
        while !entered.load(Ordering::Acquire) {
            thread::yield_now();
        }

        let current = Grid::new(5).unwrap();
        let mut next = Grid::new(5).unwrap();
        assert!(matches!(
            pool.advance_generation(&current, &mut next),
            Err(Error::Reentrant)
        ));

        release.store(true, Ordering::Release);
        assert!(first.join().unwrap().is_ok());
    });
    let current = Grid::new(5).unwrap();
    let mut next = Grid::new(5).unwrap();
    pool.advance_generation(&current, &mut next).unwrap();
    pool.shutdown().unwrap();
}
