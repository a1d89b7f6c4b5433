//! Border-excluded implementation of the Game of Life
//!
//! Like the naive version, cells are updated one at a time, but the outermost
//! ring of the grid is never updated and must stay dead. In exchange, every
//! updated cell has 8 neighbors inside of the grid and the eight edge checks
//! per cell of the naive version go away.

use compute::{
    cpu::{self, SimulateBand},
    rule, Error, NoArgs, SimulateBase, SimulateCreate, SimulateStep,
};
use data::{grid::Generations, Cell, ALIVE};
use std::ops::Range;

/// Game of Life simulation
#[derive(Debug)]
pub struct Simulation {
    /// Side length of the simulation grid
    side: usize,
}
//
impl SimulateBase for Simulation {
    type CliArgs = NoArgs;

    type Error = Error;
}
//
impl SimulateCreate for Simulation {
    fn new(side: usize, _args: NoArgs) -> Result<Self, Error> {
        Self::check_min_side(side)?;
        Ok(Self { side })
    }
}
//
impl SimulateStep for Simulation {
    fn perform_step(&self, generations: &mut Generations) -> Result<(), Error> {
        cpu::perform_step_sequential(self, self.side, generations)
    }
}
//
impl SimulateBand for Simulation {
    const SKIPS_BORDER: bool = true;

    fn unchecked_update_band(
        &self,
        input: &[Cell],
        output: &mut [Cell],
        side: usize,
        rows: Range<usize>,
    ) {
        update_columns(input, output, side, rows, 1..side - 1);
    }
}

/// Compute the next state of cells `columns` x `rows`, which must not touch
/// the outermost ring of the grid
///
/// `output` must start at the beginning of row `rows.start`, as in
/// [`SimulateBand::unchecked_update_band()`].
#[inline]
pub fn update_columns(
    input: &[Cell],
    output: &mut [Cell],
    side: usize,
    rows: Range<usize>,
    columns: Range<usize>,
) {
    let first_row = rows.start;
    for j in rows {
        let out_row = &mut output[side * (j - first_row)..][..side];
        for i in columns.clone() {
            out_row[i] = interior_cell(input, side, i, j);
        }
    }
}

/// Next state of cell `(i, j)`, which must not be on the grid's outermost ring
#[inline(always)]
pub fn interior_cell(input: &[Cell], side: usize, i: usize, j: usize) -> Cell {
    let above = i + side * (j - 1);
    let here = i + side * j;
    let below = i + side * (j + 1);

    let mut neighbors = 0;
    neighbors += input[above - 1];
    neighbors += input[above];
    neighbors += input[above + 1];

    neighbors += input[here - 1];
    neighbors += input[here + 1];

    neighbors += input[below - 1];
    neighbors += input[below];
    neighbors += input[below + 1];

    rule::next_state(input[here] == ALIVE, neighbors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use compute::Simulate;
    use data::grid::Grid;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn random_soup(side: usize, seed: u64) -> Generations {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut generations = Generations::new(side).unwrap();
        let grid = generations.current_mut();
        for j in 1..side - 1 {
            for i in 1..side - 1 {
                grid.set(i, j, rng.gen_bool(0.35));
            }
        }
        generations
    }

    #[test]
    fn every_neighborhood() {
        let sim = Simulation::new(5, NoArgs {}).unwrap();
        for center in [false, true] {
            for mask in 0u32..256 {
                let mut generations = Generations::new(5).unwrap();
                let grid = generations.current_mut();
                grid.set(2, 2, center);
                let neighbors = [(1, 1), (2, 1), (3, 1), (1, 2), (3, 2), (1, 3), (2, 3), (3, 3)];
                for (bit, &(i, j)) in neighbors.iter().enumerate() {
                    grid.set(i, j, mask & (1 << bit) != 0);
                }
                let expected = rule::next_state(center, mask.count_ones() as u8);
                sim.perform_step(&mut generations).unwrap();
                let (_, output) = generations.in_out();
                assert_eq!(
                    output.get(2, 2),
                    expected == ALIVE,
                    "center {center}, neighbor mask {mask:08b}"
                );
            }
        }
    }

    #[test]
    fn matches_naive_on_interior() {
        for (side, seed) in [(3, 1), (8, 2), (34, 3), (61, 4)] {
            let mut border = random_soup(side, seed);
            let mut naive = border.clone();
            let border_sim = Simulation::new(side, NoArgs {}).unwrap();
            let naive_sim = compute_naive::Simulation::new(side, NoArgs {}).unwrap();
            border_sim.perform_steps(&mut border, 1).unwrap();
            naive_sim.perform_steps(&mut naive, 1).unwrap();
            for j in 1..side - 1 {
                for i in 1..side - 1 {
                    assert_eq!(
                        border.current().get(i, j),
                        naive.current().get(i, j),
                        "side {side}, cell ({i}, {j})"
                    );
                }
            }
            assert!(border.current().border_is_clear());
        }
    }

    #[test]
    fn block_is_still() {
        let sim = Simulation::new(6, NoArgs {}).unwrap();
        let mut generations = Generations::new(6).unwrap();
        data::patterns::Pattern::Block
            .place(generations.current_mut(), 2, 2)
            .unwrap();
        let initial = generations.current().clone();
        sim.perform_steps(&mut generations, 10).unwrap();
        assert_eq!(generations.current(), &initial);
    }

    #[test]
    fn rejects_live_border() {
        let sim = Simulation::new(5, NoArgs {}).unwrap();
        let mut generations = Generations::new(5).unwrap();
        generations.current_mut().set(4, 2, true);
        assert_eq!(sim.perform_step(&mut generations), Err(Error::LiveBorder));
        assert_eq!(generations.in_out().1, &Grid::new(5).unwrap());
    }

    #[test]
    fn too_small() {
        assert_eq!(
            Simulation::new(2, NoArgs {}).unwrap_err(),
            Error::GridTooSmall { side: 2, min: 3 }
        );
    }
}
