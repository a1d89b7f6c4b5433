//! Naive implementation of the Game of Life
//!
//! Every cell is updated by visiting its neighborhood, clamped to the grid's
//! edges, one cell at a time. This is slow, but it handles every cell of the
//! grid including the outermost ring, so it serves as the reference that all
//! other backends are checked against.

use compute::{
    cpu::{self, SimulateBand},
    rule, Error, NoArgs, SimulateBase, SimulateCreate, SimulateStep,
};
use data::{grid::Generations, Cell, DEAD};
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
    const SKIPS_BORDER: bool = false;

    fn unchecked_update_band(
        &self,
        input: &[Cell],
        output: &mut [Cell],
        side: usize,
        rows: Range<usize>,
    ) {
        let first_row = rows.start;
        for j in rows {
            let out_row = &mut output[side * (j - first_row)..][..side];
            for (i, out) in out_row.iter_mut().enumerate() {
                *out = next_cell(input, side, i, j);
            }
        }
    }
}

/// Next state of cell `(i, j)`, where cells beyond the edges of the grid
/// count as dead
#[inline]
pub fn next_cell(input: &[Cell], side: usize, i: usize, j: usize) -> Cell {
    // Determine the neighborhood, clamped to the grid
    let [i_start, j_start] = [i, j].map(|x| x.saturating_sub(1));
    let [i_end, j_end] = [i, j].map(|x| (x + 2).min(side));

    // Count live cells in the neighborhood, then take out the center
    let center = input[i + side * j];
    let mut neighbors = 0;
    for row in input[side * j_start..side * j_end].chunks_exact(side) {
        for &cell in &row[i_start..i_end] {
            neighbors += (cell != DEAD) as u8;
        }
    }
    let alive = center != DEAD;
    neighbors -= alive as u8;

    rule::next_state(alive, neighbors)
}
