//! Manually vectorized implementation of the Game of Life
//!
//! This implementation is vectorized through direct use of hardware
//! intrinsics. Each cell takes one byte, so a SIMD vector covers as many
//! consecutive cells of a row as it has byte lanes, and the neighbor counts of
//! all these cells are computed with 8 vector additions.
//!
//! Like the `border` version, the outermost ring of the grid is never updated.
//! Interior columns that do not fill a whole vector at the end of each row are
//! handled by the scalar kernel of the `border` version.

mod simd;

use self::simd::Vector;
use compute::{
    cpu::{self, SimulateBand},
    Error, NoArgs, SimulateBase, SimulateCreate, SimulateStep,
};
use data::{grid::Generations, Cell, ALIVE};
use std::ops::Range;

/// Chosen SIMD vector type (see the simd module for vector size choice details)
pub use self::simd::Values;

/// Number of cells that are processed by a single SIMD vector
pub const WIDTH: usize = <Values as Vector>::WIDTH;

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

    #[inline]
    fn unchecked_update_band(
        &self,
        input: &[Cell],
        output: &mut [Cell],
        side: usize,
        rows: Range<usize>,
    ) {
        // Prepare vector versions of the rule's constants
        let ones = Values::splat(ALIVE);
        let twos = Values::splat(2);
        let threes = Values::splat(3);

        // Interior columns 1..vectorized_end are covered by whole vectors
        let vectorized_end = 1 + (side - 2) / WIDTH * WIDTH;

        let first_row = rows.start;
        for j in rows {
            let above = &input[side * (j - 1)..][..side];
            let here = &input[side * j..][..side];
            let below = &input[side * (j + 1)..][..side];
            let out_row = &mut output[side * (j - first_row)..][..side];

            for i in (1..vectorized_end).step_by(WIDTH) {
                // Count live neighbors
                let mut neighbors = Values::load(&above[i - 1..]);
                neighbors = neighbors.add(Values::load(&above[i..]));
                neighbors = neighbors.add(Values::load(&above[i + 1..]));
                neighbors = neighbors.add(Values::load(&here[i - 1..]));
                neighbors = neighbors.add(Values::load(&here[i + 1..]));
                neighbors = neighbors.add(Values::load(&below[i - 1..]));
                neighbors = neighbors.add(Values::load(&below[i..]));
                neighbors = neighbors.add(Values::load(&below[i + 1..]));

                // Apply the rule as lane masks, then bring them back to 0/1
                let two = neighbors.eq_mask(twos);
                let three = neighbors.eq_mask(threes);
                let alive = Values::load(&here[i..]).eq_mask(ones);
                let survives = alive.and(two.or(three));
                let born = alive.and_not(three);
                survives.or(born).and(ones).store(&mut out_row[i..]);
            }

            for i in vectorized_end..side - 1 {
                out_row[i] = compute_border::interior_cell(input, side, i, j);
            }
        }
    }
}
