//! Facilities that are specific to CPU implementations

use crate::{check_side, Error, SimulateBase};
use data::{
    grid::{Generations, Grid},
    Cell,
};
use std::ops::Range;

/// Lower-level band-based interface to a CPU compute backend
///
/// A band is a contiguous range of rows of the grid (rows being the
/// slow-varying axis, see [`Grid`]). Any backend that can update an arbitrary
/// band of the next generation can be run on multiple threads by giving each
/// thread its own band, which is what the `parallel` backend does.
pub trait SimulateBand: SimulateBase {
    /// Truth that this kernel never touches the outermost ring of cells
    ///
    /// Such kernels can skip all grid edge checks, but they require the
    /// outermost ring of the input to stay dead at all times.
    const SKIPS_BORDER: bool;

    /// Minimal grid side length supported by this kernel
    const MIN_SIDE: usize = if Self::SKIPS_BORDER { 3 } else { 1 };

    /// Range of rows that must be updated on each generation
    ///
    /// `side` must be at least `MIN_SIDE`.
    #[inline]
    fn updated_rows(side: usize) -> Range<usize> {
        if Self::SKIPS_BORDER {
            1..side - 1
        } else {
            0..side
        }
    }

    /// Check that this kernel can handle grids of a certain side length
    fn check_min_side(side: usize) -> Result<(), Error> {
        if side < Self::MIN_SIDE {
            return Err(Error::GridTooSmall {
                side,
                min: Self::MIN_SIDE,
            });
        }
        Ok(())
    }

    /// Check that this kernel can process a certain input generation
    fn check_input(input: &Grid) -> Result<(), Error> {
        if Self::SKIPS_BORDER && !input.border_is_clear() {
            return Err(Error::LiveBorder);
        }
        Ok(())
    }

    /// Compute a band of the next generation
    ///
    /// - `input` is the full current generation, in linear storage order
    /// - `output` holds the rows `rows` of the next generation, and nothing
    ///   else, i.e. `output[0]` is cell `(0, rows.start)`.
    ///
    /// This method does not check the above properties, but is used to
    /// implement `update_band` which performs some sanity checks.
    fn unchecked_update_band(
        &self,
        input: &[Cell],
        output: &mut [Cell],
        side: usize,
        rows: Range<usize>,
    );

    /// Like `unchecked_update_band()`, but with some sanity checks
    #[inline]
    fn update_band(&self, input: &[Cell], output: &mut [Cell], side: usize, rows: Range<usize>) {
        debug_assert_eq!(input.len(), side * side);
        debug_assert_eq!(output.len(), side * rows.len());
        debug_assert!(rows.is_empty() || {
            let all_rows = Self::updated_rows(side);
            all_rows.start <= rows.start && rows.end <= all_rows.end
        });
        self.unchecked_update_band(input, output, side, rows);
    }
}

/// Compute the next generation on the current thread using a band kernel
///
/// This is the whole `perform_step()` implementation of sequential backends.
pub fn perform_step_sequential<Backend: SimulateBand>(
    backend: &Backend,
    side: usize,
    generations: &mut Generations,
) -> Result<(), Error> {
    check_side(side, generations)?;
    let (input, output) = generations.in_out();
    Backend::check_input(input)?;
    let rows = Backend::updated_rows(side);
    let band = &mut output.as_slice_mut()[side * rows.start..side * rows.end];
    backend.update_band(input.as_slice(), band, side, rows);
    Ok(())
}
