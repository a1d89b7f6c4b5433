//! Dense cell grids and the current/next generation pair

use crate::{Cell, Error, ALIVE, DEAD};
use ndarray::{Array2, ArrayView2};

/// Square grid of cells
///
/// Cells are addressed by a pair `(i, j)` where `i` is the fast-varying axis
/// (column) and `j` is the slow-varying axis (row). The linear index of a cell
/// in [`Grid::as_slice()`] is `i + side * j`, so each row is a contiguous run
/// of `side` cells.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid(Array2<Cell>);
//
impl Grid {
    /// Set up a grid of dead cells
    pub fn new(side: usize) -> Result<Self, Error> {
        if side == 0 {
            return Err(Error::EmptyGrid);
        }
        Ok(Self(Array2::zeros([side, side])))
    }

    /// Side length of the grid
    pub fn side(&self) -> usize {
        self.0.nrows()
    }

    /// Linear index of cell `(i, j)` in [`Grid::as_slice()`]
    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        i + self.side() * j
    }

    /// Truth that cell `(i, j)` is alive
    pub fn get(&self, i: usize, j: usize) -> bool {
        self.0[[j, i]] != DEAD
    }

    /// Make cell `(i, j)` alive or dead
    pub fn set(&mut self, i: usize, j: usize, alive: bool) {
        self.0[[j, i]] = if alive { ALIVE } else { DEAD };
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.0.fill(DEAD);
    }

    /// Cells in linear storage order
    #[inline]
    pub fn as_slice(&self) -> &[Cell] {
        let Some(cells) = self.0.as_slice() else {
            unreachable!("grids are always stored in standard layout")
        };
        cells
    }

    /// Mutable cells in linear storage order
    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [Cell] {
        let Some(cells) = self.0.as_slice_mut() else {
            unreachable!("grids are always stored in standard layout")
        };
        cells
    }

    /// 2D view of the cells, indexed as `[j, i]`
    pub fn view(&self) -> ArrayView2<Cell> {
        self.0.view()
    }

    /// Number of live cells
    ///
    /// This doubles as a cheap checksum when comparing the outcome of two
    /// simulation runs.
    pub fn population(&self) -> u64 {
        self.as_slice().iter().map(|&cell| u64::from(cell)).sum()
    }

    /// Truth that every cell of the outermost ring is dead
    pub fn border_is_clear(&self) -> bool {
        let side = self.side();
        let last = side - 1;
        let cells = &self.0;
        (0..side).all(|k| {
            cells[[0, k]] == DEAD
                && cells[[last, k]] == DEAD
                && cells[[k, 0]] == DEAD
                && cells[[k, last]] == DEAD
        })
    }

    /// Positions `[i, j]` of the live cells, in storage order
    pub fn live_cells(&self) -> Vec<[usize; 2]> {
        self.0
            .indexed_iter()
            .filter(|(_, cell)| **cell != DEAD)
            .map(|((j, i), _)| [i, j])
            .collect()
    }
}

/// Pair of grids where one holds the current generation and the other receives
/// the next one
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Generations([Grid; 2]);
//
impl Generations {
    /// Set up a pair of all-dead grids
    pub fn new(side: usize) -> Result<Self, Error> {
        Ok(Self([Grid::new(side)?, Grid::new(side)?]))
    }

    /// Side length of the grids
    pub fn side(&self) -> usize {
        self.0[0].side()
    }

    /// Access the current generation
    pub fn current(&self) -> &Grid {
        &self.0[0]
    }

    /// Modify the current generation, e.g. to seed patterns into it
    pub fn current_mut(&mut self) -> &mut Grid {
        &mut self.0[0]
    }

    /// Access the current generation as input and the next one as output
    pub fn in_out(&mut self) -> (&Grid, &mut Grid) {
        let [input, output] = &mut self.0;
        (input, output)
    }

    /// Make the next generation become the current one
    pub fn flip(&mut self) {
        let [input, output] = &mut self.0;
        std::mem::swap(input, output);
    }

    /// Number of live cells in the current generation
    pub fn population(&self) -> u64 {
        self.current().population()
    }
}
