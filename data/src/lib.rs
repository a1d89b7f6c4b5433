//! Data format used by the Game of Life simulation
//!
//! The simulation state is a pair of dense square grids of bytes, one byte per
//! cell, where 0 means dead and 1 means alive. One grid holds the current
//! generation and is only read from during an update, the other receives the
//! next generation.

pub mod grid;
pub mod patterns;

use thiserror::Error;

/// State of a single cell, either [`DEAD`] or [`ALIVE`]
pub type Cell = u8;

/// Value of a dead cell
pub const DEAD: Cell = 0;

/// Value of a live cell
pub const ALIVE: Cell = 1;

/// Things that can go wrong when setting up simulation data
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum Error {
    /// Grids must contain at least one cell
    #[error("grid side length must be at least 1")]
    EmptyGrid,

    /// A seed pattern did not fit inside of the grid
    #[error("pattern {pattern:?} placed at ({x}, {y}) does not fit in a grid of side {side}")]
    PatternOutOfBounds {
        /// Pattern that was being placed
        pattern: patterns::Pattern,

        /// Requested position of the pattern's top-left corner on the fast axis
        x: usize,

        /// Requested position of the pattern's top-left corner on the slow axis
        y: usize,

        /// Side length of the target grid
        side: usize,
    },
}
