//! Seed patterns that can be placed into a grid before the first generation

use crate::{grid::Grid, Error};

/// Named shape that can be seeded into a grid
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Pattern {
    /// Methuselah that keeps evolving for about 29000 generations
    Lidka,

    /// Small spaceship that moves by one cell diagonally every 4 generations
    Glider,

    /// 2x2 still life
    Block,
}
//
impl Pattern {
    /// Positions `[i, j]` of the live cells, relative to the top-left corner
    pub fn cells(self) -> &'static [[usize; 2]] {
        match self {
            Self::Lidka => &[
                [1, 0],
                [0, 1],
                [2, 1],
                [1, 2],
                [8, 10],
                [8, 11],
                [8, 12],
                [6, 11],
                [5, 12],
                [6, 12],
                [4, 14],
                [5, 14],
                [6, 14],
            ],
            Self::Glider => &[[0, 0], [1, 0], [2, 0], [2, 1], [1, 2]],
            Self::Block => &[[0, 0], [1, 0], [0, 1], [1, 1]],
        }
    }

    /// Size `[width, height]` of the pattern's bounding box
    pub fn extent(self) -> [usize; 2] {
        self.cells().iter().fold([0, 0], |[width, height], &[i, j]| {
            [width.max(i + 1), height.max(j + 1)]
        })
    }

    /// Bring the pattern's cells to life, with its top-left corner at `(x, y)`
    ///
    /// Cells of the grid that are not part of the pattern are left untouched.
    /// If the pattern does not fit, the grid is not modified.
    pub fn place(self, grid: &mut Grid, x: usize, y: usize) -> Result<(), Error> {
        let side = grid.side();
        let [width, height] = self.extent();
        let fits = |start: usize, len: usize| start.checked_add(len).is_some_and(|end| end <= side);
        if !(fits(x, width) && fits(y, height)) {
            return Err(Error::PatternOutOfBounds {
                pattern: self,
                x,
                y,
                side,
            });
        }
        for &[i, j] in self.cells() {
            grid.set(x + i, y + j, true);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extents() {
        assert_eq!(Pattern::Lidka.extent(), [9, 15]);
        assert_eq!(Pattern::Glider.extent(), [3, 3]);
        assert_eq!(Pattern::Block.extent(), [2, 2]);
    }

    #[test]
    fn placement() {
        let mut grid = Grid::new(8).unwrap();
        Pattern::Glider.place(&mut grid, 5, 2).unwrap();
        assert_eq!(
            grid.live_cells(),
            vec![[5, 2], [6, 2], [7, 2], [7, 3], [6, 4]]
        );
        assert_eq!(grid.population(), 5);
    }

    #[test]
    fn out_of_bounds() {
        let mut grid = Grid::new(8).unwrap();
        for (x, y) in [(6, 0), (0, 6), (usize::MAX, 0)] {
            assert_eq!(
                Pattern::Glider.place(&mut grid, x, y),
                Err(Error::PatternOutOfBounds {
                    pattern: Pattern::Glider,
                    x,
                    y,
                    side: 8
                })
            );
        }
        assert_eq!(grid.population(), 0);
        assert!(Pattern::Lidka.place(&mut grid, 0, 0).is_err());
    }
}
