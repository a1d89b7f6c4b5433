//! Conway's Game of Life transition rule (B3/S23)

use data::{Cell, ALIVE, DEAD};

/// State of a cell in the next generation, given its current state and its
/// number of live neighbors
///
/// A live cell survives with 2 or 3 live neighbors, a dead cell is born with
/// exactly 3 live neighbors, every other cell is dead in the next generation.
#[inline(always)]
pub fn next_state(alive: bool, neighbors: u8) -> Cell {
    let next_alive = if alive {
        neighbors == 2 || neighbors == 3
    } else {
        neighbors == 3
    };
    if next_alive {
        ALIVE
    } else {
        DEAD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_table() {
        for neighbors in 0..=8 {
            assert_eq!(
                next_state(true, neighbors),
                (neighbors == 2 || neighbors == 3) as Cell,
                "live cell with {neighbors} neighbors"
            );
            assert_eq!(
                next_state(false, neighbors),
                (neighbors == 3) as Cell,
                "dead cell with {neighbors} neighbors"
            );
        }
    }
}
