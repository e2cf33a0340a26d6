use rand::seq::IteratorRandom;
use rand::Rng;

use crate::grid::{Grid, Pos};
use crate::snake::Snake;

/// Random samples tried before falling back to scanning for free cells.
pub const MAX_SAMPLES: usize = 64;

/// Picks a uniformly random cell that the snake does not occupy.
///
/// Rejection sampling is used while the board is mostly empty. Once the snake
/// covers half the board, or sampling keeps missing, the free cells are
/// enumerated instead. Returns `None` only when no free cell exists.
pub fn place_food(snake: &Snake, grid: Grid, rng: &mut impl Rng) -> Option<Pos> {
    let cells = grid.cell_count();
    if cells == 0 || snake.len() >= cells {
        return None;
    }

    if snake.len() * 2 < cells {
        let size = grid.size() as i32;
        for _ in 0..MAX_SAMPLES {
            let pos = Pos {
                x: rng.gen_range(0..size),
                y: rng.gen_range(0..size),
            };
            if !snake.occupies(pos) {
                return Some(pos);
            }
        }
    }

    grid.cells().filter(|&pos| !snake.occupies(pos)).choose(rng)
}
