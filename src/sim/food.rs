//! Food placement
//!
//! Rejection sampling is cheap while the board is mostly empty. Once a draw
//! budget is spent the free cells are enumerated and one is picked uniformly,
//! so dense late-game boards never spin.

use rand::Rng;

use super::grid::{CELL_COUNT, Cell};
use super::state::Snake;
use crate::consts::GRID;

/// Random draws before falling back to enumeration
pub const MAX_REJECTION_ATTEMPTS: u32 = 64;

/// Pick a uniformly random cell not occupied by `snake`.
///
/// Returns `None` when the snake covers the whole board.
pub fn place_food<R: Rng + ?Sized>(snake: &Snake, rng: &mut R) -> Option<Cell> {
    if snake.fills_board() {
        return None;
    }

    for _ in 0..MAX_REJECTION_ATTEMPTS {
        let cell = Cell::new(rng.random_range(0..GRID), rng.random_range(0..GRID));
        if !snake.contains(cell) {
            return Some(cell);
        }
    }

    let free: Vec<Cell> = (0..CELL_COUNT)
        .map(Cell::from_index)
        .filter(|c| !snake.contains(*c))
        .collect();
    if free.is_empty() {
        return None;
    }
    log::debug!("Food placed by enumeration ({} free cells)", free.len());
    Some(free[rng.random_range(0..free.len())])
}
