//! Per-frame snapshot and the pixel-art frame builder
//!
//! The builder is a pure function of the snapshot: it never touches game
//! state and can run any number of times between ticks.

use serde::{Deserialize, Serialize};

use super::sprites;
use super::vertex::{Vertex, colors};
use crate::consts::GRID;
use crate::sim::{Cell, GamePhase, GameState, Heading};

/// Everything the presentation layer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    /// Snake cells, head first
    pub snake: Vec<Cell>,
    pub food: Cell,
    /// Heading the head sprite faces
    pub heading: Heading,
    pub phase: GamePhase,
    pub score: u32,
    pub best: u32,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState, best: u32) -> Self {
        Self {
            snake: state.snake.cells().collect(),
            food: state.food,
            heading: state.heading,
            phase: state.phase,
            score: state.score,
            best,
        }
    }
}

/// Decorative S-coiled snake shown behind the splash screen, head first
const SPLASH_COIL: [(i32, i32); 25] = [
    (12, 5),
    (11, 5),
    (10, 5),
    (9, 5),
    (8, 5),
    (7, 5),
    (7, 6),
    (7, 7),
    (7, 8),
    (8, 8),
    (9, 8),
    (10, 8),
    (11, 8),
    (11, 9),
    (11, 10),
    (11, 11),
    (10, 11),
    (9, 11),
    (8, 11),
    (7, 11),
    (7, 12),
    (7, 13),
    (8, 13),
    (9, 13),
    (10, 13),
];

/// Cells of the splash coil, head first
fn splash_coil() -> impl Iterator<Item = Cell> {
    SPLASH_COIL.into_iter().map(|(x, y)| Cell::new(x, y))
}

/// Frame layout options
#[derive(Debug, Clone, Copy)]
pub struct FrameStyle {
    /// Side of the square board in pixels
    pub board_px: f32,
    pub grid_lines: bool,
}

impl FrameStyle {
    /// Whole-pixel cell size so sprites stay crisp
    pub fn cell_size(&self) -> f32 {
        (self.board_px / GRID as f32).floor().max(1.0)
    }
}

/// Build the triangle list for one frame.
///
/// Draw order: background, grid, egg, then snake tail-first so the head ends
/// up on top. The splash frame shows the coil instead of the board.
pub fn build_frame(snapshot: &FrameSnapshot, style: &FrameStyle) -> Vec<Vertex> {
    let s = style.cell_size();
    let size = s * GRID as f32;
    let mut out = Vec::with_capacity((snapshot.snake.len() + 8) * 36);

    sprites::rect(&mut out, 0.0, 0.0, size, size, colors::BACKGROUND);

    if style.grid_lines {
        for i in 0..=GRID {
            let p = (i as f32 * s).min(size - 1.0);
            sprites::rect(&mut out, p, 0.0, 1.0, size, colors::GRID_LINE);
            sprites::rect(&mut out, 0.0, p, size, 1.0, colors::GRID_LINE);
        }
    }

    if snapshot.phase == GamePhase::Splash {
        let coil: Vec<Cell> = splash_coil().collect();
        draw_snake(&mut out, &coil, Heading::Right, s);
        return out;
    }

    sprites::egg(&mut out, snapshot.food.x as f32 * s, snapshot.food.y as f32 * s, s);
    draw_snake(&mut out, &snapshot.snake, snapshot.heading, s);
    out
}

fn draw_snake(out: &mut Vec<Vertex>, cells: &[Cell], heading: Heading, s: f32) {
    for (i, cell) in cells.iter().enumerate().rev() {
        let (x, y) = (cell.x as f32 * s, cell.y as f32 * s);
        if i == 0 {
            sprites::head(out, x, y, s, heading);
        } else {
            sprites::segment(out, x, y, s);
        }
    }
}
