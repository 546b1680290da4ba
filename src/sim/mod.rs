//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod food;
pub mod grid;
pub mod state;
pub mod tick;

pub use food::place_food;
pub use grid::{CELL_COUNT, Cell, Heading};
pub use state::{EndCause, GamePhase, GameState, Snake};
pub use tick::{TickInput, TickOutcome, tick};
