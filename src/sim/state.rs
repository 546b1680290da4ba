//! Game state and core simulation types
//!
//! Everything the fixed tick reads or writes lives in [`GameState`].

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::food::place_food;
use super::grid::{CELL_COUNT, Cell, Heading};
use crate::consts::*;

/// Lifecycle phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing has been played yet
    Splash,
    /// Snake is moving
    Running,
    /// A collision ended the session
    Ended,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    /// Head left the board
    Wall,
    /// Head ran into the body
    SelfCollision,
    /// No free cell left to place food on
    BoardFull,
}

impl EndCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndCause::Wall => "wall",
            EndCause::SelfCollision => "self",
            EndCause::BoardFull => "board full",
        }
    }
}

/// The snake body, head first.
///
/// Keeps an occupancy table next to the ordered body so membership checks
/// are O(1).
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
    occupied: Vec<bool>,
}

impl Snake {
    fn empty() -> Self {
        Self {
            body: VecDeque::with_capacity(CELL_COUNT),
            occupied: vec![false; CELL_COUNT],
        }
    }

    /// Lay out a straight snake with its head at `head`, trailing away from
    /// `heading`.
    ///
    /// The head is clamped onto the board and the body stops at the edge, so
    /// a spawn near a wall yields a shorter snake.
    pub fn spawn(head: Cell, heading: Heading, length: usize) -> Self {
        let mut snake = Self::empty();
        let mut cell = Cell::new(head.x.clamp(0, GRID - 1), head.y.clamp(0, GRID - 1));
        for _ in 0..length.max(1) {
            if !snake.push_back(cell) {
                break;
            }
            cell = cell.step(heading.opposite());
        }
        snake
    }

    /// Build a snake from explicit cells (head first).
    ///
    /// Returns `None` for an empty list, an off-board cell or a repeated cell.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Option<Self> {
        let mut snake = Self::empty();
        for cell in cells {
            if !snake.push_back(cell) {
                log::debug!("Rejected snake cell ({}, {})", cell.x, cell.y);
                return None;
            }
        }
        (!snake.body.is_empty()).then_some(snake)
    }

    /// Append a tail cell; false if it is off-board or already taken
    fn push_back(&mut self, cell: Cell) -> bool {
        if self.contains(cell) || !cell.in_bounds() {
            return false;
        }
        self.occupied[cell.index()] = true;
        self.body.push_back(cell);
        true
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.in_bounds() && self.occupied[cell.index()]
    }

    /// Body cells, head first
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    /// Whether every body cell is occupied (no room for food)
    pub fn fills_board(&self) -> bool {
        self.body.len() >= CELL_COUNT
    }

    /// Add a new head. Caller guarantees the cell is in bounds and free.
    pub(crate) fn push_head(&mut self, cell: Cell) {
        self.occupied[cell.index()] = true;
        self.body.push_front(cell);
    }

    /// Drop the tail cell, keeping at least the head
    pub(crate) fn pop_tail(&mut self) -> Option<Cell> {
        if self.body.len() <= 1 {
            return None;
        }
        let tail = self.body.pop_back()?;
        // Cells are unique and on the board, so the slot is now free
        if tail.in_bounds() {
            self.occupied[tail.index()] = false;
        }
        Some(tail)
    }
}

/// Complete game state (deterministic under a fixed seed)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed this state's RNG was built from
    pub seed: u64,
    /// Food placement RNG
    pub(crate) rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    pub snake: Snake,
    /// Committed heading (used by the last tick)
    pub heading: Heading,
    /// Heading the next tick will try to commit
    pub pending: Heading,
    pub food: Cell,
    pub score: u32,
    /// Simulation tick counter for this session
    pub time_ticks: u64,
    /// Set once the session has ended
    pub end_cause: Option<EndCause>,
}

impl GameState {
    /// Create a fresh board in the splash phase
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let heading = Heading::Right;
        let snake = Snake::spawn(Self::spawn_cell(), heading, SPAWN_LENGTH);
        // A spawn-length snake always leaves free cells
        let food = place_food(&snake, &mut rng).unwrap_or(Cell::new(0, 0));
        Self {
            seed,
            rng,
            phase: GamePhase::Splash,
            snake,
            heading,
            pending: heading,
            food,
            score: 0,
            time_ticks: 0,
            end_cause: None,
        }
    }

    /// Fresh board that is already running
    pub fn new_running(seed: u64) -> Self {
        let mut state = Self::new(seed);
        state.phase = GamePhase::Running;
        state
    }

    /// Build a running state around an explicit layout (scenario setup)
    pub fn with_layout(seed: u64, snake: Snake, heading: Heading, food: Cell) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            snake,
            heading,
            pending: heading,
            food,
            score: 0,
            time_ticks: 0,
            end_cause: None,
        }
    }

    /// Head cell of a freshly spawned snake
    pub fn spawn_cell() -> Cell {
        Cell::new(GRID / 2, GRID / 2)
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Mark the session over
    pub(crate) fn end(&mut self, cause: EndCause) {
        self.phase = GamePhase::Ended;
        self.end_cause = Some(cause);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_layout() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Splash);
        assert_eq!(state.snake.len(), SPAWN_LENGTH);
        let cells: Vec<_> = state.snake.cells().collect();
        assert_eq!(
            cells,
            vec![Cell::new(10, 10), Cell::new(9, 10), Cell::new(8, 10)]
        );
        assert_eq!(state.heading, Heading::Right);
        assert!(!state.snake.contains(state.food));
        assert!(state.food.in_bounds());
    }

    #[test]
    fn test_same_seed_same_food() {
        assert_eq!(GameState::new(42).food, GameState::new(42).food);
    }

    #[test]
    fn test_occupancy_follows_body() {
        let mut snake = Snake::spawn(Cell::new(3, 3), Heading::Right, 3);
        assert!(snake.contains(Cell::new(1, 3)));
        snake.push_head(Cell::new(4, 3));
        assert_eq!(snake.pop_tail(), Some(Cell::new(1, 3)));
        assert!(!snake.contains(Cell::new(1, 3)));
        assert!(snake.contains(Cell::new(4, 3)));
        assert_eq!(snake.head(), Cell::new(4, 3));
        assert_eq!(snake.tail(), Cell::new(2, 3));
    }

    #[test]
    fn test_pop_tail_keeps_head() {
        let mut snake = Snake::from_cells([Cell::new(0, 0)]).unwrap();
        assert_eq!(snake.pop_tail(), None);
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn test_from_cells_rejects_bad_layouts() {
        assert!(Snake::from_cells(Vec::<Cell>::new()).is_none());
        assert!(Snake::from_cells([Cell::new(0, 0), Cell::new(-1, 0)]).is_none());
        assert!(Snake::from_cells([Cell::new(3, 3), Cell::new(GRID, 3)]).is_none());
        assert!(
            Snake::from_cells([Cell::new(3, 3), Cell::new(2, 3), Cell::new(3, 3)]).is_none()
        );
    }

    #[test]
    fn test_spawn_stops_at_edge() {
        let snake = Snake::spawn(Cell::new(1, 0), Heading::Right, 3);
        assert_eq!(snake.len(), 2);
        assert!(snake.cells().all(Cell::in_bounds));

        let snake = Snake::spawn(Cell::new(-4, GRID + 2), Heading::Up, 3);
        assert_eq!(snake.head(), Cell::new(0, GRID - 1));
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn test_edge_spawn_occupancy_stays_exact() {
        use crate::sim::{TickInput, tick};

        // Body would trail off the left edge of row 5. Occupancy must never
        // mark a cell of another row.
        let snake = Snake::spawn(Cell::new(1, 5), Heading::Right, 3);
        let mut state = GameState::with_layout(3, snake, Heading::Right, Cell::new(0, 0));

        for _ in 0..3 {
            assert!(!tick(&mut state, &TickInput::default()).is_terminal());
            let body: Vec<Cell> = state.snake.cells().collect();
            for cell in (0..CELL_COUNT).map(Cell::from_index) {
                assert_eq!(state.snake.contains(cell), body.contains(&cell), "{:?}", cell);
            }
        }
        assert!(!state.snake.contains(Cell::new(GRID - 1, 4)));
        assert_eq!(state.snake.head(), Cell::new(4, 5));
    }
}
