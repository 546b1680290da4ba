//! Fixed timestep simulation tick
//!
//! Advances the board by exactly one grid step.

use super::food::place_food;
use super::grid::Heading;
use super::state::{EndCause, GameState};

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Heading drained from the input slot since the previous tick
    pub heading: Option<Heading>,
}

/// What a tick did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Head landed on food this tick
    pub ate: bool,
    /// Set when this tick ended the session
    pub ended: Option<EndCause>,
}

impl TickOutcome {
    /// Outcome of a tick that did not run
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn is_terminal(&self) -> bool {
        self.ended.is_some()
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    if !state.is_running() {
        return TickOutcome::idle();
    }

    // Commit the pending heading; a reversal is dropped here even if it got
    // past the input filter.
    if let Some(heading) = input.heading {
        state.pending = heading;
    }
    if state.pending.is_opposite(state.heading) {
        log::debug!(
            "Dropped reversal {} while heading {}",
            state.pending.as_str(),
            state.heading.as_str()
        );
        state.pending = state.heading;
    } else {
        state.heading = state.pending;
    }

    state.time_ticks += 1;

    let head = state.snake.head().step(state.heading);

    if !head.in_bounds() {
        state.end(EndCause::Wall);
        return TickOutcome {
            ate: false,
            ended: Some(EndCause::Wall),
        };
    }

    // Checked against the pre-move body, tail included
    if state.snake.contains(head) {
        state.end(EndCause::SelfCollision);
        return TickOutcome {
            ate: false,
            ended: Some(EndCause::SelfCollision),
        };
    }

    state.snake.push_head(head);

    if head == state.food {
        state.score += 1;
        match place_food(&state.snake, &mut state.rng) {
            Some(food) => {
                state.food = food;
                TickOutcome {
                    ate: true,
                    ended: None,
                }
            }
            None => {
                state.end(EndCause::BoardFull);
                TickOutcome {
                    ate: true,
                    ended: Some(EndCause::BoardFull),
                }
            }
        }
    } else {
        state.snake.pop_tail();
        TickOutcome {
            ate: false,
            ended: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{GamePhase, Snake};
    use crate::sim::{CELL_COUNT, Cell};
    use proptest::prelude::*;

    fn go(heading: Heading) -> TickInput {
        TickInput {
            heading: Some(heading),
        }
    }

    #[test]
    fn test_first_tick_moves_right() {
        let mut state = GameState::new_running(12345);
        let spawn = GameState::spawn_cell();
        let old_tail = state.snake.tail();
        // Keep food off the path for this check
        state.food = Cell::new(0, 0);

        let outcome = tick(&mut state, &TickInput::default());
        assert_eq!(outcome, TickOutcome::default());
        assert_eq!(state.snake.head(), Cell::new(spawn.x + 1, spawn.y));
        assert_eq!(state.snake.len(), SPAWN_LENGTH);
        assert!(!state.snake.contains(old_tail));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_splash_does_not_tick() {
        let mut state = GameState::new(1);
        let head = state.snake.head();
        assert_eq!(tick(&mut state, &go(Heading::Up)), TickOutcome::idle());
        assert_eq!(state.snake.head(), head);
        assert_eq!(state.heading, Heading::Right);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let snake = Snake::spawn(Cell::new(5, 5), Heading::Right, 3);
        let mut state = GameState::with_layout(9, snake, Heading::Right, Cell::new(6, 5));

        let outcome = tick(&mut state, &TickInput::default());
        assert!(outcome.ate);
        assert!(!outcome.is_terminal());
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.snake.tail(), Cell::new(3, 5));
        assert!(!state.snake.contains(state.food));
    }

    #[test]
    fn test_wall_ends_game() {
        let snake = Snake::spawn(Cell::new(GRID - 1, 4), Heading::Right, 3);
        let mut state = GameState::with_layout(2, snake, Heading::Right, Cell::new(0, 0));

        let outcome = tick(&mut state, &TickInput::default());
        assert_eq!(outcome.ended, Some(EndCause::Wall));
        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.end_cause, Some(EndCause::Wall));
        // Terminal ticks leave the body untouched
        assert_eq!(state.snake.head(), Cell::new(GRID - 1, 4));

        // Nothing moves once ended
        assert_eq!(tick(&mut state, &TickInput::default()), TickOutcome::idle());
    }

    #[test]
    fn test_self_collision() {
        // Head at (5,5) turning up into its own body at (5,4)
        let snake = Snake::from_cells([
            Cell::new(5, 5),
            Cell::new(6, 5),
            Cell::new(6, 4),
            Cell::new(5, 4),
            Cell::new(4, 4),
        ])
        .unwrap();
        let mut state = GameState::with_layout(3, snake, Heading::Left, Cell::new(0, 0));
        let outcome = tick(&mut state, &go(Heading::Up));
        assert_eq!(outcome.ended, Some(EndCause::SelfCollision));
        assert_eq!(state.phase, GamePhase::Ended);
    }

    #[test]
    fn test_moving_into_vacating_tail_is_terminal() {
        // 2x2 loop: head (5,5), tail (5,4); moving up targets the tail cell
        let snake = Snake::from_cells([
            Cell::new(5, 5),
            Cell::new(6, 5),
            Cell::new(6, 4),
            Cell::new(5, 4),
        ])
        .unwrap();
        let mut state = GameState::with_layout(3, snake, Heading::Left, Cell::new(0, 0));
        let outcome = tick(&mut state, &go(Heading::Up));
        assert_eq!(outcome.ended, Some(EndCause::SelfCollision));
    }

    #[test]
    fn test_reversal_dropped_at_commit() {
        let mut state = GameState::new_running(5);
        state.food = Cell::new(0, 0);
        let head = state.snake.head();

        let outcome = tick(&mut state, &go(Heading::Left));
        assert!(!outcome.is_terminal());
        assert_eq!(state.heading, Heading::Right);
        assert_eq!(state.pending, Heading::Right);
        assert_eq!(state.snake.head(), head.step(Heading::Right));
    }

    #[test]
    fn test_turn_then_reverse_across_ticks() {
        let mut state = GameState::new_running(5);
        state.food = Cell::new(0, 0);
        tick(&mut state, &go(Heading::Up));
        assert_eq!(state.heading, Heading::Up);
        // Right -> Up -> Left is two quarter turns, both legal
        tick(&mut state, &go(Heading::Left));
        assert_eq!(state.heading, Heading::Left);
        assert!(state.is_running());
    }

    #[test]
    fn test_last_food_fills_board() {
        // Snake covers every cell but one; food sits in the hole next to head
        let hole = Cell::new(0, GRID - 1);
        let mut cells: Vec<Cell> = Vec::new();
        // Boustrophedon walk; with an even GRID it ends on the hole
        for y in 0..GRID {
            let row: Vec<Cell> = if y % 2 == 0 {
                (0..GRID).map(|x| Cell::new(x, y)).collect()
            } else {
                (0..GRID).rev().map(|x| Cell::new(x, y)).collect()
            };
            cells.extend(row);
        }
        cells.retain(|c| *c != hole);
        cells.reverse();
        let snake = Snake::from_cells(cells).unwrap();
        assert_eq!(snake.head(), Cell::new(1, GRID - 1));
        let mut state = GameState::with_layout(1, snake, Heading::Left, hole);

        let outcome = tick(&mut state, &TickInput::default());
        assert!(outcome.ate);
        assert_eq!(outcome.ended, Some(EndCause::BoardFull));
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), CELL_COUNT);
        assert_eq!(state.phase, GamePhase::Ended);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new_running(99999);
        let mut state2 = GameState::new_running(99999);

        let inputs = [
            TickInput::default(),
            go(Heading::Up),
            go(Heading::Left),
            TickInput::default(),
            go(Heading::Down),
        ];

        for input in &inputs {
            tick(&mut state1, input);
            tick(&mut state2, input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.food, state2.food);
        assert!(state1.snake.cells().eq(state2.snake.cells()));
    }

    fn heading_strategy() -> impl Strategy<Value = Option<Heading>> {
        prop_oneof![
            Just(None),
            Just(Some(Heading::Up)),
            Just(Some(Heading::Down)),
            Just(Some(Heading::Left)),
            Just(Some(Heading::Right)),
        ]
    }

    proptest! {
        #[test]
        fn prop_tick_invariants(
            seed in any::<u64>(),
            inputs in proptest::collection::vec(heading_strategy(), 1..200),
        ) {
            let mut state = GameState::new_running(seed);
            for heading in inputs {
                if !state.is_running() {
                    break;
                }
                let before_len = state.snake.len();
                let before_heading = state.heading;
                let before_score = state.score;

                let outcome = tick(&mut state, &TickInput { heading });

                // Never a 180° turn
                prop_assert!(!state.heading.is_opposite(before_heading));

                if outcome.is_terminal() && !outcome.ate {
                    prop_assert_eq!(state.snake.len(), before_len);
                    continue;
                }

                // Grows by exactly one iff food was eaten
                if outcome.ate {
                    prop_assert_eq!(state.snake.len(), before_len + 1);
                    prop_assert_eq!(state.score, before_score + 1);
                } else {
                    prop_assert_eq!(state.snake.len(), before_len);
                    prop_assert_eq!(state.score, before_score);
                }

                if state.is_running() {
                    prop_assert!(!state.snake.contains(state.food));
                    prop_assert!(state.food.in_bounds());
                }

                // No self-overlap while alive
                let mut seen = std::collections::HashSet::new();
                for cell in state.snake.cells() {
                    prop_assert!(cell.in_bounds());
                    prop_assert!(seen.insert(cell));
                }
            }
        }
    }
}
