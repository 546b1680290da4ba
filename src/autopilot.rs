//! Idle/demo mode steering
//!
//! Greedy: take the safe, non-reversing heading whose next cell is closest to
//! the food. Keeping straight wins ties.

use crate::sim::{GameState, Heading};

/// Pick the next heading, or `None` when every move is fatal
pub fn choose_heading(state: &GameState) -> Option<Heading> {
    let head = state.snake.head();
    Heading::ALL
        .into_iter()
        .filter(|h| !h.is_opposite(state.heading))
        .map(|h| (h, head.step(h)))
        .filter(|&(_, next)| next.in_bounds() && !state.snake.contains(next))
        .min_by_key(|&(h, next)| (next.distance(state.food), h != state.heading))
        .map(|(h, _)| h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Cell, Snake, TickInput, tick};

    fn layout(cells: &[(i32, i32)], heading: Heading, food: (i32, i32)) -> GameState {
        let snake = Snake::from_cells(cells.iter().map(|&(x, y)| Cell::new(x, y))).unwrap();
        GameState::with_layout(1, snake, heading, Cell::new(food.0, food.1))
    }

    #[test]
    fn test_heads_for_food() {
        let state = layout(&[(5, 5), (4, 5), (3, 5)], Heading::Right, (5, 1));
        assert_eq!(choose_heading(&state), Some(Heading::Up));
    }

    #[test]
    fn test_keeps_straight_on_tie() {
        let state = layout(&[(5, 5), (4, 5), (3, 5)], Heading::Right, (9, 5));
        assert_eq!(choose_heading(&state), Some(Heading::Right));
    }

    #[test]
    fn test_never_reverses() {
        // Food directly behind the head
        let state = layout(&[(5, 5), (4, 5), (3, 5)], Heading::Right, (1, 5));
        assert_ne!(choose_heading(&state), Some(Heading::Left));
    }

    #[test]
    fn test_avoids_wall() {
        let state = layout(&[(19, 5), (18, 5), (17, 5)], Heading::Right, (19, 0));
        assert_eq!(choose_heading(&state), Some(Heading::Up));
    }

    #[test]
    fn test_boxed_in() {
        // Head in the corner with its own body above
        let state = layout(
            &[(19, 19), (18, 19), (18, 18), (19, 18)],
            Heading::Right,
            (0, 0),
        );
        assert_eq!(choose_heading(&state), None);
    }

    #[test]
    fn test_survives_a_while() {
        let mut state = GameState::new_running(12);
        for _ in 0..200 {
            let heading = choose_heading(&state);
            let outcome = tick(&mut state, &TickInput { heading });
            if outcome.is_terminal() {
                break;
            }
        }
        assert!(state.score >= 3, "score {}", state.score);
    }
}
