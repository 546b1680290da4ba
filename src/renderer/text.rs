//! Plain-text board rendering for terminals and logs

use super::frame::FrameSnapshot;
use crate::consts::GRID;
use crate::sim::{Cell, Heading};

fn head_glyph(heading: Heading) -> char {
    match heading {
        Heading::Up => '^',
        Heading::Down => 'v',
        Heading::Left => '<',
        Heading::Right => '>',
    }
}

/// One line per row: `.` empty, `o` body, `*` food, arrow for the head
pub fn render_text(snapshot: &FrameSnapshot) -> String {
    let mut rows = vec![vec!['.'; GRID as usize]; GRID as usize];
    let mut put = |cell: Cell, ch: char| {
        if cell.in_bounds() {
            rows[cell.y as usize][cell.x as usize] = ch;
        }
    };

    put(snapshot.food, '*');
    for cell in snapshot.snake.iter().skip(1) {
        put(*cell, 'o');
    }
    if let Some(head) = snapshot.snake.first() {
        put(*head, head_glyph(snapshot.heading));
    }

    let mut out = String::with_capacity((GRID as usize + 1) * GRID as usize);
    for row in rows {
        out.extend(row);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;

    #[test]
    fn test_spawn_board() {
        let state = GameState::new_running(1);
        let text = render_text(&FrameSnapshot::capture(&state, 0));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), GRID as usize);
        assert!(lines.iter().all(|l| l.len() == GRID as usize));
        assert_eq!(&lines[10][8..11], "oo>");
        assert_eq!(text.matches('*').count(), 1);
    }
}
