//! Directional input
//!
//! Keys, d-pad buttons and swipes all collapse into one pending heading slot.
//! The slot is last-write-wins and is drained once per tick by the game loop.

use glam::Vec2;

use crate::consts::SWIPE_THRESHOLD;
use crate::sim::{GamePhase, Heading};

/// On-screen d-pad buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DpadButton {
    Up,
    Down,
    Left,
    Right,
}

impl DpadButton {
    /// Parse a button's declared direction. Done once when the button is
    /// wired up; events then carry the typed value.
    pub fn from_str(s: &str) -> Option<Self> {
        Heading::from_str(s).map(|h| match h {
            Heading::Up => DpadButton::Up,
            Heading::Down => DpadButton::Down,
            Heading::Left => DpadButton::Left,
            Heading::Right => DpadButton::Right,
        })
    }

    pub fn heading(self) -> Heading {
        match self {
            DpadButton::Up => Heading::Up,
            DpadButton::Down => Heading::Down,
            DpadButton::Left => Heading::Left,
            DpadButton::Right => Heading::Right,
        }
    }
}

/// Map a `KeyboardEvent.key` value to a heading (arrows and WASD)
pub fn heading_for_key(key: &str) -> Option<Heading> {
    match key {
        "ArrowUp" | "w" | "W" => Some(Heading::Up),
        "ArrowDown" | "s" | "S" => Some(Heading::Down),
        "ArrowLeft" | "a" | "A" => Some(Heading::Left),
        "ArrowRight" | "d" | "D" => Some(Heading::Right),
        _ => None,
    }
}

/// Whether direction keys belong to the game (default action suppressed)
/// rather than the page
pub fn captures_keys(phase: GamePhase) -> bool {
    phase == GamePhase::Running
}

/// Classify a swipe by its dominant axis.
///
/// Screen space: positive `y` is down. The dominant axis must be strictly
/// larger than the other and travel more than [`SWIPE_THRESHOLD`].
pub fn classify_swipe(delta: Vec2) -> Option<Heading> {
    let (ax, ay) = (delta.x.abs(), delta.y.abs());
    if ax > ay && ax > SWIPE_THRESHOLD {
        Some(if delta.x > 0.0 {
            Heading::Right
        } else {
            Heading::Left
        })
    } else if ay > ax && ay > SWIPE_THRESHOLD {
        Some(if delta.y > 0.0 {
            Heading::Down
        } else {
            Heading::Up
        })
    } else {
        None
    }
}

/// Tracks a single touch from start to end
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    start: Option<Vec2>,
}

impl SwipeTracker {
    pub fn begin(&mut self, pos: Vec2) {
        self.start = Some(pos);
    }

    /// Finish the gesture; the tracker resets whether or not it was a swipe
    pub fn end(&mut self, pos: Vec2) -> Option<Heading> {
        let start = self.start.take()?;
        classify_swipe(pos - start)
    }
}

/// Single-slot heading inbox
#[derive(Debug, Clone, Default)]
pub struct InputController {
    pending: Option<Heading>,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a heading. Ignored unless the game is running; reversals of the
    /// committed heading are rejected. Returns whether the slot was written.
    pub fn offer(&mut self, heading: Heading, phase: GamePhase, committed: Heading) -> bool {
        if phase != GamePhase::Running {
            return false;
        }
        if heading.is_opposite(committed) {
            return false;
        }
        self.pending = Some(heading);
        true
    }

    /// Drain the slot for the next tick
    pub fn take(&mut self) -> Option<Heading> {
        self.pending.take()
    }

    pub fn peek(&self) -> Option<Heading> {
        self.pending
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_table() {
        assert_eq!(heading_for_key("ArrowUp"), Some(Heading::Up));
        assert_eq!(heading_for_key("a"), Some(Heading::Left));
        assert_eq!(heading_for_key("S"), Some(Heading::Down));
        assert_eq!(heading_for_key("D"), Some(Heading::Right));
        assert_eq!(heading_for_key("Enter"), None);
        assert_eq!(heading_for_key("x"), None);
    }

    #[test]
    fn test_keys_captured_only_while_running() {
        assert!(captures_keys(GamePhase::Running));
        assert!(!captures_keys(GamePhase::Splash));
        assert!(!captures_keys(GamePhase::Ended));
    }

    #[test]
    fn test_dpad_table() {
        assert_eq!(DpadButton::from_str("up"), Some(DpadButton::Up));
        assert_eq!(DpadButton::from_str("left").map(DpadButton::heading), Some(Heading::Left));
        assert_eq!(DpadButton::from_str(""), None);
    }

    #[test]
    fn test_swipe_classification() {
        assert_eq!(classify_swipe(Vec2::new(31.0, 4.0)), Some(Heading::Right));
        assert_eq!(classify_swipe(Vec2::new(-50.0, 20.0)), Some(Heading::Left));
        assert_eq!(classify_swipe(Vec2::new(3.0, 45.0)), Some(Heading::Down));
        assert_eq!(classify_swipe(Vec2::new(-3.0, -45.0)), Some(Heading::Up));
        // Threshold is exclusive
        assert_eq!(classify_swipe(Vec2::new(30.0, 0.0)), None);
        // Diagonal ties are ambiguous
        assert_eq!(classify_swipe(Vec2::new(60.0, -60.0)), None);
    }

    #[test]
    fn test_swipe_tracker_resets() {
        let mut tracker = SwipeTracker::default();
        assert_eq!(tracker.end(Vec2::new(100.0, 0.0)), None);
        tracker.begin(Vec2::new(10.0, 10.0));
        assert_eq!(tracker.end(Vec2::new(10.0, 100.0)), Some(Heading::Down));
        assert_eq!(tracker.end(Vec2::new(10.0, 200.0)), None);
    }

    #[test]
    fn test_last_write_wins() {
        let mut input = InputController::new();
        assert!(input.offer(Heading::Up, GamePhase::Running, Heading::Right));
        assert!(input.offer(Heading::Down, GamePhase::Running, Heading::Right));
        assert_eq!(input.take(), Some(Heading::Down));
        assert_eq!(input.take(), None);
    }

    #[test]
    fn test_rejects_reversal_of_committed() {
        let mut input = InputController::new();
        assert!(!input.offer(Heading::Left, GamePhase::Running, Heading::Right));
        assert_eq!(input.peek(), None);
    }

    #[test]
    fn test_ignored_unless_running() {
        let mut input = InputController::new();
        assert!(!input.offer(Heading::Up, GamePhase::Splash, Heading::Right));
        assert!(!input.offer(Heading::Up, GamePhase::Ended, Heading::Right));
        assert_eq!(input.peek(), None);
    }
}
