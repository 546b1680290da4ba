//! Pixel Snake - A retro pixel-art grid Snake game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, snake, food, fixed tick)
//! - `game_loop`: Fixed-timestep driver and session lifecycle
//! - `input`: Keyboard/d-pad/swipe to heading translation
//! - `renderer`: Pixel-art frame builder and WebGPU pipeline
//! - `audio`: Procedural "nom" sound effect
//! - `best_score`: Durable personal best
//! - `storage`: Key-value persistence backends
//! - `autopilot`: Greedy steering for idle/demo mode
//! - `settings`: Persisted player preferences

pub mod audio;
pub mod autopilot;
pub mod best_score;
pub mod game_loop;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod storage;

pub use best_score::BestScoreStore;
pub use game_loop::{FrameReport, GameEvent, GameLoop, GameSession};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Grid is GRID x GRID cells
    pub const GRID: i32 = 20;
    /// Simulation tick length in milliseconds
    pub const TICK_MS: f64 = 110.0;
    /// Snake length when a session starts
    pub const SPAWN_LENGTH: usize = 3;

    /// Minimum swipe travel along the dominant axis (CSS pixels)
    pub const SWIPE_THRESHOLD: f32 = 30.0;

    /// Persisted best score key
    pub const BEST_SCORE_KEY: &str = "snake-best-score";
    /// Persisted settings key
    pub const SETTINGS_KEY: &str = "snake-settings";
}
