//! Fixed-timestep game loop driver
//!
//! The platform layer calls [`GameLoop::frame`] once per presentation frame
//! with the elapsed wall-clock time. The loop converts that into whole
//! simulation ticks, routes tick outcomes to audio and the best score, and
//! hands back one snapshot to draw.

use serde::Serialize;

use crate::audio::{AudioManager, SoundEffect};
use crate::autopilot;
use crate::best_score::BestScoreStore;
use crate::consts::TICK_MS;
use crate::input::InputController;
use crate::renderer::FrameSnapshot;
use crate::settings::Settings;
use crate::sim::{EndCause, GamePhase, GameState, Heading, TickInput, tick};
use crate::storage::KeyValueStore;

/// Something that happened during a frame's ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    FoodEaten {
        score: u32,
    },
    GameOver {
        cause: EndCause,
        score: u32,
        /// Score beat the stored best
        new_best: bool,
    },
}

/// Result of one presentation frame
#[derive(Debug, Clone)]
pub struct FrameReport {
    /// Simulation ticks run during this frame
    pub ticks: u32,
    pub events: Vec<GameEvent>,
    /// Whether another frame should be scheduled
    pub keep_running: bool,
    pub snapshot: FrameSnapshot,
}

/// One play-through's state plus the input slot feeding it
#[derive(Debug, Clone)]
pub struct GameSession {
    pub state: GameState,
    pub input: InputController,
    base_seed: u64,
    sessions_started: u64,
}

impl GameSession {
    /// Splash board for `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            state: GameState::new(seed),
            input: InputController::new(),
            base_seed: seed,
            sessions_started: 0,
        }
    }

    /// Throw away the current board and start a new one.
    /// Each session gets its own seed derived from the base seed.
    fn begin(&mut self) {
        let seed = self.base_seed.wrapping_add(self.sessions_started);
        self.sessions_started += 1;
        self.state = GameState::new_running(seed);
        self.input.clear();
        log::info!("Session {} started (seed {})", self.sessions_started, seed);
    }

    pub fn sessions_started(&self) -> u64 {
        self.sessions_started
    }
}

/// Owns the session, timing, audio and best score
pub struct GameLoop<S: KeyValueStore> {
    session: GameSession,
    best: BestScoreStore<S>,
    audio: AudioManager,
    accumulator_ms: f64,
    paused: bool,
    autopilot: bool,
}

impl<S: KeyValueStore> GameLoop<S> {
    pub fn new(store: S, settings: &Settings, seed: u64) -> Self {
        let mut audio = AudioManager::new(settings.effective_volume());
        audio.set_muted(settings.start_muted);
        Self {
            session: GameSession::new(seed),
            best: BestScoreStore::new(store),
            audio,
            accumulator_ms: 0.0,
            paused: false,
            autopilot: settings.autopilot,
        }
    }

    /// Start a session from the splash or game-over screen.
    /// Returns false (and changes nothing) while a session is running.
    pub fn start(&mut self) -> bool {
        if self.session.state.phase == GamePhase::Running {
            log::debug!("Start ignored: already running");
            return false;
        }
        self.session.begin();
        self.accumulator_ms = 0.0;
        self.paused = false;
        true
    }

    /// Same transition as [`start`](Self::start), from the replay button
    pub fn restart(&mut self) -> bool {
        self.start()
    }

    /// Flip the mute flag; returns whether sound is now on
    pub fn toggle_sound(&mut self) -> bool {
        self.audio.toggle()
    }

    pub fn pause(&mut self) {
        if self.session.state.is_running() && !self.paused {
            self.paused = true;
            log::info!("Paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Time spent paused never turns into ticks
            self.accumulator_ms = 0.0;
            log::info!("Resumed");
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_autopilot(&mut self, on: bool) {
        self.autopilot = on;
        log::info!("Autopilot {}", if on { "on" } else { "off" });
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    /// Feed a direction from any input source.
    /// Returns whether it was accepted into the pending slot.
    pub fn offer_heading(&mut self, heading: Heading) -> bool {
        if self.paused {
            return false;
        }
        let state = &self.session.state;
        self.session.input.offer(heading, state.phase, state.heading)
    }

    /// Advance by `delta_ms` of wall-clock time
    pub fn frame(&mut self, delta_ms: f64) -> FrameReport {
        let mut ticks = 0;
        let mut events = Vec::new();

        if self.session.state.is_running() && !self.paused {
            if delta_ms.is_finite() && delta_ms > 0.0 {
                self.accumulator_ms += delta_ms;
            }

            while self.accumulator_ms >= TICK_MS {
                self.accumulator_ms -= TICK_MS;
                ticks += 1;
                if self.step(&mut events) {
                    self.accumulator_ms = 0.0;
                    break;
                }
            }
        }

        FrameReport {
            ticks,
            events,
            keep_running: self.session.state.is_running() && !self.paused,
            snapshot: self.snapshot(),
        }
    }

    /// Run one tick and route its outcome. Returns true on a terminal tick.
    fn step(&mut self, events: &mut Vec<GameEvent>) -> bool {
        if self.autopilot {
            if let Some(heading) = autopilot::choose_heading(&self.session.state) {
                let state = &self.session.state;
                self.session.input.offer(heading, state.phase, state.heading);
            }
        }

        let input = TickInput {
            heading: self.session.input.take(),
        };
        let outcome = tick(&mut self.session.state, &input);
        let score = self.session.state.score;

        if outcome.ate {
            log::debug!("Food eaten, score {}", score);
            self.audio.play(SoundEffect::Nom);
            events.push(GameEvent::FoodEaten { score });
        }

        if let Some(cause) = outcome.ended {
            let new_best = self.best.submit(score);
            log::info!(
                "Game over ({}) after {} ticks, score {}",
                cause.as_str(),
                self.session.state.time_ticks,
                score
            );
            events.push(GameEvent::GameOver {
                cause,
                score,
                new_best,
            });
            return true;
        }
        false
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(&self.session.state, self.best.best())
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn state(&self) -> &GameState {
        &self.session.state
    }

    pub fn best(&self) -> &BestScoreStore<S> {
        &self.best
    }

    pub fn audio(&self) -> &AudioManager {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager {
        &mut self.audio
    }
}
