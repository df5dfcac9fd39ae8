use std::mem;
use std::time::Instant;

use log::{debug, info, warn};

use crate::config::{GameConfig, SpeedSetting};
use crate::direction::Direction;
use crate::game::{Game, GameEnding, TickOutcome};
use crate::grid::Cell;
use crate::input::GameInput;
use crate::scheduler::TickScheduler;
use crate::score::HighScoreStore;

/// Lifecycle phase of a play session.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum SessionPhase {
    SelectSpeed,
    Ready,
    Running,
    Paused,
    GameOver,
}

/// Final score handed to the leaderboard collaborator after a game ends.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ScoreSubmission {
    pub player: String,
    pub score: u32,
}

/// Notifications for hosts: sound, leaderboard submission, redraw hints.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SessionEvent {
    PhaseChanged {
        from: SessionPhase,
        to: SessionPhase,
    },
    FoodConsumed {
        score: u32,
    },
    HighScoreUpdated {
        high_score: u32,
    },
    GameOver {
        ending: GameEnding,
        submission: ScoreSubmission,
    },
}

/// Read-only view of everything a renderer needs.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snapshot {
    pub board_size: u16,
    pub snake: Vec<Cell>,
    pub food: Option<Cell>,
    pub direction: Direction,
    pub score: u32,
    pub high_score: u32,
    pub speed: SpeedSetting,
    pub phase: SessionPhase,
    pub ending: Option<GameEnding>,
    pub tick_count: u64,
    pub player: String,
    pub show_leaderboard: bool,
}

/// Authoritative game engine: owns the board, the phase machine, the tick
/// timer and the high-score port.
#[derive(Debug)]
pub struct Session<S: HighScoreStore> {
    config: GameConfig,
    game: Game,
    phase: SessionPhase,
    speed: SpeedSetting,
    high_score: u32,
    ending: Option<GameEnding>,
    player: String,
    scheduler: TickScheduler,
    events: Vec<SessionEvent>,
    store: S,
    seed: Option<u64>,
    games_started: u64,
    show_leaderboard: bool,
}

impl<S: HighScoreStore> Session<S> {
    /// Creates a session in `SelectSpeed`, reading the high score once.
    pub fn new(config: GameConfig, store: S, player: impl Into<String>) -> Self {
        let high_score = match store.get() {
            Ok(score) => score,
            Err(error) => {
                warn!("failed to load high score, starting from 0: {error}");
                0
            }
        };

        Self {
            game: Game::new(&config),
            config,
            phase: SessionPhase::SelectSpeed,
            speed: SpeedSetting::default(),
            high_score,
            ending: None,
            player: player.into(),
            scheduler: TickScheduler::new(),
            events: Vec::new(),
            store,
            seed: None,
            games_started: 0,
            show_leaderboard: false,
        }
    }

    /// Makes food placement reproducible; each reset derives a fresh seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.game = self.fresh_game();
        self
    }

    /// Preselects a speed without leaving `SelectSpeed`.
    #[must_use]
    pub fn with_speed(mut self, speed: SpeedSetting) -> Self {
        self.speed = speed;
        self
    }

    /// Dispatches one input event to the matching handler.
    pub fn handle_input(&mut self, input: GameInput, now: Instant) {
        match input {
            GameInput::Direction(direction) => {
                self.request_direction(direction);
            }
            GameInput::SelectSpeed(speed) => self.select_speed(speed, now),
            GameInput::Pause => self.toggle_pause(now),
            GameInput::Confirm => self.confirm(now),
            GameInput::Reset => self.reset(now),
            GameInput::ToggleLeaderboard => self.toggle_leaderboard(),
            GameInput::Quit => {}
        }
    }

    /// Chooses the tick period. Accepted before play starts.
    pub fn select_speed(&mut self, speed: SpeedSetting, now: Instant) {
        match self.phase {
            SessionPhase::SelectSpeed | SessionPhase::Ready => {
                self.speed = speed;
                info!("speed set to {speed}");
                self.enter_phase(SessionPhase::Ready, now);
            }
            _ => debug!("ignoring speed selection in {:?}", self.phase),
        }
    }

    /// Starts play from `Ready`.
    pub fn confirm(&mut self, now: Instant) {
        if self.phase == SessionPhase::Ready {
            self.enter_phase(SessionPhase::Running, now);
        }
    }

    /// Buffers a heading change; honoured only while running.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.phase != SessionPhase::Running {
            return false;
        }
        self.game.request_direction(direction)
    }

    /// Flips between `Running` and `Paused`; a no-op in every other phase.
    pub fn toggle_pause(&mut self, now: Instant) {
        let next = match self.phase {
            SessionPhase::Running => SessionPhase::Paused,
            SessionPhase::Paused => SessionPhase::Running,
            _ => return,
        };
        self.enter_phase(next, now);
    }

    /// Starts over from `GameOver`, keeping the high score.
    pub fn reset(&mut self, now: Instant) {
        if self.phase != SessionPhase::GameOver {
            return;
        }

        self.games_started += 1;
        self.game = self.fresh_game();
        self.ending = None;
        self.enter_phase(SessionPhase::SelectSpeed, now);
    }

    /// Shows or hides the leaderboard panel. Allowed in every phase and
    /// never touches the tick timer.
    pub fn toggle_leaderboard(&mut self) {
        self.show_leaderboard = !self.show_leaderboard;
    }

    /// Runs the due tick, if any. Returns the tick outcome when one ran.
    pub fn update(&mut self, now: Instant) -> Option<TickOutcome> {
        if self.phase != SessionPhase::Running {
            return None;
        }
        self.scheduler.poll(now)?;

        let outcome = self.game.tick();
        match outcome {
            TickOutcome::Moved => {}
            TickOutcome::Ate { score } => {
                debug!("food consumed, score {score}");
                self.events.push(SessionEvent::FoodConsumed { score });
            }
            TickOutcome::Ended(ending) => {
                if ending == GameEnding::BoardFilled {
                    self.events.push(SessionEvent::FoodConsumed {
                        score: self.game.score,
                    });
                }
                self.finish(ending, now);
            }
        }

        Some(outcome)
    }

    /// Removes and returns queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        mem::take(&mut self.events)
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board_size: self.game.grid().size(),
            snake: self.game.snake.segments().copied().collect(),
            food: self.game.food_cell(),
            direction: self.game.direction(),
            score: self.game.score,
            high_score: self.high_score,
            speed: self.speed,
            phase: self.phase,
            ending: self.ending,
            tick_count: self.game.tick_count,
            player: self.player.clone(),
            show_leaderboard: self.show_leaderboard,
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn speed(&self) -> SpeedSetting {
        self.speed
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.game.score
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    #[must_use]
    pub fn player(&self) -> &str {
        &self.player
    }

    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    #[must_use]
    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn fresh_game(&self) -> Game {
        match self.seed {
            Some(seed) => Game::new_with_seed(&self.config, seed.wrapping_add(self.games_started)),
            None => Game::new(&self.config),
        }
    }

    fn finish(&mut self, ending: GameEnding, now: Instant) {
        let score = self.game.score;
        info!("game over ({ending:?}) with score {score}");

        self.ending = Some(ending);
        self.enter_phase(SessionPhase::GameOver, now);

        if score > self.high_score {
            self.high_score = score;
            if let Err(error) = self.store.set(score) {
                warn!("failed to save high score {score}: {error}");
            }
            self.events.push(SessionEvent::HighScoreUpdated { high_score: score });
        }

        self.events.push(SessionEvent::GameOver {
            ending,
            submission: ScoreSubmission {
                player: self.player.clone(),
                score,
            },
        });
    }

    fn enter_phase(&mut self, to: SessionPhase, now: Instant) {
        let from = self.phase;
        if from == to {
            return;
        }

        debug!("phase {from:?} -> {to:?}");
        self.phase = to;
        self.sync_timer(now);
        self.events.push(SessionEvent::PhaseChanged { from, to });
    }

    /// Cancels the tick task and re-arms it only when entering `Running`.
    fn sync_timer(&mut self, now: Instant) {
        self.scheduler.cancel();
        if self.phase == SessionPhase::Running {
            self.scheduler.schedule(self.speed.tick_period(), now);
        }
    }
}
