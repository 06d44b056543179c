use std::time::Duration;

use serde::{Deserialize, Serialize};

use engine::GameLogic;

use crate::challenge::{ChallengeTimer, CHALLENGE_LIMIT};
use crate::grid_core::{GridCore, MoveDir};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// The 24-minute challenge clock ran out.
    TimeUp,
    /// No empty cell and no equal adjacent pair remained.
    BoardLocked,
}

/// One playable run: grid, challenge clock, and the best score carried
/// across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub grid: GridCore,
    pub timer: ChallengeTimer,
    best: u32,
    game_over_reason: Option<GameOverReason>,
}

impl GameSession {
    pub fn new(seed: u64, limit: Duration, best: u32) -> Self {
        let mut grid = GridCore::new(seed);
        grid.new_game();
        Self {
            grid,
            timer: ChallengeTimer::new(limit),
            best,
            game_over_reason: None,
        }
    }

    pub fn score(&self) -> u32 {
        self.grid.score()
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn is_game_over(&self) -> bool {
        self.grid.is_game_over()
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over_reason
    }

    /// Applies one directional move; returns whether the board changed.
    ///
    /// The best score is raised in lockstep with the score, so it reflects
    /// the current run even before it is persisted.
    pub fn handle_move(&mut self, dir: MoveDir) -> bool {
        let changed = self.grid.apply_move(dir);
        if self.grid.score() > self.best {
            self.best = self.grid.score();
        }
        if self.grid.is_game_over() && self.game_over_reason.is_none() {
            self.game_over_reason = Some(GameOverReason::BoardLocked);
        }
        changed
    }

    /// Advances the challenge clock; on expiry the run ends.
    pub fn tick(&mut self, dt: Duration) {
        if self.grid.is_game_over() {
            return;
        }
        self.timer.tick_if_running(dt, true);
        if self.timer.is_up() {
            self.grid.mark_game_over();
            self.game_over_reason = Some(GameOverReason::TimeUp);
        }
    }

    /// Fresh run. The best score survives.
    pub fn new_game(&mut self) {
        self.grid.new_game();
        self.timer.reset();
        self.game_over_reason = None;
    }
}

/// Session inputs as pure data, for replay through `HeadlessRunner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionInput {
    Move(MoveDir),
    Tick(Duration),
    NewGame,
}

/// `GameLogic` wrapper over `GameSession`.
#[derive(Debug, Clone)]
pub struct ChallengeLogic {
    pub seed: u64,
    pub limit: Duration,
}

impl ChallengeLogic {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            limit: CHALLENGE_LIMIT,
        }
    }
}

impl GameLogic for ChallengeLogic {
    type State = GameSession;
    type Input = SessionInput;

    fn initial_state(&self) -> GameSession {
        GameSession::new(self.seed, self.limit, 0)
    }

    fn step(&self, state: &GameSession, input: SessionInput) -> GameSession {
        let mut next = state.clone();
        match input {
            SessionInput::Move(dir) => {
                next.handle_move(dir);
            }
            SessionInput::Tick(dt) => {
                next.tick(dt);
            }
            SessionInput::NewGame => {
                next.new_game();
            }
        }
        next
    }
}
