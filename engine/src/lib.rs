pub mod app;
pub mod graphics;
pub mod regression;
pub mod surface;

/// A pure, deterministic game core.
///
/// Implementations hold configuration only; all mutable state lives in
/// `State`, which makes the core trivially replayable from a seed plus an
/// input sequence.
pub trait GameLogic {
    type State;
    type Input;

    fn initial_state(&self) -> Self::State;
    fn step(&self, state: &Self::State, input: Self::Input) -> Self::State;
}

/// Drives a `GameLogic` without a window.
///
/// Used by integration tests and by any tooling that wants to replay input
/// scripts against the pure core.
#[derive(Debug)]
pub struct HeadlessRunner<G: GameLogic> {
    game: G,
    state: G::State,
    frame: usize,
}

impl<G: GameLogic> HeadlessRunner<G> {
    pub fn new(game: G) -> Self {
        let state = game.initial_state();
        Self {
            game,
            state,
            frame: 0,
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn state(&self) -> &G::State {
        &self.state
    }

    pub fn step(&mut self, input: G::Input) -> usize {
        self.state = self.game.step(&self.state, input);
        self.frame += 1;
        self.frame
    }

    pub fn run<I>(&mut self, inputs: I) -> usize
    where
        I: IntoIterator<Item = G::Input>,
    {
        let mut last_frame = self.frame;
        for input in inputs {
            last_frame = self.step(input);
        }
        last_frame
    }

    /// Restarts from `initial_state`, discarding everything stepped so far.
    pub fn reset(&mut self) {
        self.state = self.game.initial_state();
        self.frame = 0;
    }
}
