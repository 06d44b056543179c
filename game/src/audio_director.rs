/// Tracks the game-over edge so the music is paused exactly once per
/// session, not on every frame that observes the flag.
#[derive(Debug, Default)]
pub struct AudioDirector {
    was_game_over: bool,
}

impl AudioDirector {
    /// Call once per frame with the current flag; returns true only on the
    /// false-to-true transition.
    pub fn should_pause_music(&mut self, game_over: bool) -> bool {
        let rising = game_over && !self.was_game_over;
        self.was_game_over = game_over;
        rising
    }

    /// Forget the previous session's edge (New Game).
    pub fn reset(&mut self) {
        self.was_game_over = false;
    }
}
