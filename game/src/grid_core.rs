use serde::{Deserialize, Serialize};

pub const GRID_SIZE: usize = 4;

pub type Cells = [[u32; GRID_SIZE]; GRID_SIZE];

/// A merge result of at least this value may trigger the festive boost.
pub const BOOST_MIN_TILE: u32 = 16;

/// Default boost odds, in basis points of 10_000 (500 = 5%).
pub const DEFAULT_BOOST_CHANCE_BP: u32 = 500;

/// Odds that a spawned tile is a 4 rather than a 2 (1_000 = 10%).
pub const SPAWN_FOUR_CHANCE_BP: u32 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveDir {
    Left,
    Right,
    Up,
    Down,
}

impl MoveDir {
    pub const ALL: [MoveDir; 4] = [MoveDir::Left, MoveDir::Right, MoveDir::Up, MoveDir::Down];

    /// Clockwise quarter turns that bring this direction onto `Left`.
    fn cw_turns(self) -> usize {
        match self {
            MoveDir::Left => 0,
            MoveDir::Down => 1,
            MoveDir::Right => 2,
            MoveDir::Up => 3,
        }
    }
}

/// Rotates the grid a quarter turn clockwise. Pure; four turns are the
/// identity.
pub fn rotate_cw(cells: &Cells) -> Cells {
    let mut out = [[0; GRID_SIZE]; GRID_SIZE];
    for (r, row) in cells.iter().enumerate() {
        for (c, &v) in row.iter().enumerate() {
            out[c][GRID_SIZE - 1 - r] = v;
        }
    }
    out
}

/// Deterministic splitmix64 stream.
///
/// Serializes with the grid, so a saved game replays with the exact same
/// spawns and boosts. Also what makes the probabilistic rules testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self {
            state: seed ^ 0x9E37_79B9_7F4A_7C15,
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Uniform draw in `0..10_000`, for basis-point chance checks.
    fn roll_bp(&mut self) -> u32 {
        self.next_u32() % 10_000
    }
}

/// The 4x4 grid plus everything that mutates with it.
///
/// Owns the only copy of the cells; moves build a rotated working copy and
/// commit it wholesale, so observers never see a half-applied slide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridCore {
    cells: Cells,
    score: u32,
    game_over: bool,
    rng: Rng,
    #[serde(default = "default_boost_chance_bp")]
    boost_chance_bp: u32,
}

fn default_boost_chance_bp() -> u32 {
    DEFAULT_BOOST_CHANCE_BP
}

impl GridCore {
    /// Empty grid, no starting tiles. Call `new_game` to begin play.
    pub fn new(seed: u64) -> Self {
        Self {
            cells: [[0; GRID_SIZE]; GRID_SIZE],
            score: 0,
            game_over: false,
            rng: Rng::new(seed),
            boost_chance_bp: DEFAULT_BOOST_CHANCE_BP,
        }
    }

    pub fn cells(&self) -> &Cells {
        &self.cells
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Tuning knob: 0 disables the boost, 10_000 forces it on every
    /// qualifying merge.
    pub fn set_boost_chance_bp(&mut self, bp: u32) {
        self.boost_chance_bp = bp.min(10_000);
    }

    /// Replaces the board wholesale. Intended for staging positions in
    /// tests and tools; does not touch score or the game-over flag.
    pub fn set_cells(&mut self, cells: Cells) {
        self.cells = cells;
    }

    /// Fresh board: score zeroed, flag cleared, exactly two spawned tiles.
    pub fn new_game(&mut self) {
        self.cells = [[0; GRID_SIZE]; GRID_SIZE];
        self.score = 0;
        self.game_over = false;
        self.spawn_random_tile();
        self.spawn_random_tile();
    }

    /// Slides one row toward index 0, merging equal neighbors once each.
    ///
    /// Merging adds the merged value to the score. A merge of
    /// `BOOST_MIN_TILE` or more may additionally copy its value into the
    /// first zero slot of the working line (the boost rule); the copy lands
    /// behind the merge cursor, so it never chains into a second merge
    /// within the same slide.
    pub fn slide_line(&mut self, line: [u32; GRID_SIZE]) -> [u32; GRID_SIZE] {
        let mut work: Vec<u32> = line.iter().copied().filter(|&v| v != 0).collect();

        let mut i = 0;
        while i + 1 < work.len() {
            if work[i] == work[i + 1] {
                work[i] *= 2;
                work[i + 1] = 0;
                self.score = self.score.saturating_add(work[i]);
                if work[i] >= BOOST_MIN_TILE && self.rng.roll_bp() < self.boost_chance_bp {
                    if let Some(slot) = work.iter().position(|&v| v == 0) {
                        work[slot] = work[i];
                    }
                }
                i += 1;
            }
            i += 1;
        }

        work.retain(|&v| v != 0);
        let mut out = [0; GRID_SIZE];
        for (slot, v) in out.iter_mut().zip(work) {
            *slot = v;
        }
        out
    }

    /// Applies one directional move. Returns whether the board changed.
    ///
    /// The grid is rotated so the move becomes a leftward slide, every row
    /// is slid, and the result is rotated back. A changed board commits and
    /// spawns exactly one tile; an unchanged board commits nothing. Board
    /// lock is evaluated either way.
    pub fn apply_move(&mut self, dir: MoveDir) -> bool {
        if self.game_over {
            return false;
        }

        let turns = dir.cw_turns();
        let mut work = self.cells;
        for _ in 0..turns {
            work = rotate_cw(&work);
        }
        for row in 0..GRID_SIZE {
            work[row] = self.slide_line(work[row]);
        }
        for _ in 0..(GRID_SIZE - turns) % GRID_SIZE {
            work = rotate_cw(&work);
        }

        let changed = work != self.cells;
        if changed {
            self.cells = work;
            self.spawn_random_tile();
        }
        self.evaluate_board_lock();
        changed
    }

    /// Places one tile on a uniformly chosen empty cell: 2 at 90%, 4 at
    /// 10%. No-op on a full board.
    pub fn spawn_random_tile(&mut self) {
        let mut empty = Vec::with_capacity(GRID_SIZE * GRID_SIZE);
        for r in 0..GRID_SIZE {
            for c in 0..GRID_SIZE {
                if self.cells[r][c] == 0 {
                    empty.push((r, c));
                }
            }
        }
        if empty.is_empty() {
            return;
        }
        let (r, c) = empty[self.rng.next_u32() as usize % empty.len()];
        self.cells[r][c] = if self.rng.roll_bp() < SPAWN_FOUR_CHANCE_BP {
            4
        } else {
            2
        };
    }

    /// True while a move is still possible: an empty cell, or an equal
    /// horizontally or vertically adjacent pair.
    pub fn has_any_move(&self) -> bool {
        for r in 0..GRID_SIZE {
            for c in 0..GRID_SIZE {
                let v = self.cells[r][c];
                if v == 0 {
                    return true;
                }
                if c + 1 < GRID_SIZE && self.cells[r][c + 1] == v {
                    return true;
                }
                if r + 1 < GRID_SIZE && self.cells[r + 1][c] == v {
                    return true;
                }
            }
        }
        false
    }

    /// Sets the game-over flag when the board is locked. One-way; cleared
    /// only by `new_game`.
    pub fn evaluate_board_lock(&mut self) {
        if !self.has_any_move() {
            self.game_over = true;
        }
    }

    /// Ends the session externally (the challenge timer expiring).
    pub fn mark_game_over(&mut self) {
        self.game_over = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_four_times_is_identity() {
        let cells: Cells = [[2, 0, 0, 4], [0, 8, 0, 0], [0, 0, 16, 0], [32, 0, 0, 2]];
        let mut rotated = cells;
        for _ in 0..4 {
            rotated = rotate_cw(&rotated);
        }
        assert_eq!(rotated, cells);
    }

    #[test]
    fn rotate_moves_top_left_to_top_right() {
        let mut cells: Cells = [[0; 4]; 4];
        cells[0][0] = 2;
        let rotated = rotate_cw(&cells);
        assert_eq!(rotated[0][3], 2);
    }

    #[test]
    fn rng_streams_are_reproducible() {
        let mut a = Rng::new(42);
        let mut b = Rng::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
        assert!(Rng::new(1).next_u64() != Rng::new(2).next_u64());
    }

    #[test]
    fn roll_bp_stays_in_range() {
        let mut rng = Rng::new(7);
        for _ in 0..1_000 {
            assert!(rng.roll_bp() < 10_000);
        }
    }
}
