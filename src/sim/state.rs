//! World state, round lifecycle and scoring
//!
//! Everything a round owns lives here: the craft roster (player first),
//! the two particle pools, the pre-round countdown and the elapsed-tick
//! clock used for scoring. A restart rebuilds this state wholesale.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::craft::{Craft, GlyphGrid};
use super::particles::{Particle, ParticlePool};
use super::randf;
use crate::consts::{
    COUNTDOWN_TICKS, CRASH_JITTER, CRASH_LIFE, CRASH_REPULSION, JET_LIFE, THRUST_IMPULSE,
};
use crate::settings::Difficulty;

/// The player craft; the ':' on the nose is its docking port
pub const PLAYER_ART: &[&str] = &[
    r"    /:\    ",
    r"###-[^]-###",
];

/// Orbital station; docks at the hub and the lower pylon
pub const STATION_ART: &[&str] = &[
    "## ##   _   ## ##",
    "## ##  |.|  ## ##",
    "##-##==[:]==##-##",
    "## ##  |.|  ## ##",
    "## ##   :   ## ##",
];

/// Compact relay, used as an extra obstacle on hard
pub const RELAY_ART: &[&str] = &[
    r"/=====\",
    r"|  .  |",
    r"\==:==/",
];

/// Exhaust density ramp, weakest to strongest
const EXHAUST_RAMP: &str = ".,:;x%&##";

/// Complete game state for one round
#[derive(Debug, Clone)]
pub struct GameState {
    /// Round seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub difficulty: Difficulty,
    /// Active crafts, player first
    pub crafts: Vec<Craft>,
    /// Thruster exhaust effects
    pub thruster: ParticlePool,
    /// Long-lived crash debris
    pub crash: ParticlePool,
    /// Pre-round countdown; all physics are gated until it reaches zero
    pub countdown_ticks: u32,
    /// Ticks elapsed since the countdown ended
    pub elapsed_ticks: u64,
    /// Tick at which the player docked
    pub finish_tick: Option<u64>,
    rows: i32,
    cols: i32,
}

impl GameState {
    /// Create a round for a `rows` x `cols` field with the given seed.
    pub fn new(seed: u64, difficulty: Difficulty, rows: i32, cols: i32) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            difficulty,
            crafts: Vec::new(),
            thruster: ParticlePool::new(JET_LIFE, 0.0, EXHAUST_RAMP),
            crash: ParticlePool::new(CRASH_LIFE, CRASH_REPULSION, ""),
            countdown_ticks: COUNTDOWN_TICKS,
            elapsed_ticks: 0,
            finish_tick: None,
            rows,
            cols,
        };
        state.place_crafts();
        state
    }

    /// Tear down and rebuild the round: crafts replaced, debris cleared,
    /// countdown rearmed.
    pub fn restart(&mut self) {
        self.crash.clear();
        self.thruster.clear();
        self.countdown_ticks = COUNTDOWN_TICKS;
        self.elapsed_ticks = 0;
        self.finish_tick = None;
        self.place_crafts();
    }

    /// Resize the playfield (terminal dimension change).
    pub fn resize(&mut self, rows: i32, cols: i32) {
        self.rows = rows;
        self.cols = cols;
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn player(&self) -> &Craft {
        &self.crafts[0]
    }

    /// The round runs until the player docks.
    pub fn playing(&self) -> bool {
        !self.crafts[0].docked
    }

    /// Fuel remaining minus elapsed seconds; higher is better.
    pub fn score(&self, tick_hz: f32) -> i64 {
        let end = self.finish_tick.unwrap_or(self.elapsed_ticks);
        let elapsed_secs = (end as f32 / tick_hz) as i64;
        self.crafts[0].fuel as i64 - elapsed_secs
    }

    /// Place the player and the difficulty's stations for a fresh round.
    ///
    /// The player spawns in the middle half of the field near the bottom
    /// with a small random drift; its fuel budget is sized from that drift.
    fn place_crafts(&mut self) {
        self.crafts.clear();

        let px = self.rng.random_range(0..(self.cols / 2).max(1)) + self.cols / 4;
        let py = self.rows - 5;
        let vx = (self.rng.random_range(0..20) - 10) as f32 / 100.0;
        let vy = -(self.rng.random_range(0..20) as f32) / 100.0;

        let mut player = Craft::new(
            GlyphGrid::from_rows(PLAYER_ART),
            Vec2::new(px as f32, py as f32),
        );
        player.vel = Vec2::new(vx, vy);
        player.fuel = fuel_budget(player.vel, self.difficulty);
        self.crafts.push(player);

        for (art, pos) in station_layout(self.difficulty, self.rows, self.cols) {
            self.crafts.push(Craft::new(GlyphGrid::from_rows(art), pos));
        }
    }

    /// Burst craft `idx` into debris: every occupied glyph cell becomes one
    /// long-lived particle carrying that glyph, inheriting the craft's
    /// velocity plus a small per-cell jitter.
    pub fn spawn_crash_for(&mut self, idx: usize) {
        let Self {
            crafts, crash, rng, ..
        } = self;
        let craft = &crafts[idx];
        let origin = craft.origin();

        for (c, r, glyph) in craft.grid().occupied() {
            crash.spawn(Particle {
                pos: craft.pos + Vec2::new((c - origin.x) as f32, (r - origin.y) as f32),
                vel: craft.vel + Vec2::new(randf(rng), randf(rng)) * CRASH_JITTER,
                life: CRASH_LIFE,
                glyph: Some(glyph),
            });
        }
    }
}

/// Starting fuel from the initial drift: a crude linear estimate of the
/// impulses needed to cancel it, scaled up on easier settings.
pub fn fuel_budget(vel: Vec2, difficulty: Difficulty) -> u32 {
    let min_fuel = vel.x.abs() / THRUST_IMPULSE + vel.y.abs() / THRUST_IMPULSE;
    let scale = (3 - difficulty.index()) as f32;
    ((min_fuel * scale).round() as u32).max(10)
}

/// Station art and positions for a difficulty on a `rows` x `cols` field.
pub fn station_layout(
    difficulty: Difficulty,
    _rows: i32,
    cols: i32,
) -> Vec<(&'static [&'static str], Vec2)> {
    let center = (cols / 2) as f32;
    match difficulty {
        Difficulty::Easy => vec![(STATION_ART, Vec2::new(center, 5.0))],
        Difficulty::Medium => vec![(STATION_ART, Vec2::new((cols / 3) as f32, 6.0))],
        Difficulty::Hard => vec![
            (STATION_ART, Vec2::new((2 * cols / 3) as f32, 5.0)),
            (RELAY_ART, Vec2::new((cols / 4) as f32, 10.0)),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_round_shape() {
        let state = GameState::new(42, Difficulty::Easy, 24, 80);
        assert_eq!(state.crafts.len(), 2);
        assert_eq!(state.countdown_ticks, COUNTDOWN_TICKS);
        assert!(state.playing());
        assert!(state.player().fuel >= 10);

        // Player spawns in the middle half, near the bottom
        let player = state.player();
        assert!(player.pos.x >= 20.0 && player.pos.x < 60.0);
        assert_eq!(player.pos.y, 19.0);
    }

    #[test]
    fn test_same_seed_same_round() {
        let a = GameState::new(99, Difficulty::Medium, 24, 80);
        let b = GameState::new(99, Difficulty::Medium, 24, 80);
        assert_eq!(a.player().pos, b.player().pos);
        assert_eq!(a.player().vel, b.player().vel);
        assert_eq!(a.player().fuel, b.player().fuel);
    }

    #[test]
    fn test_hard_layout_adds_a_relay() {
        let state = GameState::new(7, Difficulty::Hard, 24, 80);
        assert_eq!(state.crafts.len(), 3);
    }

    #[test]
    fn test_restart_rebuilds_round() {
        let mut state = GameState::new(5, Difficulty::Easy, 24, 80);
        state.crafts[0].dead = true;
        state.spawn_crash_for(0);
        state.elapsed_ticks = 100;
        assert!(state.crash.live_count() > 0);

        state.restart();
        assert!(!state.player().dead);
        assert_eq!(state.crash.live_count(), 0);
        assert_eq!(state.elapsed_ticks, 0);
        assert_eq!(state.countdown_ticks, COUNTDOWN_TICKS);
    }

    #[test]
    fn test_crash_burst_matches_occupied_cells() {
        let mut state = GameState::new(5, Difficulty::Easy, 24, 80);
        let cells = state.player().grid().occupied_count();
        state.spawn_crash_for(0);
        assert_eq!(state.crash.live_count(), cells);
        // Every debris particle carries a glyph
        assert!(state.crash.particles().iter().all(|p| p.glyph.is_some()));
    }

    #[test]
    fn test_fuel_budget_scales_with_difficulty() {
        let vel = Vec2::new(-0.10, -0.19);
        let easy = fuel_budget(vel, Difficulty::Easy);
        let medium = fuel_budget(vel, Difficulty::Medium);
        let hard = fuel_budget(vel, Difficulty::Hard);
        assert_eq!(easy, 87);
        assert_eq!(medium, 58);
        assert_eq!(hard, 29);
        assert!(easy > medium && medium > hard);
    }

    #[test]
    fn test_fuel_budget_floor() {
        assert_eq!(fuel_budget(Vec2::ZERO, Difficulty::Hard), 10);
    }

    #[test]
    fn test_score_is_fuel_minus_elapsed_seconds() {
        let mut state = GameState::new(5, Difficulty::Easy, 24, 80);
        state.crafts[0].fuel = 50;
        state.elapsed_ticks = 300;
        state.finish_tick = Some(300);
        // 300 ticks at 30 Hz is 10 seconds
        assert_eq!(state.score(30.0), 40);
    }
}
