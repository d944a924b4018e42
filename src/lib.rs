//! Delta-V - a terminal spacecraft docking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (particle pools, glyph-grid crafts,
//!   cell-exact collision/docking, per-tick orchestration)
//! - `render`: Layered cell sampler composing HUD, particles, crafts and
//!   starfield into one glyph per screen cell
//! - `terminal`: Raw-mode terminal I/O (crossterm)
//! - `settings`: Difficulty selection and tunables

pub mod render;
pub mod settings;
pub mod sim;
pub mod terminal;

pub use settings::{Difficulty, Settings};

/// Game configuration constants
pub mod consts {
    /// Live particles per pool (spawns beyond this are silently dropped)
    pub const POOL_CAPACITY: usize = 128;
    /// Two particles closer than this repel each other (world units)
    pub const REPULSION_RADIUS: f32 = 0.5;

    /// Velocity change per thrust impulse (world units per tick)
    pub const THRUST_IMPULSE: f32 = 0.01;
    /// Thruster exhaust speed relative to the impulse that fired it
    pub const JET_SPEED_SCALE: f32 = 50.0;
    /// Particles per thruster jet burst
    pub const JET_BURST_COUNT: u32 = 10;
    /// Base lifetime of a jet particle (ticks); each gets 0..10 extra
    pub const JET_LIFE: i32 = 10;
    /// Positional scatter of a jet burst (cells)
    pub const JET_SCATTER: f32 = 0.5;

    /// Crash debris lives long enough to outlast the round
    pub const CRASH_LIFE: i32 = 100_000;
    /// Per-cell velocity jitter applied to crash debris
    pub const CRASH_JITTER: f32 = 0.01;
    /// Mutual repulsion coefficient for the crash pool
    pub const CRASH_REPULSION: f32 = 0.5;

    /// Entries in the precomputed starfield table
    pub const STAR_TABLE_LEN: usize = 512;

    /// Pre-round countdown length in ticks
    pub const COUNTDOWN_TICKS: u32 = 90;
}
