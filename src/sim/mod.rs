//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed logical ticks only
//! - Seeded RNG only
//! - No rendering or terminal dependencies

pub mod collision;
pub mod craft;
pub mod particles;
pub mod state;
pub mod tick;

pub use collision::overlap;
pub use craft::{Craft, GlyphGrid};
pub use particles::{Particle, ParticlePool};
pub use state::GameState;
pub use tick::{Command, TickInput, tick};

use rand::Rng;
use rand_pcg::Pcg32;

/// Random float in [-1, 1)
#[inline]
pub fn randf(rng: &mut Pcg32) -> f32 {
    rng.random_range(-1.0f32..1.0)
}
