//! Fixed-capacity particle pools for exhaust and debris effects

use glam::Vec2;

use crate::consts::{POOL_CAPACITY, REPULSION_RADIUS};

/// A short-lived point effect owned by the pool that spawned it
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining lifetime in ticks
    pub life: i32,
    /// Explicit display glyph; the density ramp is used when absent
    pub glyph: Option<char>,
}

/// Fixed-capacity pool of live particles.
///
/// Spawn requests beyond capacity are dropped silently so effects degrade
/// instead of failing. Expired particles are swap-removed; pool order is
/// unspecified.
#[derive(Debug, Clone)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    /// Pairwise repulsion coefficient; 0 disables the pass
    repulsion: f32,
    /// Base lifetime handed to spawners
    pub start_life: i32,
    /// Weakest to strongest, indexed by per-cell particle count
    density_glyphs: Vec<char>,
}

impl ParticlePool {
    pub fn new(start_life: i32, repulsion: f32, density_glyphs: &str) -> Self {
        Self {
            particles: Vec::with_capacity(POOL_CAPACITY),
            repulsion,
            start_life,
            density_glyphs: density_glyphs.chars().collect(),
        }
    }

    pub fn live_count(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Append `p` if there is room; otherwise a no-op.
    pub fn spawn(&mut self, p: Particle) {
        if self.particles.len() < POOL_CAPACITY {
            self.particles.push(p);
        }
    }

    /// Advance the pool one tick.
    ///
    /// When repulsion is enabled, every ordered pair of particles closer
    /// than [`REPULSION_RADIUS`] nudges the first one's velocity toward the
    /// other's (velocity-difference soft repulsion). Then each particle is
    /// Euler-integrated one unit step and its lifetime decremented; expired
    /// particles are swap-removed.
    pub fn step(&mut self) {
        if self.repulsion > 0.0 {
            for i in 0..self.particles.len() {
                for j in 0..self.particles.len() {
                    if i == j {
                        continue;
                    }
                    let delta = self.particles[i].pos - self.particles[j].pos;
                    if delta.length() < REPULSION_RADIUS {
                        let nudge =
                            (self.particles[j].vel - self.particles[i].vel) * self.repulsion;
                        self.particles[i].vel += nudge;
                    }
                }
            }
        }

        let mut i = 0;
        while i < self.particles.len() {
            if self.particles[i].life <= 0 {
                self.particles.swap_remove(i);
            } else {
                let p = &mut self.particles[i];
                p.pos += p.vel;
                p.life -= 1;
                i += 1;
            }
        }
    }

    /// Densest glyph at integer cell (row, col), or `None` when empty.
    ///
    /// Particles occupy the cell their truncated position falls in. Any
    /// explicit particle glyph wins over the density ramp (arbitrary
    /// tie-break); otherwise the count picks a ramp glyph, clamped to the
    /// strongest entry.
    pub fn sample(&self, row: i32, col: i32) -> Option<char> {
        let mut density = 0usize;
        let mut explicit = None;
        for p in &self.particles {
            if p.pos.x as i32 == col && p.pos.y as i32 == row {
                density += 1;
                if p.glyph.is_some() {
                    explicit = p.glyph;
                }
            }
        }

        if density == 0 {
            return None;
        }
        explicit.or_else(|| {
            let idx = (density - 1).min(self.density_glyphs.len().saturating_sub(1));
            self.density_glyphs.get(idx).copied()
        })
    }

    /// Drop every live particle without decay.
    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
