//! Glyph-grid vehicles
//!
//! A craft is a rectangular grid of glyphs anchored to a continuous world
//! position through its centroid. Stations are the same entity with fuel
//! left unused.

use glam::{IVec2, Vec2};
use rand::Rng;
use rand_pcg::Pcg32;

use super::particles::{Particle, ParticlePool};
use super::randf;
use crate::consts::{JET_BURST_COUNT, JET_SCATTER, JET_SPEED_SCALE};

/// Rectangular grid of glyphs; a space is an empty cell.
#[derive(Debug, Clone)]
pub struct GlyphGrid {
    rows: Vec<Vec<char>>,
}

impl GlyphGrid {
    pub fn from_rows(rows: &[&str]) -> Self {
        Self {
            rows: rows.iter().map(|r| r.chars().collect()).collect(),
        }
    }

    /// Glyph at local (row, col); `None` outside the grid or on a space.
    pub fn get(&self, row: i32, col: i32) -> Option<char> {
        if row < 0 || col < 0 {
            return None;
        }
        let g = *self.rows.get(row as usize)?.get(col as usize)?;
        (g != ' ').then_some(g)
    }

    /// Iterate occupied cells as (col, row, glyph).
    pub fn occupied(&self) -> impl Iterator<Item = (i32, i32, char)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(c, &g)| (g != ' ').then_some((c as i32, r as i32, g)))
        })
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied().count()
    }

    /// Centroid of occupied cells, integer-truncated.
    ///
    /// A grid with no occupied cells anchors at (0, 0); constructors are
    /// expected to supply at least one glyph.
    pub fn centroid(&self) -> IVec2 {
        let mut sum = IVec2::ZERO;
        let mut count = 0;
        for (c, r, _) in self.occupied() {
            sum += IVec2::new(c, r);
            count += 1;
        }
        if count == 0 {
            return IVec2::ZERO;
        }
        sum / count
    }
}

/// A craft or station: glyph grid plus world position, velocity, fuel and
/// status flags.
#[derive(Debug, Clone)]
pub struct Craft {
    grid: GlyphGrid,
    /// Local anchor aligning the grid to world coordinates
    origin: IVec2,
    pub pos: Vec2,
    pub vel: Vec2,
    pub fuel: u32,
    pub dead: bool,
    pub docked: bool,
}

impl Craft {
    /// Build a craft at `pos`; the origin is computed once from the grid.
    pub fn new(grid: GlyphGrid, pos: Vec2) -> Self {
        let origin = grid.centroid();
        Self {
            grid,
            origin,
            pos,
            vel: Vec2::ZERO,
            fuel: 0,
            dead: false,
            docked: false,
        }
    }

    pub fn grid(&self) -> &GlyphGrid {
        &self.grid
    }

    pub fn origin(&self) -> IVec2 {
        self.origin
    }

    /// Glyph occupying world cell (row, col). Dead crafts render nothing;
    /// cells outside the grid are empty.
    pub fn sample(&self, row: i32, col: i32) -> Option<char> {
        if self.dead {
            return None;
        }
        let local_col = col - self.pos.x as i32 + self.origin.x;
        let local_row = row - self.pos.y as i32 + self.origin.y;
        self.grid.get(local_row, local_col)
    }

    /// World cell occupied by local grid cell (col, row).
    pub fn world_cell(&self, col: i32, row: i32) -> (i32, i32) {
        (
            self.pos.x as i32 - self.origin.x + col,
            self.pos.y as i32 - self.origin.y + row,
        )
    }

    /// Euler integration, unit timestep. Dead crafts keep drifting.
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }

    /// Burn one unit of fuel for a velocity impulse, exhausting a particle
    /// jet in the opposite direction. No-op when out of fuel or dead.
    pub fn apply_thrust(
        &mut self,
        dx: f32,
        dy: f32,
        exhaust: &mut ParticlePool,
        rng: &mut Pcg32,
    ) {
        if self.fuel == 0 || self.dead {
            return;
        }
        self.fuel -= 1;
        self.vel += Vec2::new(dx, dy);
        spawn_jet(
            exhaust,
            self.pos,
            Vec2::new(-dx, -dy) * JET_SPEED_SCALE,
            rng,
        );
    }
}

/// Scatter a burst of exhaust particles around `pos` moving along `vel`.
pub fn spawn_jet(pool: &mut ParticlePool, pos: Vec2, vel: Vec2, rng: &mut Pcg32) {
    for _ in 0..JET_BURST_COUNT {
        let scatter = Vec2::new(randf(rng), randf(rng)) * JET_SCATTER;
        let life = pool.start_life + rng.random_range(0..10);
        pool.spawn(Particle {
            pos: pos + scatter,
            vel,
            life,
            glyph: None,
        });
    }
}
