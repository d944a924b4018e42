//! Layered frame composition
//!
//! Each screen cell is sampled from an ordered stack of cell sources; the
//! first source with a glyph wins. The ordering is a design rule, not a
//! depth test: HUD text sits above crash debris, debris above thruster
//! exhaust, exhaust above crafts, crafts above the starfield, and a blank
//! cell closes the chain.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::STAR_TABLE_LEN;
use crate::sim::craft::Craft;
use crate::sim::particles::ParticlePool;

/// A read-only layer that may contribute one glyph per screen cell
pub trait CellSource {
    fn cell(&self, row: i32, col: i32) -> Option<char>;
}

impl CellSource for ParticlePool {
    fn cell(&self, row: i32, col: i32) -> Option<char> {
        self.sample(row, col)
    }
}

impl CellSource for Craft {
    fn cell(&self, row: i32, col: i32) -> Option<char> {
        self.sample(row, col)
    }
}

/// A positioned line of HUD text
#[derive(Debug, Clone)]
pub struct HudLine {
    pub row: i32,
    pub col: i32,
    pub text: String,
    /// Center the text on `col` instead of starting there
    pub centered: bool,
}

impl HudLine {
    pub fn new(row: i32, col: i32, text: impl Into<String>) -> Self {
        Self {
            row,
            col,
            text: text.into(),
            centered: false,
        }
    }

    pub fn centered(row: i32, col: i32, text: impl Into<String>) -> Self {
        Self {
            row,
            col,
            text: text.into(),
            centered: true,
        }
    }
}

impl CellSource for HudLine {
    fn cell(&self, row: i32, col: i32) -> Option<char> {
        if row != self.row {
            return None;
        }
        let len = self.text.chars().count() as i32;
        let start = if self.centered {
            self.col - len / 2
        } else {
            self.col
        };
        if col < start || col >= start + len {
            return None;
        }
        self.text.chars().nth((col - start) as usize)
    }
}

/// Deterministic procedural star background.
///
/// A table of random bytes is filled once per round; a cell shows a star
/// when its table entry falls below the density threshold. Sampling never
/// touches the RNG again, so a cell's star is stable across ticks.
#[derive(Debug, Clone)]
pub struct Starfield {
    table: [u8; STAR_TABLE_LEN],
    /// Row stride; must track the terminal width
    cols: i32,
    /// Out of 256; 4 lights roughly 1.5% of cells
    threshold: u8,
}

impl Starfield {
    pub fn new(rng: &mut Pcg32, cols: i32, threshold: u8) -> Self {
        let mut table = [0u8; STAR_TABLE_LEN];
        for b in &mut table {
            *b = rng.random();
        }
        Self {
            table,
            cols,
            threshold,
        }
    }

    /// Track a terminal width change.
    pub fn resize(&mut self, cols: i32) {
        self.cols = cols;
    }
}

impl CellSource for Starfield {
    fn cell(&self, row: i32, col: i32) -> Option<char> {
        let idx = (row * self.cols + col).rem_euclid(STAR_TABLE_LEN as i32) as usize;
        (self.table[idx] < self.threshold).then_some('*')
    }
}

/// Ordered stack of cell sources; earlier sources occlude later ones.
#[derive(Default)]
pub struct Compositor<'a> {
    sources: Vec<&'a dyn CellSource>,
}

impl<'a> Compositor<'a> {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    pub fn push(&mut self, source: &'a dyn CellSource) {
        self.sources.push(source);
    }

    /// First non-empty source wins; blank when every layer is empty.
    pub fn sample(&self, row: i32, col: i32) -> char {
        self.sources
            .iter()
            .find_map(|s| s.cell(row, col))
            .unwrap_or(' ')
    }
}
