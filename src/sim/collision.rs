//! Cell-exact craft collision and docking detection
//!
//! Two crafts collide when any pair of their occupied glyph cells lands on
//! the identical world cell. There is no tolerance and no hull math:
//! "collision" means two non-space glyphs share one terminal cell.

use std::collections::HashSet;

use super::craft::Craft;

/// Glyph values that participate in docking-mode overlap tests
pub const DOCKING_GLYPHS: &[char] = &[':', 'V'];

pub fn is_docking_glyph(g: char) -> bool {
    DOCKING_GLYPHS.contains(&g)
}

/// Whether any occupied cell of `a` shares a world cell with one of `b`.
///
/// With `docking_only`, both sides are restricted to docking-port glyphs.
/// Dead crafts never overlap anything. One side is indexed into a cell set
/// so the scan is linear in grid size; matching stays exact.
pub fn overlap(a: &Craft, b: &Craft, docking_only: bool) -> bool {
    if a.dead || b.dead {
        return false;
    }

    let b_cells: HashSet<(i32, i32)> = b
        .grid()
        .occupied()
        .filter(|&(_, _, g)| !docking_only || is_docking_glyph(g))
        .map(|(c, r, _)| b.world_cell(c, r))
        .collect();
    if b_cells.is_empty() {
        return false;
    }

    a.grid()
        .occupied()
        .filter(|&(_, _, g)| !docking_only || is_docking_glyph(g))
        .any(|(c, r, _)| b_cells.contains(&a.world_cell(c, r)))
}
