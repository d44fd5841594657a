//! Placement-triggered scoring.
//!
//! A single dispatch over the placed card's scoring kind. Back-face
//! placements never score: the printed points belong to the front.

use crate::board::Grid;
use crate::cards::{Face, ScoringKind};

/// Points awarded for the card just placed at `(row, col)`.
///
/// Must be called after the placement's resource update: the per-object
/// strategy reads the current resource map, including symbols the card
/// itself contributed.
///
/// # Panics
///
/// Panics if the cell is empty; callers score the cell they just filled.
#[must_use]
pub fn placement_points(grid: &Grid, row: usize, col: usize) -> u32 {
    let placed = grid.get(row, col).expect("scoring an empty cell");
    if placed.face == Face::Back {
        return 0;
    }

    match placed.card.scoring {
        None => placed.card.points,
        Some(ScoringKind::ByPosition) => {
            placed.card.points * grid.occupied_diagonals(row, col) as u32
        }
        Some(ScoringKind::PerObject) => {
            let count = placed
                .card
                .bonus_symbol
                .map_or(0, |symbol| grid.resource_count(symbol));
            placed.card.points * count
        }
    }
}
