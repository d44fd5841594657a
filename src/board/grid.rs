//! A player's board.
//!
//! The board is a dense N×N matrix of optional placed cards. N is always
//! odd, the center cell is the logical origin (the starter card's home),
//! and the matrix grows by +2 in both dimensions whenever a card lands one
//! cell from the border. Alongside the matrix the board keeps the owner's
//! resource map and an ordered placement history for replay/display.
//!
//! Snapshots of the board ride on every `AreaUpdated` event, so the
//! resource map and history use `im` persistent structures to keep those
//! clones cheap.

use im::{HashMap as ImHashMap, Vector};
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardColor, CornerIndex, Face, Symbol};

/// A card placed on a board: the card plus its runtime state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedCard {
    /// The card itself.
    pub card: Card,

    /// Which face is showing.
    pub face: Face,

    /// Corner-open flags, in `CornerIndex` order. A flag transitions
    /// open→closed exactly once and never back.
    open: [bool; 4],

    row: usize,
    col: usize,

    /// Claimed by a position-pattern match during objective evaluation.
    consumed: bool,
}

impl PlacedCard {
    pub(super) fn new(card: Card, face: Face, row: usize, col: usize) -> Self {
        Self {
            card,
            face,
            open: [true; 4],
            row,
            col,
            consumed: false,
        }
    }

    /// Current coordinates. Updated when the board grows.
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Kingdom color, if any (starter cards have none).
    #[must_use]
    pub fn color(&self) -> Option<CardColor> {
        self.card.color
    }

    /// The symbol shown at a corner for the placed face.
    #[must_use]
    pub fn corner_symbol(&self, corner: CornerIndex) -> Symbol {
        self.card.corners_for(self.face)[corner.index()]
    }

    /// Is a corner still open?
    #[must_use]
    pub fn is_open(&self, corner: CornerIndex) -> bool {
        self.open[corner.index()]
    }

    /// Has a pattern match already claimed this card?
    #[must_use]
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    pub(crate) fn close(&mut self, corner: CornerIndex) {
        debug_assert!(self.open[corner.index()], "corner closed twice");
        self.open[corner.index()] = false;
    }

    pub(crate) fn set_consumed(&mut self, consumed: bool) {
        self.consumed = consumed;
    }
}

/// A player's board: matrix, resource map, and placement history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Vec<Option<PlacedCard>>,
    dim: usize,
    resources: ImHashMap<Symbol, u32>,
    history: Vector<(usize, usize)>,
    growths: u32,
}

impl Grid {
    /// Create an empty board.
    ///
    /// # Panics
    ///
    /// Panics if `dim` is even or below 5; `MatchConfig::validate` rejects
    /// such dimensions before a board is ever built.
    #[must_use]
    pub fn new(dim: usize) -> Self {
        assert!(dim % 2 == 1, "grid dimension must be odd");
        assert!(dim >= 5, "grid dimension must be at least 5");
        Self {
            cells: vec![None; dim * dim],
            dim,
            resources: ImHashMap::new(),
            history: Vector::new(),
            growths: 0,
        }
    }

    /// Current matrix dimension. Always odd.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The center cell, home of the starter card.
    #[must_use]
    pub fn center(&self) -> (usize, usize) {
        (self.dim / 2, self.dim / 2)
    }

    /// How many times the board has grown.
    #[must_use]
    pub fn growths(&self) -> u32 {
        self.growths
    }

    /// Number of cards placed.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.history.len()
    }

    /// Ordered placement history, in current coordinates.
    pub fn history(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.history.iter().copied()
    }

    /// Current quantity of a symbol on this board.
    #[must_use]
    pub fn resource_count(&self, symbol: Symbol) -> u32 {
        self.resources.get(&symbol).copied().unwrap_or(0)
    }

    /// The full resource map.
    #[must_use]
    pub fn resources(&self) -> &ImHashMap<Symbol, u32> {
        &self.resources
    }

    /// The card at a cell, if any.
    ///
    /// # Panics
    ///
    /// Panics on coordinates outside the allocated matrix; callers validate
    /// bounds before reaching the board.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&PlacedCard> {
        assert!(
            row < self.dim && col < self.dim,
            "coordinates ({row}, {col}) outside allocated {0}x{0} grid",
            self.dim
        );
        self.cells[row * self.dim + col].as_ref()
    }

    pub(crate) fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut PlacedCard> {
        assert!(
            row < self.dim && col < self.dim,
            "coordinates ({row}, {col}) outside allocated {0}x{0} grid",
            self.dim
        );
        self.cells[row * self.dim + col].as_mut()
    }

    /// Iterate over occupied cells in row-major order.
    pub fn cards(&self) -> impl Iterator<Item = &PlacedCard> {
        self.cells.iter().filter_map(|cell| cell.as_ref())
    }

    /// The diagonal neighbor of a cell in a direction, bounds-checked.
    #[must_use]
    pub fn neighbor_pos(
        &self,
        row: usize,
        col: usize,
        dir: CornerIndex,
    ) -> Option<(usize, usize)> {
        let (dr, dc) = dir.offset();
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        (r < self.dim && c < self.dim).then_some((r, c))
    }

    /// Count the occupied diagonal neighbors of a cell.
    #[must_use]
    pub fn occupied_diagonals(&self, row: usize, col: usize) -> usize {
        CornerIndex::ALL
            .iter()
            .filter_map(|&dir| self.neighbor_pos(row, col, dir))
            .filter(|&(r, c)| self.get(r, c).is_some())
            .count()
    }

    /// Reset all pattern-consumption flags.
    ///
    /// Called before each objective's evaluation pass; within one pass the
    /// flags prevent a card from matching twice.
    pub fn clear_consumed(&mut self) {
        for cell in self.cells.iter_mut().flatten() {
            cell.consumed = false;
        }
    }

    pub(crate) fn set_cell(&mut self, row: usize, col: usize, placed: PlacedCard) {
        debug_assert!(self.cells[row * self.dim + col].is_none(), "cell occupied");
        self.cells[row * self.dim + col] = Some(placed);
        self.history.push_back((row, col));
    }

    pub(crate) fn add_resource(&mut self, symbol: Symbol, amount: u32) {
        if !symbol.is_resource() {
            return;
        }
        let current = self.resource_count(symbol);
        self.resources.insert(symbol, current + amount);
    }

    pub(crate) fn remove_resource(&mut self, symbol: Symbol) {
        if !symbol.is_resource() {
            return;
        }
        let current = self.resource_count(symbol);
        debug_assert!(current > 0, "resource count would go negative");
        self.resources.insert(symbol, current.saturating_sub(1));
    }

    /// Does a cell lie one step from the matrix border?
    #[must_use]
    pub(crate) fn near_border(&self, row: usize, col: usize) -> bool {
        let edge = self.dim - 2;
        row == 1 || col == 1 || row == edge || col == edge
    }

    /// Replace the matrix with one two cells larger in both dimensions.
    ///
    /// Old contents are copied with a +1 offset on both axes; the resource
    /// map and history carry over (history coordinates are remapped).
    pub(crate) fn grow(&mut self) {
        let new_dim = self.dim + 2;
        let mut new_cells: Vec<Option<PlacedCard>> = vec![None; new_dim * new_dim];

        for (i, cell) in self.cells.drain(..).enumerate() {
            if let Some(mut placed) = cell {
                let (row, col) = (i / self.dim + 1, i % self.dim + 1);
                placed.row = row;
                placed.col = col;
                new_cells[row * new_dim + col] = Some(placed);
            }
        }

        self.history = self.history.iter().map(|&(r, c)| (r + 1, c + 1)).collect();
        self.cells = new_cells;
        self.dim = new_dim;
        self.growths += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;

    fn starter() -> Card {
        Card::starter(
            "s01",
            [Symbol::Empty; 4],
            [Symbol::Plant],
            [Symbol::Animal; 4],
        )
    }

    #[test]
    fn test_new_grid_geometry() {
        let grid = Grid::new(5);
        assert_eq!(grid.dim(), 5);
        assert_eq!(grid.center(), (2, 2));
        assert_eq!(grid.card_count(), 0);
        assert_eq!(grid.growths(), 0);
    }

    #[test]
    #[should_panic(expected = "odd")]
    fn test_even_dimension_panics() {
        let _ = Grid::new(6);
    }

    #[test]
    #[should_panic(expected = "at least 5")]
    fn test_tiny_dimension_panics() {
        let _ = Grid::new(3);
    }

    #[test]
    #[should_panic(expected = "outside allocated")]
    fn test_out_of_bounds_get_panics() {
        let grid = Grid::new(5);
        let _ = grid.get(5, 0);
    }

    #[test]
    fn test_neighbor_pos_bounds() {
        let grid = Grid::new(5);
        assert_eq!(grid.neighbor_pos(0, 0, CornerIndex::TopLeft), None);
        assert_eq!(grid.neighbor_pos(0, 0, CornerIndex::BottomRight), Some((1, 1)));
        assert_eq!(grid.neighbor_pos(4, 4, CornerIndex::BottomRight), None);
    }

    #[test]
    fn test_resource_bookkeeping() {
        let mut grid = Grid::new(5);
        grid.add_resource(Symbol::Plant, 2);
        grid.add_resource(Symbol::Empty, 5); // markers never count
        assert_eq!(grid.resource_count(Symbol::Plant), 2);
        assert_eq!(grid.resource_count(Symbol::Empty), 0);

        grid.remove_resource(Symbol::Plant);
        assert_eq!(grid.resource_count(Symbol::Plant), 1);
    }

    #[test]
    fn test_grow_remaps_contents() {
        let mut grid = Grid::new(5);
        let (row, col) = grid.center();
        grid.set_cell(row, col, PlacedCard::new(starter(), Face::Front, row, col));
        grid.add_resource(Symbol::Plant, 1);

        grid.grow();

        assert_eq!(grid.dim(), 7);
        assert_eq!(grid.growths(), 1);
        // The old center moved by +1 on both axes, which is the new center.
        assert_eq!(grid.center(), (3, 3));
        let placed = grid.get(3, 3).expect("card survived growth");
        assert_eq!(placed.position(), (3, 3));
        assert_eq!(grid.resource_count(Symbol::Plant), 1);
        assert_eq!(grid.history().collect::<Vec<_>>(), vec![(3, 3)]);
    }

    #[test]
    fn test_clear_consumed() {
        let mut grid = Grid::new(5);
        let (row, col) = grid.center();
        grid.set_cell(row, col, PlacedCard::new(starter(), Face::Front, row, col));

        grid.get_mut(row, col).unwrap().set_consumed(true);
        assert!(grid.get(row, col).unwrap().is_consumed());

        grid.clear_consumed();
        assert!(!grid.get(row, col).unwrap().is_consumed());
    }
}
