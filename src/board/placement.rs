//! Placement rules.
//!
//! A card placement is validated and applied in one synchronous step:
//! gold requirement gate, corner-adjacency legality, occupancy update,
//! corner closing, resource bookkeeping, and finally the growth trigger.
//! A rejected placement mutates nothing.

use crate::cards::{Card, CornerIndex, Face, Symbol};
use crate::core::ActionError;

use super::grid::{Grid, PlacedCard};

impl Grid {
    /// Place the starter card at the board's center.
    ///
    /// The starter bypasses adjacency, corner-closing, and growth logic:
    /// it is the seed every later placement extends.
    ///
    /// # Panics
    ///
    /// Panics if `card` is not a starter card or the center is occupied.
    pub fn place_starter(&mut self, card: Card, face: Face) {
        assert!(card.is_starter(), "only starter cards go to the center");
        let (row, col) = self.center();
        assert!(self.get(row, col).is_none(), "starter already placed");

        let placed = PlacedCard::new(card, face, row, col);
        self.credit_symbols(&placed);
        self.set_cell(row, col, placed);
    }

    /// Validate and apply a card placement.
    ///
    /// Returns the card's coordinates after any growth (a near-border
    /// placement shifts everything by +1 on both axes). On failure the
    /// board is untouched.
    ///
    /// # Panics
    ///
    /// Panics on coordinates outside the allocated matrix or on a starter
    /// card; both are contract violations the command surface rules out.
    pub fn place(
        &mut self,
        card: Card,
        face: Face,
        row: usize,
        col: usize,
    ) -> Result<(usize, usize), ActionError> {
        assert!(
            row < self.dim() && col < self.dim(),
            "coordinates ({row}, {col}) outside allocated {0}x{0} grid",
            self.dim()
        );
        assert!(!card.is_starter(), "starter cards use place_starter");

        // Gold requirements come before the adjacency check.
        if face == Face::Front {
            if let Some(requirements) = card.requirements() {
                let met = requirements
                    .iter()
                    .all(|(&symbol, &needed)| self.resource_count(symbol) >= needed);
                if !met {
                    return Err(ActionError::InsufficientResources);
                }
            }
        }

        self.check_attachment(row, col)?;

        let placed = PlacedCard::new(card, face, row, col);
        self.credit_symbols(&placed);
        self.set_cell(row, col, placed);
        self.cover_corners(row, col);

        if self.near_border(row, col) {
            self.grow();
            Ok((row + 1, col + 1))
        } else {
            Ok((row, col))
        }
    }

    /// The corner-adjacency legality rule.
    ///
    /// At least one diagonal neighbor must offer an open, attachable corner,
    /// and no existing diagonal neighbor may present a closed or missing
    /// corner; a card only ever extends the board.
    fn check_attachment(&self, row: usize, col: usize) -> Result<(), ActionError> {
        if self.get(row, col).is_some() {
            return Err(ActionError::IllegalPlacement { row, col });
        }

        let mut attached = false;
        for dir in CornerIndex::ALL {
            let Some((r, c)) = self.neighbor_pos(row, col, dir) else {
                continue;
            };
            let Some(neighbor) = self.get(r, c) else {
                continue;
            };
            let facing = dir.opposite();
            let symbol = neighbor.corner_symbol(facing);
            if !symbol.is_attachable() || !neighbor.is_open(facing) {
                return Err(ActionError::IllegalPlacement { row, col });
            }
            attached = true;
        }

        if attached {
            Ok(())
        } else {
            Err(ActionError::IllegalPlacement { row, col })
        }
    }

    /// Add the placed card's symbol contributions to the resource map.
    ///
    /// Back-face non-starter cards contribute exactly one unit of the
    /// kingdom symbol fixed by their color; everything else contributes its
    /// shown corners, plus centers when face-up.
    fn credit_symbols(&mut self, placed: &PlacedCard) {
        if placed.face == Face::Back && !placed.card.is_starter() {
            let color = placed
                .card
                .color
                .expect("non-starter cards carry a kingdom color");
            self.add_resource(color.back_symbol(), 1);
            return;
        }

        for corner in CornerIndex::ALL {
            self.add_resource(placed.corner_symbol(corner), 1);
        }
        if placed.face == Face::Front {
            let centers: Vec<Symbol> = placed.card.centers.iter().copied().collect();
            for symbol in centers {
                self.add_resource(symbol, 1);
            }
        }
    }

    /// Close every diagonal neighbor's corner facing the new card and
    /// debit the symbols those corners were contributing.
    fn cover_corners(&mut self, row: usize, col: usize) {
        for dir in CornerIndex::ALL {
            let Some((r, c)) = self.neighbor_pos(row, col, dir) else {
                continue;
            };
            let facing = dir.opposite();
            let covered = match self.get_mut(r, c) {
                Some(neighbor) => {
                    let symbol = neighbor.corner_symbol(facing);
                    neighbor.close(facing);
                    symbol
                }
                None => continue,
            };
            self.remove_resource(covered);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardColor;
    use rustc_hash::FxHashMap;

    fn starter() -> Card {
        Card::starter(
            "s01",
            [Symbol::Empty, Symbol::Empty, Symbol::Empty, Symbol::Empty],
            [],
            [Symbol::Animal; 4],
        )
    }

    fn plant_card(id: &str) -> Card {
        Card::resource(
            id,
            CardColor::Green,
            [Symbol::Plant, Symbol::Plant, Symbol::Empty, Symbol::Empty],
            0,
        )
    }

    fn seeded_grid() -> Grid {
        let mut grid = Grid::new(7);
        grid.place_starter(starter(), Face::Front);
        grid
    }

    #[test]
    fn test_disconnected_placement_rejected() {
        let mut grid = seeded_grid();
        let err = grid.place(plant_card("r01"), Face::Front, 0, 0).unwrap_err();
        assert_eq!(err, ActionError::IllegalPlacement { row: 0, col: 0 });
        assert_eq!(grid.card_count(), 1);
    }

    #[test]
    fn test_occupied_cell_rejected() {
        let mut grid = seeded_grid();
        let (row, col) = grid.center();
        let err = grid
            .place(plant_card("r01"), Face::Front, row, col)
            .unwrap_err();
        assert_eq!(err, ActionError::IllegalPlacement { row, col });
    }

    #[test]
    fn test_simple_attachment() {
        let mut grid = seeded_grid();
        let (row, col) = grid.center();
        grid.place(plant_card("r01"), Face::Front, row - 1, col - 1)
            .unwrap();

        assert_eq!(grid.card_count(), 2);
        assert_eq!(grid.resource_count(Symbol::Plant), 2);
        // The starter's top-left corner is now closed.
        let starter = grid.get(grid.center().0, grid.center().1).unwrap();
        assert!(!starter.is_open(CornerIndex::TopLeft));
    }

    #[test]
    fn test_no_corner_diagonal_rejected() {
        let mut grid = Grid::new(9);
        grid.place_starter(
            Card::starter(
                "s02",
                [Symbol::NoCorner, Symbol::Empty, Symbol::Empty, Symbol::Empty],
                [],
                [Symbol::Animal; 4],
            ),
            Face::Front,
        );
        let (row, col) = grid.center();

        // The target up-left of the starter faces its NoCorner top-left.
        let err = grid
            .place(plant_card("r01"), Face::Front, row - 1, col - 1)
            .unwrap_err();
        assert_eq!(
            err,
            ActionError::IllegalPlacement {
                row: row - 1,
                col: col - 1
            }
        );

        // The starter's other corners remain usable.
        grid.place(plant_card("r02"), Face::Front, row - 1, col + 1)
            .unwrap();
    }

    #[test]
    fn test_blocked_diagonal_rejects_even_with_valid_neighbor() {
        let mut grid = Grid::new(9);
        grid.place_starter(
            Card::starter(
                "s02",
                [Symbol::NoCorner, Symbol::Empty, Symbol::Empty, Symbol::Empty],
                [],
                [Symbol::Animal; 4],
            ),
            Face::Front,
        );
        let (row, col) = grid.center();

        // Build a path around to the cell below-left of the target so the
        // target ends up touching one open corner and one NoCorner corner.
        grid.place(plant_card("r01"), Face::Front, row + 1, col - 1)
            .unwrap();
        grid.place(plant_card("r02"), Face::Front, row, col - 2)
            .unwrap();

        // Target (row-1, col-1): r02 offers an open top-right corner, but
        // the starter presents its NoCorner top-left. One bad diagonal
        // poisons the placement.
        let err = grid
            .place(plant_card("r03"), Face::Front, row - 1, col - 1)
            .unwrap_err();
        assert_eq!(
            err,
            ActionError::IllegalPlacement {
                row: row - 1,
                col: col - 1
            }
        );
        assert_eq!(grid.card_count(), 3);
    }

    #[test]
    fn test_covering_decrements_resources() {
        let mut grid = seeded_grid();
        let (row, col) = grid.center();

        // r01 contributes two plants; its bottom-right corner holds one.
        let card = Card::resource(
            "r01",
            CardColor::Green,
            [Symbol::Empty, Symbol::Empty, Symbol::Plant, Symbol::Plant],
            0,
        );
        grid.place(card, Face::Front, row - 1, col - 1).unwrap();
        assert_eq!(grid.resource_count(Symbol::Plant), 2);

        // Covering r01's bottom-left corner costs one plant. The cell
        // (row, col - 2) has r01 as its top-right diagonal.
        grid.place(plant_card("r02"), Face::Front, row, col - 2)
            .unwrap();
        assert_eq!(grid.resource_count(Symbol::Plant), 2 - 1 + 2);
    }

    #[test]
    fn test_back_face_yields_single_kingdom_symbol() {
        let mut grid = seeded_grid();
        let (row, col) = grid.center();

        let card = Card::resource(
            "r01",
            CardColor::Purple,
            [Symbol::Plant, Symbol::Plant, Symbol::Plant, Symbol::Plant],
            0,
        );
        grid.place(card, Face::Back, row - 1, col - 1).unwrap();

        // Back placement ignores the printed corners entirely.
        assert_eq!(grid.resource_count(Symbol::Plant), 0);
        assert_eq!(grid.resource_count(Symbol::Insect), 1);
    }

    #[test]
    fn test_gold_requirements_gate_placement() {
        let mut grid = seeded_grid();
        let (row, col) = grid.center();

        let mut requirements = FxHashMap::default();
        requirements.insert(Symbol::Plant, 2);
        let gold = Card::gold("g01", CardColor::Green, [Symbol::Empty; 4], 1, requirements);

        let err = grid
            .place(gold.clone(), Face::Front, row - 1, col - 1)
            .unwrap_err();
        assert_eq!(err, ActionError::InsufficientResources);
        assert_eq!(grid.card_count(), 1);

        // Two plants on the board satisfy the requirement.
        grid.place(plant_card("r01"), Face::Front, row + 1, col + 1)
            .unwrap();
        grid.place(gold, Face::Front, row - 1, col - 1).unwrap();
        assert_eq!(grid.card_count(), 3);
    }

    #[test]
    fn test_gold_requirements_skipped_on_back_face() {
        let mut grid = seeded_grid();
        let (row, col) = grid.center();

        let mut requirements = FxHashMap::default();
        requirements.insert(Symbol::Plant, 99);
        let gold = Card::gold("g01", CardColor::Green, [Symbol::Empty; 4], 1, requirements);

        grid.place(gold, Face::Back, row - 1, col - 1).unwrap();
        assert_eq!(grid.resource_count(Symbol::Plant), 1);
    }

    #[test]
    fn test_growth_on_near_border_placement() {
        let mut grid = Grid::new(5);
        grid.place_starter(starter(), Face::Front);
        let (row, col) = grid.center();
        assert_eq!((row, col), (2, 2));

        grid.place(plant_card("r01"), Face::Front, row - 1, col - 1)
            .unwrap();

        assert_eq!(grid.dim(), 7);
        assert_eq!(grid.growths(), 1);
        // Everything shifted by +1.
        assert!(grid.get(3, 3).is_some());
        assert!(grid.get(2, 2).is_some());
    }

    #[test]
    fn test_starter_scenario_resource_map() {
        // Starter with corners [empty, no-corner, insect, fungus] and
        // centers [animal, plant, empty], placed face-up at the center.
        let mut grid = Grid::new(7);
        let card = Card::starter(
            "s01",
            [Symbol::Empty, Symbol::NoCorner, Symbol::Insect, Symbol::Fungus],
            [Symbol::Animal, Symbol::Plant, Symbol::Empty],
            [Symbol::Empty; 4],
        );
        grid.place_starter(card, Face::Front);

        assert_eq!(grid.resource_count(Symbol::Animal), 1);
        assert_eq!(grid.resource_count(Symbol::Plant), 1);
        assert_eq!(grid.resource_count(Symbol::Insect), 1);
        assert_eq!(grid.resource_count(Symbol::Fungus), 1);
        assert_eq!(grid.resource_count(Symbol::Empty), 0);
        assert_eq!(grid.resource_count(Symbol::NoCorner), 0);
    }

    #[test]
    fn test_starter_back_face_uses_back_corners() {
        let mut grid = Grid::new(7);
        let card = Card::starter(
            "s01",
            [Symbol::Fungus; 4],
            [Symbol::Animal],
            [Symbol::Plant, Symbol::Plant, Symbol::Empty, Symbol::Empty],
        );
        grid.place_starter(card, Face::Back);

        // Back face shows the back corners; centers only count face-up.
        assert_eq!(grid.resource_count(Symbol::Plant), 2);
        assert_eq!(grid.resource_count(Symbol::Fungus), 0);
        assert_eq!(grid.resource_count(Symbol::Animal), 0);
    }
}
