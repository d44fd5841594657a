//! Property tests: random legal placement sequences must preserve the
//! board's structural invariants and its resource accounting.

use proptest::prelude::*;

use canopy::{Card, CardColor, CornerIndex, Face, Grid, Symbol};

fn seeded_grid() -> Grid {
    let mut grid = Grid::new(5);
    let starter = Card::starter(
        "s01",
        [Symbol::Plant, Symbol::Animal, Symbol::Empty, Symbol::Empty],
        [Symbol::Insect],
        [Symbol::Empty; 4],
    );
    grid.place_starter(starter, Face::Front);
    grid
}

/// Recompute the resource map from the cards on the board.
fn scan_resources(grid: &Grid) -> Vec<(Symbol, u32)> {
    let mut counts: Vec<(Symbol, u32)> = Vec::new();
    let mut bump = |symbol: Symbol| {
        if !symbol.is_resource() {
            return;
        }
        match counts.iter_mut().find(|(s, _)| *s == symbol) {
            Some((_, n)) => *n += 1,
            None => counts.push((symbol, 1)),
        }
    };

    for placed in grid.cards() {
        for corner in CornerIndex::ALL {
            if placed.is_open(corner) {
                bump(placed.corner_symbol(corner));
            }
        }
        match placed.face {
            Face::Front => {
                for &symbol in &placed.card.centers {
                    bump(symbol);
                }
            }
            Face::Back => {
                if let Some(color) = placed.card.color {
                    bump(color.back_symbol());
                }
            }
        }
    }
    counts
}

/// Apply one generated step: attach a fresh card diagonal to a random
/// already-placed one. Returns whether a card actually landed.
fn apply_step(grid: &mut Grid, index: usize, pick: usize, corner: usize, front: bool) -> bool {
    let anchors: Vec<(usize, usize)> = grid.history().collect();
    let (row, col) = anchors[pick % anchors.len()];
    let dir = CornerIndex::ALL[corner % 4];
    let Some((row, col)) = grid.neighbor_pos(row, col, dir) else {
        return false;
    };
    if grid.get(row, col).is_some() {
        return false;
    }

    let card = Card::resource(
        format!("r{index:02}"),
        CardColor::Green,
        [Symbol::Plant, Symbol::Quill, Symbol::Empty, Symbol::Empty],
        0,
    );
    let face = if front { Face::Front } else { Face::Back };
    grid.place(card, face, row, col)
        .expect("attachment to an empty diagonal of an all-corner card is legal");
    true
}

proptest! {
    #[test]
    fn placement_sequences_keep_structural_invariants(
        steps in proptest::collection::vec((any::<usize>(), 0..4usize, any::<bool>()), 0..40),
    ) {
        let mut grid = seeded_grid();
        let mut landed = 1usize;
        for (index, (pick, corner, front)) in steps.into_iter().enumerate() {
            if apply_step(&mut grid, index, pick, corner, front) {
                landed += 1;
            }
        }

        // Dimension stays odd and only ever grows.
        prop_assert_eq!(grid.dim() % 2, 1);
        prop_assert!(grid.dim() >= 5);
        prop_assert_eq!(grid.dim(), 5 + 2 * grid.growths() as usize);

        // Every placement is on the board exactly once, where the history
        // says it is.
        prop_assert_eq!(grid.card_count(), landed);
        let history: Vec<(usize, usize)> = grid.history().collect();
        prop_assert_eq!(history.len(), landed);
        for (row, col) in history {
            let placed = grid.get(row, col);
            prop_assert!(placed.is_some());
            prop_assert_eq!(placed.map(|p| p.position()), Some((row, col)));
        }

        // The outermost ring never holds a card.
        let dim = grid.dim();
        for i in 0..dim {
            prop_assert!(grid.get(0, i).is_none());
            prop_assert!(grid.get(dim - 1, i).is_none());
            prop_assert!(grid.get(i, 0).is_none());
            prop_assert!(grid.get(i, dim - 1).is_none());
        }
    }

    #[test]
    fn resource_map_matches_board_scan(
        steps in proptest::collection::vec((any::<usize>(), 0..4usize, any::<bool>()), 0..40),
    ) {
        let mut grid = seeded_grid();
        for (index, (pick, corner, front)) in steps.into_iter().enumerate() {
            apply_step(&mut grid, index, pick, corner, front);
        }

        // The incrementally maintained map agrees with a full rescan of
        // open corners, centers, and back symbols.
        for (symbol, expected) in scan_resources(&grid) {
            prop_assert_eq!(grid.resource_count(symbol), expected);
        }
        for symbol in [Symbol::Empty, Symbol::NoCorner] {
            prop_assert_eq!(grid.resource_count(symbol), 0);
        }
    }

    #[test]
    fn grid_snapshots_roundtrip_through_serde(
        steps in proptest::collection::vec((any::<usize>(), 0..4usize, any::<bool>()), 0..20),
    ) {
        let mut grid = seeded_grid();
        for (index, (pick, corner, front)) in steps.into_iter().enumerate() {
            apply_step(&mut grid, index, pick, corner, front);
        }

        let json = serde_json::to_string(&grid).expect("grid serializes");
        let back: Grid = serde_json::from_str(&json).expect("grid deserializes");
        prop_assert_eq!(grid, back);
    }
}
