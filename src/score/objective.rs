//! End-of-match objective evaluation.
//!
//! Two structurally different evaluators share one entry point:
//! positional pattern matching over the board and symbol-quantity
//! combinatorics over the resource map.
//!
//! Pattern matching claims cards via their consumption flag, so a card
//! matched once can never be reused by another match of the same
//! objective. The caller clears the flags (`Grid::clear_consumed`) before
//! each objective's pass; re-invoking without clearing awards nothing new.

use std::cmp::Ordering;

use rustc_hash::FxHashMap;

use crate::board::Grid;
use crate::cards::{CardColor, ObjectiveCard, ObjectiveKind, Symbol};

/// Points one objective card awards on one board.
///
/// Position patterns mutate the board's consumption flags; symbol
/// quantities only read the resource map.
#[must_use]
pub fn objective_points(objective: &ObjectiveCard, grid: &mut Grid) -> u32 {
    match &objective.kind {
        ObjectiveKind::PositionPattern { colors, columns } => {
            score_position_pattern(grid, objective.points, colors, columns)
        }
        ObjectiveKind::SymbolQuantity { symbols } => {
            score_symbol_quantity(grid, objective.points, symbols)
        }
    }
}

/// The next pattern cell, one row down from `(row, col)`.
///
/// The column step follows the comparison of consecutive pattern offsets:
/// smaller means down-left, equal means straight down, larger means
/// down-right. `None` when the step leaves the board.
fn pattern_step(
    grid: &Grid,
    row: usize,
    col: usize,
    prev_offset: u8,
    next_offset: u8,
) -> Option<(usize, usize)> {
    let row = row + 1;
    if row >= grid.dim() {
        return None;
    }
    let col = match next_offset.cmp(&prev_offset) {
        Ordering::Less => col.checked_sub(1)?,
        Ordering::Equal => col,
        Ordering::Greater => col + 1,
    };
    (col < grid.dim()).then_some((row, col))
}

/// Is the cell an unconsumed card of the wanted color?
fn pattern_cell(grid: &Grid, row: usize, col: usize, color: CardColor) -> bool {
    grid.get(row, col)
        .is_some_and(|placed| !placed.is_consumed() && placed.color() == Some(color))
}

fn score_position_pattern(
    grid: &mut Grid,
    points: u32,
    colors: &[CardColor; 3],
    columns: &[u8; 3],
) -> u32 {
    let mut total = 0;
    let dim = grid.dim();

    for row in 0..dim {
        for col in 0..dim {
            if !pattern_cell(grid, row, col, colors[0]) {
                continue;
            }
            let Some((r2, c2)) = pattern_step(grid, row, col, columns[0], columns[1]) else {
                continue;
            };
            if !pattern_cell(grid, r2, c2, colors[1]) {
                continue;
            }
            let Some((r3, c3)) = pattern_step(grid, r2, c2, columns[1], columns[2]) else {
                continue;
            };
            if !pattern_cell(grid, r3, c3, colors[2]) {
                continue;
            }

            total += points;
            for (r, c) in [(row, col), (r2, c2), (r3, c3)] {
                grid.get_mut(r, c)
                    .expect("matched cell is occupied")
                    .set_consumed(true);
            }
        }
    }

    total
}

fn score_symbol_quantity(grid: &Grid, points: u32, symbols: &[Symbol]) -> u32 {
    let mut required: FxHashMap<Symbol, u32> = FxHashMap::default();
    for &symbol in symbols {
        *required.entry(symbol).or_insert(0) += 1;
    }

    // How many full copies of the required multiset the board holds:
    // the bottleneck over distinct symbols of count / multiplicity.
    let copies = required
        .iter()
        .map(|(&symbol, &multiplicity)| grid.resource_count(symbol) / multiplicity)
        .min()
        .unwrap_or(0);

    points * copies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Face};

    fn colored(id: &str, color: CardColor) -> Card {
        Card::resource(id, color, [Symbol::Empty; 4], 0)
    }

    fn seeded_grid(dim: usize) -> Grid {
        let mut grid = Grid::new(dim);
        grid.place_starter(
            Card::starter("s01", [Symbol::Empty; 4], [], [Symbol::Empty; 4]),
            Face::Front,
        );
        grid
    }

    #[test]
    fn test_symbol_quantity_three_distinct() {
        let mut grid = seeded_grid(9);
        for (symbol, count) in [
            (Symbol::Quill, 5),
            (Symbol::Inkwell, 9),
            (Symbol::Manuscript, 9),
        ] {
            grid.add_resource(symbol, count);
        }

        let objective = ObjectiveCard::symbol_quantity(
            "o01",
            2,
            [Symbol::Quill, Symbol::Inkwell, Symbol::Manuscript],
        );
        assert_eq!(objective_points(&objective, &mut grid), 10);
    }

    #[test]
    fn test_symbol_quantity_three_identical() {
        let mut grid = seeded_grid(9);
        grid.add_resource(Symbol::Animal, 7);

        let objective = ObjectiveCard::symbol_quantity(
            "o02",
            2,
            [Symbol::Animal, Symbol::Animal, Symbol::Animal],
        );
        assert_eq!(objective_points(&objective, &mut grid), 4);
    }

    #[test]
    fn test_symbol_quantity_pair() {
        let mut grid = seeded_grid(9);
        grid.add_resource(Symbol::Quill, 5);

        let objective = ObjectiveCard::symbol_quantity("o03", 2, [Symbol::Quill, Symbol::Quill]);
        assert_eq!(objective_points(&objective, &mut grid), 4);
    }

    /// A straight green diagonal going down-right: offsets [0, 1, 2].
    fn down_right_column(grid: &mut Grid) -> (usize, usize) {
        let (row, col) = grid.center();
        grid.place(colored("p1", CardColor::Green), Face::Front, row - 1, col - 1)
            .unwrap();
        grid.place(colored("p2", CardColor::Green), Face::Front, row - 2, col - 2)
            .unwrap();
        grid.place(colored("p3", CardColor::Green), Face::Front, row - 3, col - 3)
            .unwrap();
        (row, col)
    }

    #[test]
    fn test_position_pattern_matches_diagonal() {
        let mut grid = seeded_grid(11);
        down_right_column(&mut grid);

        let objective = ObjectiveCard::position_pattern(
            "o04",
            2,
            [CardColor::Green; 3],
            [0, 1, 2],
        );

        grid.clear_consumed();
        assert_eq!(objective_points(&objective, &mut grid), 2);
    }

    #[test]
    fn test_position_pattern_idempotent_without_clear() {
        let mut grid = seeded_grid(11);
        down_right_column(&mut grid);

        let objective = ObjectiveCard::position_pattern(
            "o05",
            2,
            [CardColor::Green; 3],
            [0, 1, 2],
        );

        grid.clear_consumed();
        assert_eq!(objective_points(&objective, &mut grid), 2);
        // Consumption flags still set: no further award.
        assert_eq!(objective_points(&objective, &mut grid), 0);

        grid.clear_consumed();
        assert_eq!(objective_points(&objective, &mut grid), 2);
    }

    #[test]
    fn test_position_pattern_no_overlap_between_matches() {
        // Four greens on one diagonal hold only one disjoint triple.
        let mut grid = seeded_grid(13);
        let (row, col) = grid.center();
        for i in 1..=4 {
            grid.place(
                colored(&format!("p{i}"), CardColor::Green),
                Face::Front,
                row - i,
                col - i,
            )
            .unwrap();
        }

        let objective = ObjectiveCard::position_pattern(
            "o06",
            2,
            [CardColor::Green; 3],
            [0, 1, 2],
        );

        grid.clear_consumed();
        assert_eq!(objective_points(&objective, &mut grid), 2);
    }

    #[test]
    fn test_position_pattern_wrong_color_no_match() {
        let mut grid = seeded_grid(11);
        down_right_column(&mut grid);

        let objective = ObjectiveCard::position_pattern(
            "o07",
            2,
            [CardColor::Green, CardColor::Red, CardColor::Green],
            [0, 1, 2],
        );

        grid.clear_consumed();
        assert_eq!(objective_points(&objective, &mut grid), 0);
    }

    #[test]
    fn test_position_pattern_elbow_shape() {
        let mut grid = seeded_grid(11);
        let (row, col) = grid.center();

        grid.place(colored("r1", CardColor::Red), Face::Front, row - 1, col + 1)
            .unwrap();
        grid.place(colored("r2", CardColor::Red), Face::Front, row - 2, col + 2)
            .unwrap();
        grid.place(colored("r3", CardColor::Red), Face::Front, row - 3, col + 1)
            .unwrap();

        // Offsets [0, 1, 0]: down-right from r3 onto r2, then down-left
        // onto r1.
        let objective = ObjectiveCard::position_pattern(
            "o08",
            3,
            [CardColor::Red; 3],
            [0, 1, 0],
        );

        grid.clear_consumed();
        assert_eq!(objective_points(&objective, &mut grid), 3);
    }
}
