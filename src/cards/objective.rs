//! End-of-match objective cards.
//!
//! An objective is evaluated once per player when the match ends. It is
//! either common (revealed to the whole table) or secret (chosen privately
//! by one player from an offered pair); the card itself is the same type in
//! both roles.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::symbol::{CardColor, Symbol};

/// What an objective card requires.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectiveKind {
    /// An ordered color sequence laid out along a column-offset shape.
    ///
    /// `columns[i]` is the column offset of the i-th card in the pattern;
    /// consecutive offsets are compared to derive each diagonal step.
    PositionPattern {
        /// Colors of the three pattern cards, top to bottom.
        colors: [CardColor; 3],
        /// Column offsets of the three pattern cards.
        columns: [u8; 3],
    },

    /// A required multiset of 2 or 3 symbols, possibly repeated.
    SymbolQuantity {
        /// The required symbols.
        symbols: SmallVec<[Symbol; 3]>,
    },
}

/// An end-of-match scoring card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveCard {
    /// Opaque imagery identifier.
    pub art_id: String,

    /// Points awarded per satisfied instance of the requirement.
    pub points: u32,

    /// The requirement itself.
    pub kind: ObjectiveKind,
}

impl ObjectiveCard {
    /// Create a position-pattern objective.
    #[must_use]
    pub fn position_pattern(
        art_id: impl Into<String>,
        points: u32,
        colors: [CardColor; 3],
        columns: [u8; 3],
    ) -> Self {
        Self {
            art_id: art_id.into(),
            points,
            kind: ObjectiveKind::PositionPattern { colors, columns },
        }
    }

    /// Create a symbol-quantity objective.
    ///
    /// # Panics
    ///
    /// Panics if `symbols` does not hold 2 or 3 entries; the deck intake is
    /// expected to have validated its catalog.
    #[must_use]
    pub fn symbol_quantity(
        art_id: impl Into<String>,
        points: u32,
        symbols: impl IntoIterator<Item = Symbol>,
    ) -> Self {
        let symbols: SmallVec<[Symbol; 3]> = symbols.into_iter().collect();
        assert!(
            (2..=3).contains(&symbols.len()),
            "symbol-quantity objectives require 2 or 3 symbols"
        );
        Self {
            art_id: art_id.into(),
            points,
            kind: ObjectiveKind::SymbolQuantity { symbols },
        }
    }
}
