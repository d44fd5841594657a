//! Playable cards.
//!
//! A `Card` is the immutable description drawn from a deck: color, corner
//! symbols, centers, points, scoring kind, and the kind-specific extras
//! (gold requirements, starter back side). Mutable placement state (face,
//! open flags, coordinates) lives on `board::PlacedCard`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::symbol::{CardColor, Symbol};

/// Which side of a card is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    /// Resource-productive front.
    Front,
    /// Single-resource, blank-cornered back.
    Back,
}

/// One of a card's four diagonal attachment points.
///
/// The index doubles as a diagonal direction: the `TopLeft` neighbor of a
/// cell sits one row up and one column left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CornerIndex {
    /// North-west corner.
    TopLeft,
    /// North-east corner.
    TopRight,
    /// South-east corner.
    BottomRight,
    /// South-west corner.
    BottomLeft,
}

impl CornerIndex {
    /// All four corners, in storage order.
    pub const ALL: [CornerIndex; 4] = [
        CornerIndex::TopLeft,
        CornerIndex::TopRight,
        CornerIndex::BottomRight,
        CornerIndex::BottomLeft,
    ];

    /// Position in a card's corner array.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            CornerIndex::TopLeft => 0,
            CornerIndex::TopRight => 1,
            CornerIndex::BottomRight => 2,
            CornerIndex::BottomLeft => 3,
        }
    }

    /// Row/column delta of the diagonal neighbor in this direction.
    #[must_use]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            CornerIndex::TopLeft => (-1, -1),
            CornerIndex::TopRight => (-1, 1),
            CornerIndex::BottomRight => (1, 1),
            CornerIndex::BottomLeft => (1, -1),
        }
    }

    /// The corner of the diagonal neighbor that faces back at this cell.
    #[must_use]
    pub const fn opposite(self) -> CornerIndex {
        match self {
            CornerIndex::TopLeft => CornerIndex::BottomRight,
            CornerIndex::TopRight => CornerIndex::BottomLeft,
            CornerIndex::BottomRight => CornerIndex::TopLeft,
            CornerIndex::BottomLeft => CornerIndex::TopRight,
        }
    }
}

/// How a card scores on placement.
///
/// Cards without a scoring kind award their base points flat when placed
/// front-face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoringKind {
    /// Base points multiplied by the number of occupied diagonal neighbors.
    ByPosition,
    /// Base points multiplied by the owner's count of the bonus symbol.
    PerObject,
}

/// Kind-specific card data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardKind {
    /// Plain resource card.
    Resource,
    /// Gold card with per-symbol placement requirements.
    Gold {
        /// Minimum resource quantities required to place front-face.
        requirements: FxHashMap<Symbol, u32>,
    },
    /// Starter card with a second, back-side corner set. Placed first,
    /// always at the board's center.
    Starter {
        /// Corner symbols shown when placed back-face.
        back_corners: [Symbol; 4],
    },
}

/// An immutable card description.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Opaque imagery identifier, passed through without interpretation.
    pub art_id: String,

    /// Kingdom color. Starter cards have none.
    pub color: Option<CardColor>,

    /// Front corner symbols, in `CornerIndex` order.
    pub corners: [Symbol; 4],

    /// Center symbols. Counted only when the card shows its front.
    pub centers: SmallVec<[Symbol; 3]>,

    /// Base points awarded on front placement.
    pub points: u32,

    /// Scoring strategy. `None` awards base points flat.
    pub scoring: Option<ScoringKind>,

    /// Bonus object counted by `ScoringKind::PerObject`.
    pub bonus_symbol: Option<Symbol>,

    /// Kind-specific data.
    pub kind: CardKind,
}

impl Card {
    /// Create a plain resource card.
    #[must_use]
    pub fn resource(
        art_id: impl Into<String>,
        color: CardColor,
        corners: [Symbol; 4],
        points: u32,
    ) -> Self {
        Self {
            art_id: art_id.into(),
            color: Some(color),
            corners,
            centers: SmallVec::new(),
            points,
            scoring: None,
            bonus_symbol: None,
            kind: CardKind::Resource,
        }
    }

    /// Create a gold card.
    #[must_use]
    pub fn gold(
        art_id: impl Into<String>,
        color: CardColor,
        corners: [Symbol; 4],
        points: u32,
        requirements: FxHashMap<Symbol, u32>,
    ) -> Self {
        Self {
            art_id: art_id.into(),
            color: Some(color),
            corners,
            centers: SmallVec::new(),
            points,
            scoring: None,
            bonus_symbol: None,
            kind: CardKind::Gold { requirements },
        }
    }

    /// Create a starter card.
    #[must_use]
    pub fn starter(
        art_id: impl Into<String>,
        corners: [Symbol; 4],
        centers: impl IntoIterator<Item = Symbol>,
        back_corners: [Symbol; 4],
    ) -> Self {
        Self {
            art_id: art_id.into(),
            color: None,
            corners,
            centers: centers.into_iter().collect(),
            points: 0,
            scoring: None,
            bonus_symbol: None,
            kind: CardKind::Starter { back_corners },
        }
    }

    /// Set the scoring kind (builder pattern).
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringKind) -> Self {
        self.scoring = Some(scoring);
        self
    }

    /// Set the bonus object symbol (builder pattern).
    #[must_use]
    pub fn with_bonus_symbol(mut self, symbol: Symbol) -> Self {
        self.bonus_symbol = Some(symbol);
        self
    }

    /// Set the center symbols (builder pattern).
    #[must_use]
    pub fn with_centers(mut self, centers: impl IntoIterator<Item = Symbol>) -> Self {
        self.centers = centers.into_iter().collect();
        self
    }

    /// Is this a starter card?
    #[must_use]
    pub fn is_starter(&self) -> bool {
        matches!(self.kind, CardKind::Starter { .. })
    }

    /// Gold requirements, if this is a gold card.
    #[must_use]
    pub fn requirements(&self) -> Option<&FxHashMap<Symbol, u32>> {
        match &self.kind {
            CardKind::Gold { requirements } => Some(requirements),
            _ => None,
        }
    }

    /// The corner symbols shown for a given face.
    ///
    /// Non-starter backs are blank: four `Empty` corners.
    #[must_use]
    pub fn corners_for(&self, face: Face) -> [Symbol; 4] {
        match (face, &self.kind) {
            (Face::Front, _) => self.corners,
            (Face::Back, CardKind::Starter { back_corners }) => *back_corners,
            (Face::Back, _) => [Symbol::Empty; 4],
        }
    }
}
