//! Symbols and card colors.
//!
//! A corner carries one `Symbol`. Four of them are kingdom resources, three
//! are bonus objects, and two are structural markers: `Empty` (attachable,
//! contributes nothing) and `NoCorner` (the corner does not exist and can
//! never be attached to).

use serde::{Deserialize, Serialize};

/// A symbol printed on a card corner or center.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    /// Animal kingdom resource.
    Animal,
    /// Fungus kingdom resource.
    Fungus,
    /// Insect kingdom resource.
    Insect,
    /// Plant kingdom resource.
    Plant,
    /// Quill bonus object.
    Quill,
    /// Inkwell bonus object.
    Inkwell,
    /// Manuscript bonus object.
    Manuscript,
    /// Attachable corner with nothing printed on it.
    Empty,
    /// The corner does not exist; nothing can attach here.
    NoCorner,
}

impl Symbol {
    /// Does this symbol count towards the resource map?
    #[must_use]
    pub fn is_resource(self) -> bool {
        !matches!(self, Symbol::Empty | Symbol::NoCorner)
    }

    /// Can a card be attached to a corner carrying this symbol?
    #[must_use]
    pub fn is_attachable(self) -> bool {
        self != Symbol::NoCorner
    }
}

/// Card color, one per kingdom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardColor {
    /// Fungus kingdom.
    Red,
    /// Plant kingdom.
    Green,
    /// Animal kingdom.
    Blue,
    /// Insect kingdom.
    Purple,
}

impl CardColor {
    /// The single resource a back-face placement of this color yields.
    #[must_use]
    pub fn back_symbol(self) -> Symbol {
        match self {
            CardColor::Blue => Symbol::Animal,
            CardColor::Red => Symbol::Fungus,
            CardColor::Purple => Symbol::Insect,
            CardColor::Green => Symbol::Plant,
        }
    }
}
