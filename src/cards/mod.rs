//! Card definitions: symbols, playable cards, and objectives.

mod card;
mod objective;
mod symbol;

pub use card::{Card, CardKind, CornerIndex, Face, ScoringKind};
pub use objective::{ObjectiveCard, ObjectiveKind};
pub use symbol::{CardColor, Symbol};
