//! Recoverable game errors.
//!
//! Every variant is recoverable and non-fatal to the match: the command is
//! rejected, nothing is mutated, and an `ActionFailed` notification is
//! raised. The `Match` command surface rejects all externally supplied
//! indices and coordinates before they reach the inner types; past that
//! boundary, out-of-range values are programming-contract violations and
//! assert.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::PlayerId;

/// Why a player command was rejected.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionError {
    /// Corner-adjacency rule violated, or the target cell is unusable.
    #[error("illegal placement at ({row}, {col})")]
    IllegalPlacement {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// A gold card's per-symbol requirement is unmet.
    #[error("resources do not meet the card's requirement")]
    InsufficientResources,

    /// The action does not match the current Placing/Drawing state.
    #[error("action is not legal in the current phase")]
    OutOfPhase,

    /// Draw requested from an empty deck or market slot.
    #[error("draw source is empty")]
    EmptySource,

    /// Externally supplied index (hand card, objective choice, market
    /// slot) is out of range.
    #[error("index {index} is out of range")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
    },

    /// Command issued by a seat that does not hold the turn.
    #[error("it is not {player}'s turn")]
    NotYourTurn {
        /// The seat that issued the command.
        player: PlayerId,
    },
}
