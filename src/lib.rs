//! # canopy
//!
//! A board-placement and match engine for a corner-attachment card game.
//!
//! ## Design Principles
//!
//! 1. **Engine, not transport**: the crate owns rules, state, and scoring.
//!    Networking, persistence, and rendering live behind the [`EventSink`]
//!    seam.
//!
//! 2. **Commit or reject**: every player command either commits fully
//!    (emitting events for each state change) or is rejected with an
//!    [`ActionError`] and mutates nothing.
//!
//! 3. **Deterministic**: all randomness flows through a seeded [`GameRng`],
//!    so a match replays exactly from its seed and command sequence.
//!
//! ## Modules
//!
//! - `core`: player identifiers, RNG, configuration, errors
//! - `cards`: symbols, playable cards, objective cards
//! - `board`: per-player grid, growth, the placement engine
//! - `score`: placement points and objective evaluation
//! - `game`: table, players, turn machine, match orchestration
//! - `events`: the notification seam

pub mod board;
pub mod cards;
pub mod core;
pub mod events;
pub mod game;
pub mod score;

// Re-export commonly used types
pub use crate::core::{ActionError, GameRng, MatchConfig, PlayerId};

pub use crate::cards::{
    Card, CardColor, CardKind, CornerIndex, Face, ObjectiveCard, ObjectiveKind, ScoringKind,
    Symbol,
};

pub use crate::board::{Grid, PlacedCard};

pub use crate::score::{objective_points, placement_points};

pub use crate::game::{
    Deck, DeckKind, DeckSet, Ending, Match, MatchOutcome, MatchStage, Player, Table, TurnMachine,
    TurnPhase,
};

pub use crate::events::{Event, EventSink, NullSink, RecordingSink};
