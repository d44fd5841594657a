//! The player aggregate.
//!
//! A `Player` owns its hand, board, score, and objective state, and is the
//! piece the match orchestration mutates on every command.

use serde::{Deserialize, Serialize};

use crate::board::Grid;
use crate::cards::{Card, ObjectiveCard};
use crate::core::PlayerId;

/// One seat's complete private state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    nickname: String,
    hand: Vec<Card>,
    grid: Grid,
    score: u32,
    has_turn: bool,
    /// Starter card dealt at setup, waiting to be placed.
    pending_starter: Option<Card>,
    /// Secret-objective candidates offered at setup.
    offered_objectives: Vec<ObjectiveCard>,
    secret_objective: Option<ObjectiveCard>,
    /// Objectives that contributed non-zero points at match end.
    scoring_objectives: u32,
}

impl Player {
    /// Create a player with an empty hand and a fresh board.
    #[must_use]
    pub fn new(id: PlayerId, nickname: impl Into<String>, grid_dim: usize) -> Self {
        Self {
            id,
            nickname: nickname.into(),
            hand: Vec::new(),
            grid: Grid::new(grid_dim),
            score: 0,
            has_turn: false,
            pending_starter: None,
            offered_objectives: Vec::new(),
            secret_objective: None,
            scoring_objectives: 0,
        }
    }

    /// Seat identifier.
    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    /// The hand, in order.
    #[must_use]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    /// The player's board.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Current score.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Does this seat hold the turn?
    #[must_use]
    pub fn has_turn(&self) -> bool {
        self.has_turn
    }

    /// The chosen secret objective, if already chosen.
    #[must_use]
    pub fn secret_objective(&self) -> Option<&ObjectiveCard> {
        self.secret_objective.as_ref()
    }

    /// Secret-objective candidates still on offer.
    #[must_use]
    pub fn offered_objectives(&self) -> &[ObjectiveCard] {
        &self.offered_objectives
    }

    /// How many objectives contributed non-zero points at match end.
    #[must_use]
    pub fn scoring_objectives(&self) -> u32 {
        self.scoring_objectives
    }

    pub(crate) fn set_turn(&mut self, has_turn: bool) {
        self.has_turn = has_turn;
    }

    pub(crate) fn add_points(&mut self, points: u32) {
        self.score += points;
    }

    pub(crate) fn record_scoring_objective(&mut self) {
        self.scoring_objectives += 1;
    }

    pub(crate) fn add_to_hand(&mut self, card: Card) {
        self.hand.push(card);
    }

    /// Remove and return a hand card by index.
    ///
    /// # Panics
    ///
    /// Panics on an out-of-range index; the command surface validates.
    pub(crate) fn take_from_hand(&mut self, index: usize) -> Card {
        assert!(index < self.hand.len(), "hand index out of range");
        self.hand.remove(index)
    }

    pub(crate) fn deal_starter(&mut self, card: Card) {
        debug_assert!(self.pending_starter.is_none(), "starter dealt twice");
        self.pending_starter = Some(card);
    }

    pub(crate) fn take_pending_starter(&mut self) -> Option<Card> {
        self.pending_starter.take()
    }

    /// Has the starter card been placed yet?
    #[must_use]
    pub fn starter_placed(&self) -> bool {
        self.pending_starter.is_none() && self.grid.card_count() > 0
    }

    pub(crate) fn offer_objectives(&mut self, options: Vec<ObjectiveCard>) {
        self.offered_objectives = options;
    }

    /// Bind the chosen candidate as the secret objective and discard the
    /// rest of the offer.
    ///
    /// # Panics
    ///
    /// Panics on an out-of-range index; the command surface validates.
    pub(crate) fn choose_objective(&mut self, index: usize) {
        assert!(
            index < self.offered_objectives.len(),
            "objective choice index out of range"
        );
        let chosen = self.offered_objectives.swap_remove(index);
        self.offered_objectives.clear();
        self.secret_objective = Some(chosen);
    }
}
