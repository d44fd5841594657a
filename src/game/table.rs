//! The shared table: decks and face-up market slots.
//!
//! The core consumes four fully-populated, already-validated card
//! collections and shuffles them in place; sourcing and parsing them is an
//! external collaborator's job. Each non-starter deck feeds two face-up
//! market slots, replenished from the deck when drawn.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, ObjectiveCard};
use crate::core::{ActionError, GameRng};

/// Which non-starter deck a draw targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeckKind {
    /// The resource-card deck.
    Resource,
    /// The gold-card deck.
    Gold,
}

/// An ordered pile of cards, drawn from the top (the end of the vec).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deck<T> {
    cards: Vec<T>,
}

impl<T> Deck<T> {
    /// Wrap a pre-populated pile.
    #[must_use]
    pub fn new(cards: Vec<T>) -> Self {
        Self { cards }
    }

    /// Cards remaining.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Is the pile exhausted?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Draw the top card, if any.
    pub fn draw(&mut self) -> Option<T> {
        self.cards.pop()
    }

    /// Shuffle in place.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }
}

/// The four pre-populated card collections a match consumes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeckSet {
    /// Resource cards.
    pub resource: Vec<Card>,
    /// Gold cards.
    pub gold: Vec<Card>,
    /// Starter cards, one per seat.
    pub starter: Vec<Card>,
    /// Objective cards, for common and secret objectives.
    pub objectives: Vec<ObjectiveCard>,
}

/// Decks, markets, and common objectives shared by all seats.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Table {
    resource_deck: Deck<Card>,
    gold_deck: Deck<Card>,
    starter_deck: Deck<Card>,
    objective_deck: Deck<ObjectiveCard>,
    resource_market: [Option<Card>; 2],
    gold_market: [Option<Card>; 2],
    common_objectives: Vec<ObjectiveCard>,
}

impl Table {
    /// Build the table: shuffle every deck and fill the market slots.
    #[must_use]
    pub fn new(decks: DeckSet, rng: &mut GameRng) -> Self {
        let mut table = Self {
            resource_deck: Deck::new(decks.resource),
            gold_deck: Deck::new(decks.gold),
            starter_deck: Deck::new(decks.starter),
            objective_deck: Deck::new(decks.objectives),
            resource_market: [None, None],
            gold_market: [None, None],
            common_objectives: Vec::new(),
        };
        table.resource_deck.shuffle(rng);
        table.gold_deck.shuffle(rng);
        table.starter_deck.shuffle(rng);
        table.objective_deck.shuffle(rng);
        for slot in 0..2 {
            table.resource_market[slot] = table.resource_deck.draw();
            table.gold_market[slot] = table.gold_deck.draw();
        }
        table
    }

    fn deck_mut(&mut self, kind: DeckKind) -> &mut Deck<Card> {
        match kind {
            DeckKind::Resource => &mut self.resource_deck,
            DeckKind::Gold => &mut self.gold_deck,
        }
    }

    fn market_mut(&mut self, kind: DeckKind) -> &mut [Option<Card>; 2] {
        match kind {
            DeckKind::Resource => &mut self.resource_market,
            DeckKind::Gold => &mut self.gold_market,
        }
    }

    /// Draw the top card of a deck.
    pub fn draw_from_deck(&mut self, kind: DeckKind) -> Result<Card, ActionError> {
        self.deck_mut(kind).draw().ok_or(ActionError::EmptySource)
    }

    /// Take a face-up market card and replenish the slot from its deck.
    ///
    /// # Panics
    ///
    /// Panics on a slot index other than 0 or 1.
    pub fn draw_from_market(&mut self, kind: DeckKind, slot: usize) -> Result<Card, ActionError> {
        assert!(slot < 2, "market slot index out of range");
        let card = self.market_mut(kind)[slot]
            .take()
            .ok_or(ActionError::EmptySource)?;
        let refill = self.deck_mut(kind).draw();
        self.market_mut(kind)[slot] = refill;
        Ok(card)
    }

    /// Draw a starter card for a seat at setup.
    pub fn draw_starter(&mut self) -> Option<Card> {
        self.starter_deck.draw()
    }

    /// Draw an objective card at setup.
    pub fn draw_objective(&mut self) -> Option<ObjectiveCard> {
        self.objective_deck.draw()
    }

    /// Reveal `count` common objectives to the table.
    ///
    /// # Panics
    ///
    /// Panics if the objective deck runs dry; the intake contract promises
    /// enough objectives for commons plus every seat's offer.
    pub fn reveal_common_objectives(&mut self, count: usize) {
        for _ in 0..count {
            let objective = self
                .objective_deck
                .draw()
                .expect("objective deck exhausted during setup");
            self.common_objectives.push(objective);
        }
    }

    /// The common objectives, visible to every seat.
    #[must_use]
    pub fn common_objectives(&self) -> &[ObjectiveCard] {
        &self.common_objectives
    }

    /// Are both non-starter decks and all four market slots empty?
    #[must_use]
    pub fn draw_sources_empty(&self) -> bool {
        self.resource_deck.is_empty()
            && self.gold_deck.is_empty()
            && self.resource_market.iter().all(Option::is_none)
            && self.gold_market.iter().all(Option::is_none)
    }

    /// Snapshot of a market row.
    #[must_use]
    pub fn market(&self, kind: DeckKind) -> &[Option<Card>; 2] {
        match kind {
            DeckKind::Resource => &self.resource_market,
            DeckKind::Gold => &self.gold_market,
        }
    }

    /// Cards left in a deck.
    #[must_use]
    pub fn deck_len(&self, kind: DeckKind) -> usize {
        match kind {
            DeckKind::Resource => self.resource_deck.len(),
            DeckKind::Gold => self.gold_deck.len(),
        }
    }
}
