//! Notifications emitted after every committed transition.
//!
//! The engine pushes one `Event` into an injected `EventSink` after each
//! accepted state change, on the same call stack as the mutating
//! operation. The core knows nothing about what is on the other side of
//! the sink: transports, renderers, and bots all look the same from here.
//! Sinks must not block indefinitely.

use serde::{Deserialize, Serialize};

use crate::board::Grid;
use crate::cards::{Card, ObjectiveCard};
use crate::core::PlayerId;

/// A committed state transition, with a payload shaped per kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// A player's hand changed.
    HandUpdated {
        /// Hand owner.
        player: PlayerId,
        /// The full hand, in order.
        hand: Vec<Card>,
    },

    /// A player's board changed.
    AreaUpdated {
        /// Board owner.
        player: PlayerId,
        /// Snapshot of the owner's board.
        grid: Grid,
        /// The owner's score after the change.
        score: u32,
    },

    /// The shared table changed.
    TableUpdated {
        /// Face-up resource market slots.
        resource_market: [Option<Card>; 2],
        /// Face-up gold market slots.
        gold_market: [Option<Card>; 2],
        /// Cards left in the resource deck.
        resource_deck: usize,
        /// Cards left in the gold deck.
        gold_deck: usize,
    },

    /// A new turn began.
    TurnStarted {
        /// The seat now holding the turn.
        player: PlayerId,
    },

    /// Secret-objective candidates were offered to a player.
    ObjectivesOffered {
        /// The player being offered.
        player: PlayerId,
        /// The candidates, in choice-index order.
        options: Vec<ObjectiveCard>,
    },

    /// A player chose their secret objective.
    ObjectiveChosen {
        /// The chooser.
        player: PlayerId,
        /// The chosen card.
        objective: ObjectiveCard,
    },

    /// A player's score changed.
    PointsUpdated {
        /// The player.
        player: PlayerId,
        /// The new score.
        score: u32,
    },

    /// A command was rejected. Carries only the requester's identity.
    ActionFailed {
        /// The seat whose command was rejected.
        player: PlayerId,
    },

    /// The match ended and this player won (possibly alongside others).
    MatchWon {
        /// A winner.
        player: PlayerId,
        /// Final score.
        score: u32,
    },

    /// The match ended and this player did not win.
    MatchLost {
        /// A non-winner.
        player: PlayerId,
        /// Final score.
        score: u32,
    },
}

/// Receives events on the mutating call stack.
pub trait EventSink {
    /// Handle one committed transition.
    fn on_event(&mut self, event: &Event);
}

/// Sink that discards everything. Useful for headless simulation.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn on_event(&mut self, _event: &Event) {}
}

/// Sink that records every event, for assertions in tests and replays.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    /// Every event received, in order.
    pub events: Vec<Event>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events of interest, filtered by a predicate.
    pub fn filtered(&self, predicate: impl Fn(&Event) -> bool) -> Vec<&Event> {
        self.events.iter().filter(|event| predicate(event)).collect()
    }
}

impl EventSink for RecordingSink {
    fn on_event(&mut self, event: &Event) {
        self.events.push(event.clone());
    }
}

impl<F: FnMut(&Event)> EventSink for F {
    fn on_event(&mut self, event: &Event) {
        self(event);
    }
}
