//! The turn and phase state machine.
//!
//! Within a turn the active seat moves through two phases: **Placing**
//! (a card must leave the hand for the board) then **Drawing** (a card
//! must be taken from a deck or market slot, which ends the turn). Turns
//! rotate round-robin. End-of-match detection hinges on the black-pawn
//! holder, the seat that acts last in a round: the match finishes when the
//! holder completes a turn during the last round.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{ActionError, PlayerId};

/// The active seat's position within its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// A card must be placed before anything else.
    Placing,
    /// A card must be drawn to end the turn.
    Drawing,
}

/// How close the match is to ending.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ending {
    /// No ending condition has fired.
    NotTriggered,
    /// The round after the current one is the last.
    SecondToLastRound,
    /// The current round is the last; no further round begins.
    LastRound,
}

/// Round-robin turn tracking with last-round detection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnMachine {
    seat_count: usize,
    /// The seat that acts last in a round.
    black_pawn: PlayerId,
    current: PlayerId,
    phase: TurnPhase,
    ending: Ending,
    finished: bool,
}

impl TurnMachine {
    /// Create a machine with the first seat in the Placing phase.
    ///
    /// The black pawn sits with the last seat in turn order.
    #[must_use]
    pub fn new(seat_count: usize) -> Self {
        assert!(seat_count >= 2, "a match needs at least two seats");
        Self {
            seat_count,
            black_pawn: PlayerId::new((seat_count - 1) as u8),
            current: PlayerId::new(0),
            phase: TurnPhase::Placing,
            ending: Ending::NotTriggered,
            finished: false,
        }
    }

    /// The seat currently holding the turn.
    #[must_use]
    pub fn current(&self) -> PlayerId {
        self.current
    }

    /// The current phase.
    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// The black-pawn holder.
    #[must_use]
    pub fn black_pawn(&self) -> PlayerId {
        self.black_pawn
    }

    /// The ending state.
    #[must_use]
    pub fn ending(&self) -> Ending {
        self.ending
    }

    /// Has the match ended?
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Reject commands from seats that do not hold the turn.
    pub fn check_turn(&self, player: PlayerId) -> Result<(), ActionError> {
        if self.finished {
            return Err(ActionError::OutOfPhase);
        }
        if player == self.current {
            Ok(())
        } else {
            Err(ActionError::NotYourTurn { player })
        }
    }

    /// Reject actions inconsistent with the current phase.
    pub fn check_phase(&self, expected: TurnPhase) -> Result<(), ActionError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(ActionError::OutOfPhase)
        }
    }

    /// A legal placement moves the active seat into the Drawing phase.
    ///
    /// # Panics
    ///
    /// Panics when not in the Placing phase; callers check first.
    pub fn record_placement(&mut self) {
        assert_eq!(self.phase, TurnPhase::Placing, "placement out of phase");
        self.phase = TurnPhase::Drawing;
    }

    /// Complete the active seat's turn after its draw (or forced pass).
    ///
    /// `trigger` reports whether an end-of-match condition holds (score
    /// threshold reached, or every draw source empty). Returns `true` once
    /// the match has finished; otherwise the turn advances round-robin and
    /// the next seat starts Placing.
    ///
    /// The ending ladder: when the trigger first fires, the round state
    /// depends on the seat after the triggering one: the black-pawn
    /// holder means the current round is already the last, anyone else
    /// means one more full round follows. Independently, the holder
    /// completing a turn promotes second-to-last to last, or ends a last
    /// round.
    pub fn complete_turn(&mut self, trigger: bool) -> bool {
        assert_eq!(self.phase, TurnPhase::Drawing, "turn completed out of phase");
        assert!(!self.finished, "turn completed after match end");

        if self.ending == Ending::NotTriggered && trigger {
            let next = self.current.next(self.seat_count);
            self.ending = if next == self.black_pawn {
                Ending::LastRound
            } else {
                Ending::SecondToLastRound
            };
            debug!(ending = ?self.ending, triggered_by = %self.current, "match ending triggered");
        }

        if self.current == self.black_pawn {
            match self.ending {
                Ending::SecondToLastRound => {
                    self.ending = Ending::LastRound;
                    debug!("last round starting");
                }
                Ending::LastRound => {
                    self.finished = true;
                    debug!("match finished");
                }
                Ending::NotTriggered => {}
            }
        }

        if self.finished {
            return true;
        }

        self.current = self.current.next(self.seat_count);
        self.phase = TurnPhase::Placing;
        false
    }
}
