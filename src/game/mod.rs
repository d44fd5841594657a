//! Match orchestration: setup, the command surface, and final scoring.
//!
//! A [`Match`] owns every seat's state, the shared [`Table`], and the
//! [`TurnMachine`], and exposes the player-facing commands. Commands either
//! commit (mutating state and pushing events into the injected sink) or are
//! rejected with an [`ActionError`] and an `ActionFailed` event; rejected
//! commands mutate nothing.
//!
//! ## Match lifecycle
//!
//! 1. **StarterPlacement**: every seat places its starter card on a face of
//!    its choice.
//! 2. **ObjectiveChoice**: opening hands are dealt, common objectives are
//!    revealed, and every seat picks one secret objective from its offer.
//! 3. **Playing**: round-robin turns of place-then-draw until the ending
//!    rounds run out.
//! 4. **Finished**: objectives are scored, winners are decided, and the
//!    match rejects all further commands.

mod player;
mod table;
mod turn;

pub use player::Player;
pub use table::{Deck, DeckKind, DeckSet, Table};
pub use turn::{Ending, TurnMachine, TurnPhase};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cards::{Face, ObjectiveCard};
use crate::core::{ActionError, GameRng, MatchConfig, PlayerId};
use crate::events::{Event, EventSink};
use crate::score::{objective_points, placement_points};

/// Where the match is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStage {
    /// Seats are placing their starter cards.
    StarterPlacement,
    /// Seats are choosing their secret objectives.
    ObjectiveChoice,
    /// Normal place-then-draw turns.
    Playing,
    /// The match has ended; only accessors work.
    Finished,
}

/// The final result of a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// A single winner.
    Winner(PlayerId),
    /// Several players tied on score and objective count.
    Winners(Vec<PlayerId>),
}

impl MatchOutcome {
    /// Did this player win?
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            Self::Winner(id) => *id == player,
            Self::Winners(ids) => ids.contains(&player),
        }
    }
}

/// A running match. Generic over the event sink so transports, renderers,
/// and headless tests all plug in the same way.
#[derive(Debug)]
pub struct Match<S: EventSink> {
    config: MatchConfig,
    players: Vec<Player>,
    table: Table,
    turn: TurnMachine,
    stage: MatchStage,
    outcome: Option<MatchOutcome>,
    sink: S,
}

impl<S: EventSink> Match<S> {
    /// Set up a match: shuffle the decks, fill the markets, and deal one
    /// starter card to each seat.
    ///
    /// # Panics
    ///
    /// Panics on an invalid configuration, fewer than two nicknames, or a
    /// deck set too small for setup. These are intake-contract violations,
    /// not in-game conditions.
    #[must_use]
    pub fn new(
        nicknames: &[&str],
        decks: DeckSet,
        config: MatchConfig,
        seed: u64,
        sink: S,
    ) -> Self {
        if let Err(reason) = config.validate() {
            panic!("invalid match configuration: {reason}");
        }
        assert!(nicknames.len() >= 2, "a match needs at least two seats");

        let mut rng = GameRng::new(seed);
        let mut table = Table::new(decks, &mut rng);
        let mut players: Vec<Player> = nicknames
            .iter()
            .zip(PlayerId::all(nicknames.len()))
            .map(|(nickname, id)| Player::new(id, *nickname, config.initial_grid_dim))
            .collect();
        for player in &mut players {
            let starter = table
                .draw_starter()
                .expect("starter deck exhausted during setup");
            player.deal_starter(starter);
        }

        info!(seats = players.len(), seed, "match created");

        let turn = TurnMachine::new(players.len());
        let mut game = Self {
            config,
            players,
            table,
            turn,
            stage: MatchStage::StarterPlacement,
            outcome: None,
            sink,
        };
        game.emit_table();
        game
    }

    /// Current lifecycle stage.
    #[must_use]
    pub fn stage(&self) -> MatchStage {
        self.stage
    }

    /// The final outcome, once the match has finished.
    #[must_use]
    pub fn outcome(&self) -> Option<&MatchOutcome> {
        self.outcome.as_ref()
    }

    /// The match configuration.
    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// All seats, in turn order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// One seat's state.
    ///
    /// # Panics
    ///
    /// Panics on an identifier outside the seat range.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    /// The shared table.
    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// The turn machine.
    #[must_use]
    pub fn turn(&self) -> &TurnMachine {
        &self.turn
    }

    /// The injected event sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Place a seat's starter card on the chosen face.
    ///
    /// Legal only during `StarterPlacement`, once per seat, in any seat
    /// order. When the last starter lands, opening hands are dealt, common
    /// objectives are revealed, and secret-objective offers go out.
    pub fn place_starter(&mut self, player: PlayerId, face: Face) -> Result<(), ActionError> {
        if self.stage != MatchStage::StarterPlacement {
            return self.fail(player, ActionError::OutOfPhase);
        }
        let starter = match self.players[player.index()].take_pending_starter() {
            Some(card) => card,
            // Already placed.
            None => return self.fail(player, ActionError::OutOfPhase),
        };

        self.players[player.index()].grid_mut().place_starter(starter, face);
        self.emit_area(player);

        if self.players.iter().all(Player::starter_placed) {
            self.begin_objective_choice();
        }
        Ok(())
    }

    /// Bind a seat's secret objective to one of its offered candidates.
    ///
    /// Legal only during `ObjectiveChoice`, once per seat. When the last
    /// choice lands the match moves to `Playing` and the first turn starts.
    pub fn choose_objective(&mut self, player: PlayerId, index: usize) -> Result<(), ActionError> {
        if self.stage != MatchStage::ObjectiveChoice {
            return self.fail(player, ActionError::OutOfPhase);
        }
        if self.players[player.index()].secret_objective().is_some() {
            return self.fail(player, ActionError::OutOfPhase);
        }
        if index >= self.players[player.index()].offered_objectives().len() {
            return self.fail(player, ActionError::IndexOutOfRange { index });
        }

        self.players[player.index()].choose_objective(index);
        let objective = self.players[player.index()]
            .secret_objective()
            .cloned()
            .expect("objective bound above");
        self.sink.on_event(&Event::ObjectiveChosen { player, objective });

        if self
            .players
            .iter()
            .all(|p| p.secret_objective().is_some())
        {
            self.begin_playing();
        }
        Ok(())
    }

    /// Place a hand card on the seat's board.
    ///
    /// Legal only for the turn holder in the Placing phase. On success the
    /// card leaves the hand, placement points are awarded, and the turn
    /// moves to the Drawing phase.
    pub fn place_card(
        &mut self,
        player: PlayerId,
        hand_index: usize,
        face: Face,
        row: usize,
        col: usize,
    ) -> Result<(), ActionError> {
        if self.stage != MatchStage::Playing {
            return self.fail(player, ActionError::OutOfPhase);
        }
        if let Err(err) = self.turn.check_turn(player) {
            return self.fail(player, err);
        }
        if let Err(err) = self.turn.check_phase(TurnPhase::Placing) {
            return self.fail(player, err);
        }
        if hand_index >= self.players[player.index()].hand().len() {
            return self.fail(player, ActionError::IndexOutOfRange { index: hand_index });
        }
        let dim = self.players[player.index()].grid().dim();
        if row >= dim || col >= dim {
            return self.fail(player, ActionError::IllegalPlacement { row, col });
        }

        // Validate against a clone; the hand shrinks only on success.
        let card = self.players[player.index()].hand()[hand_index].clone();
        let seat = &mut self.players[player.index()];
        let (row, col) = match seat.grid_mut().place(card, face, row, col) {
            Ok(position) => position,
            Err(err) => return self.fail(player, err),
        };
        let _ = seat.take_from_hand(hand_index);

        let points = placement_points(seat.grid(), row, col);
        if points > 0 {
            seat.add_points(points);
        }
        let score = seat.score();
        debug!(%player, row, col, points, "card placed");

        self.turn.record_placement();
        self.emit_hand(player);
        self.emit_area(player);
        if points > 0 {
            self.sink.on_event(&Event::PointsUpdated { player, score });
        }
        Ok(())
    }

    /// Draw the top card of a deck into the turn holder's hand, ending the
    /// turn.
    pub fn draw_from_deck(&mut self, player: PlayerId, kind: DeckKind) -> Result<(), ActionError> {
        if let Err(err) = self.check_draw(player) {
            return self.fail(player, err);
        }
        let card = match self.table.draw_from_deck(kind) {
            Ok(card) => card,
            Err(err) => return self.fail(player, err),
        };
        self.players[player.index()].add_to_hand(card);
        self.emit_hand(player);
        self.emit_table();
        self.advance_turn();
        Ok(())
    }

    /// Take a face-up market card into the turn holder's hand, ending the
    /// turn. The slot is replenished from its deck when possible.
    pub fn draw_from_market(
        &mut self,
        player: PlayerId,
        kind: DeckKind,
        slot: usize,
    ) -> Result<(), ActionError> {
        if let Err(err) = self.check_draw(player) {
            return self.fail(player, err);
        }
        if slot >= 2 {
            return self.fail(player, ActionError::IndexOutOfRange { index: slot });
        }
        let card = match self.table.draw_from_market(kind, slot) {
            Ok(card) => card,
            Err(err) => return self.fail(player, err),
        };
        self.players[player.index()].add_to_hand(card);
        self.emit_hand(player);
        self.emit_table();
        self.advance_turn();
        Ok(())
    }

    /// End the turn without drawing. Legal only when every draw source is
    /// empty.
    pub fn pass(&mut self, player: PlayerId) -> Result<(), ActionError> {
        if let Err(err) = self.check_draw(player) {
            return self.fail(player, err);
        }
        if !self.table.draw_sources_empty() {
            return self.fail(player, ActionError::OutOfPhase);
        }
        self.advance_turn();
        Ok(())
    }

    fn check_draw(&self, player: PlayerId) -> Result<(), ActionError> {
        if self.stage != MatchStage::Playing {
            return Err(ActionError::OutOfPhase);
        }
        self.turn.check_turn(player)?;
        self.turn.check_phase(TurnPhase::Drawing)
    }

    /// Reject a command: notify and propagate, mutating nothing else.
    fn fail(&mut self, player: PlayerId, err: ActionError) -> Result<(), ActionError> {
        debug!(%player, %err, "command rejected");
        self.sink.on_event(&Event::ActionFailed { player });
        Err(err)
    }

    /// Every starter has landed: deal hands, reveal commons, offer secrets.
    fn begin_objective_choice(&mut self) {
        for index in 0..self.players.len() {
            for _ in 0..self.config.opening_resource_cards {
                let card = self
                    .table
                    .draw_from_deck(DeckKind::Resource)
                    .expect("resource deck exhausted during setup");
                self.players[index].add_to_hand(card);
            }
            for _ in 0..self.config.opening_gold_cards {
                let card = self
                    .table
                    .draw_from_deck(DeckKind::Gold)
                    .expect("gold deck exhausted during setup");
                self.players[index].add_to_hand(card);
            }
            self.emit_hand(self.players[index].id());
        }

        self.table.reveal_common_objectives(self.config.common_objectives);
        self.emit_table();

        for index in 0..self.players.len() {
            let options: Vec<ObjectiveCard> = (0..self.config.secret_objective_choices)
                .map(|_| {
                    self.table
                        .draw_objective()
                        .expect("objective deck exhausted during setup")
                })
                .collect();
            let player = self.players[index].id();
            self.players[index].offer_objectives(options.clone());
            self.sink
                .on_event(&Event::ObjectivesOffered { player, options });
        }

        self.stage = MatchStage::ObjectiveChoice;
        info!("starters placed, objectives offered");
    }

    /// Every secret objective is bound: start the first turn.
    fn begin_playing(&mut self) {
        self.stage = MatchStage::Playing;
        let first = self.turn.current();
        self.players[first.index()].set_turn(true);
        self.sink.on_event(&Event::TurnStarted { player: first });
        info!(%first, "match playing");
    }

    /// Close the active seat's turn and hand it to the next seat, or finish
    /// the match once the ending rounds run out.
    fn advance_turn(&mut self) {
        let trigger = self
            .players
            .iter()
            .any(|p| p.score() >= self.config.score_threshold)
            || self.table.draw_sources_empty();

        let current = self.turn.current();
        self.players[current.index()].set_turn(false);

        if self.turn.complete_turn(trigger) {
            self.finish_match();
        } else {
            let next = self.turn.current();
            self.players[next.index()].set_turn(true);
            self.sink.on_event(&Event::TurnStarted { player: next });
        }
    }

    /// Score objectives, decide the winners, and close the match.
    ///
    /// Each seat is scored against the common objectives plus its secret
    /// one. Consumption marks are cleared before each objective so patterns
    /// never share cards within one objective but may across objectives.
    fn finish_match(&mut self) {
        let commons: Vec<ObjectiveCard> = self.table.common_objectives().to_vec();
        for index in 0..self.players.len() {
            let mut objectives = commons.clone();
            if let Some(secret) = self.players[index].secret_objective().cloned() {
                objectives.push(secret);
            }

            for objective in &objectives {
                let seat = &mut self.players[index];
                seat.grid_mut().clear_consumed();
                let points = objective_points(objective, seat.grid_mut());
                if points > 0 {
                    seat.add_points(points);
                    seat.record_scoring_objective();
                    let player = seat.id();
                    let score = seat.score();
                    self.sink.on_event(&Event::PointsUpdated { player, score });
                }
            }
        }

        let best_score = self
            .players
            .iter()
            .map(Player::score)
            .max()
            .expect("at least two seats");
        let best_objectives = self
            .players
            .iter()
            .filter(|p| p.score() == best_score)
            .map(Player::scoring_objectives)
            .max()
            .expect("at least one seat at the best score");
        let winners: Vec<PlayerId> = self
            .players
            .iter()
            .filter(|p| p.score() == best_score && p.scoring_objectives() == best_objectives)
            .map(Player::id)
            .collect();

        let outcome = if winners.len() == 1 {
            MatchOutcome::Winner(winners[0])
        } else {
            MatchOutcome::Winners(winners)
        };

        for player in &self.players {
            let event = if outcome.is_winner(player.id()) {
                Event::MatchWon {
                    player: player.id(),
                    score: player.score(),
                }
            } else {
                Event::MatchLost {
                    player: player.id(),
                    score: player.score(),
                }
            };
            self.sink.on_event(&event);
        }

        info!(?outcome, best_score, "match finished");
        self.outcome = Some(outcome);
        self.stage = MatchStage::Finished;
    }

    fn emit_hand(&mut self, player: PlayerId) {
        let hand = self.players[player.index()].hand().to_vec();
        self.sink.on_event(&Event::HandUpdated { player, hand });
    }

    fn emit_area(&mut self, player: PlayerId) {
        let seat = &self.players[player.index()];
        let event = Event::AreaUpdated {
            player,
            grid: seat.grid().clone(),
            score: seat.score(),
        };
        self.sink.on_event(&event);
    }

    fn emit_table(&mut self) {
        let event = Event::TableUpdated {
            resource_market: self.table.market(DeckKind::Resource).clone(),
            gold_market: self.table.market(DeckKind::Gold).clone(),
            resource_deck: self.table.deck_len(DeckKind::Resource),
            gold_deck: self.table.deck_len(DeckKind::Gold),
        };
        self.sink.on_event(&event);
    }
}
