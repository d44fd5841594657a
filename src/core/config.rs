//! Match configuration.
//!
//! A `MatchConfig` fixes the tunable rules of a match at creation time:
//! score threshold, opening hand composition, objective counts, and the
//! initial board allocation. Defaults reproduce the standard game.

use serde::{Deserialize, Serialize};

/// Configuration for a single match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Score that triggers end-of-match detection.
    pub score_threshold: u32,

    /// Resource cards dealt to each opening hand.
    pub opening_resource_cards: usize,

    /// Gold cards dealt to each opening hand.
    pub opening_gold_cards: usize,

    /// Secret-objective candidates offered to each player.
    pub secret_objective_choices: usize,

    /// Common objectives revealed to the table.
    pub common_objectives: usize,

    /// Initial board dimension. Must be odd and at least 5.
    pub initial_grid_dim: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            score_threshold: 20,
            opening_resource_cards: 2,
            opening_gold_cards: 1,
            secret_objective_choices: 2,
            common_objectives: 2,
            initial_grid_dim: 5,
        }
    }
}

impl MatchConfig {
    /// Create the standard configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the score threshold that triggers the ending rounds.
    #[must_use]
    pub fn with_score_threshold(mut self, threshold: u32) -> Self {
        self.score_threshold = threshold;
        self
    }

    /// Set the opening hand composition.
    #[must_use]
    pub fn with_opening_hand(mut self, resource: usize, gold: usize) -> Self {
        self.opening_resource_cards = resource;
        self.opening_gold_cards = gold;
        self
    }

    /// Set the initial board dimension (odd, at least 5).
    #[must_use]
    pub fn with_initial_grid_dim(mut self, dim: usize) -> Self {
        self.initial_grid_dim = dim;
        self
    }

    /// Validate the configuration.
    ///
    /// A dimension below 5 would force the first legal placement onto the
    /// outermost ring before any growth could fire.
    pub fn validate(&self) -> Result<(), String> {
        if self.initial_grid_dim % 2 == 0 {
            return Err(format!(
                "initial grid dimension must be odd, got {}",
                self.initial_grid_dim
            ));
        }
        if self.initial_grid_dim < 5 {
            return Err(format!(
                "initial grid dimension must be at least 5, got {}",
                self.initial_grid_dim
            ));
        }
        if self.secret_objective_choices == 0 {
            return Err("must offer at least one secret objective".to_string());
        }
        Ok(())
    }
}
