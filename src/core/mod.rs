//! Core identifiers, configuration, RNG, and the error taxonomy.

mod config;
mod error;
mod player;
mod rng;

pub use config::MatchConfig;
pub use error::ActionError;
pub use player::PlayerId;
pub use rng::GameRng;
