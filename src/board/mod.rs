//! Per-player board: grid storage, growth, and the placement engine.

mod grid;
mod placement;

pub use grid::{Grid, PlacedCard};
