//! Scoring engine: placement-triggered points and end-of-match objectives.

mod objective;
mod placement;

pub use objective::objective_points;
pub use placement::placement_points;
