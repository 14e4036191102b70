//! Core data models for the toss tracker.

mod game;
mod ids;
mod record;
mod stats;
mod toss;

pub use game::*;
pub use ids::*;
pub use record::*;
pub use stats::*;
pub use toss::*;
