//! Core data model for Pennant.
//!
//! Series tiers and leagues, game locators and records — the vocabulary
//! shared by the discovery pipeline and the scoring engine.

mod game;
mod series;

pub use game::{GameLocator, GameRecord};
pub use series::{League, Series};
