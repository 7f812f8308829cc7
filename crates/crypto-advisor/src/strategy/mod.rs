//! Scoring Strategies
//!
//! Pure functions over the metrics table and over live price movement.

mod ranking;
mod trend;

pub use ranking::{LongTermPick, Ranking};
pub use trend::classify_trend;
