//! # crypto-advisor
//!
//! Answers plain-English questions about a small, fixed set of
//! cryptocurrencies by combining a hand-curated metrics table with live
//! prices.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────┐   ┌───────────────┐   ┌──────────────────┐   ┌────────────┐
//! │  query   │──▶│ PriceProvider │──▶│ IntentClassifier │──▶│  Ranking / │
//! │  (text)  │   │ (one batched  │   │ (ordered keyword │   │  lookup    │
//! └──────────┘   │  fetch)       │   │  rules)          │   └─────┬──────┘
//!                └───────┬───────┘   └──────────────────┘         │
//!                        │ unavailable                            ▼
//!                        └──────────▶ degraded reply        formatted answer
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crypto_advisor::{CryptoAdvisor, MetricsTable, exchange::MockPriceProvider};
//!
//! let advisor = CryptoAdvisor::new(MetricsTable::seed(), Arc::new(MockPriceProvider::new()))?;
//! let answer = advisor.process_query("What's the most sustainable coin?").await;
//! assert!(answer.contains("Cardano"));
//! ```
//!
//! Educational only. None of this is investment advice.

pub mod advisor;
pub mod config;
pub mod error;
pub mod exchange;
pub mod format;
pub mod intent;
pub mod metrics;
pub mod model;
pub mod strategy;

pub use advisor::{CryptoAdvisor, MarketSnapshot, SnapshotRow};
pub use config::AdvisorConfig;
pub use error::{AdvisorError, Result};
pub use format::DEGRADED_MESSAGE;
pub use intent::{Intent, IntentClassifier};
pub use metrics::MetricsTable;
pub use model::{CoinMetrics, EnergyTier, MarketCapTier, PriceQuote, PriceSnapshot, TrendLabel};
pub use strategy::{LongTermPick, Ranking, classify_trend};

/// Inputs that end an interactive session (compared case-insensitively)
pub const EXIT_COMMANDS: &[&str] = &["exit", "quit", "bye"];

/// Whether `input` asks to leave the session
pub fn is_exit_command(input: &str) -> bool {
    let input = input.trim();
    EXIT_COMMANDS.iter().any(|cmd| input.eq_ignore_ascii_case(cmd))
}

/// Example questions shown when a session starts
pub const SAMPLE_QUESTIONS: &[&str] = &[
    "Which crypto is trending up?",
    "What's the most sustainable coin?",
    "What do you recommend for long-term growth?",
    "Which coins look profitable?",
    "Tell me about Ethereum",
    "Which coin has the best technology?",
    "Which coins use low energy?",
    "Show me all current prices",
];
