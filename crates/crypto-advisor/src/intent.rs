//! Intent Detection
//!
//! Maps a free-text question to one [`Intent`] by keyword matching.
//!
//! Rules are checked in a fixed order and the first match wins. The
//! categories overlap ("is bitcoin green?" mentions a coin *and* a
//! sustainability keyword), so reordering the checks changes answers.
//!
//! 1. Find the first coin (table order) named as a whole word
//! 2. Coin + "about" / "details" / "info" / "what is"  → [`Intent::CoinDetail`]
//! 3. "sustainable" / "green" / "eco"                  → [`Intent::Sustainability`]
//! 4. "tech" / "technology"                            → [`Intent::Technology`]
//! 5. "low energy" / "energy use"                      → [`Intent::LowEnergy`]
//! 6. "profit" / "profitable"                          → [`Intent::Profitability`]
//! 7. "trend" / "trending" / "price"                   → [`Intent::TrendOverview`]
//! 8. "long term" / "long-term" / "future"             → [`Intent::LongTerm`]
//! 9. "help" / "what"                                  → [`Intent::Help`]
//! 10. Coin from step 1                                → [`Intent::CoinDetail`]
//! 11. Otherwise                                       → [`Intent::Unrecognized`]
//!
//! Only the coin scan is word-bounded; the keyword checks are substring tests.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};
use crate::metrics::MetricsTable;

const DETAIL_KEYWORDS: &[&str] = &["about", "details", "info", "what is"];
const SUSTAINABILITY_KEYWORDS: &[&str] = &["sustainable", "green", "eco"];
const TECH_KEYWORDS: &[&str] = &["tech", "technology"];
const LOW_ENERGY_KEYWORDS: &[&str] = &["low energy", "energy use"];
const PROFIT_KEYWORDS: &[&str] = &["profit", "profitable"];
const TREND_KEYWORDS: &[&str] = &["trend", "trending", "price"];
const LONG_TERM_KEYWORDS: &[&str] = &["long term", "long-term", "future"];
const HELP_KEYWORDS: &[&str] = &["help", "what"];

/// Classified purpose of one user query
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "intent", content = "coin")]
pub enum Intent {
    /// Details for one coin (carries the coin id)
    CoinDetail(String),
    Sustainability,
    Technology,
    LowEnergy,
    Profitability,
    TrendOverview,
    LongTerm,
    Help,
    Unrecognized,
}

/// Whole-word matcher for one coin
#[derive(Clone, Debug)]
struct CoinPattern {
    id: String,
    pattern: Regex,
}

/// Keyword-driven intent classifier over a fixed set of coins
#[derive(Clone, Debug)]
pub struct IntentClassifier {
    coins: Vec<CoinPattern>,
}

impl IntentClassifier {
    /// Build matchers for every coin in the table. A coin matches by id or
    /// by its lower-cased display name.
    pub fn new(table: &MetricsTable) -> Result<Self> {
        let coins = table
            .iter()
            .map(|coin| {
                let mut aliases = vec![regex::escape(&coin.id)];
                let name = coin.name.trim().to_lowercase();
                if !name.is_empty() && name != coin.id {
                    aliases.push(regex::escape(&name));
                }

                let pattern = Regex::new(&format!(r"\b(?:{})\b", aliases.join("|")))
                    .map_err(|e| AdvisorError::InvalidMetrics(format!("{}: {e}", coin.id)))?;

                Ok(CoinPattern {
                    id: coin.id.clone(),
                    pattern,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { coins })
    }

    /// First coin (table order) named as a whole word in `text`
    pub fn match_coin(&self, text: &str) -> Option<&str> {
        let text = text.to_lowercase();
        self.coins
            .iter()
            .find(|c| c.pattern.is_match(&text))
            .map(|c| c.id.as_str())
    }

    /// Classify one query
    pub fn classify(&self, text: &str) -> Intent {
        let text = text.to_lowercase();
        let matched_coin = self.match_coin(&text);

        let intent = match matched_coin {
            Some(coin) if contains_any(&text, DETAIL_KEYWORDS) => Intent::CoinDetail(coin.to_string()),
            _ if contains_any(&text, SUSTAINABILITY_KEYWORDS) => Intent::Sustainability,
            _ if contains_any(&text, TECH_KEYWORDS) => Intent::Technology,
            _ if contains_any(&text, LOW_ENERGY_KEYWORDS) => Intent::LowEnergy,
            _ if contains_any(&text, PROFIT_KEYWORDS) => Intent::Profitability,
            _ if contains_any(&text, TREND_KEYWORDS) => Intent::TrendOverview,
            _ if contains_any(&text, LONG_TERM_KEYWORDS) => Intent::LongTerm,
            _ if contains_any(&text, HELP_KEYWORDS) => Intent::Help,
            Some(coin) => Intent::CoinDetail(coin.to_string()),
            None => Intent::Unrecognized,
        };

        tracing::debug!(?intent, coin = ?matched_coin, "classified query");
        intent
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}
