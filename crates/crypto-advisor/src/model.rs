//! Domain Models
//!
//! Core data types for the advisor: static coin metrics, live price quotes
//! and the derived trend label.
//! Uses `rust_decimal` for all monetary values - never use f64 for money!

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};

/// Highest value any metric score may take
pub const MAX_SCORE: u8 = 10;

/// Market capitalization bucket
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketCapTier {
    Low,
    Medium,
    High,
}

impl MarketCapTier {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Energy consumption bucket
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyTier {
    VeryLow,
    Low,
    Medium,
    High,
}

impl EnergyTier {
    pub fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "very low",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// `low` and `very low` both count as low-energy
    pub fn is_low(self) -> bool {
        matches!(self, Self::VeryLow | Self::Low)
    }
}

/// Static, hand-curated attributes of one coin
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinMetrics {
    /// Provider identifier (e.g., "bitcoin", "avalanche-2")
    pub id: String,

    /// Display name (e.g., "Bitcoin", "Avalanche")
    pub name: String,

    pub market_cap: MarketCapTier,

    pub energy_use: EnergyTier,

    /// 0-10
    pub sustainability_score: u8,

    /// 0-10
    pub long_term_viability: u8,

    /// 0-10
    pub tech_score: u8,
}

impl CoinMetrics {
    /// Build a record, rejecting blank identifiers and out-of-range scores
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        market_cap: MarketCapTier,
        energy_use: EnergyTier,
        sustainability_score: u8,
        long_term_viability: u8,
        tech_score: u8,
    ) -> Result<Self> {
        let id = id.into().trim().to_lowercase();
        if id.is_empty() {
            return Err(AdvisorError::InvalidMetrics("coin id must not be empty".into()));
        }

        for (field, score) in [
            ("sustainability_score", sustainability_score),
            ("long_term_viability", long_term_viability),
            ("tech_score", tech_score),
        ] {
            if score > MAX_SCORE {
                return Err(AdvisorError::InvalidMetrics(format!(
                    "{id}: {field} {score} exceeds {MAX_SCORE}"
                )));
            }
        }

        Ok(Self {
            id,
            name: name.into(),
            market_cap,
            energy_use,
            sustainability_score,
            long_term_viability,
            tech_score,
        })
    }

    /// Unweighted average of the three scores
    pub fn composite_score(&self) -> f64 {
        f64::from(
            u16::from(self.sustainability_score)
                + u16::from(self.long_term_viability)
                + u16::from(self.tech_score),
        ) / 3.0
    }
}

/// Live market data for a single coin
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Current price in USD, if the provider had one
    pub usd_price: Option<Decimal>,

    /// 24-hour price change percentage, if the provider had one
    pub change_24h_pct: Option<Decimal>,
}

impl PriceQuote {
    pub fn new(usd_price: Decimal, change_24h_pct: Decimal) -> Self {
        Self {
            usd_price: Some(usd_price),
            change_24h_pct: Some(change_24h_pct),
        }
    }

    /// Change used for trend purposes; absent counts as flat
    pub fn change_or_zero(&self) -> Decimal {
        self.change_24h_pct.unwrap_or(Decimal::ZERO)
    }

    pub fn trend(&self) -> TrendLabel {
        TrendLabel::from_change(self.change_or_zero())
    }
}

/// Quotes from one fetch, keyed by coin id
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub quotes: HashMap<String, PriceQuote>,

    /// When the provider answered
    pub fetched_at: DateTime<Utc>,
}

impl PriceSnapshot {
    pub fn new(quotes: HashMap<String, PriceQuote>) -> Self {
        Self {
            quotes,
            fetched_at: Utc::now(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&PriceQuote> {
        self.quotes.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

/// Direction and magnitude of the last 24h of price movement
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendLabel {
    RisingStrongly,
    Rising,
    Stable,
    Falling,
    FallingSharply,
}

impl TrendLabel {
    pub fn from_change(change_24h_pct: Decimal) -> Self {
        crate::strategy::classify_trend(change_24h_pct)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::RisingStrongly => "rising strongly",
            Self::Rising => "rising",
            Self::Stable => "stable",
            Self::Falling => "falling",
            Self::FallingSharply => "falling sharply",
        }
    }

    pub fn is_rising(self) -> bool {
        matches!(self, Self::RisingStrongly | Self::Rising)
    }

    pub fn is_falling(self) -> bool {
        matches!(self, Self::Falling | Self::FallingSharply)
    }
}

impl fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_metrics_validation() {
        let ok = CoinMetrics::new("Bitcoin", "Bitcoin", MarketCapTier::High, EnergyTier::High, 3, 8, 9);
        assert_eq!(ok.unwrap().id, "bitcoin");

        let too_high = CoinMetrics::new("x", "X", MarketCapTier::Low, EnergyTier::Low, 11, 0, 0);
        assert!(matches!(too_high, Err(AdvisorError::InvalidMetrics(_))));

        let blank = CoinMetrics::new("  ", "X", MarketCapTier::Low, EnergyTier::Low, 1, 1, 1);
        assert!(blank.is_err());
    }

    #[test]
    fn test_composite_score_is_unrounded() {
        let coin = CoinMetrics::new("c", "C", MarketCapTier::High, EnergyTier::Low, 8, 7, 8).unwrap();
        assert!((coin.composite_score() - 23.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_quote_without_change_is_stable() {
        let quote = PriceQuote {
            usd_price: Some(dec!(1.5)),
            change_24h_pct: None,
        };
        assert_eq!(quote.change_or_zero(), Decimal::ZERO);
        assert_eq!(quote.trend(), TrendLabel::Stable);
    }

    #[test]
    fn test_energy_tiers() {
        assert!(EnergyTier::VeryLow.is_low());
        assert!(EnergyTier::Low.is_low());
        assert!(!EnergyTier::Medium.is_low());
        assert_eq!(EnergyTier::VeryLow.label(), "very low");
    }
}
