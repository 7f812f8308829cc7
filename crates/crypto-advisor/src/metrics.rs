//! Metrics Table
//!
//! Immutable, ordered collection of [`CoinMetrics`]. Table order is the
//! tie-break order for every ranking.

use std::collections::HashSet;

use crate::error::{AdvisorError, Result};
use crate::model::{CoinMetrics, EnergyTier, MarketCapTier};

// (id, name, market cap, energy, sustainability, long-term, tech)
type SeedRow = (&'static str, &'static str, MarketCapTier, EnergyTier, u8, u8, u8);

/// Read-only lookup table of static coin metrics
#[derive(Clone, Debug)]
pub struct MetricsTable {
    coins: Vec<CoinMetrics>,
}

impl MetricsTable {
    /// Build a table; ids must be unique and the table non-empty
    pub fn new(coins: Vec<CoinMetrics>) -> Result<Self> {
        if coins.is_empty() {
            return Err(AdvisorError::EmptyTable);
        }

        let mut seen = HashSet::new();
        for coin in &coins {
            if !seen.insert(coin.id.as_str()) {
                return Err(AdvisorError::DuplicateCoin(coin.id.clone()));
            }
        }

        Ok(Self { coins })
    }

    /// The curated default set of coins
    ///
    /// # Panics
    ///
    /// If a seed row has an out-of-range score or a repeated id.
    pub fn seed() -> Self {
        use EnergyTier as E;
        use MarketCapTier as M;

        let rows = [
            ("bitcoin", "Bitcoin", M::High, E::High, 3, 8, 9),
            ("ethereum", "Ethereum", M::High, E::Medium, 6, 9, 9),
            ("cardano", "Cardano", M::High, E::Low, 8, 7, 8),
            ("solana", "Solana", M::High, E::Low, 7, 7, 8),
            ("polkadot", "Polkadot", M::Medium, E::Low, 8, 8, 9),
            ("ripple", "Ripple", M::High, E::VeryLow, 8, 6, 7),
            ("dogecoin", "Dogecoin", M::Medium, E::Medium, 4, 3, 5),
            ("avalanche-2", "Avalanche", M::High, E::Low, 8, 8, 8),
        ];

        Self::from_rows(rows).expect("seed metrics are valid")
    }

    fn from_rows<const N: usize>(rows: [SeedRow; N]) -> Result<Self> {
        let coins = rows
            .into_iter()
            .map(|(id, name, cap, energy, s, l, t)| CoinMetrics::new(id, name, cap, energy, s, l, t))
            .collect::<Result<Vec<_>>>()?;

        Self::new(coins)
    }

    /// Look up a coin by id
    pub fn get(&self, id: &str) -> Result<&CoinMetrics> {
        self.coins
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| AdvisorError::UnknownCoin(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.coins.iter().any(|c| c.id == id)
    }

    /// All ids, in table order
    pub fn ids(&self) -> Vec<&str> {
        self.coins.iter().map(|c| c.id.as_str()).collect()
    }

    /// All entries, in table order
    pub fn iter(&self) -> impl Iterator<Item = &CoinMetrics> {
        self.coins.iter()
    }

    pub fn len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }
}

impl Default for MetricsTable {
    fn default() -> Self {
        Self::seed()
    }
}
