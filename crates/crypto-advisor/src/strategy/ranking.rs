//! Ranking Functions
//!
//! Picks over the metrics table. Every "best" pick breaks ties by table
//! order: the first coin reaching the maximum wins. `Iterator::max_by_key`
//! keeps the *last* maximum, so it is not used here.

use serde::Serialize;

use crate::metrics::MetricsTable;
use crate::model::CoinMetrics;

/// Winner of the long-term ranking together with its composite score
#[derive(Clone, Debug, Serialize)]
pub struct LongTermPick<'a> {
    pub coin: &'a CoinMetrics,

    /// (sustainability + long-term viability + tech) / 3, unrounded
    pub score: f64,
}

/// Ranking strategy over a metrics table
pub struct Ranking<'a> {
    table: &'a MetricsTable,
}

impl<'a> Ranking<'a> {
    pub fn new(table: &'a MetricsTable) -> Self {
        Self { table }
    }

    /// Highest sustainability score
    pub fn most_sustainable(&self) -> &'a CoinMetrics {
        self.first_max_by(|c| f64::from(c.sustainability_score)).0
    }

    /// Highest tech score
    pub fn best_tech(&self) -> &'a CoinMetrics {
        self.first_max_by(|c| f64::from(c.tech_score)).0
    }

    /// Every coin with `low` or `very low` energy use, in table order
    pub fn low_energy_coins(&self) -> Vec<&'a CoinMetrics> {
        self.table.iter().filter(|c| c.energy_use.is_low()).collect()
    }

    /// Highest composite score
    pub fn best_long_term(&self) -> LongTermPick<'a> {
        let (coin, score) = self.first_max_by(CoinMetrics::composite_score);
        LongTermPick { coin, score }
    }

    fn first_max_by<F>(&self, score: F) -> (&'a CoinMetrics, f64)
    where
        F: Fn(&CoinMetrics) -> f64,
    {
        let mut coins = self.table.iter();
        // MetricsTable::new rejects empty tables
        let first = coins.next().unwrap_or_else(|| unreachable!("metrics table is never empty"));

        coins.fold((first, score(first)), |best, coin| {
            let candidate = score(coin);
            if candidate > best.1 { (coin, candidate) } else { best }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EnergyTier, MarketCapTier};

    fn coin(id: &str, s: u8, l: u8, t: u8) -> CoinMetrics {
        CoinMetrics::new(id, id, MarketCapTier::High, EnergyTier::Medium, s, l, t).unwrap()
    }

    #[test]
    fn test_most_sustainable_seed() {
        let table = MetricsTable::seed();
        let ranking = Ranking::new(&table);

        let best = ranking.most_sustainable();
        assert_eq!(best.id, "cardano");
        assert_eq!(best.sustainability_score, 8);

        // Same answer every call
        for _ in 0..5 {
            assert_eq!(ranking.most_sustainable().id, "cardano");
        }
    }

    #[test]
    fn test_best_tech_seed() {
        let table = MetricsTable::seed();
        let best = Ranking::new(&table).best_tech();
        assert_eq!(best.id, "bitcoin");
        assert_eq!(best.tech_score, 9);
    }

    #[test]
    fn test_low_energy_seed() {
        let table = MetricsTable::seed();
        let ids: Vec<_> = Ranking::new(&table)
            .low_energy_coins()
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, ["cardano", "solana", "polkadot", "ripple", "avalanche-2"]);
    }

    #[test]
    fn test_best_long_term_seed() {
        let table = MetricsTable::seed();
        let pick = Ranking::new(&table).best_long_term();

        assert!(table.contains(&pick.coin.id));
        assert_eq!(pick.coin.id, "polkadot");
        let expected = f64::from(8 + 8 + 9) / 3.0;
        assert!((pick.score - expected).abs() < 1e-12);
        assert!(pick.score.fract() != 0.0);
    }

    #[test]
    fn test_ties_go_to_first_in_table() {
        let table = MetricsTable::new(vec![
            coin("first", 7, 7, 7),
            coin("second", 7, 7, 7),
            coin("third", 6, 9, 6),
        ])
        .unwrap();
        let ranking = Ranking::new(&table);

        assert_eq!(ranking.most_sustainable().id, "first");
        assert_eq!(ranking.best_tech().id, "first");
        assert_eq!(ranking.best_long_term().coin.id, "first");
    }
}
