//! Mock Price Provider
//!
//! For testing, demo and offline use. Returns realistic static quotes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::PriceProvider;
use crate::error::{AdvisorError, Result};
use crate::model::{PriceQuote, PriceSnapshot};

/// Mock provider with static quotes
pub struct MockPriceProvider {
    quotes: HashMap<String, PriceQuote>,
    available: bool,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl Default for MockPriceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPriceProvider {
    /// Static quotes for the seed coins
    pub fn new() -> Self {
        // (id, price, 24h change)
        let quotes = [
            ("bitcoin", dec!(97500), dec!(2.5)),
            ("ethereum", dec!(3450), dec!(1.8)),
            ("cardano", dec!(0.95), dec!(-1.2)),
            ("solana", dec!(195), dec!(4.2)),
            ("polkadot", dec!(7.20), dec!(0.8)),
            ("ripple", dec!(2.35), dec!(0.9)),
            ("dogecoin", dec!(0.38), dec!(12.0)),
            ("avalanche-2", dec!(42.00), dec!(5.5)),
        ]
        .into_iter()
        .map(|(id, price, change)| (id.to_string(), PriceQuote::new(price, change)))
        .collect();

        Self::with_quotes(quotes)
    }

    /// Serve exactly these quotes
    pub fn with_quotes(quotes: HashMap<String, PriceQuote>) -> Self {
        Self {
            quotes,
            available: true,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Convenience for tests: `(id, price, change)` triples
    pub fn from_changes(rows: &[(&str, Decimal, Decimal)]) -> Self {
        Self::with_quotes(
            rows.iter()
                .map(|(id, price, change)| ((*id).to_string(), PriceQuote::new(*price, *change)))
                .collect(),
        )
    }

    /// Every fetch fails as if the network were down
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::with_quotes(HashMap::new())
        }
    }

    /// Sleep before answering (for timeout handling)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of fetches served so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl PriceProvider for MockPriceProvider {
    async fn fetch_prices(&self, ids: &[&str]) -> Result<PriceSnapshot> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if !self.available {
            return Err(AdvisorError::ProviderUnavailable("mock provider offline".into()));
        }

        let quotes = ids
            .iter()
            .filter_map(|id| self.quotes.get(*id).map(|q| ((*id).to_string(), q.clone())))
            .collect();

        Ok(PriceSnapshot::new(quotes))
    }

    fn name(&self) -> &str {
        "MockPrices"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_prices() {
        let provider = MockPriceProvider::new();

        let snapshot = provider.fetch_prices(&["bitcoin", "ethereum"]).await.unwrap();
        assert_eq!(snapshot.quotes.len(), 2);
        let btc = snapshot.get("bitcoin").unwrap();
        assert!(btc.usd_price.unwrap() > Decimal::ZERO);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_skipped() {
        let provider = MockPriceProvider::new();
        let snapshot = provider.fetch_prices(&["bitcoin", "notreal"]).await.unwrap();
        assert!(snapshot.get("notreal").is_none());
        assert_eq!(snapshot.quotes.len(), 1);
    }

    #[tokio::test]
    async fn test_unavailable() {
        let provider = MockPriceProvider::unavailable();
        let result = provider.fetch_prices(&["bitcoin"]).await;
        assert!(matches!(result, Err(AdvisorError::ProviderUnavailable(_))));
    }
}
