//! Crypto Advisor
//!
//! The query entry point: fetch live prices, classify the question, dispatch
//! to a ranking or lookup, and format the answer.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::{AdvisorConfig, DEFAULT_NAME, DEFAULT_TIMEOUT_SECS};
use crate::error::{AdvisorError, Result};
use crate::exchange::PriceProvider;
use crate::format;
use crate::intent::{Intent, IntentClassifier};
use crate::metrics::MetricsTable;
use crate::model::{PriceSnapshot, TrendLabel};
use crate::strategy::Ranking;

/// One row of the startup market table
#[derive(Clone, Debug, Serialize)]
pub struct SnapshotRow {
    pub id: String,
    pub name: String,
    pub price_usd: Option<Decimal>,
    pub change_24h_pct: Decimal,
    pub trend: TrendLabel,
}

/// Market overview shown when a session starts
#[derive(Clone, Debug, Serialize)]
pub struct MarketSnapshot {
    pub rows: Vec<SnapshotRow>,

    /// Display name of the most sustainable coin
    pub top_sustainable: String,

    pub fetched_at: DateTime<Utc>,
}

/// Keyword-driven crypto advisor
pub struct CryptoAdvisor {
    name: String,
    table: MetricsTable,
    classifier: IntentClassifier,
    provider: Arc<dyn PriceProvider>,
    fetch_timeout: Duration,
}

impl CryptoAdvisor {
    pub fn new(table: MetricsTable, provider: Arc<dyn PriceProvider>) -> Result<Self> {
        let classifier = IntentClassifier::new(&table)?;
        Ok(Self {
            name: DEFAULT_NAME.into(),
            table,
            classifier,
            provider,
            fetch_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Advisor named and time-bounded per `config`
    pub fn with_config(
        table: MetricsTable,
        provider: Arc<dyn PriceProvider>,
        config: &AdvisorConfig,
    ) -> Result<Self> {
        config.validate()?;
        let mut advisor = Self::new(table, provider)?;
        advisor.name.clone_from(&config.name);
        advisor.fetch_timeout = config.timeout();
        Ok(advisor)
    }

    /// Bound on a single price fetch; a slower provider counts as unavailable
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &MetricsTable {
        &self.table
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn ranking(&self) -> Ranking<'_> {
        Ranking::new(&self.table)
    }

    pub fn classify(&self, text: &str) -> Intent {
        self.classifier.classify(text)
    }

    /// One batched fetch for every coin in the table
    pub async fn live_prices(&self) -> Result<PriceSnapshot> {
        let ids = self.table.ids();

        let snapshot = tokio::time::timeout(self.fetch_timeout, self.provider.fetch_prices(&ids))
            .await
            .map_err(|_| {
                AdvisorError::ProviderUnavailable(format!(
                    "{} did not answer within {:?}",
                    self.provider.name(),
                    self.fetch_timeout
                ))
            })??;

        if snapshot.is_empty() {
            return Err(AdvisorError::ProviderUnavailable(format!(
                "{} returned no quotes",
                self.provider.name()
            )));
        }

        Ok(snapshot)
    }

    /// Answer one free-text question. Always returns a non-empty message;
    /// when prices are unavailable every question gets the degraded reply.
    pub async fn process_query(&self, input: &str) -> String {
        let prices = match self.live_prices().await {
            Ok(prices) => prices,
            Err(e) => {
                tracing::warn!(error = %e, "answering in degraded mode");
                return e.user_message();
            }
        };

        let intent = self.classify(input);
        self.answer(&intent, &prices)
    }

    /// Render the answer for an already classified intent
    pub fn answer(&self, intent: &Intent, prices: &PriceSnapshot) -> String {
        let ranking = self.ranking();

        match intent {
            Intent::CoinDetail(id) => self
                .coin_details(id, prices)
                .unwrap_or_else(|e| e.user_message()),
            Intent::Sustainability => format::most_sustainable(ranking.most_sustainable()),
            Intent::Technology => format::best_tech(ranking.best_tech()),
            Intent::LowEnergy => format::low_energy(&ranking.low_energy_coins()),
            Intent::Profitability => {
                format::profitability(&format::profitable_coins(&self.table, prices))
            }
            Intent::TrendOverview => format::trend_overview(&self.table, prices),
            Intent::LongTerm => format::best_long_term(&ranking.best_long_term()),
            Intent::Help => format::HELP_MESSAGE.into(),
            Intent::Unrecognized => format::UNRECOGNIZED_MESSAGE.into(),
        }
    }

    /// Detail card for one coin; unknown ids fail with `UnknownCoin`
    pub fn coin_details(&self, id: &str, prices: &PriceSnapshot) -> Result<String> {
        let coin = self.table.get(id)?;
        Ok(format::coin_details(coin, prices))
    }

    /// Prices for every quoted coin plus the top sustainable pick
    pub async fn market_snapshot(&self) -> Result<MarketSnapshot> {
        let prices = self.live_prices().await?;

        let rows = self
            .table
            .iter()
            .filter_map(|coin| {
                prices.get(&coin.id).map(|quote| SnapshotRow {
                    id: coin.id.clone(),
                    name: coin.name.clone(),
                    price_usd: quote.usd_price,
                    change_24h_pct: quote.change_or_zero(),
                    trend: quote.trend(),
                })
            })
            .collect();

        Ok(MarketSnapshot {
            rows,
            top_sustainable: self.ranking().most_sustainable().name.clone(),
            fetched_at: prices.fetched_at,
        })
    }
}
