//! Price Providers
//!
//! Abstraction over live market data plus the CoinGecko and mock
//! implementations.

mod coingecko;
mod mock;

pub use coingecko::CoinGeckoClient;
pub use mock::MockPriceProvider;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::PriceSnapshot;

/// Price provider trait (Strategy pattern)
///
/// Implementations must fetch every requested id in one batched call and
/// report any transport or provider-side failure as
/// [`AdvisorError::ProviderUnavailable`](crate::AdvisorError::ProviderUnavailable).
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Current USD price and 24h change for each id the provider knows
    async fn fetch_prices(&self, ids: &[&str]) -> Result<PriceSnapshot>;

    /// Provider name
    fn name(&self) -> &str;
}
