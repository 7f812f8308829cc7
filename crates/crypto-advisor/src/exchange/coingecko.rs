//! CoinGecko Price Provider
//!
//! Batched `/simple/price` lookups. Every failure (transport, timeout,
//! non-2xx status, unparsable body) surfaces as `ProviderUnavailable`.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::PriceProvider;
use crate::config::AdvisorConfig;
use crate::error::{AdvisorError, Result};
use crate::model::{PriceQuote, PriceSnapshot};

const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// Raw `{ "usd": 97500.0, "usd_24h_change": 2.5 }` entry
#[derive(Debug, Deserialize)]
struct SimplePrice {
    #[serde(default)]
    usd: Option<Decimal>,
    #[serde(default)]
    usd_24h_change: Option<Decimal>,
}

/// CoinGecko API client
pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoinGeckoClient {
    /// Client with the configured base URL, key and request timeout
    pub fn new(config: &AdvisorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("crypto-advisor/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    async fn request(&self, ids: &[&str]) -> Result<HashMap<String, SimplePrice>> {
        let url = format!("{}/simple/price", self.base_url);
        let ids = ids.join(",");

        let mut request = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .query(&[
                ("ids", ids.as_str()),
                ("vs_currencies", "usd"),
                ("include_24hr_change", "true"),
            ]);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await?.error_for_status()?;
        let body = response.bytes().await?;

        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl PriceProvider for CoinGeckoClient {
    async fn fetch_prices(&self, ids: &[&str]) -> Result<PriceSnapshot> {
        if ids.is_empty() {
            return Ok(PriceSnapshot::new(HashMap::new()));
        }

        let raw = self.request(ids).await.map_err(|e| {
            let reason = match &e {
                AdvisorError::Network(err) if err.is_timeout() => "request timed out".to_string(),
                AdvisorError::Network(err) => match err.status() {
                    Some(status) => format!("coingecko returned {status}"),
                    None => format!("coingecko request failed: {err}"),
                },
                AdvisorError::Serialization(err) => format!("coingecko: parse JSON failed: {err}"),
                other => other.to_string(),
            };
            tracing::warn!(%reason, "price fetch failed");
            AdvisorError::ProviderUnavailable(reason)
        })?;

        let quotes: HashMap<String, PriceQuote> = raw
            .into_iter()
            .map(|(id, price)| {
                let usd_price = price.usd.filter(|p| {
                    let valid = !p.is_sign_negative();
                    if !valid {
                        tracing::warn!(%id, price = %p, "dropping negative price");
                    }
                    valid
                });
                let quote = PriceQuote {
                    usd_price,
                    change_24h_pct: price.usd_24h_change,
                };
                (id, quote)
            })
            .collect();

        tracing::debug!(requested = ids.len(), received = quotes.len(), "fetched prices");
        Ok(PriceSnapshot::new(quotes))
    }

    fn name(&self) -> &str {
        "CoinGecko"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server, ServerGuard};
    use rust_decimal_macros::dec;
    use serde_json::json;

    async fn server_and_client(api_key: Option<&str>) -> (ServerGuard, CoinGeckoClient) {
        let server = Server::new_async().await;
        let config = AdvisorConfig {
            api_url: server.url(),
            api_key: api_key.map(str::to_string),
            timeout_secs: 5,
            ..Default::default()
        };
        let client = CoinGeckoClient::new(&config).unwrap();
        (server, client)
    }

    fn batched_query(ids: &str) -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("ids".into(), ids.into()),
            Matcher::UrlEncoded("vs_currencies".into(), "usd".into()),
            Matcher::UrlEncoded("include_24hr_change".into(), "true".into()),
        ])
    }

    #[tokio::test]
    async fn test_successful_batched_fetch() {
        let (mut server, client) = server_and_client(None).await;

        let mock = server
            .mock("GET", "/simple/price")
            .match_query(batched_query("bitcoin,ethereum"))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "bitcoin": { "usd": 97500.5, "usd_24h_change": 2.5 },
                    "ethereum": { "usd": 3450, "usd_24h_change": -6.25 }
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let snapshot = client.fetch_prices(&["bitcoin", "ethereum"]).await.unwrap();

        let btc = snapshot.get("bitcoin").unwrap();
        assert_eq!(btc.usd_price, Some(dec!(97500.5)));
        assert_eq!(btc.change_24h_pct, Some(dec!(2.5)));
        let eth = snapshot.get("ethereum").unwrap();
        assert_eq!(eth.change_24h_pct, Some(dec!(-6.25)));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_fields_are_absent() {
        let (mut server, client) = server_and_client(None).await;

        let _mock = server
            .mock("GET", "/simple/price")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!({ "cardano": { "usd": 0.95 }, "ripple": {} }).to_string())
            .create_async()
            .await;

        let snapshot = client.fetch_prices(&["cardano", "ripple", "solana"]).await.unwrap();

        assert_eq!(snapshot.get("cardano").unwrap().change_24h_pct, None);
        assert_eq!(snapshot.get("ripple").unwrap().usd_price, None);
        assert!(snapshot.get("solana").is_none());
    }

    #[tokio::test]
    async fn test_api_key_header() {
        let (mut server, client) = server_and_client(Some("CG-test")).await;

        let mock = server
            .mock("GET", "/simple/price")
            .match_query(Matcher::Any)
            .match_header(API_KEY_HEADER, "CG-test")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let snapshot = client.fetch_prices(&["bitcoin"]).await.unwrap();
        assert!(snapshot.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_is_unavailable() {
        let (mut server, client) = server_and_client(None).await;

        let _mock = server
            .mock("GET", "/simple/price")
            .match_query(Matcher::Any)
            .with_status(429)
            .with_body(json!({ "status": { "error_code": 429 } }).to_string())
            .create_async()
            .await;

        let result = client.fetch_prices(&["bitcoin"]).await;
        assert!(matches!(result, Err(AdvisorError::ProviderUnavailable(reason)) if reason.contains("429")));
    }

    #[tokio::test]
    async fn test_malformed_body_is_unavailable() {
        let (mut server, client) = server_and_client(None).await;

        let _mock = server
            .mock("GET", "/simple/price")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let result = client.fetch_prices(&["bitcoin"]).await;
        assert!(matches!(result, Err(AdvisorError::ProviderUnavailable(_))));
    }

    #[tokio::test]
    async fn test_connection_refused_is_unavailable() {
        let config = AdvisorConfig {
            api_url: "http://127.0.0.1:9".into(),
            timeout_secs: 2,
            ..Default::default()
        };
        let client = CoinGeckoClient::new(&config).unwrap();

        let result = client.fetch_prices(&["bitcoin"]).await;
        assert!(matches!(result, Err(AdvisorError::ProviderUnavailable(_))));
    }
}
