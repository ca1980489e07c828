//! HTTP quote client against a Yahoo-style chart endpoint.

use super::{QuoteError, QuoteSource};
use crate::domain::{Decimal, Symbol};
use async_trait::async_trait;
use backoff::future::retry;
use backoff::ExponentialBackoff;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Quote source backed by the public chart API.
///
/// Every request carries a bounded timeout; transient failures (network
/// errors, 429, 5xx) are retried with exponential backoff inside that budget.
#[derive(Debug, Clone)]
pub struct HttpQuoteSource {
    client: Client,
    base_url: String,
}

impl HttpQuoteSource {
    /// Create a quote source with the given base URL and per-request timeout.
    ///
    /// # Panics
    /// Panics if the HTTP client cannot be constructed; the timeout bound is
    /// part of the lookup contract, so running without one is not an option.
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("HTTP client construction failed");
        Self { client, base_url }
    }

    async fn fetch_chart(&self, symbol: &Symbol) -> Result<serde_json::Value, QuoteError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        let backoff = ExponentialBackoff {
            max_elapsed_time: Some(Duration::from_secs(15)),
            ..Default::default()
        };

        retry(backoff, || async {
            let response = self
                .client
                .get(&url)
                .send()
                .await
                .map_err(|e| backoff::Error::transient(QuoteError::Network(e.to_string())))?;

            let status = response.status();
            if status == 429 {
                return Err(backoff::Error::transient(QuoteError::RateLimited));
            }
            if status.is_server_error() {
                return Err(backoff::Error::transient(QuoteError::Http {
                    status: status.as_u16(),
                    message: "server error".to_string(),
                }));
            }
            if status == 404 {
                return Err(backoff::Error::permanent(QuoteError::NotFound(
                    symbol.to_string(),
                )));
            }
            if !status.is_success() {
                return Err(backoff::Error::permanent(QuoteError::Http {
                    status: status.as_u16(),
                    message: "client error".to_string(),
                }));
            }

            response
                .json::<serde_json::Value>()
                .await
                .map_err(|e| backoff::Error::permanent(QuoteError::Parse(e.to_string())))
        })
        .await
    }
}

#[async_trait]
impl QuoteSource for HttpQuoteSource {
    async fn latest_price(&self, symbol: &Symbol) -> Result<Decimal, QuoteError> {
        debug!(symbol = %symbol, "fetching latest price");

        let chart = self.fetch_chart(symbol).await?;
        match parse_latest_price(&chart, symbol) {
            Ok(price) => Ok(price),
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "quote response unusable");
                Err(e)
            }
        }
    }
}

/// Extract `chart.result[0].meta.regularMarketPrice` from a chart response.
///
/// A well-formed response without a positive price means the symbol is not
/// currently priced and is reported as NotFound.
fn parse_latest_price(chart: &serde_json::Value, symbol: &Symbol) -> Result<Decimal, QuoteError> {
    let chart_obj = chart
        .get("chart")
        .ok_or_else(|| QuoteError::Parse("missing chart field".to_string()))?;

    if !chart_obj
        .get("error")
        .map(serde_json::Value::is_null)
        .unwrap_or(true)
    {
        return Err(QuoteError::NotFound(symbol.to_string()));
    }

    let price = chart_obj
        .get("result")
        .and_then(|r| r.get(0))
        .and_then(|r| r.get("meta"))
        .and_then(|m| m.get("regularMarketPrice"))
        .and_then(|p| p.as_f64())
        .and_then(|p| Decimal::parse(&p.to_string()).ok())
        .ok_or_else(|| QuoteError::NotFound(symbol.to_string()))?;

    if !price.is_positive() {
        return Err(QuoteError::NotFound(symbol.to_string()));
    }

    Ok(price)
}
