use crate::core::currency::{CurrencyCode, RateProvider, RateTable};
use crate::core::error::{BudgetError, Result};
use crate::providers::util::with_retry;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

const RETRY_DELAY_MS: u64 = 500;

/// Client for exchangerate-api compatible `/v4/latest/{BASE}` endpoints.
///
/// Every call hits the service; tables are never cached between requests.
pub struct ExchangeRateApiProvider {
    base_url: String,
    retries: usize,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, retries: usize) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            retries,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    #[serde(default)]
    rates: HashMap<String, f64>,
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    #[instrument(name = "ExchangeRateFetch", skip(self), fields(base = %base))]
    async fn fetch_rates(&self, base: &CurrencyCode) -> Result<RateTable> {
        let url = format!("{}/v4/latest/{}", self.base_url, base);
        debug!("Requesting exchange rates from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("fxbudget/1.0")
            .build()
            .map_err(|e| BudgetError::RateFetch(format!("Failed to build HTTP client: {e}")))?;

        let response = with_retry(
            || async { client.get(&url).send().await },
            self.retries,
            RETRY_DELAY_MS,
        )
        .await
        .map_err(|e| BudgetError::RateFetch(format!("Request error: {e} for base currency: {base}")))?;

        if !response.status().is_success() {
            return Err(BudgetError::RateFetch(format!(
                "HTTP error: {} for base currency: {}",
                response.status(),
                base
            )));
        }

        let text = response.text().await.map_err(|e| {
            BudgetError::RateFetch(format!("Failed to read response for {base}: {e}"))
        })?;

        let data: LatestRatesResponse = serde_json::from_str(&text).map_err(|e| {
            BudgetError::RateFetch(format!("Failed to parse JSON response for {base}: {e}"))
        })?;

        if data.rates.is_empty() {
            return Err(BudgetError::RateFetch(format!(
                "No rate data found for base currency: {base}"
            )));
        }
        debug!(count = data.rates.len(), "Received exchange rates");

        let rates = data
            .rates
            .into_iter()
            .map(|(code, rate)| (CurrencyCode::new(code), rate))
            .collect();
        Ok(RateTable::new(base.clone(), rates))
    }
}
