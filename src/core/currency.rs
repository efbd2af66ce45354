//! Currency conversion abstractions

use crate::core::error::{BudgetError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

/// Upper-case currency code such as `RUB` or `USD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = CurrencyCode::new(s);
        if code.0.is_empty() {
            return Err(BudgetError::validation("currency", "currency code is empty"));
        }
        if !code.0.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(BudgetError::validation(
                "currency",
                format!("'{}' is not a currency code", s.trim()),
            ));
        }
        Ok(code)
    }
}

/// Exchange rates of every known currency against one base currency.
///
/// A table is fetched once per calculation and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    base: CurrencyCode,
    rates: HashMap<CurrencyCode, f64>,
}

impl RateTable {
    /// Builds a table for `base`. The base currency is always present with a
    /// rate of 1 unless the provider quoted it explicitly.
    pub fn new(base: CurrencyCode, rates: HashMap<CurrencyCode, f64>) -> Self {
        let mut rates = rates;
        rates.entry(base.clone()).or_insert(1.0);
        Self { base, rates }
    }

    pub fn base(&self) -> &CurrencyCode {
        &self.base
    }

    pub fn get(&self, code: &CurrencyCode) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    fn usable_rate(&self, code: &CurrencyCode) -> Result<f64> {
        let rate = self
            .get(code)
            .ok_or_else(|| BudgetError::MissingRate(code.clone()))?;
        if rate <= 0.0 || !rate.is_finite() {
            return Err(BudgetError::InvalidRate {
                currency: code.to_string(),
                rate,
            });
        }
        Ok(rate)
    }
}

/// Source of exchange rate tables, usually a remote service.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rates(&self, base: &CurrencyCode) -> Result<RateTable>;
}

/// Converts `amount` from one currency to another using `rates`.
///
/// Identical currencies short-circuit without consulting the table, so a
/// currency missing from `rates` is fine when no conversion is needed.
pub fn convert(
    amount: f64,
    from: &CurrencyCode,
    to: &CurrencyCode,
    rates: &RateTable,
) -> Result<f64> {
    if from == to {
        return Ok(amount);
    }
    let from_rate = rates.usable_rate(from)?;
    let to_rate = rates.usable_rate(to)?;
    Ok(amount * to_rate / from_rate)
}
