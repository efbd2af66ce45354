//! Normalizes expenses into the income currency and totals them.
use crate::core::currency::{CurrencyCode, RateTable, convert};
use crate::core::error::Result;
use tracing::debug;

/// One expense line as submitted by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseEntry {
    pub category: String,
    pub amount: f64,
    pub currency: CurrencyCode,
}

impl ExpenseEntry {
    pub fn new(category: impl Into<String>, amount: f64, currency: CurrencyCode) -> Self {
        Self {
            category: category.into(),
            amount,
            currency,
        }
    }
}

/// Category to amount mapping that keeps the order categories first appeared in.
///
/// Inserting an existing category replaces its amount in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryAmounts(Vec<(String, f64)>);

impl CategoryAmounts {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, category: impl Into<String>, amount: f64) {
        let category = category.into();
        match self.0.iter_mut().find(|(name, _)| *name == category) {
            Some(existing) => existing.1 = amount,
            None => self.0.push((category, amount)),
        }
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, amount)| *amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, amount)| (name.as_str(), *amount))
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn total(&self) -> f64 {
        self.0.iter().map(|(_, amount)| amount).sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Outcome of one budget submission, all amounts in the income currency.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetResult {
    pub income: f64,
    pub income_currency: CurrencyCode,
    pub expenses: CategoryAmounts,
    pub total_expenses: f64,
    pub balance: f64,
}

/// Converts every entry into `income_currency` and computes totals.
///
/// Entries are processed in order and a repeated category replaces the earlier
/// amount rather than adding to it. The first failing conversion aborts the
/// whole aggregation.
pub fn aggregate(
    income: f64,
    income_currency: &CurrencyCode,
    entries: &[ExpenseEntry],
    rates: &RateTable,
) -> Result<BudgetResult> {
    let mut expenses = CategoryAmounts::new();
    for entry in entries {
        let converted = convert(entry.amount, &entry.currency, income_currency, rates)?;
        debug!(
            category = %entry.category,
            amount = entry.amount,
            currency = %entry.currency,
            converted,
            "Converted expense"
        );
        expenses.insert(entry.category.clone(), converted);
    }

    let total_expenses = expenses.total();
    Ok(BudgetResult {
        income,
        income_currency: income_currency.clone(),
        expenses,
        total_expenses,
        balance: income - total_expenses,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::BudgetError;
    use std::collections::HashMap;

    fn rub() -> CurrencyCode {
        CurrencyCode::new("RUB")
    }

    fn rates() -> RateTable {
        RateTable::new(rub(), HashMap::from([(CurrencyCode::new("USD"), 0.01)]))
    }

    #[test]
    fn test_empty_entries() {
        let result = aggregate(1500.0, &rub(), &[], &rates()).unwrap();
        assert_eq!(result.total_expenses, 0.0);
        assert_eq!(result.balance, 1500.0);
        assert!(result.expenses.is_empty());
    }

    #[test]
    fn test_mixed_currency_budget() {
        let entries = vec![
            ExpenseEntry::new("food", 200.0, rub()),
            ExpenseEntry::new("rent", 300.0, CurrencyCode::new("USD")),
        ];
        let result = aggregate(1000.0, &rub(), &entries, &rates()).unwrap();

        assert_eq!(result.expenses.get("food"), Some(200.0));
        assert!((result.expenses.get("rent").unwrap() - 30000.0).abs() < 1e-9);
        assert!((result.total_expenses - 30200.0).abs() < 1e-9);
        assert!((result.balance + 29200.0).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_category_last_wins() {
        let entries = vec![
            ExpenseEntry::new("food", 200.0, rub()),
            ExpenseEntry::new("transport", 50.0, rub()),
            ExpenseEntry::new("food", 1.0, CurrencyCode::new("USD")),
        ];
        let result = aggregate(1000.0, &rub(), &entries, &rates()).unwrap();

        assert_eq!(result.expenses.len(), 2);
        assert!((result.expenses.get("food").unwrap() - 100.0).abs() < 1e-9);
        assert!((result.total_expenses - 150.0).abs() < 1e-9);
        let order: Vec<&str> = result.expenses.categories().collect();
        assert_eq!(order, vec!["food", "transport"]);
    }

    #[test]
    fn test_conversion_failure_aborts() {
        let entries = vec![
            ExpenseEntry::new("food", 200.0, rub()),
            ExpenseEntry::new("travel", 10.0, CurrencyCode::new("GBP")),
        ];
        let result = aggregate(1000.0, &rub(), &entries, &rates());
        assert_eq!(
            result.unwrap_err(),
            BudgetError::MissingRate(CurrencyCode::new("GBP"))
        );
    }
}
