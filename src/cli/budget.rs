use super::ui;
use crate::core::form::BudgetRequest;
use crate::core::{
    BudgetResult, BudgetStore, GoalPlan, RateProvider, aggregate, error::Result, plan,
};
use comfy_table::{Attribute, Cell};
use tracing::{debug, info};

/// Everything shown after a budget submission.
#[derive(Debug, Clone)]
pub struct BudgetSummary {
    pub result: BudgetResult,
    pub goal: GoalPlan,
}

/// Fetches rates for the income currency, aggregates the expenses and plans
/// the savings goal. Nothing is stored unless every step succeeded.
pub async fn calculate(
    request: &BudgetRequest,
    rate_provider: &(dyn RateProvider + Send + Sync),
    store: &dyn BudgetStore,
) -> anyhow::Result<BudgetSummary> {
    let summary = summarize(request, rate_provider).await?;
    store.save(&summary.result)?;
    info!(
        categories = summary.result.expenses.len(),
        "Saved budget"
    );
    Ok(summary)
}

async fn summarize(
    request: &BudgetRequest,
    rate_provider: &(dyn RateProvider + Send + Sync),
) -> Result<BudgetSummary> {
    let rates = rate_provider.fetch_rates(&request.income_currency).await?;
    debug!(base = %rates.base(), count = rates.len(), "Fetched rate table");

    let result = aggregate(
        request.income,
        &request.income_currency,
        &request.expenses,
        &rates,
    )?;
    let goal = plan(
        result.income,
        request.goal_amount,
        request.goal_currency.clone(),
        request.goal_months,
    )?;
    Ok(BudgetSummary { result, goal })
}

impl BudgetSummary {
    pub fn display_as_table(&self) -> String {
        let currency = self.result.income_currency.as_str();
        let mut table = ui::new_styled_table();

        table.set_header(vec![
            ui::header_cell("Category"),
            ui::header_cell(&format!("Amount ({currency})")),
        ]);

        for (category, amount) in self.result.expenses.iter() {
            table.add_row(vec![Cell::new(category), ui::amount_cell(amount)]);
        }

        table.add_row(vec![
            Cell::new("Total Expenses").add_attribute(Attribute::Bold),
            ui::amount_cell(self.result.total_expenses).add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("Income").add_attribute(Attribute::Bold),
            ui::amount_cell(self.result.income),
        ]);
        table.add_row(vec![
            Cell::new("Balance").add_attribute(Attribute::Bold),
            ui::balance_cell(self.result.balance),
        ]);

        let mut output = format!(
            "{}\n\n",
            ui::style_text("Budget Summary", ui::StyleType::Title)
        );
        output.push_str(&table.to_string());

        if !self.result.expenses.is_empty() {
            output.push_str("\n\n");
            output.push_str(&ui::style_text("Expenses", ui::StyleType::TotalLabel));
            output.push('\n');
            output.push_str(&ui::expense_chart(&self.result.expenses));
        }

        output.push_str(&format!(
            "\n\nSave {} {} per month to reach {:.2} {} in {} months {}",
            ui::style_text(
                &format!("{:.2}", self.goal.monthly_savings),
                ui::StyleType::TotalValue
            ),
            self.goal.goal_currency,
            self.goal.goal_amount,
            self.goal.goal_currency,
            self.goal.goal_months,
            ui::style_text(
                &format!("({:.1}% of income)", self.goal.goal_rate * 100.0),
                ui::StyleType::Subtle
            ),
        ));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BudgetError, CurrencyCode, ExpenseEntry, RateTable};
    use crate::store::MemoryBudgetStore;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedRates {
        calls: AtomicUsize,
        fail: bool,
    }

    impl FixedRates {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl RateProvider for FixedRates {
        async fn fetch_rates(&self, base: &CurrencyCode) -> Result<RateTable> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(BudgetError::RateFetch("service down".to_string()));
            }
            Ok(RateTable::new(
                base.clone(),
                HashMap::from([(CurrencyCode::new("USD"), 0.01)]),
            ))
        }
    }

    fn request() -> BudgetRequest {
        BudgetRequest {
            income: 1000.0,
            income_currency: CurrencyCode::new("RUB"),
            expenses: vec![
                ExpenseEntry::new("food", 200.0, CurrencyCode::new("RUB")),
                ExpenseEntry::new("rent", 300.0, CurrencyCode::new("USD")),
            ],
            goal_amount: 1200.0,
            goal_currency: CurrencyCode::new("RUB"),
            goal_months: 12,
        }
    }

    #[tokio::test]
    async fn test_calculate_saves_budget() {
        let provider = FixedRates::new(false);
        let store = MemoryBudgetStore::new();

        let summary = calculate(&request(), &provider, &store).await.unwrap();
        assert!((summary.result.total_expenses - 30200.0).abs() < 1e-9);
        assert!((summary.result.balance + 29200.0).abs() < 1e-9);
        assert!((summary.goal.monthly_savings - 100.0).abs() < 1e-9);

        let record = store.load().unwrap();
        assert_eq!(record.income, 1000.0);
        assert_eq!(record.expenses.len(), 2);
    }

    #[tokio::test]
    async fn test_rates_fetched_every_time() {
        let provider = FixedRates::new(false);
        let store = MemoryBudgetStore::new();
        calculate(&request(), &provider, &store).await.unwrap();
        calculate(&request(), &provider, &store).await.unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_saves_nothing() {
        let provider = FixedRates::new(true);
        let store = MemoryBudgetStore::new();

        let err = calculate(&request(), &provider, &store).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<BudgetError>(),
            Some(&BudgetError::RateFetch("service down".to_string()))
        );
        assert!(store.load().unwrap().expenses.is_empty());
    }

    #[tokio::test]
    async fn test_zero_income_saves_nothing() {
        let provider = FixedRates::new(false);
        let store = MemoryBudgetStore::new();
        let mut request = request();
        request.income = 0.0;

        let err = calculate(&request, &provider, &store).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<BudgetError>(),
            Some(&BudgetError::DivisionByZero("income"))
        );
        assert!(store.load().unwrap().expenses.is_empty());
    }

    #[tokio::test]
    async fn test_summary_table() {
        console::set_colors_enabled(false);
        let provider = FixedRates::new(false);
        let store = MemoryBudgetStore::new();
        let summary = calculate(&request(), &provider, &store).await.unwrap();

        let output = summary.display_as_table();
        assert!(output.contains("Amount (RUB)"));
        assert!(output.contains("30000.00"));
        assert!(output.contains("-29200.00"));
        assert!(output.contains("Save 100.00 RUB per month to reach 1200.00 RUB in 12 months"));
    }
}
