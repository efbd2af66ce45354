//! Validation of raw user input into typed requests.
//!
//! Everything reaching the calculation functions has passed through here, so
//! they only ever see numbers and normalized currency codes.
use crate::core::budget::ExpenseEntry;
use crate::core::currency::CurrencyCode;
use crate::core::error::{BudgetError, Result};
use crate::core::loan::LoanTerms;
use crate::core::report::RESERVED_COLUMNS;
use std::str::FromStr;

/// Budget submission as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct BudgetForm {
    pub income: String,
    pub income_currency: String,
    /// Expense lines in `CATEGORY:AMOUNT:CURRENCY` form.
    pub expenses: Vec<String>,
    pub goal_amount: String,
    pub goal_currency: String,
    pub goal_months: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetRequest {
    pub income: f64,
    pub income_currency: CurrencyCode,
    pub expenses: Vec<ExpenseEntry>,
    pub goal_amount: f64,
    pub goal_currency: CurrencyCode,
    pub goal_months: i64,
}

/// Loan calculator input with the interest given in percent.
#[derive(Debug, Clone, Default)]
pub struct LoanForm {
    pub amount: String,
    pub interest_rate: String,
    pub term: String,
}

fn parse_number(field: &str, value: &str) -> Result<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BudgetError::validation(field, "value is required"));
    }
    let number = f64::from_str(trimmed)
        .map_err(|_| BudgetError::validation(field, format!("'{trimmed}' is not a number")))?;
    if !number.is_finite() {
        return Err(BudgetError::validation(field, format!("'{trimmed}' is not a finite number")));
    }
    Ok(number)
}

fn parse_whole(field: &str, value: &str) -> Result<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BudgetError::validation(field, "value is required"));
    }
    i64::from_str(trimmed)
        .map_err(|_| BudgetError::validation(field, format!("'{trimmed}' is not a whole number")))
}

fn parse_currency(field: &str, value: &str) -> Result<CurrencyCode> {
    CurrencyCode::from_str(value).map_err(|e| match e {
        BudgetError::Validation { reason, .. } => BudgetError::validation(field, reason),
        other => other,
    })
}

impl FromStr for ExpenseEntry {
    type Err = BudgetError;

    /// Parses `CATEGORY:AMOUNT:CURRENCY`. The category may itself contain colons.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.rsplitn(3, ':');
        let (Some(currency), Some(amount), Some(category)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(BudgetError::validation(
                "expense",
                format!("'{s}' is not in CATEGORY:AMOUNT:CURRENCY form"),
            ));
        };

        let category = category.trim();
        if category.is_empty() {
            return Err(BudgetError::validation("expense", "category is empty"));
        }
        if RESERVED_COLUMNS.iter().any(|reserved| *reserved == category) {
            return Err(BudgetError::validation(
                "expense",
                format!("'{category}' is reserved and cannot be a category"),
            ));
        }
        let amount = parse_number("expense amount", amount)?;
        if amount < 0.0 {
            return Err(BudgetError::validation(
                "expense amount",
                format!("{category} amount must not be negative"),
            ));
        }
        let currency = parse_currency("expense currency", currency)?;
        Ok(ExpenseEntry::new(category, amount, currency))
    }
}

impl BudgetForm {
    pub fn validate(&self) -> Result<BudgetRequest> {
        let income = parse_number("income", &self.income)?;
        let income_currency = parse_currency("income_currency", &self.income_currency)?;
        let expenses = self
            .expenses
            .iter()
            .map(|line| line.parse::<ExpenseEntry>())
            .collect::<Result<Vec<_>>>()?;
        let goal_amount = parse_number("goal_amount", &self.goal_amount)?;
        let goal_currency = parse_currency("goal_currency", &self.goal_currency)?;
        let goal_months = parse_whole("goal_months", &self.goal_months)?;
        if goal_months <= 0 {
            return Err(BudgetError::validation(
                "goal_months",
                format!("must be a positive number of months, got {goal_months}"),
            ));
        }

        Ok(BudgetRequest {
            income,
            income_currency,
            expenses,
            goal_amount,
            goal_currency,
            goal_months,
        })
    }
}

impl LoanForm {
    /// Parses the form; the term is left unchecked so the calculator reports it.
    pub fn validate(&self) -> Result<LoanTerms> {
        let principal = parse_number("amount", &self.amount)?;
        let percent = parse_number("interest_rate", &self.interest_rate)?;
        let term = parse_whole("term", &self.term)?;
        Ok(LoanTerms::new(principal, percent / 100.0, term))
    }
}
