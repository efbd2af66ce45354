use crate::core::currency::CurrencyCode;
use crate::core::error::{BudgetError, Result};

/// Monthly savings needed to reach a goal within a number of months.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalPlan {
    pub goal_amount: f64,
    pub goal_currency: CurrencyCode,
    pub goal_months: u32,
    /// Share of the monthly income to put aside.
    pub goal_rate: f64,
    pub monthly_savings: f64,
}

/// Derives the monthly savings for a goal as a share of `income`.
pub fn plan(
    income: f64,
    goal_amount: f64,
    goal_currency: CurrencyCode,
    goal_months: i64,
) -> Result<GoalPlan> {
    if goal_months < 0 {
        return Err(BudgetError::validation(
            "goal_months",
            format!("must not be negative, got {goal_months}"),
        ));
    }
    if goal_months == 0 {
        return Err(BudgetError::DivisionByZero("goal months"));
    }
    if income == 0.0 {
        return Err(BudgetError::DivisionByZero("income"));
    }
    let months = u32::try_from(goal_months).map_err(|_| {
        BudgetError::validation("goal_months", format!("{goal_months} is too large"))
    })?;

    let goal_rate = (goal_amount / f64::from(months)) / income;
    Ok(GoalPlan {
        goal_amount,
        goal_currency,
        goal_months: months,
        goal_rate,
        monthly_savings: income * goal_rate,
    })
}
