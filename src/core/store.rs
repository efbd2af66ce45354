//! Persistence abstraction for the last submitted budget.

use crate::core::budget::{BudgetResult, CategoryAmounts};
use anyhow::Result;

/// Flat shape of a stored budget: income plus converted amount per category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetRecord {
    pub income: f64,
    pub expenses: CategoryAmounts,
}

impl From<&BudgetResult> for BudgetRecord {
    fn from(result: &BudgetResult) -> Self {
        Self {
            income: result.income,
            expenses: result.expenses.clone(),
        }
    }
}

/// Holds a single budget record, replaced on every save.
pub trait BudgetStore: Send + Sync {
    /// Returns the stored record, or an empty one when nothing was saved yet.
    fn load(&self) -> Result<BudgetRecord>;
    fn save(&self, result: &BudgetResult) -> Result<()>;
}
