use crate::core::budget::BudgetResult;
use crate::core::store::{BudgetRecord, BudgetStore};
use anyhow::{Result, anyhow};
use std::sync::Mutex;
use tracing::debug;

/// In-memory budget store, mostly useful for tests
#[derive(Default)]
pub struct MemoryBudgetStore {
    record: Mutex<Option<BudgetRecord>>,
}

impl MemoryBudgetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BudgetStore for MemoryBudgetStore {
    fn load(&self) -> Result<BudgetRecord> {
        let record = self
            .record
            .lock()
            .map_err(|_| anyhow!("Budget store lock poisoned"))?;
        Ok(record.clone().unwrap_or_default())
    }

    fn save(&self, result: &BudgetResult) -> Result<()> {
        let mut record = self
            .record
            .lock()
            .map_err(|_| anyhow!("Budget store lock poisoned"))?;
        debug!("Budget PUT");
        *record = Some(BudgetRecord::from(result));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::budget::CategoryAmounts;
    use crate::core::currency::CurrencyCode;

    #[test]
    fn test_memory_store() {
        let store = MemoryBudgetStore::new();
        assert_eq!(store.load().unwrap(), BudgetRecord::default());

        let mut expenses = CategoryAmounts::new();
        expenses.insert("food", 10.0);
        let result = BudgetResult {
            income: 50.0,
            income_currency: CurrencyCode::new("EUR"),
            total_expenses: 10.0,
            balance: 40.0,
            expenses,
        };
        store.save(&result).unwrap();

        let record = store.load().unwrap();
        assert_eq!(record.income, 50.0);
        assert_eq!(record.expenses.get("food"), Some(10.0));
    }
}
