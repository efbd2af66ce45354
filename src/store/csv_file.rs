use crate::core::budget::{BudgetResult, CategoryAmounts};
use crate::core::report::{INCOME_COLUMN, RESERVED_COLUMNS};
use crate::core::store::{BudgetRecord, BudgetStore};
use anyhow::{Context, Result, anyhow, bail};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Keeps the budget as a one-row CSV file: `Income` followed by one column per
/// category. Every save overwrites the file.
pub struct CsvBudgetStore {
    path: PathBuf,
}

impl CsvBudgetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `budget.csv` inside `data_dir`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join("budget.csv"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BudgetStore for CsvBudgetStore {
    fn load(&self) -> Result<BudgetRecord> {
        if !self.path.exists() {
            debug!("No budget stored at {}", self.path.display());
            return Ok(BudgetRecord::default());
        }

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)
            .with_context(|| format!("Failed to open budget file: {}", self.path.display()))?;

        let headers = rdr
            .headers()
            .with_context(|| format!("Failed to read budget header: {}", self.path.display()))?
            .clone();

        let Some(row) = rdr.records().next() else {
            debug!("Budget file {} is empty", self.path.display());
            return Ok(BudgetRecord::default());
        };
        let row = row.context("Failed to read budget record")?;

        let mut income = None;
        let mut expenses = CategoryAmounts::new();
        for (column, value) in headers.iter().zip(row.iter()) {
            let amount: f64 = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid amount '{value}' in column '{column}'"))?;
            let seen = if column == INCOME_COLUMN {
                income.replace(amount).is_some()
            } else {
                let seen = expenses.get(column).is_some();
                expenses.insert(column, amount);
                seen
            };
            if seen {
                bail!(
                    "Budget file {} has a duplicate '{}' column",
                    self.path.display(),
                    column
                );
            }
        }

        let income = income.ok_or_else(|| {
            anyhow!(
                "Budget file {} has no {} column",
                self.path.display(),
                INCOME_COLUMN
            )
        })?;
        Ok(BudgetRecord { income, expenses })
    }

    fn save(&self, result: &BudgetResult) -> Result<()> {
        if let Some(category) = result
            .expenses
            .categories()
            .find(|category| RESERVED_COLUMNS.iter().any(|reserved| reserved == category))
        {
            bail!("'{category}' cannot be stored as an expense category");
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut wtr = csv::Writer::from_path(&self.path)
            .with_context(|| format!("Failed to create budget file: {}", self.path.display()))?;

        let mut header = vec![INCOME_COLUMN.to_string()];
        header.extend(result.expenses.categories().map(str::to_string));
        wtr.write_record(&header)?;

        let mut row = vec![result.income.to_string()];
        row.extend(result.expenses.iter().map(|(_, amount)| amount.to_string()));
        wtr.write_record(&row)?;
        wtr.flush()?;

        debug!("Saved budget to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::CurrencyCode;
    use tempfile::tempdir;

    fn result() -> BudgetResult {
        let mut expenses = CategoryAmounts::new();
        expenses.insert("food", 200.0);
        expenses.insert("rent", 30000.5);
        BudgetResult {
            income: 1000.0,
            income_currency: CurrencyCode::new("RUB"),
            total_expenses: expenses.total(),
            balance: 1000.0 - expenses.total(),
            expenses,
        }
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = CsvBudgetStore::in_dir(dir.path());
        let record = store.load().unwrap();
        assert_eq!(record.income, 0.0);
        assert!(record.expenses.is_empty());
    }

    #[test]
    fn test_empty_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = CsvBudgetStore::in_dir(dir.path());
        fs::write(store.path(), "").unwrap();
        assert_eq!(store.load().unwrap(), BudgetRecord::default());

        fs::write(store.path(), "Income,food\n").unwrap();
        assert_eq!(store.load().unwrap(), BudgetRecord::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let store = CsvBudgetStore::in_dir(&dir.path().join("nested"));
        store.save(&result()).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "Income,food,rent\n1000,200,30000.5\n");

        let record = store.load().unwrap();
        assert_eq!(record, BudgetRecord::from(&result()));
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempdir().unwrap();
        let store = CsvBudgetStore::in_dir(dir.path());
        store.save(&result()).unwrap();

        let mut smaller = result();
        smaller.expenses = CategoryAmounts::new();
        smaller.expenses.insert("books", 15.0);
        store.save(&smaller).unwrap();

        let record = store.load().unwrap();
        assert_eq!(record.expenses.len(), 1);
        assert_eq!(record.expenses.get("books"), Some(15.0));
    }

    #[test]
    fn test_corrupt_file_fails() {
        let dir = tempdir().unwrap();
        let store = CsvBudgetStore::in_dir(dir.path());
        fs::write(store.path(), "Income,food\nlots,12\n").unwrap();
        assert!(store.load().is_err());

        fs::write(store.path(), "food\n12\n").unwrap();
        assert!(
            store
                .load()
                .unwrap_err()
                .to_string()
                .contains("has no Income column")
        );
    }

    #[test]
    fn test_duplicate_column_fails() {
        let dir = tempdir().unwrap();
        let store = CsvBudgetStore::in_dir(dir.path());
        fs::write(store.path(), "Income,food,Income
1000,200,5
").unwrap();
        assert!(
            store
                .load()
                .unwrap_err()
                .to_string()
                .contains("duplicate 'Income' column")
        );

        fs::write(store.path(), "Income,food,food
1000,200,5
").unwrap();
        assert!(store.load().is_err());
    }

    #[test]
    fn test_reserved_category_not_saved() {
        let dir = tempdir().unwrap();
        let store = CsvBudgetStore::in_dir(dir.path());
        store.save(&result()).unwrap();

        let mut clashing = result();
        clashing.expenses.insert("Income", 5.0);
        assert!(store.save(&clashing).is_err());
        assert_eq!(store.load().unwrap().income, 1000.0);
    }
}
