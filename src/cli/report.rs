use crate::core::BudgetStore;
use crate::core::report::{
    ReportRow, parse_report_date, report_file_name, write_data_csv,
};
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

pub const EXPORT_FILE_NAME: &str = "financial_data.csv";

/// Writes `financial_report_{start}_to_{end}.csv` into `out_dir` for the
/// stored budget, dated `today`.
pub fn generate_report(
    store: &dyn BudgetStore,
    start_date: &str,
    end_date: &str,
    out_dir: &Path,
    today: NaiveDate,
) -> Result<PathBuf> {
    let start = parse_report_date("start_date", start_date)?;
    let end = parse_report_date("end_date", end_date)?;
    if end < start {
        bail!("Report end date {end} is before start date {start}");
    }

    let record = store.load()?;
    if record.expenses.is_empty() {
        bail!("No expense data to report");
    }

    let path = out_dir.join(report_file_name(start, end));
    let file = File::create(&path)
        .with_context(|| format!("Failed to create report file: {}", path.display()))?;
    ReportRow::from_record(&record, today).write_csv(file)?;

    info!("Wrote report to {}", path.display());
    Ok(path)
}

/// Writes the stored budget to `financial_data.csv` in `out_dir`.
pub fn export_data(store: &dyn BudgetStore, out_dir: &Path) -> Result<PathBuf> {
    let record = store.load()?;
    if record.expenses.is_empty() {
        bail!("No data to export");
    }

    let path = out_dir.join(EXPORT_FILE_NAME);
    let file = File::create(&path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    write_data_csv(&record, file)?;

    info!("Exported budget to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BudgetResult, CategoryAmounts, CurrencyCode};
    use crate::store::MemoryBudgetStore;
    use std::fs;
    use tempfile::tempdir;

    fn filled_store() -> MemoryBudgetStore {
        let store = MemoryBudgetStore::new();
        let mut expenses = CategoryAmounts::new();
        expenses.insert("food", 200.0);
        store
            .save(&BudgetResult {
                income: 1000.0,
                income_currency: CurrencyCode::new("RUB"),
                total_expenses: 200.0,
                balance: 800.0,
                expenses,
            })
            .unwrap();
        store
    }

    #[test]
    fn test_generate_report() {
        let dir = tempdir().unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let path = generate_report(&filled_store(), "2024-01-01", "2024-01-31", dir.path(), today)
            .unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "financial_report_2024-01-01_to_2024-01-31.csv"
        );
        let content = fs::read_to_string(path).unwrap();
        assert_eq!(
            content,
            "Date,Income,Total Expenses,food\n2024-02-29,1000,200,200\n"
        );
    }

    #[test]
    fn test_report_without_data() {
        let dir = tempdir().unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let err = generate_report(
            &MemoryBudgetStore::new(),
            "2024-01-01",
            "2024-01-31",
            dir.path(),
            today,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "No expense data to report");
    }

    #[test]
    fn test_report_date_validation() {
        let dir = tempdir().unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert!(generate_report(&filled_store(), "yesterday", "2024-01-31", dir.path(), today).is_err());
        assert!(generate_report(&filled_store(), "2024-02-01", "2024-01-31", dir.path(), today).is_err());
    }

    #[test]
    fn test_export_data() {
        let dir = tempdir().unwrap();
        let path = export_data(&filled_store(), dir.path()).unwrap();
        let content = fs::read_to_string(path).unwrap();
        assert_eq!(content, "Income,food\n1000,200\n");

        let err = export_data(&MemoryBudgetStore::new(), dir.path()).unwrap_err();
        assert_eq!(err.to_string(), "No data to export");
    }
}
