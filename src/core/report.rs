//! Shapes a stored budget into exportable rows.
use crate::core::budget::CategoryAmounts;
use crate::core::error::{BudgetError, Result};
use crate::core::store::BudgetRecord;
use anyhow::Context;
use chrono::NaiveDate;
use std::io::Write;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub const DATE_COLUMN: &str = "Date";
pub const INCOME_COLUMN: &str = "Income";
pub const TOTAL_EXPENSES_COLUMN: &str = "Total Expenses";

/// Column names that can never be used as expense categories.
pub const RESERVED_COLUMNS: [&str; 3] = [DATE_COLUMN, INCOME_COLUMN, TOTAL_EXPENSES_COLUMN];

/// Row of the financial report export.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub date: NaiveDate,
    pub income: f64,
    pub total_expenses: f64,
    pub expenses: CategoryAmounts,
}

impl ReportRow {
    pub fn from_record(record: &BudgetRecord, date: NaiveDate) -> Self {
        Self {
            date,
            income: record.income,
            total_expenses: record.expenses.total(),
            expenses: record.expenses.clone(),
        }
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> anyhow::Result<()> {
        let mut csv = csv::Writer::from_writer(writer);

        let mut header = vec![
            DATE_COLUMN.to_string(),
            INCOME_COLUMN.to_string(),
            TOTAL_EXPENSES_COLUMN.to_string(),
        ];
        header.extend(self.expenses.categories().map(str::to_string));
        csv.write_record(&header)
            .context("Failed to write report header")?;

        let mut row = vec![
            self.date.format(DATE_FORMAT).to_string(),
            self.income.to_string(),
            self.total_expenses.to_string(),
        ];
        row.extend(self.expenses.iter().map(|(_, amount)| amount.to_string()));
        csv.write_record(&row).context("Failed to write report row")?;

        csv.flush().context("Failed to flush report")?;
        Ok(())
    }
}

/// Writes the `Income` + per-category export of a stored budget.
pub fn write_data_csv<W: Write>(record: &BudgetRecord, writer: W) -> anyhow::Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec![INCOME_COLUMN.to_string()];
    header.extend(record.expenses.categories().map(str::to_string));
    csv.write_record(&header)
        .context("Failed to write export header")?;

    let mut row = vec![record.income.to_string()];
    row.extend(record.expenses.iter().map(|(_, amount)| amount.to_string()));
    csv.write_record(&row).context("Failed to write export row")?;

    csv.flush().context("Failed to flush export")?;
    Ok(())
}

/// Parses a `YYYY-MM-DD` report boundary.
pub fn parse_report_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| {
        BudgetError::validation(field, format!("'{}' is not a YYYY-MM-DD date ({e})", value.trim()))
    })
}

pub fn report_file_name(start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "financial_report_{}_to_{}.csv",
        start.format(DATE_FORMAT),
        end.format(DATE_FORMAT)
    )
}
