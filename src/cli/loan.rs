use super::ui;
use crate::core::error::Result;
use crate::core::loan::{Installment, LoanResult, LoanTerms};
use comfy_table::Cell;

pub fn run(terms: &LoanTerms, show_schedule: bool) -> Result<()> {
    let result = terms.calculate()?;
    println!("{}", display_result(terms, &result));

    if show_schedule {
        let schedule = terms.schedule()?;
        println!("\n{}", display_schedule(&schedule));
    }
    Ok(())
}

fn display_result(terms: &LoanTerms, result: &LoanResult) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Loan"), ui::header_cell("Value")]);
    table.add_row(vec![Cell::new("Amount"), ui::amount_cell(terms.principal)]);
    table.add_row(vec![
        Cell::new("Interest rate (%)"),
        ui::amount_cell(terms.annual_rate * 100.0),
    ]);
    table.add_row(vec![
        Cell::new("Term (months)"),
        Cell::new(terms.term_periods.to_string()),
    ]);
    table.add_row(vec![Cell::new("Total paid"), ui::amount_cell(result.total_paid)]);
    table.add_row(vec![
        Cell::new("Total interest"),
        ui::amount_cell(result.total_interest),
    ]);

    format!(
        "{}\n\n{}\n\nMonthly payment: {}",
        ui::style_text("Loan Calculator", ui::StyleType::Title),
        table,
        ui::style_text(
            &format!("{:.2}", result.monthly_payment),
            ui::StyleType::TotalValue
        )
    )
}

fn display_schedule(schedule: &[Installment]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Month"),
        ui::header_cell("Payment"),
        ui::header_cell("Interest"),
        ui::header_cell("Principal"),
        ui::header_cell("Remaining"),
    ]);
    for row in schedule {
        table.add_row(vec![
            Cell::new(row.period.to_string()),
            ui::amount_cell(row.payment),
            ui::amount_cell(row.interest),
            ui::amount_cell(row.principal),
            ui::amount_cell(row.remaining),
        ]);
    }
    table.to_string()
}
