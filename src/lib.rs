pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::config::AppConfig;
use crate::core::form::{BudgetForm, LoanForm};
use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone)]
pub enum AppCommand {
    Budget(BudgetForm),
    Loan { form: LoanForm, schedule: bool },
    Report {
        start_date: String,
        end_date: String,
        out_dir: PathBuf,
    },
    Export { out_dir: PathBuf },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let data_dir = config.default_data_path()?;
    let store = store::CsvBudgetStore::in_dir(&data_dir);

    match command {
        AppCommand::Budget(mut form) => {
            if form.income_currency.trim().is_empty() {
                form.income_currency = config.currency.clone();
            }
            if form.goal_currency.trim().is_empty() {
                form.goal_currency = form.income_currency.clone();
            }
            let request = form.validate()?;

            let provider = providers::exchange_rate_api::ExchangeRateApiProvider::new(
                &config.providers.exchange_rate.base_url,
                config.providers.exchange_rate.retries,
            );
            let spinner = cli::ui::new_spinner("Fetching exchange rates...");
            let summary = cli::budget::calculate(&request, &provider, &store).await;
            spinner.finish_and_clear();

            println!("{}", summary?.display_as_table());
            Ok(())
        }
        AppCommand::Loan { form, schedule } => {
            let terms = form.validate()?;
            cli::loan::run(&terms, schedule)?;
            Ok(())
        }
        AppCommand::Report {
            start_date,
            end_date,
            out_dir,
        } => {
            let today = chrono::Local::now().date_naive();
            let path =
                cli::report::generate_report(&store, &start_date, &end_date, &out_dir, today)?;
            println!("Report written to {}", path.display());
            Ok(())
        }
        AppCommand::Export { out_dir } => {
            let path = cli::report::export_data(&store, &out_dir)?;
            println!("Data exported to {}", path.display());
            Ok(())
        }
    }
}

/// Message shown to the user for a failed command.
pub fn describe_error(err: &anyhow::Error) -> String {
    match err.downcast_ref::<crate::core::BudgetError>() {
        Some(budget_err) => budget_err.user_message(),
        None => format!("{err:#}"),
    }
}
