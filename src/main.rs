use clap::{CommandFactory, Parser, Subcommand};
use fxbudget::cli::ui;
use fxbudget::core::form::{BudgetForm, LoanForm};
use fxbudget::core::log::init_logging;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup {
        /// Home currency written into the config
        #[arg(long)]
        currency: Option<String>,
    },
    /// Convert expenses into the income currency and plan a savings goal
    Budget {
        /// Monthly income
        #[arg(long)]
        income: String,
        /// Income currency, defaults to the configured currency
        #[arg(long = "currency", default_value = "")]
        income_currency: String,
        /// Expense as CATEGORY:AMOUNT:CURRENCY, repeatable
        #[arg(short, long = "expense")]
        expenses: Vec<String>,
        /// Amount to save up
        #[arg(long)]
        goal_amount: String,
        /// Currency of the goal, defaults to the income currency
        #[arg(long, default_value = "")]
        goal_currency: String,
        /// Months to reach the goal
        #[arg(long)]
        goal_months: String,
    },
    /// Calculate the monthly payment of a loan
    Loan {
        /// Borrowed amount
        #[arg(long)]
        amount: String,
        /// Annual interest rate in percent
        #[arg(long)]
        interest_rate: String,
        /// Term in months
        #[arg(long)]
        term: String,
        /// Print the month by month amortization table
        #[arg(long)]
        schedule: bool,
    },
    /// Write a financial report CSV for the stored budget
    Report {
        /// First day of the period, YYYY-MM-DD
        #[arg(long)]
        start_date: String,
        /// Last day of the period, YYYY-MM-DD
        #[arg(long)]
        end_date: String,
        /// Directory to write the report to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Export the stored budget as CSV
    Export {
        /// Directory to write financial_data.csv to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

impl From<Commands> for fxbudget::AppCommand {
    fn from(cmd: Commands) -> fxbudget::AppCommand {
        match cmd {
            Commands::Budget {
                income,
                income_currency,
                expenses,
                goal_amount,
                goal_currency,
                goal_months,
            } => fxbudget::AppCommand::Budget(BudgetForm {
                income,
                income_currency,
                expenses,
                goal_amount,
                goal_currency,
                goal_months,
            }),
            Commands::Loan {
                amount,
                interest_rate,
                term,
                schedule,
            } => fxbudget::AppCommand::Loan {
                form: LoanForm {
                    amount,
                    interest_rate,
                    term,
                },
                schedule,
            },
            Commands::Report {
                start_date,
                end_date,
                out_dir,
            } => fxbudget::AppCommand::Report {
                start_date,
                end_date,
                out_dir,
            },
            Commands::Export { out_dir } => fxbudget::AppCommand::Export { out_dir },
            Commands::Setup { .. } => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup { currency }) => fxbudget::cli::setup::setup(currency.as_deref()),
        Some(cmd) => fxbudget::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => Cli::command().print_help().map_err(anyhow::Error::from),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Application failed");
            eprintln!(
                "{}",
                ui::style_text(&fxbudget::describe_error(&e), ui::StyleType::Error)
            );
            ExitCode::FAILURE
        }
    }
}
