//! Core budgeting logic and abstractions

pub mod budget;
pub mod config;
pub mod currency;
pub mod error;
pub mod form;
pub mod loan;
pub mod log;
pub mod report;
pub mod savings;
pub mod store;

// Re-export main types for cleaner imports
pub use budget::{BudgetResult, CategoryAmounts, ExpenseEntry, aggregate};
pub use currency::{CurrencyCode, RateProvider, RateTable, convert};
pub use error::{BudgetError, ErrorKind};
pub use loan::{LoanResult, LoanTerms, monthly_payment};
pub use savings::{GoalPlan, plan};
pub use store::{BudgetRecord, BudgetStore};
