pub mod budget;
pub mod loan;
pub mod report;
pub mod setup;
pub mod ui;
