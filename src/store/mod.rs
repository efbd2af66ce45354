//! Budget store implementations.

pub mod csv_file;
pub mod memory;

pub use csv_file::CsvBudgetStore;
pub use memory::MemoryBudgetStore;
