//! Sparse (input-type, month) parameter inputs

mod table;
pub mod loader;

pub use table::{ParameterRow, ParameterTable, InputSummary, TableSummary};
pub use loader::{load_parameters, load_parameters_from_reader, DEFAULT_INPUTS_PATH};
