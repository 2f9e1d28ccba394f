//! Debt records and loading

mod data;
pub mod loader;

pub use data::{Debt, DebtInput};
pub use loader::{load_debts, load_debts_from_reader, load_debts_from_json, load_default_debts};
pub(crate) use data::check_field;
