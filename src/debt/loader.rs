//! Load debts from CSV files or JSON arrays

use super::{Debt, DebtInput};
use crate::error::PlannerError;
use csv::Reader;
use std::path::Path;

/// Default location of the sample debt file
pub const DEFAULT_DEBTS_PATH: &str = "data/debts.csv";

/// Raw CSV row matching the debts.csv columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Balance")]
    balance: f64,
    #[serde(rename = "InterestRate")]
    interest_rate: f64,
    #[serde(rename = "MinimumPayment")]
    minimum_payment: f64,
    #[serde(rename = "CurrentPayment")]
    current_payment: Option<f64>,
}

impl From<CsvRow> for DebtInput {
    fn from(row: CsvRow) -> Self {
        DebtInput {
            name: row.name,
            balance: row.balance,
            interest_rate: row.interest_rate,
            minimum_payment: row.minimum_payment,
            current_payment: row.current_payment,
        }
    }
}

/// Load all debts from a CSV file
pub fn load_debts<P: AsRef<Path>>(path: P) -> Result<Vec<Debt>, PlannerError> {
    let mut reader = Reader::from_path(path)?;
    read_rows(&mut reader)
}

/// Load debts from any CSV reader (e.g., string buffer, network stream)
pub fn load_debts_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Debt>, PlannerError> {
    let mut csv_reader = Reader::from_reader(reader);
    read_rows(&mut csv_reader)
}

/// Load debts from a JSON array of `DebtInput` records
pub fn load_debts_from_json<R: std::io::Read>(reader: R) -> Result<Vec<Debt>, PlannerError> {
    let inputs: Vec<DebtInput> = serde_json::from_reader(reader)?;
    inputs.into_iter().map(DebtInput::normalize).collect()
}

/// Load debts from the default data/debts.csv location
pub fn load_default_debts() -> Result<Vec<Debt>, PlannerError> {
    load_debts(DEFAULT_DEBTS_PATH)
}

fn read_rows<R: std::io::Read>(reader: &mut Reader<R>) -> Result<Vec<Debt>, PlannerError> {
    let mut debts = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        debts.push(DebtInput::from(row).normalize()?);
    }

    log::debug!("Loaded {} debts", debts.len());
    Ok(debts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_debts() {
        let debts = load_default_debts().expect("Failed to load debts");
        assert_eq!(debts.len(), 4);

        let cc = &debts[0];
        assert_eq!(cc.name, "Credit Card");
        assert_eq!(cc.interest_rate, 18.99);

        // Empty CurrentPayment falls back to the minimum
        let medical = debts.iter().find(|d| d.name == "Medical").unwrap();
        assert_eq!(medical.current_payment, medical.minimum_payment);
    }

    #[test]
    fn test_load_from_reader_with_optional_payment() {
        let data = "Name,Balance,InterestRate,MinimumPayment,CurrentPayment\n\
                    CC,2500,18.99,75,\n\
                    Loan,15000,4.5,200,250\n";
        let debts = load_debts_from_reader(data.as_bytes()).unwrap();
        assert_eq!(debts.len(), 2);
        assert_eq!(debts[0].current_payment, 75.0);
        assert_eq!(debts[1].current_payment, 250.0);
    }

    #[test]
    fn test_rejects_negative_balance_row() {
        let data = "Name,Balance,InterestRate,MinimumPayment,CurrentPayment\n\
                    Bad,-10,5,20,20\n";
        let err = load_debts_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput { field: "balance", .. }));
    }

    #[test]
    fn test_load_json_array() {
        let json = r#"[
            {"name":"CC","balance":2500,"interestRate":18.99,"minimumPayment":75,"currentPayment":75},
            {"name":"Loan","balance":15000,"interestRate":4.5,"minimumPayment":200}
        ]"#;
        let debts = load_debts_from_json(json.as_bytes()).unwrap();
        assert_eq!(debts.len(), 2);
        assert_eq!(debts[1].current_payment, 200.0);
    }
}
