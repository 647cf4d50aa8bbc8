//! End-to-end: CSV text in, canonical transaction table out.

use chrono::NaiveDate;
use moneylens_core::{ColumnMapping, DeriveError, RowRange, ValidationError, derive};
use moneylens_ingest::read_csv;

const STATEMENT: &str = "\
TxnDate,Credit,Debit,Memo,Balance
2024-01-01,100,0,Pay,
2024-01-02,0,40.00 USD,Shop,960.00
2024-01-03,,$25.50,Groceries,934.50
";

fn mapping() -> ColumnMapping {
    ColumnMapping {
        date: "TxnDate".to_string(),
        deposits: "Credit".to_string(),
        withdrawals: "Debit".to_string(),
        description: Some("Memo".to_string()),
        balance: Some("Balance".to_string()),
    }
}

#[test]
fn test_csv_statement_to_canonical_table() {
    let table = read_csv(STATEMENT.as_bytes()).unwrap();
    let derived = derive(&table, &mapping(), RowRange::new(0, 3)).unwrap();

    assert!(derived.warnings.is_empty());
    assert_eq!(derived.table.len(), 3);

    let dates: Vec<NaiveDate> = derived.table.iter().map(|r| r.date).collect();
    assert_eq!(
        dates,
        vec![
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
        ]
    );

    let amounts: Vec<f64> = derived.table.iter().map(|r| r.amount).collect();
    assert_eq!(amounts, vec![100.0, -40.0, -25.5]);

    let descriptions: Vec<&str> = derived.table.iter().map(|r| r.description.as_str()).collect();
    assert_eq!(descriptions, vec!["Pay", "Shop", "Groceries"]);

    let balances: Vec<Option<f64>> = derived.table.iter().map(|r| r.balance).collect();
    assert_eq!(balances, vec![None, Some(960.0), Some(934.5)]);
}

#[test]
fn test_row_range_narrows_the_selection() {
    let table = read_csv(STATEMENT.as_bytes()).unwrap();
    let derived = derive(&table, &mapping(), RowRange::new(1, 3)).unwrap();
    assert_eq!(derived.table.len(), 2);
    assert_eq!(derived.table[0].description, "Shop");
}

#[test]
fn test_bad_date_in_csv_aborts_derivation() {
    let csv = "TxnDate,Credit,Debit\n2024-01-01,5,0\nsoon,1,0\n";
    let table = read_csv(csv.as_bytes()).unwrap();
    let mut mapping = mapping();
    mapping.description = None;
    mapping.balance = None;
    let err = derive(&table, &mapping, RowRange::new(0, 2)).unwrap_err();
    assert_eq!(
        err,
        DeriveError::Validation(ValidationError::InvalidDates { count: 1 })
    );
}
