//! Load CSV statement exports into a typed `RawTable`.
//!
//! Cell typing is decided once here: empty fields become `Missing`, fields
//! that parse fully as a finite float become `Number`, everything else stays
//! `Text`. Downstream derivation never re-inspects types.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use moneylens_core::{CellValue, RawTable};

/// Read a CSV file into a raw table. The header row supplies column names.
pub fn read_csv_path(path: impl AsRef<Path>) -> Result<RawTable> {
    let rdr = csv::ReaderBuilder::new()
        .from_path(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;
    from_csv_reader(rdr)
}

/// Read CSV data from any reader (uploads arrive as in-memory buffers).
pub fn read_csv<R: Read>(reader: R) -> Result<RawTable> {
    from_csv_reader(csv::ReaderBuilder::new().from_reader(reader))
}

fn from_csv_reader<R: Read>(mut rdr: csv::Reader<R>) -> Result<RawTable> {
    let headers = rdr.headers().context("reading CSV header row")?.clone();
    let columns: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();
    let mut table = RawTable::new(columns)?;

    for (i, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("reading CSV record {i}"))?;
        let row: Vec<CellValue> = record.iter().map(type_cell).collect();
        table
            .push_row(row)
            .with_context(|| format!("CSV record {i}"))?;
    }
    Ok(table)
}

fn type_cell(field: &str) -> CellValue {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return CellValue::Missing;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => CellValue::Number(n),
        _ => CellValue::Text(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_cells() {
        let data = "Date,Amount,Memo\n2024-01-05,-42.17,Coffee\n2024-01-06,,\n";
        let table = read_csv(data.as_bytes()).unwrap();
        assert_eq!(table.columns(), &["Date", "Amount", "Memo"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows()[0][0], CellValue::Text("2024-01-05".to_string()));
        assert_eq!(table.rows()[0][1], CellValue::Number(-42.17));
        assert_eq!(table.rows()[1][1], CellValue::Missing);
        assert_eq!(table.rows()[1][2], CellValue::Missing);
    }

    #[test]
    fn test_nan_like_text_stays_text() {
        let data = "A\nNaN\ninf\n";
        let table = read_csv(data.as_bytes()).unwrap();
        assert_eq!(table.rows()[0][0], CellValue::Text("NaN".to_string()));
        assert_eq!(table.rows()[1][0], CellValue::Text("inf".to_string()));
    }

    #[test]
    fn test_duplicate_headers_rejected() {
        let data = "Date,Date\n1,2\n";
        let err = read_csv(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("duplicate column name"));
    }
}
