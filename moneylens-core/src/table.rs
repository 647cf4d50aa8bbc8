//! Cell and table types shared across the derivation pipeline.

use anyhow::{Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single cell of a raw input table.
///
/// The variant is decided once at ingestion; downstream code matches on it
/// instead of re-inspecting runtime types per cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Missing,
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

/// Raw ingested table: an ordered sequence of rows over a fixed column list.
///
/// Column names are unique per table. Rows always match the column count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>) -> Result<Self> {
        for (i, name) in columns.iter().enumerate() {
            if columns[..i].contains(name) {
                bail!("duplicate column name '{name}'");
            }
        }
        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    pub fn push_row(&mut self, row: Vec<CellValue>) -> Result<()> {
        if row.len() != self.columns.len() {
            bail!(
                "row has {} cells but the table has {} columns",
                row.len(),
                self.columns.len()
            );
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }
}

/// One normalized transaction: the pipeline's output unit.
///
/// `balance` is `None` when the source supplied no balance column or the cell
/// held no extractable number; the pipeline never fabricates one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub date: NaiveDate,
    /// Deposits increase it, withdrawals decrease it.
    pub amount: f64,
    pub description: String,
    pub balance: Option<f64>,
}

/// Dense, 0-indexed sequence of normalized transactions. Duplicate-looking
/// rows are legal; real statements contain them.
pub type CanonicalTable = Vec<TransactionRow>;
