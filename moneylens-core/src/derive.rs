//! Column-to-schema derivation: raw table + mapping + row range in, canonical
//! transaction table out.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::combine::combine_activity;
use crate::errors::{DeriveError, ValidationError};
use crate::extract::extract;
use crate::table::{CanonicalTable, CellValue, RawTable, TransactionRow};

/// Which source columns feed each canonical field.
///
/// Always supplied explicitly by the caller; nothing here reads ambient
/// session state. `deposits` and `withdrawals` may name the same column when
/// the source carries a single signed amount column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub date: String,
    pub deposits: String,
    pub withdrawals: String,
    pub description: Option<String>,
    pub balance: Option<String>,
}

/// Half-open `[start, end)` selection over the source rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRange {
    pub start: usize,
    pub end: usize,
}

impl RowRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Non-fatal advisory attached to a successful derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeriveWarning {
    /// A shared amount column came out all-deposits or all-withdrawals, so
    /// downstream income/expense breakdowns will be one-sided.
    SingleDirectionCashFlow,
}

/// Successful derivation output: a fresh canonical table plus advisories.
#[derive(Debug, Clone, PartialEq)]
pub struct Derived {
    pub table: CanonicalTable,
    pub warnings: Vec<DeriveWarning>,
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%m/%d/%y", "%d-%m-%Y"];

fn parse_date_cell(cell: &CellValue) -> Option<NaiveDate> {
    let CellValue::Text(s) = cell else { return None };
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

fn column(source: &RawTable, name: &str) -> Result<usize, DeriveError> {
    source
        .column_index(name)
        .ok_or_else(|| DeriveError::MissingColumn(name.to_string()))
}

/// Extract a required numeric column. Missing cells stay absent (the
/// combiner treats them as 0); a non-missing cell with no extractable number
/// fails the whole derivation.
fn extract_column(
    rows: &[Vec<CellValue>],
    col: usize,
    name: &str,
) -> Result<Vec<Option<f64>>, DeriveError> {
    let mut out = Vec::with_capacity(rows.len());
    for (row, cells) in rows.iter().enumerate() {
        match (&cells[col], extract(&cells[col])) {
            (CellValue::Missing, _) => out.push(None),
            (_, Some(v)) => out.push(Some(v)),
            (_, None) => {
                return Err(ValidationError::InvalidAmounts {
                    column: name.to_string(),
                    row,
                }
                .into());
            }
        }
    }
    Ok(out)
}

/// Derive a canonical transaction table from a raw one.
///
/// Pure relative to its inputs: the source table is only read, and every
/// call assembles a fresh output. Validation failures abort atomically; no
/// partial table is ever returned. Row indexing on the output is a dense
/// 0-based sequence independent of the source range.
pub fn derive(
    source: &RawTable,
    mapping: &ColumnMapping,
    range: RowRange,
) -> Result<Derived, DeriveError> {
    if range.start >= range.end {
        return Err(ValidationError::InvalidRowRange {
            start: range.start,
            end: range.end,
        }
        .into());
    }
    if range.end > source.row_count() {
        return Err(ValidationError::RowRangeOutOfBounds {
            end: range.end,
            rows: source.row_count(),
        }
        .into());
    }

    let date_col = column(source, &mapping.date)?;
    let dep_col = column(source, &mapping.deposits)?;
    let wit_col = column(source, &mapping.withdrawals)?;
    let desc_col = match &mapping.description {
        Some(name) => Some((column(source, name)?, name.as_str())),
        None => None,
    };
    let bal_col = match &mapping.balance {
        Some(name) => Some(column(source, name)?),
        None => None,
    };

    // Slice once, before any per-cell work.
    let rows = &source.rows()[range.start..range.end];

    // Dates first: any miss aborts the whole call, no row dropping.
    let mut dates = Vec::with_capacity(rows.len());
    let mut bad_dates = 0usize;
    for cells in rows {
        match parse_date_cell(&cells[date_col]) {
            Some(d) => dates.push(d),
            None => bad_dates += 1,
        }
    }
    if bad_dates > 0 {
        return Err(ValidationError::InvalidDates { count: bad_dates }.into());
    }

    let mut warnings = Vec::new();

    let amounts: Vec<f64> = if dep_col == wit_col {
        // Single shared column already carries signed amounts; absence
        // coerces to 0 here.
        let amounts: Vec<f64> = rows
            .iter()
            .map(|cells| extract(&cells[dep_col]).unwrap_or(0.0))
            .collect();
        if amounts.iter().all(|a| *a >= 0.0) || amounts.iter().all(|a| *a <= 0.0) {
            warn!("selected amount column carries a single direction of cash flow");
            warnings.push(DeriveWarning::SingleDirectionCashFlow);
        }
        amounts
    } else {
        let deposits = extract_column(rows, dep_col, &mapping.deposits)?;
        let withdrawals = extract_column(rows, wit_col, &mapping.withdrawals)?;
        combine_activity(&deposits, &withdrawals)
    };

    let descriptions: Vec<String> = match desc_col {
        None => vec!["N/A".to_string(); rows.len()],
        Some((col, name)) => {
            let mut out = Vec::with_capacity(rows.len());
            for (row, cells) in rows.iter().enumerate() {
                match &cells[col] {
                    CellValue::Text(s) => out.push(s.clone()),
                    CellValue::Missing => out.push("Unknown".to_string()),
                    CellValue::Number(_) => {
                        return Err(ValidationError::NonTextDescription {
                            column: name.to_string(),
                            row,
                        }
                        .into());
                    }
                }
            }
            out
        }
    };

    // Unextractable balances stay absent, never zero-filled; the pipeline
    // does not fabricate balances.
    let balances: Vec<Option<f64>> = match bal_col {
        None => vec![None; rows.len()],
        Some(col) => rows.iter().map(|cells| extract(&cells[col])).collect(),
    };

    let table = dates
        .into_iter()
        .zip(amounts)
        .zip(descriptions)
        .zip(balances)
        .map(|(((date, amount), description), balance)| TransactionRow {
            date,
            amount,
            description,
            balance,
        })
        .collect();

    Ok(Derived { table, warnings })
}
