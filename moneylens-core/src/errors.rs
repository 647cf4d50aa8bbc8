//! Error taxonomy for table derivation.

use thiserror::Error;

/// User-input-shaped failures. The interaction layer is expected to
/// re-prompt for a corrected mapping or range and call again; the pipeline
/// never attempts row-level recovery.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("invalid row range: start {start} must be less than end {end}")]
    InvalidRowRange { start: usize, end: usize },
    #[error("invalid row range: end {end} exceeds table length {rows}")]
    RowRangeOutOfBounds { end: usize, rows: usize },
    #[error("invalid dates: {count} value(s) in the selected range did not parse")]
    InvalidDates { count: usize },
    #[error("invalid amounts: column '{column}' row {row} has no numeric value")]
    InvalidAmounts { column: String, row: usize },
    #[error("invalid description: column '{column}' row {row} is not text")]
    NonTextDescription { column: String, row: usize },
}

/// Any failure of a single derivation call. Validation failures are
/// recoverable with corrected input; a missing mapped column is structural
/// and non-recoverable for that call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeriveError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("source table has no column named '{0}'")]
    MissingColumn(String),
}
