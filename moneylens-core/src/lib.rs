//! moneylens-core: normalization of messy tabular financial exports into a
//! canonical transaction schema, plus a synthetic history generator for demos.

pub mod combine;
pub mod derive;
pub mod errors;
pub mod extract;
pub mod synth;
pub mod table;

pub use combine::combine_activity;
pub use derive::{ColumnMapping, Derived, DeriveWarning, RowRange, derive};
pub use errors::{DeriveError, ValidationError};
pub use extract::extract;
pub use synth::{CategorySpec, Frequency, SyntheticGenerator, catalog};
pub use table::{CanonicalTable, CellValue, RawTable, TransactionRow};
