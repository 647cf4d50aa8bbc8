//! moneylens-ingest: CSV ingestion into the raw table model.

pub mod csv_loader;

pub use csv_loader::{read_csv, read_csv_path};
