//! Error types for Site Ledger.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when mutating the record store.
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    /// A required text field was empty or whitespace-only.
    #[error("{field} must not be blank")]
    BlankField { field: &'static str },

    /// A monetary amount failed validation.
    #[error("enter a valid value (got {value})")]
    InvalidAmount { value: f64 },

    /// No building with the given id exists.
    #[error("building #{id} not found")]
    BuildingNotFound { id: u64 },

    /// No floor with the given id exists in any building.
    #[error("floor #{id} not found")]
    FloorNotFound { id: u64 },

    /// No company with the given id exists on any floor.
    #[error("company #{id} not found")]
    CompanyNotFound { id: u64 },

    /// No invoice with the given id exists under any company.
    #[error("invoice #{id} not found")]
    InvoiceNotFound { id: u64 },
}

/// Errors that can occur when exporting data.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to create the output file.
    #[error("failed to create file '{path}': {source}")]
    FileCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write data to the file.
    #[error("failed to write data: {message}")]
    WriteError { message: String },

    /// Failed to serialize data to JSON.
    #[error("JSON serialization failed: {source}")]
    JsonSerialize {
        #[from]
        source: serde_json::Error,
    },

    /// Failed to write CSV data.
    #[error("CSV write failed: {source}")]
    CsvWrite {
        #[from]
        source: csv::Error,
    },
}
