use serde::Serialize;
use std::path::PathBuf;

/// A vendor invoice. Bills are paid against it one by one.
#[derive(Debug, Clone, Serialize)]
pub struct Invoice {
    pub id: u64,
    pub name: String,
    pub value: f64,
    pub date: String,
    pub file_ref: Option<PathBuf>,
    pub bills: Vec<Bill>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Bill {
    pub id: u64,
    pub name: String,
    pub value: f64,
    pub date: String,
    pub file_ref: Option<PathBuf>,
}

impl Invoice {
    /// Amount billed so far against this invoice.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.bills.iter().map(|b| b.value).sum()
    }
}
