use super::Invoice;
use serde::Serialize;

/// A vendor contracted on a floor, with its purchase order.
#[derive(Debug, Clone, Serialize)]
pub struct Company {
    pub id: u64,
    pub name: String,
    pub po_number: String,
    pub po_value: f64,
    pub po_date: Option<String>,
    pub invoices: Vec<Invoice>,
}

impl Company {
    /// Total amount billed across all of this company's invoices.
    #[must_use]
    pub fn total_amount(&self) -> f64 {
        self.invoices.iter().map(Invoice::total).sum()
    }
}
