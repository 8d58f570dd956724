use super::Company;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Building {
    pub id: u64,
    pub name: String,
    pub floors: Vec<Floor>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Floor {
    pub id: u64,
    pub name: String,
    pub companies: Vec<Company>,
}

impl Floor {
    /// Budgeted cost: sum of PO values across companies on this floor.
    /// Distinct from [`Floor::paid_amount`], which tracks what was billed.
    #[must_use]
    pub fn total_cost(&self) -> f64 {
        self.companies.iter().map(|c| c.po_value).sum()
    }

    /// Amount actually billed across all companies on this floor.
    #[must_use]
    pub fn paid_amount(&self) -> f64 {
        self.companies.iter().map(Company::total_amount).sum()
    }

    /// Billed amount as a rounded percentage of the budgeted cost.
    ///
    /// A floor with zero PO value reports 0% even when something was
    /// billed against it.
    #[must_use]
    pub fn payment_percentage(&self) -> u32 {
        percentage(self.paid_amount(), self.total_cost())
    }
}

impl Building {
    /// Payment percentage across all floors combined.
    #[must_use]
    pub fn payment_percentage(&self) -> u32 {
        let cost: f64 = self.floors.iter().map(Floor::total_cost).sum();
        let paid: f64 = self.floors.iter().map(Floor::paid_amount).sum();
        percentage(paid, cost)
    }
}

/// Rounds once, at the end; 0 when there is no budget to compare against.
fn percentage(paid: f64, cost: f64) -> u32 {
    if cost <= 0.0 {
        0
    } else {
        (100.0 * paid / cost).round() as u32
    }
}
