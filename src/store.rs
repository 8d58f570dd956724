//! In-memory record store.
//!
//! All mutation goes through the named operations here, so the rollup
//! logic is testable without a terminal attached. Lookups walk the tree
//! with linear search at each level; the trees are small and this is
//! never a hot path.

use chrono::Local;
use std::path::PathBuf;

use crate::error::StoreError;
use crate::model::{Bill, Building, Company, Floor, Invoice};

/// Owns the building tree and hands out record ids.
///
/// Ids come from a strictly monotonic counter, so they are unique across
/// the whole store for the lifetime of the process.
#[derive(Debug, Default)]
pub struct SiteStore {
    buildings: Vec<Building>,
    next_id: u64,
}

impl SiteStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buildings: Vec::new(),
            next_id: 1,
        }
    }

    /// A small seeded tree for demo runs (`--sample`).
    pub fn sample() -> Result<Self, StoreError> {
        let mut store = Self::new();
        let tower = store.add_building("Tower A")?;
        let ground = store.add_floor(tower, "Ground Floor")?;
        let first = store.add_floor(tower, "First Floor")?;

        let acme = store.add_company(ground, "Acme Interiors", "PO-1001", 1000.0, None)?;
        let invoice = store.add_invoice(acme, 600.0, None)?;
        store.add_bill(invoice, 600.0, None)?;

        store.add_company(first, "Base Area", "PO-1002", 500.0, Some("2026-01-15".into()))?;
        Ok(store)
    }

    #[must_use]
    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    // ---- lookups ----

    #[must_use]
    pub fn building(&self, id: u64) -> Option<&Building> {
        self.buildings.iter().find(|b| b.id == id)
    }

    #[must_use]
    pub fn floor(&self, id: u64) -> Option<&Floor> {
        self.buildings
            .iter()
            .flat_map(|b| &b.floors)
            .find(|f| f.id == id)
    }

    #[must_use]
    pub fn company(&self, id: u64) -> Option<&Company> {
        self.buildings
            .iter()
            .flat_map(|b| &b.floors)
            .flat_map(|f| &f.companies)
            .find(|c| c.id == id)
    }

    #[must_use]
    pub fn invoice(&self, id: u64) -> Option<&Invoice> {
        self.buildings
            .iter()
            .flat_map(|b| &b.floors)
            .flat_map(|f| &f.companies)
            .flat_map(|c| &c.invoices)
            .find(|inv| inv.id == id)
    }

    // ---- mutations ----

    /// Appends a new building. Returns its id.
    pub fn add_building(&mut self, name: &str) -> Result<u64, StoreError> {
        let name = require("building name", name)?;
        let id = self.allocate_id();
        self.buildings.push(Building {
            id,
            name,
            floors: Vec::new(),
        });
        Ok(id)
    }

    /// Appends a new floor to the given building. Returns the floor id.
    pub fn add_floor(&mut self, building_id: u64, name: &str) -> Result<u64, StoreError> {
        let name = require("floor name", name)?;
        let id = self.allocate_id();
        let building = self
            .buildings
            .iter_mut()
            .find(|b| b.id == building_id)
            .ok_or(StoreError::BuildingNotFound { id: building_id })?;
        building.floors.push(Floor {
            id,
            name,
            companies: Vec::new(),
        });
        Ok(id)
    }

    /// Appends a new company (with its purchase order) to the given floor.
    pub fn add_company(
        &mut self,
        floor_id: u64,
        name: &str,
        po_number: &str,
        po_value: f64,
        po_date: Option<String>,
    ) -> Result<u64, StoreError> {
        let name = require("company name", name)?;
        let po_number = require("PO number", po_number)?;
        if !po_value.is_finite() || po_value < 0.0 {
            return Err(StoreError::InvalidAmount { value: po_value });
        }
        let id = self.allocate_id();
        let floor = self
            .find_floor_mut(floor_id)
            .ok_or(StoreError::FloorNotFound { id: floor_id })?;
        floor.companies.push(Company {
            id,
            name,
            po_number,
            po_value,
            po_date: po_date.filter(|d| !d.trim().is_empty()),
            invoices: Vec::new(),
        });
        Ok(id)
    }

    /// Appends a new invoice to the given company. The display name and
    /// date are stamped at creation time.
    pub fn add_invoice(
        &mut self,
        company_id: u64,
        value: f64,
        file_ref: Option<PathBuf>,
    ) -> Result<u64, StoreError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(StoreError::InvalidAmount { value });
        }
        let id = self.allocate_id();
        let (name, date) = stamp("Invoice");
        let company = self
            .find_company_mut(company_id)
            .ok_or(StoreError::CompanyNotFound { id: company_id })?;
        company.invoices.push(Invoice {
            id,
            name,
            value,
            date,
            file_ref,
            bills: Vec::new(),
        });
        Ok(id)
    }

    /// Appends a new bill to the given invoice.
    pub fn add_bill(
        &mut self,
        invoice_id: u64,
        value: f64,
        file_ref: Option<PathBuf>,
    ) -> Result<u64, StoreError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(StoreError::InvalidAmount { value });
        }
        let id = self.allocate_id();
        let (name, date) = stamp("Bill");
        let invoice = self
            .find_invoice_mut(invoice_id)
            .ok_or(StoreError::InvoiceNotFound { id: invoice_id })?;
        invoice.bills.push(Bill {
            id,
            name,
            value,
            date,
            file_ref,
        });
        Ok(id)
    }

    /// Removes a building and everything under it. Irreversible; the UI
    /// only reaches this through an explicit confirmation.
    pub fn delete_building(&mut self, building_id: u64) -> Result<(), StoreError> {
        let index = self
            .buildings
            .iter()
            .position(|b| b.id == building_id)
            .ok_or(StoreError::BuildingNotFound { id: building_id })?;
        self.buildings.remove(index);
        Ok(())
    }

    // ---- internals ----

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn find_floor_mut(&mut self, id: u64) -> Option<&mut Floor> {
        self.buildings
            .iter_mut()
            .flat_map(|b| &mut b.floors)
            .find(|f| f.id == id)
    }

    fn find_company_mut(&mut self, id: u64) -> Option<&mut Company> {
        self.buildings
            .iter_mut()
            .flat_map(|b| &mut b.floors)
            .flat_map(|f| &mut f.companies)
            .find(|c| c.id == id)
    }

    fn find_invoice_mut(&mut self, id: u64) -> Option<&mut Invoice> {
        self.buildings
            .iter_mut()
            .flat_map(|b| &mut b.floors)
            .flat_map(|f| &mut f.companies)
            .flat_map(|c| &mut c.invoices)
            .find(|inv| inv.id == id)
    }
}

fn require(field: &'static str, value: &str) -> Result<String, StoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(StoreError::BlankField { field })
    } else {
        Ok(trimmed.to_string())
    }
}

/// Timestamp-derived display name plus the creation date.
fn stamp(kind: &str) -> (String, String) {
    let now = Local::now();
    (
        format!("{kind} {}", now.timestamp()),
        now.format("%Y-%m-%d").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tower_scenario() -> (SiteStore, u64, u64, u64) {
        let mut store = SiteStore::new();
        let tower = store.add_building("Tower A").unwrap();
        let ground = store.add_floor(tower, "Ground").unwrap();
        let acme = store
            .add_company(ground, "Acme", "PO-1", 1000.0, None)
            .unwrap();
        (store, tower, ground, acme)
    }

    #[test]
    fn blank_building_name_is_rejected() {
        let mut store = SiteStore::new();
        assert_eq!(
            store.add_building("   "),
            Err(StoreError::BlankField {
                field: "building name"
            })
        );
        assert_eq!(store.buildings().len(), 0);
    }

    #[test]
    fn building_names_are_trimmed() {
        let mut store = SiteStore::new();
        let id = store.add_building("  Tower A  ").unwrap();
        assert_eq!(store.building(id).unwrap().name, "Tower A");
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut store = SiteStore::new();
        let a = store.add_building("A").unwrap();
        let b = store.add_building("B").unwrap();
        let floor = store.add_floor(b, "F1").unwrap();
        assert!(a < b && b < floor);
    }

    #[test]
    fn add_floor_to_unknown_building_fails() {
        let mut store = SiteStore::new();
        assert_eq!(
            store.add_floor(99, "Ground"),
            Err(StoreError::BuildingNotFound { id: 99 })
        );
    }

    #[test]
    fn invoice_rejects_non_positive_values() {
        let (mut store, _, _, acme) = tower_scenario();
        assert!(store.add_invoice(acme, 0.0, None).is_err());
        assert!(store.add_invoice(acme, -5.0, None).is_err());
        assert!(store.add_invoice(acme, f64::NAN, None).is_err());
        assert_eq!(store.company(acme).unwrap().invoices.len(), 0);
    }

    #[test]
    fn bill_rejects_non_positive_values() {
        let (mut store, _, _, acme) = tower_scenario();
        let invoice = store.add_invoice(acme, 600.0, None).unwrap();
        assert!(store.add_bill(invoice, 0.0, None).is_err());
        assert!(store.add_bill(invoice, -1.0, None).is_err());
        assert_eq!(store.invoice(invoice).unwrap().bills.len(), 0);
    }

    #[test]
    fn company_rejects_negative_po_value() {
        let (mut store, _, ground, _) = tower_scenario();
        assert_eq!(
            store.add_company(ground, "Bad", "PO-2", -1.0, None),
            Err(StoreError::InvalidAmount { value: -1.0 })
        );
        assert_eq!(store.floor(ground).unwrap().companies.len(), 1);
    }

    #[test]
    fn tower_scenario_rolls_up_to_sixty_percent() {
        let (mut store, tower, ground, acme) = tower_scenario();
        let invoice = store.add_invoice(acme, 600.0, None).unwrap();
        store.add_bill(invoice, 600.0, None).unwrap();

        let company = store.company(acme).unwrap();
        assert_eq!(company.total_amount(), 600.0);

        let floor = store.floor(ground).unwrap();
        assert_eq!(floor.total_cost(), 1000.0);
        assert_eq!(floor.paid_amount(), 600.0);
        assert_eq!(floor.payment_percentage(), 60);
        assert_eq!(store.building(tower).unwrap().payment_percentage(), 60);
    }

    #[test]
    fn half_billed_floor_reports_fifty_percent() {
        let mut store = SiteStore::new();
        let tower = store.add_building("Tower B").unwrap();
        let floor = store.add_floor(tower, "Ground").unwrap();
        let first = store
            .add_company(floor, "First Co", "PO-1", 500.0, None)
            .unwrap();
        store
            .add_company(floor, "Second Co", "PO-2", 500.0, None)
            .unwrap();
        let invoice = store.add_invoice(first, 500.0, None).unwrap();
        store.add_bill(invoice, 500.0, None).unwrap();

        assert_eq!(store.floor(floor).unwrap().payment_percentage(), 50);
    }

    #[test]
    fn zero_cost_floor_reports_zero_percent() {
        let mut store = SiteStore::new();
        let tower = store.add_building("Tower A").unwrap();
        let floor = store.add_floor(tower, "Mezzanine").unwrap();
        let company = store
            .add_company(floor, "Free Co", "PO-0", 0.0, None)
            .unwrap();
        let invoice = store.add_invoice(company, 100.0, None).unwrap();
        store.add_bill(invoice, 100.0, None).unwrap();

        let floor = store.floor(floor).unwrap();
        assert!(floor.paid_amount() > 0.0);
        assert_eq!(floor.payment_percentage(), 0);
    }

    #[test]
    fn percentage_rounds_half_away_from_zero() {
        let (mut store, _, ground, acme) = tower_scenario();
        let invoice = store.add_invoice(acme, 335.0, None).unwrap();
        store.add_bill(invoice, 335.0, None).unwrap();
        // 33.5% of the 1000 budget
        assert_eq!(store.floor(ground).unwrap().payment_percentage(), 34);
    }

    #[test]
    fn company_total_is_sum_of_invoice_totals() {
        let (mut store, _, _, acme) = tower_scenario();
        let first = store.add_invoice(acme, 300.0, None).unwrap();
        let second = store.add_invoice(acme, 200.0, None).unwrap();
        store.add_bill(first, 120.0, None).unwrap();
        store.add_bill(first, 80.0, None).unwrap();
        store.add_bill(second, 50.0, None).unwrap();

        let company = store.company(acme).unwrap();
        let by_invoice: f64 = company.invoices.iter().map(Invoice::total).sum();
        assert_eq!(company.total_amount(), by_invoice);
        assert_eq!(company.total_amount(), 250.0);
    }

    #[test]
    fn empty_invoice_totals_zero() {
        let (mut store, _, _, acme) = tower_scenario();
        let invoice = store.add_invoice(acme, 600.0, None).unwrap();
        assert_eq!(store.invoice(invoice).unwrap().total(), 0.0);
    }

    #[test]
    fn deleting_a_building_removes_the_subtree() {
        let (mut store, tower, ground, acme) = tower_scenario();
        let invoice = store.add_invoice(acme, 600.0, None).unwrap();
        let bill = store.add_bill(invoice, 600.0, None).unwrap();

        store.delete_building(tower).unwrap();

        assert!(store.building(tower).is_none());
        assert!(store.floor(ground).is_none());
        assert!(store.company(acme).is_none());
        assert!(store.invoice(invoice).is_none());
        assert_eq!(store.buildings().len(), 0);
        // bill id is gone with its invoice
        assert!(store.invoice(bill).is_none());
    }

    #[test]
    fn deleting_unknown_building_fails() {
        let mut store = SiteStore::new();
        assert_eq!(
            store.delete_building(7),
            Err(StoreError::BuildingNotFound { id: 7 })
        );
    }

    #[test]
    fn sample_store_is_consistent() {
        let store = SiteStore::sample().unwrap();
        assert_eq!(store.buildings().len(), 1);
        let building = &store.buildings()[0];
        assert_eq!(building.floors.len(), 2);
        assert_eq!(building.payment_percentage(), 40); // 600 of 1500
    }
}
