//! # Site Ledger
//!
//! A terminal-based ledger for construction purchase-order tracking.
//!
//! ## Features
//!
//! - Buildings, floors, companies, invoices and bills in one record tree
//! - Payment rollups (invoiced amount vs. PO value) at every level
//! - Add records through in-terminal forms
//! - Export the final report to CSV and JSON
//!
//! ## Example
//!
//! ```
//! use site_ledger::store::SiteStore;
//!
//! let mut store = SiteStore::new();
//! let id = store.add_building("Tower A").expect("valid name");
//! let building = store.building(id).expect("just added");
//! println!("Building: {}", building.name);
//! println!("Paid: {}%", building.payment_percentage());
//! ```

pub mod error;
pub mod export;
pub mod model;
pub mod store;
pub mod ui;
