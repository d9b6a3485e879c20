//! Folio Models
//!
//! Charge and payment records for one booking's folio. Both sequences are
//! append-only; totals are always derived by folding the full history.

use serde::{Deserialize, Serialize};

/// Charge category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChargeCategory {
    /// Nightly room rate
    Rate,
    /// Add-on service
    Service,
    /// Manual correction
    Adjustment,
}

/// Folio charge line (append-only)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FolioItem {
    pub id: String,
    pub description: String,
    /// Signed amount in currency unit (positive = owed by guest)
    pub amount: f64,
    pub category: ChargeCategory,
    pub timestamp: i64,
}

/// Payment record (append-only)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub id: String,
    pub amount: f64,
    pub method: String,
    pub timestamp: i64,
}

/// Derived folio totals; recomputed from the full history on every query
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FolioTotals {
    pub total_charges: f64,
    pub total_paid: f64,
    /// total_charges − total_paid
    pub balance: f64,
}
