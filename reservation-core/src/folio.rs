//! Folio Ledger
//!
//! Append-only charges and payments for one booking. Totals are always a
//! fold over the full history, never a running counter that can drift.
//! Closing requires a settled balance and freezes the ledger.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{ChargeCategory, FolioItem, FolioTotals, Payment};
use shared::util::now_millis;
use thiserror::Error;

use crate::money::{self, is_settled, to_decimal, to_f64};

/// Ledger errors. All recoverable: `BalancePending` clears once the guest
/// pays, `InvalidAmount` and `FolioClosed` are caller mistakes.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LedgerError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("folio balance pending: {balance:.2} outstanding")]
    BalancePending { balance: f64 },

    #[error("folio is closed")]
    FolioClosed,
}

/// Per-booking ledger
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Folio {
    items: Vec<FolioItem>,
    payments: Vec<Payment>,
    closed: bool,
}

impl Folio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn items(&self) -> &[FolioItem] {
        &self.items
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    /// Append a charge. Rejected when the ledger is closed or the amount is
    /// not a positive, bounded, finite number.
    pub fn add_charge(
        &mut self,
        description: impl Into<String>,
        amount: f64,
        category: ChargeCategory,
    ) -> Result<String, LedgerError> {
        if self.closed {
            return Err(LedgerError::FolioClosed);
        }
        money::validate_charge(amount)?;

        let id = uuid::Uuid::new_v4().to_string();
        self.items.push(FolioItem {
            id: id.clone(),
            description: description.into(),
            amount,
            category,
            timestamp: now_millis(),
        });
        Ok(id)
    }

    /// Append a payment. Same validation and closed-ledger rules as charges.
    pub fn add_payment(
        &mut self,
        amount: f64,
        method: impl Into<String>,
    ) -> Result<String, LedgerError> {
        if self.closed {
            return Err(LedgerError::FolioClosed);
        }
        money::validate_payment(amount)?;

        let id = uuid::Uuid::new_v4().to_string();
        self.payments.push(Payment {
            id: id.clone(),
            amount,
            method: method.into(),
            timestamp: now_millis(),
        });
        Ok(id)
    }

    fn balance(&self) -> Decimal {
        let charges: Decimal = self.items.iter().map(|i| to_decimal(i.amount)).sum();
        let paid: Decimal = self.payments.iter().map(|p| to_decimal(p.amount)).sum();
        charges - paid
    }

    /// Derived totals, folded from the full item/payment history
    pub fn totals(&self) -> FolioTotals {
        let charges: Decimal = self.items.iter().map(|i| to_decimal(i.amount)).sum();
        let paid: Decimal = self.payments.iter().map(|p| to_decimal(p.amount)).sum();
        FolioTotals {
            total_charges: to_f64(charges),
            total_paid: to_f64(paid),
            balance: to_f64(charges - paid),
        }
    }

    /// Close the ledger. Permitted only when the balance is settled (zero or
    /// in credit, within tolerance); afterwards the ledger is read-only.
    /// Retryable: a rejected close succeeds once the balance is paid off.
    pub fn close(&mut self) -> Result<(), LedgerError> {
        if self.closed {
            return Err(LedgerError::FolioClosed);
        }
        let balance = self.balance();
        if !is_settled(balance) {
            return Err(LedgerError::BalancePending {
                balance: to_f64(balance),
            });
        }
        self.closed = true;
        Ok(())
    }
}
