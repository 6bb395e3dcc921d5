use serde::{Deserialize, Serialize};

use super::amount::AmountType;
use super::iban::Iban;

/// Whether an account accepts funds movements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountStatus {
    Active,
    Disabled,
}

/// Ledger account with private fields enforcing invariants
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account<A: AmountType> {
    #[serde(rename = "IBAN")]
    iban: Iban,
    balance: A,
    status: AccountStatus,
}

impl<A: AmountType> Account<A> {
    /// Create a new active account with zero balance
    pub fn new(iban: Iban) -> Self {
        Self::with_balance(iban, A::zero(), AccountStatus::Active)
    }

    /// Create an account with an opening balance and status
    pub fn with_balance(iban: Iban, balance: A, status: AccountStatus) -> Self {
        Self {
            iban,
            balance,
            status,
        }
    }

    pub fn iban(&self) -> &Iban {
        &self.iban
    }

    pub fn balance(&self) -> A {
        self.balance
    }

    pub fn status(&self) -> AccountStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    // Internal mutation methods for use by operations and storage
    pub(crate) fn set_balance(&mut self, amount: A) {
        self.balance = amount;
    }

    pub(crate) fn set_status(&mut self, status: AccountStatus) {
        self.status = status;
    }
}
