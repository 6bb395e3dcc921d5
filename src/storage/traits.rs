use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::AsyncWrite;
use tokio_util::sync::CancellationToken;

use super::error::StorageError;
use crate::domain::{Account, AccountStatus, AmountType, DomainError, Iban};

/// Fail fast if the caller has already cancelled
pub fn ensure_not_cancelled(token: &CancellationToken) -> Result<(), StorageError> {
    if token.is_cancelled() {
        return Err(StorageError::Cancelled);
    }
    Ok(())
}

/// Authoritative mapping from identifier to account.
///
/// Every operation checks `token` once before touching state and never
/// again mid-operation. Implementations must serialize writers against each
/// other and against readers.
#[async_trait]
pub trait AccountStore<A: AmountType>: Send + Sync {
    /// Insert a new account; fails if the identifier is already taken
    fn add_account(&self, token: &CancellationToken, account: Account<A>)
    -> Result<(), StorageError>;

    /// Insert or replace an account, returning the replaced one
    fn upsert_account(
        &self,
        token: &CancellationToken,
        account: Account<A>,
    ) -> Result<Option<Account<A>>, StorageError>;

    /// Copy of the account stored under `iban`
    fn get_account(&self, token: &CancellationToken, iban: &Iban)
    -> Result<Account<A>, StorageError>;

    /// Snapshot of every account, in no particular order
    fn all_accounts(&self, token: &CancellationToken) -> Result<Vec<Account<A>>, StorageError>;

    fn deposit_funds(
        &self,
        token: &CancellationToken,
        iban: &Iban,
        amount: A,
    ) -> Result<(), StorageError>;

    fn withdraw_funds(
        &self,
        token: &CancellationToken,
        iban: &Iban,
        amount: A,
    ) -> Result<(), StorageError>;

    fn set_status(
        &self,
        token: &CancellationToken,
        iban: &Iban,
        status: AccountStatus,
    ) -> Result<(), StorageError>;

    /// Move `amount` from `sender` to `receiver`: both legs are applied or neither is
    fn transfer_funds(
        &self,
        token: &CancellationToken,
        sender: &Iban,
        receiver: &Iban,
        amount: A,
    ) -> Result<(), StorageError>;

    /// Write every account as one JSON object per line
    async fn snapshot<W>(&self, token: &CancellationToken, writer: W) -> Result<(), StorageError>
    where
        W: AsyncWrite + Unpin + Send;

    /// Sum of all balances
    fn total_balance(&self, token: &CancellationToken) -> Result<A, StorageError> {
        self.all_accounts(token)?
            .iter()
            .try_fold(A::zero(), |sum, account| sum.checked_add(account.balance()))
            .ok_or(StorageError::DomainError(DomainError::Overflow))
    }
}

// Shared stores are handed around as Arc<S>
#[async_trait]
impl<A: AmountType, S: AccountStore<A>> AccountStore<A> for Arc<S> {
    fn add_account(
        &self,
        token: &CancellationToken,
        account: Account<A>,
    ) -> Result<(), StorageError> {
        (**self).add_account(token, account)
    }

    fn upsert_account(
        &self,
        token: &CancellationToken,
        account: Account<A>,
    ) -> Result<Option<Account<A>>, StorageError> {
        (**self).upsert_account(token, account)
    }

    fn get_account(
        &self,
        token: &CancellationToken,
        iban: &Iban,
    ) -> Result<Account<A>, StorageError> {
        (**self).get_account(token, iban)
    }

    fn all_accounts(&self, token: &CancellationToken) -> Result<Vec<Account<A>>, StorageError> {
        (**self).all_accounts(token)
    }

    fn deposit_funds(
        &self,
        token: &CancellationToken,
        iban: &Iban,
        amount: A,
    ) -> Result<(), StorageError> {
        (**self).deposit_funds(token, iban, amount)
    }

    fn withdraw_funds(
        &self,
        token: &CancellationToken,
        iban: &Iban,
        amount: A,
    ) -> Result<(), StorageError> {
        (**self).withdraw_funds(token, iban, amount)
    }

    fn set_status(
        &self,
        token: &CancellationToken,
        iban: &Iban,
        status: AccountStatus,
    ) -> Result<(), StorageError> {
        (**self).set_status(token, iban, status)
    }

    fn transfer_funds(
        &self,
        token: &CancellationToken,
        sender: &Iban,
        receiver: &Iban,
        amount: A,
    ) -> Result<(), StorageError> {
        (**self).transfer_funds(token, sender, receiver, amount)
    }

    async fn snapshot<W>(&self, token: &CancellationToken, writer: W) -> Result<(), StorageError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        (**self).snapshot(token, writer).await
    }

    fn total_balance(&self, token: &CancellationToken) -> Result<A, StorageError> {
        (**self).total_balance(token)
    }
}
