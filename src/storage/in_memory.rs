use std::collections::HashMap;
use std::collections::hash_map::Entry;

use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::error::StorageError;
use super::traits::{AccountStore, ensure_not_cancelled};
use crate::domain::{Account, AccountStatus, AmountType, Iban, apply_deposit, apply_withdrawal};

/// In-memory ledger guarded by a single reader/writer lock
pub struct InMemoryLedger<A: AmountType> {
    accounts: RwLock<HashMap<Iban, Account<A>>>,
}

impl<A: AmountType> InMemoryLedger<A> {
    /// Create a new empty ledger
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.read().is_empty()
    }
}

impl<A: AmountType> Default for InMemoryLedger<A> {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(iban: &Iban) -> StorageError {
    StorageError::AccountNotFound(iban.clone())
}

#[async_trait]
impl<A: AmountType> AccountStore<A> for InMemoryLedger<A> {
    fn add_account(
        &self,
        token: &CancellationToken,
        account: Account<A>,
    ) -> Result<(), StorageError> {
        ensure_not_cancelled(token)?;

        match self.accounts.write().entry(account.iban().clone()) {
            Entry::Occupied(e) => Err(StorageError::AccountAlreadyExists(e.key().clone())),
            Entry::Vacant(e) => {
                debug!(iban = %account.iban(), status = ?account.status(), "Account added");
                e.insert(account);
                Ok(())
            }
        }
    }

    fn upsert_account(
        &self,
        token: &CancellationToken,
        account: Account<A>,
    ) -> Result<Option<Account<A>>, StorageError> {
        ensure_not_cancelled(token)?;

        let iban = account.iban().clone();
        let replaced = self.accounts.write().insert(iban.clone(), account);
        debug!(%iban, replaced = replaced.is_some(), "Account upserted");
        Ok(replaced)
    }

    fn get_account(
        &self,
        token: &CancellationToken,
        iban: &Iban,
    ) -> Result<Account<A>, StorageError> {
        ensure_not_cancelled(token)?;

        self.accounts
            .read()
            .get(iban)
            .cloned()
            .ok_or_else(|| not_found(iban))
    }

    fn all_accounts(&self, token: &CancellationToken) -> Result<Vec<Account<A>>, StorageError> {
        ensure_not_cancelled(token)?;

        Ok(self.accounts.read().values().cloned().collect())
    }

    fn deposit_funds(
        &self,
        token: &CancellationToken,
        iban: &Iban,
        amount: A,
    ) -> Result<(), StorageError> {
        ensure_not_cancelled(token)?;

        let mut accounts = self.accounts.write();
        let account = accounts.get_mut(iban).ok_or_else(|| not_found(iban))?;
        apply_deposit(account, amount)?;

        debug!(%iban, %amount, balance = %account.balance(), "Deposited funds");
        Ok(())
    }

    fn withdraw_funds(
        &self,
        token: &CancellationToken,
        iban: &Iban,
        amount: A,
    ) -> Result<(), StorageError> {
        ensure_not_cancelled(token)?;

        let mut accounts = self.accounts.write();
        let account = accounts.get_mut(iban).ok_or_else(|| not_found(iban))?;
        apply_withdrawal(account, amount)?;

        debug!(%iban, %amount, balance = %account.balance(), "Withdrew funds");
        Ok(())
    }

    fn set_status(
        &self,
        token: &CancellationToken,
        iban: &Iban,
        status: AccountStatus,
    ) -> Result<(), StorageError> {
        ensure_not_cancelled(token)?;

        let mut accounts = self.accounts.write();
        let account = accounts.get_mut(iban).ok_or_else(|| not_found(iban))?;
        account.set_status(status);

        debug!(%iban, ?status, "Account status changed");
        Ok(())
    }

    fn transfer_funds(
        &self,
        token: &CancellationToken,
        sender: &Iban,
        receiver: &Iban,
        amount: A,
    ) -> Result<(), StorageError> {
        ensure_not_cancelled(token)?;

        let mut accounts = self.accounts.write();

        // Both legs are applied to copies; the map is only touched once both succeed
        let mut debited = accounts.get(sender).cloned().ok_or_else(|| not_found(sender))?;
        apply_withdrawal(&mut debited, amount)?;

        if sender == receiver {
            apply_deposit(&mut debited, amount)?;
            accounts.insert(sender.clone(), debited);
            debug!(%sender, %amount, "Self-transfer applied");
            return Ok(());
        }

        let mut credited = accounts
            .get(receiver)
            .cloned()
            .ok_or_else(|| not_found(receiver))?;
        apply_deposit(&mut credited, amount)?;

        debug!(
            %sender,
            %receiver,
            %amount,
            sender_balance = %debited.balance(),
            receiver_balance = %credited.balance(),
            "Transfer committed"
        );
        accounts.insert(sender.clone(), debited);
        accounts.insert(receiver.clone(), credited);
        Ok(())
    }

    async fn snapshot<W>(&self, token: &CancellationToken, mut writer: W) -> Result<(), StorageError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        // Copy out first; the lock guard must not live across an await
        let mut accounts = self.all_accounts(token)?;
        accounts.sort_by(|a, b| a.iban().cmp(b.iban()));

        for account in &accounts {
            let mut line = serde_json::to_vec(account)?;
            line.push(b'\n');
            writer.write_all(&line).await?;
        }

        writer.flush().await?;
        Ok(())
    }
}
