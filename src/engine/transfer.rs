use std::marker::PhantomData;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::error::EngineError;
use crate::domain::{Account, AmountType, Iban, TransferRequest};
use crate::io::decode_transfer;
use crate::storage::AccountStore;

/// Transfer engine orchestrating ledger operations over a store
pub struct TransferEngine<A, S>
where
    A: AmountType,
    S: AccountStore<A>,
{
    store: S,
    _phantom: PhantomData<A>,
}

impl<A, S> TransferEngine<A, S>
where
    A: AmountType,
    S: AccountStore<A>,
{
    /// Create a new engine over the given store
    pub fn new(store: S) -> Self {
        Self {
            store,
            _phantom: PhantomData,
        }
    }

    /// Get reference to the store for direct reads and snapshots
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Move `amount` from `sender` to `receiver` as one step.
    ///
    /// Either both balances change or neither does. Cancellation is checked
    /// once, before anything is read.
    pub fn transfer_funds(
        &self,
        token: &CancellationToken,
        sender: &Iban,
        receiver: &Iban,
        amount: A,
    ) -> Result<(), EngineError> {
        if token.is_cancelled() {
            return Err(EngineError::Cancelled);
        }

        debug!(%sender, %receiver, %amount, "Processing transfer");

        self.store
            .transfer_funds(token, sender, receiver, amount)
            .map_err(|err| {
                warn!(%sender, %receiver, %amount, error = %err, "Transfer rejected");
                EngineError::from(err)
            })
    }

    /// Apply an already decoded transfer request
    pub fn execute(
        &self,
        token: &CancellationToken,
        request: &TransferRequest<A>,
    ) -> Result<(), EngineError> {
        self.transfer_funds(token, &request.sender, &request.receiver, request.amount)
    }

    /// Decode a JSON transfer request and apply it
    pub fn transfer_funds_via_payload(
        &self,
        token: &CancellationToken,
        payload: &[u8],
    ) -> Result<(), EngineError> {
        if token.is_cancelled() {
            return Err(EngineError::Cancelled);
        }

        let request = decode_transfer::<A>(payload).map_err(|err| {
            warn!(error = %err, "Undecodable transfer payload");
            EngineError::from(err)
        })?;

        self.execute(token, &request)
    }

    pub fn deposit_funds(
        &self,
        token: &CancellationToken,
        iban: &Iban,
        amount: A,
    ) -> Result<(), EngineError> {
        Ok(self.store.deposit_funds(token, iban, amount)?)
    }

    pub fn withdraw_funds(
        &self,
        token: &CancellationToken,
        iban: &Iban,
        amount: A,
    ) -> Result<(), EngineError> {
        Ok(self.store.withdraw_funds(token, iban, amount)?)
    }

    pub fn get_account(
        &self,
        token: &CancellationToken,
        iban: &Iban,
    ) -> Result<Account<A>, EngineError> {
        Ok(self.store.get_account(token, iban)?)
    }

    pub fn all_accounts(&self, token: &CancellationToken) -> Result<Vec<Account<A>>, EngineError> {
        Ok(self.store.all_accounts(token)?)
    }
}
