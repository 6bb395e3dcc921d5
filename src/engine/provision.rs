use rand::Rng;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::domain::{Account, AmountType, Iban};
use crate::storage::{AccountStore, StorageError};

/// Upper bound on identifier regeneration when a fresh IBAN collides
pub const MAX_OPEN_ATTEMPTS: usize = 16;

/// Identifiers of the two well-known accounts every ledger starts with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemAccounts {
    /// Receives newly issued funds
    pub issuance: Iban,
    /// Receives funds taken out of circulation
    pub destruction: Iban,
}

/// Create the issuance and destruction accounts with zero balance.
///
/// Accounts that already exist are kept as they are, so calling this twice
/// is harmless.
pub fn provision_system_accounts<A, S>(
    store: &S,
    token: &CancellationToken,
    system: &SystemAccounts,
) -> Result<(), StorageError>
where
    A: AmountType,
    S: AccountStore<A>,
{
    for iban in [&system.issuance, &system.destruction] {
        match store.add_account(token, Account::new(iban.clone())) {
            Ok(()) => info!(%iban, "System account provisioned"),
            Err(StorageError::AccountAlreadyExists(_)) => {
                debug!(%iban, "System account already present")
            }
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

/// Open a zero-balance active account under a freshly generated identifier
pub fn open_account<A, S, R>(
    store: &S,
    token: &CancellationToken,
    country_code: &str,
    rng: &mut R,
) -> Result<Iban, StorageError>
where
    A: AmountType,
    S: AccountStore<A>,
    R: Rng,
{
    let mut iban = Iban::generate(country_code, rng);

    for attempt in 1..=MAX_OPEN_ATTEMPTS {
        match store.add_account(token, Account::new(iban.clone())) {
            Ok(()) => {
                info!(%iban, "Account opened");
                return Ok(iban);
            }
            Err(StorageError::AccountAlreadyExists(_)) if attempt < MAX_OPEN_ATTEMPTS => {
                debug!(%iban, attempt, "Generated IBAN collided, retrying");
                iban = Iban::generate(country_code, rng);
            }
            Err(err) => return Err(err),
        }
    }

    Err(StorageError::AccountAlreadyExists(iban))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccountStatus, FixedPoint};
    use crate::storage::InMemoryLedger;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn system() -> SystemAccounts {
        SystemAccounts {
            issuance: Iban::from("BY20OLMP31350000001000000933"),
            destruction: Iban::from("BY87MTBK38190000000000353409"),
        }
    }

    #[test]
    fn provisions_both_system_accounts() {
        let ledger = InMemoryLedger::<FixedPoint>::new();
        let token = CancellationToken::new();

        provision_system_accounts(&ledger, &token, &system()).unwrap();

        for iban in [system().issuance, system().destruction] {
            let account = ledger.get_account(&token, &iban).unwrap();
            assert_eq!(account.balance(), FixedPoint::zero());
            assert_eq!(account.status(), AccountStatus::Active);
        }
    }

    #[test]
    fn provisioning_twice_keeps_balances() {
        let ledger = InMemoryLedger::<FixedPoint>::new();
        let token = CancellationToken::new();
        provision_system_accounts(&ledger, &token, &system()).unwrap();
        ledger
            .deposit_funds(&token, &system().issuance, FixedPoint::from_raw(50_000))
            .unwrap();

        provision_system_accounts(&ledger, &token, &system()).unwrap();

        assert_eq!(ledger.len(), 2);
        assert_eq!(
            ledger.get_account(&token, &system().issuance).unwrap().balance(),
            FixedPoint::from_raw(50_000)
        );
    }

    #[test]
    fn provisioning_respects_cancellation() {
        let ledger = InMemoryLedger::<FixedPoint>::new();
        let token = CancellationToken::new();
        token.cancel();

        let result = provision_system_accounts(&ledger, &token, &system());

        assert!(matches!(result, Err(StorageError::Cancelled)));
        assert!(ledger.is_empty());
    }

    #[test]
    fn open_account_registers_well_formed_iban() {
        let ledger = InMemoryLedger::<FixedPoint>::new();
        let token = CancellationToken::new();
        let mut rng = StdRng::seed_from_u64(1);

        let iban = open_account(&ledger, &token, "BY", &mut rng).unwrap();

        assert!(iban.is_well_formed());
        assert!(iban.as_str().starts_with("BY"));
        let account = ledger.get_account(&token, &iban).unwrap();
        assert_eq!(account.balance(), FixedPoint::zero());
        assert!(account.is_active());
    }

    #[test]
    fn open_account_regenerates_on_collision() {
        let ledger = InMemoryLedger::<FixedPoint>::new();
        let token = CancellationToken::new();

        // Occupy the identifier the seeded generator produces first
        let taken = Iban::generate("BY", &mut StdRng::seed_from_u64(9));
        ledger.add_account(&token, Account::new(taken.clone())).unwrap();

        let iban = open_account(&ledger, &token, "BY", &mut StdRng::seed_from_u64(9)).unwrap();

        assert_ne!(iban, taken);
        assert_eq!(ledger.len(), 2);
    }
}
