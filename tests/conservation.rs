use ledger::prelude::*;
use proptest::prelude::*;
use tokio_util::sync::CancellationToken;

const ACCOUNTS: usize = 4;

fn iban(index: usize) -> Iban {
    Iban::from(format!("BY{index:02}TEST{index:020}"))
}

fn ledger_with(balances: &[i64]) -> InMemoryLedger<FixedPoint> {
    let token = CancellationToken::new();
    let ledger = InMemoryLedger::new();
    for (index, &raw) in balances.iter().enumerate() {
        ledger
            .add_account(
                &token,
                Account::with_balance(iban(index), FixedPoint::from_raw(raw), AccountStatus::Active),
            )
            .unwrap();
    }
    ledger
}

proptest! {
    #[test]
    fn transfers_conserve_total(
        balances in prop::collection::vec(0i64..10_000_000, ACCOUNTS),
        transfers in prop::collection::vec((0..ACCOUNTS, 0..ACCOUNTS, -1_000i64..5_000_000), 0..64),
    ) {
        let ledger = ledger_with(&balances);
        let token = CancellationToken::new();
        let total = ledger.total_balance(&token).unwrap();

        for (from, to, raw) in transfers {
            let before_from = ledger.get_account(&token, &iban(from)).unwrap().balance();
            let before_to = ledger.get_account(&token, &iban(to)).unwrap().balance();
            let amount = FixedPoint::from_raw(raw);

            match ledger.transfer_funds(&token, &iban(from), &iban(to), amount) {
                Ok(()) if from != to => {
                    prop_assert_eq!(ledger.get_account(&token, &iban(from)).unwrap().balance(), before_from - amount);
                    prop_assert_eq!(ledger.get_account(&token, &iban(to)).unwrap().balance(), before_to + amount);
                }
                Ok(()) => {
                    prop_assert_eq!(ledger.get_account(&token, &iban(from)).unwrap().balance(), before_from);
                }
                Err(_) => {
                    prop_assert_eq!(ledger.get_account(&token, &iban(from)).unwrap().balance(), before_from);
                    prop_assert_eq!(ledger.get_account(&token, &iban(to)).unwrap().balance(), before_to);
                }
            }

            prop_assert_eq!(ledger.total_balance(&token).unwrap(), total);
        }
    }

    #[test]
    fn overdraw_never_changes_balance(balance in 0i64..1_000_000, excess in 1i64..1_000_000) {
        let ledger = ledger_with(&[balance]);
        let token = CancellationToken::new();

        let result = ledger.withdraw_funds(&token, &iban(0), FixedPoint::from_raw(balance + excess));

        let err = result.unwrap_err();
        prop_assert_eq!(err.domain(), Some(&DomainError::InsufficientFunds));
        prop_assert_eq!(ledger.get_account(&token, &iban(0)).unwrap().balance(), FixedPoint::from_raw(balance));
    }
}
