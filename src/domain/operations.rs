use super::account::Account;
use super::amount::AmountType;
use super::error::DomainError;

/// Apply a deposit to an account
pub fn apply_deposit<A: AmountType>(
    account: &mut Account<A>,
    amount: A,
) -> Result<(), DomainError> {
    // Status is checked first so a disabled account reports blocked for any amount
    if !account.is_active() {
        return Err(DomainError::AccountBlocked);
    }

    if !amount.is_positive() {
        return Err(DomainError::InvalidAmount);
    }

    let new_balance = account
        .balance()
        .checked_add(amount)
        .ok_or(DomainError::Overflow)?;

    account.set_balance(new_balance);
    Ok(())
}

/// Apply a withdrawal to an account; the balance never goes negative
pub fn apply_withdrawal<A: AmountType>(
    account: &mut Account<A>,
    amount: A,
) -> Result<(), DomainError> {
    if !account.is_active() {
        return Err(DomainError::AccountBlocked);
    }

    if !amount.is_positive() {
        return Err(DomainError::InvalidAmount);
    }

    if account.balance() < amount {
        return Err(DomainError::InsufficientFunds);
    }

    let new_balance = account
        .balance()
        .checked_sub(amount)
        .ok_or(DomainError::Overflow)?;

    account.set_balance(new_balance);
    Ok(())
}
