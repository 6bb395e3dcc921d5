use super::error::IoError;
use crate::domain::{Account, AmountType, TransferRequest};

/// Decode a `{"sender_IBAN", "receiver_IBAN", "amount"}` payload
pub fn decode_transfer<A: AmountType>(payload: &[u8]) -> Result<TransferRequest<A>, IoError> {
    Ok(serde_json::from_slice(payload)?)
}

/// Render an account as a single-line JSON object
pub fn encode_account<A: AmountType>(account: &Account<A>) -> Result<String, IoError> {
    Ok(serde_json::to_string(account)?)
}
