use serde::{Deserialize, Serialize};

use super::amount::AmountType;
use super::iban::Iban;

/// A request to move `amount` from `sender` to `receiver`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(serialize = "", deserialize = ""))]
pub struct TransferRequest<A: AmountType> {
    #[serde(rename = "sender_IBAN")]
    pub sender: Iban,
    #[serde(rename = "receiver_IBAN")]
    pub receiver: Iban,
    pub amount: A,
}

impl<A: AmountType> TransferRequest<A> {
    pub fn new(sender: impl Into<Iban>, receiver: impl Into<Iban>, amount: A) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
            amount,
        }
    }
}
