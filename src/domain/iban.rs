use std::borrow::Borrow;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

const CHECK_DIGITS: usize = 2;
const BANK_CODE_LEN: usize = 4;
const ACCOUNT_NUMBER_LEN: usize = 20;

/// Account identifier in IBAN shape: `CC` + 2 check digits + 4-letter bank
/// code + 20-digit account number.
///
/// The ledger keys accounts by this value but never requires it to be
/// well-formed; lookups of malformed identifiers simply miss.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Iban(String);

impl Iban {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generate a fresh identifier for the given country code
    pub fn generate<R: Rng>(country_code: &str, rng: &mut R) -> Self {
        let mut value = String::with_capacity(
            country_code.len() + CHECK_DIGITS + BANK_CODE_LEN + ACCOUNT_NUMBER_LEN,
        );
        value.push_str(country_code);
        value.push_str(&format!("{:02}", rng.gen_range(0..100)));
        value.extend((0..BANK_CODE_LEN).map(|_| char::from(rng.gen_range(b'A'..=b'Z'))));
        value.extend((0..ACCOUNT_NUMBER_LEN).map(|_| char::from(rng.gen_range(b'0'..=b'9'))));
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check the generated shape, with a two-letter country code
    pub fn is_well_formed(&self) -> bool {
        let bytes = self.0.as_bytes();
        if bytes.len() != 2 + CHECK_DIGITS + BANK_CODE_LEN + ACCOUNT_NUMBER_LEN {
            return false;
        }

        let (country, rest) = bytes.split_at(2);
        let (check, rest) = rest.split_at(CHECK_DIGITS);
        let (bank, account) = rest.split_at(BANK_CODE_LEN);

        is_country_code(country)
            && check.iter().all(u8::is_ascii_digit)
            && bank.iter().all(u8::is_ascii_uppercase)
            && account.iter().all(u8::is_ascii_digit)
    }
}

/// Two ASCII uppercase letters
pub fn is_country_code(code: &[u8]) -> bool {
    code.len() == 2 && code.iter().all(u8::is_ascii_uppercase)
}

impl fmt::Display for Iban {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Iban {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Iban {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for Iban {
    fn borrow(&self) -> &str {
        &self.0
    }
}
