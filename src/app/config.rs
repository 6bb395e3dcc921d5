//! Ledger configuration.
//!
//! Values are resolved in three layers: built-in defaults, then the YAML
//! file named by `CONFIG_PATH` (if set), then individual environment
//! overrides. The result is validated once before use.

use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::Iban;
use crate::domain::iban::is_country_code;
use crate::engine::SystemAccounts;

pub const CONFIG_PATH_VAR: &str = "CONFIG_PATH";
pub const COUNTRY_CODE_VAR: &str = "LEDGER_COUNTRY_CODE";
pub const ISSUANCE_IBAN_VAR: &str = "LEDGER_ISSUANCE_IBAN";
pub const DESTRUCTION_IBAN_VAR: &str = "LEDGER_DESTRUCTION_IBAN";

const DEFAULT_COUNTRY_CODE: &str = "BY";
const DEFAULT_ISSUANCE_IBAN: &str = "BY20OLMP31350000001000000933";
const DEFAULT_DESTRUCTION_IBAN: &str = "BY87MTBK38190000000000353409";

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Static settings the ledger needs at start-up
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Country code used when generating new identifiers
    pub country_code: String,
    #[serde(rename = "state_account_IBAN")]
    pub issuance_iban: Iban,
    #[serde(rename = "destruction_account_IBAN")]
    pub destruction_iban: Iban,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            issuance_iban: Iban::from(DEFAULT_ISSUANCE_IBAN),
            destruction_iban: Iban::from(DEFAULT_DESTRUCTION_IBAN),
        }
    }
}

impl LedgerConfig {
    /// Load from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| env::var(key).ok())
    }

    /// Load using `lookup` in place of the process environment
    pub fn load_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_PATH_VAR).filter(|p| !p.is_empty()) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(code) = lookup(COUNTRY_CODE_VAR) {
            config.country_code = code;
        }
        if let Some(iban) = lookup(ISSUANCE_IBAN_VAR) {
            config.issuance_iban = Iban::from(iban);
        }
        if let Some(iban) = lookup(DESTRUCTION_IBAN_VAR) {
            config.destruction_iban = Iban::from(iban);
        }

        config.validate()?;
        Ok(config)
    }

    /// Read a YAML file; keys it omits keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_country_code(self.country_code.as_bytes()) {
            return Err(ConfigError::Invalid(format!(
                "country code must be two uppercase letters, got {:?}",
                self.country_code
            )));
        }

        for (name, iban) in [
            ("issuance", &self.issuance_iban),
            ("destruction", &self.destruction_iban),
        ] {
            if iban.as_str().trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{name} account IBAN is empty")));
            }
        }

        if self.issuance_iban == self.destruction_iban {
            return Err(ConfigError::Invalid(format!(
                "issuance and destruction accounts share IBAN {}",
                self.issuance_iban
            )));
        }

        Ok(())
    }

    pub fn system_accounts(&self) -> SystemAccounts {
        SystemAccounts {
            issuance: self.issuance_iban.clone(),
            destruction: self.destruction_iban.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn yaml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_environment() {
        let config = LedgerConfig::load_with(lookup_from(&[])).unwrap();

        assert_eq!(config, LedgerConfig::default());
        assert_eq!(config.country_code, "BY");
        assert!(config.issuance_iban.is_well_formed());
        assert!(config.destruction_iban.is_well_formed());
    }

    #[test]
    fn yaml_file_overrides_defaults() {
        let file = yaml_file(
            "country_code: DE\nstate_account_IBAN: DE00ISSU00000000000000000001\n",
        );
        let path = file.path().to_str().unwrap().to_string();

        let config = LedgerConfig::load_with(lookup_from(&[(CONFIG_PATH_VAR, &path)])).unwrap();

        assert_eq!(config.country_code, "DE");
        assert_eq!(config.issuance_iban.as_str(), "DE00ISSU00000000000000000001");
        assert_eq!(config.destruction_iban.as_str(), DEFAULT_DESTRUCTION_IBAN);
    }

    #[test]
    fn environment_overrides_file() {
        let file = yaml_file("country_code: DE\n");
        let path = file.path().to_str().unwrap().to_string();

        let config = LedgerConfig::load_with(lookup_from(&[
            (CONFIG_PATH_VAR, &path),
            (COUNTRY_CODE_VAR, "PL"),
            (DESTRUCTION_IBAN_VAR, "PL00BURN00000000000000000001"),
        ]))
        .unwrap();

        assert_eq!(config.country_code, "PL");
        assert_eq!(config.destruction_iban.as_str(), "PL00BURN00000000000000000001");
    }

    #[test]
    fn empty_file_yields_defaults() {
        let file = yaml_file("   \n");

        assert_eq!(LedgerConfig::from_file(file.path()).unwrap(), LedgerConfig::default());
    }

    #[test]
    fn missing_file_is_read_error() {
        let result = LedgerConfig::load_with(lookup_from(&[(
            CONFIG_PATH_VAR,
            "/definitely/not/here/ledger.yaml",
        )]));

        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn malformed_yaml_is_parse_error() {
        let file = yaml_file("country_code: [unterminated\n");

        assert!(matches!(
            LedgerConfig::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn invalid_country_code_is_rejected() {
        let result = LedgerConfig::load_with(lookup_from(&[(COUNTRY_CODE_VAR, "Belarus")]));

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn shared_system_iban_is_rejected() {
        let result = LedgerConfig::load_with(lookup_from(&[(
            DESTRUCTION_IBAN_VAR,
            DEFAULT_ISSUANCE_IBAN,
        )]));

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn system_accounts_mirror_config() {
        let config = LedgerConfig::default();
        let system = config.system_accounts();

        assert_eq!(system.issuance, config.issuance_iban);
        assert_eq!(system.destruction, config.destruction_iban);
    }
}
