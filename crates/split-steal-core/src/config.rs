//! Deployment configuration.

use ledger_core::{Address, AddressParseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Seconds between game creation and the earliest expiration settlement
pub const DEFAULT_EXPIRATION_WINDOW_SECS: u64 = 3600;

pub const OPERATOR_ENV: &str = "SPLIT_STEAL_OPERATOR";
pub const ESCROW_ENV: &str = "SPLIT_STEAL_ESCROW";
pub const EXPIRATION_ENV: &str = "SPLIT_STEAL_EXPIRATION_SECS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid address in {var}: {source}")]
    InvalidAddress {
        var: &'static str,
        source: AddressParseError,
    },

    #[error("Invalid number in {var}: {value}")]
    InvalidNumber { var: &'static str, value: String },
}

/// Fixed identities and timing for one deployment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// The only address allowed to create games
    pub operator: Address,
    /// Ledger account custodying every undistributed prize pool
    pub escrow: Address,
    pub expiration_window_secs: u64,
}

impl GameConfig {
    pub fn new(operator: Address, escrow: Address) -> Self {
        Self {
            operator,
            escrow,
            expiration_window_secs: DEFAULT_EXPIRATION_WINDOW_SECS,
        }
    }

    pub fn with_expiration_window(mut self, secs: u64) -> Self {
        self.expiration_window_secs = secs;
        self
    }

    /// Load from `SPLIT_STEAL_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let address = |var: &'static str| -> Result<Address, ConfigError> {
            let value = lookup(var).ok_or(ConfigError::Missing(var))?;
            value
                .parse()
                .map_err(|source| ConfigError::InvalidAddress { var, source })
        };

        let config = Self::new(address(OPERATOR_ENV)?, address(ESCROW_ENV)?);

        match lookup(EXPIRATION_ENV) {
            Some(value) => {
                let secs = value.parse().map_err(|_| ConfigError::InvalidNumber {
                    var: EXPIRATION_ENV,
                    value,
                })?;
                Ok(config.with_expiration_window(secs))
            }
            None => Ok(config),
        }
    }
}
