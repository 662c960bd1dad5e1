//! Validation limits
//!
//! Bounds on message size applied before structural validation. A limit of
//! `0` disables that check.

use coinbank_types::{BankError, Coins, Result, Side};
use serde::{Deserialize, Serialize};

use crate::Endpoint;

/// Size limits for incoming messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankConfig {
    /// Maximum inputs, and separately outputs, per message
    #[serde(default = "default_max_endpoints")]
    pub max_endpoints: usize,

    /// Maximum entries in a single coin bundle
    #[serde(default = "default_max_denoms")]
    pub max_denoms: usize,
}

fn default_max_endpoints() -> usize {
    64
}

fn default_max_denoms() -> usize {
    32
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            max_endpoints: default_max_endpoints(),
            max_denoms: default_max_denoms(),
        }
    }
}

impl BankConfig {
    /// No limits at all
    pub fn unlimited() -> Self {
        Self {
            max_endpoints: 0,
            max_denoms: 0,
        }
    }

    /// Check one side of a message against the limits
    pub fn check_side<E: Endpoint>(&self, side: Side, endpoints: &[E]) -> Result<()> {
        if self.max_endpoints != 0 && endpoints.len() > self.max_endpoints {
            return Err(BankError::TooManyEndpoints {
                side,
                count: endpoints.len(),
                limit: self.max_endpoints,
            });
        }
        for (index, endpoint) in endpoints.iter().enumerate() {
            self.check_coins(endpoint.coins())
                .map_err(|e| BankError::at(side, index, e))?;
        }
        Ok(())
    }

    /// Check a single bundle against the denomination limit
    pub fn check_coins(&self, coins: &Coins) -> Result<()> {
        if self.max_denoms != 0 && coins.len() > self.max_denoms {
            return Err(BankError::TooManyDenoms {
                count: coins.len(),
                limit: self.max_denoms,
            });
        }
        Ok(())
    }
}
