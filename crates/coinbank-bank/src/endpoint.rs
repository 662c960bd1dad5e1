//! Transfer endpoints
//!
//! [`Input`] is a debit and [`Output`] a credit. They carry the same data and
//! share one validation routine through [`Endpoint`]; the two types exist so
//! that a debit can never be passed where a credit is expected.

use coinbank_types::{Address, BankError, Coins, Result};
use serde::{Deserialize, Serialize};

/// One side of a transfer: an owner and the coins it sends or receives
pub trait Endpoint {
    /// Owner of the coins
    fn address(&self) -> &Address;

    /// Coins debited or credited
    fn coins(&self) -> &Coins;

    /// Check the owner is present and the coins are canonical
    fn validate_basic(&self) -> Result<()> {
        if self.address().is_empty() {
            return Err(BankError::EmptyIdentity);
        }
        self.coins().validate()
    }
}

/// Debit side of a transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    pub address: Address,
    pub coins: Coins,
}

impl Input {
    pub fn new(address: Address, coins: Coins) -> Self {
        Self { address, coins }
    }
}

impl Endpoint for Input {
    fn address(&self) -> &Address {
        &self.address
    }

    fn coins(&self) -> &Coins {
        &self.coins
    }
}

/// Credit side of a transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub address: Address,
    pub coins: Coins,
}

impl Output {
    pub fn new(address: Address, coins: Coins) -> Self {
        Self { address, coins }
    }
}

impl Endpoint for Output {
    fn address(&self) -> &Address {
        &self.address
    }

    fn coins(&self) -> &Coins {
        &self.coins
    }
}
