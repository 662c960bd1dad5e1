//! Error types for Coinbank
//!
//! Every rejection is explicit: nothing is silently corrected or defaulted.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for Coinbank operations
pub type Result<T> = std::result::Result<T, BankError>;

/// Which side of a transfer an endpoint sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Debit side
    Input,
    /// Credit side
    Output,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Output => write!(f, "output"),
        }
    }
}

/// Coinbank error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankError {
    // ========================================================================
    // Identity Errors
    // ========================================================================

    /// An owner field is empty
    #[error("Empty address")]
    EmptyIdentity,

    /// An address could not be decoded
    #[error("Invalid address {input}: {reason}")]
    InvalidAddress { input: String, reason: String },

    // ========================================================================
    // Coin Errors
    // ========================================================================

    /// A bundle has no entries where one was required
    #[error("Empty coins")]
    EmptyBundle,

    /// An entry's amount is zero or negative
    #[error("Non-positive amount {amount} for denomination {denom}")]
    NonPositiveAmount { denom: String, amount: i64 },

    /// Entries are out of order or a denomination repeats
    #[error("Unsorted or duplicate denomination: {denom} after {previous}")]
    UnsortedOrDuplicateDenomination { previous: String, denom: String },

    /// Summation overflowed the amount type
    #[error("Amount overflow for denomination {denom}")]
    AmountOverflow { denom: String },

    /// A textual coin list could not be parsed
    #[error("Invalid coin string {input:?}: {reason}")]
    InvalidCoinString { input: String, reason: String },

    // ========================================================================
    // Message Errors
    // ========================================================================

    /// Send message without inputs
    #[error("No inputs")]
    NoInputs,

    /// Message without outputs
    #[error("No outputs")]
    NoOutputs,

    /// A single endpoint failed validation
    #[error("Invalid {side} #{index}: {source}")]
    InvalidEndpoint {
        side: Side,
        index: usize,
        #[source]
        source: Box<BankError>,
    },

    /// Summed inputs and summed outputs disagree; `denom` is the first
    /// denomination, in ascending order, whose totals differ
    #[error("Unbalanced transfer in {denom}: inputs {inputs} != outputs {outputs}")]
    UnbalancedTransfer {
        denom: String,
        inputs: String,
        outputs: String,
    },

    // ========================================================================
    // Limit Errors
    // ========================================================================

    /// Too many inputs or outputs for the configured limit
    #[error("Too many {side}s: {count} exceeds limit {limit}")]
    TooManyEndpoints { side: Side, count: usize, limit: usize },

    /// Too many denominations in one bundle for the configured limit
    #[error("Too many denominations: {count} exceeds limit {limit}")]
    TooManyDenoms { count: usize, limit: usize },
}

impl BankError {
    /// Wrap an endpoint failure with its position
    pub fn at(side: Side, index: usize, source: BankError) -> Self {
        Self::InvalidEndpoint {
            side,
            index,
            source: Box::new(source),
        }
    }

    /// The innermost error, with positional wrappers stripped
    pub fn root_cause(&self) -> &BankError {
        match self {
            Self::InvalidEndpoint { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Position of the offending endpoint, if known
    pub fn position(&self) -> Option<(Side, usize)> {
        match self {
            Self::InvalidEndpoint { side, index, .. } => Some((*side, *index)),
            _ => None,
        }
    }

    /// Get an error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyIdentity => "EMPTY_IDENTITY",
            Self::InvalidAddress { .. } => "INVALID_ADDRESS",
            Self::EmptyBundle => "EMPTY_BUNDLE",
            Self::NonPositiveAmount { .. } => "NON_POSITIVE_AMOUNT",
            Self::UnsortedOrDuplicateDenomination { .. } => "UNSORTED_OR_DUPLICATE_DENOMINATION",
            Self::AmountOverflow { .. } => "AMOUNT_OVERFLOW",
            Self::InvalidCoinString { .. } => "INVALID_COIN_STRING",
            Self::NoInputs => "NO_INPUTS",
            Self::NoOutputs => "NO_OUTPUTS",
            Self::InvalidEndpoint { source, .. } => source.error_code(),
            Self::UnbalancedTransfer { .. } => "UNBALANCED_TRANSFER",
            Self::TooManyEndpoints { .. } => "TOO_MANY_ENDPOINTS",
            Self::TooManyDenoms { .. } => "TOO_MANY_DENOMS",
        }
    }
}
