//! Coinbank Bank - Validation of multi-party, multi-asset transfers
//!
//! Given debits ([`Input`]) and credits ([`Output`]), each an owner plus a
//! [`Coins`] bundle, decide whether a transfer is well-formed and conserves
//! value before it moves on to signing, sequencing and settlement.
//!
//! # Invariants
//!
//! 1. A send has at least one input and one output
//! 2. Every endpoint has a non-empty owner and a canonical coin bundle
//! 3. Summed inputs equal summed outputs for every denomination
//! 4. Only debit-side owners authorize a send
//!
//! # Flow
//!
//! ```text
//! decode → validate_basic → required_authorities → signatures → settlement
//! ```
//!
//! Everything here is pure and synchronous; messages can be validated from
//! any number of threads at once.

pub mod endpoint;
pub mod msg;
pub mod authority;
pub mod config;

pub use endpoint::*;
pub use msg::*;
pub use authority::*;
pub use config::*;

pub use coinbank_types::{Address, BankError, Coin, Coins, Result, Side};
