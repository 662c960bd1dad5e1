//! Coinbank Types - Foundation types for multi-asset transfers
//!
//! This crate has no dependencies on other coinbank crates. It defines:
//!
//! - [`Address`]: the opaque owner identity
//! - [`Coin`] and [`Coins`]: canonical multi-asset bundles
//! - [`BankError`]: the validation error taxonomy
//!
//! # Invariants
//!
//! 1. An empty address never owns or authorizes anything
//! 2. A valid bundle is non-empty, strictly positive and strictly ascending by denomination
//! 3. Bundles are never reordered on construction; validation is a separate gate

pub mod identity;
pub mod coin;
pub mod error;

pub use identity::*;
pub use coin::*;
pub use error::*;
