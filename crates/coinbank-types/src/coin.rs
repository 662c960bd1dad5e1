//! Coin types for Coinbank
//!
//! A [`Coins`] bundle is a list of `(denomination, amount)` entries describing
//! a multi-asset quantity. Bundles are built as-is from untrusted data and are
//! checked by [`Coins::validate`]; they are never reordered on construction so
//! that malformed input is rejected rather than masked.
//!
//! A valid bundle is in canonical form:
//!
//! - at least one entry
//! - every amount strictly positive
//! - denominations strictly ascending (which also rules out duplicates)
//!
//! Canonical form lets two valid bundles be compared entry by entry.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{BankError, Result};

/// A single `(denomination, amount)` entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    /// Asset type, e.g. `atom`
    pub denom: String,
    /// Amount in smallest units
    pub amount: i64,
}

impl Coin {
    /// Create a new coin
    pub fn new(denom: impl Into<String>, amount: i64) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Check if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.amount > 0
    }

    /// Check if both coins carry the same denomination
    pub fn same_denom_as(&self, other: &Coin) -> bool {
        self.denom == other.denom
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for Coin {
    type Err = BankError;

    /// Parse `<amount><denom>`, e.g. `123atom`
    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| BankError::InvalidCoinString {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| invalid("missing denomination"))?;
        let (digits, denom) = s.split_at(split);

        if digits.is_empty() {
            return Err(invalid("missing amount"));
        }
        if !is_valid_denom(denom) {
            return Err(invalid("denomination must start with a letter and contain only letters, digits or '/'"));
        }
        let amount = digits
            .parse::<i64>()
            .map_err(|_| invalid("amount out of range"))?;

        Ok(Self::new(denom, amount))
    }
}

fn is_valid_denom(denom: &str) -> bool {
    let mut chars = denom.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '/')
        }
        _ => false,
    }
}

/// A multi-asset bundle of coins
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coins(Vec<Coin>);

impl Coins {
    /// Wrap entries exactly as given
    pub fn new(coins: Vec<Coin>) -> Self {
        Self(coins)
    }

    /// The empty bundle
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in stored order
    pub fn iter(&self) -> std::slice::Iter<'_, Coin> {
        self.0.iter()
    }

    /// Borrow the entries
    pub fn as_slice(&self) -> &[Coin] {
        &self.0
    }

    /// Take the entries
    pub fn into_inner(self) -> Vec<Coin> {
        self.0
    }

    /// Check the canonical-form invariants.
    ///
    /// Ordering is checked before amounts: an unsorted or duplicated bundle
    /// reports that, whatever its amounts. Within each pass the first
    /// violation is reported. A zero entry rejects the whole bundle even when
    /// the other entries are fine.
    pub fn validate(&self) -> Result<()> {
        if self.0.is_empty() {
            return Err(BankError::EmptyBundle);
        }

        for pair in self.0.windows(2) {
            if pair[1].denom <= pair[0].denom {
                return Err(BankError::UnsortedOrDuplicateDenomination {
                    previous: pair[0].denom.clone(),
                    denom: pair[1].denom.clone(),
                });
            }
        }

        if let Some(coin) = self.iter().find(|coin| !coin.is_positive()) {
            return Err(BankError::NonPositiveAmount {
                denom: coin.denom.clone(),
                amount: coin.amount,
            });
        }

        Ok(())
    }

    /// Check validity without the reason
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Denomination-wise sum.
    ///
    /// Neither side needs to be valid. The result is canonical: sorted by
    /// denomination, one entry per denomination, zero totals dropped.
    pub fn checked_add(&self, other: &Coins) -> Result<Coins> {
        let mut totals: BTreeMap<&str, i64> = BTreeMap::new();
        for coin in self.iter().chain(other.iter()) {
            let total = totals.entry(coin.denom.as_str()).or_insert(0);
            *total = total
                .checked_add(coin.amount)
                .ok_or_else(|| BankError::AmountOverflow {
                    denom: coin.denom.clone(),
                })?;
        }

        Ok(Self(
            totals
                .into_iter()
                .filter(|(_, amount)| *amount != 0)
                .map(|(denom, amount)| Coin::new(denom, amount))
                .collect(),
        ))
    }

    /// Sum any number of bundles, starting from the empty bundle
    pub fn sum<'a, I>(bundles: I) -> Result<Coins>
    where
        I: IntoIterator<Item = &'a Coins>,
    {
        bundles
            .into_iter()
            .try_fold(Coins::empty(), |acc, coins| acc.checked_add(coins))
    }

    /// Negate every amount
    pub fn negate(&self) -> Result<Coins> {
        self.iter()
            .map(|coin| {
                coin.amount
                    .checked_neg()
                    .map(|amount| Coin::new(coin.denom.clone(), amount))
                    .ok_or_else(|| BankError::AmountOverflow {
                        denom: coin.denom.clone(),
                    })
            })
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    /// Denomination-wise difference, canonicalized like [`Coins::checked_add`]
    pub fn checked_sub(&self, other: &Coins) -> Result<Coins> {
        self.checked_add(&other.negate()?)
    }

    /// Amount held of one denomination (first matching entry, or zero)
    pub fn amount_of(&self, denom: &str) -> i64 {
        self.iter()
            .find(|coin| coin.denom == denom)
            .map(|coin| coin.amount)
            .unwrap_or(0)
    }

    /// Every amount is zero (true for the empty bundle)
    pub fn is_zero(&self) -> bool {
        self.iter().all(Coin::is_zero)
    }

    /// Non-empty and every amount strictly positive
    pub fn is_positive(&self) -> bool {
        !self.is_empty() && self.iter().all(Coin::is_positive)
    }

    /// No amount is negative
    pub fn is_not_negative(&self) -> bool {
        self.iter().all(|coin| coin.amount >= 0)
    }

    /// Check if `self` holds at least `other` of every denomination
    pub fn is_gte(&self, other: &Coins) -> Result<bool> {
        Ok(self.checked_sub(other)?.is_not_negative())
    }

    /// A copy sorted by denomination; the receiver is left untouched
    pub fn sorted(&self) -> Coins {
        let mut coins = self.0.clone();
        coins.sort_by(|a, b| a.denom.cmp(&b.denom));
        Self(coins)
    }
}

impl From<Vec<Coin>> for Coins {
    fn from(coins: Vec<Coin>) -> Self {
        Self(coins)
    }
}

impl<'a> IntoIterator for &'a Coins {
    type Item = &'a Coin;
    type IntoIter = std::slice::Iter<'a, Coin>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, coin) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", coin)?;
        }
        Ok(())
    }
}

impl FromStr for Coins {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self> {
        parse_coins(s)
    }
}

/// Parse a comma-separated coin list such as `123atom,20eth`.
///
/// Entries are kept in the order written; call [`Coins::validate`] to check
/// canonical form. An empty or blank string yields the empty bundle.
pub fn parse_coins(s: &str) -> Result<Coins> {
    if s.trim().is_empty() {
        return Ok(Coins::empty());
    }
    s.split(',')
        .map(str::parse::<Coin>)
        .collect::<Result<Vec<_>>>()
        .map(Coins)
}

/// Build a bundle from `(denom, amount)` pairs, in the order given
#[macro_export]
macro_rules! coins {
    () => {
        $crate::Coins::empty()
    };
    ($(($denom:expr, $amount:expr)),+ $(,)?) => {
        $crate::Coins::new(vec![$($crate::Coin::new($denom, $amount)),+])
    };
}
