//! Bank messages
//!
//! [`SendMsg`] moves coins between owners and must conserve every
//! denomination. [`IssueMsg`] creates coins under a banker's authority.
//! [`Msg`] is the tagged union a decoding layer produces.
//!
//! Validation order is fixed so that the reported error is stable:
//! side presence, then inputs front to back, then outputs front to back, then
//! conservation.

use std::collections::BTreeMap;

use coinbank_types::{Address, BankError, Coins, Result, Side};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{BankConfig, Endpoint, Input, Output};

/// Route name shared by every bank message
pub const BANK_MSG_TYPE: &str = "bank";

/// Validate every endpoint of one side, in order
fn validate_side<E: Endpoint>(side: Side, endpoints: &[E]) -> Result<()> {
    for (index, endpoint) in endpoints.iter().enumerate() {
        endpoint
            .validate_basic()
            .map_err(|e| BankError::at(side, index, e))?;
    }
    Ok(())
}

/// Per-denomination totals of one side, wide enough that summing `i64`
/// amounts cannot overflow
fn tally<E: Endpoint>(endpoints: &[E]) -> BTreeMap<&str, i128> {
    let mut totals = BTreeMap::new();
    for coin in endpoints.iter().flat_map(|endpoint| endpoint.coins().iter()) {
        *totals.entry(coin.denom.as_str()).or_insert(0) += i128::from(coin.amount);
    }
    totals
}

fn format_tally(totals: &BTreeMap<&str, i128>) -> String {
    totals
        .iter()
        .map(|(denom, amount)| format!("{}{}", amount, denom))
        .collect::<Vec<_>>()
        .join(",")
}

fn log_verdict(kind: &str, result: &Result<()>) {
    match result {
        Ok(()) => trace!("{} message accepted", kind),
        Err(e) => match e.position() {
            Some((side, index)) => {
                debug!("{} message rejected at {} #{}: {} ({})", kind, side, index, e.root_cause(), e.error_code())
            }
            None => debug!("{} message rejected: {} ({})", kind, e, e.error_code()),
        },
    }
}

/// Multi-input, multi-output coin transfer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMsg {
    pub inputs: Vec<Input>,
    pub outputs: Vec<Output>,
}

impl SendMsg {
    pub fn new(inputs: Vec<Input>, outputs: Vec<Output>) -> Self {
        Self { inputs, outputs }
    }

    pub fn msg_type(&self) -> &'static str {
        BANK_MSG_TYPE
    }

    /// Check the transfer is well-formed and conserves every denomination.
    ///
    /// Says nothing about whether the owners actually hold the coins.
    pub fn validate_basic(&self) -> Result<()> {
        let result = self.check();
        log_verdict("send", &result);
        result
    }

    /// Apply size limits, then [`SendMsg::validate_basic`]
    pub fn validate_with(&self, config: &BankConfig) -> Result<()> {
        config.check_side(Side::Input, &self.inputs)?;
        config.check_side(Side::Output, &self.outputs)?;
        self.validate_basic()
    }

    fn check(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(BankError::NoInputs);
        }
        if self.outputs.is_empty() {
            return Err(BankError::NoOutputs);
        }

        validate_side(Side::Input, &self.inputs)?;
        validate_side(Side::Output, &self.outputs)?;

        let total_in = tally(&self.inputs);
        let total_out = tally(&self.outputs);
        let mismatch = total_in
            .keys()
            .chain(total_out.keys())
            .filter(|denom| total_in.get(*denom) != total_out.get(*denom))
            .min();
        if let Some(denom) = mismatch {
            return Err(BankError::UnbalancedTransfer {
                denom: denom.to_string(),
                inputs: format_tally(&total_in),
                outputs: format_tally(&total_out),
            });
        }

        Ok(())
    }

    /// Canonical sum of all input coins; fails if a total leaves the `i64` range
    pub fn total_in(&self) -> Result<Coins> {
        Coins::sum(self.inputs.iter().map(|input| &input.coins))
    }

    /// Canonical sum of all output coins; fails if a total leaves the `i64` range
    pub fn total_out(&self) -> Result<Coins> {
        Coins::sum(self.outputs.iter().map(|output| &output.coins))
    }

    /// Canonical JSON encoding of the message
    pub fn sign_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

/// Coin issuance by a banker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueMsg {
    pub banker: Address,
    pub outputs: Vec<Output>,
}

impl IssueMsg {
    pub fn new(banker: Address, outputs: Vec<Output>) -> Self {
        Self { banker, outputs }
    }

    pub fn msg_type(&self) -> &'static str {
        BANK_MSG_TYPE
    }

    /// Check the banker is present and every output is well-formed.
    ///
    /// Issuance creates supply, so there is no conservation check.
    pub fn validate_basic(&self) -> Result<()> {
        let result = self.check();
        log_verdict("issue", &result);
        result
    }

    /// Apply size limits, then [`IssueMsg::validate_basic`]
    pub fn validate_with(&self, config: &BankConfig) -> Result<()> {
        config.check_side(Side::Output, &self.outputs)?;
        self.validate_basic()
    }

    fn check(&self) -> Result<()> {
        if self.banker.is_empty() {
            return Err(BankError::EmptyIdentity);
        }
        if self.outputs.is_empty() {
            return Err(BankError::NoOutputs);
        }
        validate_side(Side::Output, &self.outputs)
    }

    /// Canonical JSON encoding of the message
    pub fn sign_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

/// Every message kind the bank accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Msg {
    Send(SendMsg),
    Issue(IssueMsg),
}

impl Msg {
    pub fn msg_type(&self) -> &'static str {
        match self {
            Self::Send(msg) => msg.msg_type(),
            Self::Issue(msg) => msg.msg_type(),
        }
    }

    pub fn validate_basic(&self) -> Result<()> {
        match self {
            Self::Send(msg) => msg.validate_basic(),
            Self::Issue(msg) => msg.validate_basic(),
        }
    }

    pub fn validate_with(&self, config: &BankConfig) -> Result<()> {
        match self {
            Self::Send(msg) => msg.validate_with(config),
            Self::Issue(msg) => msg.validate_with(config),
        }
    }

    pub fn sign_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

impl From<SendMsg> for Msg {
    fn from(msg: SendMsg) -> Self {
        Self::Send(msg)
    }
}

impl From<IssueMsg> for Msg {
    fn from(msg: IssueMsg) -> Self {
        Self::Issue(msg)
    }
}
