//! Required authorities
//!
//! Every message kind names the identities whose sign-off it needs. The
//! signature layer consumes this list; nothing here checks signatures or
//! validates the message.

use std::collections::HashSet;

use coinbank_types::Address;

use crate::{IssueMsg, Msg, SendMsg};

/// Capability shared by every message kind
pub trait HasRequiredAuthorities {
    /// Distinct identities that must authorize the message, in first-occurrence order
    fn required_authorities(&self) -> Vec<Address>;
}

impl HasRequiredAuthorities for SendMsg {
    fn required_authorities(&self) -> Vec<Address> {
        let mut seen = HashSet::new();
        let mut authorities = Vec::new();
        for input in &self.inputs {
            if seen.insert(&input.address) {
                authorities.push(input.address.clone());
            }
        }
        authorities
    }
}

impl HasRequiredAuthorities for IssueMsg {
    fn required_authorities(&self) -> Vec<Address> {
        vec![self.banker.clone()]
    }
}

impl HasRequiredAuthorities for Msg {
    fn required_authorities(&self) -> Vec<Address> {
        match self {
            Self::Send(msg) => msg.required_authorities(),
            Self::Issue(msg) => msg.required_authorities(),
        }
    }
}
