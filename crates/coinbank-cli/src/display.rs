//! Verdict rendering for the CLI

use coinbank_types::{Address, BankError};
use colored::*;

/// Where a rejection happened, as `input #0`, when it names an endpoint
pub fn location(err: &BankError) -> Option<String> {
    err.position().map(|(side, index)| format!("{} #{}", side, index))
}

/// Print one labeled fact about the thing being checked
pub fn field(label: &str, value: &str) {
    println!("  {}: {}", label.bright_white(), value.bright_cyan());
}

pub fn accepted(subject: &str) {
    println!("  {} {} accepted", "✓".bright_green(), subject.bright_green().bold());
}

/// Print the stable error code, the reason, and what the reason points at
pub fn rejected(subject: &str, err: &BankError) {
    println!(
        "  {} {} rejected: {}",
        "✗".bright_red(),
        subject,
        err.error_code().bright_red().bold()
    );
    println!("      reason: {}", err.root_cause());
    if let Some(at) = location(err) {
        println!("      endpoint: {}", at.bright_cyan());
    }
    if let BankError::UnbalancedTransfer { denom, .. } = err.root_cause() {
        println!("      denomination: {}", denom.bright_cyan());
    }
}

pub fn authorities(addresses: &[Address]) {
    println!();
    println!("  {}", "Required authorities:".bright_white());
    for address in addresses {
        println!("    • {}", address.to_string().bright_cyan());
    }
}
