//! Coin commands - Parse coin strings

use coinbank_bank::BankConfig;
use coinbank_types::parse_coins;

use crate::display;

/// Parse and validate a coin list; returns whether it is canonical
pub fn parse(input: &str, bank_config: &BankConfig) -> anyhow::Result<bool> {
    let coins = parse_coins(input)?;
    display::field("Parsed", &coins.to_string());

    match bank_config.check_coins(&coins).and_then(|()| coins.validate()) {
        Ok(()) => {
            display::accepted("Coins");
            Ok(true)
        }
        Err(e) => {
            display::rejected("Coins", &e);
            display::field("Sorted", &coins.sorted().to_string());
            Ok(false)
        }
    }
}
