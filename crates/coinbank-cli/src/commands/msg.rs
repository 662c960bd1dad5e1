//! Message commands - Validate messages and list their signers

use std::fs;
use std::io::Read;

use anyhow::Context;
use coinbank_bank::{BankConfig, HasRequiredAuthorities, Msg, SendMsg};
use colored::*;

use crate::display;

/// Validate a message; returns whether it was accepted
pub fn validate(input: &str, bank_config: &BankConfig) -> anyhow::Result<bool> {
    let msg = load_msg(input)?;

    println!("{}", "Validating Message...".bright_white().bold());
    println!();
    display::field("Type", msg_kind(&msg));

    match msg.validate_with(bank_config) {
        Ok(()) => {
            display::accepted("Message");
            display::authorities(&msg.required_authorities());
            Ok(true)
        }
        Err(e) => {
            display::rejected("Message", &e);
            Ok(false)
        }
    }
}

/// Print the required authorities without validating
pub fn signers(input: &str) -> anyhow::Result<()> {
    let msg = load_msg(input)?;
    for address in msg.required_authorities() {
        println!("{}", address);
    }
    Ok(())
}

fn msg_kind(msg: &Msg) -> &'static str {
    match msg {
        Msg::Send(_) => "send",
        Msg::Issue(_) => "issue",
    }
}

/// Decode a tagged message, or a bare send message
pub fn parse_msg(json: &str) -> anyhow::Result<Msg> {
    match serde_json::from_str::<Msg>(json) {
        Ok(msg) => Ok(msg),
        Err(tagged_err) => serde_json::from_str::<SendMsg>(json)
            .map(Msg::from)
            .map_err(|_| tagged_err)
            .context("Could not decode message"),
    }
}

fn load_msg(input: &str) -> anyhow::Result<Msg> {
    let json = load_json(input)?;
    tracing::debug!("Decoding {} bytes of message JSON", json.len());
    parse_msg(&json)
}

fn load_json(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut json = String::new();
        std::io::stdin()
            .read_to_string(&mut json)
            .context("Failed to read message from stdin")?;
        Ok(json)
    } else if std::path::Path::new(input).exists() {
        fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))
    } else if input.trim_start().starts_with('{') {
        // Looks like inline JSON
        Ok(input.to_string())
    } else {
        anyhow::bail!("Input is neither a valid file path nor JSON: {}", input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SEND: &str = r#"{"inputs":[{"address":"0102","coins":[{"denom":"atom","amount":123}]}],"outputs":[{"address":"0708","coins":[{"denom":"atom","amount":123}]}]}"#;

    #[test]
    fn test_parse_bare_send() {
        let msg = parse_msg(SEND).unwrap();
        assert!(matches!(msg, Msg::Send(_)));
    }

    #[test]
    fn test_parse_tagged_issue() {
        let json = r#"{"type":"issue","banker":"BA","outputs":[{"address":"0708","coins":[{"denom":"atom","amount":1}]}]}"#;
        let msg = parse_msg(json).unwrap();
        assert!(matches!(msg, Msg::Issue(_)));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_msg("{\"nope\":1}").is_err());
    }

    #[test]
    fn test_validate_inline_and_file() {
        assert!(validate(SEND, &BankConfig::default()).unwrap());

        let unbalanced = SEND.replace("\"amount\":123}]}]}", "\"amount\":124}]}]}");
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(unbalanced.as_bytes()).unwrap();
        let path = file.path().to_str().unwrap();
        assert!(!validate(path, &BankConfig::default()).unwrap());
    }

    #[test]
    fn test_validate_respects_limits() {
        let json = r#"{"inputs":[{"address":"01","coins":[{"denom":"atom","amount":1},{"denom":"eth","amount":1}]}],"outputs":[{"address":"02","coins":[{"denom":"atom","amount":1},{"denom":"eth","amount":1}]}]}"#;
        let tight = BankConfig {
            max_endpoints: 0,
            max_denoms: 1,
        };
        assert!(validate(json, &BankConfig::unlimited()).unwrap());
        assert!(!validate(json, &tight).unwrap());
    }

    #[test]
    fn test_load_json_rejects_unknown_input() {
        assert!(load_json("not-a-file").is_err());
    }
}
