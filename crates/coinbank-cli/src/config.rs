//! CLI configuration
//!
//! Validation limits come from, in increasing priority: built-in defaults, an
//! optional config file, `COINBANK__*` environment variables (a `.env` file is
//! read first if present), and command-line flags.

use coinbank_bank::BankConfig;

/// Load limits from the optional file and the environment
pub fn load(config_path: Option<&str>) -> anyhow::Result<BankConfig> {
    let _ = dotenvy::dotenv();

    let mut builder = config::Config::builder();

    if let Some(path) = config_path {
        builder = builder.add_source(config::File::with_name(path).required(true));
    }

    builder = builder.add_source(
        config::Environment::with_prefix("COINBANK")
            .separator("__")
            .try_parsing(true),
    );

    let bank_config: BankConfig = builder.build()?.try_deserialize()?;
    tracing::debug!(
        "Limits: max_endpoints={}, max_denoms={}",
        bank_config.max_endpoints,
        bank_config.max_denoms
    );
    Ok(bank_config)
}

/// Apply command-line overrides on top of loaded limits
pub fn with_overrides(
    mut bank_config: BankConfig,
    max_endpoints: Option<usize>,
    max_denoms: Option<usize>,
) -> BankConfig {
    if let Some(limit) = max_endpoints {
        bank_config.max_endpoints = limit;
    }
    if let Some(limit) = max_denoms {
        bank_config.max_denoms = limit;
    }
    bank_config
}
