use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

/// Optional settings file looked up in the working directory (`concierge.toml`)
pub const CONFIG_FILE: &str = "concierge";
pub const ENV_PREFIX: &str = "CONCIERGE";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CliConfig {
    pub api_url: String,
    pub slot_limit: u32,
}

impl CliConfig {
    /// Defaults, then `concierge.toml`, then `CONCIERGE_*` variables
    pub fn load() -> Result<Self> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name(CONFIG_FILE).required(false))
                .add_source(Environment::with_prefix(ENV_PREFIX)),
        )
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        builder
            .set_default("api_url", DEFAULT_API_URL)?
            .set_default("slot_limit", i64::from(client::DEFAULT_SLOT_LIMIT))?
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_without_sources() {
        let config = CliConfig::from_builder(Config::builder()).unwrap();
        assert_eq!(
            config,
            CliConfig {
                api_url: DEFAULT_API_URL.into(),
                slot_limit: 5,
            }
        );
    }

    #[test]
    fn file_overrides_defaults() {
        let builder = Config::builder().add_source(File::from_str(
            "api_url = \"https://concierge.example.com\"\nslot_limit = 3",
            FileFormat::Toml,
        ));
        let config = CliConfig::from_builder(builder).unwrap();
        assert_eq!(config.api_url, "https://concierge.example.com");
        assert_eq!(config.slot_limit, 3);
    }
}
