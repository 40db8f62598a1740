use std::{fs, fs::File, io::Write, path::Path, str::FromStr};

use anyhow::{Context, Result};
use config::{Config, Environment};
use log::{info, trace};

use super::defaults::ClientConfig;
use crate::models::Network;

/// Section holding [`ClientConfig`].
pub const CLIENT_SECTION: &str = "client";

fn get_config_property_overrides(network: &Network) -> Vec<(String, String)> {
    vec![(format!("{}.network", CLIENT_SECTION), network.to_string())]
}

pub fn get_default_config() -> &'static str {
    include_str!("../../config/config.toml")
}

pub fn load_configuration(path: &Path, cli_network: Option<Network>) -> Result<Config> {
    if !path.exists() {
        let sources = get_default_config();
        write_config_to(path, sources).context("Could not create default config")?;
        info!(path:% = path.display(); "Created new configuration file");
    }

    let filename = path.to_str().context("Invalid config file path")?;

    let cfg = Config::builder()
        .add_source(config::File::with_name(filename))
        .add_source(
            Environment::with_prefix("BITINDEX")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Could not build initial config")?;

    let network = if let Some(val) = cli_network {
        val
    } else {
        match cfg.get_string("network") {
            Ok(network_str) => Network::from_str(&network_str)
                .map_err(anyhow::Error::msg)
                .context("Invalid network")?,
            Err(config::ConfigError::NotFound(_)) => Network::default(),
            Err(e) => return Err(e).context("Could not get network configuration"),
        }
    };

    let mut builder = Config::builder().add_source(cfg);
    for (key, value) in get_config_property_overrides(&network) {
        trace!("Set override: ({key}, {value})");
        builder = builder
            .set_override(key.as_str(), value.as_str())
            .context("Could not override config property")?;
    }

    builder.build().context("Could not build final config")
}

/// Extracts the client section, falling back to defaults when it is absent.
pub fn client_config(cfg: &Config) -> Result<ClientConfig> {
    match cfg.get::<ClientConfig>(CLIENT_SECTION) {
        Ok(client) => Ok(client),
        Err(config::ConfigError::NotFound(_)) => Ok(ClientConfig::default()),
        Err(e) => Err(e).context("Invalid client configuration"),
    }
}

pub fn write_config_to(path: &Path, source: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create parent directories")?;
    };

    let mut file = File::create(path).context("Failed to create config file")?;
    file.write_all(source.as_bytes())
        .context("Failed to write config content")?;
    file.write_all(b"\n").context("Failed to write newline")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    #[serial]
    fn test_missing_file_is_created_with_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let cfg = load_configuration(&path, None).unwrap();
        assert!(path.exists());

        let client = client_config(&cfg).unwrap();
        assert_eq!(client.network, Network::Main);
        assert_eq!(client.base_url, crate::models::API_ENDPOINT);
        assert_eq!(client.max_retries, 2);
        assert_eq!(client.webhook.path, "/bitindex/webhook");
        assert!(client.api_key.is_empty());
    }

    #[test]
    #[serial]
    fn test_cli_network_wins_over_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        write_config_to(&path, "network = \"test\"\n[client]\nmax_retries = 4").unwrap();

        let from_file = client_config(&load_configuration(&path, None).unwrap()).unwrap();
        assert_eq!(from_file.network, Network::Test);
        assert_eq!(from_file.max_retries, 4);

        let from_cli = client_config(&load_configuration(&path, Some(Network::Stn)).unwrap()).unwrap();
        assert_eq!(from_cli.network, Network::Stn);
    }

    #[test]
    #[serial]
    fn test_environment_overrides_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        write_config_to(&path, "[client]\ntimeout_secs = 10").unwrap();

        // SAFETY: serialized with the other tests that touch the environment.
        unsafe { std::env::set_var("BITINDEX_CLIENT__TIMEOUT_SECS", "42") };
        let result = load_configuration(&path, None).and_then(|cfg| client_config(&cfg));
        unsafe { std::env::remove_var("BITINDEX_CLIENT__TIMEOUT_SECS") };

        assert_eq!(result.unwrap().timeout_secs, 42);
    }

    #[test]
    #[serial]
    fn test_invalid_network_is_rejected() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        write_config_to(&path, "network = \"regtest\"").unwrap();

        assert!(load_configuration(&path, None).is_err());
    }
}
