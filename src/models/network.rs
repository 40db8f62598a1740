use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Base URL of the BitIndex v3 API. The network name is appended as the first
/// path segment.
pub const API_ENDPOINT: &str = "https://api.bitindex.network/api/v3/";

/// Networks served by the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Main,
    Test,
    /// Scaling test network.
    Stn,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Main => "main",
            Network::Test => "test",
            Network::Stn => "stn",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "main" | "mainnet" => Ok(Network::Main),
            "test" | "testnet" => Ok(Network::Test),
            "stn" | "scaling-testnet" => Ok(Network::Stn),
            other => Err(format!("Invalid network: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_round_trips_through_display() {
        for network in [Network::Main, Network::Test, Network::Stn] {
            assert_eq!(network.to_string().parse::<Network>().unwrap(), network);
        }
    }

    #[test]
    fn test_network_aliases() {
        assert_eq!("MainNet".parse::<Network>().unwrap(), Network::Main);
        assert_eq!("testnet".parse::<Network>().unwrap(), Network::Test);
        assert_eq!("scaling-testnet".parse::<Network>().unwrap(), Network::Stn);
        assert!("regtest".parse::<Network>().is_err());
        assert_eq!(Network::default(), Network::Main);
    }

    #[test]
    fn test_network_serde_uses_wire_names() {
        assert_eq!(serde_json::to_string(&Network::Stn).unwrap(), "\"stn\"");
        let network: Network = serde_json::from_str("\"test\"").unwrap();
        assert_eq!(network, Network::Test);
    }
}
