//! Pool denominations and contract routing
//!
//! Each fixed ETH denomination is served by its own pool instance. The
//! addresses of those instances live in a per-network address book
//! (`smart_contract_address.<network>.json`).

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use alloy_primitives::{Address, U256};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{GhostpadError, Result};

/// Fixed deposit denominations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolTier {
    PointOne,
    One,
    Ten,
    Hundred,
}

impl PoolTier {
    pub const ALL: [PoolTier; 4] = [
        PoolTier::PointOne,
        PoolTier::One,
        PoolTier::Ten,
        PoolTier::Hundred,
    ];

    pub fn eth(&self) -> f64 {
        match self {
            PoolTier::PointOne => 0.1,
            PoolTier::One => 1.0,
            PoolTier::Ten => 10.0,
            PoolTier::Hundred => 100.0,
        }
    }

    /// Deposit value in wei
    pub fn wei(&self) -> U256 {
        let exponent: u64 = match self {
            PoolTier::PointOne => 17,
            PoolTier::One => 18,
            PoolTier::Ten => 19,
            PoolTier::Hundred => 20,
        };
        U256::from(10u64).pow(U256::from(exponent))
    }

    /// Key of this tier's instance in the address book
    pub fn instance_key(&self) -> &'static str {
        match self {
            PoolTier::PointOne => "tornadoInstance0ETH",
            PoolTier::One => "tornadoInstance1ETH",
            PoolTier::Ten => "tornadoInstance10ETH",
            PoolTier::Hundred => "tornadoInstance100ETH",
        }
    }

    pub fn from_eth(amount: f64) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|tier| (tier.eth() - amount).abs() < 1e-9)
            .ok_or_else(|| GhostpadError::UnsupportedAmount(amount.to_string()))
    }
}

impl fmt::Display for PoolTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.eth())
    }
}

impl FromStr for PoolTier {
    type Err = GhostpadError;

    fn from_str(s: &str) -> Result<Self> {
        let amount: f64 = s
            .trim()
            .trim_end_matches("ETH")
            .trim()
            .parse()
            .map_err(|_| GhostpadError::UnsupportedAmount(s.to_string()))?;
        Self::from_eth(amount)
    }
}

impl Serialize for PoolTier {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.eth())
    }
}

impl<'de> Deserialize<'de> for PoolTier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        PoolTier::from_eth(amount).map_err(de::Error::custom)
    }
}

/// Networks the application knows addresses for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    Local,
    Sepolia,
    Mainnet,
}

impl Network {
    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Local => 31337,
            Network::Sepolia => 11155111,
            Network::Mainnet => 1,
        }
    }

    /// Unknown chains are treated as a local development node.
    pub fn from_chain_id(chain_id: u64) -> Self {
        match chain_id {
            11155111 => Network::Sepolia,
            1 => Network::Mainnet,
            _ => Network::Local,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Network::Local => "local",
            Network::Sepolia => "sepolia",
            Network::Mainnet => "mainnet",
        }
    }

    /// Default address book file for this network
    pub fn address_book_file(&self) -> String {
        format!("smart_contract_address.{}.json", self.name())
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" | "anvil" | "hardhat" => Ok(Network::Local),
            "sepolia" => Ok(Network::Sepolia),
            "mainnet" => Ok(Network::Mainnet),
            other => match other.parse::<u64>() {
                Ok(id) => Ok(Network::from_chain_id(id)),
                Err(_) => Err(format!("unknown network: {s}")),
            },
        }
    }
}

/// Ensure a hex string carries exactly one `0x` prefix
pub fn normalize_address(address: &str) -> String {
    if address.is_empty() {
        return String::new();
    }
    let mut cleaned = address;
    while let Some(rest) = cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
    {
        cleaned = rest;
    }
    format!("0x{cleaned}")
}

/// Contract addresses deployed on one network
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddressBook {
    #[serde(default)]
    pub contracts: HashMap<String, String>,
    #[serde(default, rename = "tornadoInstances")]
    pub instances: HashMap<String, String>,
}

impl AddressBook {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            GhostpadError::MissingAddress(format!("address book {}: {e}", path.display()))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Address of the pool instance serving `tier`
    pub fn instance_address(&self, tier: PoolTier) -> Result<Address> {
        let raw = self
            .instances
            .get(tier.instance_key())
            .ok_or_else(|| GhostpadError::MissingAddress(tier.instance_key().to_string()))?;
        parse_address(raw)
    }

    pub fn contract_address(&self, name: &str) -> Result<Address> {
        let raw = self
            .contracts
            .get(name)
            .ok_or_else(|| GhostpadError::MissingAddress(name.to_string()))?;
        parse_address(raw)
    }
}

fn parse_address(raw: &str) -> Result<Address> {
    let normalized = normalize_address(raw);
    normalized
        .parse::<Address>()
        .map_err(|e| GhostpadError::InvalidAddress(normalized.clone(), e.to_string()))
}
