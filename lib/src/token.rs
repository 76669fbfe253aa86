use serde::{Deserialize, Serialize};

use crate::error::{GhostpadError, Result};
use crate::payloads::WithdrawData;

/// Metadata of the token minted anonymously against a deposit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
    pub initial_supply: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
}

impl TokenInfo {
    /// Names of the required fields that are blank
    pub fn missing_required(&self) -> Vec<String> {
        [
            ("name", &self.name),
            ("symbol", &self.symbol),
            ("description", &self.description),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field.to_string())
        .collect()
    }

    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_required();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(GhostpadError::InvalidTokenInfo(missing))
        }
    }
}

/// Everything the mint entry point needs: the token to launch and the
/// withdrawal that pays for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintRequest {
    pub token: TokenInfo,
    pub instance_index: u32,
    pub proof: WithdrawData,
}

impl MintRequest {
    /// Validates the token metadata and the withdrawal recipient
    pub fn new(token: TokenInfo, instance_index: u32, proof: WithdrawData) -> Result<Self> {
        token.validate()?;
        proof.ensure_submittable()?;
        Ok(Self {
            token,
            instance_index,
            proof,
        })
    }
}
