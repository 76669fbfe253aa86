//! Commitment file format
//!
//! A commitment file is the user's only copy of the secret material once it
//! leaves the device that generated it. It carries every `DepositSecret`
//! field at the top level plus a `metadata` object:
//!
//! ```json
//! {
//!   "secret": "0x…",
//!   "nullifier": "0x…",
//!   "nullifierHash": "0x…",
//!   "commitment": "0x…",
//!   "metadata": { "date": "2024-01-01T00:00:00Z", "amount": 1.0, "type": "ghostpad-commitment" }
//! }
//! ```
//!
//! `commitment` and `nullifierHash` are what importers key on to decide
//! whether a file is a commitment file at all.

use std::str::FromStr;

use alloy_primitives::B256;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{GhostpadError, Result};
use crate::note::DepositSecret;
use crate::pool::PoolTier;

pub const COMMITMENT_FILE_TYPE: &str = "ghostpad-commitment";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub date: DateTime<Utc>,
    pub amount: PoolTier,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ExportMetadata {
    pub fn new(amount: PoolTier) -> Self {
        Self {
            date: Utc::now(),
            amount,
            kind: COMMITMENT_FILE_TYPE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitmentFile {
    #[serde(flatten)]
    pub deposit: DepositSecret,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ExportMetadata>,
}

impl CommitmentFile {
    pub fn new(deposit: DepositSecret, amount: PoolTier) -> Self {
        Self {
            deposit,
            metadata: Some(ExportMetadata::new(amount)),
        }
    }

    /// Pretty-printed JSON, as written to disk
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Suggested file name, unique per millisecond of generation time
    pub fn file_name(&self) -> String {
        let millis = self
            .metadata
            .as_ref()
            .map(|m| m.date)
            .unwrap_or_else(Utc::now)
            .timestamp_millis();
        format!("{COMMITMENT_FILE_TYPE}-{millis}.json")
    }
}

/// Parse and validate a commitment file
///
/// The file is rejected as a whole when `commitment` or `nullifierHash` is
/// missing or malformed, or when the secret material it carries does not
/// hash to them. Unknown top-level fields are ignored.
pub fn parse_commitment_file(json: &str) -> Result<CommitmentFile> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| GhostpadError::InvalidCommitmentFile(format!("not valid JSON: {e}")))?;
    let object = value.as_object().ok_or_else(|| {
        GhostpadError::InvalidCommitmentFile("expected a JSON object".to_string())
    })?;

    let commitment = required_hash(object, "commitment")?;
    let nullifier_hash = required_hash(object, "nullifierHash")?;
    let secret = optional_hash(object, "secret")?;
    let nullifier = optional_hash(object, "nullifier")?;

    let metadata = match object.get("metadata") {
        None | Some(Value::Null) => None,
        Some(raw) => Some(
            serde_json::from_value::<ExportMetadata>(raw.clone()).map_err(|e| {
                GhostpadError::InvalidCommitmentFile(format!("malformed metadata: {e}"))
            })?,
        ),
    };

    let deposit = DepositSecret {
        secret,
        nullifier,
        nullifier_hash,
        commitment,
    };
    deposit.verify()?;

    Ok(CommitmentFile { deposit, metadata })
}

/// Shortened commitment for display
pub fn format_commitment(commitment: &B256) -> String {
    let full = commitment.to_string();
    format!("{}...", &full[..10])
}

fn required_hash(object: &Map<String, Value>, field: &str) -> Result<B256> {
    match object.get(field) {
        None | Some(Value::Null) => Err(GhostpadError::InvalidCommitmentFile(format!(
            "missing required field `{field}`"
        ))),
        Some(value) => parse_hash(field, value),
    }
}

fn optional_hash(object: &Map<String, Value>, field: &str) -> Result<Option<B256>> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => parse_hash(field, value).map(Some),
    }
}

fn parse_hash(field: &str, value: &Value) -> Result<B256> {
    let text = value.as_str().ok_or_else(|| {
        GhostpadError::InvalidCommitmentFile(format!("field `{field}` must be a hex string"))
    })?;
    B256::from_str(text).map_err(|e| {
        GhostpadError::InvalidCommitmentFile(format!(
            "field `{field}` is not a 32-byte hex value: {e}"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::Note;

    fn sample() -> DepositSecret {
        Note {
            secret: B256::repeat_byte(0xaa),
            nullifier: B256::repeat_byte(0xbb),
        }
        .to_deposit_secret()
    }

    fn reason(err: GhostpadError) -> String {
        match err {
            GhostpadError::InvalidCommitmentFile(reason) => reason,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_export_reimport_preserves_deposit() {
        let file = CommitmentFile::new(sample(), PoolTier::Ten);
        let json = file.to_json().unwrap();

        let parsed = parse_commitment_file(&json).unwrap();
        assert_eq!(parsed.deposit, sample());
        let metadata = parsed.metadata.unwrap();
        assert_eq!(metadata.amount, PoolTier::Ten);
        assert_eq!(metadata.kind, COMMITMENT_FILE_TYPE);
    }

    #[test]
    fn test_export_layout_is_flat() {
        let json = CommitmentFile::new(sample(), PoolTier::One).to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert!(value["commitment"].is_string());
        assert!(value["nullifierHash"].is_string());
        assert_eq!(value["metadata"]["type"], COMMITMENT_FILE_TYPE);
        assert_eq!(value["metadata"]["amount"], 1.0);
    }

    #[test]
    fn test_file_name() {
        let file = CommitmentFile::new(sample(), PoolTier::One);
        let name = file.file_name();
        assert!(name.starts_with("ghostpad-commitment-"));
        assert!(name.ends_with(".json"));
    }

    #[test]
    fn test_missing_nullifier_hash_is_rejected() {
        let json = format!(r#"{{ "commitment": "{}" }}"#, sample().commitment);
        let err = parse_commitment_file(&json).unwrap_err();
        assert!(reason(err).contains("nullifierHash"));
    }

    #[test]
    fn test_missing_commitment_is_rejected() {
        let json = format!(r#"{{ "nullifierHash": "{}" }}"#, sample().nullifier_hash);
        let err = parse_commitment_file(&json).unwrap_err();
        assert!(reason(err).contains("commitment"));
    }

    #[test]
    fn test_public_only_file_is_accepted() {
        let deposit = sample();
        let json = format!(
            r#"{{ "commitment": "{}", "nullifierHash": "{}", "generatedAt": "yesterday" }}"#,
            deposit.commitment, deposit.nullifier_hash
        );
        let parsed = parse_commitment_file(&json).unwrap();
        assert_eq!(parsed.deposit.nullifier_hash, deposit.nullifier_hash);
        assert!(parsed.deposit.secret.is_none());
        assert!(parsed.metadata.is_none());
    }

    #[test]
    fn test_malformed_inputs_are_rejected() {
        assert!(parse_commitment_file("not json").is_err());
        assert!(reason(parse_commitment_file("[]").unwrap_err()).contains("object"));

        let short = r#"{ "commitment": "0x1234", "nullifierHash": "0x1234" }"#;
        assert!(reason(parse_commitment_file(short).unwrap_err()).contains("32-byte"));

        let numeric = r#"{ "commitment": 7, "nullifierHash": "0x00" }"#;
        assert!(reason(parse_commitment_file(numeric).unwrap_err()).contains("hex string"));
    }

    #[test]
    fn test_inconsistent_secret_is_rejected() {
        let mut deposit = sample();
        deposit.secret = Some(B256::repeat_byte(0x01));
        let json = serde_json::to_string(&deposit).unwrap();
        assert!(reason(parse_commitment_file(&json).unwrap_err()).contains("commitment"));
    }

    #[test]
    fn test_format_commitment() {
        let shown = format_commitment(&B256::repeat_byte(0xab));
        assert_eq!(shown, "0xabababab...");
    }
}
