use alloy_primitives::B256;
use rand::{rngs::OsRng, CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::crypto::{concat_bytes, keccak256, random_bytes32};
use crate::error::{GhostpadError, Result};

/// Represents a deposit note, containing the core
/// cryptographic secrets.
/// The `secret` provides ownership, and the `nullifier`
/// prevents double-spending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub secret: B256,
    pub nullifier: B256,
}

impl Note {
    /// Creates a new Note with a cryptographically secure
    /// random secret and nullifier drawn from the operating
    /// system's entropy source.
    pub fn generate() -> Result<Self> {
        Self::generate_with(&mut OsRng)
    }

    /// Creates a new Note from the given secure generator.
    /// The two values are drawn independently.
    pub fn generate_with<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self> {
        let secret = random_bytes32(rng)?;
        let nullifier = random_bytes32(rng)?;
        Ok(Self { secret, nullifier })
    }

    /// Calculates the commitment for this note.
    /// `keccak256(nullifier || secret)`, nullifier first. The
    /// contract will not recognise the reversed order.
    pub fn commitment(&self) -> B256 {
        keccak256(concat_bytes(&[
            self.nullifier.as_slice(),
            self.secret.as_slice(),
        ]))
    }

    /// Calculates the nullifier hash for this note.
    /// This value is revealed during a withdrawal to prevent the
    /// note from being used again.
    pub fn nullifier_hash(&self) -> B256 {
        keccak256(self.nullifier)
    }

    /// Expands the note into its persisted form with both derived hashes.
    pub fn to_deposit_secret(&self) -> DepositSecret {
        DepositSecret {
            secret: Some(self.secret),
            nullifier: Some(self.nullifier),
            nullifier_hash: self.nullifier_hash(),
            commitment: self.commitment(),
        }
    }
}

/// Partial hex representation, safe for terminal output.
impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Note(secret: 0x{}..., nullifier: 0x{}...)",
            hex::encode(&self.secret[0..4]),
            hex::encode(&self.nullifier[0..4])
        )
    }
}

/// The secret material of one deposit, as persisted locally and exported.
///
/// Only `commitment` is ever sent on-chain at deposit time. The
/// `secret`/`nullifier` pair may be absent on records imported from
/// a file that carries only the public hashes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositSecret {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<B256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullifier: Option<B256>,
    pub nullifier_hash: B256,
    pub commitment: B256,
}

impl DepositSecret {
    /// The note behind this record, if both halves are known.
    pub fn note(&self) -> Option<Note> {
        match (self.secret, self.nullifier) {
            (Some(secret), Some(nullifier)) => Some(Note { secret, nullifier }),
            _ => None,
        }
    }

    /// Recomputes the derived hashes and checks them against the stored ones.
    ///
    /// Records without the full note are accepted as long as they do not
    /// carry only one half of it.
    pub fn verify(&self) -> Result<()> {
        match (self.secret, self.nullifier) {
            (Some(secret), Some(nullifier)) => {
                let note = Note { secret, nullifier };
                if note.nullifier_hash() != self.nullifier_hash {
                    return Err(GhostpadError::InvalidCommitmentFile(
                        "nullifierHash does not match keccak256(nullifier)".to_string(),
                    ));
                }
                if note.commitment() != self.commitment {
                    return Err(GhostpadError::InvalidCommitmentFile(
                        "commitment does not match keccak256(nullifier || secret)".to_string(),
                    ));
                }
                Ok(())
            }
            (None, None) => Ok(()),
            _ => Err(GhostpadError::InvalidCommitmentFile(
                "secret and nullifier must be provided together".to_string(),
            )),
        }
    }
}

impl From<Note> for DepositSecret {
    fn from(note: Note) -> Self {
        note.to_deposit_secret()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_note() -> Note {
        Note {
            secret: B256::repeat_byte(0x22),
            nullifier: B256::repeat_byte(0x11),
        }
    }

    #[test]
    fn test_commitment_and_nullifier_hash_are_different_for_different_notes() {
        let note1 = Note::generate().unwrap();
        let note2 = Note::generate().unwrap();

        assert_ne!(note1.commitment(), note2.commitment());
        assert_ne!(note1.nullifier_hash(), note2.nullifier_hash());
    }

    #[test]
    fn test_commitment_and_nullifier_hash_are_consistent() {
        let note = Note::generate().unwrap();

        assert_eq!(note.commitment(), note.commitment());
        assert_eq!(note.nullifier_hash(), note.nullifier_hash());
    }

    #[test]
    fn test_commitment_hashes_nullifier_then_secret() {
        let note = fixed_note();
        let mut preimage = [0x11u8; 64];
        preimage[32..].fill(0x22);

        assert_eq!(note.commitment(), alloy_primitives::keccak256(preimage));

        let reversed = Note {
            secret: note.nullifier,
            nullifier: note.secret,
        };
        assert_ne!(reversed.commitment(), note.commitment());
    }

    #[test]
    fn test_nullifier_hash_ignores_secret() {
        let note = fixed_note();
        let other = Note {
            secret: B256::repeat_byte(0x99),
            nullifier: note.nullifier,
        };
        assert_eq!(note.nullifier_hash(), other.nullifier_hash());
        assert_eq!(
            note.nullifier_hash(),
            alloy_primitives::keccak256([0x11u8; 32])
        );
    }

    #[test]
    fn test_display_hides_most_of_the_secret() {
        let shown = fixed_note().to_string();
        assert_eq!(shown, "Note(secret: 0x22222222..., nullifier: 0x11111111...)");
    }

    #[test]
    fn test_deposit_secret_json_field_names() {
        let secret = fixed_note().to_deposit_secret();
        let value = serde_json::to_value(&secret).unwrap();
        let object = value.as_object().unwrap();

        for key in ["secret", "nullifier", "nullifierHash", "commitment"] {
            let field = object[key].as_str().unwrap();
            assert!(field.starts_with("0x"));
            assert_eq!(field.len(), 66);
        }
    }

    #[test]
    fn test_verify_detects_tampering() {
        let mut secret = fixed_note().to_deposit_secret();
        assert!(secret.verify().is_ok());

        secret.commitment = B256::ZERO;
        assert!(matches!(
            secret.verify(),
            Err(GhostpadError::InvalidCommitmentFile(_))
        ));
    }

    #[test]
    fn test_verify_rejects_half_a_note() {
        let mut secret = fixed_note().to_deposit_secret();
        secret.secret = None;
        assert!(secret.verify().is_err());

        secret.nullifier = None;
        assert!(secret.verify().is_ok());
        assert!(secret.note().is_none());
    }
}
