//! Cryptographic primitives for GhostPad
//!
//! This module provides the hashing and randomness used to build deposit
//! commitments: Keccak-256 (the hash the pool contract verifies against),
//! raw byte concatenation and a fallible secure random source.

use alloy_primitives::B256;
use rand::{CryptoRng, RngCore};
use tiny_keccak::{Hasher, Keccak};

use crate::error::{GhostpadError, Result};

/// Hash length in bytes for Keccak-256
pub const HASH_LENGTH: usize = 32;

/// Size of the secret and nullifier in bytes
pub const NOTE_SIZE: usize = 32;

/// Compute Keccak-256 hash of input data
///
/// Must stay Keccak-256 (not SHA3-256): the pool contract recomputes
/// commitments with `keccak256`.
///
/// # Arguments
/// * `input` - Input data to hash
///
/// # Returns
/// * Keccak-256 hash as B256
pub fn keccak256<T: AsRef<[u8]>>(input: T) -> B256 {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; HASH_LENGTH];

    hasher.update(input.as_ref());
    hasher.finalize(&mut output);

    B256::from(output)
}

/// Concatenate byte slices with no separator and no length prefix
pub fn concat_bytes(parts: &[&[u8]]) -> Vec<u8> {
    let mut out = Vec::with_capacity(parts.iter().map(|p| p.len()).sum());
    for part in parts {
        out.extend_from_slice(part);
    }
    out
}

/// Draw 32 random bytes from a cryptographically secure generator
///
/// Uses `try_fill_bytes` so a failing entropy source is reported instead
/// of panicking.
pub fn random_bytes32<R: RngCore + CryptoRng>(rng: &mut R) -> Result<B256> {
    let mut bytes = [0u8; NOTE_SIZE];
    rng.try_fill_bytes(&mut bytes)
        .map_err(|e| GhostpadError::Generation(format!("random source failed: {e}")))?;
    Ok(B256::from(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn test_keccak256_empty_input_vector() {
        let hash = keccak256(b"");
        assert_eq!(
            hex::encode(hash),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_keccak256_matches_alloy() {
        let data = b"ghostpad commitment";
        assert_eq!(keccak256(data), alloy_primitives::keccak256(data));
    }

    #[test]
    fn test_keccak256_is_not_sha3() {
        // SHA3-256("") differs from Keccak-256("") because of padding
        let sha3_empty = "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a";
        assert_ne!(hex::encode(keccak256(b"")), sha3_empty);
    }

    #[test]
    fn test_concat_bytes_order() {
        let first: &[u8] = &[1, 2];
        let second: &[u8] = &[3];
        let joined = concat_bytes(&[first, second, &[]]);
        assert_eq!(joined, vec![1, 2, 3]);
    }

    #[test]
    fn test_random_bytes32_distinct() {
        let a = random_bytes32(&mut OsRng).unwrap();
        let b = random_bytes32(&mut OsRng).unwrap();
        assert_ne!(a, b);
        assert_eq!(a.len(), NOTE_SIZE);
    }
}
