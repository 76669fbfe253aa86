//! Commitment Generator
//!
//! Stateless transforms over locally held secret material: one entry point
//! that draws randomness, two that derive contract payloads from an existing
//! [`DepositSecret`].

use alloy_primitives::B256;
use rand::{rngs::OsRng, CryptoRng, RngCore};
use tracing::debug;

use crate::error::{GhostpadError, Result};
use crate::export::format_commitment;
use crate::note::{DepositSecret, Note};
use crate::payloads::{DepositData, WithdrawData, WithdrawParams};
use crate::prover::ProofBundle;

/// Result of a successful generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCommitment {
    pub commitment: B256,
    pub deposit_secret: DepositSecret,
}

/// Generate a fresh commitment from the operating system's entropy source
///
/// Nothing is persisted here; the caller owns the result.
pub fn generate_commitment() -> Result<GeneratedCommitment> {
    generate_commitment_with(&mut OsRng)
}

/// Generate a fresh commitment from the given secure generator
pub fn generate_commitment_with<R: RngCore + CryptoRng>(
    rng: &mut R,
) -> Result<GeneratedCommitment> {
    let note = Note::generate_with(rng)?;
    let deposit_secret = note.to_deposit_secret();
    debug!(
        commitment = %format_commitment(&deposit_secret.commitment),
        "generated commitment"
    );
    Ok(GeneratedCommitment {
        commitment: deposit_secret.commitment,
        deposit_secret,
    })
}

/// Payload for the pool's `deposit` call
pub fn prepare_deposit_data(deposit: Option<&DepositSecret>) -> Result<DepositData> {
    let deposit = deposit.ok_or(GhostpadError::NoSecret)?;
    Ok(DepositData {
        commitment: deposit.commitment,
    })
}

/// Payload for the pool's `withdraw` call
///
/// `proof` and `root` come from an external proving subsystem; see
/// [`crate::prover::ProofProvider`].
pub fn prepare_withdraw_data(
    deposit: Option<&DepositSecret>,
    params: WithdrawParams,
    proof: ProofBundle,
) -> Result<WithdrawData> {
    let deposit = deposit.ok_or(GhostpadError::NoSecret)?;
    Ok(WithdrawData {
        proof: proof.proof,
        root: proof.root,
        nullifier_hash: deposit.nullifier_hash,
        recipient: params.recipient,
        relayer: params.relayer,
        fee: params.fee,
        refund: params.refund,
    })
}
