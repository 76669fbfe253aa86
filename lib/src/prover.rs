use alloy_primitives::{Bytes, B256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProverError;
use crate::note::DepositSecret;
use crate::payloads::WithdrawParams;

/// Proof and Merkle root produced by an external proving subsystem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofBundle {
    pub proof: Bytes,
    pub root: B256,
}

/// Source of withdrawal proofs
///
/// Nothing in this crate produces a zero-knowledge proof or a Merkle root.
/// Implementations forward the deposit and withdrawal policy to a relayer
/// or proving service and return what it computed.
#[async_trait]
pub trait ProofProvider: Send + Sync {
    async fn prove(
        &self,
        deposit: &DepositSecret,
        params: &WithdrawParams,
    ) -> Result<ProofBundle, ProverError>;
}
