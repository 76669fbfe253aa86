//! Wire payloads for the privacy pool contract
//!
//! `DepositData` is the sole argument of the pool's `deposit` entry point and
//! `WithdrawData` the argument list of its `withdraw` entry point. Both can be
//! ABI-encoded into call data for the contract.

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::{sol, SolCall};
use serde::{Deserialize, Serialize};

use crate::error::{GhostpadError, Result};

sol! {
    /// Entry points of a fixed-denomination privacy pool instance.
    interface IPoolInstance {
        function deposit(bytes32 commitment) external payable;
        function withdraw(
            bytes proof,
            bytes32 root,
            bytes32 nullifierHash,
            address recipient,
            address relayer,
            uint256 fee,
            uint256 refund
        ) external payable;
    }
}

/// Data handed to the pool's `deposit` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositData {
    pub commitment: B256,
}

impl DepositData {
    /// ABI-encoded `deposit(bytes32)` call data.
    pub fn calldata(&self) -> Bytes {
        IPoolInstance::depositCall {
            commitment: self.commitment,
        }
        .abi_encode()
        .into()
    }
}

/// Withdrawal policy chosen by the caller
///
/// An unrelayed withdrawal leaves `relayer`, `fee` and `refund` at zero.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WithdrawParams {
    pub recipient: Address,
    pub relayer: Address,
    pub fee: U256,
    pub refund: U256,
}

impl WithdrawParams {
    pub fn new(recipient: Address) -> Self {
        Self {
            recipient,
            ..Self::default()
        }
    }

    /// Route the withdrawal through a relayer that deducts `fee`.
    pub fn with_relayer(mut self, relayer: Address, fee: U256) -> Self {
        self.relayer = relayer;
        self.fee = fee;
        self
    }

    pub fn with_refund(mut self, refund: U256) -> Self {
        self.refund = refund;
        self
    }

    /// Rejects a policy that would send funds to the zero address.
    pub fn ensure_submittable(&self) -> Result<()> {
        ensure_recipient(self.recipient)
    }
}

fn ensure_recipient(recipient: Address) -> Result<()> {
    if recipient == Address::ZERO {
        return Err(GhostpadError::ZeroRecipient);
    }
    Ok(())
}

/// Data handed to the pool's `withdraw` call (or the mint entry point that wraps it)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawData {
    pub proof: Bytes,
    pub root: B256,
    pub nullifier_hash: B256,
    pub recipient: Address,
    pub relayer: Address,
    pub fee: U256,
    pub refund: U256,
}

impl WithdrawData {
    /// Rejects payloads that would send funds to the zero address.
    pub fn ensure_submittable(&self) -> Result<()> {
        ensure_recipient(self.recipient)
    }

    /// ABI-encoded `withdraw(...)` call data.
    pub fn calldata(&self) -> Bytes {
        IPoolInstance::withdrawCall {
            proof: self.proof.clone(),
            root: self.root,
            nullifierHash: self.nullifier_hash,
            recipient: self.recipient,
            relayer: self.relayer,
            fee: self.fee,
            refund: self.refund,
        }
        .abi_encode()
        .into()
    }
}
